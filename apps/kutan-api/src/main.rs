use clap::Parser;

#[tokio::main]
async fn main() -> color_eyre::Result<()> {
	color_eyre::install()?;

	let args = kutan_api::Args::parse();

	kutan_api::run(args).await
}
