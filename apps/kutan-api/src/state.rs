use std::sync::Arc;

use kutan_service::CatalogueService;
use kutan_storage::db::Db;

#[derive(Clone)]
pub struct AppState {
	pub service: Arc<CatalogueService>,
}
impl AppState {
	pub async fn new(config: kutan_config::Config) -> color_eyre::Result<Self> {
		let db = Db::connect(&config.storage.postgres).await?;

		db.ensure_schema().await?;

		let service = CatalogueService::new(config, db);

		Ok(Self { service: Arc::new(service) })
	}

	pub fn from_service(service: CatalogueService) -> Self {
		Self { service: Arc::new(service) }
	}
}
