pub mod list;
pub mod store;

mod error;

pub use error::{Error, Result};
pub use list::{
	FacultiesResponse, FacultyItem, ListSubjectsRequest, ListSubjectsResponse, SubjectView,
};
pub use store::{BoxFuture, CatalogueStore, MemoryStore, PostgresStore};

use std::sync::Arc;

use kutan_config::Config;
use kutan_storage::db::Db;

pub struct CatalogueService {
	pub cfg: Config,
	pub store: Arc<dyn CatalogueStore>,
}
impl CatalogueService {
	pub fn new(cfg: Config, db: Db) -> Self {
		Self { cfg, store: Arc::new(PostgresStore::new(db)) }
	}

	pub fn with_store(cfg: Config, store: Arc<dyn CatalogueStore>) -> Self {
		Self { cfg, store }
	}
}
