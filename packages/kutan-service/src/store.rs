use std::{future::Future, pin::Pin};

use kutan_domain::SubjectPredicate;
use kutan_storage::{
	db::Db,
	models::{Faculty, Subject},
	queries,
};

use crate::{Error, Result};

pub type BoxFuture<'a, T> = Pin<Box<dyn Future<Output = T> + Send + 'a>>;

/// Persistence collaborator used by the catalogue listing.
///
/// Implementations must evaluate `find_subjects` and `count_subjects` with the same
/// predicate semantics, order subjects by id ascending, and surface failures unchanged.
pub trait CatalogueStore
where
	Self: Send + Sync,
{
	fn find_subjects<'a>(
		&'a self,
		predicate: &'a SubjectPredicate,
		offset: i64,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<Subject>>>;

	fn count_subjects<'a>(&'a self, predicate: &'a SubjectPredicate) -> BoxFuture<'a, Result<i64>>;

	fn list_faculties<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Faculty>>>;
}

pub struct PostgresStore {
	db: Db,
}
impl PostgresStore {
	pub fn new(db: Db) -> Self {
		Self { db }
	}
}

impl CatalogueStore for PostgresStore {
	fn find_subjects<'a>(
		&'a self,
		predicate: &'a SubjectPredicate,
		offset: i64,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<Subject>>> {
		Box::pin(async move {
			queries::find_subjects(&self.db, predicate, offset, limit).await.map_err(Error::from)
		})
	}

	fn count_subjects<'a>(&'a self, predicate: &'a SubjectPredicate) -> BoxFuture<'a, Result<i64>> {
		Box::pin(async move { queries::count_subjects(&self.db, predicate).await.map_err(Error::from) })
	}

	fn list_faculties<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Faculty>>> {
		Box::pin(async move { queries::list_faculties(&self.db).await.map_err(Error::from) })
	}
}

/// Fixed, in-process catalogue.
///
/// Filters and slices the whole collection on every call, so it is only suitable for small
/// datasets and tests.
#[derive(Debug, Default)]
pub struct MemoryStore {
	faculties: Vec<Faculty>,
	subjects: Vec<Subject>,
}
impl MemoryStore {
	pub fn new(mut faculties: Vec<Faculty>, mut subjects: Vec<Subject>) -> Self {
		faculties.sort_by_key(|faculty| faculty.id);
		subjects.sort_by_key(|subject| subject.id);

		Self { faculties, subjects }
	}

	fn matching<'a>(
		&'a self,
		predicate: &'a SubjectPredicate,
	) -> impl Iterator<Item = &'a Subject> + 'a {
		self.subjects.iter().filter(|subject| predicate.matches(&subject.name, subject.faculty_id))
	}
}

impl CatalogueStore for MemoryStore {
	fn find_subjects<'a>(
		&'a self,
		predicate: &'a SubjectPredicate,
		offset: i64,
		limit: i64,
	) -> BoxFuture<'a, Result<Vec<Subject>>> {
		let offset = usize::try_from(offset.max(0)).unwrap_or(usize::MAX);
		let limit = usize::try_from(limit.max(0)).unwrap_or(usize::MAX);
		let page: Result<Vec<Subject>> =
			Ok(self.matching(predicate).skip(offset).take(limit).cloned().collect());

		Box::pin(async move { page })
	}

	fn count_subjects<'a>(&'a self, predicate: &'a SubjectPredicate) -> BoxFuture<'a, Result<i64>> {
		let count: Result<i64> = Ok(self.matching(predicate).count() as i64);

		Box::pin(async move { count })
	}

	fn list_faculties<'a>(&'a self) -> BoxFuture<'a, Result<Vec<Faculty>>> {
		let faculties: Result<Vec<Faculty>> = Ok(self.faculties.clone());

		Box::pin(async move { faculties })
	}
}
