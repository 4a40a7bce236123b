use sqlx::{Postgres, QueryBuilder};

use kutan_domain::SubjectPredicate;

use crate::{
	Error, Result,
	db::Db,
	models::{Faculty, NewSubject, Subject},
};

pub async fn find_subjects(
	db: &Db,
	predicate: &SubjectPredicate,
	offset: i64,
	limit: i64,
) -> Result<Vec<Subject>> {
	if offset < 0 || limit < 0 {
		return Err(Error::InvalidArgument("offset and limit must be non-negative.".to_string()));
	}

	let mut builder =
		QueryBuilder::new("SELECT id, name, faculty_id, register_sum, earn_sum FROM subjects");

	push_predicate(&mut builder, predicate);

	builder.push(" ORDER BY id ASC LIMIT ");
	builder.push_bind(limit);
	builder.push(" OFFSET ");
	builder.push_bind(offset);

	let subjects = builder.build_query_as::<Subject>().fetch_all(&db.pool).await?;

	Ok(subjects)
}

pub async fn count_subjects(db: &Db, predicate: &SubjectPredicate) -> Result<i64> {
	let mut builder = QueryBuilder::new("SELECT count(*) FROM subjects");

	push_predicate(&mut builder, predicate);

	let count = builder.build_query_scalar::<i64>().fetch_one(&db.pool).await?;

	Ok(count)
}

pub async fn list_faculties(db: &Db) -> Result<Vec<Faculty>> {
	let faculties = sqlx::query_as::<_, Faculty>("SELECT id, name FROM faculties ORDER BY id ASC")
		.fetch_all(&db.pool)
		.await?;

	Ok(faculties)
}

pub async fn insert_faculty(db: &Db, name: &str) -> Result<Faculty> {
	let name = name.trim();

	if name.is_empty() {
		return Err(Error::InvalidArgument("faculty name must be non-empty.".to_string()));
	}

	let faculty = sqlx::query_as::<_, Faculty>(
		"\
INSERT INTO faculties (name)
VALUES ($1)
RETURNING id, name",
	)
	.bind(name)
	.fetch_one(&db.pool)
	.await?;

	Ok(faculty)
}

pub async fn insert_subject(db: &Db, subject: &NewSubject<'_>) -> Result<Subject> {
	let name = subject.name.trim();

	if name.is_empty() {
		return Err(Error::InvalidArgument("subject name must be non-empty.".to_string()));
	}
	if subject.register_sum < 0 || subject.earn_sum < 0 {
		return Err(Error::InvalidArgument(
			"register_sum and earn_sum must be non-negative.".to_string(),
		));
	}

	let subject = sqlx::query_as::<_, Subject>(
		"\
INSERT INTO subjects (name, faculty_id, register_sum, earn_sum)
VALUES ($1, $2, $3, $4)
RETURNING id, name, faculty_id, register_sum, earn_sum",
	)
	.bind(name)
	.bind(subject.faculty_id)
	.bind(subject.register_sum)
	.bind(subject.earn_sum)
	.fetch_one(&db.pool)
	.await?;

	Ok(subject)
}

// Page and count queries must filter identically, so both go through here.
fn push_predicate(builder: &mut QueryBuilder<'_, Postgres>, predicate: &SubjectPredicate) {
	builder.push(" WHERE TRUE");

	if let Some(faculty_id) = predicate.faculty_id {
		builder.push(" AND faculty_id = ");
		builder.push_bind(faculty_id);
	}
	if let Some(text) = &predicate.text {
		if !text.is_satisfiable() {
			builder.push(" AND FALSE");

			return;
		}

		builder.push(" AND name ILIKE ");
		builder.push_bind(text.like_pattern());
		builder.push(" ESCAPE '\\'");
	}
}
