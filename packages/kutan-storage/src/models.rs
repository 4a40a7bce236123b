#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Faculty {
	pub id: i64,
	pub name: String,
}

#[derive(Clone, Debug, PartialEq, Eq, sqlx::FromRow)]
pub struct Subject {
	pub id: i64,
	pub name: String,
	pub faculty_id: i64,
	pub register_sum: i64,
	pub earn_sum: i64,
}

#[derive(Debug)]
pub struct NewSubject<'a> {
	pub name: &'a str,
	pub faculty_id: i64,
	pub register_sum: i64,
	pub earn_sum: i64,
}
