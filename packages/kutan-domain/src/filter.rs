use serde::Serialize;

use kutan_config::TextMatch;

use crate::text::TextFilter;

/// Number of subjects shown per page.
pub const PAGE_SIZE: u64 = 10;

/// Normalized listing request.
///
/// Built only through [`FilterSpec::build`], so every field has already been trimmed and
/// parsed. Serializes with the field names the listing endpoint accepts.
#[derive(Clone, Debug, Default, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FilterSpec {
	pub search_query: Option<String>,
	#[serde(rename = "faculty")]
	pub faculty_id: Option<i64>,
	pub offset: u64,
}
impl FilterSpec {
	/// Normalizes the three raw listing inputs.
	///
	/// Never fails. A blank search query, an unparseable or negative faculty id, and an
	/// unparseable or negative offset all fall back to "no filter" and offset zero.
	pub fn build(
		raw_search_query: Option<&str>,
		raw_faculty_id: Option<&str>,
		raw_offset: Option<&str>,
	) -> Self {
		let search_query = raw_search_query
			.map(str::trim)
			.filter(|query| !query.is_empty())
			.map(ToString::to_string);
		let faculty_id = raw_faculty_id.and_then(parse_non_negative);
		let offset = raw_offset.and_then(parse_non_negative).map(|value| value as u64).unwrap_or(0);

		Self { search_query, faculty_id, offset }
	}

	pub fn page_size(&self) -> u64 {
		PAGE_SIZE
	}

	/// Predicate shared by the page query and the count query.
	pub fn predicate(&self, text_match: TextMatch) -> SubjectPredicate {
		SubjectPredicate {
			faculty_id: self.faculty_id,
			text: self.search_query.as_ref().map(|query| TextFilter::new(query.clone(), text_match)),
		}
	}
}

/// Matching condition applied to subjects, independent of any pagination window.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct SubjectPredicate {
	pub faculty_id: Option<i64>,
	pub text: Option<TextFilter>,
}
impl SubjectPredicate {
	pub fn matches(&self, name: &str, faculty_id: i64) -> bool {
		if let Some(expected) = self.faculty_id
			&& expected != faculty_id
		{
			return false;
		}

		self.text.as_ref().map(|text| text.matches(name)).unwrap_or(true)
	}
}

fn parse_non_negative(raw: &str) -> Option<i64> {
	raw.trim().parse::<i64>().ok().filter(|value| *value >= 0)
}
