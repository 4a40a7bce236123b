use std::collections::HashMap;

use kutan_domain::{Anomaly, EarnRate, FilterSpec, PAGE_SIZE, PageMeta};
use kutan_storage::models::{Faculty, Subject};

use crate::{CatalogueService, Error, Result};

/// Raw listing inputs, exactly as they arrive from the query string.
#[derive(Debug, Clone, Default)]
pub struct ListSubjectsRequest {
	pub search_query: Option<String>,
	pub faculty: Option<String>,
	pub offset: Option<String>,
}
impl ListSubjectsRequest {
	/// Collects the listing parameters from decoded query pairs.
	///
	/// The first occurrence of each key wins. Unknown keys are ignored, so a repeated or
	/// stray parameter never discards the others.
	pub fn from_pairs<I, K, V>(pairs: I) -> Self
	where
		I: IntoIterator<Item = (K, V)>,
		K: AsRef<str>,
		V: Into<String>,
	{
		let mut req = Self::default();

		for (key, value) in pairs {
			let slot = match key.as_ref() {
				"searchQuery" => &mut req.search_query,
				"faculty" => &mut req.faculty,
				"offset" => &mut req.offset,
				_ => continue,
			};

			if slot.is_none() {
				*slot = Some(value.into());
			}
		}

		req
	}
}

#[derive(Debug, Clone, PartialEq, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SubjectView {
	pub id: i64,
	pub name: String,
	pub faculty_name: String,
	pub percentage: EarnRate,
}

#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct FacultyItem {
	pub id: i64,
	pub name: String,
}
impl From<Faculty> for FacultyItem {
	fn from(faculty: Faculty) -> Self {
		Self { id: faculty.id, name: faculty.name }
	}
}

#[derive(Debug, Clone, serde::Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSubjectsResponse {
	pub items: Vec<SubjectView>,
	pub total_count: u64,
	pub faculties: Vec<FacultyItem>,
	#[serde(flatten)]
	pub page: PageMeta,
	pub filter: FilterSpec,
}

#[derive(Debug, Clone, serde::Serialize)]
pub struct FacultiesResponse {
	pub faculties: Vec<FacultyItem>,
}

impl CatalogueService {
	pub async fn list_subjects(&self, req: ListSubjectsRequest) -> Result<ListSubjectsResponse> {
		let filter = FilterSpec::build(
			req.search_query.as_deref(),
			req.faculty.as_deref(),
			req.offset.as_deref(),
		);
		let predicate = filter.predicate(self.cfg.catalogue.text_match);
		let offset = i64::try_from(filter.offset).unwrap_or(i64::MAX);
		let (subjects, total_count, faculties) = tokio::try_join!(
			self.store.find_subjects(&predicate, offset, PAGE_SIZE as i64),
			self.store.count_subjects(&predicate),
			self.store.list_faculties(),
		)?;
		let total_count = u64::try_from(total_count).map_err(|_| {
			tracing::error!(total_count, "Store reported a negative subject count.");

			Error::Storage {
				message: format!("Store reported a negative subject count {total_count}."),
			}
		})?;
		let items = assemble_views(&subjects, &faculties)?;

		tracing::debug!(
			search_query = ?filter.search_query,
			faculty_id = ?filter.faculty_id,
			offset = filter.offset,
			total_count,
			returned = items.len(),
			"Listed subjects."
		);

		Ok(ListSubjectsResponse {
			items,
			total_count,
			faculties: faculties.into_iter().map(FacultyItem::from).collect(),
			page: PageMeta::new(total_count, filter.offset),
			filter,
		})
	}

	pub async fn list_faculties(&self) -> Result<FacultiesResponse> {
		let faculties = self.store.list_faculties().await?;

		Ok(FacultiesResponse { faculties: faculties.into_iter().map(FacultyItem::from).collect() })
	}
}

fn assemble_views(subjects: &[Subject], faculties: &[Faculty]) -> Result<Vec<SubjectView>> {
	let names: HashMap<i64, &str> =
		faculties.iter().map(|faculty| (faculty.id, faculty.name.as_str())).collect();

	subjects
		.iter()
		.map(|subject| {
			let Some(faculty_name) = names.get(&subject.faculty_id) else {
				tracing::error!(
					subject_id = subject.id,
					faculty_id = subject.faculty_id,
					"Subject references a missing faculty."
				);

				return Err(Error::DataIntegrity {
					message: format!(
						"Subject {} references missing faculty {}.",
						subject.id, subject.faculty_id
					),
				});
			};

			if let Some(anomaly) = Anomaly::detect(subject.earn_sum, subject.register_sum) {
				tracing::warn!(
					subject_id = subject.id,
					earn_sum = subject.earn_sum,
					register_sum = subject.register_sum,
					anomaly = anomaly.as_str(),
					"Clamping out-of-range credit counts."
				);
			}

			Ok(SubjectView {
				id: subject.id,
				name: subject.name.clone(),
				faculty_name: faculty_name.to_string(),
				percentage: EarnRate::from_counts(subject.earn_sum, subject.register_sum),
			})
		})
		.collect()
}
