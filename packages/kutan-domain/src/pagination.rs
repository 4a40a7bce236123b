use serde::Serialize;

use crate::filter::PAGE_SIZE;

/// Pagination metadata derived from a total count and an offset.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PageMeta {
	pub page_size: u64,
	/// `ceil(total / page_size)`; zero when nothing matches.
	pub page_count: u64,
	/// One-based page containing `offset`.
	pub current_page: u64,
}
impl PageMeta {
	pub fn new(total_count: u64, offset: u64) -> Self {
		Self {
			page_size: PAGE_SIZE,
			page_count: total_count.div_ceil(PAGE_SIZE),
			current_page: offset / PAGE_SIZE + 1,
		}
	}
}
