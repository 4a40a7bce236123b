pub mod filter;
pub mod pagination;
pub mod rate;
pub mod text;

pub use filter::{FilterSpec, PAGE_SIZE, SubjectPredicate};
pub use pagination::PageMeta;
pub use rate::{Anomaly, EarnRate, Percentage};
pub use text::TextFilter;
