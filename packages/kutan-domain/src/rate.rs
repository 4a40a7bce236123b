use std::fmt;

use serde::{Serialize, Serializer};

/// Percentage with one decimal place, held as tenths of a percent.
#[derive(Clone, Copy, Debug, Eq, Ord, PartialEq, PartialOrd)]
pub struct Percentage(u16);
impl Percentage {
	pub const MAX: Self = Self(1_000);
	pub const ZERO: Self = Self(0);

	pub fn from_tenths(tenths: u16) -> Self {
		Self(tenths.min(Self::MAX.0))
	}

	pub fn tenths(self) -> u16 {
		self.0
	}

	pub fn as_f64(self) -> f64 {
		f64::from(self.0) / 10.0
	}
}
impl fmt::Display for Percentage {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}%", self.0 / 10, self.0 % 10)
	}
}

/// Credit-earn rate of a subject.
///
/// Serializes as a JSON number for `Measured` and `null` for `NoData`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EarnRate {
	Measured(Percentage),
	/// Nobody registered, so there is no rate to show.
	NoData,
}
impl EarnRate {
	/// `floor(1000 * earn / register) / 10`, truncated rather than rounded.
	///
	/// Out-of-range counts are clamped: a non-positive register count yields `NoData`,
	/// a negative earn count reads as zero, and earn above register reads as 100%.
	pub fn from_counts(earn_sum: i64, register_sum: i64) -> Self {
		if register_sum <= 0 {
			return Self::NoData;
		}

		let earn = i128::from(earn_sum.clamp(0, register_sum));
		let tenths = earn * 1_000 / i128::from(register_sum);

		Self::Measured(Percentage::from_tenths(tenths as u16))
	}

	pub fn percentage(self) -> Option<Percentage> {
		match self {
			Self::Measured(percentage) => Some(percentage),
			Self::NoData => None,
		}
	}
}
impl Serialize for EarnRate {
	fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
	where
		S: Serializer,
	{
		match self {
			Self::Measured(percentage) => serializer.serialize_f64(percentage.as_f64()),
			Self::NoData => serializer.serialize_none(),
		}
	}
}

/// Counter values that violate `0 <= earn_sum <= register_sum`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum Anomaly {
	NegativeRegister,
	NegativeEarn,
	EarnExceedsRegister,
}
impl Anomaly {
	pub fn detect(earn_sum: i64, register_sum: i64) -> Option<Self> {
		if register_sum < 0 {
			Some(Self::NegativeRegister)
		} else if earn_sum < 0 {
			Some(Self::NegativeEarn)
		} else if earn_sum > register_sum {
			Some(Self::EarnExceedsRegister)
		} else {
			None
		}
	}

	pub fn as_str(self) -> &'static str {
		match self {
			Self::NegativeRegister => "negative_register",
			Self::NegativeEarn => "negative_earn",
			Self::EarnExceedsRegister => "earn_exceeds_register",
		}
	}
}
