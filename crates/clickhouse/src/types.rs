use std::fmt;

use chrono::{Days, NaiveDate};
use derive_more::Deref;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Wrapper around a `ClickHouse` `Date` value (days since 1970-01-01).
#[derive(
    Clone,
    Copy,
    Debug,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Default,
    Deref,
    ToSchema,
)]
#[schema(
    value_type = String,
    format = Date,
    description = "Calendar date as YYYY-MM-DD",
    example = "2024-03-15"
)]
pub struct ApproachDate(pub u16);

impl ApproachDate {
    const EPOCH: NaiveDate = match NaiveDate::from_ymd_opt(1970, 1, 1) {
        Some(date) => date,
        None => panic!("invalid epoch"),
    };

    /// Convert to a calendar date.
    pub fn to_naive_date(self) -> NaiveDate {
        Self::EPOCH + Days::new(u64::from(self.0))
    }

    /// Build from a calendar date, returning `None` outside the `Date` range
    /// (1970-01-01 through 2149-06-06).
    pub fn from_naive_date(date: NaiveDate) -> Option<Self> {
        let days = date.signed_duration_since(Self::EPOCH).num_days();
        u16::try_from(days).ok().map(Self)
    }
}

impl From<u16> for ApproachDate {
    fn from(value: u16) -> Self {
        Self(value)
    }
}

impl From<ApproachDate> for NaiveDate {
    fn from(value: ApproachDate) -> Self {
        value.to_naive_date()
    }
}

impl fmt::Display for ApproachDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_naive_date().format("%Y-%m-%d"))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn epoch_is_day_zero() {
        assert_eq!(ApproachDate(0).to_naive_date(), NaiveDate::from_ymd_opt(1970, 1, 1).unwrap());
    }

    #[test]
    fn converts_both_ways() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
        let wire = ApproachDate::from_naive_date(date).unwrap();
        assert_eq!(wire.0, 19797);
        assert_eq!(wire.to_naive_date(), date);
        assert_eq!(wire.to_string(), "2024-03-15");
    }

    #[test]
    fn rejects_dates_before_epoch() {
        let date = NaiveDate::from_ymd_opt(1969, 12, 31).unwrap();
        assert_eq!(ApproachDate::from_naive_date(date), None);
    }
}
