//! Interactive approach filter over the `asteroids` x `close_approach` join.

use std::{fmt, str::FromStr};

use chrono::{NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Statement executed by [`crate::ClickhouseReader::get_filtered_approaches`].
///
/// Placeholders, in order: database (twice), start date, end date, AU min/max,
/// LD min/max, velocity min/max, diameter min/max. [`HAZARD_PREDICATE`] is
/// appended, with one extra placeholder, when the hazard selector is not `All`.
pub const FILTER_SQL: &str = "SELECT a.name AS name, \
            c.close_approach_date AS close_approach_date, \
            c.astronomical AS astronomical, \
            c.miss_distance_lunar AS miss_distance_lunar, \
            c.relative_velocity_kmph AS relative_velocity_kmph, \
            a.estimated_diameter_max_km AS estimated_diameter_max_km, \
            a.is_potentially_hazardous_asteroid AS is_potentially_hazardous_asteroid \
     FROM ?.asteroids AS a \
     INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
     WHERE c.close_approach_date BETWEEN toDate(?) AND toDate(?) \
       AND c.astronomical BETWEEN ? AND ? \
       AND c.miss_distance_lunar BETWEEN ? AND ? \
       AND c.relative_velocity_kmph BETWEEN ? AND ? \
       AND a.estimated_diameter_max_km BETWEEN ? AND ?";

/// Optional hazard predicate appended to [`FILTER_SQL`].
pub const HAZARD_PREDICATE: &str = " AND a.is_potentially_hazardous_asteroid = ?";

/// Ordering applied to every filter result.
pub const FILTER_ORDER: &str = " ORDER BY c.close_approach_date ASC, a.name ASC";

/// Date of the earliest approach offered by default.
pub const DEFAULT_START_DATE: NaiveDate = match NaiveDate::from_ymd_opt(2000, 1, 1) {
    Some(date) => date,
    None => panic!("invalid default start date"),
};

/// Inclusive numeric range.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Range {
    /// Lower bound (inclusive)
    pub min: f64,
    /// Upper bound (inclusive)
    pub max: f64,
}

impl Range {
    /// Create a new range.
    pub const fn new(min: f64, max: f64) -> Self {
        Self { min, max }
    }
}

/// Tri-state hazard selector.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "lowercase")]
pub enum HazardFilter {
    /// Both hazardous and non-hazardous asteroids
    #[default]
    All,
    /// Only potentially hazardous asteroids
    Yes,
    /// Only asteroids not flagged as hazardous
    No,
}

impl HazardFilter {
    /// Flag value the hazard predicate must match, `None` for [`HazardFilter::All`].
    pub const fn flag(self) -> Option<bool> {
        match self {
            Self::All => None,
            Self::Yes => Some(true),
            Self::No => Some(false),
        }
    }
}

impl fmt::Display for HazardFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::All => "all",
            Self::Yes => "yes",
            Self::No => "no",
        })
    }
}

impl FromStr for HazardFilter {
    type Err = FilterError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" | "any" => Ok(Self::All),
            "yes" | "true" => Ok(Self::Yes),
            "no" | "false" => Ok(Self::No),
            _ => Err(FilterError::InvalidHazard(s.to_owned())),
        }
    }
}

/// Reasons a filter is rejected before reaching the database.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum FilterError {
    /// Start date after end date
    #[error("start date {start} is after end date {end}")]
    InvertedDates {
        /// Requested start date
        start: NaiveDate,
        /// Requested end date
        end: NaiveDate,
    },
    /// Lower bound above upper bound
    #[error("{field}: minimum {min} is greater than maximum {max}")]
    InvertedRange {
        /// Name of the range
        field: &'static str,
        /// Lower bound
        min: f64,
        /// Upper bound
        max: f64,
    },
    /// Negative, NaN or infinite bound
    #[error("{field}: bounds must be finite and non-negative")]
    InvalidBound {
        /// Name of the range
        field: &'static str,
    },
    /// Unrecognised hazard selector
    #[error("hazard selector `{0}` must be one of all, yes, no")]
    InvalidHazard(String),
}

/// Range, date and hazard filter applied to close approaches.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ApproachFilter {
    /// First approach date (inclusive)
    pub start_date: NaiveDate,
    /// Last approach date (inclusive)
    pub end_date: NaiveDate,
    /// Miss distance in astronomical units
    pub astronomical: Range,
    /// Miss distance in lunar distances
    pub lunar: Range,
    /// Relative velocity in km/h
    pub velocity: Range,
    /// Maximum estimated diameter in km
    pub diameter: Range,
    /// Hazard selector
    pub hazardous: HazardFilter,
}

impl ApproachFilter {
    /// Default astronomical unit range.
    pub const DEFAULT_ASTRONOMICAL: Range = Range::new(0.0, 1.0);
    /// Default lunar distance range.
    pub const DEFAULT_LUNAR: Range = Range::new(0.0, 10.0);
    /// Default velocity range in km/h.
    pub const DEFAULT_VELOCITY: Range = Range::new(0.0, 100_000.0);
    /// Default diameter range in km.
    pub const DEFAULT_DIAMETER: Range = Range::new(0.0, 50.0);

    /// Check dates and ranges for consistency.
    pub fn validate(&self) -> Result<(), FilterError> {
        if self.start_date > self.end_date {
            return Err(FilterError::InvertedDates { start: self.start_date, end: self.end_date });
        }
        for (field, range) in self.ranges() {
            if !range.min.is_finite() || !range.max.is_finite() || range.min < 0.0 {
                return Err(FilterError::InvalidBound { field });
            }
            if range.min > range.max {
                return Err(FilterError::InvertedRange { field, min: range.min, max: range.max });
            }
        }
        Ok(())
    }

    /// Named ranges in binding order.
    pub const fn ranges(&self) -> [(&'static str, Range); 4] {
        [
            ("astronomical", self.astronomical),
            ("lunar", self.lunar),
            ("velocity", self.velocity),
            ("diameter", self.diameter),
        ]
    }

    /// Full statement for this filter, with placeholders.
    pub fn sql(&self) -> String {
        let mut sql = String::from(FILTER_SQL);
        if self.hazardous.flag().is_some() {
            sql.push_str(HAZARD_PREDICATE);
        }
        sql.push_str(FILTER_ORDER);
        sql
    }
}

impl Default for ApproachFilter {
    fn default() -> Self {
        Self {
            start_date: DEFAULT_START_DATE,
            end_date: Utc::now().date_naive(),
            astronomical: Self::DEFAULT_ASTRONOMICAL,
            lunar: Self::DEFAULT_LUNAR,
            velocity: Self::DEFAULT_VELOCITY,
            diameter: Self::DEFAULT_DIAMETER,
            hazardous: HazardFilter::All,
        }
    }
}
