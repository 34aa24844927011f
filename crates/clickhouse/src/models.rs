use clickhouse::Row;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    table::{Cell, TableRow},
    types::ApproachDate,
};

/// Number of approaches per asteroid
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Eq, Clone, ToSchema)]
pub struct ApproachCountRow {
    /// Asteroid name
    pub name: String,
    /// Number of recorded close approaches
    pub approach_count: u64,
}

/// Average approach velocity per asteroid
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct AvgVelocityRow {
    /// Asteroid name
    pub name: String,
    /// Mean relative velocity in km/h
    pub avg_velocity: f64,
}

/// Fastest approach velocity per asteroid
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct MaxVelocityRow {
    /// Asteroid name
    pub name: String,
    /// Highest relative velocity in km/h
    pub max_velocity: f64,
}

/// Number of approaches in a calendar month
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Eq, Clone, ToSchema)]
pub struct MonthlyApproachRow {
    /// Month formatted as `YYYY-MM`
    pub month: String,
    /// Number of approaches in the month
    pub total_approaches: u64,
}

/// A single approach velocity
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct VelocityRow {
    /// Asteroid name
    pub name: String,
    /// Relative velocity in km/h
    pub relative_velocity_kmph: f64,
}

/// Maximum estimated diameter of an asteroid
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct DiameterRow {
    /// Asteroid name
    pub name: String,
    /// Maximum estimated diameter in km
    pub estimated_diameter_max_km: f64,
}

/// Approach date with the miss distance in lunar distances
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct LunarDistanceRow {
    /// Asteroid name
    pub name: String,
    /// Date of the close approach
    pub close_approach_date: ApproachDate,
    /// Miss distance in lunar distances
    pub miss_distance_ld: f64,
}

/// Approach date with the miss distance in astronomical units
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct AuDistanceRow {
    /// Asteroid name
    pub name: String,
    /// Date of the close approach
    pub close_approach_date: ApproachDate,
    /// Miss distance in astronomical units
    pub miss_distance_au: f64,
}

/// Absolute magnitude of an asteroid
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct MagnitudeRow {
    /// Asteroid name
    pub name: String,
    /// Absolute magnitude (H); lower is brighter
    pub absolute_magnitude_h: f64,
}

/// Number of asteroids per hazard classification
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Eq, Clone, ToSchema)]
pub struct HazardCountRow {
    /// Hazard flag
    pub is_potentially_hazardous_asteroid: bool,
    /// Number of asteroids carrying the flag
    pub count: u64,
}

/// Row returned by the approach filter
#[derive(Debug, Row, Serialize, Deserialize, PartialEq, Clone, ToSchema)]
pub struct FilteredApproachRow {
    /// Asteroid name
    pub name: String,
    /// Date of the close approach
    pub close_approach_date: ApproachDate,
    /// Miss distance in astronomical units
    pub astronomical: f64,
    /// Miss distance in lunar distances
    pub miss_distance_lunar: f64,
    /// Relative velocity in km/h
    pub relative_velocity_kmph: f64,
    /// Maximum estimated diameter in km
    pub estimated_diameter_max_km: f64,
    /// Hazard flag
    pub is_potentially_hazardous_asteroid: bool,
}

impl TableRow for ApproachCountRow {
    const COLUMNS: &'static [&'static str] = &["name", "approach_count"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.name.as_str()), Cell::Int(self.approach_count)]
    }
}

impl TableRow for AvgVelocityRow {
    const COLUMNS: &'static [&'static str] = &["name", "avg_velocity"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.name.as_str()), Cell::Float(self.avg_velocity)]
    }
}

impl TableRow for MaxVelocityRow {
    const COLUMNS: &'static [&'static str] = &["name", "max_velocity"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.name.as_str()), Cell::Float(self.max_velocity)]
    }
}

impl TableRow for MonthlyApproachRow {
    const COLUMNS: &'static [&'static str] = &["month", "total_approaches"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.month.as_str()), Cell::Int(self.total_approaches)]
    }
}

impl TableRow for VelocityRow {
    const COLUMNS: &'static [&'static str] = &["name", "relative_velocity_kmph"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.name.as_str()), Cell::Float(self.relative_velocity_kmph)]
    }
}

impl TableRow for DiameterRow {
    const COLUMNS: &'static [&'static str] = &["name", "estimated_diameter_max_km"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.name.as_str()), Cell::Float(self.estimated_diameter_max_km)]
    }
}

impl TableRow for LunarDistanceRow {
    const COLUMNS: &'static [&'static str] = &["name", "close_approach_date", "miss_distance_ld"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.name.as_str()),
            Cell::from(self.close_approach_date),
            Cell::Float(self.miss_distance_ld),
        ]
    }
}

impl TableRow for AuDistanceRow {
    const COLUMNS: &'static [&'static str] = &["name", "close_approach_date", "miss_distance_au"];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.name.as_str()),
            Cell::from(self.close_approach_date),
            Cell::Float(self.miss_distance_au),
        ]
    }
}

impl TableRow for MagnitudeRow {
    const COLUMNS: &'static [&'static str] = &["name", "absolute_magnitude_h"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::from(self.name.as_str()), Cell::Float(self.absolute_magnitude_h)]
    }
}

impl TableRow for HazardCountRow {
    const COLUMNS: &'static [&'static str] = &["is_potentially_hazardous_asteroid", "count"];

    fn cells(&self) -> Vec<Cell> {
        vec![Cell::Bool(self.is_potentially_hazardous_asteroid), Cell::Int(self.count)]
    }
}

impl TableRow for FilteredApproachRow {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "close_approach_date",
        "astronomical",
        "miss_distance_lunar",
        "relative_velocity_kmph",
        "estimated_diameter_max_km",
        "is_potentially_hazardous_asteroid",
    ];

    fn cells(&self) -> Vec<Cell> {
        vec![
            Cell::from(self.name.as_str()),
            Cell::from(self.close_approach_date),
            Cell::Float(self.astronomical),
            Cell::Float(self.miss_distance_lunar),
            Cell::Float(self.relative_velocity_kmph),
            Cell::Float(self.estimated_diameter_max_km),
            Cell::Bool(self.is_potentially_hazardous_asteroid),
        ]
    }
}
