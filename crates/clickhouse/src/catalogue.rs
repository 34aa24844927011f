//! Predefined analytical queries over the NEO tables.
//!
//! Every statement references tables as `?.table`; the reader binds the
//! database identifier to each placeholder before execution.

use std::{fmt, str::FromStr};

use crate::{
    models::{
        ApproachCountRow, AuDistanceRow, AvgVelocityRow, DiameterRow, HazardCountRow,
        LunarDistanceRow, MagnitudeRow, MaxVelocityRow, MonthlyApproachRow, VelocityRow,
    },
    table::TableRow,
};

/// One entry of the query catalogue.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum CatalogueQuery {
    /// Q1: approaches per asteroid
    ApproachCount,
    /// Q2: average velocity per asteroid
    AverageVelocity,
    /// Q3: top 10 fastest asteroids
    TopFastest,
    /// Q4: hazardous asteroids with more than 3 approaches
    FrequentHazardous,
    /// Q5: month with the most approaches
    BusiestMonth,
    /// Q6: fastest single approach
    FastestApproach,
    /// Q7: asteroids by maximum diameter
    LargestDiameter,
    /// Q8: approaches over time per asteroid
    ApproachTrend,
    /// Q9: approaches by miss distance
    ClosestApproaches,
    /// Q10: approaches faster than 50,000 km/h
    HighVelocity,
    /// Q11: approaches per month
    MonthlyApproaches,
    /// Q12: brightest asteroid
    BrightestAsteroid,
    /// Q13: hazardous vs non-hazardous counts
    HazardBreakdown,
    /// Q14: approaches closer than the Moon
    WithinLunarDistance,
    /// Q15: approaches within 0.05 AU
    WithinAu,
}

impl CatalogueQuery {
    /// All entries in catalogue order.
    pub const ALL: [Self; 15] = [
        Self::ApproachCount,
        Self::AverageVelocity,
        Self::TopFastest,
        Self::FrequentHazardous,
        Self::BusiestMonth,
        Self::FastestApproach,
        Self::LargestDiameter,
        Self::ApproachTrend,
        Self::ClosestApproaches,
        Self::HighVelocity,
        Self::MonthlyApproaches,
        Self::BrightestAsteroid,
        Self::HazardBreakdown,
        Self::WithinLunarDistance,
        Self::WithinAu,
    ];

    /// Position in the catalogue, starting at 1.
    pub const fn number(self) -> u8 {
        match self {
            Self::ApproachCount => 1,
            Self::AverageVelocity => 2,
            Self::TopFastest => 3,
            Self::FrequentHazardous => 4,
            Self::BusiestMonth => 5,
            Self::FastestApproach => 6,
            Self::LargestDiameter => 7,
            Self::ApproachTrend => 8,
            Self::ClosestApproaches => 9,
            Self::HighVelocity => 10,
            Self::MonthlyApproaches => 11,
            Self::BrightestAsteroid => 12,
            Self::HazardBreakdown => 13,
            Self::WithinLunarDistance => 14,
            Self::WithinAu => 15,
        }
    }

    /// Stable identifier used by the API and CLI, e.g. `q4`.
    pub fn id(self) -> String {
        format!("q{}", self.number())
    }

    /// Human-readable label.
    pub const fn label(self) -> &'static str {
        match self {
            Self::ApproachCount => "Count how many times each asteroid has approached Earth",
            Self::AverageVelocity => "Average velocity of each asteroid over multiple approaches",
            Self::TopFastest => "List top 10 fastest asteroids",
            Self::FrequentHazardous => {
                "Find potentially hazardous asteroids that have approached Earth more than 3 times"
            }
            Self::BusiestMonth => "Find the month with the most asteroid approaches",
            Self::FastestApproach => "Get the asteroid with the fastest ever approach speed",
            Self::LargestDiameter => "Sort asteroids by maximum estimated diameter (descending)",
            Self::ApproachTrend => "An asteroid whose closest approach is getting nearer over time",
            Self::ClosestApproaches => {
                "Display the name of each asteroid along with the date and miss distance of its \
                 closest approach to Earth"
            }
            Self::HighVelocity => {
                "List names of asteroids that approached Earth with velocity > 50,000 km/h"
            }
            Self::MonthlyApproaches => "Count how many approaches happened per month",
            Self::BrightestAsteroid => {
                "Find asteroid with the highest brightness (lowest magnitude value)"
            }
            Self::HazardBreakdown => "Get number of hazardous vs non-hazardous asteroids",
            Self::WithinLunarDistance => {
                "Find asteroids that passed closer than the Moon (<1 LD), along with their close \
                 approach date and distance"
            }
            Self::WithinAu => "Find asteroids that came within 0.05 AU",
        }
    }

    /// Statement template; `?` placeholders stand for the database name.
    pub const fn sql(self) -> &'static str {
        match self {
            Self::ApproachCount => {
                "SELECT a.name AS name, count() AS approach_count \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 GROUP BY a.name \
                 ORDER BY name ASC"
            }
            Self::AverageVelocity => {
                "SELECT a.name AS name, avg(c.relative_velocity_kmph) AS avg_velocity \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 GROUP BY a.name \
                 ORDER BY name ASC"
            }
            Self::TopFastest => {
                "SELECT a.name AS name, max(c.relative_velocity_kmph) AS max_velocity \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 GROUP BY a.name \
                 ORDER BY max_velocity DESC \
                 LIMIT 10"
            }
            Self::FrequentHazardous => {
                "SELECT a.name AS name, count() AS approach_count \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 WHERE a.is_potentially_hazardous_asteroid = 1 \
                 GROUP BY a.name \
                 HAVING count() > 3 \
                 ORDER BY name ASC"
            }
            Self::BusiestMonth => {
                "SELECT formatDateTime(c.close_approach_date, '%Y-%m') AS month, \
                        count() AS total_approaches \
                 FROM ?.close_approach AS c \
                 GROUP BY month \
                 ORDER BY total_approaches DESC, month ASC \
                 LIMIT 1"
            }
            Self::FastestApproach => {
                "SELECT a.name AS name, c.relative_velocity_kmph AS relative_velocity_kmph \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 ORDER BY c.relative_velocity_kmph DESC \
                 LIMIT 1"
            }
            Self::LargestDiameter => {
                "SELECT a.name AS name, a.estimated_diameter_max_km AS estimated_diameter_max_km \
                 FROM ?.asteroids AS a \
                 ORDER BY a.estimated_diameter_max_km DESC"
            }
            Self::ApproachTrend => {
                "SELECT a.name AS name, c.close_approach_date AS close_approach_date, \
                        c.miss_distance_lunar AS miss_distance_ld \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 ORDER BY a.name ASC, c.close_approach_date ASC, c.miss_distance_lunar ASC"
            }
            Self::ClosestApproaches => {
                "SELECT a.name AS name, c.close_approach_date AS close_approach_date, \
                        c.miss_distance_lunar AS miss_distance_ld \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 ORDER BY c.miss_distance_lunar ASC"
            }
            Self::HighVelocity => {
                "SELECT a.name AS name, c.relative_velocity_kmph AS relative_velocity_kmph \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 WHERE c.relative_velocity_kmph > 50000 \
                 ORDER BY a.name ASC"
            }
            Self::MonthlyApproaches => {
                "SELECT formatDateTime(c.close_approach_date, '%Y-%m') AS month, \
                        count() AS total_approaches \
                 FROM ?.close_approach AS c \
                 GROUP BY month \
                 ORDER BY month ASC"
            }
            Self::BrightestAsteroid => {
                "SELECT a.name AS name, a.absolute_magnitude_h AS absolute_magnitude_h \
                 FROM ?.asteroids AS a \
                 ORDER BY a.absolute_magnitude_h ASC \
                 LIMIT 1"
            }
            Self::HazardBreakdown => {
                "SELECT a.is_potentially_hazardous_asteroid AS is_potentially_hazardous_asteroid, \
                        count() AS count \
                 FROM ?.asteroids AS a \
                 GROUP BY a.is_potentially_hazardous_asteroid \
                 ORDER BY is_potentially_hazardous_asteroid ASC"
            }
            Self::WithinLunarDistance => {
                "SELECT a.name AS name, c.close_approach_date AS close_approach_date, \
                        c.miss_distance_lunar AS miss_distance_ld \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 WHERE c.miss_distance_lunar < 1 \
                 ORDER BY c.miss_distance_lunar ASC"
            }
            Self::WithinAu => {
                "SELECT a.name AS name, c.close_approach_date AS close_approach_date, \
                        c.astronomical AS miss_distance_au \
                 FROM ?.asteroids AS a \
                 INNER JOIN ?.close_approach AS c ON a.id = c.neo_reference_id \
                 WHERE c.astronomical < 0.05 \
                 ORDER BY c.astronomical ASC"
            }
        }
    }

    /// Number of database placeholders in [`Self::sql`].
    pub fn placeholder_count(self) -> usize {
        self.sql().matches('?').count()
    }

    /// Output columns in statement order.
    pub const fn columns(self) -> &'static [&'static str] {
        match self {
            Self::ApproachCount | Self::FrequentHazardous => ApproachCountRow::COLUMNS,
            Self::AverageVelocity => AvgVelocityRow::COLUMNS,
            Self::TopFastest => MaxVelocityRow::COLUMNS,
            Self::BusiestMonth | Self::MonthlyApproaches => MonthlyApproachRow::COLUMNS,
            Self::FastestApproach | Self::HighVelocity => VelocityRow::COLUMNS,
            Self::LargestDiameter => DiameterRow::COLUMNS,
            Self::ApproachTrend | Self::ClosestApproaches | Self::WithinLunarDistance => {
                LunarDistanceRow::COLUMNS
            }
            Self::BrightestAsteroid => MagnitudeRow::COLUMNS,
            Self::HazardBreakdown => HazardCountRow::COLUMNS,
            Self::WithinAu => AuDistanceRow::COLUMNS,
        }
    }
}

impl fmt::Display for CatalogueQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Q{}. {}", self.number(), self.label())
    }
}

/// Error returned when a catalogue id does not name an entry.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown query `{0}`, expected q1 through q15")]
pub struct UnknownQuery(pub String);

impl FromStr for CatalogueQuery {
    type Err = UnknownQuery;

    /// Accepts `q4`, `Q4` or `4`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let digits = trimmed
            .strip_prefix('q')
            .or_else(|| trimmed.strip_prefix('Q'))
            .unwrap_or(trimmed);
        digits
            .parse::<u8>()
            .ok()
            .and_then(|n| Self::ALL.into_iter().find(|q| q.number() == n))
            .ok_or_else(|| UnknownQuery(s.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn numbers_are_sequential() {
        for (idx, query) in CatalogueQuery::ALL.iter().enumerate() {
            assert_eq!(usize::from(query.number()), idx + 1);
        }
    }

    #[test]
    fn labels_and_statements_are_unique() {
        let labels: HashSet<_> = CatalogueQuery::ALL.iter().map(|q| q.label()).collect();
        let statements: HashSet<_> = CatalogueQuery::ALL.iter().map(|q| q.sql()).collect();
        assert_eq!(labels.len(), 15);
        assert_eq!(statements.len(), 15);
    }

    #[test]
    fn parses_ids() {
        assert_eq!("q4".parse::<CatalogueQuery>().unwrap(), CatalogueQuery::FrequentHazardous);
        assert_eq!("Q10".parse::<CatalogueQuery>().unwrap(), CatalogueQuery::HighVelocity);
        assert_eq!(" 15 ".parse::<CatalogueQuery>().unwrap(), CatalogueQuery::WithinAu);
        assert_eq!(
            "q16".parse::<CatalogueQuery>().unwrap_err(),
            UnknownQuery("q16".to_owned())
        );
        assert!("q0".parse::<CatalogueQuery>().is_err());
        assert!("fastest".parse::<CatalogueQuery>().is_err());
    }

    #[test]
    fn id_round_trips_through_parse() {
        for query in CatalogueQuery::ALL {
            assert_eq!(query.id().parse::<CatalogueQuery>().unwrap(), query);
        }
    }

    #[test]
    fn every_statement_references_the_database() {
        for query in CatalogueQuery::ALL {
            let sql = query.sql();
            assert!(query.placeholder_count() >= 1, "{query} has no table reference");
            assert_eq!(
                query.placeholder_count(),
                sql.matches("?.asteroids").count() + sql.matches("?.close_approach").count(),
                "{query} has a placeholder that is not a table reference"
            );
        }
    }

    #[test]
    fn joins_use_the_foreign_key() {
        for query in CatalogueQuery::ALL {
            let sql = query.sql();
            if sql.contains("INNER JOIN") {
                assert!(sql.contains("ON a.id = c.neo_reference_id"), "{query}");
            }
        }
    }

    #[test]
    fn statements_select_their_columns_in_order() {
        for query in CatalogueQuery::ALL {
            let sql = query.sql();
            let select = &sql[..sql.find(" FROM ").unwrap()];
            let mut last = 0;
            for column in query.columns() {
                let needle = format!("AS {column}");
                let pos = select
                    .find(&needle)
                    .unwrap_or_else(|| panic!("{query} does not select {column}"));
                assert!(pos >= last, "{query} selects {column} out of order");
                last = pos;
            }
        }
    }

    #[test]
    fn thresholds_match_labels() {
        assert!(CatalogueQuery::FrequentHazardous.sql().contains("HAVING count() > 3"));
        assert!(CatalogueQuery::HighVelocity.sql().contains("relative_velocity_kmph > 50000"));
        assert!(CatalogueQuery::WithinLunarDistance.sql().contains("miss_distance_lunar < 1"));
        assert!(CatalogueQuery::WithinAu.sql().contains("astronomical < 0.05"));
        assert!(CatalogueQuery::TopFastest.sql().ends_with("LIMIT 10"));
    }

    #[test]
    fn display_includes_number() {
        assert_eq!(
            CatalogueQuery::TopFastest.to_string(),
            "Q3. List top 10 fastest asteroids"
        );
    }
}
