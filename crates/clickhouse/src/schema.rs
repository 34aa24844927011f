//! Expected schema of the NEO tables

/// Table schema definition
#[derive(Debug)]
pub struct TableSchema {
    /// Table name
    pub name: &'static str,
    /// Column names and `ClickHouse` types
    pub columns: &'static [(&'static str, &'static str)],
    /// Columns created with the table but read by no statement
    pub optional: &'static [&'static str],
    /// Sorting key
    pub order_by: &'static str,
}

impl TableSchema {
    /// `CREATE TABLE` statement for this table in the given database.
    pub fn create_statement(&self, db: &str) -> String {
        let columns = self
            .columns
            .iter()
            .map(|(name, ty)| format!("{name} {ty}"))
            .collect::<Vec<_>>()
            .join(", ");
        format!(
            "CREATE TABLE IF NOT EXISTS {db}.{} ({columns}) ENGINE = MergeTree() ORDER BY ({})",
            self.name, self.order_by
        )
    }

    /// Columns the catalogue and filter statements read.
    pub fn required_columns(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.columns.iter().map(|(name, _)| *name).filter(|name| !self.optional.contains(name))
    }
}

/// Schema definitions for tables
pub const TABLE_SCHEMAS: &[TableSchema] = &[
    TableSchema {
        name: "asteroids",
        columns: &[
            ("id", "UInt64"),
            ("name", "String"),
            ("estimated_diameter_min_km", "Float64"),
            ("estimated_diameter_max_km", "Float64"),
            ("absolute_magnitude_h", "Float64"),
            ("is_potentially_hazardous_asteroid", "Bool"),
        ],
        optional: &["estimated_diameter_min_km"],
        order_by: "id",
    },
    TableSchema {
        name: "close_approach",
        columns: &[
            ("neo_reference_id", "UInt64"),
            ("close_approach_date", "Date"),
            ("relative_velocity_kmph", "Float64"),
            ("miss_distance_lunar", "Float64"),
            ("astronomical", "Float64"),
        ],
        optional: &[],
        order_by: "neo_reference_id, close_approach_date",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_table_has_a_schema() {
        let names: Vec<_> = TABLE_SCHEMAS.iter().map(|s| s.name).collect();
        assert_eq!(names, ["asteroids", "close_approach"]);
    }

    #[test]
    fn optional_columns_are_created_but_not_required() {
        let asteroids = &TABLE_SCHEMAS[0];
        assert!(asteroids.create_statement("neo").contains("estimated_diameter_min_km Float64"));
        let required: Vec<_> = asteroids.required_columns().collect();
        assert_eq!(
            required,
            [
                "id",
                "name",
                "estimated_diameter_max_km",
                "absolute_magnitude_h",
                "is_potentially_hazardous_asteroid"
            ]
        );
    }

    #[test]
    fn create_statement_lists_columns() {
        let sql = TABLE_SCHEMAS[1].create_statement("neo");
        assert_eq!(
            sql,
            "CREATE TABLE IF NOT EXISTS neo.close_approach (neo_reference_id UInt64, \
             close_approach_date Date, relative_velocity_kmph Float64, \
             miss_distance_lunar Float64, astronomical Float64) ENGINE = MergeTree() \
             ORDER BY (neo_reference_id, close_approach_date)"
        );
    }
}
