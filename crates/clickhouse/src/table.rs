//! Generic tabular result shared by the catalogue and the approach filter.

use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use utoipa::ToSchema;

use crate::types::ApproachDate;

/// A single value in a result table.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Cell {
    /// Text value
    Text(String),
    /// Unsigned integer value, e.g. a count
    Int(u64),
    /// Floating point value
    Float(f64),
    /// Boolean flag
    Bool(bool),
    /// Calendar date, serialized as `YYYY-MM-DD`
    Date(NaiveDate),
}

impl From<&str> for Cell {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<ApproachDate> for Cell {
    fn from(value: ApproachDate) -> Self {
        Self::Date(value.to_naive_date())
    }
}

impl fmt::Display for Cell {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Text(v) => f.write_str(v),
            Self::Int(v) => write!(f, "{v}"),
            Self::Float(v) => write!(f, "{v}"),
            Self::Bool(v) => write!(f, "{v}"),
            Self::Date(v) => write!(f, "{}", v.format("%Y-%m-%d")),
        }
    }
}

/// A typed result row that can be flattened into table cells.
///
/// `cells` must yield one value per entry in `COLUMNS`, in the same order.
pub trait TableRow {
    /// Column names in statement order.
    const COLUMNS: &'static [&'static str];

    /// Row values in column order.
    fn cells(&self) -> Vec<Cell>;
}

/// Result set rendered by every surface.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct Table {
    /// Column names in statement order
    pub columns: Vec<String>,
    /// Rows, each holding one value per column
    #[schema(value_type = Vec<Vec<Object>>)]
    pub rows: Vec<Vec<Cell>>,
}

impl Table {
    /// Build a table from typed rows.
    pub fn from_rows<R: TableRow>(rows: &[R]) -> Self {
        Self {
            columns: R::COLUMNS.iter().map(|c| (*c).to_owned()).collect(),
            rows: rows.iter().map(TableRow::cells).collect(),
        }
    }

    /// Number of rows.
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    /// Whether the table has no rows.
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[cfg(test)]
    pub(crate) fn column(&self, name: &str) -> Option<Vec<&Cell>> {
        let idx = self.columns.iter().position(|c| c == name)?;
        Some(self.rows.iter().filter_map(|row| row.get(idx)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    struct Pair {
        name: &'static str,
        hits: u64,
    }

    impl TableRow for Pair {
        const COLUMNS: &'static [&'static str] = &["name", "hits"];

        fn cells(&self) -> Vec<Cell> {
            vec![Cell::from(self.name), Cell::Int(self.hits)]
        }
    }

    #[test]
    fn keeps_column_order() {
        let table = Table::from_rows(&[Pair { name: "Apophis", hits: 3 }]);
        assert_eq!(table.columns, vec!["name", "hits"]);
        assert_eq!(table.rows, vec![vec![Cell::Text("Apophis".into()), Cell::Int(3)]]);
        assert_eq!(table.column("hits"), Some(vec![&Cell::Int(3)]));
        assert_eq!(table.column("missing"), None);
    }

    #[test]
    fn empty_rows_still_carry_columns() {
        let table = Table::from_rows::<Pair>(&[]);
        assert!(table.is_empty());
        assert_eq!(table.columns.len(), 2);
    }

    #[test]
    fn serializes_cells_untagged() {
        let table = Table {
            columns: vec!["date".into(), "hazard".into(), "ld".into()],
            rows: vec![vec![
                Cell::from(ApproachDate(19797)),
                Cell::Bool(true),
                Cell::Float(0.5),
            ]],
        };
        let value = serde_json::to_value(&table).unwrap();
        assert_eq!(
            value,
            json!({
                "columns": ["date", "hazard", "ld"],
                "rows": [["2024-03-15", true, 0.5]]
            })
        );
    }

    #[test]
    fn displays_cells() {
        assert_eq!(Cell::Float(12.25).to_string(), "12.25");
        let date = NaiveDate::from_ymd_opt(2001, 2, 3).unwrap();
        assert_eq!(Cell::Date(date).to_string(), "2001-02-03");
    }
}
