//! Neoscope `ClickHouse` access
//!
//! Read-only access to the `asteroids` and `close_approach` tables: the fixed
//! query catalogue, the parameterized approach filter and the tabular result
//! model shared by the API and the terminal client.

pub mod catalogue;
pub mod filter;
pub mod models;
pub mod reader;
pub mod schema;
pub mod table;
pub mod types;

pub use catalogue::{CatalogueQuery, UnknownQuery};
pub use filter::{ApproachFilter, FilterError, HazardFilter, Range};
pub use models::*;
pub use reader::ClickhouseReader;
pub use schema::{TABLE_SCHEMAS, TableSchema};
pub use table::{Cell, Table, TableRow};
pub use types::ApproachDate;
