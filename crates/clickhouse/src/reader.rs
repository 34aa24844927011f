//! `ClickHouse` reader for the dashboard surfaces
//! Handles read-only catalogue and filter queries

use clickhouse::{Client, Row, query::Query, sql::Identifier};
use derive_more::Debug;
use eyre::{Context, Result};
use serde::Deserialize;
use std::time::Instant;
use tracing::{debug, error, info};
use url::Url;

use crate::{
    catalogue::CatalogueQuery,
    filter::ApproachFilter,
    models::{
        ApproachCountRow, AuDistanceRow, AvgVelocityRow, DiameterRow, FilteredApproachRow,
        HazardCountRow, LunarDistanceRow, MagnitudeRow, MaxVelocityRow, MonthlyApproachRow,
        VelocityRow,
    },
    schema::TABLE_SCHEMAS,
    table::{Table, TableRow},
};

const SCHEMA_SQL: &str = "SELECT table, name FROM system.columns WHERE database = ?";

#[derive(Row, Deserialize)]
struct Ping {
    ok: u8,
}

#[derive(Row, Deserialize)]
struct ColumnRow {
    table: String,
    name: String,
}

/// `ClickHouse` reader client (read-only operations)
#[derive(Clone, Debug)]
pub struct ClickhouseReader {
    /// Base client
    #[debug(skip)]
    base: Client,
    /// Database name
    db_name: String,
}

impl ClickhouseReader {
    /// Create a new `ClickHouse` reader client
    pub fn new(url: Url, db_name: String, username: String, password: String) -> Result<Self> {
        let client = Client::default().with_url(url).with_user(username).with_password(password);

        Ok(Self { base: client, db_name })
    }

    /// Database holding the NEO tables
    pub fn db_name(&self) -> &str {
        &self.db_name
    }

    /// Start a query whose first `tables` placeholders are database identifiers.
    fn table_query(&self, sql: &str, tables: usize) -> Query {
        (0..tables).fold(self.base.query(sql), |query, _| query.bind(Identifier(&self.db_name)))
    }

    async fn execute<R>(&self, sql: &str, query: Query) -> Result<Vec<R>>
    where
        R: Row + for<'b> Deserialize<'b>,
    {
        let start = Instant::now();

        let result = query.fetch_all::<R>().await;

        let duration_ms = start.elapsed().as_millis();
        match &result {
            Ok(rows) => {
                debug!(query = sql, duration_ms, rows = rows.len(), "ClickHouse query executed")
            }
            Err(e) => error!(query = sql, duration_ms, error = %e, "ClickHouse query failed"),
        }
        result.map_err(Into::into)
    }

    /// Check that the server answers queries
    pub async fn ping(&self) -> Result<()> {
        let sql = "SELECT toUInt8(1) AS ok";
        let rows = self
            .execute::<Ping>(sql, self.base.query(sql))
            .await
            .wrap_err("ClickHouse is not reachable")?;
        match rows.first() {
            Some(Ping { ok: 1 }) => Ok(()),
            _ => Err(eyre::eyre!("unexpected ping response from ClickHouse")),
        }
    }

    fn schema_query(&self) -> Query {
        self.base.query(SCHEMA_SQL).bind(self.db_name.as_str())
    }

    /// Return the `table.column` names expected by the queries but absent
    /// from the database
    pub async fn verify_schema(&self) -> Result<Vec<String>> {
        let rows = self
            .execute::<ColumnRow>(SCHEMA_SQL, self.schema_query())
            .await
            .context("fetching table columns failed")?;

        let missing: Vec<String> = TABLE_SCHEMAS
            .iter()
            .flat_map(|schema| schema.required_columns().map(move |column| (schema.name, column)))
            .filter(|(table, column)| !rows.iter().any(|r| r.table == *table && r.name == *column))
            .map(|(table, column)| format!("{table}.{column}"))
            .collect();

        if missing.is_empty() {
            info!(db = %self.db_name, "NEO schema verified");
        }
        Ok(missing)
    }

    fn catalogue_query(&self, query: CatalogueQuery) -> Query {
        self.table_query(query.sql(), query.placeholder_count())
    }

    async fn catalogue_table<R>(&self, query: CatalogueQuery) -> Result<Table>
    where
        R: Row + TableRow + for<'b> Deserialize<'b>,
    {
        let rows = self
            .execute::<R>(query.sql(), self.catalogue_query(query))
            .await
            .wrap_err_with(|| format!("running catalogue query {} failed", query.id()))?;
        Ok(Table::from_rows(&rows))
    }

    /// Run one catalogue entry and return its result set
    pub async fn run_catalogue_query(&self, query: CatalogueQuery) -> Result<Table> {
        use CatalogueQuery::*;

        match query {
            ApproachCount | FrequentHazardous => {
                self.catalogue_table::<ApproachCountRow>(query).await
            }
            AverageVelocity => self.catalogue_table::<AvgVelocityRow>(query).await,
            TopFastest => self.catalogue_table::<MaxVelocityRow>(query).await,
            BusiestMonth | MonthlyApproaches => {
                self.catalogue_table::<MonthlyApproachRow>(query).await
            }
            FastestApproach | HighVelocity => self.catalogue_table::<VelocityRow>(query).await,
            LargestDiameter => self.catalogue_table::<DiameterRow>(query).await,
            ApproachTrend | ClosestApproaches | WithinLunarDistance => {
                self.catalogue_table::<LunarDistanceRow>(query).await
            }
            BrightestAsteroid => self.catalogue_table::<MagnitudeRow>(query).await,
            HazardBreakdown => self.catalogue_table::<HazardCountRow>(query).await,
            WithinAu => self.catalogue_table::<AuDistanceRow>(query).await,
        }
    }

    /// Bind the filter values in placeholder order.
    fn filter_query(&self, sql: &str, filter: &ApproachFilter) -> Query {
        let mut query = self
            .table_query(sql, 2)
            .bind(filter.start_date.format("%Y-%m-%d").to_string())
            .bind(filter.end_date.format("%Y-%m-%d").to_string());
        for (_, range) in filter.ranges() {
            query = query.bind(range.min).bind(range.max);
        }
        if let Some(flag) = filter.hazardous.flag() {
            query = query.bind(u8::from(flag));
        }
        query
    }

    /// Get close approaches matching the filter, joined with their asteroid.
    ///
    /// All bounds are inclusive. Every value is bound as a query argument.
    pub async fn get_filtered_approaches(
        &self,
        filter: &ApproachFilter,
    ) -> Result<Vec<FilteredApproachRow>> {
        filter.validate()?;

        let sql = filter.sql();
        self.execute::<FilteredApproachRow>(&sql, self.filter_query(&sql, filter))
            .await
            .context("fetching filtered approaches failed")
    }

    /// Filtered approaches as a table
    pub async fn get_filtered_table(&self, filter: &ApproachFilter) -> Result<Table> {
        let rows = self.get_filtered_approaches(filter).await?;
        Ok(Table::from_rows(&rows))
    }
}
