//! Thin HTTP API over the NEO `ClickHouse` tables

pub mod routes;
pub mod state;
pub mod validation;

use api_types::*;
use utoipa::OpenApi;

pub use routes::router;
pub use state::ApiState;

/// `OpenAPI` documentation structure
#[derive(Debug, OpenApi)]
#[openapi(
    paths(
        routes::catalogue::list_queries,
        routes::catalogue::run_query,
        routes::approaches::approaches
    ),
    components(
        schemas(
            validation::ApproachQuery,
            QueryItem,
            QueryListResponse,
            QueryResultResponse,
            ApproachesResponse,
            HealthResponse,
            ErrorResponse,
            clickhouse_lib::Table,
            clickhouse_lib::ApproachFilter,
            clickhouse_lib::Range,
            clickhouse_lib::HazardFilter
        )
    ),
    tags(
        (name = "neoscope", description = "Near-Earth object dashboard endpoints")
    ),
    info(
        title = "Neoscope API",
        description = "API for running NEO catalogue queries and approach filters",
        version = "0.1.0"
    )
)]
pub struct ApiDoc;
