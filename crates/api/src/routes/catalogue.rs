//! Query catalogue endpoints

use crate::state::ApiState;
use api_types::*;
use axum::{
    Json,
    extract::{Path, State},
};
use clickhouse_lib::CatalogueQuery;

#[utoipa::path(
    get,
    path = "/queries",
    responses(
        (status = 200, description = "Catalogue entries", body = QueryListResponse)
    ),
    tag = "neoscope"
)]
/// List the predefined analytical queries in catalogue order.
pub async fn list_queries() -> Json<QueryListResponse> {
    let queries = CatalogueQuery::ALL.into_iter().map(QueryItem::from).collect();
    Json(QueryListResponse { queries })
}

#[utoipa::path(
    get,
    path = "/queries/{id}",
    params(
        ("id" = String, Path, description = "Catalogue id such as `q4`")
    ),
    responses(
        (status = 200, description = "Query result", body = QueryResultResponse),
        (status = 404, description = "Unknown query", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "neoscope"
)]
/// Run one catalogue query and return its result set.
///
/// Columns are returned in the order the statement selects them.
pub async fn run_query(
    Path(id): Path<String>,
    State(state): State<ApiState>,
) -> Result<Json<QueryResultResponse>, ErrorResponse> {
    let query = id.parse::<CatalogueQuery>().map_err(|e| ErrorResponse::not_found(e.to_string()))?;

    let table = match state.client.run_catalogue_query(query).await {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(query = %query.id(), error = ?e, "Failed to run catalogue query");
            return Err(ErrorResponse::database_error());
        }
    };
    tracing::info!(query = %query.id(), rows = table.len(), "Returning catalogue query");
    Ok(Json(QueryResultResponse { query: query.into(), table }))
}
