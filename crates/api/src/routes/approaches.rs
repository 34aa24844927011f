//! Interactive approach filter endpoint

use crate::{
    state::ApiState,
    validation::{ApproachQuery, resolve_approach_filter},
};
use api_types::*;
use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
};

#[utoipa::path(
    get,
    path = "/approaches",
    params(
        ApproachQuery
    ),
    responses(
        (status = 200, description = "Filtered close approaches", body = ApproachesResponse),
        (status = 400, description = "Invalid filter", body = ErrorResponse),
        (status = 500, description = "Database error", body = ErrorResponse)
    ),
    tag = "neoscope"
)]
/// Filter close approaches by date, miss distance, velocity, diameter and
/// hazard flag.
///
/// All bounds are inclusive. Results are ordered by approach date, then name.
pub async fn approaches(
    params: Result<Query<ApproachQuery>, QueryRejection>,
    State(state): State<ApiState>,
) -> Result<Json<ApproachesResponse>, ErrorResponse> {
    let Query(params) = params.map_err(|e| ErrorResponse::invalid_params(e.body_text()))?;
    let filter = resolve_approach_filter(&params)?;

    let table = match state.client.get_filtered_table(&filter).await {
        Ok(table) => table,
        Err(e) => {
            tracing::error!(error = ?e, "Failed to get filtered approaches");
            return Err(ErrorResponse::database_error());
        }
    };
    tracing::info!(
        count = table.len(),
        hazardous = %filter.hazardous,
        "Returning filtered approaches"
    );
    Ok(Json(ApproachesResponse { filter, table }))
}
