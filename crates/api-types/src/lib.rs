//! Data types for the Neoscope API.
//!
//! These structs define the JSON responses returned by the API server. They
//! are provided in a separate crate so that consumers such as the dashboard can
//! depend on them without pulling in the rest of the server implementation.

#![allow(missing_docs)]

use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use clickhouse_lib::{ApproachFilter, CatalogueQuery, Table};
use serde::Serialize;
use utoipa::ToSchema;

#[derive(Debug, Serialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryItem {
    pub id: String,
    pub number: u8,
    pub label: String,
    pub columns: Vec<String>,
}

impl From<CatalogueQuery> for QueryItem {
    fn from(query: CatalogueQuery) -> Self {
        Self {
            id: query.id(),
            number: query.number(),
            label: query.label().to_owned(),
            columns: query.columns().iter().map(|c| (*c).to_owned()).collect(),
        }
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryListResponse {
    pub queries: Vec<QueryItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct QueryResultResponse {
    pub query: QueryItem,
    pub table: Table,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ApproachesResponse {
    pub filter: ApproachFilter,
    pub table: Table,
}

/// Problem-details style error body.
#[derive(Debug, Serialize, ToSchema)]
pub struct ErrorResponse {
    #[serde(rename = "type")]
    pub r#type: String,
    pub title: String,
    pub status: u16,
    pub detail: String,
}

impl ErrorResponse {
    pub fn new(
        r#type: impl Into<String>,
        title: impl Into<String>,
        status: StatusCode,
        detail: impl Into<String>,
    ) -> Self {
        Self {
            r#type: r#type.into(),
            title: title.into(),
            status: status.as_u16(),
            detail: detail.into(),
        }
    }

    pub fn invalid_params(detail: impl Into<String>) -> Self {
        Self::new("invalid-params", "Bad Request", StatusCode::BAD_REQUEST, detail)
    }

    pub fn not_found(detail: impl Into<String>) -> Self {
        Self::new("not-found", "Not Found", StatusCode::NOT_FOUND, detail)
    }

    pub fn database_error() -> Self {
        Self::new(
            "database-error",
            "Database error",
            StatusCode::INTERNAL_SERVER_ERROR,
            "Failed to query the database",
        )
    }
}

impl IntoResponse for ErrorResponse {
    fn into_response(self) -> Response {
        let status =
            StatusCode::from_u16(self.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        (status, Json(self)).into_response()
    }
}
