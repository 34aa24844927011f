//! API route definitions

pub mod approaches;
pub mod catalogue;

use crate::{ApiDoc, state::ApiState};
use axum::{Router, routing::get};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use approaches::*;
use catalogue::*;

/// Build the router with all API endpoints.
pub fn router(state: ApiState) -> Router {
    let api_routes = Router::new()
        .route("/queries", get(list_queries))
        .route("/queries/:id", get(run_query))
        .route("/approaches", get(approaches));

    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-doc/openapi.json", ApiDoc::openapi()))
        .merge(api_routes)
        .with_state(state)
}
