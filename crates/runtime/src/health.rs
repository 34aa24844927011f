use api_types::HealthResponse;
use axum::Json;

/// Health check handler returning `{ "status": "ok" }`.
pub async fn handler() -> Json<HealthResponse> {
    Json(HealthResponse { status: "ok".to_owned() })
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::{
        Router,
        body::{self, Body},
        http::{Request, StatusCode},
        routing::get,
    };
    use tower::util::ServiceExt;

    #[tokio::test]
    async fn health_reports_ok() {
        let response = Router::new()
            .route("/health", get(handler))
            .oneshot(Request::builder().uri("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let bytes = body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert_eq!(&bytes[..], br#"{"status":"ok"}"#);
    }
}
