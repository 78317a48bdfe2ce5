use axum::{routing::get, Router};
use tower::ServiceBuilder;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use super::account;
use super::health;
use super::state::AppState;
use super::types::ApiError;

/// Create the full router with application state.
///
/// Every response, errors included, carries a permissive CORS header.
pub fn create_router_with_state(state: AppState) -> Router {
    Router::new()
        // Health endpoints
        .route("/health", get(health::health_check))
        .route("/live", get(health::live_check))
        // Account endpoints
        .merge(account::create_account_router())
        // Unmatched routes get the standard envelope
        .fallback(route_not_found)
        .with_state(state)
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(CorsLayer::permissive()),
        )
}

async fn route_not_found() -> ApiError {
    ApiError::not_found()
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::StatusCode;

    #[tokio::test]
    async fn test_fallback_uses_error_envelope() {
        let err = route_not_found().await;

        assert_eq!(err.status, StatusCode::NOT_FOUND);
        let json = serde_json::to_value(&err.body).unwrap();
        assert_eq!(json, serde_json::json!({"status": 404, "reason": "Not found"}));
    }
}
