//! Liveness probe

use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

use super::method_not_allowed;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: &'static str,
    pub version: &'static str,
    /// Whether the store answered a trivial read
    pub store: bool,
}

/// GET /health
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    let store = match state.store().categories().await {
        Ok(_) => true,
        Err(e) => {
            tracing::error!("health probe failed: {}", e);
            false
        }
    };

    Json(HealthResponse {
        status: if store { "ok" } else { "degraded" },
        version: env!("CARGO_PKG_VERSION"),
        store,
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/health", get(health).fallback(method_not_allowed))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::MemoryStore;

    #[tokio::test]
    async fn health_reports_store() {
        let state = AppState::new(MemoryStore::seeded());
        let Json(body) = health(State(state)).await;
        assert_eq!(body.status, "ok");
        assert!(body.store);
    }
}
