use api_types::health::{Health, OK, UNAVAILABLE};
use axum::{Json, extract::State, http::StatusCode};

use crate::server::ServerState;

pub async fn landing() -> &'static str {
    "Welcome to Expenses API"
}

/// Reports whether the database answers a ping. Not behind auth.
pub async fn health(State(state): State<ServerState>) -> (StatusCode, Json<Health>) {
    match state.engine.database().ping().await {
        Ok(()) => (
            StatusCode::OK,
            Json(Health {
                database: OK.to_string(),
                api: OK.to_string(),
            }),
        ),
        Err(err) => {
            tracing::warn!("database ping failed: {err}");
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(Health {
                    database: UNAVAILABLE.to_string(),
                    api: OK.to_string(),
                }),
            )
        }
    }
}
