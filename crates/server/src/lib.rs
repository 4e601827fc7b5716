use api_types::ErrorMessage;
use axum::{
    Json,
    extract::rejection::{JsonRejection, PathRejection},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};
use engine::EngineError;

pub use server::{Credentials, ServerState, router, run_with_listener};

mod expenses;
mod health;
mod server;

pub mod types {
    pub mod expense {
        pub use api_types::expense::{Expense, ExpenseNew};
    }

    pub mod health {
        pub use api_types::health::Health;
    }
}

#[derive(Debug)]
pub enum ServerError {
    Engine(EngineError),
    Generic(String),
    Unauthorized,
}

fn status_for_engine_error(err: &EngineError) -> StatusCode {
    match err {
        EngineError::NotFound(_) => StatusCode::NOT_FOUND,
        EngineError::Scan(_) | EngineError::Database(_) => StatusCode::INTERNAL_SERVER_ERROR,
        // A failed write is reported like bad input, including an update
        // that matched no row.
        EngineError::InvalidInput(_) | EngineError::WriteRejected(_) => StatusCode::BAD_REQUEST,
    }
}

impl IntoResponse for ServerError {
    fn into_response(self) -> axum::response::Response {
        let (status, message) = match self {
            ServerError::Engine(err) => {
                if let EngineError::Scan(db_err) | EngineError::Database(db_err) = &err {
                    tracing::error!("database error: {db_err}");
                }
                (status_for_engine_error(&err), err.to_string())
            }
            ServerError::Generic(err) => (StatusCode::BAD_REQUEST, err),
            ServerError::Unauthorized => {
                let mut response = (
                    StatusCode::UNAUTHORIZED,
                    Json(ErrorMessage::new("Unauthorized")),
                )
                    .into_response();
                response.headers_mut().insert(
                    header::WWW_AUTHENTICATE,
                    HeaderValue::from_static("Basic realm=\"Restricted\""),
                );
                return response;
            }
        };

        (status, Json(ErrorMessage::new(message))).into_response()
    }
}

impl From<EngineError> for ServerError {
    fn from(value: EngineError) -> Self {
        Self::Engine(value)
    }
}

impl From<JsonRejection> for ServerError {
    fn from(value: JsonRejection) -> Self {
        tracing::debug!("invalid request body: {}", value.body_text());
        Self::Generic("Invalid request".to_string())
    }
}

impl From<PathRejection> for ServerError {
    fn from(value: PathRejection) -> Self {
        tracing::debug!("invalid request path: {}", value.body_text());
        Self::Generic("Invalid request, missing param id".to_string())
    }
}
