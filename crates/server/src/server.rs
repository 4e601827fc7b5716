use axum::{
    Router,
    extract::{Request, State},
    middleware::{self, Next},
    response::Response,
    routing::{get, post},
};
use axum_extra::{
    TypedHeader,
    headers::{Authorization, authorization::Basic},
    typed_header::TypedHeaderRejection,
};
use tower_http::trace::TraceLayer;

use std::{future::Future, sync::Arc};

use crate::{ServerError, expenses, health};
use engine::Engine;

/// The single username/password pair accepted on `/expenses`.
#[derive(Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl Credentials {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    fn matches(&self, username: &str, password: &str) -> bool {
        // Both comparisons always run.
        let username_ok = constant_time_eq(self.username.as_bytes(), username.as_bytes());
        let password_ok = constant_time_eq(self.password.as_bytes(), password.as_bytes());
        username_ok & password_ok
    }
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"***")
            .finish()
    }
}

fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    a.iter().zip(b).fold(0u8, |acc, (x, y)| acc | (x ^ y)) == 0
}

#[derive(Clone)]
pub struct ServerState {
    pub engine: Arc<Engine>,
    pub credentials: Arc<Credentials>,
}

async fn auth(
    State(state): State<ServerState>,
    auth_header: Result<TypedHeader<Authorization<Basic>>, TypedHeaderRejection>,
    request: Request,
    next: Next,
) -> Result<Response, ServerError> {
    let Ok(TypedHeader(auth_header)) = auth_header else {
        tracing::debug!("missing or malformed authorization header");
        return Err(ServerError::Unauthorized);
    };

    if !state
        .credentials
        .matches(auth_header.username(), auth_header.password())
    {
        tracing::debug!("rejected credentials for user {}", auth_header.username());
        return Err(ServerError::Unauthorized);
    }

    Ok(next.run(request).await)
}

pub fn router(state: ServerState) -> Router {
    let protected = Router::new()
        .route("/expenses", post(expenses::create).get(expenses::list))
        .route("/expenses/{id}", get(expenses::get).put(expenses::update))
        .route_layer(middleware::from_fn_with_state(state.clone(), auth));

    Router::new()
        .route("/", get(health::landing))
        .route("/health", get(health::health))
        .merge(protected)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Serve until `shutdown` resolves, then finish in-flight requests.
pub async fn run_with_listener<F>(
    engine: Engine,
    credentials: Credentials,
    listener: tokio::net::TcpListener,
    shutdown: F,
) -> Result<(), std::io::Error>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    tracing::info!("Server listening on {}", addr);

    let state = ServerState {
        engine: Arc::new(engine),
        credentials: Arc::new(credentials),
    };

    axum::serve(listener, router(state))
        .with_graceful_shutdown(shutdown)
        .await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn credentials_match_exact_pair_only() {
        let credentials = Credentials::new("November 10", "2009");

        assert!(credentials.matches("November 10", "2009"));
        assert!(!credentials.matches("November 10", "2010"));
        assert!(!credentials.matches("November", "2009"));
        assert!(!credentials.matches("", ""));
    }

    #[test]
    fn debug_hides_password() {
        let credentials = Credentials::new("user", "secret");
        assert!(!format!("{credentials:?}").contains("secret"));
    }
}
