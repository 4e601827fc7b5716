use std::{sync::Arc, time::Duration};

use migration::{Migrator, MigratorTrait};
use tokio::sync::Notify;

mod settings;

/// How long in-flight requests may run after a shutdown signal.
const SHUTDOWN_TIMEOUT: Duration = Duration::from_secs(10);

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let settings = settings::Settings::new()?;

    tracing_subscriber::fmt()
        .with_env_filter(format!(
            "expenses={level},server={level},engine={level},migration={level},tower_http={level}",
            level = settings.level
        ))
        .init();

    tracing::info!("starting: {settings}");

    let db = parse_database(&settings.database_url).await?;
    let engine = engine::Engine::builder().database(db.clone()).build().await?;
    let credentials = server::Credentials::new(&settings.auth.username, &settings.auth.password);
    let listener = tokio::net::TcpListener::bind(settings.addr()).await?;

    let stop = Arc::new(Notify::new());
    let serve = server::run_with_listener(engine, credentials, listener, {
        let stop = stop.clone();
        async move { stop.notified().await }
    });
    tokio::pin!(serve);

    tokio::select! {
        res = &mut serve => res?,
        _ = shutdown_signal() => {
            tracing::info!("shutdown signal received, draining requests");
            stop.notify_one();
            match tokio::time::timeout(SHUTDOWN_TIMEOUT, serve).await {
                Ok(res) => res?,
                Err(_) => tracing::warn!("requests still running after {SHUTDOWN_TIMEOUT:?}, stopping anyway"),
            }
        }
    }

    db.close().await?;
    tracing::info!("server stopped");
    Ok(())
}

async fn parse_database(
    url: &str,
) -> Result<sea_orm::DatabaseConnection, Box<dyn std::error::Error + Send + Sync>> {
    let database = sea_orm::Database::connect(url).await?;
    Migrator::up(&database, None).await?;
    Ok(database)
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(err) = tokio::signal::ctrl_c().await {
            tracing::error!("failed to listen for ctrl-c: {err}");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(err) => {
                tracing::error!("failed to listen for SIGTERM: {err}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}
