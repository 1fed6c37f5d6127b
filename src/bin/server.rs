//! School registry server: loads settings from the environment, prepares storage, serves the API.

use hogwarts_school::{app, apply_migrations, ensure_database_exists, store, AppState, MemoryRepository, Settings};
use tokio::net::TcpListener;
use tokio::signal;
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new("hogwarts_school=info,tower_http=info")),
        )
        .init();

    let settings = Settings::from_env()?;
    tracing::debug!(?settings, "settings loaded");

    let state = match &settings.database_url {
        Some(url) => {
            ensure_database_exists(url).await?;
            let pool = store::connect(url, &settings).await?;
            apply_migrations(&pool, &settings.schema).await?;
            AppState::postgres(pool, &settings.schema)
        }
        None => {
            tracing::warn!("DATABASE_URL not set; using in-memory storage, data is lost on exit");
            AppState::in_memory(MemoryRepository::new())
        }
    };
    let storage = state.backend();

    let listener = TcpListener::bind(&settings.bind_addr).await?;
    tracing::info!(addr = %listener.local_addr()?, storage, "listening");
    axum::serve(listener, app(state, settings.body_limit))
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!(error = %e, "failed to install Ctrl+C handler");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }
    tracing::warn!("signal received, starting graceful shutdown");
}
