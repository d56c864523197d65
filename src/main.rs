//! Job scout binary entrypoint wiring configuration, storage, the scan scheduler and HTTP.

use std::{net::SocketAddr, sync::Arc};

use anyhow::Context;
use axum::Router;
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use job_scout::{
    config::AppConfig,
    dao::job_store::sqlite::SqliteJobStore,
    routes,
    services::{notifier::TelegramNotifier, scheduler},
    sources::fetch::HttpFetcher,
    state::{AppState, SharedState},
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();

    let config = AppConfig::from_env();
    let port = config.port;

    let store = SqliteJobStore::connect(config.database.clone())
        .await
        .with_context(|| format!("opening job store `{}`", config.database.url))?;
    let fetcher = HttpFetcher::new().context("building HTTP client")?;

    let notifier = config
        .telegram
        .as_ref()
        .map(|telegram| TelegramNotifier::new(fetcher.client().clone(), telegram));
    if notifier.is_none() {
        info!("Telegram credentials not set; notifications disabled");
    }

    let mut state = AppState::new(config, Arc::new(store), Arc::new(fetcher));
    if let Some(notifier) = notifier {
        state = state.with_notifier(Arc::new(notifier));
    }
    let state = state.shared();

    tokio::spawn(scheduler::run(state.clone()));
    // Build the HTTP router once the shared state is ready.
    let app = build_router(state);

    let addr = SocketAddr::from(([0, 0, 0, 0], port));
    info!(%addr, "starting server");

    let listener = TcpListener::bind(addr).await.context("binding server")?;
    axum::serve(listener, app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("serving axum")?;

    Ok(())
}

/// Build the top-level router and attach cross-cutting middleware layers.
fn build_router(state: SharedState) -> Router<()> {
    routes::router(state)
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}

/// Configure tracing subscribers so logs include spans by default.
fn init_tracing() {
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,tower_http=debug".into());
    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

/// Wait for Ctrl+C or SIGTERM and shut the server down gracefully.
async fn shutdown_signal() {
    #[cfg(unix)]
    {
        use tokio::signal::unix::{SignalKind, signal};

        let mut term = signal(SignalKind::terminate()).expect("install SIGTERM handler");
        tokio::select! {
            _ = tokio::signal::ctrl_c() => {},
            _ = term.recv() => {},
        }
    }

    #[cfg(not(unix))]
    {
        let _ = tokio::signal::ctrl_c().await;
    }
}
