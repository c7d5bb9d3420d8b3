use crate::monitor::SharedReport;
use crate::web::{handlers, AppState};
use anyhow::Result;
use axum::{routing::get, Router};
use tokio::sync::watch;
use tower_http::trace::TraceLayer;
use tracing::info;

pub async fn start_status_server(
    address: &str,
    report: SharedReport,
    mut shutdown: watch::Receiver<bool>,
) -> Result<()> {
    let app = create_router(AppState::new(report));
    let listener = tokio::net::TcpListener::bind(address).await?;
    info!("Status server running on http://{}", address);

    axum::serve(listener, app)
        .with_graceful_shutdown(async move {
            // A dropped sender also ends the server
            let _ = shutdown.wait_for(|stop| *stop).await;
        })
        .await?;

    info!("Status server stopped");
    Ok(())
}

pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(handlers::get_liveness))
        .route("/api/status", get(handlers::get_monitor_status))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Resolves on Ctrl+C or SIGTERM
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
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

    info!("Shutdown signal received, stopping monitor");
}
