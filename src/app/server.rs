use crate::app::{build_router, AppState};
use crate::config::ServerConfig;
use crate::utils::error::{AppError, Result};
use tokio::net::TcpListener;

/// 綁定位址並持續服務，直到收到 Ctrl-C
pub async fn start_server(config: &ServerConfig, state: AppState) -> Result<()> {
    let bind_address = config.bind_address();

    let listener = TcpListener::bind(&bind_address)
        .await
        .map_err(|e| AppError::BindError(format!("bind failed on {}: {}", bind_address, e)))?;

    let addr = listener.local_addr()?;
    tracing::info!("🚀 Server running at http://localhost:{}", addr.port());

    axum::serve(listener, build_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| AppError::ServeError(e.to_string()))?;

    tracing::info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for Ctrl-C: {}", e);
        std::future::pending::<()>().await;
    }
    tracing::info!("Shutdown signal received");
}
