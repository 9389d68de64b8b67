use std::sync::Arc;

use anyhow::{Context, Result};
use tracing::info;

use clusterlens_core::app_state::build_app_state;
use clusterlens_core::config::AppConfig;
use clusterlens_core::core::client::cluster_api::{ClusterApi, KubeClusterApi};
use clusterlens_core::core::client::kube_client::build_kube_client;
use clusterlens_core::core::persistence::pricing::pricing_repository;
use clusterlens_core::debug::run_debug;
use clusterlens_core::logging::init_tracing;
use clusterlens_core::routes::app_router;

#[tokio::main]
async fn main() -> Result<()> {
    let config = AppConfig::from_env()?;
    let _log_guard = init_tracing(config.log_dir.as_deref());

    info!(
        version = env!("CARGO_PKG_VERSION"),
        addr = %config.server_addr,
        pricing_file = ?config.pricing_file,
        "Starting clusterlens"
    );

    let client = build_kube_client().await?;
    let cluster: Arc<dyn ClusterApi> = Arc::new(KubeClusterApi::new(client));
    let pricing = pricing_repository(config.pricing_file.as_deref());
    let state = build_app_state(cluster, pricing);

    if config.debug_mode {
        run_debug(&state).await;
        return Ok(());
    }

    let app = app_router().with_state(state);
    let listener = tokio::net::TcpListener::bind(config.server_addr)
        .await
        .with_context(|| format!("failed to bind {}", config.server_addr))?;

    info!("Listening on {}", config.server_addr);
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server error")?;

    info!("Shutting down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(err) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %err, "Failed to listen for shutdown signal");
    }
}
