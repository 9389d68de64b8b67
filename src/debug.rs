use serde::Serialize;
use tracing::{error, info};

use crate::app_state::AppState;

/// Runs only when CLUSTERLENS_DEBUG_MODE is set: build every view once and log it.
pub async fn run_debug(state: &AppState) {
    info!("🔧 Debug mode: building all views once...");

    let service = &state.view_service;
    log_view("node-usage", service.node_usage().await);
    log_view("density", service.density(None).await);
    log_view("cost", service.cost().await);
    log_view("summary", service.summary().await);

    info!("Debug tasks completed. Exiting...");
}

fn log_view<T: Serialize>(name: &str, result: anyhow::Result<T>) {
    match result.and_then(|view| Ok(serde_json::to_string_pretty(&view)?)) {
        Ok(json) => info!(view = name, "\n{}", json),
        Err(err) => error!(view = name, error = %format!("{:#}", err), "View failed"),
    }
}
