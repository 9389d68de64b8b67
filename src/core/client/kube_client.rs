use anyhow::{Context, Result};
use kube::Client;
use std::env;
use tracing::debug;

/// Creates a Kubernetes client from the local kubeconfig (honouring
/// `KUBECONFIG`) or, when running inside a pod, the service account.
pub async fn build_kube_client() -> Result<Client> {
    if let Ok(path) = env::var("KUBECONFIG") {
        debug!("Using kubeconfig from KUBECONFIG={}", path);
    } else {
        debug!("Using default kubeconfig / in-cluster configuration");
    }

    let client = Client::try_default()
        .await
        .context("failed to infer Kubernetes client configuration")?;

    debug!("Kubernetes client initialized successfully");
    Ok(client)
}
