use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::Deployment;

/// Fetch all deployments in the cluster
pub async fn fetch_deployments(client: &Client) -> kube::Result<Vec<Deployment>> {
    let deployments: Api<Deployment> = Api::all(client.clone());
    let deploy_list = deployments.list(&ListParams::default()).await?;

    debug!("Discovered {} deployment(s)", deploy_list.items.len());
    Ok(deploy_list.items)
}
