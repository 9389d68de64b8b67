use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::Service;

/// Fetch all services in the cluster
pub async fn fetch_services(client: &Client) -> kube::Result<Vec<Service>> {
    let services: Api<Service> = Api::all(client.clone());
    let svc_list = services.list(&ListParams::default()).await?;

    debug!("Discovered {} service(s)", svc_list.items.len());
    Ok(svc_list.items)
}
