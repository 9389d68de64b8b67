use kube::api::ListParams;
use kube::{Api, Client};
use tracing::debug;

use crate::core::client::kube_resources::ReplicaSet;

/// Fetch all replica sets in the cluster. Only their owner references are
/// needed, so the caller builds a ReplicaSet → Deployment index from this.
pub async fn fetch_replica_sets(client: &Client) -> kube::Result<Vec<ReplicaSet>> {
    let replica_sets: Api<ReplicaSet> = Api::all(client.clone());
    let rs_list = replica_sets.list(&ListParams::default()).await?;

    debug!("Discovered {} replica set(s)", rs_list.items.len());
    Ok(rs_list.items)
}
