use std::collections::HashMap;

use anyhow::{Context, Result};
use tracing::info;

use crate::core::client::cluster_api::ClusterApi;
use crate::core::fetcher::{fetch_snapshot, ClusterSnapshot, FetchPlan};
use crate::domain::aggregation::model::OwnerIndex;
use crate::domain::aggregation::node_aggregator::aggregate_nodes;
use crate::domain::aggregation::owner_aggregator::{aggregate_owners, NodeOwners};
use crate::domain::view::dto::{DensityView, NodeDensity, NodeUsage};

/// Pod density per node, with owners ranked by pod count.
///
/// `top` caps the owners listed per node. Dropped owners are still counted
/// in `truncated_owners` / `truncated_pod_count`, so listed plus truncated
/// pods always add up to the node's pod count.
pub async fn get_density_view<A: ClusterApi + ?Sized>(
    api: &A,
    top: Option<usize>,
) -> Result<DensityView> {
    let snapshot = fetch_snapshot(api, &FetchPlan::density())
        .await
        .context("density view")?;

    let view = build_density_view(&snapshot, top);
    info!(run_id = %view.run_id, nodes = view.nodes.len(), "Density view built");
    Ok(view)
}

pub fn build_density_view(snapshot: &ClusterSnapshot, top: Option<usize>) -> DensityView {
    let index = OwnerIndex::from_replica_sets(&snapshot.replica_sets);

    let mut owners_by_node: HashMap<String, NodeOwners> =
        aggregate_owners(&snapshot.nodes, &snapshot.pods, &index)
            .into_iter()
            .map(|n| (n.node_name.clone(), n))
            .collect();

    let mut nodes: Vec<NodeDensity> = aggregate_nodes(&snapshot.nodes, &snapshot.pods, &snapshot.metrics)
        .into_iter()
        .map(|record| match owners_by_node.remove(&record.name) {
            Some(mut owners) => {
                if let Some(top) = top {
                    owners.truncate(top);
                }
                NodeDensity {
                    node: NodeUsage::from(record),
                    owners: owners.owners,
                    truncated_owners: owners.truncated_owners,
                    truncated_pod_count: owners.truncated_pod_count,
                }
            }
            None => NodeDensity {
                node: NodeUsage::from(record),
                owners: Vec::new(),
                truncated_owners: 0,
                truncated_pod_count: 0,
            },
        })
        .collect();
    nodes.sort_by(|a, b| a.node.record.name.cmp(&b.node.record.name));

    DensityView {
        run_id: snapshot.run_id,
        generated_at: snapshot.fetched_at,
        metrics_available: snapshot.metrics.is_available(),
        top,
        nodes,
    }
}
