use anyhow::{Context, Result};
use tracing::info;

use crate::core::client::cluster_api::ClusterApi;
use crate::core::fetcher::{fetch_snapshot, ClusterSnapshot, FetchPlan, MetricsAvailability};
use crate::domain::aggregation::node_aggregator::aggregate_nodes;
use crate::domain::view::dto::{NodeUsage, NodeUsageView};

pub async fn get_node_usage_view<A: ClusterApi + ?Sized>(api: &A) -> Result<NodeUsageView> {
    let snapshot = fetch_snapshot(api, &FetchPlan::node_usage())
        .await
        .context("node usage view")?;

    let view = build_node_usage_view(&snapshot);
    info!(
        run_id = %view.run_id,
        nodes = view.nodes.len(),
        metrics_available = view.metrics_available,
        "Node usage view built"
    );
    Ok(view)
}

pub fn build_node_usage_view(snapshot: &ClusterSnapshot) -> NodeUsageView {
    let mut nodes: Vec<NodeUsage> = aggregate_nodes(&snapshot.nodes, &snapshot.pods, &snapshot.metrics)
        .into_iter()
        .map(NodeUsage::from)
        .collect();
    nodes.sort_by(|a, b| a.record.name.cmp(&b.record.name));

    let metrics_unavailable_reason = match &snapshot.metrics {
        MetricsAvailability::Available(_) => None,
        MetricsAvailability::Unavailable { reason } => Some(reason.clone()),
    };

    NodeUsageView {
        run_id: snapshot.run_id,
        generated_at: snapshot.fetched_at,
        metrics_available: snapshot.metrics.is_available(),
        metrics_unavailable_reason,
        nodes,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::cluster_api::ClusterApiError;
    use crate::core::client::fake::{self, FakeClusterApi};
    use crate::core::fetcher::{FetchError, ResourceKind};

    #[tokio::test]
    async fn test_view_sorted_by_node_name_with_usage() {
        let api = FakeClusterApi::default()
            .with_nodes(vec![fake::node("node-b", "2", "4Gi"), fake::node("node-a", "4", "8Gi")])
            .with_pods(vec![fake::running_pod("default", "web", "node-a", &[("1", "2Gi")])])
            .with_metrics(vec![fake::node_metrics("node-a", "2", "4Gi")]);

        let view = get_node_usage_view(&api).await.unwrap();

        let names: Vec<&str> = view.nodes.iter().map(|n| n.record.name.as_str()).collect();
        assert_eq!(names, vec!["node-a", "node-b"]);
        assert!(view.metrics_available);
        assert_eq!(view.nodes[0].percentages.cpu_requests_pct, 25.0);
        assert_eq!(view.nodes[0].percentages.cpu_usage_pct, Some(50.0));
        assert_eq!(view.nodes[1].record.usage, None);
    }

    #[tokio::test]
    async fn test_metrics_outage_degrades_view() {
        let api = FakeClusterApi::default()
            .with_nodes(vec![fake::node("node-a", "4", "8Gi")])
            .with_pods(vec![fake::running_pod("default", "web", "node-a", &[("1", "1Gi")])])
            .failing(ResourceKind::NodeMetrics, ClusterApiError::Connection("timeout".into()));

        let view = get_node_usage_view(&api).await.unwrap();

        assert!(!view.metrics_available);
        assert!(view.metrics_unavailable_reason.unwrap().contains("timeout"));
        assert_eq!(view.nodes[0].record.requests.cpu_millicores, 1000);
        assert_eq!(view.nodes[0].percentages.memory_usage_pct, None);
    }

    #[tokio::test]
    async fn test_node_listing_failure_keeps_fetch_error() {
        let api = FakeClusterApi::default()
            .failing(ResourceKind::Nodes, ClusterApiError::Unauthorized("expired token".into()));

        let err = get_node_usage_view(&api).await.unwrap_err();

        let fetch = err.downcast_ref::<FetchError>().unwrap();
        assert_eq!(fetch.kind, ResourceKind::Nodes);
    }
}
