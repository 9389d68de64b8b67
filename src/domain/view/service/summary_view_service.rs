use anyhow::{Context, Result};
use tracing::info;

use crate::core::client::cluster_api::ClusterApi;
use crate::core::fetcher::{fetch_snapshot, ClusterSnapshot, FetchPlan};
use crate::domain::summary::cluster_summary::{build_summary, SummarySources};
use crate::domain::view::dto::SummaryView;

/// Node and deployment readiness, non-running pods and storage listings.
pub async fn get_summary_view<A: ClusterApi + ?Sized>(api: &A) -> Result<SummaryView> {
    let snapshot = fetch_snapshot(api, &FetchPlan::summary())
        .await
        .context("summary view")?;

    let view = build_summary_view(&snapshot);
    info!(
        run_id = %view.run_id,
        nodes = view.summary.nodes.len(),
        ready_nodes = view.summary.ready_nodes,
        non_running_pods = view.summary.non_running_pods.len(),
        "Summary view built"
    );
    Ok(view)
}

pub fn build_summary_view(snapshot: &ClusterSnapshot) -> SummaryView {
    SummaryView {
        run_id: snapshot.run_id,
        generated_at: snapshot.fetched_at,
        summary: build_summary(&SummarySources {
            nodes: &snapshot.nodes,
            pods: &snapshot.pods,
            deployments: &snapshot.deployments,
            persistent_volumes: &snapshot.persistent_volumes,
            persistent_volume_claims: &snapshot.persistent_volume_claims,
            storage_classes: &snapshot.storage_classes,
        }),
    }
}
