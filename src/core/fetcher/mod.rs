//! Point-in-time snapshot of the cluster objects one aggregation run needs.
//!
//! All planned list calls run concurrently inside the caller's task and are
//! joined before any field of the snapshot is readable. Required kinds abort
//! the run on failure; live metrics only degrade it.

use std::fmt;
use std::future::Future;

use chrono::{DateTime, Utc};
use thiserror::Error;
use tracing::{debug, info, info_span, warn, Instrument};
use uuid::Uuid;

use crate::core::client::cluster_api::{ClusterApi, ClusterApiError};
use crate::core::client::kube_resources::{
    Deployment, Node, NodeMetrics, PersistentVolume, PersistentVolumeClaim, Pod, ReplicaSet, Service,
    StorageClass,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Nodes,
    Pods,
    ReplicaSets,
    Deployments,
    NodeMetrics,
    PersistentVolumes,
    PersistentVolumeClaims,
    StorageClasses,
    Services,
}

impl ResourceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ResourceKind::Nodes => "nodes",
            ResourceKind::Pods => "pods",
            ResourceKind::ReplicaSets => "replicasets",
            ResourceKind::Deployments => "deployments",
            ResourceKind::NodeMetrics => "node metrics",
            ResourceKind::PersistentVolumes => "persistentvolumes",
            ResourceKind::PersistentVolumeClaims => "persistentvolumeclaims",
            ResourceKind::StorageClasses => "storageclasses",
            ResourceKind::Services => "services",
        }
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A required kind could not be listed. The run is aborted.
#[derive(Debug, Error)]
#[error("failed to list {kind}: {source}")]
pub struct FetchError {
    pub kind: ResourceKind,
    #[source]
    pub source: ClusterApiError,
}

/// Which kinds an operation needs. `metrics` is the only soft kind.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct FetchPlan {
    pub nodes: bool,
    pub pods: bool,
    pub replica_sets: bool,
    pub deployments: bool,
    pub metrics: bool,
    pub persistent_volumes: bool,
    pub persistent_volume_claims: bool,
    pub storage_classes: bool,
    pub services: bool,
}

impl FetchPlan {
    pub fn node_usage() -> Self {
        Self {
            nodes: true,
            pods: true,
            metrics: true,
            ..Default::default()
        }
    }

    pub fn density() -> Self {
        Self {
            replica_sets: true,
            ..Self::node_usage()
        }
    }

    pub fn cost() -> Self {
        Self {
            nodes: true,
            persistent_volumes: true,
            persistent_volume_claims: true,
            storage_classes: true,
            services: true,
            ..Default::default()
        }
    }

    /// Health and inventory listing: no metrics, no replica sets.
    pub fn summary() -> Self {
        Self {
            nodes: true,
            pods: true,
            deployments: true,
            persistent_volumes: true,
            persistent_volume_claims: true,
            storage_classes: true,
            ..Default::default()
        }
    }

    /// Hard kinds in the order their failures are reported.
    pub fn required_kinds(&self) -> Vec<ResourceKind> {
        [
            (self.nodes, ResourceKind::Nodes),
            (self.pods, ResourceKind::Pods),
            (self.replica_sets, ResourceKind::ReplicaSets),
            (self.deployments, ResourceKind::Deployments),
            (self.persistent_volumes, ResourceKind::PersistentVolumes),
            (self.persistent_volume_claims, ResourceKind::PersistentVolumeClaims),
            (self.storage_classes, ResourceKind::StorageClasses),
            (self.services, ResourceKind::Services),
        ]
        .into_iter()
        .filter_map(|(wanted, kind)| wanted.then_some(kind))
        .collect()
    }
}

/// Live usage is either present for the run or absent for every node.
#[derive(Debug, Clone)]
pub enum MetricsAvailability {
    Available(Vec<NodeMetrics>),
    Unavailable { reason: String },
}

impl MetricsAvailability {
    pub fn is_available(&self) -> bool {
        matches!(self, MetricsAvailability::Available(_))
    }
}

/// Materialized lists for one run. Kinds outside the plan are left empty.
#[derive(Debug, Clone)]
pub struct ClusterSnapshot {
    pub run_id: Uuid,
    pub fetched_at: DateTime<Utc>,
    pub nodes: Vec<Node>,
    pub pods: Vec<Pod>,
    pub replica_sets: Vec<ReplicaSet>,
    pub deployments: Vec<Deployment>,
    pub persistent_volumes: Vec<PersistentVolume>,
    pub persistent_volume_claims: Vec<PersistentVolumeClaim>,
    pub storage_classes: Vec<StorageClass>,
    pub services: Vec<Service>,
    pub metrics: MetricsAvailability,
}

type Slot<T> = Option<Result<Vec<T>, ClusterApiError>>;

async fn planned<T, F>(wanted: bool, call: F) -> Slot<T>
where
    F: Future<Output = Result<Vec<T>, ClusterApiError>>,
{
    if wanted {
        Some(call.await)
    } else {
        None
    }
}

fn required<T>(kind: ResourceKind, slot: Slot<T>) -> Result<Vec<T>, FetchError> {
    match slot {
        None => Ok(Vec::new()),
        Some(Ok(items)) => Ok(items),
        Some(Err(source)) => Err(FetchError { kind, source }),
    }
}

/// List every kind in `plan` concurrently and assemble a snapshot.
///
/// All calls are awaited before any result is inspected. When several hard
/// kinds fail, the error reported is the first in [`FetchPlan::required_kinds`]
/// order, not whichever call finished first, so the same failures always
/// yield the same error.
pub async fn fetch_snapshot<A>(api: &A, plan: &FetchPlan) -> Result<ClusterSnapshot, FetchError>
where
    A: ClusterApi + ?Sized,
{
    let run_id = Uuid::new_v4();
    let span = info_span!("fetch_snapshot", %run_id);

    async move {
        debug!(kinds = ?plan.required_kinds(), metrics = plan.metrics, "Fetching cluster snapshot");

        let (nodes, pods, replica_sets, deployments, metrics, pvs, pvcs, storage_classes, services) = tokio::join!(
            planned(plan.nodes, api.list_nodes()),
            planned(plan.pods, api.list_pods()),
            planned(plan.replica_sets, api.list_replica_sets()),
            planned(plan.deployments, api.list_deployments()),
            planned(plan.metrics, api.list_node_metrics()),
            planned(plan.persistent_volumes, api.list_persistent_volumes()),
            planned(plan.persistent_volume_claims, api.list_persistent_volume_claims()),
            planned(plan.storage_classes, api.list_storage_classes()),
            planned(plan.services, api.list_services()),
        );

        let nodes = required(ResourceKind::Nodes, nodes)?;
        let pods = required(ResourceKind::Pods, pods)?;
        let replica_sets = required(ResourceKind::ReplicaSets, replica_sets)?;
        let deployments = required(ResourceKind::Deployments, deployments)?;
        let persistent_volumes = required(ResourceKind::PersistentVolumes, pvs)?;
        let persistent_volume_claims = required(ResourceKind::PersistentVolumeClaims, pvcs)?;
        let storage_classes = required(ResourceKind::StorageClasses, storage_classes)?;
        let services = required(ResourceKind::Services, services)?;

        let metrics = match metrics {
            Some(Ok(items)) => MetricsAvailability::Available(items),
            Some(Err(err)) => {
                if err.is_not_found() {
                    warn!("metrics.k8s.io is not served (metrics-server missing?); usage unavailable");
                } else {
                    warn!(error = %err, "Node metrics unavailable; usage will be reported as unavailable");
                }
                MetricsAvailability::Unavailable {
                    reason: err.to_string(),
                }
            }
            None => MetricsAvailability::Unavailable {
                reason: "not requested".to_string(),
            },
        };

        info!(
            nodes = nodes.len(),
            pods = pods.len(),
            metrics_available = metrics.is_available(),
            "Cluster snapshot fetched"
        );

        Ok::<_, FetchError>(ClusterSnapshot {
            run_id,
            fetched_at: Utc::now(),
            nodes,
            pods,
            replica_sets,
            deployments,
            persistent_volumes,
            persistent_volume_claims,
            storage_classes,
            services,
            metrics,
        })
    }
    .instrument(span)
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::client::fake::{self, FakeClusterApi};

    #[tokio::test]
    async fn test_node_usage_plan_fetches_only_needed_kinds() {
        let api = FakeClusterApi::default()
            .with_nodes(vec![fake::node("node-a", "4", "8Gi")])
            .with_pods(vec![fake::running_pod("default", "web-1", "node-a", &[("1", "1Gi")])])
            .with_metrics(vec![fake::node_metrics("node-a", "500m", "1Gi")]);

        let snapshot = fetch_snapshot(&api, &FetchPlan::node_usage()).await.unwrap();

        assert_eq!(snapshot.nodes.len(), 1);
        assert_eq!(snapshot.pods.len(), 1);
        assert!(snapshot.metrics.is_available());

        let mut called = api.called_kinds();
        called.sort_by_key(|k| k.as_str());
        let mut expected = vec![ResourceKind::Nodes, ResourceKind::Pods, ResourceKind::NodeMetrics];
        expected.sort_by_key(|k| k.as_str());
        assert_eq!(called, expected);
    }

    #[tokio::test]
    async fn test_required_failure_aborts_with_kind() {
        let api = FakeClusterApi::default()
            .with_nodes(vec![fake::node("node-a", "4", "8Gi")])
            .failing(ResourceKind::Pods, ClusterApiError::Connection("connection refused".into()));

        let err = fetch_snapshot(&api, &FetchPlan::node_usage()).await.unwrap_err();

        assert_eq!(err.kind, ResourceKind::Pods);
        assert!(matches!(err.source, ClusterApiError::Connection(_)));
        assert!(err.to_string().contains("pods"));
    }

    #[tokio::test]
    async fn test_first_failing_required_kind_is_reported() {
        let api = FakeClusterApi::default()
            .failing(ResourceKind::Nodes, ClusterApiError::Unauthorized("forbidden".into()))
            .failing(ResourceKind::ReplicaSets, ClusterApiError::NotFound("gone".into()));

        let err = fetch_snapshot(&api, &FetchPlan::density()).await.unwrap_err();

        assert_eq!(err.kind, ResourceKind::Nodes);
        assert!(matches!(err.source, ClusterApiError::Unauthorized(_)));
    }

    #[tokio::test]
    async fn test_metrics_failure_is_soft() {
        let api = FakeClusterApi::default()
            .with_nodes(vec![fake::node("node-a", "4", "8Gi")])
            .failing(ResourceKind::NodeMetrics, ClusterApiError::NotFound("metrics.k8s.io".into()));

        let snapshot = fetch_snapshot(&api, &FetchPlan::node_usage()).await.unwrap();

        assert_eq!(snapshot.nodes.len(), 1);
        match snapshot.metrics {
            MetricsAvailability::Unavailable { reason } => assert!(reason.contains("not found")),
            MetricsAvailability::Available(_) => panic!("metrics should be unavailable"),
        }
    }

    #[tokio::test]
    async fn test_unplanned_kinds_are_empty() {
        let api = FakeClusterApi::default()
            .with_nodes(vec![fake::node("node-a", "4", "8Gi")])
            .failing(ResourceKind::Pods, ClusterApiError::Other("should not be called".into()));

        let snapshot = fetch_snapshot(&api, &FetchPlan::cost()).await.unwrap();

        assert!(snapshot.pods.is_empty());
        assert!(!snapshot.metrics.is_available());
        assert!(!api.called_kinds().contains(&ResourceKind::Pods));
    }

    #[test]
    fn test_plan_required_kinds() {
        assert_eq!(
            FetchPlan::density().required_kinds(),
            vec![ResourceKind::Nodes, ResourceKind::Pods, ResourceKind::ReplicaSets]
        );
        assert!(FetchPlan::density().metrics);
        assert!(!FetchPlan::cost().metrics);
        assert_eq!(FetchPlan::cost().required_kinds().len(), 5);
        assert!(!FetchPlan::summary().metrics);
        assert_eq!(
            FetchPlan::summary().required_kinds(),
            vec![
                ResourceKind::Nodes,
                ResourceKind::Pods,
                ResourceKind::Deployments,
                ResourceKind::PersistentVolumes,
                ResourceKind::PersistentVolumeClaims,
                ResourceKind::StorageClasses,
            ]
        );
    }

    #[tokio::test]
    async fn test_summary_plan_skips_metrics_and_replica_sets() {
        let api = FakeClusterApi::default()
            .with_deployments(vec![fake::deployment("shop", "api", Some(2), Some(2))])
            .failing(ResourceKind::NodeMetrics, ClusterApiError::Other("should not be called".into()));

        let snapshot = fetch_snapshot(&api, &FetchPlan::summary()).await.unwrap();

        assert_eq!(snapshot.deployments.len(), 1);
        let called = api.called_kinds();
        assert!(!called.contains(&ResourceKind::NodeMetrics));
        assert!(!called.contains(&ResourceKind::ReplicaSets));
        assert!(!called.contains(&ResourceKind::Services));
    }
}
