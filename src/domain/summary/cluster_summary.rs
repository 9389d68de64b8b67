use tracing::debug;

use crate::core::client::kube_resources::{
    Deployment, Node, PersistentVolume, PersistentVolumeClaim, Pod, StorageClass,
};
use crate::domain::cost::inventory::is_default_class;
use crate::domain::summary::model::{
    ClaimSummary, ClusterSummary, DeploymentHealth, NodeHealth, NonRunningPod, ReadyStatus,
    StorageClassSummary, VolumeSummary,
};

/// Everything the cluster summary is built from.
pub struct SummarySources<'a> {
    pub nodes: &'a [Node],
    pub pods: &'a [Pod],
    pub deployments: &'a [Deployment],
    pub persistent_volumes: &'a [PersistentVolume],
    pub persistent_volume_claims: &'a [PersistentVolumeClaim],
    pub storage_classes: &'a [StorageClass],
}

pub fn node_ready_status(node: &Node) -> ReadyStatus {
    let condition = node
        .status
        .as_ref()
        .and_then(|s| s.conditions.as_ref())
        .and_then(|conds| conds.iter().find(|c| c.type_ == "Ready"));

    ReadyStatus::from_condition(condition.map(|c| c.status.as_str()))
}

fn node_health(node: &Node) -> Option<NodeHealth> {
    let status = node_ready_status(node);
    Some(NodeHealth {
        name: node.metadata.name.clone()?,
        ready: status == ReadyStatus::True,
        status,
    })
}

fn deployment_health(dep: &Deployment) -> DeploymentHealth {
    let (ready, desired) = match dep.spec.as_ref().and_then(|s| s.replicas) {
        Some(desired) => {
            let ready = dep.status.as_ref().and_then(|s| s.ready_replicas).unwrap_or(0);
            (ready, desired)
        }
        None => (0, 0),
    };

    DeploymentHealth {
        namespace: dep.metadata.namespace.clone().unwrap_or_default(),
        name: dep.metadata.name.clone().unwrap_or_default(),
        ready_replicas: ready,
        desired_replicas: desired,
        replicas: format!("{}/{}", ready, desired),
        fully_ready: ready >= desired,
    }
}

fn non_running_pod(pod: &Pod) -> Option<NonRunningPod> {
    let phase = pod.status.as_ref().and_then(|s| s.phase.as_deref());
    if phase == Some("Running") {
        return None;
    }

    Some(NonRunningPod {
        namespace: pod.metadata.namespace.clone().unwrap_or_default(),
        name: pod.metadata.name.clone().unwrap_or_default(),
        phase: phase.unwrap_or("Unknown").to_string(),
        node: pod
            .spec
            .as_ref()
            .and_then(|s| s.node_name.clone())
            .filter(|n| !n.is_empty()),
    })
}

fn volume_summary(pv: &PersistentVolume) -> VolumeSummary {
    let spec = pv.spec.as_ref();
    VolumeSummary {
        name: pv.metadata.name.clone().unwrap_or_default(),
        storage_class: spec.and_then(|s| s.storage_class_name.clone()),
        size: spec
            .and_then(|s| s.capacity.as_ref())
            .and_then(|c| c.get("storage"))
            .map(|q| q.0.clone()),
        status: pv.status.as_ref().and_then(|s| s.phase.clone()),
    }
}

fn claim_summary(pvc: &PersistentVolumeClaim) -> ClaimSummary {
    let spec = pvc.spec.as_ref();
    ClaimSummary {
        namespace: pvc.metadata.namespace.clone().unwrap_or_default(),
        name: pvc.metadata.name.clone().unwrap_or_default(),
        storage_class: spec.and_then(|s| s.storage_class_name.clone()),
        size: spec
            .and_then(|s| s.resources.as_ref())
            .and_then(|r| r.requests.as_ref())
            .and_then(|r| r.get("storage"))
            .map(|q| q.0.clone()),
        status: pvc.status.as_ref().and_then(|s| s.phase.clone()),
    }
}

/// Summarize node readiness, deployment readiness, pods that are not
/// running and the storage objects of a snapshot.
///
/// Pure over its inputs; pods in `Succeeded` count as not running.
pub fn build_summary(src: &SummarySources<'_>) -> ClusterSummary {
    let mut nodes: Vec<NodeHealth> = src.nodes.iter().filter_map(node_health).collect();
    nodes.sort_by(|a, b| a.name.cmp(&b.name));

    let mut deployments: Vec<DeploymentHealth> = src.deployments.iter().map(deployment_health).collect();
    deployments.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    let mut non_running_pods: Vec<NonRunningPod> = src.pods.iter().filter_map(non_running_pod).collect();
    non_running_pods.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    let mut persistent_volumes: Vec<VolumeSummary> =
        src.persistent_volumes.iter().map(volume_summary).collect();
    persistent_volumes.sort_by(|a, b| a.name.cmp(&b.name));

    let mut persistent_volume_claims: Vec<ClaimSummary> =
        src.persistent_volume_claims.iter().map(claim_summary).collect();
    persistent_volume_claims.sort_by(|a, b| (&a.namespace, &a.name).cmp(&(&b.namespace, &b.name)));

    let mut storage_classes: Vec<StorageClassSummary> = src
        .storage_classes
        .iter()
        .map(|sc| StorageClassSummary {
            name: sc.metadata.name.clone().unwrap_or_default(),
            provisioner: sc.provisioner.clone(),
            is_default: is_default_class(sc),
        })
        .collect();
    storage_classes.sort_by(|a, b| a.name.cmp(&b.name));

    let summary = ClusterSummary {
        ready_nodes: nodes.iter().filter(|n| n.ready).count(),
        nodes,
        deployments,
        non_running_pods,
        persistent_volumes,
        persistent_volume_claims,
        storage_classes,
    };

    debug!(
        nodes = summary.nodes.len(),
        ready_nodes = summary.ready_nodes,
        non_running_pods = summary.non_running_pods.len(),
        "Built cluster summary"
    );

    summary
}
