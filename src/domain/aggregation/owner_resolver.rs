use crate::core::client::kube_resources::Pod;
use crate::domain::aggregation::model::{OwnerIndex, OwnerKind};

/// Resolve the top-level owner of a pod as `(owner name, owner kind)`.
///
/// Only the first owner reference is considered. ReplicaSets are looked up
/// in `index` and reported as their Deployment when one is known, otherwise
/// as the ReplicaSet itself. Any other kind passes through verbatim, and a
/// pod without owner references owns itself.
///
/// Pure lookup: no API calls, so it is safe inside the per-pod loop.
pub fn resolve_owner(pod: &Pod, index: &OwnerIndex) -> (String, OwnerKind) {
    let pod_name = pod.metadata.name.clone().unwrap_or_default();
    let namespace = pod.metadata.namespace.as_deref().unwrap_or_default();

    let Some(owner) = pod
        .metadata
        .owner_references
        .as_ref()
        .and_then(|owners| owners.first())
    else {
        return (pod_name, OwnerKind::Pod);
    };

    match owner.kind.as_str() {
        "ReplicaSet" => match index.deployment_for(namespace, &owner.name) {
            Some(deployment) => (deployment.to_string(), OwnerKind::Deployment),
            None => (owner.name.clone(), OwnerKind::ReplicaSet),
        },
        kind => (owner.name.clone(), OwnerKind::from_kind(kind)),
    }
}
