use std::collections::HashMap;
use std::fmt;

use serde::{Serialize, Serializer};

use crate::core::client::kube_resources::ReplicaSet;
use crate::core::util::cost_util::CostUtil;

/// CPU in millicores and memory in bytes.
///
/// Totals saturate at `u64::MAX` rather than wrapping; limits are not
/// bounded by capacity, so sums of huge but valid quantities can get there.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct ResourceAmounts {
    pub cpu_millicores: u64,
    pub memory_bytes: u64,
}

impl ResourceAmounts {
    pub fn new(cpu_millicores: u64, memory_bytes: u64) -> Self {
        Self {
            cpu_millicores,
            memory_bytes,
        }
    }

    pub fn add(&mut self, other: ResourceAmounts) {
        self.cpu_millicores = self.cpu_millicores.saturating_add(other.cpu_millicores);
        self.memory_bytes = self.memory_bytes.saturating_add(other.memory_bytes);
    }
}

/// Per-node totals for one aggregation run.
///
/// `capacity` comes straight from the node status. `requests`/`limits`
/// only grow while pods are folded in. `usage` is `None` when live metrics
/// could not be read, which is distinct from an observed zero.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeRecord {
    pub name: String,
    pub instance_type: Option<String>,
    pub capacity: ResourceAmounts,
    pub requests: ResourceAmounts,
    pub limits: ResourceAmounts,
    pub usage: Option<ResourceAmounts>,
    pub pod_count: usize,
}

/// Percent-of-capacity figures for a node. Zero capacity yields 0.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct UtilizationPercentages {
    pub cpu_requests_pct: f64,
    pub cpu_limits_pct: f64,
    pub memory_requests_pct: f64,
    pub memory_limits_pct: f64,
    pub cpu_usage_pct: Option<f64>,
    pub memory_usage_pct: Option<f64>,
}

impl NodeRecord {
    pub fn percentages(&self) -> UtilizationPercentages {
        let cap = self.capacity;
        UtilizationPercentages {
            cpu_requests_pct: CostUtil::percent_of(self.requests.cpu_millicores, cap.cpu_millicores),
            cpu_limits_pct: CostUtil::percent_of(self.limits.cpu_millicores, cap.cpu_millicores),
            memory_requests_pct: CostUtil::percent_of(self.requests.memory_bytes, cap.memory_bytes),
            memory_limits_pct: CostUtil::percent_of(self.limits.memory_bytes, cap.memory_bytes),
            cpu_usage_pct: self
                .usage
                .map(|u| CostUtil::percent_of(u.cpu_millicores, cap.cpu_millicores)),
            memory_usage_pct: self
                .usage
                .map(|u| CostUtil::percent_of(u.memory_bytes, cap.memory_bytes)),
        }
    }
}

/// Top-level controller kind a pod is attributed to.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum OwnerKind {
    Deployment,
    ReplicaSet,
    DaemonSet,
    StatefulSet,
    Job,
    Pod,
    Other(String),
}

impl OwnerKind {
    pub fn from_kind(kind: &str) -> Self {
        match kind {
            "Deployment" => OwnerKind::Deployment,
            "ReplicaSet" => OwnerKind::ReplicaSet,
            "DaemonSet" => OwnerKind::DaemonSet,
            "StatefulSet" => OwnerKind::StatefulSet,
            "Job" => OwnerKind::Job,
            "Pod" => OwnerKind::Pod,
            other => OwnerKind::Other(other.to_string()),
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            OwnerKind::Deployment => "Deployment",
            OwnerKind::ReplicaSet => "ReplicaSet",
            OwnerKind::DaemonSet => "DaemonSet",
            OwnerKind::StatefulSet => "StatefulSet",
            OwnerKind::Job => "Job",
            OwnerKind::Pod => "Pod",
            OwnerKind::Other(kind) => kind,
        }
    }
}

impl fmt::Display for OwnerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl Serialize for OwnerKind {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// Aggregation key for a logical workload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct OwnerKey {
    pub namespace: String,
    pub owner_type: OwnerKind,
    pub owner_name: String,
}

/// Pods of one owner on one node, with their summed requests and limits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct OwnerRecord {
    #[serde(flatten)]
    pub key: OwnerKey,
    pub pod_count: usize,
    pub requests: ResourceAmounts,
    pub limits: ResourceAmounts,
}

impl OwnerRecord {
    pub fn new(key: OwnerKey) -> Self {
        Self {
            key,
            pod_count: 0,
            requests: ResourceAmounts::default(),
            limits: ResourceAmounts::default(),
        }
    }
}

/// namespace → ReplicaSet name → owning Deployment name.
///
/// Built once per run from the full ReplicaSet listing so pods can be
/// attributed to their Deployment without a per-pod API call. Lookups
/// borrow their keys.
#[derive(Debug, Clone, Default)]
pub struct OwnerIndex {
    deployments: HashMap<String, HashMap<String, String>>,
}

impl OwnerIndex {
    pub fn from_replica_sets(replica_sets: &[ReplicaSet]) -> Self {
        let mut deployments: HashMap<String, HashMap<String, String>> = HashMap::new();

        for rs in replica_sets {
            let (Some(namespace), Some(name)) = (&rs.metadata.namespace, &rs.metadata.name) else {
                continue;
            };
            let deployment = rs
                .metadata
                .owner_references
                .iter()
                .flatten()
                .find(|owner| owner.kind == "Deployment");

            if let Some(owner) = deployment {
                deployments
                    .entry(namespace.clone())
                    .or_default()
                    .insert(name.clone(), owner.name.clone());
            }
        }

        Self { deployments }
    }

    pub fn deployment_for(&self, namespace: &str, replica_set: &str) -> Option<&str> {
        self.deployments
            .get(namespace)
            .and_then(|sets| sets.get(replica_set))
            .map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.deployments.values().map(HashMap::len).sum()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
