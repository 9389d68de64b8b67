use serde::Serialize;

/// Status of a node's `Ready` condition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ReadyStatus {
    True,
    False,
    Unknown,
}

impl ReadyStatus {
    pub fn from_condition(status: Option<&str>) -> Self {
        match status {
            Some("True") => ReadyStatus::True,
            Some("False") => ReadyStatus::False,
            _ => ReadyStatus::Unknown,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NodeHealth {
    pub name: String,
    pub ready: bool,
    pub status: ReadyStatus,
}

/// Ready against desired replicas. A deployment without a replica count
/// reports `0/0`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DeploymentHealth {
    pub namespace: String,
    pub name: String,
    pub ready_replicas: i32,
    pub desired_replicas: i32,
    pub replicas: String,
    pub fully_ready: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NonRunningPod {
    pub namespace: String,
    pub name: String,
    pub phase: String,
    pub node: Option<String>,
}

/// `size` is the capacity quantity as written on the object, `None` if absent.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VolumeSummary {
    pub name: String,
    pub storage_class: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ClaimSummary {
    pub namespace: String,
    pub name: String,
    pub storage_class: Option<String>,
    pub size: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageClassSummary {
    pub name: String,
    pub provisioner: String,
    pub is_default: bool,
}

/// Health and storage inventory of the cluster at one point in time.
/// Every list is sorted by namespace, then name.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterSummary {
    pub ready_nodes: usize,
    pub nodes: Vec<NodeHealth>,
    pub deployments: Vec<DeploymentHealth>,
    pub non_running_pods: Vec<NonRunningPod>,
    pub persistent_volumes: Vec<VolumeSummary>,
    pub persistent_volume_claims: Vec<ClaimSummary>,
    pub storage_classes: Vec<StorageClassSummary>,
}
