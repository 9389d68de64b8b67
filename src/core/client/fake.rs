//! In-memory `ClusterApi` and object builders used by unit tests.

use std::collections::{BTreeMap, HashMap};
use std::sync::Mutex;

use async_trait::async_trait;
use k8s_openapi::api::apps::v1::{DeploymentSpec, DeploymentStatus};
use k8s_openapi::api::core::v1::{
    Container, NodeCondition, NodeSpec, NodeStatus, PersistentVolumeClaimSpec, PersistentVolumeClaimStatus,
    PersistentVolumeSpec, PersistentVolumeStatus, PodSpec, PodStatus, ResourceRequirements, ServiceSpec,
    VolumeResourceRequirements,
};

use crate::core::client::cluster_api::{ClusterApi, ClusterApiError};
use crate::core::client::kube_resources::{
    Deployment, Node, NodeMetrics, ObjectMeta, OwnerReference, PersistentVolume, PersistentVolumeClaim, Pod,
    Quantity, ReplicaSet, Service, StorageClass,
};
use crate::core::fetcher::ResourceKind;

#[derive(Default)]
pub struct FakeClusterApi {
    pub nodes: Vec<Node>,
    pub pods: Vec<Pod>,
    pub replica_sets: Vec<ReplicaSet>,
    pub deployments: Vec<Deployment>,
    pub metrics: Vec<NodeMetrics>,
    pub persistent_volumes: Vec<PersistentVolume>,
    pub persistent_volume_claims: Vec<PersistentVolumeClaim>,
    pub storage_classes: Vec<StorageClass>,
    pub services: Vec<Service>,
    failures: HashMap<ResourceKind, ClusterApiError>,
    calls: Mutex<Vec<ResourceKind>>,
}

impl FakeClusterApi {
    pub fn with_nodes(mut self, nodes: Vec<Node>) -> Self {
        self.nodes = nodes;
        self
    }

    pub fn with_pods(mut self, pods: Vec<Pod>) -> Self {
        self.pods = pods;
        self
    }

    pub fn with_replica_sets(mut self, replica_sets: Vec<ReplicaSet>) -> Self {
        self.replica_sets = replica_sets;
        self
    }

    pub fn with_deployments(mut self, deployments: Vec<Deployment>) -> Self {
        self.deployments = deployments;
        self
    }

    pub fn with_metrics(mut self, metrics: Vec<NodeMetrics>) -> Self {
        self.metrics = metrics;
        self
    }

    pub fn with_persistent_volumes(mut self, pvs: Vec<PersistentVolume>) -> Self {
        self.persistent_volumes = pvs;
        self
    }

    pub fn with_persistent_volume_claims(mut self, pvcs: Vec<PersistentVolumeClaim>) -> Self {
        self.persistent_volume_claims = pvcs;
        self
    }

    pub fn with_storage_classes(mut self, classes: Vec<StorageClass>) -> Self {
        self.storage_classes = classes;
        self
    }

    pub fn with_services(mut self, services: Vec<Service>) -> Self {
        self.services = services;
        self
    }

    pub fn failing(mut self, kind: ResourceKind, err: ClusterApiError) -> Self {
        self.failures.insert(kind, err);
        self
    }

    pub fn called_kinds(&self) -> Vec<ResourceKind> {
        self.calls.lock().unwrap().clone()
    }

    fn answer<T: Clone>(&self, kind: ResourceKind, items: &[T]) -> Result<Vec<T>, ClusterApiError> {
        self.calls.lock().unwrap().push(kind);
        match self.failures.get(&kind) {
            Some(err) => Err(err.clone()),
            None => Ok(items.to_vec()),
        }
    }
}

#[async_trait]
impl ClusterApi for FakeClusterApi {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterApiError> {
        self.answer(ResourceKind::Nodes, &self.nodes)
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, ClusterApiError> {
        self.answer(ResourceKind::Pods, &self.pods)
    }

    async fn list_replica_sets(&self) -> Result<Vec<ReplicaSet>, ClusterApiError> {
        self.answer(ResourceKind::ReplicaSets, &self.replica_sets)
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>, ClusterApiError> {
        self.answer(ResourceKind::Deployments, &self.deployments)
    }

    async fn list_node_metrics(&self) -> Result<Vec<NodeMetrics>, ClusterApiError> {
        self.answer(ResourceKind::NodeMetrics, &self.metrics)
    }

    async fn list_persistent_volumes(&self) -> Result<Vec<PersistentVolume>, ClusterApiError> {
        self.answer(ResourceKind::PersistentVolumes, &self.persistent_volumes)
    }

    async fn list_persistent_volume_claims(
        &self,
    ) -> Result<Vec<PersistentVolumeClaim>, ClusterApiError> {
        self.answer(ResourceKind::PersistentVolumeClaims, &self.persistent_volume_claims)
    }

    async fn list_storage_classes(&self) -> Result<Vec<StorageClass>, ClusterApiError> {
        self.answer(ResourceKind::StorageClasses, &self.storage_classes)
    }

    async fn list_services(&self) -> Result<Vec<Service>, ClusterApiError> {
        self.answer(ResourceKind::Services, &self.services)
    }
}

// ==================== Builders ====================

fn quantities(pairs: &[(&str, &str)]) -> BTreeMap<String, Quantity> {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), Quantity(v.to_string())))
        .collect()
}

fn labels(pairs: &[(&str, &str)]) -> Option<BTreeMap<String, String>> {
    if pairs.is_empty() {
        return None;
    }
    Some(pairs.iter().map(|(k, v)| (k.to_string(), v.to_string())).collect())
}

pub fn node(name: &str, cpu: &str, memory: &str) -> Node {
    labeled_node(name, cpu, memory, &[])
}

pub fn labeled_node(name: &str, cpu: &str, memory: &str, node_labels: &[(&str, &str)]) -> Node {
    Node {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            labels: labels(node_labels),
            ..Default::default()
        },
        spec: Some(NodeSpec::default()),
        status: Some(NodeStatus {
            capacity: Some(quantities(&[("cpu", cpu), ("memory", memory)])),
            ..Default::default()
        }),
        ..Default::default()
    }
}

/// Running pod with one container per `(cpu request, memory request)` and no limits.
pub fn running_pod(namespace: &str, name: &str, node: &str, requests: &[(&str, &str)]) -> Pod {
    let containers: Vec<(&str, &str, Option<(&str, &str)>)> =
        requests.iter().map(|(c, m)| (*c, *m, None)).collect();
    pod_with(namespace, name, Some(node), "Running", &containers, None)
}

/// Pod whose containers each carry `(cpu request, memory request, Some((cpu limit, memory limit)))`.
pub fn pod_with(
    namespace: &str,
    name: &str,
    node: Option<&str>,
    phase: &str,
    containers: &[(&str, &str, Option<(&str, &str)>)],
    owner: Option<(&str, &str)>,
) -> Pod {
    let containers = containers
        .iter()
        .enumerate()
        .map(|(i, &(cpu, mem, limits))| Container {
            name: format!("c{}", i),
            resources: Some(ResourceRequirements {
                requests: Some(quantities(&[("cpu", cpu), ("memory", mem)])),
                limits: limits.map(|(lc, lm)| quantities(&[("cpu", lc), ("memory", lm)])),
                ..Default::default()
            }),
            ..Default::default()
        })
        .collect();

    Pod {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            owner_references: owner.map(|(kind, owner_name)| vec![owner_ref(kind, owner_name)]),
            ..Default::default()
        },
        spec: Some(PodSpec {
            node_name: node.map(str::to_string),
            containers,
            ..Default::default()
        }),
        status: Some(PodStatus {
            phase: Some(phase.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn owned_pod(namespace: &str, name: &str, node: &str, kind: &str, owner_name: &str) -> Pod {
    pod_with(
        namespace,
        name,
        Some(node),
        "Running",
        &[("100m", "128Mi", Some(("200m", "256Mi")))],
        Some((kind, owner_name)),
    )
}

pub fn owner_ref(kind: &str, name: &str) -> OwnerReference {
    OwnerReference {
        api_version: "apps/v1".to_string(),
        kind: kind.to_string(),
        name: name.to_string(),
        uid: format!("uid-{}", name),
        controller: Some(true),
        ..Default::default()
    }
}

pub fn replica_set(namespace: &str, name: &str, deployment: Option<&str>) -> ReplicaSet {
    ReplicaSet {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            owner_references: deployment.map(|d| vec![owner_ref("Deployment", d)]),
            ..Default::default()
        },
        ..Default::default()
    }
}

/// Node carrying a `Ready` condition with the given status (`True`, `False`, `Unknown`).
pub fn node_with_ready(name: &str, ready: &str) -> Node {
    let mut n = node(name, "4", "8Gi");
    if let Some(status) = n.status.as_mut() {
        status.conditions = Some(vec![NodeCondition {
            type_: "Ready".to_string(),
            status: ready.to_string(),
            ..Default::default()
        }]);
    }
    n
}

pub fn deployment(namespace: &str, name: &str, desired: Option<i32>, ready: Option<i32>) -> Deployment {
    Deployment {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(DeploymentSpec {
            replicas: desired,
            ..Default::default()
        }),
        status: Some(DeploymentStatus {
            ready_replicas: ready,
            ..Default::default()
        }),
    }
}

pub fn node_metrics(name: &str, cpu: &str, memory: &str) -> NodeMetrics {
    NodeMetrics {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        usage: quantities(&[("cpu", cpu), ("memory", memory)]),
        ..Default::default()
    }
}

pub fn storage_class(name: &str, provisioner: &str, volume_type: Option<&str>) -> StorageClass {
    StorageClass {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        provisioner: provisioner.to_string(),
        parameters: volume_type.map(|t| [("type".to_string(), t.to_string())].into()),
        ..Default::default()
    }
}

pub fn persistent_volume(name: &str, storage_class: &str, size: &str) -> PersistentVolume {
    PersistentVolume {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            ..Default::default()
        },
        spec: Some(PersistentVolumeSpec {
            capacity: Some(quantities(&[("storage", size)])),
            storage_class_name: Some(storage_class.to_string()),
            ..Default::default()
        }),
        status: Some(PersistentVolumeStatus {
            phase: Some("Bound".to_string()),
            ..Default::default()
        }),
    }
}

pub fn pending_claim(namespace: &str, name: &str, storage_class: Option<&str>, size: &str) -> PersistentVolumeClaim {
    PersistentVolumeClaim {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            ..Default::default()
        },
        spec: Some(PersistentVolumeClaimSpec {
            storage_class_name: storage_class.map(str::to_string),
            resources: Some(VolumeResourceRequirements {
                requests: Some(quantities(&[("storage", size)])),
                ..Default::default()
            }),
            ..Default::default()
        }),
        status: Some(PersistentVolumeClaimStatus {
            phase: Some("Pending".to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}

pub fn load_balancer(namespace: &str, name: &str, lb_annotation: Option<&str>) -> Service {
    service(namespace, name, "LoadBalancer", lb_annotation)
}

pub fn service(namespace: &str, name: &str, type_: &str, lb_annotation: Option<&str>) -> Service {
    Service {
        metadata: ObjectMeta {
            name: Some(name.to_string()),
            namespace: Some(namespace.to_string()),
            annotations: lb_annotation.map(|a| {
                [(
                    "service.beta.kubernetes.io/aws-load-balancer-type".to_string(),
                    a.to_string(),
                )]
                .into()
            }),
            ..Default::default()
        },
        spec: Some(ServiceSpec {
            type_: Some(type_.to_string()),
            ..Default::default()
        }),
        ..Default::default()
    }
}
