// Kube-rs based Kubernetes client
pub mod cluster_api;
pub mod deployments;
pub mod kube_client;
pub mod kube_resources;
pub mod metrics;
pub mod nodes;
pub mod pods;
pub mod replicasets;
pub mod services;
pub mod storage;

#[cfg(test)]
pub mod fake;
