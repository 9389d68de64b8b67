use async_trait::async_trait;
use kube::Client;
use thiserror::Error;

use crate::core::client::kube_resources::{
    Deployment, Node, NodeMetrics, PersistentVolume, PersistentVolumeClaim, Pod, ReplicaSet, Service,
    StorageClass,
};
use crate::core::client::{deployments, metrics, nodes, pods, replicasets, services, storage};

/// Failure of a single list call against the cluster API.
///
/// Not-found (including an API group that is not served, e.g. no
/// metrics-server) is kept apart from credential and transport failures so
/// callers can tell "nothing there" from "could not ask".
#[derive(Debug, Clone, Error)]
pub enum ClusterApiError {
    #[error("not found: {0}")]
    NotFound(String),

    #[error("unauthorized: {0}")]
    Unauthorized(String),

    #[error("connection failed: {0}")]
    Connection(String),

    #[error("API error ({code}): {message}")]
    Api { code: u16, message: String },

    #[error("{0}")]
    Other(String),
}

impl ClusterApiError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, ClusterApiError::NotFound(_))
    }
}

impl From<kube::Error> for ClusterApiError {
    fn from(err: kube::Error) -> Self {
        match err {
            kube::Error::Api(resp) => match resp.code {
                404 => ClusterApiError::NotFound(resp.message.clone()),
                401 | 403 => ClusterApiError::Unauthorized(resp.message.clone()),
                code => ClusterApiError::Api {
                    code,
                    message: resp.message.clone(),
                },
            },
            kube::Error::Auth(e) => ClusterApiError::Unauthorized(e.to_string()),
            e @ (kube::Error::HyperError(_) | kube::Error::Service(_)) => {
                ClusterApiError::Connection(e.to_string())
            }
            other => ClusterApiError::Other(other.to_string()),
        }
    }
}

/// The list operations the aggregation engine needs from the control plane.
///
/// Every call returns the fully materialized list; there is no paging or
/// watching at this boundary.
#[async_trait]
pub trait ClusterApi: Send + Sync {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterApiError>;
    async fn list_pods(&self) -> Result<Vec<Pod>, ClusterApiError>;
    async fn list_replica_sets(&self) -> Result<Vec<ReplicaSet>, ClusterApiError>;
    async fn list_deployments(&self) -> Result<Vec<Deployment>, ClusterApiError>;
    async fn list_node_metrics(&self) -> Result<Vec<NodeMetrics>, ClusterApiError>;
    async fn list_persistent_volumes(&self) -> Result<Vec<PersistentVolume>, ClusterApiError>;
    async fn list_persistent_volume_claims(
        &self,
    ) -> Result<Vec<PersistentVolumeClaim>, ClusterApiError>;
    async fn list_storage_classes(&self) -> Result<Vec<StorageClass>, ClusterApiError>;
    async fn list_services(&self) -> Result<Vec<Service>, ClusterApiError>;
}

/// `ClusterApi` backed by a live kube-rs client.
#[derive(Clone)]
pub struct KubeClusterApi {
    client: Client,
}

impl KubeClusterApi {
    pub fn new(client: Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl ClusterApi for KubeClusterApi {
    async fn list_nodes(&self) -> Result<Vec<Node>, ClusterApiError> {
        Ok(nodes::fetch_nodes(&self.client).await?)
    }

    async fn list_pods(&self) -> Result<Vec<Pod>, ClusterApiError> {
        Ok(pods::fetch_pods(&self.client).await?)
    }

    async fn list_replica_sets(&self) -> Result<Vec<ReplicaSet>, ClusterApiError> {
        Ok(replicasets::fetch_replica_sets(&self.client).await?)
    }

    async fn list_deployments(&self) -> Result<Vec<Deployment>, ClusterApiError> {
        Ok(deployments::fetch_deployments(&self.client).await?)
    }

    async fn list_node_metrics(&self) -> Result<Vec<NodeMetrics>, ClusterApiError> {
        Ok(metrics::fetch_node_metrics(&self.client).await?)
    }

    async fn list_persistent_volumes(&self) -> Result<Vec<PersistentVolume>, ClusterApiError> {
        Ok(storage::fetch_persistent_volumes(&self.client).await?)
    }

    async fn list_persistent_volume_claims(
        &self,
    ) -> Result<Vec<PersistentVolumeClaim>, ClusterApiError> {
        Ok(storage::fetch_persistent_volume_claims(&self.client).await?)
    }

    async fn list_storage_classes(&self) -> Result<Vec<StorageClass>, ClusterApiError> {
        Ok(storage::fetch_storage_classes(&self.client).await?)
    }

    async fn list_services(&self) -> Result<Vec<Service>, ClusterApiError> {
        Ok(services::fetch_services(&self.client).await?)
    }
}
