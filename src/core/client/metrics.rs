// kubectl get --raw /apis/metrics.k8s.io/v1beta1/nodes | jq .

use std::collections::BTreeMap;

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use k8s_openapi::apimachinery::pkg::apis::meta::v1::ObjectMeta;
use kube::api::ListParams;
use kube::{Api, Client};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::core::util::quantity;

/// One entry of the `metrics.k8s.io/v1beta1` node list served by metrics-server.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NodeMetrics {
    pub metadata: ObjectMeta,
    #[serde(default)]
    pub timestamp: Option<String>,
    #[serde(default)]
    pub window: Option<String>,
    /// Observed usage keyed by resource name (`cpu`, `memory`).
    #[serde(default)]
    pub usage: BTreeMap<String, Quantity>,
}

impl NodeMetrics {
    pub fn cpu_millicores(&self) -> u64 {
        quantity::cpu_from_map(Some(&self.usage))
    }

    pub fn memory_bytes(&self) -> u64 {
        quantity::bytes_from_map(Some(&self.usage), "memory")
    }
}

// the metrics API is not part of k8s-openapi
impl k8s_openapi::Resource for NodeMetrics {
    const API_VERSION: &'static str = "metrics.k8s.io/v1beta1";
    const GROUP: &'static str = "metrics.k8s.io";
    const KIND: &'static str = "NodeMetrics";
    const VERSION: &'static str = "v1beta1";
    const URL_PATH_SEGMENT: &'static str = "nodes";
    type Scope = k8s_openapi::ClusterResourceScope;
}

impl k8s_openapi::Metadata for NodeMetrics {
    type Ty = ObjectMeta;

    fn metadata(&self) -> &Self::Ty {
        &self.metadata
    }

    fn metadata_mut(&mut self) -> &mut Self::Ty {
        &mut self.metadata
    }
}

/// Fetch live usage for every node from metrics-server.
///
/// Fails with a 404 when metrics-server is not installed; callers treat
/// that as "metrics unavailable" rather than a hard failure.
pub async fn fetch_node_metrics(client: &Client) -> kube::Result<Vec<NodeMetrics>> {
    let metrics: Api<NodeMetrics> = Api::all(client.clone());
    let metric_list = metrics.list(&ListParams::default()).await?;

    debug!("Fetched metrics for {} node(s)", metric_list.items.len());
    Ok(metric_list.items)
}
