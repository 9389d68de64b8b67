//! Serializable views handed to callers. Nodes are sorted by name.

use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::domain::aggregation::model::{NodeRecord, OwnerRecord, UtilizationPercentages};
use crate::domain::cost::model::ClusterCostSummary;
use crate::domain::summary::model::ClusterSummary;

#[derive(Debug, Clone, Serialize)]
pub struct NodeUsage {
    #[serde(flatten)]
    pub record: NodeRecord,
    pub percentages: UtilizationPercentages,
}

impl From<NodeRecord> for NodeUsage {
    fn from(record: NodeRecord) -> Self {
        let percentages = record.percentages();
        Self {
            record,
            percentages,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct NodeUsageView {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub metrics_available: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metrics_unavailable_reason: Option<String>,
    pub nodes: Vec<NodeUsage>,
}

/// `node.pod_count` equals the listed owners' pods plus `truncated_pod_count`.
#[derive(Debug, Clone, Serialize)]
pub struct NodeDensity {
    pub node: NodeUsage,
    pub owners: Vec<OwnerRecord>,
    pub truncated_owners: usize,
    pub truncated_pod_count: usize,
}

#[derive(Debug, Clone, Serialize)]
pub struct DensityView {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub metrics_available: bool,
    pub top: Option<usize>,
    pub nodes: Vec<NodeDensity>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CostView {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub pricing_source: String,
    #[serde(flatten)]
    pub summary: ClusterCostSummary,
}

#[derive(Debug, Clone, Serialize)]
pub struct SummaryView {
    pub run_id: Uuid,
    pub generated_at: DateTime<Utc>,
    #[serde(flatten)]
    pub summary: ClusterSummary,
}
