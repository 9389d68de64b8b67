use std::collections::BTreeMap;
use std::fmt;

use serde::Serialize;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum CostCategory {
    Compute,
    Storage,
    LoadBalancer,
}

impl CostCategory {
    pub fn as_str(&self) -> &'static str {
        match self {
            CostCategory::Compute => "compute",
            CostCategory::Storage => "storage",
            CostCategory::LoadBalancer => "load_balancer",
        }
    }
}

impl fmt::Display for CostCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Observed billable resources, keyed by type identifier.
///
/// BTreeMaps keep line items in type-name order.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostInventory {
    pub region: String,
    pub instances: BTreeMap<String, u32>,
    pub volumes: BTreeMap<String, VolumeTotals>,
    pub load_balancers: BTreeMap<String, u32>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct VolumeTotals {
    pub count: u32,
    pub size_gb: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ComputeLineItem {
    pub instance_type: String,
    pub count: u32,
    pub hourly_price: f64,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StorageLineItem {
    pub volume_type: String,
    pub volume_count: u32,
    pub size_gb: u64,
    pub price_per_gb_month: f64,
    pub monthly_cost: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LoadBalancerLineItem {
    pub lb_type: String,
    pub count: u32,
    pub hourly_price: f64,
    pub monthly_cost: f64,
}

/// An observed type with no price entry. Excluded from the total.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostWarning {
    pub category: CostCategory,
    pub type_id: String,
    pub message: String,
}

impl CostWarning {
    pub fn unpriced(category: CostCategory, type_id: &str) -> Self {
        Self {
            category,
            type_id: type_id.to_string(),
            message: format!("no {} price found for {}, skipped", category, type_id),
        }
    }
}

/// Priced line items per category plus the authoritative total.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct ClusterCostSummary {
    pub region: String,
    pub compute: Vec<ComputeLineItem>,
    pub storage: Vec<StorageLineItem>,
    pub load_balancers: Vec<LoadBalancerLineItem>,
    pub warnings: Vec<CostWarning>,
    pub total_monthly_cost: f64,
}
