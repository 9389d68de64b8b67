use tracing::warn;

use crate::core::persistence::pricing::pricing_table_entity::PricingTable;
use crate::core::util::cost_util::CostUtil;
use crate::domain::cost::model::{
    ClusterCostSummary, ComputeLineItem, CostCategory, CostInventory, CostWarning,
    LoadBalancerLineItem, StorageLineItem,
};

/// Price an inventory against `table`.
///
/// Hourly items (instances, load balancers) are projected over 730 hours.
/// Storage is billed per GB-month. Types without a price are left out of
/// the total and reported once each in `warnings`.
pub fn estimate_cost(inventory: &CostInventory, table: &PricingTable) -> ClusterCostSummary {
    let mut summary = ClusterCostSummary {
        region: inventory.region.clone(),
        ..Default::default()
    };

    for (instance_type, &count) in &inventory.instances {
        match table.instance_hourly(instance_type) {
            Some(hourly_price) => summary.compute.push(ComputeLineItem {
                instance_type: instance_type.clone(),
                count,
                hourly_price,
                monthly_cost: CostUtil::hourly_to_monthly(hourly_price, count),
            }),
            None => unpriced(&mut summary, CostCategory::Compute, instance_type),
        }
    }

    for (volume_type, totals) in &inventory.volumes {
        match table.volume_gb_monthly(volume_type) {
            Some(price_per_gb_month) => summary.storage.push(StorageLineItem {
                volume_type: volume_type.clone(),
                volume_count: totals.count,
                size_gb: totals.size_gb,
                price_per_gb_month,
                monthly_cost: CostUtil::capacity_to_monthly(price_per_gb_month, totals.size_gb),
            }),
            None => unpriced(&mut summary, CostCategory::Storage, volume_type),
        }
    }

    for (lb_type, &count) in &inventory.load_balancers {
        match table.load_balancer_hourly(lb_type) {
            Some(hourly_price) => summary.load_balancers.push(LoadBalancerLineItem {
                lb_type: lb_type.clone(),
                count,
                hourly_price,
                monthly_cost: CostUtil::hourly_to_monthly(hourly_price, count),
            }),
            None => unpriced(&mut summary, CostCategory::LoadBalancer, lb_type),
        }
    }

    summary.total_monthly_cost = summary.compute.iter().map(|i| i.monthly_cost).sum::<f64>()
        + summary.storage.iter().map(|i| i.monthly_cost).sum::<f64>()
        + summary.load_balancers.iter().map(|i| i.monthly_cost).sum::<f64>();

    summary
}

fn unpriced(summary: &mut ClusterCostSummary, category: CostCategory, type_id: &str) {
    warn!(%category, type_id, "No price found, skipping");
    summary.warnings.push(CostWarning::unpriced(category, type_id));
}
