use anyhow::{Context, Result};
use tracing::info;

use crate::core::client::cluster_api::ClusterApi;
use crate::core::fetcher::{fetch_snapshot, FetchPlan};
use crate::core::persistence::pricing::pricing_table_repository_trait::PricingTableRepository;
use crate::domain::cost::inventory::{build_inventory, InventorySources};
use crate::domain::cost::pricing_engine::estimate_cost;
use crate::domain::view::dto::CostView;

pub async fn get_cost_view<A, R>(api: &A, pricing: &R) -> Result<CostView>
where
    A: ClusterApi + ?Sized,
    R: PricingTableRepository + ?Sized,
{
    let table = pricing
        .read()
        .with_context(|| format!("failed to load pricing table from {}", pricing.source()))?;

    let snapshot = fetch_snapshot(api, &FetchPlan::cost())
        .await
        .context("cost view")?;

    let inventory = build_inventory(&InventorySources {
        nodes: &snapshot.nodes,
        persistent_volumes: &snapshot.persistent_volumes,
        persistent_volume_claims: &snapshot.persistent_volume_claims,
        storage_classes: &snapshot.storage_classes,
        services: &snapshot.services,
    });
    let summary = estimate_cost(&inventory, &table);

    info!(
        run_id = %snapshot.run_id,
        region = %summary.region,
        total_monthly_cost = summary.total_monthly_cost,
        warnings = summary.warnings.len(),
        "Cost view built"
    );

    Ok(CostView {
        run_id: snapshot.run_id,
        generated_at: snapshot.fetched_at,
        pricing_source: pricing.source(),
        summary,
    })
}
