use std::sync::Arc;

use crate::core::client::cluster_api::ClusterApi;
use crate::core::persistence::pricing::pricing_table_repository_trait::PricingTableRepository;
use crate::domain::view::dto::{CostView, DensityView, NodeUsageView, SummaryView};
use crate::domain::view::service::{
    cost_view_service, density_view_service, node_usage_view_service, summary_view_service,
};

#[derive(Clone)]
pub struct AppState {
    pub view_service: Arc<ViewService>,
}

pub fn build_app_state(
    cluster: Arc<dyn ClusterApi>,
    pricing: Arc<dyn PricingTableRepository>,
) -> AppState {
    AppState {
        view_service: Arc::new(ViewService::new(cluster, pricing)),
    }
}

/// Each call re-runs fetch-then-aggregate against the cluster.
pub struct ViewService {
    cluster: Arc<dyn ClusterApi>,
    pricing: Arc<dyn PricingTableRepository>,
}

impl ViewService {
    pub fn new(cluster: Arc<dyn ClusterApi>, pricing: Arc<dyn PricingTableRepository>) -> Self {
        Self { cluster, pricing }
    }

    pub async fn node_usage(&self) -> anyhow::Result<NodeUsageView> {
        node_usage_view_service::get_node_usage_view(self.cluster.as_ref()).await
    }

    pub async fn density(&self, top: Option<usize>) -> anyhow::Result<DensityView> {
        density_view_service::get_density_view(self.cluster.as_ref(), top).await
    }

    pub async fn cost(&self) -> anyhow::Result<CostView> {
        cost_view_service::get_cost_view(self.cluster.as_ref(), self.pricing.as_ref()).await
    }

    pub async fn summary(&self) -> anyhow::Result<SummaryView> {
        summary_view_service::get_summary_view(self.cluster.as_ref()).await
    }
}
