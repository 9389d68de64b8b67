//! View controller: connects routes to the aggregation views

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use axum::Json;
use validator::Validate;

use crate::api::dto::view_dto::DensityQuery;
use crate::api::dto::ApiResponse;
use crate::api::util::json::to_json;
use crate::app_state::AppState;
use crate::domain::view::dto::{CostView, DensityView, NodeUsageView, SummaryView};
use crate::errors::AppError;

pub struct ViewController;

impl ViewController {
    pub async fn node_usage(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<NodeUsageView>>, AppError> {
        to_json(state.view_service.node_usage().await)
    }

    pub async fn density(
        State(state): State<AppState>,
        query: Result<Query<DensityQuery>, QueryRejection>,
    ) -> Result<Json<ApiResponse<DensityView>>, AppError> {
        let Query(query) = query?;
        query.validate()?;
        to_json(state.view_service.density(query.top).await)
    }

    pub async fn cost(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<CostView>>, AppError> {
        to_json(state.view_service.cost().await)
    }

    pub async fn summary(
        State(state): State<AppState>,
    ) -> Result<Json<ApiResponse<SummaryView>>, AppError> {
        to_json(state.view_service.summary().await)
    }
}
