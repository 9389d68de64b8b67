use axum::extract::rejection::QueryRejection;
use axum::{http::StatusCode, response::IntoResponse, Json};
use thiserror::Error;
use tracing::{error, warn};

use crate::api::dto::ApiResponse;
use crate::core::fetcher::FetchError;

#[derive(Debug, Error)]
pub enum AppError {
    #[error("Internal server error: {0}")]
    InternalServerError(String),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Cluster API error: {0}")]
    ClusterApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl AppError {
    fn status(&self) -> StatusCode {
        match self {
            AppError::InternalServerError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            AppError::ValidationError(_) => StatusCode::BAD_REQUEST,
            AppError::ClusterApiError(_) => StatusCode::BAD_GATEWAY,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }

    fn code(&self) -> &'static str {
        match self {
            AppError::InternalServerError(_) => "INTERNAL_ERROR",
            AppError::ValidationError(_) => "VALIDATION_ERROR",
            AppError::ClusterApiError(_) => "CLUSTER_API_ERROR",
            AppError::NotFound(_) => "NOT_FOUND",
        }
    }
}

/// A failed required list call surfaces as 502 with the kind in the message.
impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(fetch) = err.downcast_ref::<FetchError>() {
            warn!(kind = %fetch.kind, error = %fetch.source, "Cluster fetch failed");
            return AppError::ClusterApiError(format!("{:#}", err));
        }
        error!(error = %format!("{:#}", err), "Request failed");
        AppError::InternalServerError(format!("{:#}", err))
    }
}

impl From<validator::ValidationErrors> for AppError {
    fn from(err: validator::ValidationErrors) -> Self {
        AppError::ValidationError(err.to_string())
    }
}

/// Malformed query strings get the same envelope as range violations.
impl From<QueryRejection> for AppError {
    fn from(err: QueryRejection) -> Self {
        AppError::ValidationError(err.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = Json(ApiResponse::<()>::err(self.code(), self.to_string()));
        (self.status(), body).into_response()
    }
}
