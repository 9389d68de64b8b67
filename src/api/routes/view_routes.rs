//! View routes (e.g., /api/v1/views/*)

use axum::{routing::get, Router};

use crate::api::controller::view::ViewController;
use crate::app_state::AppState;

pub fn view_routes() -> Router<AppState> {
    Router::new()
        .route("/node-usage", get(ViewController::node_usage))
        .route("/density", get(ViewController::density))
        .route("/cost", get(ViewController::cost))
        .route("/summary", get(ViewController::summary))
}
