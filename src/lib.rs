//! Point-in-time cluster resource aggregation: node usage, pod density by
//! workload owner and monthly cost projection.

pub mod api;
pub mod app_state;
pub mod config;
pub mod core;
pub mod debug;
pub mod domain;
pub mod errors;
pub mod logging;
pub mod routes;
