pub mod cost_view_service;
pub mod density_view_service;
pub mod node_usage_view_service;
pub mod summary_view_service;
