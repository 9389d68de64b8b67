pub mod cluster_summary;
pub mod model;
