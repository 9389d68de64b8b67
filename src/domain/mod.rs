pub mod aggregation;
pub mod cost;
pub mod summary;
pub mod view;
