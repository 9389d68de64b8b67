pub mod model;
pub mod node_aggregator;
pub mod owner_aggregator;
pub mod owner_resolver;
