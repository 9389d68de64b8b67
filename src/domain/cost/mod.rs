pub mod inventory;
pub mod model;
pub mod pricing_engine;
