use super::pricing_table_entity::{PricingError, PricingTable};

/// Source of the price table used by cost estimation.
pub trait PricingTableRepository: Send + Sync {
    fn read(&self) -> Result<PricingTable, PricingError>;

    /// Human-readable origin, for logs.
    fn source(&self) -> String;
}
