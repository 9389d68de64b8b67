use super::pricing_table_entity::{PricingError, PricingTable};
use super::pricing_table_repository_trait::PricingTableRepository;

const DEFAULT_PRICING: &str = include_str!("default_pricing.json");

/// Price table compiled into the binary (us-east-1 on-demand list prices).
pub struct PricingTableEmbeddedAdapter;

impl PricingTableRepository for PricingTableEmbeddedAdapter {
    fn read(&self) -> Result<PricingTable, PricingError> {
        PricingTable::from_json(DEFAULT_PRICING)
    }

    fn source(&self) -> String {
        "embedded".to_string()
    }
}
