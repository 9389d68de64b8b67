use std::fs;
use std::path::PathBuf;

use tracing::debug;

use super::pricing_table_entity::{PricingError, PricingTable};
use super::pricing_table_repository_trait::PricingTableRepository;

/// Price table read from a JSON file on every call, so edits apply to the
/// next run without a restart.
pub struct PricingTableFsAdapter {
    path: PathBuf,
}

impl PricingTableFsAdapter {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl PricingTableRepository for PricingTableFsAdapter {
    fn read(&self) -> Result<PricingTable, PricingError> {
        let raw = fs::read_to_string(&self.path).map_err(|source| PricingError::Io {
            path: self.path.display().to_string(),
            source,
        })?;
        let table = PricingTable::from_json(&raw)?;

        debug!(
            path = %self.path.display(),
            instance_types = table.ec2_pricing.len(),
            "Loaded pricing table"
        );
        Ok(table)
    }

    fn source(&self) -> String {
        self.path.display().to_string()
    }
}
