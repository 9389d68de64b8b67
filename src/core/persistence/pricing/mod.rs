pub mod pricing_table_embedded_adapter;
pub mod pricing_table_entity;
pub mod pricing_table_fs_adapter;
pub mod pricing_table_repository_trait;

use std::sync::Arc;

use pricing_table_embedded_adapter::PricingTableEmbeddedAdapter;
use pricing_table_fs_adapter::PricingTableFsAdapter;
use pricing_table_repository_trait::PricingTableRepository;

/// File-backed repository when an override path is configured, embedded otherwise.
pub fn pricing_repository(override_path: Option<&str>) -> Arc<dyn PricingTableRepository> {
    match override_path {
        Some(path) if !path.is_empty() => Arc::new(PricingTableFsAdapter::new(path)),
        _ => Arc::new(PricingTableEmbeddedAdapter),
    }
}
