use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Read-only price reference for one run.
///
/// - `ec2_pricing`: instance type → hourly price
/// - `ebs_pricing`: volume type → price per GB-month
/// - `lb_pricing`: load balancer type → hourly price
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PricingTable {
    #[serde(default)]
    pub ec2_pricing: HashMap<String, f64>,
    #[serde(default)]
    pub ebs_pricing: HashMap<String, f64>,
    #[serde(default)]
    pub lb_pricing: HashMap<String, f64>,
}

#[derive(Debug, Error)]
pub enum PricingError {
    #[error("failed to read pricing file {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid pricing table: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("{table}[{key}] has invalid price {price}")]
    InvalidPrice {
        table: &'static str,
        key: String,
        price: f64,
    },
}

impl PricingTable {
    pub fn from_json(raw: &str) -> Result<Self, PricingError> {
        let table: PricingTable = serde_json::from_str(raw)?;
        table.validate()?;
        Ok(table)
    }

    /// Reject negative or non-finite prices.
    pub fn validate(&self) -> Result<(), PricingError> {
        let tables = [
            ("ec2_pricing", &self.ec2_pricing),
            ("ebs_pricing", &self.ebs_pricing),
            ("lb_pricing", &self.lb_pricing),
        ];

        for (table, prices) in tables {
            if let Some((key, &price)) = prices.iter().find(|(_, p)| !p.is_finite() || **p < 0.0) {
                return Err(PricingError::InvalidPrice {
                    table,
                    key: key.clone(),
                    price,
                });
            }
        }
        Ok(())
    }

    pub fn instance_hourly(&self, instance_type: &str) -> Option<f64> {
        self.ec2_pricing.get(instance_type).copied()
    }

    pub fn volume_gb_monthly(&self, volume_type: &str) -> Option<f64> {
        self.ebs_pricing.get(volume_type).copied()
    }

    pub fn load_balancer_hourly(&self, lb_type: &str) -> Option<f64> {
        self.lb_pricing.get(lb_type).copied()
    }
}
