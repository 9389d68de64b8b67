//! Conversion of Kubernetes resource quantities into fixed-point integers.
//!
//! CPU is carried as millicores and memory/storage as bytes so that totals
//! accumulate without floating point drift. Fractional results are rounded
//! up, matching how the API server reports `MilliValue()` / `Value()`.

use k8s_openapi::apimachinery::pkg::api::resource::Quantity;
use std::collections::BTreeMap;
use tracing::debug;

pub const BYTES_PER_GIB: u64 = 1024 * 1024 * 1024;

/// Parse a quantity string into its value in base units (cores or bytes).
///
/// Accepts plain and fractional numbers, decimal SI suffixes
/// (`n`, `u`, `m`, `k`, `M`, `G`, `T`, `P`, `E`), binary suffixes
/// (`Ki` .. `Ei`) and exponent notation (`1e3`, `5E-2`).
pub fn parse_quantity(raw: &str) -> Option<f64> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }

    let split = s
        .find(|c: char| !(c.is_ascii_digit() || c == '.' || c == '+' || c == '-'))
        .unwrap_or(s.len());
    let (number, suffix) = s.split_at(split);
    let value: f64 = number.parse().ok()?;

    let multiplier = match suffix {
        "" => 1.0,
        "n" => 1e-9,
        "u" => 1e-6,
        "m" => 1e-3,
        "k" => 1e3,
        "M" => 1e6,
        "G" => 1e9,
        "T" => 1e12,
        "P" => 1e15,
        "E" => 1e18,
        "Ki" => 1024f64,
        "Mi" => 1024f64.powi(2),
        "Gi" => 1024f64.powi(3),
        "Ti" => 1024f64.powi(4),
        "Pi" => 1024f64.powi(5),
        "Ei" => 1024f64.powi(6),
        exp if exp.starts_with(['e', 'E']) => {
            let power: i32 = exp[1..].parse().ok()?;
            10f64.powi(power)
        }
        _ => return None,
    };

    let result = value * multiplier;
    result.is_finite().then_some(result)
}

// Ceiling that ignores float noise from suffix scaling ("100m" * 1000 must stay 100).
// Values beyond u64::MAX saturate (`as` casts from f64 clamp).
fn round_up(value: f64) -> u64 {
    let nearest = value.round();
    if (value - nearest).abs() <= nearest.abs() * 1e-12 + 1e-9 {
        nearest as u64
    } else {
        value.ceil() as u64
    }
}

/// CPU quantity in millicores. Unparseable or negative values count as zero;
/// values past `u64::MAX` millicores saturate.
pub fn cpu_millicores(quantity: &Quantity) -> u64 {
    match parse_quantity(&quantity.0) {
        Some(cores) if cores > 0.0 => round_up(cores * 1000.0),
        Some(_) => 0,
        None => {
            debug!("Ignoring unparseable CPU quantity '{}'", quantity.0);
            0
        }
    }
}

/// Memory or storage quantity in bytes. Unparseable or negative values count
/// as zero; values past `u64::MAX` bytes saturate.
pub fn bytes(quantity: &Quantity) -> u64 {
    match parse_quantity(&quantity.0) {
        Some(value) if value > 0.0 => round_up(value),
        Some(_) => 0,
        None => {
            debug!("Ignoring unparseable byte quantity '{}'", quantity.0);
            0
        }
    }
}

/// Look up `cpu` in a resource list and convert it to millicores.
pub fn cpu_from_map(map: Option<&BTreeMap<String, Quantity>>) -> u64 {
    map.and_then(|m| m.get("cpu")).map(cpu_millicores).unwrap_or(0)
}

/// Look up a byte-valued resource (`memory`, `storage`) in a resource list.
pub fn bytes_from_map(map: Option<&BTreeMap<String, Quantity>>, key: &str) -> u64 {
    map.and_then(|m| m.get(key)).map(bytes).unwrap_or(0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn q(s: &str) -> Quantity {
        Quantity(s.to_string())
    }

    #[test]
    fn test_cpu_millicores() {
        assert_eq!(cpu_millicores(&q("100m")), 100);
        assert_eq!(cpu_millicores(&q("1")), 1000);
        assert_eq!(cpu_millicores(&q("0.5")), 500);
        assert_eq!(cpu_millicores(&q("2.5")), 2500);
        assert_eq!(cpu_millicores(&q("500000000n")), 500);
        assert_eq!(cpu_millicores(&q("250000u")), 250);
        // sub-millicore usage rounds up like MilliValue()
        assert_eq!(cpu_millicores(&q("1n")), 1);
    }

    #[test]
    fn test_bytes() {
        assert_eq!(bytes(&q("128Mi")), 128 * 1024 * 1024);
        assert_eq!(bytes(&q("1Gi")), BYTES_PER_GIB);
        assert_eq!(bytes(&q("256Ki")), 256 * 1024);
        assert_eq!(bytes(&q("500M")), 500_000_000);
        assert_eq!(bytes(&q("1k")), 1000);
        assert_eq!(bytes(&q("1e3")), 1000);
        assert_eq!(bytes(&q("12345")), 12345);
    }

    #[test]
    fn test_garbage_counts_as_zero() {
        assert_eq!(cpu_millicores(&q("lots")), 0);
        assert_eq!(bytes(&q("10Xi")), 0);
        assert_eq!(bytes(&q("")), 0);
        assert_eq!(cpu_millicores(&q("-1")), 0);
    }

    #[test]
    fn test_out_of_range_quantities_saturate() {
        assert_eq!(bytes(&q("7Ei")), 7 * 1024u64.pow(6));
        assert_eq!(bytes(&q("100Ei")), u64::MAX);
        assert_eq!(cpu_millicores(&q("1e300")), u64::MAX);
    }

    #[test]
    fn test_map_lookup() {
        let map: BTreeMap<String, Quantity> =
            [("cpu".to_string(), q("250m")), ("memory".to_string(), q("1Gi"))].into();
        assert_eq!(cpu_from_map(Some(&map)), 250);
        assert_eq!(bytes_from_map(Some(&map), "memory"), BYTES_PER_GIB);
        assert_eq!(bytes_from_map(Some(&map), "storage"), 0);
        assert_eq!(cpu_from_map(None), 0);
    }
}
