use crate::core::util::quantity::BYTES_PER_GIB;

/// Average number of hours in a month (8760 / 12), used for every
/// hourly-to-monthly projection so estimates stay reproducible.
pub const HOURS_PER_MONTH: f64 = 730.0;

pub struct CostUtil;

impl CostUtil {
    #[inline]
    pub fn bytes_to_whole_gib(bytes: u64) -> u64 {
        bytes / BYTES_PER_GIB
    }

    /// Monthly cost of `count` units billed by the hour.
    #[inline]
    pub fn hourly_to_monthly(hourly_price: f64, count: u32) -> f64 {
        hourly_price * HOURS_PER_MONTH * f64::from(count)
    }

    /// Monthly cost of `size_gb` billed per GB-month.
    #[inline]
    pub fn capacity_to_monthly(price_per_gb_month: f64, size_gb: u64) -> f64 {
        price_per_gb_month * size_gb as f64
    }

    /// Share of `value` in `capacity` as a percentage. Zero capacity yields 0.
    #[inline]
    pub fn percent_of(value: u64, capacity: u64) -> f64 {
        if capacity == 0 {
            return 0.0;
        }
        value as f64 * 100.0 / capacity as f64
    }
}
