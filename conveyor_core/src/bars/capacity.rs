//! Bar Capacity From Counts
//!
//! Removal capacity of one bar from its ceramic and rare-earth magnet counts:
//!
//! ```text
//! raw      = ceramic × C_ceramic + rare_earth × C_rare_earth
//! capacity = raw × saturation factor(width, rare_earth)
//! ```

use serde::{Deserialize, Serialize};

use super::catalog::{CERAMIC_CAPACITY_LB, RARE_EARTH_CAPACITY_LB};
use super::saturation::SaturationTable;

/// Per-magnet capacities, overridable for calibration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CapacityRates {
    pub ceramic_capacity_lb: f64,
    pub rare_earth_capacity_lb: f64,
}

impl Default for CapacityRates {
    fn default() -> Self {
        CapacityRates {
            ceramic_capacity_lb: CERAMIC_CAPACITY_LB,
            rare_earth_capacity_lb: RARE_EARTH_CAPACITY_LB,
        }
    }
}

/// Magnet mix on one bar
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct BarCounts {
    #[serde(default)]
    pub ceramic_count: u32,
    #[serde(default)]
    pub rare_earth_count: u32,
}

impl BarCounts {
    pub fn new(ceramic_count: u32, rare_earth_count: u32) -> Self {
        BarCounts {
            ceramic_count,
            rare_earth_count,
        }
    }

    pub fn total(&self) -> u32 {
        self.ceramic_count + self.rare_earth_count
    }
}

/// Capacity breakdown for one bar.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BarCapacity {
    /// Linear sum of magnet capacities (lb)
    pub raw_capacity_lb: f64,
    pub saturation_factor: f64,
    /// raw × factor (lb)
    pub capacity_lb: f64,
}

/// Capacity of one bar with explicit rates and saturation table.
pub fn calculate_bar_capacity(
    counts: BarCounts,
    bar_width_in: f64,
    rates: &CapacityRates,
    saturation: &SaturationTable,
) -> BarCapacity {
    let raw_capacity_lb = counts.ceramic_count as f64 * rates.ceramic_capacity_lb
        + counts.rare_earth_count as f64 * rates.rare_earth_capacity_lb;
    let saturation_factor =
        saturation.factor(bar_width_in, counts.ceramic_count, counts.rare_earth_count);

    BarCapacity {
        raw_capacity_lb,
        saturation_factor,
        capacity_lb: raw_capacity_lb * saturation_factor,
    }
}

/// Capacity of one bar (lb) using the default rates and table.
///
/// ```rust
/// use conveyor_core::bars::calculate_bar_capacity_from_counts;
///
/// let ceramic = calculate_bar_capacity_from_counts(3, 0, 12.0);
/// assert!((ceramic - 0.362).abs() < 0.362 * 0.05);
/// ```
pub fn calculate_bar_capacity_from_counts(
    ceramic_count: u32,
    rare_earth_count: u32,
    bar_width_in: f64,
) -> f64 {
    calculate_bar_capacity(
        BarCounts::new(ceramic_count, rare_earth_count),
        bar_width_in,
        &CapacityRates::default(),
        &SaturationTable::default(),
    )
    .capacity_lb
}
