//! # Magnet Quantity
//!
//! Bar count and magnet weight for a given belt length and bar pitch.
//!
//! Bar weight comes from a linear fit against catalog data. The fit
//! coefficients are a [`MagnetWeightFit`] value so they can be recalibrated
//! through [`crate::settings::CalculatorSettings`] without a code change.

use serde::{Deserialize, Serialize};

use crate::units::{Feet, Inches};

/// Intercept of the bar weight fit (lb)
pub const MAGNET_WEIGHT_INTERCEPT_LB: f64 = 0.22;

/// Slope of the bar weight fit (lb per inch of bar width)
pub const MAGNET_WEIGHT_SLOPE_LB_PER_IN: f64 = 0.50;

/// Linear fit: weight = intercept + width × slope
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MagnetWeightFit {
    pub intercept_lb: f64,
    pub slope_lb_per_in: f64,
}

impl Default for MagnetWeightFit {
    fn default() -> Self {
        MagnetWeightFit {
            intercept_lb: MAGNET_WEIGHT_INTERCEPT_LB,
            slope_lb_per_in: MAGNET_WEIGHT_SLOPE_LB_PER_IN,
        }
    }
}

impl MagnetWeightFit {
    /// Weight of one magnet bar (lb)
    pub fn weight_lb(&self, bar_width_in: f64) -> f64 {
        self.intercept_lb + bar_width_in * self.slope_lb_per_in
    }
}

/// Magnet loading along the belt.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct MagnetResult {
    /// Weight of one bar (lb)
    pub magnet_weight_lb: f64,
    /// Number of bars on the belt
    pub magnet_count: u32,
    /// All bars together (lb)
    pub total_magnet_weight_lb: f64,
}

/// Number of bars that fit on the belt.
///
/// One pitch is lost at the chain master link, hence the `- 1`. Pitch ≤ 0 or
/// a belt shorter than a pitch yields 0.
pub fn magnet_count(belt_length: Feet, magnet_pitch_in: f64) -> u32 {
    if magnet_pitch_in <= 0.0 || !magnet_pitch_in.is_finite() {
        return 0;
    }
    let belt_in: Inches = belt_length.into();
    let slots = (belt_in.0 / magnet_pitch_in).floor() - 1.0;
    if slots > 0.0 {
        slots as u32
    } else {
        0
    }
}

/// Run the magnet quantity calculator.
pub fn calculate(
    fit: &MagnetWeightFit,
    bar_width_in: f64,
    belt_length_ft: f64,
    magnet_pitch_in: f64,
) -> MagnetResult {
    let magnet_weight_lb = fit.weight_lb(bar_width_in);
    let count = magnet_count(Feet(belt_length_ft), magnet_pitch_in);

    MagnetResult {
        magnet_weight_lb,
        magnet_count: count,
        total_magnet_weight_lb: magnet_weight_lb * count as f64,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_weight_fit() {
        let fit = MagnetWeightFit::default();
        // 0.22 + 12 × 0.5 = 6.22
        assert!((fit.weight_lb(12.0) - 6.22).abs() < 1e-9);
    }

    #[test]
    fn test_count_subtracts_master_link_gap() {
        // 30 ft = 360 in / 12 in pitch = 30 slots, minus one
        assert_eq!(magnet_count(Feet(30.0), 12.0), 29);
        // Partial slot is floored
        assert_eq!(magnet_count(Feet(30.5), 12.0), 29);
    }

    #[test]
    fn test_count_never_negative() {
        assert_eq!(magnet_count(Feet(0.5), 12.0), 0);
        assert_eq!(magnet_count(Feet(1.0), 12.0), 0);
        assert_eq!(magnet_count(Feet(0.0), 12.0), 0);
    }

    #[test]
    fn test_non_positive_pitch_fits_nothing() {
        assert_eq!(magnet_count(Feet(30.0), 0.0), 0);
        assert_eq!(magnet_count(Feet(30.0), -6.0), 0);
    }

    #[test]
    fn test_total_weight() {
        let result = calculate(&MagnetWeightFit::default(), 12.0, 30.0, 12.0);
        assert_eq!(result.magnet_count, 29);
        assert!((result.total_magnet_weight_lb - 6.22 * 29.0).abs() < 1e-9);
    }
}
