//! Saturation Correction
//!
//! When many rare-earth magnets sit close together on a bar their fields
//! interfere and the bar holds less than the linear sum of its magnets. The
//! correction is an empirical factor (≤ 1.0) read from a table keyed by bar
//! width and rare-earth count.
//!
//! ## Lookup Rules
//!
//! - Applies only when rare-earth count > threshold (3) **and** there are no
//!   ceramic magnets. Mixed bars do not saturate.
//! - Widths between rows are linearly interpolated.
//! - Widths outside the table clamp to the first/last row.
//! - Counts above the last column extrapolate linearly with a decay rate
//!   scaled by `reference_width / width`, floored at `min_factor`.
//!
//! Wider bars spread the same magnets out, so for a fixed count the factor
//! never decreases with width.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::bars::SaturationTable;
//!
//! let table = SaturationTable::default();
//! assert_eq!(table.factor(12.0, 0, 3), 1.0);
//! assert_eq!(table.factor(12.0, 2, 6), 1.0);
//! assert!((table.factor(12.0, 0, 4) - 0.884).abs() < 1e-9);
//! ```

use serde::{Deserialize, Serialize};

/// Rare-earth counts at or below this never saturate
pub const SATURATION_THRESHOLD: u32 = 3;

/// Bar widths of the reference table (in)
const TABLE_WIDTHS_IN: [f64; 8] = [6.0, 8.0, 10.0, 12.0, 15.0, 18.0, 24.0, 30.0];

/// First rare-earth count tabulated
const TABLE_FIRST_COUNT: u32 = 4;

/// Factors per width row, for rare-earth counts 4 through 8
const TABLE_FACTORS: [[f64; 5]; 8] = [
    [0.800, 0.740, 0.690, 0.645, 0.605], // 6"
    [0.830, 0.775, 0.725, 0.680, 0.640], // 8"
    [0.860, 0.805, 0.755, 0.710, 0.670], // 10"
    [0.884, 0.830, 0.780, 0.735, 0.695], // 12"
    [0.905, 0.855, 0.808, 0.765, 0.725], // 15"
    [0.925, 0.878, 0.835, 0.795, 0.757], // 18"
    [0.950, 0.910, 0.872, 0.836, 0.802], // 24"
    [0.965, 0.930, 0.897, 0.865, 0.835], // 30"
];

/// Two-dimensional saturation lookup with interpolation and extrapolation.
///
/// Serializable so a recalibrated table can be loaded through
/// [`crate::settings::CalculatorSettings`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SaturationTable {
    /// Rare-earth count at or below which no correction applies
    pub threshold: u32,
    /// Row keys, strictly increasing (in)
    pub widths_in: Vec<f64>,
    /// Rare-earth count of the first column
    pub first_count: u32,
    /// `factors[row][col]`, one row per width
    pub factors: Vec<Vec<f64>>,
    /// Extrapolation decay per extra magnet at `reference_width_in`
    pub decay_per_magnet: f64,
    pub reference_width_in: f64,
    /// Extrapolation never goes below this
    pub min_factor: f64,
}

impl Default for SaturationTable {
    fn default() -> Self {
        SaturationTable {
            threshold: SATURATION_THRESHOLD,
            widths_in: TABLE_WIDTHS_IN.to_vec(),
            first_count: TABLE_FIRST_COUNT,
            factors: TABLE_FACTORS.iter().map(|row| row.to_vec()).collect(),
            decay_per_magnet: 0.04,
            reference_width_in: 12.0,
            min_factor: 0.25,
        }
    }
}

impl SaturationTable {
    /// Whether the correction applies at all for this magnet mix
    pub fn applies(&self, ceramic_count: u32, rare_earth_count: u32) -> bool {
        ceramic_count == 0 && rare_earth_count > self.threshold
    }

    /// Correction factor for a bar. Always in (0, 1].
    pub fn factor(&self, bar_width_in: f64, ceramic_count: u32, rare_earth_count: u32) -> f64 {
        if !self.applies(ceramic_count, rare_earth_count) || self.widths_in.is_empty() {
            return 1.0;
        }
        self.lookup(bar_width_in, rare_earth_count).clamp(0.0, 1.0)
    }

    /// Raw table lookup for a rare-earth count above the threshold.
    pub fn lookup(&self, bar_width_in: f64, rare_earth_count: u32) -> f64 {
        let width = self.clamp_width(bar_width_in);
        let last_col = self.last_column();
        let last_count = self.first_count + last_col as u32;

        let col = rare_earth_count.saturating_sub(self.first_count).min(last_col as u32) as usize;
        let tabulated = self.interpolate_column(width, col);

        if rare_earth_count <= last_count {
            return tabulated;
        }

        let extra = (rare_earth_count - last_count) as f64;
        (tabulated - self.decay_rate(width) * extra).max(self.min_factor)
    }

    /// Width-scaled extrapolation decay. Narrower bars decay faster.
    pub fn decay_rate(&self, bar_width_in: f64) -> f64 {
        let width = self.clamp_width(bar_width_in);
        if width <= 0.0 {
            return self.decay_per_magnet;
        }
        self.decay_per_magnet * self.reference_width_in / width
    }

    fn clamp_width(&self, bar_width_in: f64) -> f64 {
        let (Some(&min), Some(&max)) = (self.widths_in.first(), self.widths_in.last()) else {
            return bar_width_in;
        };
        if bar_width_in.is_nan() {
            return min;
        }
        bar_width_in.clamp(min, max)
    }

    fn last_column(&self) -> usize {
        self.factors
            .iter()
            .map(|row| row.len())
            .min()
            .unwrap_or(0)
            .saturating_sub(1)
    }

    fn cell(&self, row: usize, col: usize) -> f64 {
        self.factors
            .get(row)
            .and_then(|r| r.get(col))
            .copied()
            .unwrap_or(1.0)
    }

    /// Linear interpolation down one column at an already-clamped width.
    fn interpolate_column(&self, width: f64, col: usize) -> f64 {
        let widths = &self.widths_in;
        for i in 0..widths.len().saturating_sub(1) {
            let (w0, w1) = (widths[i], widths[i + 1]);
            if width >= w0 && width <= w1 {
                let (f0, f1) = (self.cell(i, col), self.cell(i + 1, col));
                if w1 == w0 {
                    return f0;
                }
                let t = (width - w0) / (w1 - w0);
                return f0 + t * (f1 - f0);
            }
        }
        // Single-row table, or width sitting exactly on the only key
        self.cell(0, col)
    }
}
