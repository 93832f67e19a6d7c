//! # Throughput
//!
//! Achieved removal rate and margin against the requested rate. Also
//! produces the chip load consumed by [`super::loads`], which is why this
//! calculator runs before the load calculator in the pipeline.

use serde::{Deserialize, Serialize};

/// Inputs to the throughput calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ThroughputInput {
    pub bar_count: u32,
    pub belt_speed_fpm: f64,
    pub magnet_pitch_in: f64,
    pub required_throughput_lbs_hr: f64,
    /// Removal capacity of one bar (lb). 0 when no bar configuration is known.
    pub bar_capacity_lb: f64,
}

/// Throughput outputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ThroughputResult {
    /// Mass resting on the belt at any instant (lb)
    pub chip_load_lb: f64,
    pub achieved_throughput_lbs_hr: f64,
    /// achieved / required
    pub throughput_margin: f64,
}

/// Run the throughput calculator.
///
/// Without a bar capacity the requested rate is passed through with a margin
/// of 1.0. Configurations that predate bar capacities depend on this.
pub fn calculate(input: &ThroughputInput) -> ThroughputResult {
    if input.bar_capacity_lb <= 0.0 {
        return ThroughputResult {
            chip_load_lb: 0.0,
            achieved_throughput_lbs_hr: input.required_throughput_lbs_hr,
            throughput_margin: if input.required_throughput_lbs_hr > 0.0 { 1.0 } else { 0.0 },
        };
    }

    let bars = input.bar_count as f64;
    // Half the removable mass is resting load at any instant
    let chip_load_lb = input.bar_capacity_lb * bars / 2.0;

    let achieved_throughput_lbs_hr = if input.magnet_pitch_in > 0.0 {
        input.bar_capacity_lb * bars * input.belt_speed_fpm * 60.0 / input.magnet_pitch_in
    } else {
        0.0
    };

    let throughput_margin = if input.required_throughput_lbs_hr > 0.0 {
        achieved_throughput_lbs_hr / input.required_throughput_lbs_hr
    } else {
        0.0
    };

    ThroughputResult {
        chip_load_lb,
        achieved_throughput_lbs_hr,
        throughput_margin,
    }
}
