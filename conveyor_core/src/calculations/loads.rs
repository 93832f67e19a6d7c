//! # Belt Loads
//!
//! Friction and gravity pull on the belt.
//!
//! ```text
//! w        = chain weight + magnet weight / belt length     (lb/ft)
//! friction = w × belt length × μ
//! gravity  = incline length (ft) × w × sin θ
//! total    = friction + gravity + chip load
//! ```

use serde::{Deserialize, Serialize};

use crate::units::{Degrees, Feet, Inches};

/// Inputs to the load calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct LoadInput {
    pub chain_weight_lb_per_ft: f64,
    pub total_magnet_weight_lb: f64,
    pub belt_length_ft: f64,
    pub coefficient_of_friction: f64,
    pub incline_length_in: f64,
    pub incline_angle_deg: f64,
    /// From the throughput calculator
    pub chip_load_lb: f64,
}

/// Load outputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct LoadResult {
    pub weight_per_ft_lb: f64,
    pub friction_pull_lb: f64,
    pub gravity_pull_lb: f64,
    pub chip_load_lb: f64,
    pub total_load_lb: f64,
}

/// Moving weight per foot of belt. Falls back to chain weight alone when the
/// belt length is not positive.
pub fn weight_per_ft(
    chain_weight_lb_per_ft: f64,
    total_magnet_weight_lb: f64,
    belt_length_ft: f64,
) -> f64 {
    if belt_length_ft <= 0.0 {
        return chain_weight_lb_per_ft;
    }
    chain_weight_lb_per_ft + total_magnet_weight_lb / belt_length_ft
}

/// Pull needed to lift the incline section. Zero on the horizontal.
pub fn gravity_pull_lb(incline_length_in: f64, weight_per_ft_lb: f64, angle: Degrees) -> f64 {
    if angle.0 == 0.0 || incline_length_in == 0.0 {
        return 0.0;
    }
    let incline: Feet = Inches(incline_length_in).into();
    incline.0 * weight_per_ft_lb * angle.sin()
}

/// Run the load calculator.
pub fn calculate(input: &LoadInput) -> LoadResult {
    let w = weight_per_ft(
        input.chain_weight_lb_per_ft,
        input.total_magnet_weight_lb,
        input.belt_length_ft,
    );
    let friction_pull_lb = w * input.belt_length_ft * input.coefficient_of_friction;
    let gravity_pull_lb =
        gravity_pull_lb(input.incline_length_in, w, Degrees(input.incline_angle_deg));

    LoadResult {
        weight_per_ft_lb: w,
        friction_pull_lb,
        gravity_pull_lb,
        chip_load_lb: input.chip_load_lb,
        total_load_lb: friction_pull_lb + gravity_pull_lb + input.chip_load_lb,
    }
}
