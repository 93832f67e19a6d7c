//! # Geometry
//!
//! Converts the infeed / incline / discharge profile into incline length,
//! belt length and chain length.
//!
//! ```text
//!                        ___________ discharge
//!                       /
//!      incline length  /  height
//!                     /θ
//!   _________________/
//!        infeed
//! ```
//!
//! ## Formulas
//!
//! - incline length = h / sin θ
//! - incline run = h / tan θ (0 at θ = 90°)
//! - path length (ft) = (infeed + incline length + discharge) / 12
//! - belt length (ft) = 2 × path length (top run and return)
//! - chain length (in) = ⌈belt × 12 / p⌉ × p

use serde::{Deserialize, Serialize};

use crate::units::{Degrees, Feet, Inches};

/// Profile dimensions fed to the geometry calculator.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct GeometryInput {
    pub infeed_length_in: f64,
    pub discharge_height_in: f64,
    /// Incline angle, expected in [0, 90]
    pub incline_angle_deg: f64,
    pub discharge_length_in: f64,
    pub chain_pitch_in: f64,
}

/// Derived conveyor geometry.
///
/// ## JSON Example
///
/// ```json
/// {
///   "incline_length_in": 115.47,
///   "incline_run_in": 57.74,
///   "horizontal_length_in": 129.74,
///   "path_length_ft": 15.62,
///   "belt_length_ft": 31.25,
///   "chain_length_in": 375.0
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct GeometryResult {
    /// Sloped length of the incline section (in)
    pub incline_length_in: f64,
    /// Horizontal projection of the incline section (in)
    pub incline_run_in: f64,
    /// Overall footprint: infeed + incline run + discharge (in)
    pub horizontal_length_in: f64,
    /// One-way travel path (ft)
    pub path_length_ft: f64,
    /// Closed-loop belt length (ft)
    pub belt_length_ft: f64,
    /// Chain length rounded up to whole pitches (in)
    pub chain_length_in: f64,
}

/// Sloped incline length. Zero for the horizontal case.
pub fn incline_length_in(discharge_height_in: f64, angle: Degrees) -> f64 {
    if discharge_height_in == 0.0 || angle.0 == 0.0 {
        return 0.0;
    }
    if angle.0 == 90.0 {
        return discharge_height_in;
    }
    discharge_height_in / angle.sin()
}

/// Horizontal run of the incline. Zero when horizontal and at 90°.
pub fn incline_run_in(discharge_height_in: f64, angle: Degrees) -> f64 {
    if discharge_height_in == 0.0 || angle.0 == 0.0 || angle.0 == 90.0 {
        return 0.0;
    }
    discharge_height_in / angle.tan()
}

/// Round a belt length up to a whole number of chain pitches.
///
/// Never rounds down: a short chain cannot close the loop. A non-positive
/// pitch leaves the length unrounded.
pub fn chain_length_in(belt_length: Feet, chain_pitch_in: f64) -> f64 {
    let belt_in: Inches = belt_length.into();
    if chain_pitch_in <= 0.0 || belt_in.0 <= 0.0 {
        return belt_in.0.max(0.0);
    }
    (belt_in.0 / chain_pitch_in).ceil() * chain_pitch_in
}

/// Run the geometry calculator.
pub fn calculate(input: &GeometryInput) -> GeometryResult {
    let angle = Degrees(input.incline_angle_deg);
    let incline_length = incline_length_in(input.discharge_height_in, angle);
    let incline_run = incline_run_in(input.discharge_height_in, angle);

    let horizontal_length_in = input.infeed_length_in + incline_run + input.discharge_length_in;

    let path: Feet =
        Inches(input.infeed_length_in + incline_length + input.discharge_length_in).into();
    let belt = path * 2.0;

    GeometryResult {
        incline_length_in: incline_length,
        incline_run_in: incline_run,
        horizontal_length_in,
        path_length_ft: path.value(),
        belt_length_ft: belt.value(),
        chain_length_in: chain_length_in(belt, input.chain_pitch_in),
    }
}
