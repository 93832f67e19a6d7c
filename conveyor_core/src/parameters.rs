//! # Physical Parameters
//!
//! Class-dependent physical constants (chain, sprockets, friction, safety
//! factor) and the resolver that merges them with per-call overrides.
//!
//! Two canonical sets exist, one per [`ConveyorClass`]. They are `const`
//! values and are never mutated; [`resolve_parameters`] always builds a fresh
//! [`PhysicalParameters`] for the caller.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::parameters::{resolve_parameters, ConveyorClass, ParameterOverrides};
//!
//! let overrides = ParameterOverrides {
//!     coefficient_of_friction: Some(0.0),
//!     ..Default::default()
//! };
//! let params = resolve_parameters(ConveyorClass::Standard, &overrides);
//!
//! // A zero override is honored, not treated as "absent"
//! assert_eq!(params.coefficient_of_friction, 0.0);
//! assert_eq!(params.safety_factor, 2.0);
//! ```

use serde::{Deserialize, Serialize};

/// Conveyor duty class. Selects chain, sprocket, friction and safety defaults.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConveyorClass {
    #[default]
    Standard,
    HeavyDuty,
}

impl ConveyorClass {
    /// Canonical parameter set for this class
    pub fn defaults(self) -> &'static PhysicalParameters {
        match self {
            ConveyorClass::Standard => &STANDARD_PARAMETERS,
            ConveyorClass::HeavyDuty => &HEAVY_DUTY_PARAMETERS,
        }
    }
}

/// Complete set of physical constants used by one calculation.
///
/// ## JSON Example
///
/// ```json
/// {
///   "chain_pitch_in": 1.0,
///   "chain_weight_lb_per_ft": 2.0,
///   "sprocket_pitch_diameter_in": 4.81,
///   "drive_lead_in": 15.0,
///   "coefficient_of_friction": 0.2,
///   "safety_factor": 2.0,
///   "starting_pull_lb": 100.0,
///   "motor_base_rpm": 1750.0,
///   "drive_sprocket_teeth": 15,
///   "tail_sprocket_teeth": 15
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PhysicalParameters {
    /// Drive chain link pitch (in)
    pub chain_pitch_in: f64,

    /// Chain unit weight (lb/ft)
    pub chain_weight_lb_per_ft: f64,

    /// Drive sprocket pitch diameter (in)
    pub sprocket_pitch_diameter_in: f64,

    /// Chain travel per drive shaft revolution (in)
    pub drive_lead_in: f64,

    /// Sliding friction coefficient of the belt on the bed
    pub coefficient_of_friction: f64,

    /// Multiplier applied to running torque
    pub safety_factor: f64,

    /// Breakaway pull before the belt moves (lb)
    pub starting_pull_lb: f64,

    /// Nominal motor speed before reduction (rpm)
    pub motor_base_rpm: f64,

    /// Drive sprocket tooth count
    pub drive_sprocket_teeth: u32,

    /// Tail sprocket tooth count
    pub tail_sprocket_teeth: u32,
}

/// Standard-class defaults: #80-style 1" pitch chain on 15T sprockets.
pub const STANDARD_PARAMETERS: PhysicalParameters = PhysicalParameters {
    chain_pitch_in: 1.0,
    chain_weight_lb_per_ft: 2.0,
    sprocket_pitch_diameter_in: 4.810,
    drive_lead_in: 15.0,
    coefficient_of_friction: 0.20,
    safety_factor: 2.0,
    starting_pull_lb: 100.0,
    motor_base_rpm: 1750.0,
    drive_sprocket_teeth: 15,
    tail_sprocket_teeth: 15,
};

/// Heavy-Duty defaults: 1.5" pitch chain on 12T sprockets.
pub const HEAVY_DUTY_PARAMETERS: PhysicalParameters = PhysicalParameters {
    chain_pitch_in: 1.5,
    chain_weight_lb_per_ft: 3.6,
    sprocket_pitch_diameter_in: 5.796,
    drive_lead_in: 18.0,
    coefficient_of_friction: 0.25,
    safety_factor: 2.5,
    starting_pull_lb: 150.0,
    motor_base_rpm: 1750.0,
    drive_sprocket_teeth: 12,
    tail_sprocket_teeth: 12,
};

/// Optional per-call replacements for individual parameters.
///
/// Only these four fields can be overridden. `Some(0.0)` is a real override.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ParameterOverrides {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coefficient_of_friction: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub safety_factor: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub starting_pull_lb: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub chain_weight_lb_per_ft: Option<f64>,
}

impl ParameterOverrides {
    /// True when no field is overridden
    pub fn is_empty(&self) -> bool {
        self.coefficient_of_friction.is_none()
            && self.safety_factor.is_none()
            && self.starting_pull_lb.is_none()
            && self.chain_weight_lb_per_ft.is_none()
    }
}

/// Merge class defaults with overrides into a new parameter set.
///
/// Never fails. The canonical tables are copied, not mutated.
pub fn resolve_parameters(
    class: ConveyorClass,
    overrides: &ParameterOverrides,
) -> PhysicalParameters {
    let base = *class.defaults();
    PhysicalParameters {
        coefficient_of_friction: overrides
            .coefficient_of_friction
            .unwrap_or(base.coefficient_of_friction),
        safety_factor: overrides.safety_factor.unwrap_or(base.safety_factor),
        starting_pull_lb: overrides.starting_pull_lb.unwrap_or(base.starting_pull_lb),
        chain_weight_lb_per_ft: overrides
            .chain_weight_lb_per_ft
            .unwrap_or(base.chain_weight_lb_per_ft),
        ..base
    }
}
