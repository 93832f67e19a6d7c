//! # Drive
//!
//! Torque, shaft speed and suggested reduction. Motor horsepower and gearbox
//! selection are left to the caller.

use serde::{Deserialize, Serialize};

use crate::parameters::PhysicalParameters;
use crate::units::{FeetPerMinute, Inches, Pounds};

/// Drive outputs.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct DriveResult {
    /// Starting pull + total load (lb)
    pub total_belt_pull_lb: f64,
    /// Pull × pitch radius (in-lb)
    pub running_torque_inlb: f64,
    /// Running torque × safety factor (in-lb)
    pub total_torque_inlb: f64,
    pub required_rpm: f64,
    pub suggested_gear_ratio: f64,
}

/// Shaft speed needed to move the belt at `belt_speed`. 0 if lead ≤ 0.
pub fn required_rpm(belt_speed: FeetPerMinute, drive_lead_in: f64) -> f64 {
    if drive_lead_in <= 0.0 {
        return 0.0;
    }
    belt_speed.inches_per_minute().0 / drive_lead_in
}

/// Motor-to-shaft reduction. 0 if the shaft does not need to turn.
pub fn gear_ratio(motor_base_rpm: f64, required_rpm: f64) -> f64 {
    if required_rpm <= 0.0 {
        return 0.0;
    }
    motor_base_rpm / required_rpm
}

/// Run the drive calculator.
pub fn calculate(
    params: &PhysicalParameters,
    total_load_lb: f64,
    belt_speed_fpm: f64,
) -> DriveResult {
    let pull = Pounds(params.starting_pull_lb + total_load_lb);
    let running = pull.at_radius(Inches(params.sprocket_pitch_diameter_in / 2.0));
    let total = running * params.safety_factor;

    let rpm = required_rpm(FeetPerMinute(belt_speed_fpm), params.drive_lead_in);

    DriveResult {
        total_belt_pull_lb: pull.value(),
        running_torque_inlb: running.value(),
        total_torque_inlb: total.value(),
        required_rpm: rpm,
        suggested_gear_ratio: gear_ratio(params.motor_base_rpm, rpm),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::{HEAVY_DUTY_PARAMETERS, STANDARD_PARAMETERS};

    #[test]
    fn test_standard_drive() {
        let result = calculate(&STANDARD_PARAMETERS, 50.0, 30.0);
        assert!((result.total_belt_pull_lb - 150.0).abs() < 1e-9);
        // 150 × 4.81 / 2 = 360.75
        assert!((result.running_torque_inlb - 360.75).abs() < 1e-9);
        assert!((result.total_torque_inlb - 721.5).abs() < 1e-9);
        // 30 × 12 / 15 = 24 rpm
        assert!((result.required_rpm - 24.0).abs() < 1e-9);
        // 1750 / 24 = 72.92
        assert!((result.suggested_gear_ratio - 72.9167).abs() < 1e-3);
    }

    #[test]
    fn test_heavy_duty_safety_factor() {
        let result = calculate(&HEAVY_DUTY_PARAMETERS, 0.0, 18.0);
        let expected_running = 150.0 * 5.796 / 2.0;
        assert!((result.total_torque_inlb - expected_running * 2.5).abs() < 1e-9);
        assert!((result.required_rpm - 12.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_speed_and_lead() {
        assert_eq!(required_rpm(FeetPerMinute(30.0), 0.0), 0.0);
        assert_eq!(gear_ratio(1750.0, 0.0), 0.0);

        let result = calculate(&STANDARD_PARAMETERS, 10.0, 0.0);
        assert_eq!(result.required_rpm, 0.0);
        assert_eq!(result.suggested_gear_ratio, 0.0);
    }
}
