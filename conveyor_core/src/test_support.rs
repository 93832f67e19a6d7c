//! Shared fixtures for unit tests.

use crate::conveyor::{ConveyorInput, ConveyorStyle};
use crate::parameters::ConveyorClass;

/// Standard-class style B conveyor that validates cleanly.
pub fn style_b_input() -> ConveyorInput {
    ConveyorInput {
        label: "B-1".to_string(),
        style: ConveyorStyle::B,
        class: ConveyorClass::Standard,
        infeed_length_in: 48.0,
        discharge_height_in: 100.0,
        incline_angle_deg: 60.0,
        discharge_length_in: 24.0,
        bar_width_in: 12.0,
        magnet_pitch_in: 12.0,
        belt_speed_fpm: 30.0,
        required_throughput_lbs_hr: 1000.0,
        ..Default::default()
    }
}
