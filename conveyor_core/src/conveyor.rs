//! # Conveyor Calculation
//!
//! One call from a fully-populated [`ConveyorInput`] to a [`ConveyorOutput`].
//!
//! ## Pipeline
//!
//! ```text
//! parameters -> geometry -> magnets -> bar capacity (+ pattern)
//!            -> throughput -> loads -> drive -> validation
//! ```
//!
//! Every stage is a pure function. The output is fully reproducible from the
//! input and the [`CalculatorSettings`] in effect.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::conveyor::{calculate, ConveyorInput, ConveyorStyle};
//!
//! let input = ConveyorInput {
//!     label: "Lathe 4".to_string(),
//!     style: ConveyorStyle::B,
//!     infeed_length_in: 48.0,
//!     discharge_height_in: 100.0,
//!     incline_angle_deg: 60.0,
//!     discharge_length_in: 24.0,
//!     bar_width_in: 12.0,
//!     magnet_pitch_in: 12.0,
//!     belt_speed_fpm: 30.0,
//!     required_throughput_lbs_hr: 1000.0,
//!     ..Default::default()
//! };
//!
//! let output = calculate(&input);
//! assert!(output.is_valid());
//! assert!((output.incline_length_in - 115.47).abs() < 0.01);
//! ```

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::bars::catalog::STANDARD_MAGNET_LENGTH_IN;
use crate::bars::pattern::DEFAULT_INTERVAL;
use crate::bars::{
    aggregate_pattern_capacity, calculate_bar_capacity, compute_magnet_fit, BarCounts,
    MagnetMaterial, PatternConfig, PatternMode,
};
use crate::calculations::{drive, geometry, loads, magnets, throughput};
use crate::calculations::{GeometryInput, LoadInput, ThroughputInput};
use crate::materials::ConveyedLoad;
use crate::parameters::{resolve_parameters, ConveyorClass, ParameterOverrides};
use crate::settings::CalculatorSettings;
use crate::units::Degrees;
use crate::validation::{validate, ValidationMessage};

/// Template id of the primary bar inside a [`BarConfiguration`]
pub const PRIMARY_TEMPLATE_ID: &str = "primary";

/// Template id of the secondary bar inside a [`BarConfiguration`]
pub const SECONDARY_TEMPLATE_ID: &str = "secondary";

/// Conveyor profile.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConveyorStyle {
    /// Horizontal only
    A,
    /// Infeed, incline, discharge
    #[default]
    B,
    /// Incline and discharge, short infeed
    C,
    /// Infeed and incline, short discharge
    D,
}

impl ConveyorStyle {
    pub fn is_horizontal_only(self) -> bool {
        self == ConveyorStyle::A
    }
}

/// Magnet mix of the bars on the belt and how they repeat.
///
/// ## JSON Example
///
/// ```json
/// {
///   "primary": { "ceramic_count": 5, "rare_earth_count": 0 },
///   "secondary": { "ceramic_count": 0, "rare_earth_count": 4 },
///   "pattern": "Interval",
///   "interval_count": 4
/// }
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BarConfiguration {
    pub primary: BarCounts,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub secondary: Option<BarCounts>,
    #[serde(default)]
    pub pattern: PatternMode,
    #[serde(default = "default_interval")]
    pub interval_count: u32,
}

fn default_interval() -> u32 {
    DEFAULT_INTERVAL
}

impl BarConfiguration {
    /// Every bar identical
    pub fn uniform(primary: BarCounts) -> Self {
        BarConfiguration {
            primary,
            secondary: None,
            pattern: PatternMode::AllSame,
            interval_count: DEFAULT_INTERVAL,
        }
    }

    /// Pattern over the two template ids. An empty bar counts as absent.
    pub fn pattern_config(&self) -> PatternConfig {
        let primary = if self.primary.total() > 0 {
            PRIMARY_TEMPLATE_ID.to_string()
        } else {
            String::new()
        };
        PatternConfig {
            mode: self.pattern,
            primary_template_id: primary,
            secondary_template_id: self
                .secondary
                .filter(|counts| counts.total() > 0)
                .map(|_| SECONDARY_TEMPLATE_ID.to_string()),
            interval_count: self.interval_count,
        }
    }

    /// Counts behind a template id
    pub fn counts_for(&self, template_id: &str) -> Option<BarCounts> {
        match template_id {
            PRIMARY_TEMPLATE_ID => Some(self.primary),
            SECONDARY_TEMPLATE_ID => self.secondary,
            _ => None,
        }
    }
}

/// Everything needed to size one conveyor.
///
/// ## JSON Example
///
/// ```json
/// {
///   "label": "Lathe 4",
///   "style": "B",
///   "class": "Standard",
///   "infeed_length_in": 48.0,
///   "discharge_height_in": 100.0,
///   "incline_angle_deg": 60.0,
///   "discharge_length_in": 24.0,
///   "bar_width_in": 12.0,
///   "magnet_type": "Ceramic",
///   "magnet_pitch_in": 12.0,
///   "belt_speed_fpm": 30.0,
///   "required_throughput_lbs_hr": 1000.0,
///   "conveyed": { "material": "Steel", "chip_type": "Small" },
///   "coefficient_of_friction": 0.18,
///   "bar_configuration": { "primary": { "ceramic_count": 5 } }
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConveyorInput {
    /// User label (e.g., "Lathe 4")
    #[serde(default)]
    pub label: String,

    pub style: ConveyorStyle,

    #[serde(default)]
    pub class: ConveyorClass,

    // === Geometry ===
    pub infeed_length_in: f64,
    /// Forced to 0 for style A
    #[serde(default)]
    pub discharge_height_in: f64,
    /// Forced to 0 for style A, otherwise clamped to [0, 90]
    #[serde(default)]
    pub incline_angle_deg: f64,
    #[serde(default)]
    pub discharge_length_in: f64,

    // === Magnets ===
    pub bar_width_in: f64,
    #[serde(default)]
    pub magnet_type: MagnetMaterial,
    /// Spacing between bars along the belt
    pub magnet_pitch_in: f64,

    // === Operating ===
    pub belt_speed_fpm: f64,
    pub required_throughput_lbs_hr: f64,
    /// Used only by validation
    #[serde(default)]
    pub conveyed: ConveyedLoad,

    /// Per-call parameter overrides, flattened into the input object
    #[serde(flatten)]
    pub overrides: ParameterOverrides,

    /// Without it, throughput falls back to pass-through
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub bar_configuration: Option<BarConfiguration>,
}

impl ConveyorInput {
    /// Copy with the style invariants applied and lengths made non-negative.
    pub fn normalized(&self) -> ConveyorInput {
        let mut input = self.clone();
        if self.style.is_horizontal_only() {
            input.incline_angle_deg = 0.0;
            input.discharge_height_in = 0.0;
        } else {
            input.incline_angle_deg = Degrees(self.incline_angle_deg).clamp_incline().0;
            input.discharge_height_in = non_negative(self.discharge_height_in);
        }
        input.infeed_length_in = non_negative(self.infeed_length_in);
        input.discharge_length_in = non_negative(self.discharge_length_in);
        input.bar_width_in = non_negative(self.bar_width_in);
        input.belt_speed_fpm = non_negative(self.belt_speed_fpm);
        input.required_throughput_lbs_hr = non_negative(self.required_throughput_lbs_hr);
        input
    }
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

/// Full result of one conveyor calculation.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct ConveyorOutput {
    pub label: String,

    // === Geometry ===
    pub incline_length_in: f64,
    pub incline_run_in: f64,
    pub horizontal_length_in: f64,
    pub path_length_ft: f64,
    pub belt_length_ft: f64,
    pub chain_length_in: f64,

    // === Magnets ===
    pub magnet_weight_lb: f64,
    pub magnet_count: u32,
    pub total_magnet_weight_lb: f64,

    // === Bar Capacity ===
    /// Per-bar capacity fed to throughput (pattern average), 0 without a bar configuration
    pub bar_capacity_lb: f64,
    pub primary_bar_capacity_lb: f64,
    pub secondary_bar_capacity_lb: f64,
    /// Sum over every bar on the belt
    pub conveyor_capacity_lb: f64,
    pub primary_bar_count: u32,
    pub secondary_bar_count: u32,
    /// Standard 2" magnets that fit across one bar
    pub max_magnets_per_bar: u32,

    // === Throughput ===
    pub achieved_throughput_lbs_hr: f64,
    pub throughput_margin: f64,

    // === Loads ===
    pub weight_per_ft_lb: f64,
    pub friction_pull_lb: f64,
    pub gravity_pull_lb: f64,
    pub chip_load_lb: f64,
    pub total_load_lb: f64,

    // === Drive ===
    pub total_belt_pull_lb: f64,
    pub running_torque_inlb: f64,
    pub total_torque_inlb: f64,
    pub required_rpm: f64,
    pub suggested_gear_ratio: f64,

    // === Parameters Used ===
    pub chain_pitch_in: f64,
    pub chain_weight_lb_per_ft_used: f64,
    pub sprocket_pitch_diameter_in: f64,
    pub drive_lead_in: f64,
    pub coefficient_of_friction_used: f64,
    pub safety_factor_used: f64,
    pub starting_pull_lb_used: f64,
    pub motor_base_rpm: f64,
    pub drive_sprocket_teeth: u32,
    pub tail_sprocket_teeth: u32,

    // === Validation ===
    pub warnings: Vec<ValidationMessage>,
    pub errors: Vec<ValidationMessage>,
}

impl ConveyorOutput {
    /// True when validation produced no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

#[derive(Debug, Clone, Copy, Default)]
struct BarStage {
    bar_capacity_lb: f64,
    primary_bar_capacity_lb: f64,
    secondary_bar_capacity_lb: f64,
    conveyor_capacity_lb: f64,
    primary_bar_count: u32,
    secondary_bar_count: u32,
}

fn bar_stage(input: &ConveyorInput, bar_count: u32, settings: &CalculatorSettings) -> BarStage {
    let Some(config) = &input.bar_configuration else {
        return BarStage {
            primary_bar_count: bar_count,
            ..BarStage::default()
        };
    };

    let capacity_of = |counts: BarCounts| {
        calculate_bar_capacity(
            counts,
            input.bar_width_in,
            &settings.capacity_rates,
            &settings.saturation,
        )
        .capacity_lb
    };
    let primary_bar_capacity_lb = capacity_of(config.primary);
    let secondary_bar_capacity_lb = config.secondary.map(capacity_of).unwrap_or(0.0);

    let pattern = config.pattern_config();
    let aggregate = aggregate_pattern_capacity(&pattern, bar_count, |id| {
        config.counts_for(id).map(capacity_of)
    });

    let bar_capacity_lb = if bar_count > 0 {
        aggregate.average_capacity_lb
    } else {
        primary_bar_capacity_lb
    };

    BarStage {
        bar_capacity_lb,
        primary_bar_capacity_lb,
        secondary_bar_capacity_lb,
        conveyor_capacity_lb: aggregate.total_capacity_lb,
        primary_bar_count: aggregate.primary_count,
        secondary_bar_count: aggregate.secondary_count,
    }
}

/// Calculate with the default [`CalculatorSettings`].
pub fn calculate(input: &ConveyorInput) -> ConveyorOutput {
    calculate_with(input, &CalculatorSettings::default())
}

/// Calculate with explicit settings. Never fails; problems are reported in
/// the output's `warnings` and `errors`.
pub fn calculate_with(input: &ConveyorInput, settings: &CalculatorSettings) -> ConveyorOutput {
    let normalized = input.normalized();

    // === Parameters ===
    let params = resolve_parameters(normalized.class, &normalized.overrides);
    debug!(
        label = %input.label,
        class = ?normalized.class,
        overridden = !normalized.overrides.is_empty(),
        "parameters resolved"
    );

    // === Geometry ===
    let geo = geometry::calculate(&GeometryInput {
        infeed_length_in: normalized.infeed_length_in,
        discharge_height_in: normalized.discharge_height_in,
        incline_angle_deg: normalized.incline_angle_deg,
        discharge_length_in: normalized.discharge_length_in,
        chain_pitch_in: params.chain_pitch_in,
    });
    debug!(
        belt_length_ft = geo.belt_length_ft,
        chain_length_in = geo.chain_length_in,
        "geometry"
    );

    // === Magnets ===
    let mag = magnets::calculate(
        &settings.magnet_weight_fit,
        normalized.bar_width_in,
        geo.belt_length_ft,
        normalized.magnet_pitch_in,
    );
    debug!(magnet_count = mag.magnet_count, "magnets");

    // === Bar Capacity ===
    let bars = bar_stage(&normalized, mag.magnet_count, settings);
    let fit = compute_magnet_fit(
        normalized.bar_width_in,
        STANDARD_MAGNET_LENGTH_IN,
        settings.layout.gap_in,
        settings.layout.end_clearance_in,
    );
    debug!(bar_capacity_lb = bars.bar_capacity_lb, "bar capacity");

    // === Throughput (before loads: supplies chip load) ===
    let thru = throughput::calculate(&ThroughputInput {
        bar_count: mag.magnet_count,
        belt_speed_fpm: normalized.belt_speed_fpm,
        magnet_pitch_in: normalized.magnet_pitch_in,
        required_throughput_lbs_hr: normalized.required_throughput_lbs_hr,
        bar_capacity_lb: bars.bar_capacity_lb,
    });
    debug!(margin = thru.throughput_margin, "throughput");

    // === Loads ===
    let load = loads::calculate(&LoadInput {
        chain_weight_lb_per_ft: params.chain_weight_lb_per_ft,
        total_magnet_weight_lb: mag.total_magnet_weight_lb,
        belt_length_ft: geo.belt_length_ft,
        coefficient_of_friction: params.coefficient_of_friction,
        incline_length_in: geo.incline_length_in,
        incline_angle_deg: normalized.incline_angle_deg,
        chip_load_lb: thru.chip_load_lb,
    });

    // === Drive ===
    let drv = drive::calculate(&params, load.total_load_lb, normalized.belt_speed_fpm);
    debug!(
        total_load_lb = load.total_load_lb,
        total_torque_inlb = drv.total_torque_inlb,
        "loads and drive"
    );

    let mut output = ConveyorOutput {
        label: input.label.clone(),

        incline_length_in: geo.incline_length_in,
        incline_run_in: geo.incline_run_in,
        horizontal_length_in: geo.horizontal_length_in,
        path_length_ft: geo.path_length_ft,
        belt_length_ft: geo.belt_length_ft,
        chain_length_in: geo.chain_length_in,

        magnet_weight_lb: mag.magnet_weight_lb,
        magnet_count: mag.magnet_count,
        total_magnet_weight_lb: mag.total_magnet_weight_lb,

        bar_capacity_lb: bars.bar_capacity_lb,
        primary_bar_capacity_lb: bars.primary_bar_capacity_lb,
        secondary_bar_capacity_lb: bars.secondary_bar_capacity_lb,
        conveyor_capacity_lb: bars.conveyor_capacity_lb,
        primary_bar_count: bars.primary_bar_count,
        secondary_bar_count: bars.secondary_bar_count,
        max_magnets_per_bar: fit.count,

        achieved_throughput_lbs_hr: thru.achieved_throughput_lbs_hr,
        throughput_margin: thru.throughput_margin,

        weight_per_ft_lb: load.weight_per_ft_lb,
        friction_pull_lb: load.friction_pull_lb,
        gravity_pull_lb: load.gravity_pull_lb,
        chip_load_lb: load.chip_load_lb,
        total_load_lb: load.total_load_lb,

        total_belt_pull_lb: drv.total_belt_pull_lb,
        running_torque_inlb: drv.running_torque_inlb,
        total_torque_inlb: drv.total_torque_inlb,
        required_rpm: drv.required_rpm,
        suggested_gear_ratio: drv.suggested_gear_ratio,

        chain_pitch_in: params.chain_pitch_in,
        chain_weight_lb_per_ft_used: params.chain_weight_lb_per_ft,
        sprocket_pitch_diameter_in: params.sprocket_pitch_diameter_in,
        drive_lead_in: params.drive_lead_in,
        coefficient_of_friction_used: params.coefficient_of_friction,
        safety_factor_used: params.safety_factor,
        starting_pull_lb_used: params.starting_pull_lb,
        motor_base_rpm: params.motor_base_rpm,
        drive_sprocket_teeth: params.drive_sprocket_teeth,
        tail_sprocket_teeth: params.tail_sprocket_teeth,

        warnings: Vec::new(),
        errors: Vec::new(),
    };

    // === Validation ===
    let report = validate(input, &output, &settings.limits);
    debug!(
        messages = report.messages.len(),
        has_errors = report.has_errors(),
        "validation"
    );
    let (warnings, errors) = report.split();
    output.warnings = warnings;
    output.errors = errors;

    output
}
