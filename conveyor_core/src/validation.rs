//! # Validation
//!
//! Domain rules checked against a conveyor input and its computed output.
//!
//! Validation is a pure function of `(input, output, limits)` and returns an
//! ordered, deterministic list of [`ValidationMessage`]s. Rules run in a
//! fixed order and each `(code, field)` pair is reported at most once.
//!
//! - **Errors** mean the configuration cannot work as specified (non-magnetic
//!   material, an inclined style with no incline, a bar that cannot hold its
//!   magnets). A result is valid when it has zero errors.
//! - **Warnings** are advisory (speed, chip shape, suggest Heavy-Duty) and
//!   never make a result unusable.

use serde::{Deserialize, Serialize};

use crate::bars::{BarCounts, MagnetMaterial, PatternIssue};
use crate::conveyor::{ConveyorInput, ConveyorOutput};
use crate::parameters::ConveyorClass;

/// Stable message codes.
pub mod codes {
    pub const MATERIAL_NOT_MAGNETIC: &str = "MATERIAL_NOT_MAGNETIC";
    pub const INCLINE_HEIGHT_REQUIRED: &str = "INCLINE_HEIGHT_REQUIRED";
    pub const INCLINE_ANGLE_REQUIRED: &str = "INCLINE_ANGLE_REQUIRED";
    pub const ANGLE_OUT_OF_RANGE: &str = "ANGLE_OUT_OF_RANGE";
    pub const MAGNET_PITCH_INVALID: &str = "MAGNET_PITCH_INVALID";
    pub const INFEED_SHORT: &str = "INFEED_SHORT";
    pub const BELT_SPEED_HIGH: &str = "BELT_SPEED_HIGH";
    pub const CHIP_BRIDGING: &str = "CHIP_BRIDGING";
    pub const TEMPERATURE_ELEVATED: &str = "TEMPERATURE_ELEVATED";
    pub const FLUID_OIL: &str = "FLUID_OIL";
    pub const SUGGEST_HEAVY_DUTY: &str = "SUGGEST_HEAVY_DUTY";
    pub const CHAIN_LENGTH_HEAVY_DUTY: &str = "CHAIN_LENGTH_HEAVY_DUTY";
    pub const THROUGHPUT_UNDERSIZED: &str = "THROUGHPUT_UNDERSIZED";
    pub const MAGNET_TYPE_MISMATCH: &str = "MAGNET_TYPE_MISMATCH";
    pub const BAR_OVERFILLED: &str = "BAR_OVERFILLED";
    pub const PATTERN_PRIMARY_MISSING: &str = "PATTERN_PRIMARY_MISSING";
    pub const PATTERN_SECONDARY_MISSING: &str = "PATTERN_SECONDARY_MISSING";
    pub const PATTERN_INTERVAL_CLAMPED: &str = "PATTERN_INTERVAL_CLAMPED";
    pub const PATTERN_TEMPLATE_MISSING: &str = "PATTERN_TEMPLATE_MISSING";
}

/// Message severity
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Severity {
    Warning,
    Error,
}

/// One validation finding.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationMessage {
    pub severity: Severity,
    pub code: String,
    pub message: String,
    /// Input or output field the finding is about
    pub field: String,
}

/// Thresholds for the advisory rules.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationLimits {
    /// Below this infeed, custom tail tracks are needed (in)
    pub min_infeed_in: f64,
    pub max_belt_speed_fpm: f64,
    /// Standard-class bar width above which Heavy-Duty is suggested (in)
    pub heavy_duty_bar_width_in: f64,
    /// Standard-class requested load above which Heavy-Duty is suggested (lb/hr)
    pub heavy_duty_throughput_lbs_hr: f64,
    /// Standard-class discharge height above which Heavy-Duty is suggested (in)
    pub heavy_duty_discharge_height_in: f64,
    /// Standard-class chain length above which Heavy-Duty is suggested (in)
    pub heavy_duty_chain_length_in: f64,
    pub min_margin_chips: f64,
    pub min_margin_parts: f64,
}

impl Default for ValidationLimits {
    fn default() -> Self {
        ValidationLimits {
            min_infeed_in: 18.0,
            max_belt_speed_fpm: 60.0,
            heavy_duty_bar_width_in: 24.0,
            heavy_duty_throughput_lbs_hr: 2500.0,
            heavy_duty_discharge_height_in: 150.0,
            heavy_duty_chain_length_in: 1200.0,
            min_margin_chips: 1.5,
            min_margin_parts: 1.25,
        }
    }
}

/// Ordered message list with per-`(code, field)` de-duplication.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ValidationReport {
    pub messages: Vec<ValidationMessage>,
}

impl ValidationReport {
    fn push(&mut self, severity: Severity, code: &str, field: &str, message: String) {
        let duplicate = self
            .messages
            .iter()
            .any(|m| m.code == code && m.field == field);
        if duplicate {
            return;
        }
        self.messages.push(ValidationMessage {
            severity,
            code: code.to_string(),
            message,
            field: field.to_string(),
        });
    }

    pub fn warn(&mut self, code: &str, field: &str, message: impl Into<String>) {
        self.push(Severity::Warning, code, field, message.into());
    }

    pub fn error(&mut self, code: &str, field: &str, message: impl Into<String>) {
        self.push(Severity::Error, code, field, message.into());
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.severity == Severity::Error)
    }

    /// Split into (warnings, errors), preserving order
    pub fn split(self) -> (Vec<ValidationMessage>, Vec<ValidationMessage>) {
        self.messages
            .into_iter()
            .partition(|m| m.severity == Severity::Warning)
    }
}

/// Run every rule. Deterministic: identical arguments give identical output.
pub fn validate(
    input: &ConveyorInput,
    output: &ConveyorOutput,
    limits: &ValidationLimits,
) -> ValidationReport {
    let mut report = ValidationReport::default();

    check_material(input, &mut report);
    check_style(input, &mut report);
    check_numeric_domain(input, &mut report);
    check_operating(input, limits, &mut report);
    check_heavy_duty(input, output, limits, &mut report);
    check_bar_configuration(input, output, &mut report);
    check_margin(input, output, limits, &mut report);

    report
}

fn check_material(input: &ConveyorInput, report: &mut ValidationReport) {
    if !input.conveyed.material.is_magnetic() {
        report.error(
            codes::MATERIAL_NOT_MAGNETIC,
            "conveyed.material",
            format!("{:?} cannot be held by a magnetic conveyor", input.conveyed.material),
        );
    }
}

fn check_style(input: &ConveyorInput, report: &mut ValidationReport) {
    if input.style.is_horizontal_only() {
        return;
    }
    if !input.discharge_height_in.is_finite() || input.discharge_height_in <= 0.0 {
        report.error(
            codes::INCLINE_HEIGHT_REQUIRED,
            "discharge_height_in",
            format!("Style {:?} is inclined and needs a discharge height above zero", input.style),
        );
    }
    if input.incline_angle_deg.is_nan() || input.incline_angle_deg <= 0.0 {
        report.error(
            codes::INCLINE_ANGLE_REQUIRED,
            "incline_angle_deg",
            format!("Style {:?} is inclined and needs an incline angle above zero", input.style),
        );
    }
}

fn check_numeric_domain(input: &ConveyorInput, report: &mut ValidationReport) {
    let angle = input.incline_angle_deg;
    if !input.style.is_horizontal_only() && !(0.0..=90.0).contains(&angle) {
        report.error(
            codes::ANGLE_OUT_OF_RANGE,
            "incline_angle_deg",
            format!("Incline angle {} is outside 0-90 degrees; clamped", angle),
        );
    }
    if input.magnet_pitch_in <= 0.0 || !input.magnet_pitch_in.is_finite() {
        report.error(
            codes::MAGNET_PITCH_INVALID,
            "magnet_pitch_in",
            format!("Magnet pitch {} must be positive; no magnets fit", input.magnet_pitch_in),
        );
    }
}

fn check_operating(
    input: &ConveyorInput,
    limits: &ValidationLimits,
    report: &mut ValidationReport,
) {
    if input.infeed_length_in < limits.min_infeed_in {
        report.warn(
            codes::INFEED_SHORT,
            "infeed_length_in",
            format!(
                "Infeed {:.1} in is below {:.1} in; custom tail tracks required",
                input.infeed_length_in, limits.min_infeed_in
            ),
        );
    }
    if input.belt_speed_fpm > limits.max_belt_speed_fpm {
        report.warn(
            codes::BELT_SPEED_HIGH,
            "belt_speed_fpm",
            format!(
                "Belt speed {:.1} fpm exceeds {:.1} fpm; chips may be thrown at discharge",
                input.belt_speed_fpm, limits.max_belt_speed_fpm
            ),
        );
    }
    if input.conveyed.chip_type.bridges_magnets() {
        report.warn(
            codes::CHIP_BRIDGING,
            "conveyed.chip_type",
            format!("{:?} chips tend to bridge across magnet bars", input.conveyed.chip_type),
        );
    }
    if input.conveyed.temperature.is_elevated() {
        report.warn(
            codes::TEMPERATURE_ELEVATED,
            "conveyed.temperature",
            "Elevated material temperature reduces magnet strength; confirm magnet grade",
        );
    }
    if input.conveyed.fluid == crate::materials::FluidType::Oil {
        report.warn(
            codes::FLUID_OIL,
            "conveyed.fluid",
            "Oil-based fluid increases drag-out; consider a drain section",
        );
    }
}

fn check_heavy_duty(
    input: &ConveyorInput,
    output: &ConveyorOutput,
    limits: &ValidationLimits,
    report: &mut ValidationReport,
) {
    if input.class != ConveyorClass::Standard {
        return;
    }
    if input.bar_width_in > limits.heavy_duty_bar_width_in {
        report.warn(
            codes::SUGGEST_HEAVY_DUTY,
            "bar_width_in",
            format!(
                "Bar width {:.1} in exceeds {:.1} in; consider Heavy-Duty",
                input.bar_width_in, limits.heavy_duty_bar_width_in
            ),
        );
    }
    if input.required_throughput_lbs_hr > limits.heavy_duty_throughput_lbs_hr {
        report.warn(
            codes::SUGGEST_HEAVY_DUTY,
            "required_throughput_lbs_hr",
            format!(
                "Load {:.0} lb/hr exceeds {:.0} lb/hr; consider Heavy-Duty",
                input.required_throughput_lbs_hr, limits.heavy_duty_throughput_lbs_hr
            ),
        );
    }
    // Horizontal styles run with no discharge height
    if !input.style.is_horizontal_only()
        && input.discharge_height_in > limits.heavy_duty_discharge_height_in
    {
        report.warn(
            codes::SUGGEST_HEAVY_DUTY,
            "discharge_height_in",
            format!(
                "Discharge height {:.1} in exceeds {:.1} in; consider Heavy-Duty",
                input.discharge_height_in, limits.heavy_duty_discharge_height_in
            ),
        );
    }
    if output.chain_length_in > limits.heavy_duty_chain_length_in {
        report.warn(
            codes::CHAIN_LENGTH_HEAVY_DUTY,
            "chain_length_in",
            format!(
                "Chain length {:.0} in exceeds {:.0} in; consider Heavy-Duty",
                output.chain_length_in, limits.heavy_duty_chain_length_in
            ),
        );
    }
}

fn check_bar_configuration(
    input: &ConveyorInput,
    output: &ConveyorOutput,
    report: &mut ValidationReport,
) {
    let Some(config) = &input.bar_configuration else {
        return;
    };

    for issue in config.pattern_config().validate() {
        match issue {
            PatternIssue::PrimaryMissing => report.error(
                codes::PATTERN_PRIMARY_MISSING,
                "bar_configuration.primary",
                "Pattern has no primary bar",
            ),
            PatternIssue::SecondaryMissing { mode } => report.warn(
                codes::PATTERN_SECONDARY_MISSING,
                "bar_configuration.secondary",
                format!("{:?} pattern has no secondary bar; every bar uses the primary", mode),
            ),
            PatternIssue::IntervalClamped { requested, used } => report.warn(
                codes::PATTERN_INTERVAL_CLAMPED,
                "bar_configuration.interval_count",
                format!("Interval {} raised to {}", requested, used),
            ),
            PatternIssue::TemplateNotFound { template_id } => report.error(
                codes::PATTERN_TEMPLATE_MISSING,
                "bar_configuration",
                format!("Bar template '{}' not found", template_id),
            ),
        }
    }

    let bars = [
        ("bar_configuration.primary", Some(config.primary)),
        ("bar_configuration.secondary", config.secondary),
    ];
    for (field, counts) in bars {
        let Some(counts) = counts else { continue };
        if counts.total() > output.max_magnets_per_bar {
            report.error(
                codes::BAR_OVERFILLED,
                field,
                format!(
                    "{} magnets do not fit on a {:.2} in bar (max {})",
                    counts.total(),
                    input.bar_width_in,
                    output.max_magnets_per_bar
                ),
            );
        }
    }

    let all: Vec<BarCounts> = std::iter::once(config.primary).chain(config.secondary).collect();
    let has_type = |material: MagnetMaterial| {
        all.iter().any(|c| match material {
            MagnetMaterial::Ceramic => c.ceramic_count > 0,
            MagnetMaterial::RareEarth => c.rare_earth_count > 0,
        })
    };
    if !has_type(input.magnet_type) {
        report.warn(
            codes::MAGNET_TYPE_MISMATCH,
            "magnet_type",
            format!("Magnet type {:?} does not appear in the bar configuration", input.magnet_type),
        );
    }
}

fn check_margin(
    input: &ConveyorInput,
    output: &ConveyorOutput,
    limits: &ValidationLimits,
    report: &mut ValidationReport,
) {
    if input.required_throughput_lbs_hr <= 0.0 {
        return;
    }
    let (minimum, kind) = if input.conveyed.chip_type.is_parts() {
        (limits.min_margin_parts, "parts")
    } else {
        (limits.min_margin_chips, "chips")
    };
    if output.throughput_margin < minimum {
        report.warn(
            codes::THROUGHPUT_UNDERSIZED,
            "throughput_margin",
            format!(
                "Throughput margin {:.2} is below {:.2} for {}; conveyor may be undersized",
                output.throughput_margin, minimum, kind
            ),
        );
    }
}
