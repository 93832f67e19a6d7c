//! End-to-end checks through the public API.

use conveyor_core::bars::{
    apply_pattern, build_bar_template, calculate_bar_capacity_from_counts, compute_magnet_fit,
    BarCounts, ConveyorMagnetFamily, LayoutOptions, MagnetCatalog, MagnetSpec, PatternConfig,
    PatternMode, SaturationTable,
};
use conveyor_core::materials::{ChipType, ConveyedMaterial};
use conveyor_core::validation::{codes, validate, ValidationLimits};
use conveyor_core::{
    calculate, calculate_with, load_job, save_job, BarConfiguration, CalculatorSettings,
    ConveyorClass, ConveyorInput, ConveyorStyle, Job, Severity,
};

fn lathe_conveyor() -> ConveyorInput {
    ConveyorInput {
        label: "Lathe 4".to_string(),
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

#[test]
fn standard_style_b_reference_case() {
    let output = calculate(&lathe_conveyor());

    assert!((output.incline_length_in - 115.47).abs() < 0.01);
    // Chain length is a whole number of 1" pitches and never shorter than the belt
    assert_eq!(output.chain_length_in.fract(), 0.0);
    assert!(output.chain_length_in >= output.belt_length_ft * 12.0);
    assert_eq!(output.coefficient_of_friction_used, 0.2);
    assert_eq!(output.safety_factor_used, 2.0);
    assert!(output.errors.is_empty(), "{:?}", output.errors);
}

#[test]
fn horizontal_invariants_hold_for_any_supplied_incline() {
    for (height, angle) in [(0.0, 0.0), (80.0, 45.0), (-3.0, 200.0), (200.0, 45.0)] {
        let mut input = lathe_conveyor();
        input.style = ConveyorStyle::A;
        input.discharge_height_in = height;
        input.incline_angle_deg = angle;

        let output = calculate(&input);
        assert_eq!(output.incline_length_in, 0.0);
        assert_eq!(output.gravity_pull_lb, 0.0);
        assert!((output.belt_length_ft - 2.0 * output.path_length_ft).abs() < 1e-12);
        assert!((output.path_length_ft - (48.0 + 24.0) / 12.0).abs() < 1e-12);
        // The forced-zero height never triggers height-based findings
        assert!(
            !output.warnings.iter().any(|m| m.field == "discharge_height_in"),
            "{:?}",
            output.warnings
        );
    }
}

#[test]
fn magnet_count_never_negative() {
    let mut input = lathe_conveyor();
    input.style = ConveyorStyle::A;
    input.infeed_length_in = 2.0;
    input.discharge_length_in = 0.0;
    for pitch in [12.0, 0.0, -4.0] {
        input.magnet_pitch_in = pitch;
        assert_eq!(calculate(&input).magnet_count, 0);
    }
}

#[test]
fn validation_is_idempotent_and_ordered() {
    let mut input = lathe_conveyor();
    input.belt_speed_fpm = 75.0;
    input.conveyed.chip_type = ChipType::Bushy;
    input.conveyed.material = ConveyedMaterial::Brass;

    let output = calculate(&input);
    let limits = ValidationLimits::default();
    let first = validate(&input, &output, &limits);
    let second = validate(&input, &output, &limits);
    assert_eq!(first, second);

    // Errors first in rule order, then warnings
    assert_eq!(first.messages[0].code, codes::MATERIAL_NOT_MAGNETIC);
    assert_eq!(first.messages[0].severity, Severity::Error);
    assert_eq!(output.errors.len(), 1);
    assert!(output.warnings.iter().all(|m| m.severity == Severity::Warning));
}

#[test]
fn heavy_duty_has_more_torque_for_same_layout() {
    let standard = calculate(&lathe_conveyor());
    let mut input = lathe_conveyor();
    input.class = ConveyorClass::HeavyDuty;
    let heavy = calculate(&input);

    assert!(heavy.total_torque_inlb > standard.total_torque_inlb);
    assert!(heavy.chain_weight_lb_per_ft_used > standard.chain_weight_lb_per_ft_used);
}

#[test]
fn rare_earth_bars_saturate() {
    let ceramic = calculate_bar_capacity_from_counts(3, 0, 12.0);
    assert!((ceramic - 0.362).abs() <= 0.362 * 0.05);

    let neo = calculate_bar_capacity_from_counts(0, 4, 12.0);
    assert!((neo - 1.054).abs() <= 1.054 * 0.10);
    assert!(neo < 4.0 * 0.298);

    let mut input = lathe_conveyor();
    input.magnet_type = conveyor_core::bars::MagnetMaterial::RareEarth;
    input.bar_configuration = Some(BarConfiguration::uniform(BarCounts::new(0, 4)));
    let output = calculate(&input);
    assert!((output.bar_capacity_lb - neo).abs() < 1e-12);
    assert!(output.throughput_margin > 1.5);
    assert!(output.is_valid());
}

#[test]
fn bar_template_layout() {
    let catalog = MagnetCatalog::standard();
    let family = ConveyorMagnetFamily::for_class(ConveyorClass::Standard);
    // Five 2" magnets with 1/8" gaps span 10.5", leaving 0.1" inside tolerance
    let fit = compute_magnet_fit(10.6, 2.0, 0.125, 0.0);
    assert_eq!(fit.count, 5);

    let template = build_bar_template(
        &[MagnetSpec::new("CER-2", 3), MagnetSpec::new("NEO-2", 2)],
        10.6,
        &LayoutOptions::default(),
        catalog,
        Some(&family),
    );
    assert!(template.is_valid(), "{:?}", template.errors());
    assert_eq!(template.magnet_count(), 5);
    assert!((template.achieved_oal_in() - fit.achieved_oal_in).abs() < 1e-12);

    let summary = template.summary(&SaturationTable::default());
    assert_eq!(summary.counts, BarCounts::new(3, 2));
    // Mixed bars never saturate
    assert!((summary.removal_capacity_lb - summary.total_hold_force_lb).abs() < 1e-12);
}

#[test]
fn unknown_magnet_does_not_halt_layout() {
    let template = build_bar_template(
        &[MagnetSpec::new("CER-2", 2), MagnetSpec::new("XX-9", 1), MagnetSpec::new("NEO-2", 1)],
        12.0,
        &LayoutOptions::default(),
        MagnetCatalog::standard(),
        None,
    );
    assert_eq!(template.magnet_count(), 3);
    assert!(!template.is_valid());
    assert!(template.errors().iter().any(|e| e.error_code() == "MAGNET_NOT_FOUND"));
}

#[test]
fn pattern_counts_cover_every_bar() {
    for mode in [PatternMode::AllSame, PatternMode::Alternating, PatternMode::Interval] {
        let config = PatternConfig {
            mode,
            primary_template_id: "p".to_string(),
            secondary_template_id: Some("s".to_string()),
            interval_count: 4,
        };
        let seq = apply_pattern(&config, 17);
        assert_eq!(seq.primary_count + seq.secondary_count, 17);
        assert_eq!(seq.sequence.len(), 17);
    }
}

#[test]
fn job_file_roundtrip_and_batch_calculation() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("q-100.json");

    let mut job = Job::new("Q-100", "Acme Tool");
    let a = job.add_conveyor(lathe_conveyor());
    let mut flat = lathe_conveyor();
    flat.style = ConveyorStyle::A;
    let b = job.add_conveyor(flat);
    save_job(&job, &path).unwrap();

    let loaded = load_job(&path).unwrap();
    let outputs = loaded.calculate_all(&CalculatorSettings::default());
    assert_eq!(outputs.len(), 2);
    assert!(outputs[&a].gravity_pull_lb > 0.0);
    assert_eq!(outputs[&b].gravity_pull_lb, 0.0);
}

#[test]
fn settings_limits_are_honored() {
    let mut settings = CalculatorSettings::default();
    settings.limits.max_belt_speed_fpm = 20.0;
    let output = calculate_with(&lathe_conveyor(), &settings);
    assert!(output.warnings.iter().any(|m| m.code == codes::BELT_SPEED_HIGH));

    let output = calculate(&lathe_conveyor());
    assert!(!output.warnings.iter().any(|m| m.code == codes::BELT_SPEED_HIGH));
}
