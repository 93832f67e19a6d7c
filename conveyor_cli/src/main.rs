//! # Conveyor CLI
//!
//! Command-line front end for `conveyor_core`. Every command prints JSON on
//! stdout; logs go to stderr.
//!
//! Exit codes: 0 on success, 2 when a calculated conveyor has validation
//! errors, 1 on I/O or parse failures.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand, ValueEnum};
use serde::Serialize;
use tracing::{debug, info};
use tracing_subscriber::{EnvFilter, FmtSubscriber};

use conveyor_core::bars::{
    apply_pattern, calculate_bar_capacity, compute_magnet_fit, BarCounts, PatternConfig,
    PatternIssue, PatternMode, PatternSequence,
};
use conveyor_core::{calculate_with, load_job, load_settings, CalculatorSettings, ConveyorInput};

/// Exit code when a result carries validation errors
const EXIT_VALIDATION_ERRORS: i32 = 2;

#[derive(Debug, Parser)]
#[command(author, version, about = "Magnetic scrap conveyor calculator", long_about = None)]
struct Cli {
    /// JSON file overriding calculator constants
    #[arg(long, global = true, value_name = "FILE")]
    settings: Option<PathBuf>,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pretty: bool,

    /// Increase log verbosity (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Calculate one conveyor from an input JSON file
    Calc {
        #[arg(value_name = "INPUT.json")]
        input: PathBuf,
    },
    /// Calculate every conveyor in a job file
    Job {
        #[arg(value_name = "JOB.json")]
        job: PathBuf,
    },
    /// How many identical magnets fit across a bar
    Fit {
        /// Target overall length (in)
        #[arg(long)]
        oal: f64,
        /// Magnet length (in)
        #[arg(long)]
        length: f64,
        /// Gap between magnets (in)
        #[arg(long)]
        gap: Option<f64>,
        /// Clearance at each bar end (in)
        #[arg(long)]
        end_clearance: Option<f64>,
    },
    /// Removal capacity of one bar
    Capacity {
        #[arg(long, default_value_t = 0)]
        ceramic: u32,
        #[arg(long, default_value_t = 0)]
        rare_earth: u32,
        /// Bar width (in)
        #[arg(long)]
        width: f64,
    },
    /// Expand a bar pattern over the belt
    Pattern {
        #[arg(long, value_enum, default_value_t = ModeArg::AllSame)]
        mode: ModeArg,
        /// Number of bars on the belt
        #[arg(long)]
        bars: u32,
        /// Secondary bar every N positions (interval mode)
        #[arg(long)]
        every: Option<u32>,
        /// A secondary template is available
        #[arg(long)]
        secondary: bool,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum ModeArg {
    AllSame,
    Alternating,
    Interval,
}

impl From<ModeArg> for PatternMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::AllSame => PatternMode::AllSame,
            ModeArg::Alternating => PatternMode::Alternating,
            ModeArg::Interval => PatternMode::Interval,
        }
    }
}

#[derive(Debug, Serialize)]
struct PatternReport {
    #[serde(flatten)]
    sequence: PatternSequence,
    issues: Vec<PatternIssue>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let settings = match &cli.settings {
        Some(path) => load_settings(path)
            .with_context(|| format!("failed to load settings from {}", path.display()))?,
        None => CalculatorSettings::default(),
    };

    let has_errors = run(&cli, &settings)?;
    if has_errors {
        std::process::exit(EXIT_VALIDATION_ERRORS);
    }
    Ok(())
}

/// Run the selected command. Returns whether any result has validation errors.
fn run(cli: &Cli, settings: &CalculatorSettings) -> Result<bool> {
    match &cli.command {
        Commands::Calc { input } => {
            let input = read_input(input)?;
            let output = calculate_with(&input, settings);
            info!(label = %output.label, errors = output.errors.len(), "calculated conveyor");
            print_json(&output, cli.pretty)?;
            Ok(!output.is_valid())
        }
        Commands::Job { job } => {
            let job = load_job(job)
                .with_context(|| format!("failed to load job from {}", job.display()))?;
            debug!(job_id = %job.meta.job_id, conveyors = job.conveyor_count(), "loaded job");
            let outputs = job.calculate_all(settings);
            let has_errors = outputs.values().any(|output| !output.is_valid());
            print_json(&outputs, cli.pretty)?;
            Ok(has_errors)
        }
        Commands::Fit {
            oal,
            length,
            gap,
            end_clearance,
        } => {
            let fit = compute_magnet_fit(
                *oal,
                *length,
                gap.unwrap_or(settings.layout.gap_in),
                end_clearance.unwrap_or(settings.layout.end_clearance_in),
            );
            print_json(&fit, cli.pretty)?;
            Ok(false)
        }
        Commands::Capacity {
            ceramic,
            rare_earth,
            width,
        } => {
            let capacity = calculate_bar_capacity(
                BarCounts::new(*ceramic, *rare_earth),
                *width,
                &settings.capacity_rates,
                &settings.saturation,
            );
            print_json(&capacity, cli.pretty)?;
            Ok(false)
        }
        Commands::Pattern {
            mode,
            bars,
            every,
            secondary,
        } => {
            let mut config = PatternConfig::all_same("primary");
            config.mode = (*mode).into();
            if *secondary {
                config.secondary_template_id = Some("secondary".to_string());
            }
            if let Some(every) = every {
                config.interval_count = *every;
            }
            let report = PatternReport {
                sequence: apply_pattern(&config, *bars),
                issues: config.validate(),
            };
            print_json(&report, cli.pretty)?;
            Ok(report.issues.iter().any(PatternIssue::is_error))
        }
    }
}

fn read_input(path: &Path) -> Result<ConveyorInput> {
    let contents = fs::read_to_string(path)
        .with_context(|| format!("failed to read input from {}", path.display()))?;
    serde_json::from_str(&contents)
        .with_context(|| format!("invalid conveyor input in {}", path.display()))
}

fn print_json<T: Serialize>(value: &T, pretty: bool) -> Result<()> {
    let json = if pretty {
        serde_json::to_string_pretty(value)
    } else {
        serde_json::to_string(value)
    }
    .context("failed to serialize output")?;
    println!("{}", json);
    Ok(())
}

fn init_tracing(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "debug",
        _ => "trace",
    };
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    let subscriber = FmtSubscriber::builder()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .finish();

    let _ = tracing::subscriber::set_global_default(subscriber);
}
