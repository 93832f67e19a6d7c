//! # conveyor_core - Magnetic Scrap Conveyor Sizing Engine
//!
//! `conveyor_core` sizes magnetic chip and scrap conveyors: belt and chain
//! geometry, magnet bar count and weight, belt loads, drive torque and
//! reduction, and removal throughput. A bar capacity engine models magnet
//! layouts across one bar, rare-earth saturation and repeating bar patterns.
//! All inputs and outputs are JSON-serializable.
//!
//! ## Design Philosophy
//!
//! - **Stateless**: every calculation is a pure function of its input
//! - **JSON-First**: all types implement Serialize/Deserialize
//! - **Findings, not failures**: domain problems become validation messages;
//!   only file and settings I/O return errors
//!
//! ## Quick Start
//!
//! ```rust
//! use conveyor_core::{calculate, ConveyorInput, ConveyorStyle};
//!
//! let input = ConveyorInput {
//!     style: ConveyorStyle::A,
//!     infeed_length_in: 120.0,
//!     bar_width_in: 12.0,
//!     magnet_pitch_in: 12.0,
//!     belt_speed_fpm: 20.0,
//!     required_throughput_lbs_hr: 300.0,
//!     ..Default::default()
//! };
//!
//! let output = calculate(&input);
//! assert_eq!(output.gravity_pull_lb, 0.0);
//! let json = serde_json::to_string_pretty(&output).unwrap();
//! ```
//!
//! ## Modules
//!
//! - [`conveyor`] - Input/output records and the calculation pipeline
//! - [`calculations`] - Geometry, magnets, throughput, loads, drive
//! - [`bars`] - Magnet catalog, bar layout, bar capacity, patterns
//! - [`parameters`] - Class defaults and per-call overrides
//! - [`materials`] - Conveyed material metadata
//! - [`validation`] - Domain rules over input and output
//! - [`settings`] - Recalibratable constants
//! - [`job`] / [`file_io`] - Job files with atomic saves
//! - [`units`] - Type-safe unit wrappers
//! - [`errors`] - Structured error types

pub mod bars;
pub mod calculations;
pub mod conveyor;
pub mod errors;
pub mod file_io;
pub mod job;
pub mod materials;
pub mod parameters;
pub mod settings;
pub mod units;
pub mod validation;

#[cfg(test)]
mod test_support;

// Re-export commonly used types at crate root
pub use conveyor::{
    calculate, calculate_with, BarConfiguration, ConveyorInput, ConveyorOutput, ConveyorStyle,
};
pub use errors::{CalcError, CalcResult};
pub use file_io::{load_job, save_job};
pub use job::{Job, JobMetadata};
pub use parameters::{ConveyorClass, ParameterOverrides, PhysicalParameters};
pub use settings::{load_settings, CalculatorSettings};
pub use validation::{Severity, ValidationMessage};
