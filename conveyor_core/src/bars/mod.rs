//! # Magnet Bars
//!
//! Everything about the cross-belt magnet bars: the magnet catalog, laying
//! magnets out across a bar, the removal capacity of a bar (with the
//! rare-earth saturation correction), and repeating bar templates along the
//! conveyor.
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::bars::{
//!     calculate_bar_capacity_from_counts, compute_magnet_fit, apply_pattern, PatternConfig,
//! };
//!
//! // How many 2" magnets fit across a 12" bar with 1/8" gaps?
//! let fit = compute_magnet_fit(12.0, 2.0, 0.125, 0.0);
//! assert_eq!(fit.count, 5);
//!
//! // Four rare-earth magnets on a 12" bar, after saturation
//! let capacity = calculate_bar_capacity_from_counts(0, 4, 12.0);
//! assert!(capacity > 1.0 && capacity < 1.1);
//!
//! // Every fourth bar uses a different template
//! let seq = apply_pattern(&PatternConfig::interval("std", "boost", 4), 12);
//! assert_eq!(seq.primary_count + seq.secondary_count, 12);
//! ```

pub mod capacity;
pub mod catalog;
pub mod pattern;
pub mod saturation;
pub mod template;

pub use capacity::{
    calculate_bar_capacity, calculate_bar_capacity_from_counts, BarCapacity, BarCounts,
    CapacityRates,
};
pub use catalog::{
    ConveyorMagnetFamily, CrossSection, MagnetCatalog, MagnetCatalogItem, MagnetMaterial,
};
pub use pattern::{
    aggregate_pattern_capacity, apply_pattern, BarRole, PatternCapacity, PatternConfig,
    PatternIssue, PatternMode, PatternSequence,
};
pub use saturation::SaturationTable;
pub use template::{
    build_bar_template, compute_magnet_fit, BarSlot, BarTemplate, BarTemplateSummary,
    LayoutOptions, MagnetFit, MagnetSpec,
};
