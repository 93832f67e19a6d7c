//! # Conveyor Calculations
//!
//! The physical calculators, leaf-first. Each module follows the pattern:
//!
//! - `*Input` - plain inputs (JSON-serializable) where there are more than a few
//! - `*Result` - outputs (JSON-serializable)
//! - `calculate(...) -> *Result` - pure, infallible calculation
//!
//! Degenerate inputs (zero lengths, non-positive pitch or lead) produce zero
//! results rather than errors. Domain findings belong to
//! [`crate::validation`], not here.
//!
//! ## Pipeline Order
//!
//! ```text
//! geometry -> magnets -> (bar capacity) -> throughput -> loads -> drive
//! ```
//!
//! Throughput runs before loads because total load includes the chip load
//! that throughput produces.

pub mod drive;
pub mod geometry;
pub mod loads;
pub mod magnets;
pub mod throughput;

// Re-export commonly used types
pub use drive::DriveResult;
pub use geometry::{GeometryInput, GeometryResult};
pub use loads::{LoadInput, LoadResult};
pub use magnets::{MagnetResult, MagnetWeightFit};
pub use throughput::{ThroughputInput, ThroughputResult};
