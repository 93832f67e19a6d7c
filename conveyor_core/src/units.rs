//! # Unit Types
//!
//! Thin newtype wrappers for the units the conveyor calculators mix. The
//! public input and output records stay plain `f64` with unit-suffixed field
//! names; these wrappers are used at the conversion points inside the
//! calculators so an inch never silently becomes a foot.
//!
//! ## Conventions
//!
//! - Length: inches unless a field is suffixed `_ft`
//! - Angle: degrees
//! - Weight / force: pounds
//! - Speed: feet per minute
//! - Torque: inch-pounds
//!
//! ## Example
//!
//! ```rust
//! use conveyor_core::units::{Feet, Inches, Degrees};
//!
//! let belt: Inches = Feet(10.0).into();
//! assert_eq!(belt.0, 120.0);
//!
//! assert_eq!(Degrees(0.0).sin(), 0.0);
//! ```

use serde::{Deserialize, Serialize};
use std::ops::{Add, Div, Mul, Sub};

// ============================================================================
// Length Units
// ============================================================================

/// Length in feet
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Feet(pub f64);

/// Length in inches
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Inches(pub f64);

impl From<Feet> for Inches {
    fn from(ft: Feet) -> Self {
        Inches(ft.0 * 12.0)
    }
}

impl From<Inches> for Feet {
    fn from(inches: Inches) -> Self {
        Feet(inches.0 / 12.0)
    }
}

// ============================================================================
// Force / Torque Units
// ============================================================================

/// Weight or force in pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pounds(pub f64);

/// Torque in inch-pounds
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InLb(pub f64);

impl Pounds {
    /// Torque produced by this force at a lever arm
    pub fn at_radius(self, radius: Inches) -> InLb {
        InLb(self.0 * radius.0)
    }
}

// ============================================================================
// Speed Units
// ============================================================================

/// Linear speed in feet per minute
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeetPerMinute(pub f64);

impl FeetPerMinute {
    /// Inches travelled per minute
    pub fn inches_per_minute(self) -> Inches {
        Feet(self.0).into()
    }
}

// ============================================================================
// Angles
// ============================================================================

/// Angle in degrees
#[derive(Debug, Clone, Copy, PartialEq, PartialOrd, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Degrees(pub f64);

impl Degrees {
    /// Sine of the angle. Exactly 0.0 at 0° and exactly 1.0 at 90°.
    pub fn sin(self) -> f64 {
        if self.0 == 0.0 {
            0.0
        } else if self.0 == 90.0 {
            1.0
        } else {
            self.0.to_radians().sin()
        }
    }

    /// Tangent of the angle. Callers must special-case 90°.
    pub fn tan(self) -> f64 {
        self.0.to_radians().tan()
    }

    /// Clamp into the closed interval [0, 90]
    pub fn clamp_incline(self) -> Self {
        if self.0.is_nan() {
            Degrees(0.0)
        } else {
            Degrees(self.0.clamp(0.0, 90.0))
        }
    }
}

// ============================================================================
// Arithmetic Implementations (macro to reduce boilerplate)
// ============================================================================

macro_rules! impl_arithmetic {
    ($type:ty) => {
        impl Add for $type {
            type Output = Self;
            fn add(self, rhs: Self) -> Self::Output {
                Self(self.0 + rhs.0)
            }
        }

        impl Sub for $type {
            type Output = Self;
            fn sub(self, rhs: Self) -> Self::Output {
                Self(self.0 - rhs.0)
            }
        }

        impl Mul<f64> for $type {
            type Output = Self;
            fn mul(self, rhs: f64) -> Self::Output {
                Self(self.0 * rhs)
            }
        }

        impl Div<f64> for $type {
            type Output = Self;
            fn div(self, rhs: f64) -> Self::Output {
                Self(self.0 / rhs)
            }
        }

        impl $type {
            /// Get the raw f64 value
            pub fn value(self) -> f64 {
                self.0
            }
        }
    };
}

impl_arithmetic!(Feet);
impl_arithmetic!(Inches);
impl_arithmetic!(Pounds);
impl_arithmetic!(InLb);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_feet_to_inches() {
        let inches: Inches = Feet(10.0).into();
        assert_eq!(inches.0, 120.0);
        let ft: Feet = Inches(18.0).into();
        assert_eq!(ft.0, 1.5);
    }

    #[test]
    fn test_arithmetic() {
        let a = Inches(10.0);
        let b = Inches(5.0);
        assert_eq!((a + b).0, 15.0);
        assert_eq!((a - b).0, 5.0);
        assert_eq!((a * 2.0).0, 20.0);
        assert_eq!((a / 2.0).0, 5.0);
    }

    #[test]
    fn test_sine_boundaries_are_exact() {
        assert_eq!(Degrees(0.0).sin(), 0.0);
        assert_eq!(Degrees(90.0).sin(), 1.0);
        assert!((Degrees(30.0).sin() - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_clamp_incline() {
        assert_eq!(Degrees(-5.0).clamp_incline(), Degrees(0.0));
        assert_eq!(Degrees(120.0).clamp_incline(), Degrees(90.0));
        assert_eq!(Degrees(f64::NAN).clamp_incline(), Degrees(0.0));
    }

    #[test]
    fn test_torque_and_speed() {
        assert_eq!(Pounds(100.0).at_radius(Inches(2.5)), InLb(250.0));
        assert_eq!(FeetPerMinute(30.0).inches_per_minute(), Inches(360.0));
    }

    #[test]
    fn test_serialization() {
        let ft = Feet(12.5);
        let json = serde_json::to_string(&ft).unwrap();
        assert_eq!(json, "12.5");
    }
}
