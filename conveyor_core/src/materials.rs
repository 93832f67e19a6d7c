//! # Conveyed Material
//!
//! Metadata about what the conveyor carries. None of this feeds the physical
//! formulas; it is read only by [`crate::validation`].
//!
//! ## JSON Example
//!
//! ```json
//! {
//!   "material": "Steel",
//!   "chip_type": "Stringy",
//!   "temperature": "Ambient",
//!   "fluid": "WaterSoluble"
//! }
//! ```

use serde::{Deserialize, Serialize};

/// Base metal of the scrap being removed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ConveyedMaterial {
    #[default]
    Steel,
    CastIron,
    /// 400-series (ferritic/martensitic) stainless
    StainlessFerritic,
    /// 300-series (austenitic) stainless
    StainlessAustenitic,
    Aluminum,
    Brass,
    Copper,
    Titanium,
}

impl ConveyedMaterial {
    /// Whether a permanent magnet can hold this material
    pub fn is_magnetic(self) -> bool {
        matches!(
            self,
            ConveyedMaterial::Steel
                | ConveyedMaterial::CastIron
                | ConveyedMaterial::StainlessFerritic
        )
    }
}

/// Shape of the conveyed scrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum ChipType {
    /// Short broken chips
    #[default]
    Small,
    /// Curled chips, C and 6 shapes
    Curled,
    /// Long continuous ribbons
    Stringy,
    /// Nested chip balls
    Bushy,
    /// Grinding swarf and fines
    Fines,
    /// Stampings and small parts rather than chips
    Parts,
}

impl ChipType {
    /// Chip shapes that span and bridge between magnet bars
    pub fn bridges_magnets(self) -> bool {
        matches!(self, ChipType::Stringy | ChipType::Bushy)
    }

    /// Whether this is a parts application (different margin rule)
    pub fn is_parts(self) -> bool {
        matches!(self, ChipType::Parts)
    }
}

/// Temperature of the conveyed material at the infeed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum TemperatureClass {
    #[default]
    Ambient,
    Elevated,
    High,
}

impl TemperatureClass {
    pub fn is_elevated(self) -> bool {
        !matches!(self, TemperatureClass::Ambient)
    }
}

/// Cutting fluid carried with the scrap
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum FluidType {
    #[default]
    Dry,
    WaterSoluble,
    Oil,
}

/// Everything known about the conveyed load beyond its mass rate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ConveyedLoad {
    #[serde(default)]
    pub material: ConveyedMaterial,
    #[serde(default)]
    pub chip_type: ChipType,
    #[serde(default)]
    pub temperature: TemperatureClass,
    #[serde(default)]
    pub fluid: FluidType,
}
