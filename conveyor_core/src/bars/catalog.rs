//! Magnet Catalog
//!
//! Purchasable magnets and the bar families that may use them.
//!
//! Every magnet usable on one bar family shares a single cross-section
//! (width × height); magnets differ by material and length. A family
//! restricts which lengths are allowed and how many magnets one bar may hold.

use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

use crate::parameters::ConveyorClass;

/// Effective capacity of one 2" ceramic block (lb), net of efficiency
pub const CERAMIC_CAPACITY_LB: f64 = 0.1207;

/// Effective capacity of one 2" rare-earth block (lb), net of efficiency
pub const RARE_EARTH_CAPACITY_LB: f64 = 0.298;

/// Length of the block the per-magnet capacities are quoted for (in)
pub const STANDARD_MAGNET_LENGTH_IN: f64 = 2.0;

/// Magnet material
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MagnetMaterial {
    /// Ferrite / ceramic
    #[default]
    Ceramic,
    /// Neodymium
    RareEarth,
}

/// Magnet cross-section, shared across a bar family
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CrossSection {
    pub width_in: f64,
    pub height_in: f64,
}

impl CrossSection {
    /// Key used to match magnets against a family, e.g. `1.00x0.50`
    pub fn key(&self) -> String {
        format!("{:.2}x{:.2}", self.width_in, self.height_in)
    }
}

/// Standard magnet cross-section
pub const STANDARD_CROSS_SECTION: CrossSection = CrossSection {
    width_in: 1.0,
    height_in: 0.5,
};

/// A single purchasable magnet. Immutable reference data.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnetCatalogItem {
    /// Catalog id, e.g. `NEO-2`
    pub id: String,
    pub material: MagnetMaterial,
    pub length_in: f64,
    pub cross_section: CrossSection,
    /// Effective removal capacity of one magnet (lb)
    pub capacity_lb: f64,
}

impl MagnetCatalogItem {
    pub fn new(
        id: impl Into<String>,
        material: MagnetMaterial,
        length_in: f64,
        capacity_lb: f64,
    ) -> Self {
        MagnetCatalogItem {
            id: id.into(),
            material,
            length_in,
            cross_section: STANDARD_CROSS_SECTION,
            capacity_lb,
        }
    }
}

/// A set of catalog items, looked up by id.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct MagnetCatalog {
    pub items: Vec<MagnetCatalogItem>,
}

static STANDARD_CATALOG: Lazy<MagnetCatalog> = Lazy::new(|| MagnetCatalog {
    items: vec![
        MagnetCatalogItem::new("CER-1", MagnetMaterial::Ceramic, 1.0, CERAMIC_CAPACITY_LB / 2.0),
        MagnetCatalogItem::new(
            "CER-2",
            MagnetMaterial::Ceramic,
            STANDARD_MAGNET_LENGTH_IN,
            CERAMIC_CAPACITY_LB,
        ),
        MagnetCatalogItem::new(
            "NEO-1",
            MagnetMaterial::RareEarth,
            1.0,
            RARE_EARTH_CAPACITY_LB / 2.0,
        ),
        MagnetCatalogItem::new(
            "NEO-2",
            MagnetMaterial::RareEarth,
            STANDARD_MAGNET_LENGTH_IN,
            RARE_EARTH_CAPACITY_LB,
        ),
    ],
});

impl MagnetCatalog {
    /// Built-in catalog
    pub fn standard() -> &'static MagnetCatalog {
        &STANDARD_CATALOG
    }

    /// Find an item by id
    pub fn get(&self, id: &str) -> Option<&MagnetCatalogItem> {
        self.items.iter().find(|item| item.id == id)
    }

    /// Items of one material, in catalog order
    pub fn by_material(
        &self,
        material: MagnetMaterial,
    ) -> impl Iterator<Item = &MagnetCatalogItem> {
        self.items.iter().filter(move |item| item.material == material)
    }
}

/// Membership rules for magnets on one conveyor's bars.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConveyorMagnetFamily {
    pub name: String,
    /// Required [`CrossSection::key`]
    pub cross_section_key: String,
    pub allowed_lengths_in: Vec<f64>,
    pub max_magnets_per_bar: u32,
}

const LENGTH_MATCH_TOLERANCE_IN: f64 = 1e-6;

impl ConveyorMagnetFamily {
    /// Default family for a conveyor class
    pub fn for_class(class: ConveyorClass) -> Self {
        let (name, max_magnets_per_bar) = match class {
            ConveyorClass::Standard => ("standard", 16),
            ConveyorClass::HeavyDuty => ("heavy-duty", 24),
        };
        ConveyorMagnetFamily {
            name: name.to_string(),
            cross_section_key: STANDARD_CROSS_SECTION.key(),
            allowed_lengths_in: vec![1.0, 2.0],
            max_magnets_per_bar,
        }
    }

    /// Check one magnet against this family. `Err` carries the reason.
    pub fn admits(&self, item: &MagnetCatalogItem) -> Result<(), String> {
        let key = item.cross_section.key();
        if key != self.cross_section_key {
            return Err(format!(
                "cross-section {} does not match required {}",
                key, self.cross_section_key
            ));
        }
        let length_ok = self
            .allowed_lengths_in
            .iter()
            .any(|allowed| (allowed - item.length_in).abs() < LENGTH_MATCH_TOLERANCE_IN);
        if !length_ok {
            return Err(format!("length {:.3} in is not an allowed length", item.length_in));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cross_section_key() {
        assert_eq!(STANDARD_CROSS_SECTION.key(), "1.00x0.50");
    }

    #[test]
    fn test_standard_catalog_lookup() {
        let catalog = MagnetCatalog::standard();
        let neo = catalog.get("NEO-2").unwrap();
        assert_eq!(neo.material, MagnetMaterial::RareEarth);
        assert_eq!(neo.capacity_lb, RARE_EARTH_CAPACITY_LB);
        assert!(catalog.get("NEO-9").is_none());
        assert_eq!(catalog.by_material(MagnetMaterial::Ceramic).count(), 2);
    }

    #[test]
    fn test_family_admits_catalog_items() {
        let family = ConveyorMagnetFamily::for_class(ConveyorClass::Standard);
        for item in &MagnetCatalog::standard().items {
            assert!(family.admits(item).is_ok(), "{} should be admitted", item.id);
        }
    }

    #[test]
    fn test_family_rejects_wrong_section_and_length() {
        let family = ConveyorMagnetFamily::for_class(ConveyorClass::HeavyDuty);

        let mut wide = MagnetCatalogItem::new("CER-W", MagnetMaterial::Ceramic, 2.0, 0.2);
        wide.cross_section = CrossSection {
            width_in: 1.5,
            height_in: 0.5,
        };
        assert!(family.admits(&wide).unwrap_err().contains("cross-section"));

        let long = MagnetCatalogItem::new("CER-3", MagnetMaterial::Ceramic, 3.0, 0.18);
        assert!(family.admits(&long).unwrap_err().contains("length"));
    }

    #[test]
    fn test_family_limits_by_class() {
        let standard = ConveyorMagnetFamily::for_class(ConveyorClass::Standard);
        let heavy = ConveyorMagnetFamily::for_class(ConveyorClass::HeavyDuty);
        assert_eq!(standard.max_magnets_per_bar, 16);
        assert_eq!(heavy.max_magnets_per_bar, 24);
    }
}
