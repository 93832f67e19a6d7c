//! Bar Templates
//!
//! A bar template is an ordered row of catalog magnets laid left to right
//! across a target overall length (OAL), separated by a fixed gap and inset
//! by an optional end clearance:
//!
//! ```text
//! |<-c->[ M0 ]<-g->[ M1 ]<-g->[ M2 ]<-c->|<- leftover ->|
//! |<------------- achieved OAL ---------->|
//! |<------------------- target OAL --------------------->|
//! ```
//!
//! Only the magnet sequence is stored. Positions, achieved OAL, leftover,
//! hold force and validity are recomputed from it on every call, so they
//! can never drift from the slot list.

use serde::{Deserialize, Serialize};
use tracing::debug;

use super::capacity::BarCounts;
use super::catalog::{ConveyorMagnetFamily, MagnetCatalog, MagnetCatalogItem, MagnetMaterial};
use super::saturation::SaturationTable;
use crate::errors::CalcError;

/// Default spacing between adjacent magnets (in)
pub const DEFAULT_GAP_IN: f64 = 0.125;

/// Default inset at each end of the bar (in)
pub const DEFAULT_END_CLEARANCE_IN: f64 = 0.0;

/// Default allowed leftover (in)
pub const DEFAULT_FIT_TOLERANCE_IN: f64 = 0.25;

/// Slack for floating-point noise when checking overfill
const OVERFILL_EPSILON_IN: f64 = 1e-9;

/// One requested entry: `quantity` copies of catalog magnet `magnet_id`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MagnetSpec {
    pub magnet_id: String,
    pub quantity: u32,
}

impl MagnetSpec {
    pub fn new(magnet_id: impl Into<String>, quantity: u32) -> Self {
        MagnetSpec {
            magnet_id: magnet_id.into(),
            quantity,
        }
    }
}

/// Gap, clearance and tolerance used when laying out a bar
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutOptions {
    pub gap_in: f64,
    pub end_clearance_in: f64,
    pub tolerance_in: f64,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        LayoutOptions {
            gap_in: DEFAULT_GAP_IN,
            end_clearance_in: DEFAULT_END_CLEARANCE_IN,
            tolerance_in: DEFAULT_FIT_TOLERANCE_IN,
        }
    }
}

/// A placed magnet. Produced by [`BarTemplate::slots`], never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarSlot {
    pub index: usize,
    pub magnet_id: String,
    pub material: MagnetMaterial,
    pub length_in: f64,
    /// Left edge measured from the bar end (in)
    pub position_in: f64,
    pub capacity_lb: f64,
}

/// An ordered magnet layout on one bar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTemplate {
    pub target_oal_in: f64,
    pub options: LayoutOptions,
    magnets: Vec<MagnetCatalogItem>,
    /// Errors found while resolving specs (unknown ids, family rules)
    layout_errors: Vec<CalcError>,
}

impl BarTemplate {
    /// Empty template
    pub fn new(target_oal_in: f64, options: LayoutOptions) -> Self {
        BarTemplate {
            target_oal_in,
            options,
            magnets: Vec::new(),
            layout_errors: Vec::new(),
        }
    }

    /// Append a magnet on the right-hand end
    pub fn push(&mut self, magnet: MagnetCatalogItem) {
        self.magnets.push(magnet);
    }

    /// Remove the magnet at `index`, shifting the rest left
    pub fn remove(&mut self, index: usize) -> Option<MagnetCatalogItem> {
        if index < self.magnets.len() {
            Some(self.magnets.remove(index))
        } else {
            None
        }
    }

    pub fn magnet_count(&self) -> usize {
        self.magnets.len()
    }

    /// Placed slots with positions computed from the current sequence
    pub fn slots(&self) -> Vec<BarSlot> {
        let mut cursor = self.options.end_clearance_in;
        self.magnets
            .iter()
            .enumerate()
            .map(|(index, magnet)| {
                let slot = BarSlot {
                    index,
                    magnet_id: magnet.id.clone(),
                    material: magnet.material,
                    length_in: magnet.length_in,
                    position_in: cursor,
                    capacity_lb: magnet.capacity_lb,
                };
                cursor += magnet.length_in + self.options.gap_in;
                slot
            })
            .collect()
    }

    /// Length actually occupied, including both end clearances. 0 when empty.
    pub fn achieved_oal_in(&self) -> f64 {
        if self.magnets.is_empty() {
            return 0.0;
        }
        let magnets: f64 = self.magnets.iter().map(|m| m.length_in).sum();
        let gaps = (self.magnets.len() - 1) as f64 * self.options.gap_in;
        2.0 * self.options.end_clearance_in + magnets + gaps
    }

    /// target − achieved. Negative when overfilled.
    pub fn leftover_in(&self) -> f64 {
        self.target_oal_in - self.achieved_oal_in()
    }

    /// Linear sum of magnet capacities (lb)
    pub fn total_hold_force_lb(&self) -> f64 {
        self.magnets.iter().map(|m| m.capacity_lb).sum()
    }

    /// Ceramic and rare-earth counts
    pub fn counts(&self) -> BarCounts {
        let rare_earth = self
            .magnets
            .iter()
            .filter(|m| m.material == MagnetMaterial::RareEarth)
            .count() as u32;
        BarCounts::new(self.magnets.len() as u32 - rare_earth, rare_earth)
    }

    /// Hold force after the saturation correction at this bar's width (lb)
    pub fn removal_capacity_lb(&self, saturation: &SaturationTable) -> f64 {
        let counts = self.counts();
        self.total_hold_force_lb()
            * saturation.factor(self.target_oal_in, counts.ceramic_count, counts.rare_earth_count)
    }

    /// Layout errors plus the current fill check
    pub fn errors(&self) -> Vec<CalcError> {
        let mut errors = self.layout_errors.clone();
        let leftover = self.leftover_in();
        if leftover < -OVERFILL_EPSILON_IN {
            errors.push(CalcError::BarOverfilled {
                achieved_in: self.achieved_oal_in(),
                target_in: self.target_oal_in,
            });
        } else if leftover > self.options.tolerance_in + OVERFILL_EPSILON_IN {
            errors.push(CalcError::BarUnderfilled {
                leftover_in: leftover,
                tolerance_in: self.options.tolerance_in,
            });
        }
        errors
    }

    /// Valid when there are no errors: every id resolved, every magnet
    /// admitted by the family, and 0 ≤ leftover ≤ tolerance.
    pub fn is_valid(&self) -> bool {
        self.errors().is_empty()
    }

    /// Serializable snapshot with every derived value filled in
    pub fn summary(&self, saturation: &SaturationTable) -> BarTemplateSummary {
        BarTemplateSummary {
            target_oal_in: self.target_oal_in,
            achieved_oal_in: self.achieved_oal_in(),
            leftover_in: self.leftover_in(),
            counts: self.counts(),
            total_hold_force_lb: self.total_hold_force_lb(),
            removal_capacity_lb: self.removal_capacity_lb(saturation),
            is_valid: self.is_valid(),
            slots: self.slots(),
            errors: self.errors(),
        }
    }
}

/// Snapshot of a [`BarTemplate`] for display or transport.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BarTemplateSummary {
    pub target_oal_in: f64,
    pub achieved_oal_in: f64,
    pub leftover_in: f64,
    pub counts: BarCounts,
    pub total_hold_force_lb: f64,
    pub removal_capacity_lb: f64,
    pub is_valid: bool,
    pub slots: Vec<BarSlot>,
    pub errors: Vec<CalcError>,
}

/// Lay out a bar from an ordered list of specs.
///
/// Unknown ids and family violations are recorded on the template and the
/// remaining specs are still laid out. The template is always returned.
///
/// ```rust
/// use conveyor_core::bars::{build_bar_template, LayoutOptions, MagnetCatalog, MagnetSpec};
///
/// let specs = vec![MagnetSpec::new("NEO-2", 4), MagnetSpec::new("NOPE", 1)];
/// let catalog = MagnetCatalog::standard();
/// let template = build_bar_template(&specs, 8.375, &LayoutOptions::default(), catalog, None);
///
/// assert_eq!(template.magnet_count(), 4);
/// assert!(!template.is_valid());
/// ```
pub fn build_bar_template(
    specs: &[MagnetSpec],
    target_oal_in: f64,
    options: &LayoutOptions,
    catalog: &MagnetCatalog,
    family: Option<&ConveyorMagnetFamily>,
) -> BarTemplate {
    let mut template = BarTemplate::new(target_oal_in, *options);

    for spec in specs {
        let Some(item) = catalog.get(&spec.magnet_id) else {
            debug!(magnet_id = %spec.magnet_id, "unknown magnet id in bar spec");
            template.layout_errors.push(CalcError::magnet_not_found(&spec.magnet_id));
            continue;
        };

        if let Some(family) = family {
            if let Err(reason) = family.admits(item) {
                template
                    .layout_errors
                    .push(CalcError::family_mismatch(&item.id, &family.name, reason));
                continue;
            }
        }

        for _ in 0..spec.quantity {
            template.push(item.clone());
        }
    }

    if let Some(family) = family {
        if template.magnet_count() > family.max_magnets_per_bar as usize {
            template.layout_errors.push(CalcError::family_mismatch(
                "*",
                &family.name,
                format!(
                    "{} magnets exceeds the family maximum of {}",
                    template.magnet_count(),
                    family.max_magnets_per_bar
                ),
            ));
        }
    }

    debug!(
        target_oal_in,
        magnets = template.magnet_count(),
        achieved_oal_in = template.achieved_oal_in(),
        "bar template laid out"
    );
    template
}

/// Result of fitting one magnet length across a bar.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MagnetFit {
    pub count: u32,
    pub achieved_oal_in: f64,
    /// target − achieved (in)
    pub remaining_in: f64,
}

/// Maximum number of identical magnets that fit across `target_oal_in`.
///
/// ```text
/// count = ⌊(OAL − 2c + g) / (L + g)⌋
/// ```
///
/// Returns a zero count for non-positive length or OAL.
pub fn compute_magnet_fit(
    target_oal_in: f64,
    magnet_length_in: f64,
    gap_in: f64,
    end_clearance_in: f64,
) -> MagnetFit {
    let empty = MagnetFit {
        count: 0,
        achieved_oal_in: 0.0,
        remaining_in: target_oal_in.max(0.0),
    };
    if magnet_length_in <= 0.0 || target_oal_in <= 0.0 {
        return empty;
    }

    let gap = gap_in.max(0.0);
    let clearance = end_clearance_in.max(0.0);
    let raw = ((target_oal_in - 2.0 * clearance + gap) / (magnet_length_in + gap)).floor();
    if !raw.is_finite() || raw < 1.0 {
        return empty;
    }

    let count = raw as u32;
    let achieved_oal_in =
        2.0 * clearance + count as f64 * magnet_length_in + (count - 1) as f64 * gap;
    MagnetFit {
        count,
        achieved_oal_in,
        remaining_in: target_oal_in - achieved_oal_in,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parameters::ConveyorClass;

    fn catalog() -> &'static MagnetCatalog {
        MagnetCatalog::standard()
    }

    #[test]
    fn test_positions_accumulate_lengths_and_gaps() {
        let specs = vec![MagnetSpec::new("CER-2", 2), MagnetSpec::new("NEO-1", 1)];
        let options = LayoutOptions {
            gap_in: 0.25,
            end_clearance_in: 0.5,
            tolerance_in: 0.25,
        };
        let template = build_bar_template(&specs, 6.5, &options, catalog(), None);
        let slots = template.slots();

        assert_eq!(slots.len(), 3);
        assert_eq!(slots[0].position_in, 0.5);
        assert_eq!(slots[1].position_in, 2.75);
        assert_eq!(slots[2].position_in, 5.0);
        // 0.5 + 2 + 0.25 + 2 + 0.25 + 1 + 0.5 = 6.5
        assert_eq!(template.achieved_oal_in(), 6.5);
        assert_eq!(template.leftover_in(), 0.0);
        assert!(template.is_valid());
    }

    #[test]
    fn test_unknown_id_does_not_halt_layout() {
        let specs = vec![
            MagnetSpec::new("NEO-2", 1),
            MagnetSpec::new("MISSING", 3),
            MagnetSpec::new("NEO-2", 1),
        ];
        let template =
            build_bar_template(&specs, 4.125, &LayoutOptions::default(), catalog(), None);

        assert_eq!(template.magnet_count(), 2);
        let errors = template.errors();
        assert_eq!(errors, vec![CalcError::magnet_not_found("MISSING")]);
        assert!(!template.is_valid());
    }

    #[test]
    fn test_overfill_and_underfill() {
        let specs = vec![MagnetSpec::new("CER-2", 6)];
        // 6 × 2 + 5 × 0.125 = 12.625
        let over = build_bar_template(&specs, 12.0, &LayoutOptions::default(), catalog(), None);
        assert!(over.leftover_in() < 0.0);
        assert_eq!(over.errors()[0].error_code(), "BAR_OVERFILLED");

        let under = build_bar_template(&specs, 13.5, &LayoutOptions::default(), catalog(), None);
        assert!((under.leftover_in() - 0.875).abs() < 1e-12);
        assert_eq!(under.errors()[0].error_code(), "BAR_UNDERFILLED");

        let within = build_bar_template(&specs, 12.75, &LayoutOptions::default(), catalog(), None);
        assert!(within.is_valid());
    }

    #[test]
    fn test_derived_values_follow_slot_edits() {
        let specs = vec![MagnetSpec::new("NEO-2", 3)];
        let mut template =
            build_bar_template(&specs, 6.25, &LayoutOptions::default(), catalog(), None);
        assert!(template.is_valid());
        let before = template.total_hold_force_lb();

        template.remove(0);
        assert_eq!(template.magnet_count(), 2);
        assert!(template.total_hold_force_lb() < before);
        assert!(!template.is_valid());

        template.push(catalog().get("CER-2").unwrap().clone());
        assert!(template.is_valid());
        assert_eq!(template.counts(), BarCounts::new(1, 2));
    }

    #[test]
    fn test_family_rules() {
        let family = ConveyorMagnetFamily::for_class(ConveyorClass::Standard);
        let mut local = catalog().clone();
        local
            .items
            .push(MagnetCatalogItem::new("CER-3", MagnetMaterial::Ceramic, 3.0, 0.18));

        let specs = vec![MagnetSpec::new("CER-3", 1), MagnetSpec::new("CER-2", 1)];
        let options = LayoutOptions::default();
        let template = build_bar_template(&specs, 2.0, &options, &local, Some(&family));
        assert_eq!(template.magnet_count(), 1);
        assert_eq!(template.errors()[0].error_code(), "FAMILY_MISMATCH");

        let crowded = vec![MagnetSpec::new("NEO-1", 17)];
        let template = build_bar_template(&crowded, 19.0, &options, &local, Some(&family));
        assert!(template.errors().iter().any(|e| {
            matches!(e, CalcError::FamilyMismatch { reason, .. } if reason.contains("maximum"))
        }));
    }

    #[test]
    fn test_removal_capacity_applies_saturation() {
        let specs = vec![MagnetSpec::new("NEO-2", 4)];
        let template = build_bar_template(&specs, 12.0, &LayoutOptions::default(), catalog(), None);
        let table = SaturationTable::default();
        let expected = 4.0 * 0.298 * 0.884;
        assert!((template.removal_capacity_lb(&table) - expected).abs() < 1e-9);

        let summary = template.summary(&table);
        assert_eq!(summary.slots.len(), 4);
        assert_eq!(summary.counts.rare_earth_count, 4);
    }

    #[test]
    fn test_magnet_fit() {
        let fit = compute_magnet_fit(12.0, 2.0, 0.125, 0.0);
        assert_eq!(fit.count, 5);
        assert_eq!(fit.achieved_oal_in, 10.5);
        assert_eq!(fit.remaining_in, 1.5);

        let exact = compute_magnet_fit(10.5, 2.0, 0.125, 0.0);
        assert_eq!(exact.count, 5);
        assert_eq!(exact.remaining_in, 0.0);

        let with_clearance = compute_magnet_fit(12.0, 2.0, 0.125, 1.0);
        assert_eq!(with_clearance.count, 4);
        assert_eq!(with_clearance.achieved_oal_in, 2.0 + 8.0 + 0.375);
    }

    #[test]
    fn test_magnet_fit_degenerate_inputs() {
        assert_eq!(compute_magnet_fit(12.0, 0.0, 0.125, 0.0).count, 0);
        assert_eq!(compute_magnet_fit(12.0, -1.0, 0.125, 0.0).count, 0);
        assert_eq!(compute_magnet_fit(0.0, 2.0, 0.125, 0.0).count, 0);
        assert_eq!(compute_magnet_fit(-5.0, 2.0, 0.125, 0.0).count, 0);
        // Clearances eat the whole bar
        assert_eq!(compute_magnet_fit(3.0, 2.0, 0.125, 1.0).count, 0);
    }
}
