//! # Calculator Settings
//!
//! Empirical constants that shops recalibrate without a code change: the
//! per-magnet capacities, the bar weight fit, the saturation table, the bar
//! layout defaults and the validation thresholds.
//!
//! Every field has a default, so a settings file only needs the values it
//! changes:
//!
//! ```json
//! {
//!   "capacity_rates": { "ceramic_capacity_lb": 0.13, "rare_earth_capacity_lb": 0.31 },
//!   "limits": { "max_belt_speed_fpm": 45.0 }
//! }
//! ```

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::bars::{CapacityRates, LayoutOptions, SaturationTable};
use crate::calculations::MagnetWeightFit;
use crate::errors::{CalcError, CalcResult};
use crate::validation::ValidationLimits;

/// Tunable constants for one calculation run.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct CalculatorSettings {
    pub capacity_rates: CapacityRates,
    pub magnet_weight_fit: MagnetWeightFit,
    pub saturation: SaturationTable,
    pub layout: LayoutOptions,
    pub limits: ValidationLimits,
}

/// Load settings from a JSON file. Missing fields keep their defaults.
pub fn load_settings(path: &Path) -> CalcResult<CalculatorSettings> {
    let contents = fs::read_to_string(path).map_err(|e| {
        CalcError::file_error("read settings", path.display().to_string(), e.to_string())
    })?;

    serde_json::from_str(&contents).map_err(|e| CalcError::SerializationError {
        reason: format!("Invalid settings in {}: {}", path.display(), e),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_empty_object_is_default() {
        let settings: CalculatorSettings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, CalculatorSettings::default());
    }

    #[test]
    fn test_partial_override() {
        let json = r#"{ "limits": { "max_belt_speed_fpm": 45.0 } }"#;
        let settings: CalculatorSettings = serde_json::from_str(json).unwrap();
        assert_eq!(settings.limits.max_belt_speed_fpm, 45.0);
        assert_eq!(settings.limits.min_infeed_in, 18.0);
        assert_eq!(settings.capacity_rates, CapacityRates::default());
    }

    #[test]
    fn test_load_settings_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{ "magnet_weight_fit": {{ "intercept_lb": 0.3, "slope_lb_per_in": 0.5 }} }}"#
        )
        .unwrap();

        let settings = load_settings(file.path()).unwrap();
        assert_eq!(settings.magnet_weight_fit.intercept_lb, 0.3);
    }

    #[test]
    fn test_load_settings_missing_file() {
        let err = load_settings(Path::new("/definitely/not/here.json")).unwrap_err();
        assert_eq!(err.error_code(), "FILE_ERROR");
    }

    #[test]
    fn test_load_settings_bad_json() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "not json").unwrap();
        let err = load_settings(file.path()).unwrap_err();
        assert_eq!(err.error_code(), "SERIALIZATION_ERROR");
    }
}
