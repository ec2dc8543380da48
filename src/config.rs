//! Configuration structures for the urine_colorscan analysis engine.
//!
//! This module defines the tunable parts of an analysis: which region
//! strategy feeds each path, the region geometry, and the classifier
//! profile. Calibration constants are fixed and not configurable.
//!
//! # Configuration Loading
//!
//! Configuration can be loaded from JSON files or constructed programmatically:
//!
//! ```no_run
//! use urine_colorscan::AnalysisConfig;
//! use std::path::Path;
//!
//! // Load from file
//! let config = AnalysisConfig::from_json_file(Path::new("config.json"))?;
//!
//! // Or use defaults
//! let config = AnalysisConfig::default();
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Every field has a default, so a partial file such as
//! `{"classification": {"profile": "comparative"}}` is valid.

use serde::{Deserialize, Serialize};

use crate::color::ClassifierProfile;
use crate::sampling::{RoiGeometry, RoiSelection};

/// Complete engine configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Region sampling configuration
    pub sampling: SamplingConfig,

    /// Qualitative classification configuration
    pub classification: ClassificationConfig,
}

/// Region sampling parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SamplingConfig {
    /// Strategy per analysis path
    #[serde(flatten)]
    pub selection: RoiSelection,

    /// Crop and canonical grid sizes
    pub geometry: RoiGeometry,
}

/// Classification parameters.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassificationConfig {
    /// Rule set used to label samples
    pub profile: ClassifierProfile,
}

impl AnalysisConfig {
    /// Load configuration from JSON file
    pub fn from_json_file(path: &std::path::Path) -> Result<Self, Box<dyn std::error::Error>> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to JSON file
    pub fn to_json_file(&self, path: &std::path::Path) -> Result<(), Box<dyn std::error::Error>> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::sampling::RoiStrategy;

    #[test]
    fn test_defaults() {
        let config = AnalysisConfig::default();
        assert_eq!(config.sampling.selection.qualitative, RoiStrategy::ProportionalCrop);
        assert_eq!(config.sampling.selection.quantitative, RoiStrategy::FixedCanonical);
        assert_eq!(config.sampling.geometry.crop_size, 150);
        assert_eq!(config.sampling.geometry.canonical_size, 200);
        assert_eq!(config.sampling.geometry.canonical_roi_size, 80);
        assert_eq!(config.classification.profile, ClassifierProfile::FiveBand);
    }

    #[test]
    fn test_partial_json() {
        let config: AnalysisConfig =
            serde_json::from_str(r#"{"classification": {"profile": "comparative"}}"#).unwrap();
        assert_eq!(config.classification.profile, ClassifierProfile::Comparative);
        assert_eq!(config.sampling, SamplingConfig::default());
    }

    #[test]
    fn test_sampling_json_layout() {
        let json = r#"{
            "sampling": {
                "qualitative": "fixed_canonical",
                "quantitative": "proportional_crop",
                "geometry": {"crop_size": 100}
            }
        }"#;
        let config: AnalysisConfig = serde_json::from_str(json).unwrap();
        assert_eq!(config.sampling.selection.qualitative, RoiStrategy::FixedCanonical);
        assert_eq!(config.sampling.selection.quantitative, RoiStrategy::ProportionalCrop);
        assert_eq!(config.sampling.geometry.crop_size, 100);
        assert_eq!(config.sampling.geometry.canonical_size, 200);
    }

    #[test]
    fn test_json_file_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");

        let mut config = AnalysisConfig::default();
        config.classification.profile = ClassifierProfile::Comparative;
        config.to_json_file(&path).unwrap();

        let loaded = AnalysisConfig::from_json_file(&path).unwrap();
        assert_eq!(loaded, config);
    }

    #[test]
    fn test_missing_file_is_error() {
        assert!(AnalysisConfig::from_json_file(std::path::Path::new("no/such/config.json")).is_err());
    }
}
