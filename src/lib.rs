//! # Urine Colorscan
//!
//! A Rust crate for colorimetric analysis of urine samples and test-strip
//! pads from digital photographs.
//!
//! This library converts a photo into:
//! - A qualitative color category from a central sampling region
//! - A protein or nitrite concentration estimate under a yellow or white
//!   background calibration
//!
//! ## Example
//!
//! ```rust,no_run
//! use urine_colorscan::{AnalysisEngine, AnalysisMode};
//! use std::path::Path;
//!
//! let engine = AnalysisEngine::default();
//! let result = engine.analyze_file(Path::new("sample.jpg"), AnalysisMode::NitriteWhite)?;
//! println!("{} / {}", result.qualitative_label, result.estimate_label);
//! # Ok::<(), urine_colorscan::AnalysisError>(())
//! ```

use std::path::Path;

use palette::Lab;
use serde::{Deserialize, Serialize};

pub mod calibration;
pub mod color;
pub mod config;
pub mod constants;
pub mod engine;
pub mod error;
pub mod image_loader;
pub mod logger;
pub mod sampling;

pub use calibration::{AnalysisMode, ConcentrationUnit, Estimate};
pub use color::{ClassifierProfile, ColorCategory};
pub use config::AnalysisConfig;
pub use engine::AnalysisEngine;
pub use error::{AnalysisError, Result};
pub use sampling::{ColorSample, RoiSelection, RoiStrategy};

use constants::estimation::DISPLAY_DECIMALS;

/// Complete result of one analysis, ready for presentation
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisResult {
    /// Human-readable color category
    pub qualitative_label: String,
    /// Interpretation attached to the category, if any
    pub advice: Option<String>,
    /// Color category
    pub category: ColorCategory,
    /// Estimate text, e.g. "Nitrite level: 0.23 mg/L" or "invalid mode"
    pub estimate_label: String,
    /// Concentration, absent when the mode was not recognised
    pub numeric_estimate: Option<f64>,
    /// Unit symbol of `numeric_estimate`, empty when absent
    pub unit: String,
    /// Mode the estimate was computed under
    pub mode: AnalysisMode,
    /// Mean color of the qualitative region, unrounded
    pub sample: ColorSample,
    /// Mean green of the quantitative region, the estimator input
    pub green_mean: f64,
    /// Hexadecimal representation of `sample`
    pub hex: String,
    /// CIE Lab coordinates of `sample`
    pub lab: Lab,
}

impl AnalysisResult {
    /// Sample color rounded to two decimals for display
    pub fn display_rgb(&self) -> (f64, f64, f64) {
        self.sample.rounded(DISPLAY_DECIMALS).rgb()
    }

    pub fn has_estimate(&self) -> bool {
        self.numeric_estimate.is_some()
    }
}

/// Analyze an image file with the default engine configuration
///
/// # Errors
///
/// Returns `AnalysisError` if the file cannot be read or decoded as PNG/JPEG.
pub fn analyze_sample(image_path: &Path, mode: AnalysisMode) -> Result<AnalysisResult> {
    AnalysisEngine::default().analyze_file(image_path, mode)
}
