//! Calibration table and concentration estimation module
//!
//! This module holds the per-mode affine calibration constants and
//! turns a mean green intensity into an analyte concentration.

pub mod estimator;
pub mod table;

pub use estimator::{estimate, Estimate};
pub use table::{Analyte, AnalysisMode, Background, CalibrationParams, ConcentrationUnit};
