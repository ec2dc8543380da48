//! Color classification and display conversion module
//!
//! This module maps sampled colors to qualitative categories and
//! converts them into display representations.

pub mod classifier;
pub mod conversion;

pub use classifier::{classify, ClassifierProfile, ColorCategory};
pub use conversion::ColorConverter;
