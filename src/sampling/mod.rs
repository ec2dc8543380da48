//! Region-of-interest sampling
//!
//! Extracts a deterministic central region from a decoded image and reduces it
//! to per-channel means.

pub mod region;

pub use region::{RegionSampler, Roi, RoiGeometry, RoiSelection, RoiStrategy};

use serde::{Deserialize, Serialize};

/// Mean channel intensities of a sampled region, canonical RGB order, 0-255
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ColorSample {
    pub red: f64,
    pub green: f64,
    pub blue: f64,
}

impl ColorSample {
    pub fn new(red: f64, green: f64, blue: f64) -> Self {
        Self { red, green, blue }
    }

    /// Channels as an `(r, g, b)` tuple
    pub fn rgb(&self) -> (f64, f64, f64) {
        (self.red, self.green, self.blue)
    }

    /// Copy with every channel rounded to `decimals` places, for display only
    pub fn rounded(&self, decimals: u32) -> ColorSample {
        let factor = 10f64.powi(decimals as i32);
        let round = |v: f64| (v * factor).round() / factor;
        ColorSample::new(round(self.red), round(self.green), round(self.blue))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_rounded_two_decimals() {
        let sample = ColorSample::new(201.456, 150.004, 99.996);
        let shown = sample.rounded(2);
        assert_eq!(shown.rgb(), (201.46, 150.0, 100.0));
        // original untouched
        assert_eq!(sample.red, 201.456);
    }
}
