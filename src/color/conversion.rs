//! Display color conversions for sampled regions
//!
//! Turns an 8-bit channel mean into the sRGB, hex and CIE Lab values shown
//! next to an analysis result. None of this feeds the classifier or the
//! estimator; those work on raw channel means.

use palette::{FromColor, Lab, Srgb};

use crate::sampling::ColorSample;

/// Converter from channel means to display color representations
#[derive(Debug, Clone, Copy, Default)]
pub struct ColorConverter;

impl ColorConverter {
    pub fn new() -> Self {
        Self
    }

    /// Normalise a 0-255 sample into sRGB components in [0, 1]
    pub fn sample_to_srgb(&self, sample: &ColorSample) -> Srgb {
        let unit = |v: f64| (v / 255.0).clamp(0.0, 1.0) as f32;
        Srgb::new(unit(sample.red), unit(sample.green), unit(sample.blue))
    }

    /// Convert a sample to CIE Lab (D65)
    pub fn sample_to_lab(&self, sample: &ColorSample) -> Lab {
        Lab::from_color(self.sample_to_srgb(sample))
    }

    /// Convert sRGB to hexadecimal color string
    ///
    /// # Returns
    ///
    /// Hex color string (e.g., "#FF0000")
    pub fn srgb_to_hex(&self, srgb: Srgb) -> String {
        let r = (srgb.red * 255.0).round() as u8;
        let g = (srgb.green * 255.0).round() as u8;
        let b = (srgb.blue * 255.0).round() as u8;
        format!("#{:02X}{:02X}{:02X}", r, g, b)
    }

    /// Hex string of a sample's mean color
    pub fn sample_to_hex(&self, sample: &ColorSample) -> String {
        self.srgb_to_hex(self.sample_to_srgb(sample))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sample_to_hex() {
        let converter = ColorConverter::new();
        assert_eq!(converter.sample_to_hex(&ColorSample::new(255.0, 0.0, 0.0)), "#FF0000");
        assert_eq!(converter.sample_to_hex(&ColorSample::new(0.0, 255.0, 0.0)), "#00FF00");
        assert_eq!(converter.sample_to_hex(&ColorSample::new(230.4, 190.6, 40.0)), "#E6BF28");
    }

    #[test]
    fn test_out_of_range_sample_is_clamped() {
        let converter = ColorConverter::new();
        let srgb = converter.sample_to_srgb(&ColorSample::new(300.0, -5.0, 128.0));
        assert_eq!(srgb.red, 1.0);
        assert_eq!(srgb.green, 0.0);
        assert!(srgb.blue > 0.5 && srgb.blue < 0.51);
    }

    #[test]
    fn test_white_lab() {
        let converter = ColorConverter::new();
        let lab = converter.sample_to_lab(&ColorSample::new(255.0, 255.0, 255.0));
        assert!(lab.l > 99.0);
        assert!(lab.a.abs() < 1.0);
        assert!(lab.b.abs() < 1.0);
    }

    #[test]
    fn test_yellow_lab_has_positive_b() {
        let converter = ColorConverter::new();
        let lab = converter.sample_to_lab(&ColorSample::new(230.0, 200.0, 60.0));
        assert!(lab.b > 40.0);
    }
}
