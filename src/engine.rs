//! Analysis orchestration
//!
//! One call runs the whole transaction: decode, sample the qualitative
//! region, classify, sample the quantitative region, estimate, assemble.
//! Decode and sampling failures abort with a single error; classification
//! misses and unknown modes come back inside the result.

use std::path::Path;

use tracing::{debug, info, info_span};

use crate::calibration::{estimate, AnalysisMode};
use crate::color::{classify, ClassifierProfile, ColorConverter};
use crate::config::AnalysisConfig;
use crate::error::Result;
use crate::image_loader::{self, DecodedImage};
use crate::sampling::{RegionSampler, RoiSelection};
use crate::AnalysisResult;

/// Stateless analysis engine
///
/// Holds only read-only configuration, so one engine can serve concurrent
/// requests.
#[derive(Debug, Clone, Default)]
pub struct AnalysisEngine {
    config: AnalysisConfig,
    sampler: RegionSampler,
    converter: ColorConverter,
}

impl AnalysisEngine {
    pub fn new(config: AnalysisConfig) -> Self {
        let sampler = RegionSampler::with_geometry(config.sampling.geometry);
        Self {
            config,
            sampler,
            converter: ColorConverter::new(),
        }
    }

    pub fn config(&self) -> &AnalysisConfig {
        &self.config
    }

    /// Analyze encoded image bytes with explicit region strategies and profile
    ///
    /// # Errors
    ///
    /// Returns a decode-class `AnalysisError` if the bytes cannot be decoded
    /// or a sampling region collapses. No partial result is produced.
    pub fn analyze(
        &self,
        image_bytes: &[u8],
        mode: AnalysisMode,
        roi: RoiSelection,
        profile: ClassifierProfile,
    ) -> Result<AnalysisResult> {
        let span = info_span!("analyze", %mode, bytes = image_bytes.len());
        let _guard = span.enter();

        let image = image_loader::decode(image_bytes)?;
        self.analyze_image(&image, mode, roi, profile)
    }

    /// Analyze with the strategies and profile from the engine configuration
    pub fn analyze_bytes(&self, image_bytes: &[u8], mode: AnalysisMode) -> Result<AnalysisResult> {
        self.analyze(
            image_bytes,
            mode,
            self.config.sampling.selection,
            self.config.classification.profile,
        )
    }

    /// Analyze with a raw mode selector as received from a collaborator
    pub fn analyze_selector(&self, image_bytes: &[u8], selector: Option<&str>) -> Result<AnalysisResult> {
        self.analyze_bytes(image_bytes, AnalysisMode::from_selector(selector))
    }

    /// Read an image file and analyze it with the configured settings
    pub fn analyze_file(&self, path: &Path, mode: AnalysisMode) -> Result<AnalysisResult> {
        let span = info_span!("analyze_file", path = %path.display(), %mode);
        let _guard = span.enter();

        let image = image_loader::load_image(path)?;
        self.analyze_image(
            &image,
            mode,
            self.config.sampling.selection,
            self.config.classification.profile,
        )
    }

    /// Run the pipeline on an already decoded image
    pub fn analyze_image(
        &self,
        image: &DecodedImage,
        mode: AnalysisMode,
        roi: RoiSelection,
        profile: ClassifierProfile,
    ) -> Result<AnalysisResult> {
        let sample = self.sampler.sample(image, roi.qualitative)?;
        let category = classify(&sample, profile);
        debug!(?profile, %category, "classified sample");

        let quantitative = self.sampler.sample(image, roi.quantitative)?;
        let estimate = estimate(quantitative.green, mode);
        debug!(green = quantitative.green, estimate = ?estimate.value(), "estimated concentration");

        if !mode.is_valid() {
            info!("mode selector not recognised, returning invalid mode result");
        }

        Ok(AnalysisResult {
            qualitative_label: category.label().to_string(),
            advice: category.advice().map(str::to_string),
            category,
            estimate_label: estimate.label(),
            numeric_estimate: estimate.value(),
            unit: estimate.unit().map(|u| u.symbol().to_string()).unwrap_or_default(),
            mode,
            sample,
            green_mean: quantitative.green,
            hex: self.converter.sample_to_hex(&sample),
            lab: self.converter.sample_to_lab(&sample),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::color::ColorCategory;
    use crate::image_loader::ChannelOrder;
    use crate::sampling::RoiStrategy;

    fn uniform(width: u32, height: u32, rgb: [u8; 3]) -> DecodedImage {
        DecodedImage::from_raw(width, height, rgb.repeat((width * height) as usize), ChannelOrder::Rgb)
            .unwrap()
    }

    #[test]
    fn test_white_image_protein_yellow() {
        let engine = AnalysisEngine::default();
        let img = uniform(300, 300, [255, 255, 255]);
        let result = engine
            .analyze_image(&img, AnalysisMode::ProteinYellow, RoiSelection::default(), ClassifierProfile::FiveBand)
            .unwrap();

        assert_eq!(result.category, ColorCategory::Clear);
        assert_eq!(result.qualitative_label, "clear/near-colorless");
        assert_eq!(result.unit, "mg/mL");
        assert_eq!(result.hex, "#FFFFFF");
        let expected = (255.0 - 208.41) / 13.433 - 0.1;
        assert!((result.numeric_estimate.unwrap() - expected).abs() < 1e-9);
    }

    #[test]
    fn test_invalid_mode_still_classifies() {
        let engine = AnalysisEngine::default();
        let img = uniform(50, 50, [230, 190, 60]);
        let result = engine
            .analyze_image(&img, AnalysisMode::Invalid, RoiSelection::default(), ClassifierProfile::FiveBand)
            .unwrap();

        assert_eq!(result.category, ColorCategory::PaleYellow);
        assert_eq!(result.estimate_label, "invalid mode");
        assert_eq!(result.numeric_estimate, None);
        assert_eq!(result.unit, "");
    }

    #[test]
    fn test_strategies_follow_selection() {
        // left half red, right half green: the proportional crop of a wide
        // image and the canonical centre both straddle the seam evenly
        let (w, h) = (400u32, 200u32);
        let mut data = Vec::with_capacity((w * h * 3) as usize);
        for _y in 0..h {
            for x in 0..w {
                let px: [u8; 3] = if x < w / 2 { [200, 0, 0] } else { [0, 200, 0] };
                data.extend_from_slice(&px);
            }
        }
        let img = DecodedImage::from_raw(w, h, data, ChannelOrder::Rgb).unwrap();

        let engine = AnalysisEngine::default();
        let selection = RoiSelection {
            qualitative: RoiStrategy::FixedCanonical,
            quantitative: RoiStrategy::ProportionalCrop,
        };
        let result = engine
            .analyze_image(&img, AnalysisMode::NitriteWhite, selection, ClassifierProfile::Comparative)
            .unwrap();

        assert!((result.sample.red - 100.0).abs() < 2.0, "{:?}", result.sample);
        assert!((result.green_mean - 100.0).abs() < 2.0, "{}", result.green_mean);
    }

    #[test]
    fn test_engine_uses_config_profile() {
        let mut config = AnalysisConfig::default();
        config.classification.profile = ClassifierProfile::Comparative;
        let engine = AnalysisEngine::new(config);
        assert_eq!(engine.config().classification.profile, ClassifierProfile::Comparative);
    }

    #[test]
    fn test_engine_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<AnalysisEngine>();
    }
}
