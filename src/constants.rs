//! Sampling geometry and calibration constants
//!
//! Fixed values shared by the sampler, classifier and estimator. The
//! calibration table itself lives in [`crate::calibration::table`].

/// Region-of-interest geometry
pub mod roi {
    /// Side of the square cropped around the image midpoint (raw pixels)
    pub const CROP_SIZE: u32 = 150;

    /// Side of the canonical grid every sample is resized to
    pub const CANONICAL_SIZE: u32 = 200;

    /// Side of the square taken from the centre of the canonical grid
    pub const CANONICAL_ROI_SIZE: u32 = 80;
}

/// Concentration estimation
pub mod estimation {
    /// Systematic offset subtracted from every raw concentration
    pub const SYSTEMATIC_OFFSET: f64 = 0.1;

    /// Decimal places used when rendering estimates and sample colors
    pub const DISPLAY_DECIMALS: u32 = 2;

    /// Label returned when the mode selector is not recognised
    pub const INVALID_MODE_LABEL: &str = "invalid mode";
}

/// Five-band classification thresholds (8-bit channel means)
pub mod five_band {
    pub const CLEAR_MIN: f64 = 200.0;

    pub const PALE_RED_MIN: f64 = 200.0;
    pub const PALE_GREEN_MIN: f64 = 150.0;
    pub const PALE_GREEN_MAX: f64 = 200.0;
    pub const PALE_BLUE_MAX: f64 = 100.0;

    pub const DEEP_RED_MIN: f64 = 180.0;
    pub const DEEP_GREEN_MIN: f64 = 100.0;
    pub const DEEP_GREEN_MAX: f64 = 150.0;
    pub const DEEP_BLUE_MAX: f64 = 80.0;

    pub const ORANGE_RED_MIN: f64 = 150.0;
    pub const ORANGE_GREEN_MIN: f64 = 50.0;
    pub const ORANGE_GREEN_MAX: f64 = 100.0;
    pub const ORANGE_BLUE_MAX: f64 = 60.0;

    pub const BROWN_RED_MIN: f64 = 100.0;
    pub const BROWN_GREEN_MAX: f64 = 70.0;
    pub const BROWN_BLUE_MAX: f64 = 50.0;
}

/// Comparative classification thresholds
pub mod comparative {
    /// All channels above this read as colorless
    pub const COLORLESS_MIN: f64 = 200.0;

    /// Minimum channel lead for a tone to count as dominant
    pub const CHANNEL_LEAD: f64 = 30.0;
}
