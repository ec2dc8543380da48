//! Central region extraction and channel averaging
//!
//! Two strategies are supported:
//! - **Proportional crop**: a fixed-size square around the image midpoint is
//!   cut from the raw image, resized to the canonical grid and averaged in full.
//! - **Fixed canonical**: the whole image is resized to the canonical grid and
//!   a smaller square at the grid centre is averaged.
//!
//! Every bound is clamped independently into the grid. A region that collapses
//! to zero width or height is an error, never a division by zero.
//!
//! Resizing is two-tap bilinear at half-pixel centres: an output pixel reads
//! only the 2x2 source neighbourhood around its mapped position, so a large
//! downscale skips source pixels rather than averaging them.

use image::imageops;
use image::{Rgb, RgbImage};
use serde::{Deserialize, Serialize};
use std::fmt;
use tracing::debug;

use crate::constants::roi;
use crate::error::{AnalysisError, Result};
use crate::image_loader::DecodedImage;
use crate::sampling::ColorSample;

/// How the region of interest is derived from the image
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoiStrategy {
    /// Crop around the raw midpoint, then resize the crop to the canonical grid
    ProportionalCrop,
    /// Resize the whole image to the canonical grid, then take its centre
    FixedCanonical,
}

impl fmt::Display for RoiStrategy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RoiStrategy::ProportionalCrop => write!(f, "proportional_crop"),
            RoiStrategy::FixedCanonical => write!(f, "fixed_canonical"),
        }
    }
}

/// Which strategy feeds each analysis path
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiSelection {
    /// Region used for color classification
    pub qualitative: RoiStrategy,
    /// Region used for concentration estimation
    pub quantitative: RoiStrategy,
}

impl Default for RoiSelection {
    fn default() -> Self {
        Self {
            qualitative: RoiStrategy::ProportionalCrop,
            quantitative: RoiStrategy::FixedCanonical,
        }
    }
}

/// Pixel sizes used by both strategies
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RoiGeometry {
    /// Side of the raw crop for the proportional strategy
    pub crop_size: u32,
    /// Side of the canonical resize target
    pub canonical_size: u32,
    /// Side of the centre square sampled from the canonical grid
    pub canonical_roi_size: u32,
}

impl Default for RoiGeometry {
    fn default() -> Self {
        Self {
            crop_size: roi::CROP_SIZE,
            canonical_size: roi::CANONICAL_SIZE,
            canonical_roi_size: roi::CANONICAL_ROI_SIZE,
        }
    }
}

/// Axis-aligned region inside a pixel grid, half-open on the far edges
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Roi {
    pub x: u32,
    pub y: u32,
    pub width: u32,
    pub height: u32,
}

impl Roi {
    /// Square of side `size` centred at `(cx, cy)`, clamped into a
    /// `grid_width` x `grid_height` grid.
    ///
    /// The start of each axis is `max(0, c - size/2)` and the end is
    /// `min(start + size, extent)`.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyRegion` if the clamped region has zero
    /// width or height.
    pub fn centered(
        cx: i64,
        cy: i64,
        size: u32,
        grid_width: u32,
        grid_height: u32,
        strategy: RoiStrategy,
    ) -> Result<Roi> {
        let (x, width) = clamp_axis(cx, size, grid_width);
        let (y, height) = clamp_axis(cy, size, grid_height);

        if width == 0 || height == 0 {
            return Err(AnalysisError::EmptyRegion {
                strategy: strategy.to_string(),
                width: grid_width,
                height: grid_height,
            });
        }

        Ok(Roi { x, y, width, height })
    }

    /// Exclusive right edge
    pub fn right(&self) -> u32 {
        self.x + self.width
    }

    /// Exclusive bottom edge
    pub fn bottom(&self) -> u32 {
        self.y + self.height
    }

    pub fn area(&self) -> u64 {
        self.width as u64 * self.height as u64
    }
}

fn clamp_axis(center: i64, size: u32, extent: u32) -> (u32, u32) {
    let extent = extent as i64;
    let start = (center - size as i64 / 2).clamp(0, extent);
    let end = (start + size as i64).min(extent);
    (start as u32, (end - start).max(0) as u32)
}

/// Region sampler reducing a central ROI to mean channel values
#[derive(Debug, Clone, Default)]
pub struct RegionSampler {
    geometry: RoiGeometry,
}

impl RegionSampler {
    /// Create a sampler with the standard geometry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a sampler with custom geometry
    pub fn with_geometry(geometry: RoiGeometry) -> Self {
        Self { geometry }
    }

    pub fn geometry(&self) -> &RoiGeometry {
        &self.geometry
    }

    /// Region the proportional strategy crops from an image of this size
    pub fn proportional_roi(&self, width: u32, height: u32) -> Result<Roi> {
        Roi::centered(
            (width / 2) as i64,
            (height / 2) as i64,
            self.geometry.crop_size,
            width,
            height,
            RoiStrategy::ProportionalCrop,
        )
    }

    /// Region the fixed strategy samples from the canonical grid
    pub fn canonical_roi(&self) -> Result<Roi> {
        let size = self.geometry.canonical_size;
        Roi::centered(
            (size / 2) as i64,
            (size / 2) as i64,
            self.geometry.canonical_roi_size,
            size,
            size,
            RoiStrategy::FixedCanonical,
        )
    }

    /// Sample `image` with the given strategy
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::EmptyRegion` when the derived region collapses.
    pub fn sample(&self, image: &DecodedImage, strategy: RoiStrategy) -> Result<ColorSample> {
        let sample = match strategy {
            RoiStrategy::ProportionalCrop => self.sample_proportional(image)?,
            RoiStrategy::FixedCanonical => self.sample_canonical(image)?,
        };
        debug!(%strategy, r = sample.red, g = sample.green, b = sample.blue, "sampled region");
        Ok(sample)
    }

    fn sample_proportional(&self, image: &DecodedImage) -> Result<ColorSample> {
        let roi = self.proportional_roi(image.width(), image.height())?;
        let crop = imageops::crop_imm(image.as_rgb(), roi.x, roi.y, roi.width, roi.height).to_image();
        let canonical = self.to_canonical(&crop, RoiStrategy::ProportionalCrop)?;
        let full = Roi {
            x: 0,
            y: 0,
            width: canonical.width(),
            height: canonical.height(),
        };
        Ok(mean_rgb(&canonical, &full))
    }

    fn sample_canonical(&self, image: &DecodedImage) -> Result<ColorSample> {
        let canonical = self.to_canonical(image.as_rgb(), RoiStrategy::FixedCanonical)?;
        let roi = self.canonical_roi()?;
        Ok(mean_rgb(&canonical, &roi))
    }

    fn to_canonical(&self, img: &RgbImage, strategy: RoiStrategy) -> Result<RgbImage> {
        let size = self.geometry.canonical_size;
        if size == 0 || img.width() == 0 || img.height() == 0 {
            return Err(AnalysisError::EmptyRegion {
                strategy: strategy.to_string(),
                width: img.width(),
                height: img.height(),
            });
        }
        Ok(resize_bilinear(img, size, size))
    }
}

/// Source taps for one output coordinate along an axis
#[derive(Debug, Clone, Copy, PartialEq)]
struct Tap {
    lo: u32,
    hi: u32,
    frac: f64,
}

/// Taps mapping `dst_len` outputs onto `src_len` inputs (`src_len > 0`).
///
/// Output `d` reads position `(d + 0.5) * src_len / dst_len - 0.5`; positions
/// outside the source replicate the edge pixel.
fn linear_taps(src_len: u32, dst_len: u32) -> Vec<Tap> {
    let scale = src_len as f64 / dst_len as f64;
    let last = src_len.saturating_sub(1);

    (0..dst_len)
        .map(|d| {
            let pos = (d as f64 + 0.5) * scale - 0.5;
            let base = pos.floor();
            let (lo, frac) = if base < 0.0 {
                (0, 0.0)
            } else if base >= last as f64 {
                (last, 0.0)
            } else {
                (base as u32, pos - base)
            };
            Tap {
                lo,
                hi: (lo + 1).min(last),
                frac,
            }
        })
        .collect()
}

/// Resize `src` to `width` x `height`; `src` must be non-empty
fn resize_bilinear(src: &RgbImage, width: u32, height: u32) -> RgbImage {
    let xs = linear_taps(src.width(), width);
    let ys = linear_taps(src.height(), height);

    RgbImage::from_fn(width, height, |x, y| {
        let tx = xs[x as usize];
        let ty = ys[y as usize];
        let mut out = [0u8; 3];
        for (c, channel) in out.iter_mut().enumerate() {
            let along_row = |row: u32| {
                let left = src.get_pixel(tx.lo, row)[c] as f64;
                let right = src.get_pixel(tx.hi, row)[c] as f64;
                left + (right - left) * tx.frac
            };
            let top = along_row(ty.lo);
            let bottom = along_row(ty.hi);
            *channel = (top + (bottom - top) * ty.frac).round().clamp(0.0, 255.0) as u8;
        }
        Rgb(out)
    })
}

/// Arithmetic mean of every pixel in `roi`; `roi` must be non-empty and in bounds
fn mean_rgb(img: &RgbImage, roi: &Roi) -> ColorSample {
    let mut sums = [0u64; 3];
    for y in roi.y..roi.bottom() {
        for x in roi.x..roi.right() {
            let p = img.get_pixel(x, y);
            sums[0] += p[0] as u64;
            sums[1] += p[1] as u64;
            sums[2] += p[2] as u64;
        }
    }

    let n = roi.area() as f64;
    ColorSample::new(sums[0] as f64 / n, sums[1] as f64 / n, sums[2] as f64 / n)
}
