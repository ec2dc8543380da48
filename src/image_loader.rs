//! Image decoding for uploaded sample photographs
//!
//! This module turns raw PNG/JPEG bytes into a [`DecodedImage`]: an immutable
//! pixel grid in canonical RGB order.
//!
//! ## Supported Formats
//!
//! - JPEG, PNG (via the `image` crate)
//!
//! Anything else, including zero-byte uploads, fails explicitly. The decoder
//! never substitutes a blank image.
//!
//! ## Channel order
//!
//! Pixel buffers coming from other tooling may be blue-green-red. Such buffers
//! enter through [`DecodedImage::from_raw`] with an explicit [`ChannelOrder`]
//! and are swapped once here, so everything downstream sees (R, G, B).

use crate::error::{AnalysisError, Result};
use image::{ImageFormat as RasterFormat, ImageReader, RgbImage};
use std::io::Cursor;
use std::path::Path;
use tracing::debug;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    /// JPEG image
    Jpeg,
    /// PNG image
    Png,
}

impl ImageFormat {
    /// Detect format from file extension
    pub fn from_extension(path: &Path) -> Option<ImageFormat> {
        let ext = path.extension()?.to_str()?.to_lowercase();
        match ext.as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            _ => None,
        }
    }

    fn from_raster(format: RasterFormat) -> Option<ImageFormat> {
        match format {
            RasterFormat::Jpeg => Some(ImageFormat::Jpeg),
            RasterFormat::Png => Some(ImageFormat::Png),
            _ => None,
        }
    }
}

/// Interleaved channel order of a raw pixel buffer
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChannelOrder {
    /// red, green, blue
    Rgb,
    /// blue, green, red
    Bgr,
}

/// Decoded pixel grid in canonical RGB order
#[derive(Debug, Clone)]
pub struct DecodedImage {
    pixels: RgbImage,
}

impl DecodedImage {
    /// Build an image from an interleaved 8-bit buffer.
    ///
    /// # Errors
    ///
    /// Returns `AnalysisError::InvalidDimensions` when either side is zero or
    /// the buffer length is not `width * height * 3`.
    pub fn from_raw(width: u32, height: u32, mut data: Vec<u8>, order: ChannelOrder) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidDimensions {
                width,
                height,
                reason: "image has no pixels".into(),
            });
        }

        let expected = width as usize * height as usize * 3;
        if data.len() != expected {
            return Err(AnalysisError::InvalidDimensions {
                width,
                height,
                reason: format!("expected {} bytes, got {}", expected, data.len()),
            });
        }

        if order == ChannelOrder::Bgr {
            for pixel in data.chunks_exact_mut(3) {
                pixel.swap(0, 2);
            }
        }

        let pixels = RgbImage::from_raw(width, height, data).ok_or_else(|| {
            AnalysisError::InvalidDimensions {
                width,
                height,
                reason: "buffer does not match dimensions".into(),
            }
        })?;

        Ok(Self { pixels })
    }

    fn from_rgb(pixels: RgbImage) -> Result<Self> {
        let (width, height) = pixels.dimensions();
        if width == 0 || height == 0 {
            return Err(AnalysisError::InvalidDimensions {
                width,
                height,
                reason: "image has no pixels".into(),
            });
        }
        Ok(Self { pixels })
    }

    pub fn width(&self) -> u32 {
        self.pixels.width()
    }

    pub fn height(&self) -> u32 {
        self.pixels.height()
    }

    /// Canonical (R, G, B) value at `(x, y)`
    pub fn rgb_at(&self, x: u32, y: u32) -> Option<[u8; 3]> {
        self.pixels.get_pixel_checked(x, y).map(|p| p.0)
    }

    pub(crate) fn as_rgb(&self) -> &RgbImage {
        &self.pixels
    }
}

/// Decode PNG or JPEG bytes into a [`DecodedImage`]
///
/// # Errors
///
/// Returns `AnalysisError::ImageLoadError` for empty, unrecognised or corrupt
/// data, and `AnalysisError::UnsupportedFormat` for recognised formats other
/// than PNG and JPEG.
///
/// # Example
///
/// ```rust,no_run
/// use urine_colorscan::image_loader::decode;
///
/// let bytes = std::fs::read("sample.png")?;
/// let image = decode(&bytes)?;
/// println!("Loaded image: {}x{}", image.width(), image.height());
/// # Ok::<(), Box<dyn std::error::Error>>(())
/// ```
pub fn decode(bytes: &[u8]) -> Result<DecodedImage> {
    if bytes.is_empty() {
        return Err(AnalysisError::image_load_msg("image data is empty"));
    }

    let reader = ImageReader::new(Cursor::new(bytes))
        .with_guessed_format()
        .map_err(|e| AnalysisError::image_load("Failed to read image data", e))?;

    let raster = reader
        .format()
        .ok_or_else(|| AnalysisError::image_load_msg("unrecognised image data"))?;

    let format = ImageFormat::from_raster(raster).ok_or_else(|| AnalysisError::UnsupportedFormat {
        format: format!("{:?}", raster),
    })?;

    let img = reader
        .decode()
        .map_err(|e| AnalysisError::image_load(format!("Failed to decode {:?} image", format), e))?;

    let rgb = img.to_rgb8();
    debug!(?format, width = rgb.width(), height = rgb.height(), "decoded image");

    DecodedImage::from_rgb(rgb)
}

/// Read an image file from disk and decode it
pub fn load_image(path: &Path) -> Result<DecodedImage> {
    let bytes = std::fs::read(path).map_err(|e| {
        AnalysisError::image_load(format!("Failed to open image file: {}", path.display()), e)
    })?;
    decode(&bytes)
}

/// Get list of all supported file extensions
pub fn supported_extensions() -> &'static [&'static str] {
    &["jpg", "jpeg", "png"]
}

/// Check if a file extension is supported
pub fn is_supported_extension(ext: &str) -> bool {
    let ext_lower = ext.to_lowercase();
    supported_extensions().contains(&ext_lower.as_str())
}
