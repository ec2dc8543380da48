//! Error types for the urine_colorscan library

use thiserror::Error;

/// Result type alias for urine_colorscan operations
pub type Result<T> = std::result::Result<T, AnalysisError>;

/// Errors that abort an analysis.
///
/// Every variant is fatal to the current request. Classification misses and
/// unknown modes are not errors; they come back as ordinary result values.
#[derive(Error, Debug)]
pub enum AnalysisError {
    /// Image bytes could not be read or decoded
    #[error("Failed to load image: {message}")]
    ImageLoadError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Bytes decoded to a raster format the engine does not accept
    #[error("Unsupported image format: {format}")]
    UnsupportedFormat { format: String },

    /// Pixel grid dimensions or buffer size are unusable
    #[error("Invalid image dimensions {width}x{height}: {reason}")]
    InvalidDimensions {
        width: u32,
        height: u32,
        reason: String,
    },

    /// Region of interest collapsed to zero width or height after clamping
    #[error("Empty sampling region for {strategy} on {width}x{height} grid")]
    EmptyRegion {
        strategy: String,
        width: u32,
        height: u32,
    },
}

impl AnalysisError {
    /// Create an image load error with context
    pub fn image_load<E>(message: impl Into<String>, source: E) -> Self
    where
        E: std::error::Error + Send + Sync + 'static,
    {
        Self::ImageLoadError {
            message: message.into(),
            source: Some(Box::new(source)),
        }
    }

    /// Create an image load error without an underlying cause
    pub fn image_load_msg(message: impl Into<String>) -> Self {
        Self::ImageLoadError {
            message: message.into(),
            source: None,
        }
    }

    /// Whether this error belongs to the decode class (bad input bytes or an
    /// unusable region derived from them)
    pub fn is_decode_error(&self) -> bool {
        matches!(
            self,
            AnalysisError::ImageLoadError { .. }
                | AnalysisError::UnsupportedFormat { .. }
                | AnalysisError::InvalidDimensions { .. }
                | AnalysisError::EmptyRegion { .. }
        )
    }

    /// Get user-friendly error description for application display
    pub fn user_message(&self) -> String {
        match self {
            AnalysisError::ImageLoadError { message, .. } => {
                format!("Could not open the image file: {}", message)
            }
            AnalysisError::UnsupportedFormat { format } => {
                format!("Images must be PNG or JPEG (got {}).", format)
            }
            AnalysisError::InvalidDimensions { .. } => {
                "The image has no usable pixels. Please upload a different photo.".to_string()
            }
            AnalysisError::EmptyRegion { .. } => {
                "The image is too small to sample. Please upload a larger photo.".to_string()
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_class_covers_input_errors() {
        assert!(AnalysisError::image_load_msg("empty").is_decode_error());
        assert!(AnalysisError::UnsupportedFormat { format: "Gif".into() }.is_decode_error());
        assert!(AnalysisError::EmptyRegion {
            strategy: "proportional_crop".into(),
            width: 0,
            height: 4,
        }
        .is_decode_error());
        assert!(AnalysisError::InvalidDimensions {
            width: 0,
            height: 0,
            reason: "empty buffer".into(),
        }
        .is_decode_error());
    }

    #[test]
    fn test_image_load_keeps_source() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "gone");
        let err = AnalysisError::image_load("reading upload", io);
        assert!(std::error::Error::source(&err).is_some());
        assert_eq!(err.to_string(), "Failed to load image: reading upload");
    }

    #[test]
    fn test_user_message_mentions_format() {
        let err = AnalysisError::UnsupportedFormat { format: "Gif".into() };
        assert!(err.user_message().contains("Gif"));
    }
}
