//! Crate-level error type and `Result` alias for stable, structured error handling.
//! Wraps raster collaborator failures and I/O errors, and provides semantic variants
//! for band-count, shape and argument validation. Every variant classifies into one
//! [`ErrorKind`] so outer layers can pick a message without string matching.
use thiserror::Error;

use crate::raster::ReadError;
use crate::types::ErrorKind;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Raster read error: {0}")]
    RasterRead(#[from] ReadError),

    #[error("Insufficient bands: raster has {actual}, operation requires at least {required}")]
    InsufficientBands { actual: usize, required: usize },

    #[error("Shape mismatch: expected {}x{}, got {}x{}", .expected.0, .expected.1, .actual.0, .actual.1)]
    ShapeMismatch {
        expected: (usize, usize),
        actual: (usize, usize),
    },

    #[error("Band contains no finite samples to stretch")]
    EmptyBand,

    #[error("Invalid argument: {arg}={value}")]
    InvalidArgument { arg: &'static str, value: String },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unclassified error: {0}")]
    Unclassified(String),
}

impl Error {
    pub fn unclassified<E: std::fmt::Display>(e: E) -> Self {
        Error::Unclassified(e.to_string())
    }

    pub fn kind(&self) -> ErrorKind {
        match self {
            Error::RasterRead(_) => ErrorKind::RasterRead,
            Error::InsufficientBands { .. } => ErrorKind::InsufficientBands,
            Error::ShapeMismatch { .. } => ErrorKind::ShapeMismatch,
            Error::EmptyBand => ErrorKind::EmptyBand,
            Error::InvalidArgument { .. } | Error::Io(_) | Error::Unclassified(_) => {
                ErrorKind::Unclassified
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_bands_reports_both_counts() {
        let err = Error::InsufficientBands {
            actual: 4,
            required: 7,
        };
        assert_eq!(err.kind(), ErrorKind::InsufficientBands);
        let msg = err.to_string();
        assert!(msg.contains('4') && msg.contains('7'), "{}", msg);
    }

    #[test]
    fn unclassified_preserves_cause() {
        let err = Error::unclassified("encoder exploded");
        assert_eq!(err.kind(), ErrorKind::Unclassified);
        assert!(err.to_string().contains("encoder exploded"));
    }

    #[test]
    fn read_errors_classify_as_raster_read() {
        let err: Error = ReadError::BandOutOfRange { index: 9, count: 5 }.into();
        assert_eq!(err.kind(), ErrorKind::RasterRead);
    }
}
