use thiserror::Error;

use spectrapro::{Error as ProcessingError, ReadError};

/// Application-specific errors for the CLI
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Missing required argument: {arg}")]
    MissingArgument { arg: String },

    #[error(transparent)]
    Processing(#[from] ProcessingError),
}

/// Message shown to the person running the tool, with the cause appended where it helps.
pub fn user_message(err: &AppError) -> String {
    let err = match err {
        AppError::Processing(e) => e,
        other => return other.to_string(),
    };
    match err {
        ProcessingError::RasterRead(ReadError::NotRaster { path, .. }) => {
            format!("Invalid or corrupt file: {} is not a readable raster.", path.display())
        }
        ProcessingError::RasterRead(ReadError::Io(e)) => {
            format!("Could not read the input file: {}", e)
        }
        ProcessingError::RasterRead(e) => format!("Invalid or corrupt file: {}", e),
        ProcessingError::InsufficientBands { actual, required } => format!(
            "This operation needs a raster with at least {} bands, but the file has {}.",
            required, actual
        ),
        ProcessingError::ShapeMismatch { .. } => {
            format!("The raster's bands have inconsistent dimensions ({})", err)
        }
        ProcessingError::EmptyBand => {
            "A required band contains no usable samples (all no-data).".to_string()
        }
        other => format!("An unexpected error occurred: {}", other),
    }
}
