//! Error types for conversion.

use echem_ingest::IngestError;
use echem_model::{Dimension, SchemaError};
use thiserror::Error;

/// Errors that can occur while converting a loaded table.
#[derive(Debug, Error)]
pub enum ConvertError {
    /// No column carries any alias of a required dimension.
    #[error(
        "no column provides the {dimension} dimension (expected one of: {})",
        .dimension.aliases().join(", ")
    )]
    MissingDimension { dimension: Dimension },

    /// Renamed field descriptors do not describe the table.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// The loader failed.
    #[error(transparent)]
    Ingest(#[from] IngestError),

    /// Device identifier not in the supported set.
    #[error("no converter for device '{name}'")]
    UnknownDevice { name: String },

    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for ConvertError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for conversion operations.
pub type Result<T> = std::result::Result<T, ConvertError>;
