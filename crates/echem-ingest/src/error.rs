//! Error types for instrument file loading.

use echem_model::SchemaError;
use thiserror::Error;

use crate::loader::Device;

/// Errors that can occur while loading an instrument file.
#[derive(Debug, Error)]
pub enum IngestError {
    // === Input Errors ===
    /// Failed to read the input stream.
    #[error("failed to read input: {source}")]
    Read {
        #[source]
        source: std::io::Error,
    },

    /// Input bytes are not valid in the expected encoding.
    #[error("input is not valid {encoding} text")]
    Encoding { encoding: &'static str },

    /// Encoding label not recognized.
    #[error("unknown encoding label '{label}'")]
    UnknownEncoding { label: String },

    /// Input contains no text.
    #[error("input is empty")]
    EmptyInput,

    // === Parsing Errors ===
    /// A structural marker required by the file format is missing or malformed.
    #[error("parse error: {message}")]
    Parse { message: String },

    /// The file ends before the column-name line.
    #[error("no column-name line found at line {line}")]
    NoColumnLine { line: usize },

    /// The tabular engine rejected the data section.
    #[error("failed to parse data rows: {message}")]
    CsvParse { message: String },

    /// Data rows carry a different number of values than the column line.
    #[error("data rows have {found} values but the column line names {expected} columns")]
    RowWidth { expected: usize, found: usize },

    // === Capability Errors ===
    /// The loader variant has no implementation for the requested capability.
    #[error("{capability} is not supported by the {device} loader")]
    NotSupported {
        device: Device,
        capability: &'static str,
    },

    /// Device identifier not in the supported set.
    #[error("device with name '{name}' is unknown")]
    UnknownDevice { name: String },

    // === Schema Errors ===
    /// Field descriptors do not describe the table.
    #[error(transparent)]
    Schema(#[from] SchemaError),

    /// Field descriptors in the metadata could not be read.
    #[error("invalid fields in metadata: {reason}")]
    Metadata { reason: String },

    // === DataFrame Errors ===
    /// Failed DataFrame operation.
    #[error("DataFrame operation failed: {message}")]
    DataFrame { message: String },
}

impl From<polars::prelude::PolarsError> for IngestError {
    fn from(err: polars::prelude::PolarsError) -> Self {
        Self::DataFrame {
            message: err.to_string(),
        }
    }
}

/// Result type for loading operations.
pub type Result<T> = std::result::Result<T, IngestError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = IngestError::NotSupported {
            device: Device::Generic,
            capability: "decimal separator detection",
        };
        assert_eq!(
            err.to_string(),
            "decimal separator detection is not supported by the generic loader"
        );
    }

    #[test]
    fn test_schema_error_is_transparent() {
        let err: IngestError = SchemaError::FieldCountMismatch {
            columns: 4,
            fields: 3,
        }
        .into();
        assert_eq!(
            err.to_string(),
            "the number of columns (4) does not match the number of fields (3) in the schema"
        );
    }

    #[test]
    fn test_error_from_polars() {
        let polars_err = polars::prelude::PolarsError::ColumnNotFound("test".into());
        let ingest_err: IngestError = polars_err.into();
        assert!(matches!(ingest_err, IngestError::DataFrame { .. }));
    }
}
