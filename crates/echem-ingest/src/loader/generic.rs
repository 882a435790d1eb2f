//! Plain comma-separated files.

use std::io::Read;

use super::{Device, Loader, LoaderOptions, read_source};
use crate::csv::RawFile;
use crate::error::Result;

/// Loader for comma-separated files whose first line holds the column names.
#[derive(Debug, Clone)]
pub struct CsvLoader {
    source: RawFile,
    options: LoaderOptions,
}

impl CsvLoader {
    /// Reads a CSV file. Input must be UTF-8 unless an encoding is configured.
    pub fn from_reader<R: Read>(reader: R, options: LoaderOptions) -> Result<Self> {
        let source = read_source(reader, &options, None)?;
        Ok(Self { source, options })
    }

    /// Creates a loader over text that is already decoded.
    pub fn from_text(text: &str, options: LoaderOptions) -> Result<Self> {
        Self::from_reader(text.as_bytes(), options)
    }
}

impl Loader for CsvLoader {
    fn device(&self) -> Device {
        Device::Generic
    }

    fn source(&self) -> &RawFile {
        &self.source
    }

    fn options(&self) -> &LoaderOptions {
        &self.options
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::IngestError;
    use echem_model::FieldDescriptor;
    use serde_json::json;

    #[test]
    fn test_defaults() {
        let loader = CsvLoader::from_text("a,b\n0,0\n1,1", LoaderOptions::new()).unwrap();

        assert_eq!(loader.header_lines().unwrap(), 0);
        assert_eq!(loader.delimiter(), ',');
        assert!(loader.header().unwrap().is_empty());
        assert_eq!(loader.column_names().unwrap(), vec!["a", "b"]);
    }

    #[test]
    fn test_decimal_not_supported() {
        let loader = CsvLoader::from_text("a\n1", LoaderOptions::new()).unwrap();
        let err = loader.decimal().unwrap_err();
        assert!(matches!(
            err,
            IngestError::NotSupported {
                device: Device::Generic,
                ..
            }
        ));
        // The table still parses with '.' as decimal separator.
        assert_eq!(loader.table().unwrap().height(), 1);
    }

    #[test]
    fn test_metadata_defaults_to_empty_object() {
        let loader = CsvLoader::from_text("a\n1", LoaderOptions::new()).unwrap();
        assert_eq!(loader.metadata(), json!({}));

        let metadata = json!({"source": {"citation key": "doe_2024"}});
        let loader =
            CsvLoader::from_text("a\n1", LoaderOptions::new().with_metadata(metadata.clone()))
                .unwrap();
        assert_eq!(loader.metadata(), metadata);
    }

    #[test]
    fn test_schema_from_metadata_fields() {
        let metadata = json!({"figure description": {"schema": {"fields": [
            {"name": "E", "unit": "V", "reference": "RHE"},
            {"unit": "A"}
        ]}}});
        let loader =
            CsvLoader::from_text("t,E\n0,0", LoaderOptions::new().with_metadata(metadata)).unwrap();
        let schema = loader.schema().unwrap();

        assert_eq!(schema.field_names(), vec!["t", "E"]);
        assert!(schema.field("t").unwrap().is_auto_generated());
        assert_eq!(schema.field("E").unwrap().reference.as_deref(), Some("RHE"));
    }

    #[test]
    fn test_explicit_fields_are_strict() {
        let fields = vec![FieldDescriptor::new("a"), FieldDescriptor::new("c")];
        let loader =
            CsvLoader::from_text("a,b\n0,0", LoaderOptions::new().with_fields(fields)).unwrap();
        let err = loader.schema().unwrap_err();
        assert_eq!(
            err.to_string(),
            "the schema does not have a description for the column with name 'b'"
        );
    }

    #[test]
    fn test_duplicate_columns_fail_before_parsing() {
        let loader = CsvLoader::from_text("a,a\n0,0", LoaderOptions::new()).unwrap();
        let err = loader.table().unwrap_err();
        assert!(matches!(err, IngestError::Schema(_)));
    }

    #[test]
    fn test_header_only_file() {
        let loader = CsvLoader::from_text("t,E,j\n", LoaderOptions::new()).unwrap();
        let loaded = loader.load().unwrap();
        assert_eq!(loaded.table.height(), 0);
        assert_eq!(loaded.table.width(), 3);
        assert_eq!(loaded.schema.len(), 3);
    }
}
