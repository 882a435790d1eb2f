//! Device loaders.
//!
//! A loader owns the decoded text of one instrument file and derives every
//! view of it on demand: the header block, the column names, the field
//! schema and the data table. Nothing is cached besides the text, so every
//! accessor is a pure function of the buffer and the [`LoaderOptions`].
//!
//! # Example
//!
//! ```ignore
//! use echem_ingest::{LoaderOptions, open_loader};
//!
//! let loader = open_loader("eclab", &mut file, LoaderOptions::default())?;
//! let loaded = loader.load()?;
//! println!("{} rows", loaded.table.height());
//! ```

mod device;
mod eclab;
mod generic;

use std::fmt;
use std::io::Read;

use echem_model::{FieldDescriptor, Schema};
use encoding_rs::Encoding;
use polars::prelude::DataFrame;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::csv::{
    Dialect, RawFile, name_unnamed_columns, read_table, split_line, trim_trailing_delimiters,
};
use crate::error::{IngestError, Result};
use crate::metadata::fields_from_metadata;
use crate::reconcile::reconcile;
use crate::registry::FieldRegistry;

pub use device::{
    Device, LoaderConstructor, LoaderRegistry, default_registry, open_device, open_loader,
};
pub use eclab::EcLabLoader;
pub use generic::CsvLoader;

/// Options shared by all loaders.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoaderOptions {
    /// Free-form metadata document accompanying the file.
    pub metadata: Option<Value>,
    /// Explicit field descriptors, validated strictly against the columns.
    pub fields: Option<Vec<FieldDescriptor>>,
    /// Encoding label used when the input is not UTF-8 (e.g. `latin1`).
    pub encoding: Option<String>,
}

impl LoaderOptions {
    /// Creates empty options.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the metadata document.
    pub fn with_metadata(mut self, metadata: Value) -> Self {
        self.metadata = Some(metadata);
        self
    }

    /// Sets explicit field descriptors.
    pub fn with_fields(mut self, fields: Vec<FieldDescriptor>) -> Self {
        self.fields = Some(fields);
        self
    }

    /// Sets the fallback encoding label.
    pub fn with_encoding(mut self, label: impl Into<String>) -> Self {
        self.encoding = Some(label.into());
        self
    }

    /// Resolves the fallback encoding: the configured label if any,
    /// otherwise `default`.
    pub fn resolve_encoding(
        &self,
        default: Option<&'static Encoding>,
    ) -> Result<Option<&'static Encoding>> {
        match &self.encoding {
            Some(label) => Encoding::for_label(label.trim().as_bytes())
                .map(Some)
                .ok_or_else(|| IngestError::UnknownEncoding {
                    label: label.clone(),
                }),
            None => Ok(default),
        }
    }
}

/// Everything a loader produces for one file.
#[derive(Debug, Clone)]
pub struct LoadedTable {
    /// Data rows, columns named as in the file.
    pub table: DataFrame,
    /// One descriptor per table column.
    pub schema: Schema,
    /// Number of lines preceding the column-name line.
    pub header_lines: usize,
}

/// A parser for one instrument file format.
///
/// Implementors provide access to the decoded text and the options, and
/// override the format hooks (`header_lines`, `delimiter`, `decimal`,
/// `registry`) where they differ from plain CSV. Everything else is derived.
pub trait Loader: fmt::Debug {
    /// Returns the device this loader parses.
    fn device(&self) -> Device;

    /// Returns the decoded file.
    fn source(&self) -> &RawFile;

    /// Returns the options the loader was created with.
    fn options(&self) -> &LoaderOptions;

    /// Number of lines preceding the column-name line.
    fn header_lines(&self) -> Result<usize> {
        Ok(0)
    }

    /// Field separator.
    fn delimiter(&self) -> char {
        ','
    }

    /// Decimal separator of the data section.
    fn decimal(&self) -> Result<char> {
        Err(IngestError::NotSupported {
            device: self.device(),
            capability: "decimal separator detection",
        })
    }

    /// Known columns of the device, if it has a registry.
    fn registry(&self) -> Option<&'static FieldRegistry> {
        None
    }

    /// Whether rows end with delimiters that do not open a column.
    fn trims_trailing_delimiters(&self) -> bool {
        false
    }

    /// Returns the column-name line.
    fn column_line(&self) -> Result<&str> {
        let idx = self.header_lines()?;
        self.source()
            .lines()
            .nth(idx)
            .ok_or(IngestError::NoColumnLine { line: idx + 1 })
    }

    /// Returns the lines following the column-name line.
    fn data_lines(&self) -> Result<Vec<&str>> {
        let idx = self.header_lines()?;
        self.column_line()?;
        Ok(self.source().lines().skip(idx + 1).collect())
    }

    /// Returns the lines preceding the column-name line.
    fn header(&self) -> Result<Vec<String>> {
        let idx = self.header_lines()?;
        self.column_line()?;
        Ok(self.source().lines().take(idx).map(str::to_string).collect())
    }

    /// Returns the column names in file order, duplicates included.
    ///
    /// Empty entries are named `Unnamed: <index>`.
    fn column_names(&self) -> Result<Vec<String>> {
        let line = self.column_line()?;
        let line = if self.trims_trailing_delimiters() {
            trim_trailing_delimiters(line, self.delimiter())
        } else {
            line
        };
        Ok(name_unnamed_columns(split_line(line, self.delimiter())))
    }

    /// Returns a copy of the metadata document, or an empty object.
    fn metadata(&self) -> Value {
        self.options()
            .metadata
            .clone()
            .unwrap_or_else(|| Value::Object(Default::default()))
    }

    /// Builds the field schema for the columns.
    ///
    /// Explicit `fields` must describe the columns exactly. Fields found in
    /// the metadata are reconciled leniently. Without either, descriptors
    /// come from the device registry, in registry order, or are generated.
    fn schema(&self) -> Result<Schema> {
        let columns = self.column_names()?;
        let registry = self.registry();
        let lookup = |name: &str| registry.and_then(|registry| registry.lookup(name));

        if let Some(fields) = &self.options().fields {
            let schema = Schema::new(fields.clone());
            schema.validate_against(&columns)?;
            return Ok(schema);
        }

        let metadata_fields = match &self.options().metadata {
            Some(metadata) => fields_from_metadata(metadata)?,
            None => None,
        };
        if let Some(fields) = metadata_fields {
            tracing::debug!(
                device = %self.device(),
                fields = fields.len(),
                "Reconciling columns with metadata fields"
            );
            return Ok(reconcile(&columns, Some(fields), lookup)?);
        }

        let schema = reconcile(&columns, None, lookup)?;
        Ok(match registry {
            Some(registry) => Schema::new(registry.order_fields(schema.into_fields())),
            None => schema,
        })
    }

    /// Parses the data section into a table.
    ///
    /// The schema is checked first so that repeated column names surface as
    /// schema errors.
    fn table(&self) -> Result<DataFrame> {
        self.schema()?;
        let column_names = self.column_names()?;
        let decimal = match self.decimal() {
            Ok(decimal) => decimal,
            Err(IngestError::NotSupported { .. }) => '.',
            Err(err) => return Err(err),
        };
        let dialect = Dialect {
            delimiter: self.delimiter(),
            decimal,
            trim_trailing_delimiters: self.trims_trailing_delimiters(),
        };
        read_table(&column_names, &self.data_lines()?, dialect)
    }

    /// Produces the table, its schema and the header size.
    fn load(&self) -> Result<LoadedTable> {
        let schema = self.schema()?;
        let table = self.table()?;
        let header_lines = self.header_lines()?;
        tracing::info!(
            device = %self.device(),
            rows = table.height(),
            columns = table.width(),
            header_lines,
            "Loaded instrument file"
        );
        Ok(LoadedTable {
            table,
            schema,
            header_lines,
        })
    }
}

/// Reads and decodes an input stream for a loader.
fn read_source<R: Read>(
    reader: R,
    options: &LoaderOptions,
    fallback: Option<&'static Encoding>,
) -> Result<RawFile> {
    let fallback = options.resolve_encoding(fallback)?;
    let source = RawFile::read(reader, fallback)?;
    if source.is_blank() {
        return Err(IngestError::EmptyInput);
    }
    Ok(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use encoding_rs::WINDOWS_1252;
    use serde_json::json;

    #[test]
    fn test_resolve_encoding() {
        let options = LoaderOptions::new();
        assert_eq!(options.resolve_encoding(None).unwrap(), None);
        assert_eq!(
            options.resolve_encoding(Some(WINDOWS_1252)).unwrap(),
            Some(WINDOWS_1252)
        );

        let options = LoaderOptions::new().with_encoding("latin1");
        assert_eq!(options.resolve_encoding(None).unwrap(), Some(WINDOWS_1252));
    }

    #[test]
    fn test_unknown_encoding_label() {
        let options = LoaderOptions::new().with_encoding("klingon");
        let err = options.resolve_encoding(None).unwrap_err();
        assert!(matches!(err, IngestError::UnknownEncoding { .. }));
    }

    #[test]
    fn test_options_deserialize() {
        let options: LoaderOptions = serde_json::from_value(json!({
            "fields": [{"name": "t", "unit": "s"}],
            "encoding": "utf-8"
        }))
        .unwrap();

        assert!(options.metadata.is_none());
        assert_eq!(options.fields.unwrap()[0].name, "t");
        assert_eq!(options.encoding.as_deref(), Some("utf-8"));
    }

    #[test]
    fn test_blank_input_is_rejected() {
        let err = read_source("\n  \n".as_bytes(), &LoaderOptions::new(), None).unwrap_err();
        assert!(matches!(err, IngestError::EmptyInput));
    }
}
