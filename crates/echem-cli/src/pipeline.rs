//! File-level operations behind the subcommands.
//!
//! Each function handles one input file: choose the device, open the
//! loader, convert and write the outputs. Printing is left to the caller.

use std::fs::{self, File};
use std::io::BufReader;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use polars::prelude::{CsvWriter, DataFrame, SerWriter};
use serde_json::{Value, json};
use tracing::{debug, info, info_span};

use echem_ingest::{Device, Loader, LoaderOptions, open_device};
use echem_model::Schema;
use echem_transform::{AliasPolicy, converter_for};

/// Settings shared by `convert` and `inspect`.
#[derive(Debug, Clone, Default)]
pub struct InputConfig {
    /// Device to load with; detected from the file extension when unset.
    pub device: Option<Device>,
    /// Path of a JSON metadata document.
    pub metadata: Option<PathBuf>,
    /// Fallback encoding label.
    pub encoding: Option<String>,
}

/// Settings for one conversion.
#[derive(Debug, Clone, Default)]
pub struct OutputConfig {
    /// Output directory (default: `converted/` next to the input).
    pub output_dir: Option<PathBuf>,
    /// Report without writing files.
    pub dry_run: bool,
    /// Which voltage and current aliases to keep.
    pub policy: AliasPolicy,
}

/// Result of converting one file.
#[derive(Debug)]
pub struct ConversionResult {
    pub input: PathBuf,
    pub device: Device,
    pub rows: usize,
    pub schema: Schema,
    pub table_path: Option<PathBuf>,
    pub schema_path: Option<PathBuf>,
}

/// Loader view of one file, before conversion.
#[derive(Debug)]
pub struct Inspection {
    pub input: PathBuf,
    pub device: Device,
    pub header_lines: usize,
    pub delimiter: char,
    /// `None` when the loader does not detect decimal separators.
    pub decimal: Option<char>,
    pub rows: usize,
    pub schema: Schema,
}

/// Picks the device for a file from its extension.
///
/// `.mpt` files are EC-Lab exports; everything else is read as generic CSV.
pub fn detect_device(path: &Path) -> Device {
    match path.extension().and_then(|ext| ext.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("mpt") => Device::EcLab,
        _ => Device::Generic,
    }
}

/// Reads a JSON metadata document.
pub fn load_metadata(path: &Path) -> Result<Value> {
    let file = File::open(path).with_context(|| format!("open metadata {}", path.display()))?;
    serde_json::from_reader(BufReader::new(file))
        .with_context(|| format!("parse metadata {}", path.display()))
}

/// Opens `path` with the loader for the configured or detected device.
pub fn open_file(path: &Path, config: &InputConfig) -> Result<(Device, Box<dyn Loader>)> {
    let device = config.device.unwrap_or_else(|| detect_device(path));
    let mut options = LoaderOptions::new();
    if let Some(metadata_path) = &config.metadata {
        options = options.with_metadata(load_metadata(metadata_path)?);
    }
    if let Some(label) = &config.encoding {
        options = options.with_encoding(label.clone());
    }

    debug!(path = %path.display(), %device, "Opening input");
    let mut file = File::open(path).with_context(|| format!("open {}", path.display()))?;
    let loader = open_device(device, &mut file, options)
        .with_context(|| format!("load {} as {device}", path.display()))?;
    Ok((device, loader))
}

/// Converts one file and writes `<stem>.csv` and `<stem>.schema.json`.
pub fn convert_file(
    path: &Path,
    input: &InputConfig,
    output: &OutputConfig,
) -> Result<ConversionResult> {
    let span = info_span!("convert", path = %path.display());
    let _guard = span.enter();

    let (device, loader) = open_file(path, input)?;
    let converter = converter_for(device).with_policy(output.policy);
    let mut converted = converter
        .convert(loader.as_ref())
        .with_context(|| format!("convert {}", path.display()))?;

    let mut result = ConversionResult {
        input: path.to_path_buf(),
        device,
        rows: converted.table.height(),
        schema: converted.schema.clone(),
        table_path: None,
        schema_path: None,
    };
    if output.dry_run {
        info!("Dry run, no files written");
        return Ok(result);
    }

    let output_dir = output
        .output_dir
        .clone()
        .unwrap_or_else(|| default_output_dir(path));
    fs::create_dir_all(&output_dir)
        .with_context(|| format!("create output directory {}", output_dir.display()))?;
    let stem = path
        .file_stem()
        .and_then(|stem| stem.to_str())
        .unwrap_or("converted");

    let table_path = output_dir.join(format!("{stem}.csv"));
    write_table(&mut converted.table, &table_path)?;
    let schema_path = output_dir.join(format!("{stem}.schema.json"));
    write_schema(&converted.schema, &converter.metadata(loader.as_ref()), &schema_path)?;

    info!(
        table = %table_path.display(),
        schema = %schema_path.display(),
        "Wrote outputs"
    );
    result.table_path = Some(table_path);
    result.schema_path = Some(schema_path);
    Ok(result)
}

/// Describes how a file is read, without converting it.
pub fn inspect_file(path: &Path, input: &InputConfig) -> Result<Inspection> {
    let (device, loader) = open_file(path, input)?;
    let loaded = loader
        .load()
        .with_context(|| format!("load {}", path.display()))?;
    Ok(Inspection {
        input: path.to_path_buf(),
        device,
        header_lines: loaded.header_lines,
        delimiter: loader.delimiter(),
        decimal: loader.decimal().ok(),
        rows: loaded.table.height(),
        schema: loaded.schema,
    })
}

/// Writes a table as comma-separated values with a header line.
pub fn write_table(table: &mut DataFrame, path: &Path) -> Result<()> {
    let mut file = File::create(path).with_context(|| format!("create {}", path.display()))?;
    CsvWriter::new(&mut file)
        .include_header(true)
        .finish(table)
        .with_context(|| format!("write {}", path.display()))
}

/// Writes the schema and the metadata it was built from as one JSON document.
pub fn write_schema(schema: &Schema, metadata: &Value, path: &Path) -> Result<()> {
    let document = json!({
        "schema": schema,
        "metadata": metadata,
    });
    let text = serde_json::to_string_pretty(&document).context("serialize schema")?;
    fs::write(path, text).with_context(|| format!("write {}", path.display()))
}

fn default_output_dir(path: &Path) -> PathBuf {
    path.parent()
        .map(|parent| parent.join("converted"))
        .unwrap_or_else(|| PathBuf::from("converted"))
}
