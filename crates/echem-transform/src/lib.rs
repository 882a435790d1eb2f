//! Electrochemistry conversion crate.
//!
//! Maps the columns a loader produces onto the canonical electrochemistry
//! columns: time (`t`), voltage (`E`, `U`) and current (`I`, `j`).
//!
//! # Overview
//!
//! - **Rename maps**: per-device vendor name → canonical name tables
//! - **Dimension selection**: checks that time, voltage and current are
//!   present and picks their columns in canonical order
//! - **Converters**: rename, select and project table and schema together
//!
//! # Example
//!
//! ```ignore
//! use echem_ingest::{Device, LoaderOptions, open_device};
//! use echem_transform::converter_for;
//!
//! let loader = open_device(Device::EcLab, &mut file, LoaderOptions::default())?;
//! let converted = converter_for(Device::EcLab).convert(loader.as_ref())?;
//! assert_eq!(converted.schema.field_names(), vec!["t", "E", "I"]);
//! ```

mod converter;
mod device;
mod dimensions;
mod error;
mod rename;

// Error type
pub use error::{ConvertError, Result};

// Dimension selection
pub use dimensions::{
    AliasPolicy, electrochemistry_dimensions, select_dimensions, validate_core_dimensions,
};

// Conversion
pub use converter::{Converted, Converter};
pub use device::{ECLAB_CONVERTER, GENERIC_CONVERTER, converter, converter_for};
pub use rename::RenameMap;
