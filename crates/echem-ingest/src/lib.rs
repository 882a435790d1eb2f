//! Instrument file loading.
//!
//! This crate turns raw instrument output into a Polars DataFrame plus a
//! [`Schema`](echem_model::Schema) describing every column.
//!
//! # Features
//!
//! - **Loaders**: generic CSV and BioLogic EC-Lab MPT files behind one
//!   [`Loader`] trait
//! - **Field Registries**: known vendor columns with units and dimensions
//! - **Schema Reconciliation**: merging user descriptors, registry entries
//!   and generated placeholders
//! - **Device Registry**: lookup of loaders by device name
//!
//! # Example
//!
//! ```ignore
//! use std::fs::File;
//! use echem_ingest::{Loader, LoaderOptions, open_loader};
//!
//! let mut file = File::open("cv.mpt")?;
//! let loader = open_loader("eclab", &mut file, LoaderOptions::default())?;
//! let loaded = loader.load()?;
//! ```

mod csv;
mod error;
mod loader;
mod metadata;
mod reconcile;
mod registry;

// === Error Types ===
pub use error::{IngestError, Result};

// === Text Handling ===
pub use csv::{Dialect, RawFile, read_table};

// === Loaders ===
pub use loader::{
    CsvLoader, Device, EcLabLoader, LoadedTable, Loader, LoaderConstructor, LoaderOptions,
    LoaderRegistry, default_registry, open_device, open_loader,
};

// === Schema Construction ===
pub use metadata::{FIGURE_DESCRIPTION_KEY, fields_from_metadata};
pub use reconcile::reconcile;
pub use registry::{ECLAB_FIELDS, FieldRegistry, RegistryEntry};
