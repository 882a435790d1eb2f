//! Device identifiers and the device → loader registry.

use std::collections::HashMap;
use std::fmt;
use std::io::Read;
use std::str::FromStr;
use std::sync::OnceLock;

use serde::{Deserialize, Serialize};

use super::{CsvLoader, EcLabLoader, Loader, LoaderOptions};
use crate::error::{IngestError, Result};

/// Instrument file formats with a dedicated loader.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Device {
    /// Comma-separated values with a single column-name line.
    #[serde(alias = "csv")]
    Generic,
    /// BioLogic EC-Lab MPT text export.
    #[serde(alias = "ec-lab")]
    EcLab,
}

impl Device {
    /// All devices, in listing order.
    pub const ALL: [Device; 2] = [Device::Generic, Device::EcLab];

    /// Returns the canonical identifier.
    pub fn as_str(&self) -> &'static str {
        match self {
            Device::Generic => "generic",
            Device::EcLab => "eclab",
        }
    }

    /// Returns a short description for listings.
    pub fn description(&self) -> &'static str {
        match self {
            Device::Generic => "Comma-separated values with a column-name line",
            Device::EcLab => "BioLogic EC-Lab MPT text export",
        }
    }
}

impl fmt::Display for Device {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Device {
    type Err = IngestError;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "generic" | "csv" => Ok(Device::Generic),
            "eclab" | "ec-lab" => Ok(Device::EcLab),
            _ => Err(IngestError::UnknownDevice {
                name: s.to_string(),
            }),
        }
    }
}

/// Creates a loader from an input stream.
pub type LoaderConstructor = fn(&mut dyn Read, LoaderOptions) -> Result<Box<dyn Loader>>;

/// Registry of loader constructors indexed by device.
pub struct LoaderRegistry {
    constructors: HashMap<Device, LoaderConstructor>,
}

impl LoaderRegistry {
    /// Creates an empty registry.
    pub fn new() -> Self {
        Self {
            constructors: HashMap::new(),
        }
    }

    /// Registers a constructor, replacing any previous one for the device.
    pub fn register(&mut self, device: Device, constructor: LoaderConstructor) {
        self.constructors.insert(device, constructor);
    }

    /// Gets the constructor for a device.
    pub fn get(&self, device: Device) -> Option<LoaderConstructor> {
        self.constructors.get(&device).copied()
    }

    /// Returns the registered devices in listing order.
    pub fn devices(&self) -> Vec<Device> {
        let mut devices: Vec<Device> = self.constructors.keys().copied().collect();
        devices.sort();
        devices
    }

    /// Opens `reader` with the loader registered for `device`.
    pub fn open(
        &self,
        device: Device,
        reader: &mut dyn Read,
        options: LoaderOptions,
    ) -> Result<Box<dyn Loader>> {
        let constructor = self.get(device).ok_or_else(|| IngestError::UnknownDevice {
            name: device.to_string(),
        })?;
        tracing::debug!(%device, "Opening loader");
        constructor(reader, options)
    }
}

impl Default for LoaderRegistry {
    fn default() -> Self {
        let mut registry = Self::new();
        registry.register(Device::Generic, open_generic);
        registry.register(Device::EcLab, open_eclab);
        registry
    }
}

fn open_generic(reader: &mut dyn Read, options: LoaderOptions) -> Result<Box<dyn Loader>> {
    Ok(Box::new(CsvLoader::from_reader(reader, options)?))
}

fn open_eclab(reader: &mut dyn Read, options: LoaderOptions) -> Result<Box<dyn Loader>> {
    Ok(Box::new(EcLabLoader::from_reader(reader, options)?))
}

/// Cached registry with the built-in loaders.
static DEFAULT_REGISTRY: OnceLock<LoaderRegistry> = OnceLock::new();

/// Returns the registry with the built-in loaders.
pub fn default_registry() -> &'static LoaderRegistry {
    DEFAULT_REGISTRY.get_or_init(LoaderRegistry::default)
}

/// Opens `reader` with the built-in loader for `device`.
pub fn open_device(
    device: Device,
    reader: &mut dyn Read,
    options: LoaderOptions,
) -> Result<Box<dyn Loader>> {
    default_registry().open(device, reader, options)
}

/// Opens `reader` with the built-in loader for the device named `device`.
///
/// # Errors
///
/// Returns [`IngestError::UnknownDevice`] for names outside the supported
/// set, and any error of the loader itself.
pub fn open_loader(
    device: &str,
    reader: &mut dyn Read,
    options: LoaderOptions,
) -> Result<Box<dyn Loader>> {
    open_device(device.parse()?, reader, options)
}
