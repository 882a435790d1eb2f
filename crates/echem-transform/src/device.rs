//! Device → converter lookup.

use echem_ingest::Device;

use crate::converter::Converter;
use crate::error::{ConvertError, Result};
use crate::rename::RenameMap;

const ECLAB_RENAMES: &[(&str, &str)] = &[("time/s", "t"), ("Ewe/V", "E"), ("<I>/mA", "I")];

/// Converter for files that already use canonical names.
pub static GENERIC_CONVERTER: Converter = Converter::new("generic", RenameMap::EMPTY);

/// Converter for EC-Lab MPT files.
pub static ECLAB_CONVERTER: Converter =
    Converter::new("eclab", RenameMap::new(ECLAB_RENAMES));

/// Returns the built-in converter for a device.
pub fn converter_for(device: Device) -> &'static Converter {
    match device {
        Device::Generic => &GENERIC_CONVERTER,
        Device::EcLab => &ECLAB_CONVERTER,
    }
}

/// Returns the built-in converter for the device named `name`.
pub fn converter(name: &str) -> Result<&'static Converter> {
    let device: Device = name
        .parse()
        .map_err(|_| ConvertError::UnknownDevice {
            name: name.to_string(),
        })?;
    Ok(converter_for(device))
}
