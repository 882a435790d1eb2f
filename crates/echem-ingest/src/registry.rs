//! Static tables of known vendor column names.
//!
//! A registry is the fallback source of field metadata: when the user did not
//! describe a column, its descriptor comes from here before falling back to
//! an auto-generated placeholder.

use echem_model::{Dimension, FieldDescriptor};

/// Known column of a vendor file format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RegistryEntry {
    /// Column name exactly as the instrument software writes it.
    pub name: &'static str,
    /// Physical unit, if the column carries one.
    pub unit: Option<&'static str>,
    /// Dimension tag, for columns that map onto a core dimension.
    pub dimension: Option<Dimension>,
    /// Human-readable description.
    pub description: &'static str,
}

impl RegistryEntry {
    const fn new(
        name: &'static str,
        unit: Option<&'static str>,
        dimension: Option<Dimension>,
        description: &'static str,
    ) -> Self {
        Self {
            name,
            unit,
            dimension,
            description,
        }
    }

    /// Builds the field descriptor for this entry.
    pub fn to_field(&self) -> FieldDescriptor {
        let mut field = FieldDescriptor::new(self.name).with_description(self.description);
        if let Some(unit) = self.unit {
            field = field.with_unit(unit);
        }
        if let Some(dimension) = self.dimension {
            field = field.with_dimension(dimension);
        }
        field
    }
}

/// Ordered list of known columns for one device.
#[derive(Debug, Clone, Copy)]
pub struct FieldRegistry {
    device: &'static str,
    entries: &'static [RegistryEntry],
}

impl FieldRegistry {
    /// Creates a registry over a static entry table.
    pub const fn new(device: &'static str, entries: &'static [RegistryEntry]) -> Self {
        Self { device, entries }
    }

    /// Returns the device this registry describes.
    pub fn device(&self) -> &'static str {
        self.device
    }

    /// Returns the entries in registry order.
    pub fn entries(&self) -> &'static [RegistryEntry] {
        self.entries
    }

    /// Returns the position of a column name in registry order.
    pub fn position(&self, name: &str) -> Option<usize> {
        self.entries.iter().position(|entry| entry.name == name)
    }

    /// Looks up a column name (exact match).
    pub fn lookup(&self, name: &str) -> Option<FieldDescriptor> {
        self.entries
            .iter()
            .find(|entry| entry.name == name)
            .map(RegistryEntry::to_field)
    }

    /// Reorders descriptors: registry-known names first in registry order,
    /// then the remaining descriptors in their incoming order.
    pub fn order_fields(&self, mut fields: Vec<FieldDescriptor>) -> Vec<FieldDescriptor> {
        fields.sort_by_key(|field| self.position(&field.name).unwrap_or(usize::MAX));
        fields
    }
}

const fn entry(
    name: &'static str,
    unit: Option<&'static str>,
    dimension: Option<Dimension>,
    description: &'static str,
) -> RegistryEntry {
    RegistryEntry::new(name, unit, dimension, description)
}

const ECLAB_ENTRIES: &[RegistryEntry] = &[
    entry("mode", None, None, "Control mode of the current technique step."),
    entry("ox/red", None, None, "Sign of the current: 1 oxidation, 0 reduction."),
    entry("error", None, None, "Set when the measurement point is erroneous."),
    entry("control changes", None, None, "Set when the control value changes."),
    entry("Ns changes", None, None, "Set when the sequence index changes."),
    entry("counter inc.", None, None, "Set when a loop counter is incremented."),
    entry("Ns", None, None, "Sequence index within the technique."),
    entry("time/s", Some("s"), Some(Dimension::Time), "Time since start of the experiment."),
    entry("control/V", Some("V"), None, "Applied control potential."),
    entry("control/mA", Some("mA"), None, "Applied control current."),
    entry(
        "Ewe/V",
        Some("V"),
        Some(Dimension::Voltage),
        "Potential of the working electrode.",
    ),
    entry(
        "<Ewe>/V",
        Some("V"),
        Some(Dimension::Voltage),
        "Averaged potential of the working electrode.",
    ),
    entry("Ece/V", Some("V"), None, "Potential of the counter electrode."),
    entry("I/mA", Some("mA"), Some(Dimension::Current), "Current."),
    entry("<I>/mA", Some("mA"), Some(Dimension::Current), "Averaged current."),
    entry("dq/mA.h", Some("mA h"), None, "Charge passed since the previous point."),
    entry("(Q-Qo)/mA.h", Some("mA h"), None, "Charge passed since the start."),
    entry("(Q-Qo)/C", Some("C"), None, "Charge passed since the start."),
    entry("I Range", None, None, "Current range selected on the potentiostat."),
    entry("cycle number", None, None, "Index of the potential cycle."),
    entry("half cycle", None, None, "Index of the half cycle."),
    entry("P/W", Some("W"), None, "Power."),
    entry("Analog IN 1/V", Some("V"), None, "Potential on the first analog input."),
];

/// Columns written by BioLogic EC-Lab into MPT text exports.
pub static ECLAB_FIELDS: FieldRegistry = FieldRegistry::new("eclab", ECLAB_ENTRIES);
