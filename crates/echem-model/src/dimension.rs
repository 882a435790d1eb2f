//! Physical dimensions an electrochemistry table must provide.
//!
//! Each dimension accepts a small, ordered list of column-name aliases.
//! The order is a priority: when several aliases of one dimension are
//! present, the earlier alias wins wherever a single column is picked.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Canonical physical quantity of a column.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
#[non_exhaustive]
pub enum Dimension {
    /// Elapsed time, column `t`.
    Time,
    /// Electrode potential, columns `E` or `U`.
    Voltage,
    /// Current or current density, columns `I` or `j`.
    Current,
}

impl Dimension {
    /// Dimensions every converted table must contain, in output order.
    pub const CORE: [Dimension; 3] = [Dimension::Time, Dimension::Voltage, Dimension::Current];

    /// Returns the lowercase name used in messages and serialized metadata.
    pub fn as_str(&self) -> &'static str {
        match self {
            Dimension::Time => "time",
            Dimension::Voltage => "voltage",
            Dimension::Current => "current",
        }
    }

    /// Accepted column names for this dimension, highest priority first.
    pub fn aliases(&self) -> &'static [&'static str] {
        match self {
            Dimension::Time => &["t"],
            Dimension::Voltage => &["E", "U"],
            Dimension::Current => &["I", "j"],
        }
    }

    /// Resolves a canonical column name back to its dimension.
    pub fn for_alias(alias: &str) -> Option<Dimension> {
        Self::CORE
            .into_iter()
            .find(|dimension| dimension.aliases().contains(&alias))
    }
}

impl fmt::Display for Dimension {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Dimension {
    type Err = String;

    /// Parses a dimension name (case-insensitive).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "time" => Ok(Dimension::Time),
            "voltage" => Ok(Dimension::Voltage),
            "current" => Ok(Dimension::Current),
            _ => Err(format!("Unknown dimension: {s}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_are_priority_ordered() {
        assert_eq!(Dimension::Voltage.aliases(), &["E", "U"]);
        assert_eq!(Dimension::Current.aliases(), &["I", "j"]);
    }

    #[test]
    fn for_alias_resolves_known_names() {
        assert_eq!(Dimension::for_alias("t"), Some(Dimension::Time));
        assert_eq!(Dimension::for_alias("U"), Some(Dimension::Voltage));
        assert_eq!(Dimension::for_alias("j"), Some(Dimension::Current));
        assert_eq!(Dimension::for_alias("x"), None);
        // Aliases are case-sensitive: `e` is not a potential column.
        assert_eq!(Dimension::for_alias("e"), None);
    }

    #[test]
    fn parse_and_display() {
        assert_eq!("Current".parse::<Dimension>(), Ok(Dimension::Current));
        assert!("charge".parse::<Dimension>().is_err());
        assert_eq!(Dimension::Time.to_string(), "time");
    }
}
