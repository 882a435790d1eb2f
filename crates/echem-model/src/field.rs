//! Column metadata records.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::dimension::Dimension;

/// Provenance comment attached to descriptors that were not supplied by the
/// user or found in a device registry.
pub const AUTO_GENERATED_COMMENT: &str = "auto-generated";

/// Metadata describing one column of a table.
///
/// Attributes other than the ones modeled here (for example a `type` key in
/// user metadata) are kept in [`FieldDescriptor::extra`] and serialized flat,
/// so user metadata passes through unchanged.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct FieldDescriptor {
    /// Column name. User metadata may omit it; such descriptors are dropped
    /// during reconciliation.
    #[serde(default)]
    pub name: String,
    /// Physical unit, e.g. `V` or `uA / cm2`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub unit: Option<String>,
    /// Reference the value is measured against, e.g. `RHE` for potentials.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub reference: Option<String>,
    /// Physical dimension of the column.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dimension: Option<Dimension>,
    /// Human-readable description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Provenance note.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Any further attributes.
    #[serde(flatten)]
    pub extra: BTreeMap<String, serde_json::Value>,
}

impl FieldDescriptor {
    /// Creates a descriptor carrying only a name.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }

    /// Creates the placeholder used for columns nobody described.
    pub fn auto_generated(name: impl Into<String>) -> Self {
        Self::new(name).with_comment(AUTO_GENERATED_COMMENT)
    }

    /// Sets the unit.
    pub fn with_unit(mut self, unit: impl Into<String>) -> Self {
        self.unit = Some(unit.into());
        self
    }

    /// Sets the reference.
    pub fn with_reference(mut self, reference: impl Into<String>) -> Self {
        self.reference = Some(reference.into());
        self
    }

    /// Sets the dimension tag.
    pub fn with_dimension(mut self, dimension: Dimension) -> Self {
        self.dimension = Some(dimension);
        self
    }

    /// Sets the description.
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the provenance comment.
    pub fn with_comment(mut self, comment: impl Into<String>) -> Self {
        self.comment = Some(comment.into());
        self
    }

    /// Returns true if the descriptor has a non-blank name.
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }

    /// Returns true if the descriptor is a generated placeholder.
    pub fn is_auto_generated(&self) -> bool {
        self.comment.as_deref() == Some(AUTO_GENERATED_COMMENT)
    }

    /// Returns a copy of this descriptor under a different name.
    pub fn renamed(&self, name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..self.clone()
        }
    }
}
