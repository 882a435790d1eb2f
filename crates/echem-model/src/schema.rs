//! Ordered collections of field descriptors.

use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::error::{Result, SchemaError};
use crate::field::FieldDescriptor;

/// An ordered sequence of field descriptors describing a table.
///
/// Named access goes through [`Schema::field`]; there is no mutable access to
/// individual descriptors. Renaming and projection build new schemas.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct Schema {
    fields: Vec<FieldDescriptor>,
}

impl Schema {
    /// Creates a schema from descriptors in the given order.
    pub fn new(fields: Vec<FieldDescriptor>) -> Self {
        Self { fields }
    }

    /// Returns the descriptors in order.
    pub fn fields(&self) -> &[FieldDescriptor] {
        &self.fields
    }

    /// Consumes the schema, returning its descriptors.
    pub fn into_fields(self) -> Vec<FieldDescriptor> {
        self.fields
    }

    /// Returns the number of descriptors.
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Returns true if there are no descriptors.
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// Iterates over the descriptors in order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldDescriptor> {
        self.fields.iter()
    }

    /// Returns the descriptor names in order.
    pub fn field_names(&self) -> Vec<&str> {
        self.fields.iter().map(|field| field.name.as_str()).collect()
    }

    /// Looks up a descriptor by exact name.
    pub fn field(&self, name: &str) -> Option<&FieldDescriptor> {
        self.fields.iter().find(|field| field.name == name)
    }

    /// Returns true if a descriptor with this name exists.
    pub fn contains(&self, name: &str) -> bool {
        self.field(name).is_some()
    }

    /// Fails with [`SchemaError::DuplicateField`] on the first name that
    /// appears twice.
    pub fn ensure_unique_names(&self) -> Result<()> {
        let mut seen = BTreeSet::new();
        for field in &self.fields {
            if !seen.insert(field.name.as_str()) {
                return Err(SchemaError::DuplicateField {
                    name: field.name.clone(),
                });
            }
        }
        Ok(())
    }

    /// Checks that this schema describes exactly the given columns.
    ///
    /// Counts are compared first, then duplicates, then membership in both
    /// directions. Order is not checked.
    pub fn validate_against<S: AsRef<str>>(&self, column_names: &[S]) -> Result<()> {
        if self.fields.len() != column_names.len() {
            return Err(SchemaError::FieldCountMismatch {
                columns: column_names.len(),
                fields: self.fields.len(),
            });
        }

        self.ensure_unique_names()?;

        for column in column_names {
            let column = column.as_ref();
            if !self.contains(column) {
                return Err(SchemaError::MissingField {
                    name: column.to_string(),
                });
            }
        }

        for field in &self.fields {
            if !column_names.iter().any(|c| c.as_ref() == field.name) {
                return Err(SchemaError::UnknownField {
                    name: field.name.clone(),
                });
            }
        }

        Ok(())
    }

    /// Returns a new schema with names replaced by `rename`.
    ///
    /// Descriptors for which `rename` returns `None` keep their name. The
    /// original schema is not modified.
    pub fn renamed<'a, F>(&self, rename: F) -> Schema
    where
        F: Fn(&str) -> Option<&'a str>,
    {
        let fields = self
            .fields
            .iter()
            .map(|field| match rename(&field.name) {
                Some(new_name) => field.renamed(new_name),
                None => field.clone(),
            })
            .collect();
        Schema::new(fields)
    }

    /// Returns a new schema holding the named descriptors in the order of
    /// `names`. Names without a descriptor are skipped.
    pub fn project<S: AsRef<str>>(&self, names: &[S]) -> Schema {
        let fields = names
            .iter()
            .filter_map(|name| self.field(name.as_ref()).cloned())
            .collect();
        Schema::new(fields)
    }
}

impl From<Vec<FieldDescriptor>> for Schema {
    fn from(fields: Vec<FieldDescriptor>) -> Self {
        Self::new(fields)
    }
}

impl<'a> IntoIterator for &'a Schema {
    type Item = &'a FieldDescriptor;
    type IntoIter = std::slice::Iter<'a, FieldDescriptor>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}
