//! Reconciliation of column names with field descriptors.
//!
//! Descriptors come from three sources, in order of precedence:
//!
//! 1. user-supplied descriptors (from metadata),
//! 2. the device [`FieldRegistry`](crate::FieldRegistry),
//! 3. an auto-generated placeholder carrying a provenance comment.

use echem_model::{FieldDescriptor, Schema, SchemaError};

/// Builds a schema with one descriptor per column.
///
/// With `user_fields`, descriptors without a name are dropped (with a
/// warning) and descriptors naming no column are discarded. Every column that
/// is still undescribed gets a descriptor from `registry_lookup`, or an
/// auto-generated placeholder. The result follows column order.
///
/// # Errors
///
/// Returns a [`SchemaError`] when the result does not describe exactly the
/// columns, for example because the user described a column twice or the
/// column line repeats a name.
pub fn reconcile<S, F>(
    column_names: &[S],
    user_fields: Option<Vec<FieldDescriptor>>,
    registry_lookup: F,
) -> Result<Schema, SchemaError>
where
    S: AsRef<str>,
    F: Fn(&str) -> Option<FieldDescriptor>,
{
    let mut remaining: Vec<FieldDescriptor> = match user_fields {
        Some(fields) => retain_column_fields(column_names, fields),
        None => Vec::new(),
    };

    let mut fields = Vec::with_capacity(column_names.len());
    for column in column_names {
        let column = column.as_ref();
        match remaining.iter().position(|field| field.name == column) {
            Some(idx) => fields.push(remaining.remove(idx)),
            None => fields.push(describe_column(column, &registry_lookup)),
        }
    }
    // Leftovers are repeated descriptors; validation reports them.
    fields.extend(remaining);

    let schema = Schema::new(fields);
    schema.validate_against(column_names)?;
    Ok(schema)
}

/// Drops unnamed descriptors and descriptors for absent columns.
fn retain_column_fields<S: AsRef<str>>(
    column_names: &[S],
    fields: Vec<FieldDescriptor>,
) -> Vec<FieldDescriptor> {
    fields
        .into_iter()
        .filter(|field| {
            if !field.has_name() {
                tracing::warn!(
                    unit = ?field.unit,
                    description = ?field.description,
                    "Dropping field descriptor without a name"
                );
                return false;
            }
            let is_column = column_names.iter().any(|c| c.as_ref() == field.name);
            if !is_column {
                tracing::debug!(
                    field = %field.name,
                    "Dropping field descriptor for a column that is not in the file"
                );
            }
            is_column
        })
        .collect()
}

fn describe_column<F>(column: &str, registry_lookup: &F) -> FieldDescriptor
where
    F: Fn(&str) -> Option<FieldDescriptor>,
{
    if let Some(field) = registry_lookup(column) {
        tracing::debug!(column, "Described column from registry");
        return field;
    }
    tracing::warn!(column, "No description for column, generating one");
    FieldDescriptor::auto_generated(column)
}
