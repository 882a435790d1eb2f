//! Field descriptors embedded in user metadata.
//!
//! Metadata is a free-form JSON document. Field descriptors live under
//! `figure description` → `schema` → `fields`; older documents put them
//! directly under `figure description` → `fields`.

use echem_model::FieldDescriptor;
use serde_json::Value;

use crate::error::{IngestError, Result};

/// Key of the section describing the recorded figure.
pub const FIGURE_DESCRIPTION_KEY: &str = "figure description";

/// Extracts the field descriptors from a metadata document.
///
/// Returns `Ok(None)` when the document has no fields or an empty list.
///
/// # Errors
///
/// Returns [`IngestError::Metadata`] when the fields entry exists but is not
/// a list of descriptor objects.
pub fn fields_from_metadata(metadata: &Value) -> Result<Option<Vec<FieldDescriptor>>> {
    let Some(figure) = metadata.get(FIGURE_DESCRIPTION_KEY) else {
        return Ok(None);
    };

    let fields = figure
        .get("schema")
        .and_then(|schema| schema.get("fields"))
        .or_else(|| figure.get("fields"));

    let Some(fields) = fields else {
        return Ok(None);
    };
    if fields.is_null() {
        return Ok(None);
    }

    let fields: Vec<FieldDescriptor> =
        serde_json::from_value(fields.clone()).map_err(|e| IngestError::Metadata {
            reason: e.to_string(),
        })?;

    if fields.is_empty() {
        return Ok(None);
    }
    Ok(Some(fields))
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_fields_from_schema_section() {
        let metadata = json!({"figure description": {"schema": {"fields": [
            {"name": "t", "unit": "s"},
            {"name": "E", "unit": "V", "reference": "RHE"}
        ]}}});
        let fields = fields_from_metadata(&metadata).unwrap().unwrap();

        assert_eq!(fields.len(), 2);
        assert_eq!(fields[1].reference.as_deref(), Some("RHE"));
    }

    #[test]
    fn test_fields_from_legacy_section() {
        let metadata = json!({"figure description": {"fields": [{"name": "x", "unit": "m"}]}});
        let fields = fields_from_metadata(&metadata).unwrap().unwrap();
        assert_eq!(fields[0].name, "x");
    }

    #[test]
    fn test_missing_or_empty_fields() {
        assert!(fields_from_metadata(&json!({})).unwrap().is_none());
        assert!(
            fields_from_metadata(&json!({"figure description": {}}))
                .unwrap()
                .is_none()
        );
        assert!(
            fields_from_metadata(&json!({"figure description": {"schema": {"fields": []}}}))
                .unwrap()
                .is_none()
        );
    }

    #[test]
    fn test_malformed_fields() {
        let metadata = json!({"figure description": {"fields": "t,E,j"}});
        let err = fields_from_metadata(&metadata).unwrap_err();
        assert!(matches!(err, IngestError::Metadata { .. }));
    }
}
