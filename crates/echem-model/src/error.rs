use thiserror::Error;

/// A schema that does not describe its table.
///
/// The variants fall into two kinds: a wrong number of descriptors
/// ([`SchemaError::FieldCountMismatch`]) and wrong names (every other
/// variant). [`SchemaError::is_count_mismatch`] tells them apart.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaError {
    #[error(
        "the number of columns ({columns}) does not match the number of fields ({fields}) in the schema"
    )]
    FieldCountMismatch { columns: usize, fields: usize },

    #[error("the schema does not have a description for the column with name '{name}'")]
    MissingField { name: String },

    #[error("the schema describes a field '{name}' which is not a column of the table")]
    UnknownField { name: String },

    #[error("the schema describes the field '{name}' more than once")]
    DuplicateField { name: String },
}

impl SchemaError {
    /// Returns true for the count kind of mismatch.
    pub fn is_count_mismatch(&self) -> bool {
        matches!(self, SchemaError::FieldCountMismatch { .. })
    }
}

pub type Result<T> = std::result::Result<T, SchemaError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn count_mismatch_reports_both_counts() {
        let err = SchemaError::FieldCountMismatch {
            columns: 4,
            fields: 3,
        };
        assert_eq!(
            err.to_string(),
            "the number of columns (4) does not match the number of fields (3) in the schema"
        );
        assert!(err.is_count_mismatch());
    }

    #[test]
    fn name_mismatch_is_not_count_mismatch() {
        let err = SchemaError::MissingField {
            name: "x".to_string(),
        };
        assert!(!err.is_count_mismatch());
    }
}
