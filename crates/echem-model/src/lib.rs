//! Data model for normalized electrochemistry tables.
//!
//! A table produced by a loader or converter travels together with a
//! [`Schema`]: one [`FieldDescriptor`] per column, carrying unit, reference,
//! [`Dimension`] tag and provenance.

pub mod dimension;
pub mod error;
pub mod field;
pub mod schema;

pub use dimension::Dimension;
pub use error::{Result, SchemaError};
pub use field::{AUTO_GENERATED_COMMENT, FieldDescriptor};
pub use schema::Schema;
