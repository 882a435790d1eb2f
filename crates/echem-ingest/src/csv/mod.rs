//! Raw text handling and delimited-data parsing.

mod header;
mod reader;
mod source;

pub use header::{name_unnamed_columns, split_line, trim_trailing_delimiters};
pub use reader::{Dialect, read_table};
pub use source::RawFile;
