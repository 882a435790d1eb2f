//! Library components of the `echem-convert` command-line tool.

pub mod logging;
pub mod pipeline;
