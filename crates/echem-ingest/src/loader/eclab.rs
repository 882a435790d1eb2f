//! BioLogic EC-Lab MPT text exports.
//!
//! An MPT file starts with a header block whose second line announces its
//! size, e.g. `Nb header lines : 54`. The count includes the column-name
//! line, which is the last line of the block. Values are tab-separated,
//! every row ends with a tab, and the decimal separator follows the locale
//! of the machine that exported the file.

use std::io::Read;
use std::sync::LazyLock;

use encoding_rs::WINDOWS_1252;
use regex::Regex;

use super::{Device, Loader, LoaderOptions, read_source};
use crate::csv::RawFile;
use crate::error::{IngestError, Result};
use crate::registry::{ECLAB_FIELDS, FieldRegistry};

/// Header size marker, e.g. `Nb header lines : 54`.
static HEADER_LINES: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)nb\s+header\s+lines\s*:\s*(-?\d+)").expect("Invalid header marker regex")
});

/// Loader for EC-Lab MPT files.
#[derive(Debug, Clone)]
pub struct EcLabLoader {
    source: RawFile,
    options: LoaderOptions,
}

impl EcLabLoader {
    /// Reads an MPT file. Input that is not UTF-8 is decoded as
    /// Windows-1252 unless another encoding is configured.
    pub fn from_reader<R: Read>(reader: R, options: LoaderOptions) -> Result<Self> {
        let source = read_source(reader, &options, Some(WINDOWS_1252))?;
        Ok(Self { source, options })
    }

    /// Creates a loader over text that is already decoded.
    pub fn from_text(text: &str, options: LoaderOptions) -> Result<Self> {
        Self::from_reader(text.as_bytes(), options)
    }
}

impl Loader for EcLabLoader {
    fn device(&self) -> Device {
        Device::EcLab
    }

    fn source(&self) -> &RawFile {
        &self.source
    }

    fn options(&self) -> &LoaderOptions {
        &self.options
    }

    fn header_lines(&self) -> Result<usize> {
        let captures = HEADER_LINES
            .captures(self.source.text())
            .ok_or_else(|| IngestError::Parse {
                message: "the file does not announce its header size ('Nb header lines : N')"
                    .to_string(),
            })?;
        let count: i64 = captures[1].parse().map_err(|_| IngestError::Parse {
            message: format!("header size '{}' is not a number", &captures[1]),
        })?;
        if count < 1 {
            return Err(IngestError::Parse {
                message: format!("header size must be at least 1, found {count}"),
            });
        }
        // The announced count includes the column-name line.
        usize::try_from(count - 1).map_err(|_| IngestError::Parse {
            message: format!("header size {count} is out of range"),
        })
    }

    fn delimiter(&self) -> char {
        '\t'
    }

    fn decimal(&self) -> Result<char> {
        let first_row = self
            .data_lines()?
            .into_iter()
            .find(|line| !line.trim().is_empty());
        Ok(match first_row {
            Some(row) if row.contains(',') => ',',
            _ => '.',
        })
    }

    fn registry(&self) -> Option<&'static FieldRegistry> {
        Some(&ECLAB_FIELDS)
    }

    fn trims_trailing_delimiters(&self) -> bool {
        true
    }
}
