//! Data-section parsing into Polars DataFrames.

use std::io::Cursor;

use polars::prelude::{Column, CsvReadOptions, DataFrame, DataType, IntoColumn, SerReader, Series};

use crate::error::{IngestError, Result};

use super::header::{split_line, trim_trailing_delimiters};

/// How values in the data section are separated and written.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Dialect {
    /// Field separator.
    pub delimiter: char,
    /// Decimal separator of floating point values (`.` or `,`).
    pub decimal: char,
    /// Whether rows carry trailing delimiters that must be dropped.
    pub trim_trailing_delimiters: bool,
}

impl Default for Dialect {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal: '.',
            trim_trailing_delimiters: false,
        }
    }
}

/// Parses data lines into a DataFrame whose columns are named `column_names`.
///
/// Column types are inferred from the first 100 rows. Lines that are blank
/// are skipped. Every other line must carry one value per column, else
/// [`IngestError::RowWidth`] is returned. Without data lines the result is
/// an empty frame of string columns.
pub fn read_table(column_names: &[String], lines: &[&str], dialect: Dialect) -> Result<DataFrame> {
    let rows: Vec<&str> = lines
        .iter()
        .map(|line| {
            if dialect.trim_trailing_delimiters {
                trim_trailing_delimiters(line, dialect.delimiter)
            } else {
                line.trim_end_matches('\r')
            }
        })
        .filter(|line| !line.trim().is_empty())
        .collect();

    if rows.is_empty() {
        return empty_table(column_names);
    }
    if let Some(found) = rows
        .iter()
        .map(|row| split_line(row, dialect.delimiter).len())
        .find(|&found| found != column_names.len())
    {
        return Err(IngestError::RowWidth {
            expected: column_names.len(),
            found,
        });
    }

    let separator = u8::try_from(dialect.delimiter).map_err(|_| IngestError::CsvParse {
        message: format!("delimiter {:?} is not a single-byte character", dialect.delimiter),
    })?;
    let buffer = rows.join("\n").into_bytes();

    let mut df = CsvReadOptions::default()
        .with_has_header(false)
        .with_infer_schema_length(Some(100))
        .map_parse_options(|opts| {
            opts.with_separator(separator)
                .with_decimal_comma(dialect.decimal == ',')
        })
        .into_reader_with_file_handle(Cursor::new(buffer))
        .finish()
        .map_err(|e| IngestError::CsvParse {
            message: e.to_string(),
        })?;

    df.set_column_names(column_names.iter().map(String::as_str))?;
    Ok(df)
}

fn empty_table(column_names: &[String]) -> Result<DataFrame> {
    let columns: Vec<Column> = column_names
        .iter()
        .map(|name| Series::new_empty(name.as_str().into(), &DataType::String).into_column())
        .collect();
    Ok(DataFrame::new(columns)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn names(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_read_table_comma() {
        let df = read_table(&names(&["a", "b"]), &["0,0", "1,1"], Dialect::default()).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), 2);
        let b = df.column("b").unwrap().i64().unwrap();
        assert_eq!(b.get(1), Some(1));
    }

    #[test]
    fn test_read_table_decimal_comma_with_trailing_tabs() {
        let dialect = Dialect {
            delimiter: '\t',
            decimal: ',',
            trim_trailing_delimiters: true,
        };
        let df = read_table(
            &names(&["mode", "time/s", "Ewe/V"]),
            &["2\t0,5\t1,25\t", "2\t1,0\t1,5\t"],
            dialect,
        )
        .unwrap();

        assert_eq!(df.width(), 3);
        let ewe = df.column("Ewe/V").unwrap().f64().unwrap();
        assert_eq!(ewe.get(0), Some(1.25));
        assert_eq!(ewe.get(1), Some(1.5));
    }

    #[test]
    fn test_read_table_skips_blank_lines() {
        let df = read_table(&names(&["a"]), &["1", "", "2", "  "], Dialect::default()).unwrap();
        assert_eq!(df.height(), 2);
    }

    #[test]
    fn test_read_table_without_rows() {
        let df = read_table(&names(&["t", "E"]), &[], Dialect::default()).unwrap();
        assert_eq!(df.height(), 0);
        assert_eq!(df.width(), 2);
    }

    #[test]
    fn test_read_table_width_mismatch() {
        let err = read_table(&names(&["a", "b", "c"]), &["0,0", "1,1"], Dialect::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::RowWidth {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_read_table_short_row_after_full_rows() {
        let err = read_table(&names(&["t", "E", "I"]), &["0,1,2", "3,4"], Dialect::default())
            .unwrap_err();
        assert!(matches!(
            err,
            IngestError::RowWidth {
                expected: 3,
                found: 2
            }
        ));
    }

    #[test]
    fn test_read_table_long_row() {
        let err = read_table(
            &names(&["t", "E", "I"]),
            &["0,1,2", "3,4,5,99"],
            Dialect::default(),
        )
        .unwrap_err();
        assert!(matches!(
            err,
            IngestError::RowWidth {
                expected: 3,
                found: 4
            }
        ));
    }
}
