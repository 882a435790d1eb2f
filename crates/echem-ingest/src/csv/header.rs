//! Column-line parsing and normalization.

/// Normalizes a header value by trimming whitespace.
pub fn normalize_header(value: &str) -> String {
    value.trim().to_string()
}

/// Strips line-ending residue and one terminating delimiter from a line.
///
/// EC-Lab terminates every row with a tab, which would otherwise show up as
/// an extra unnamed column. Earlier delimiters still separate empty values.
pub fn trim_trailing_delimiters(line: &str, delimiter: char) -> &str {
    let line = line.trim_end_matches('\r');
    line.strip_suffix(delimiter).unwrap_or(line)
}

/// Splits a line into fields on `delimiter`, handling quoted values.
///
/// Fields are trimmed. Duplicate values are kept as they are.
pub fn split_line(line: &str, delimiter: char) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut quoted = false;
    let mut chars = line.chars().peekable();

    while let Some(c) = chars.next() {
        if c == '"' {
            // `""` inside quotes is a literal quote.
            if quoted && chars.next_if_eq(&'"').is_some() {
                field.push('"');
            } else {
                quoted = !quoted;
            }
        } else if c == delimiter && !quoted {
            fields.push(normalize_header(&field));
            field.clear();
        } else {
            field.push(c);
        }
    }
    fields.push(normalize_header(&field));
    fields
}

/// Names empty column-line entries `Unnamed: <index>` (zero-based).
///
/// A column line ending in a delimiter, or two adjacent delimiters, would
/// otherwise yield columns without a name.
pub fn name_unnamed_columns(names: Vec<String>) -> Vec<String> {
    names
        .into_iter()
        .enumerate()
        .map(|(index, name)| {
            if name.is_empty() {
                format!("Unnamed: {index}")
            } else {
                name
            }
        })
        .collect()
}
