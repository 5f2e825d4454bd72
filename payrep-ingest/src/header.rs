//! Header normalization for raw payroll exports
//!
//! Source files arrive with no fixed contract: comma- or tab-delimited,
//! UTF-8 (BOM tolerated) or Windows-1252, with either a single header row or
//! a category row stacked above the field-name row. This module turns all of
//! that into one header line plus a rectangular body.

use payrep_common::{Error, Result};

/// Category keywords that identify a stacked category row.
const CATEGORY_KEYWORDS: &[&str] = &["SALARY", "ALLOWANCE", "DEDUCTION", "NEUTRAL", "TOTAL"];

/// Normalized tabular input: one merged header plus data rows.
#[derive(Debug, Clone)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<Vec<String>>,
}

impl RawTable {
    /// Value of a column in a row, located by exact header match first,
    /// then by substring match (header names vary per export).
    pub fn get<'a>(&self, row: &'a [String], column: &str) -> Option<&'a str> {
        let idx = self
            .headers
            .iter()
            .position(|h| h == column)
            .or_else(|| self.headers.iter().position(|h| h.contains(column)))?;
        row.get(idx).map(|s| s.as_str())
    }
}

/// Decode raw bytes to text: strip a UTF-8 BOM, try strict UTF-8, fall back
/// to Windows-1252, and normalize line endings to `\n`.
pub fn decode_bytes(bytes: &[u8]) -> String {
    let bytes = bytes.strip_prefix(b"\xef\xbb\xbf").unwrap_or(bytes);
    let text = match std::str::from_utf8(bytes) {
        Ok(s) => s.to_string(),
        Err(_) => {
            let (decoded, _, _) = encoding_rs::WINDOWS_1252.decode(bytes);
            decoded.into_owned()
        }
    };
    text.replace("\r\n", "\n").replace('\r', "\n")
}

/// Detect the delimiter from the first line: tab wins if present.
pub fn detect_delimiter(content: &str) -> u8 {
    let first_line = content.lines().next().unwrap_or("");
    if first_line.contains('\t') {
        b'\t'
    } else {
        b','
    }
}

/// Parse decoded content into a normalized table.
///
/// Detects the two-row header form (category keywords in row 1, identity
/// columns in row 2) and merges it into a single header line. A body row
/// whose field count differs from the header fails with a `Parse` error
/// naming the offending row.
pub fn parse_table(content: &str) -> Result<RawTable> {
    let delimiter = detect_delimiter(content);
    let mut reader = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .delimiter(delimiter)
        .from_reader(content.as_bytes());

    let mut records: Vec<Vec<String>> = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(|f| f.trim().to_string()).collect();
        if fields.iter().all(|f| f.is_empty()) {
            continue;
        }
        records.push(fields);
    }

    if records.is_empty() {
        return Err(Error::EmptyFile);
    }

    let (headers, body_start) = if records.len() > 1 && is_double_header(&records[0], &records[1]) {
        tracing::debug!("Detected double header format (category + field name)");
        (merge_headers(&records[0], &records[1]), 2)
    } else {
        (normalize_single_header(&records[0]), 1)
    };

    let mut rows = Vec::with_capacity(records.len().saturating_sub(body_start));
    for (i, record) in records.into_iter().skip(body_start).enumerate() {
        if record.len() != headers.len() {
            return Err(Error::Parse {
                row: i + 1,
                expected: headers.len(),
                actual: record.len(),
            });
        }
        rows.push(record);
    }

    Ok(RawTable { headers, rows })
}

/// Row 1 carries a bucket/total keyword and row 2 carries identity columns.
fn is_double_header(first: &[String], second: &[String]) -> bool {
    let first_upper = first.join(",").to_uppercase();
    let has_categories = CATEGORY_KEYWORDS.iter().any(|k| first_upper.contains(k));
    let second_joined = second.join(",");
    let has_identity = second_joined.contains("Name") || second_joined.contains("Employee");
    has_categories && has_identity
}

/// Merge a category row with a field-name row into one header line.
///
/// The field name wins unless it is empty or purely numeric; then the
/// category value is used, and `Column_<i>` is synthesized as a last resort.
fn merge_headers(categories: &[String], fields: &[String]) -> Vec<String> {
    let len = categories.len().max(fields.len());
    (0..len)
        .map(|i| {
            let category = categories.get(i).map(|s| s.trim()).unwrap_or("");
            let field = fields.get(i).map(|s| s.trim()).unwrap_or("");
            if field.is_empty() || is_purely_numeric(field) {
                if category.is_empty() {
                    format!("Column_{i}")
                } else {
                    category.to_string()
                }
            } else {
                field.to_string()
            }
        })
        .collect()
}

fn normalize_single_header(header: &[String]) -> Vec<String> {
    header
        .iter()
        .enumerate()
        .map(|(i, h)| {
            let h = h.trim();
            if h.is_empty() {
                tracing::warn!(column = i, "Empty header, renamed to Column_{i}");
                format!("Column_{i}")
            } else {
                h.to_string()
            }
        })
        .collect()
}

fn is_purely_numeric(s: &str) -> bool {
    !s.is_empty() && s.chars().all(|c| c.is_ascii_digit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_bom_and_normalizes_line_endings() {
        let bytes = b"\xef\xbb\xbfName,Employee No\r\nAni,E001\r\n";
        let content = decode_bytes(bytes);
        assert!(content.starts_with("Name"));
        assert!(!content.contains('\r'));
    }

    #[test]
    fn decodes_latin1_fallback() {
        // "José" in Windows-1252
        let bytes = b"Name,Employee No\nJos\xe9,E001\n";
        let content = decode_bytes(bytes);
        assert!(content.contains("José"));
    }

    #[test]
    fn detects_tab_delimiter() {
        assert_eq!(detect_delimiter("Name\tEmployee No\n"), b'\t');
        assert_eq!(detect_delimiter("Name,Employee No\n"), b',');
    }

    #[test]
    fn merges_double_header_with_placeholder() {
        let table = parse_table("SALARY,SALARY,\nName,Basic Salary,\nAni,100,x\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Basic Salary", "Column_2"]);
        assert_eq!(table.rows.len(), 1);
    }

    #[test]
    fn category_falls_back_when_field_is_numeric() {
        let table = parse_table("TOTAL,ALLOWANCE\nName,123\nAni,5\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "ALLOWANCE"]);
    }

    #[test]
    fn single_header_passes_through() {
        let table = parse_table("Name,Employee No,Basic Salary\nAni,E001,100\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Employee No", "Basic Salary"]);
        assert_eq!(table.rows[0], vec!["Ani", "E001", "100"]);
    }

    #[test]
    fn too_many_fields_is_a_parse_error() {
        let err = parse_table("Name,Employee No\nAni,E001,extra\n").unwrap_err();
        match err {
            Error::Parse { row, expected, actual } => {
                assert_eq!((row, expected, actual), (1, 2, 3));
            }
            other => panic!("unexpected error: {other}"),
        }
        let msg = parse_table("Name,Employee No\nAni,E001,extra\n")
            .unwrap_err()
            .to_string();
        assert!(msg.contains("too many fields"));
    }

    #[test]
    fn too_few_fields_is_a_parse_error() {
        let msg = parse_table("Name,Employee No,Grade\nAni,E001,Staff\nBudi\n")
            .unwrap_err()
            .to_string();
        assert!(msg.contains("too few fields"));
        assert!(msg.contains("Row 2"));
    }

    #[test]
    fn empty_file_detected() {
        assert!(matches!(parse_table("\n\n"), Err(Error::EmptyFile)));
    }

    #[test]
    fn tab_delimited_double_header() {
        let table = parse_table("SALARY\tSALARY\nName\tBasic Salary\nAni\t100\n").unwrap();
        assert_eq!(table.headers, vec!["Name", "Basic Salary"]);
    }

    #[test]
    fn column_lookup_by_substring() {
        let table = parse_table("Full Name,Employee No\nAni,E001\n").unwrap();
        assert_eq!(table.get(&table.rows[0], "Name"), Some("Ani"));
        assert_eq!(table.get(&table.rows[0], "Employee No"), Some("E001"));
    }
}
