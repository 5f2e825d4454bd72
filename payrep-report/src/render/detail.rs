//! Flat detail sheet
//!
//! Five header rows: a blank spacer merged across the full width, one label
//! row per category level merged over contiguous equal-label runs (runs are
//! computed independently per level, so merges at different levels need not
//! align), then the field-name row. Data rows follow directly. Allowlisted
//! text columns are written as string cells no matter what the value looks
//! like.

use crate::category::{categorize, CategoryPath};
use crate::render::xlsx_err;
use payrep_common::{is_text_field, Error, FieldMap, Result, Scalar};
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook};

const WIDTH_SAMPLE_ROWS: usize = 100;
const MAX_COLUMN_WIDTH: f64 = 50.0;
const MIN_COLUMN_WIDTH: f64 = 10.0;

/// Render rows against an ordered field list into workbook bytes.
///
/// The field list must be non-empty; a report definition whose selection
/// resolves to no columns is rejected rather than rendered.
pub fn render_detail(rows: &[FieldMap], fields: &[String], sheet_name: &str) -> Result<Vec<u8>> {
    if fields.is_empty() {
        return Err(Error::Internal("no columns to render".into()));
    }
    tracing::debug!(
        rows = rows.len(),
        columns = fields.len(),
        sheet = sheet_name,
        "Rendering detail sheet"
    );

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name(sheet_name).map_err(xlsx_err)?;

    let band = Format::new()
        .set_bold()
        .set_align(FormatAlign::Center)
        .set_align(FormatAlign::VerticalCenter)
        .set_border(FormatBorder::Thin)
        .set_font_name("Calibri")
        .set_font_size(11);
    let field_header = Format::new()
        .set_bold()
        .set_border(FormatBorder::Thin)
        .set_font_name("Calibri")
        .set_font_size(11);
    let text_cell = Format::new()
        .set_num_format("@")
        .set_font_name("Calibri")
        .set_font_size(11);
    let plain_cell = Format::new().set_font_name("Calibri").set_font_size(11);

    let paths: Vec<CategoryPath> = fields.iter().map(|f| categorize(f)).collect();
    let last_col = (fields.len() - 1) as u16;

    // Row 0: blank spacer across the full width.
    if last_col > 0 {
        sheet
            .merge_range(0, 0, 0, last_col, "", &band)
            .map_err(xlsx_err)?;
    } else {
        sheet.write_with_format(0, 0, "", &band).map_err(xlsx_err)?;
    }

    // Rows 1-3: level label bands, merged per contiguous run.
    for (row, level) in [
        |p: &CategoryPath| p.level1,
        |p: &CategoryPath| p.level2,
        |p: &CategoryPath| p.level3,
    ]
    .iter()
    .enumerate()
    {
        let row = (row + 1) as u32;
        let mut start = 0usize;
        while start < paths.len() {
            let label = level(&paths[start]);
            let mut end = start;
            while end + 1 < paths.len() && level(&paths[end + 1]) == label {
                end += 1;
            }
            if end > start {
                sheet
                    .merge_range(row, start as u16, row, end as u16, label, &band)
                    .map_err(xlsx_err)?;
            } else {
                sheet
                    .write_with_format(row, start as u16, label, &band)
                    .map_err(xlsx_err)?;
            }
            start = end + 1;
        }
    }

    // Row 4: field names.
    for (col, field) in fields.iter().enumerate() {
        sheet
            .write_with_format(4, col as u16, field.as_str(), &field_header)
            .map_err(xlsx_err)?;
    }

    // Data rows.
    for (i, row) in rows.iter().enumerate() {
        let sheet_row = (5 + i) as u32;
        for (col, field) in fields.iter().enumerate() {
            let col = col as u16;
            match plan_cell(field, row.get(field)) {
                DataCell::Skip => {}
                DataCell::ForcedText(s) => {
                    sheet
                        .write_with_format(sheet_row, col, s, &text_cell)
                        .map_err(xlsx_err)?;
                }
                DataCell::Number(n) => {
                    sheet
                        .write_with_format(sheet_row, col, n, &plain_cell)
                        .map_err(xlsx_err)?;
                }
                DataCell::Text(s) => {
                    sheet
                        .write_with_format(sheet_row, col, s, &plain_cell)
                        .map_err(xlsx_err)?;
                }
            }
        }
    }

    for (col, width) in column_widths(rows, fields).into_iter().enumerate() {
        sheet.set_column_width(col as u16, width).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// How one data cell is written.
#[derive(Debug, Clone, PartialEq)]
enum DataCell {
    Skip,
    /// Allowlisted column: always a string cell, even for numeric-looking
    /// input.
    ForcedText(String),
    Number(f64),
    Text(String),
}

fn plan_cell(field: &str, value: Option<&Scalar>) -> DataCell {
    let Some(value) = value else {
        return DataCell::Skip;
    };
    if value.is_empty() {
        return DataCell::Skip;
    }
    if is_text_field(field) {
        return DataCell::ForcedText(value.display());
    }
    match value {
        Scalar::Number(n) => DataCell::Number(*n),
        Scalar::Text(s) => DataCell::Text(s.clone()),
        Scalar::Empty => DataCell::Skip,
    }
}

/// Widths from the field names plus a bounded sample of data rows.
fn column_widths(rows: &[FieldMap], fields: &[String]) -> Vec<f64> {
    fields
        .iter()
        .map(|field| {
            let mut width = field.len().max(MIN_COLUMN_WIDTH as usize);
            for row in rows.iter().take(WIDTH_SAMPLE_ROWS) {
                if let Some(value) = row.get(field) {
                    width = width.max(value.display().len());
                }
            }
            ((width + 2) as f64).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fields(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn renders_xlsx_bytes() {
        let mut row = FieldMap::new();
        row.insert("Name".into(), Scalar::Text("Ani".into()));
        row.insert("Basic Salary".into(), Scalar::Number(1_000_000.0));
        row.insert("Employee No".into(), Scalar::Text("001200".into()));

        let bytes = render_detail(
            &[row],
            &fields(&["Name", "Employee No", "Basic Salary"]),
            "Report",
        )
        .unwrap();
        // XLSX is a ZIP container.
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn single_column_renders() {
        let mut row = FieldMap::new();
        row.insert("Name".into(), Scalar::Text("Ani".into()));
        let bytes = render_detail(&[row], &fields(&["Name"]), "Report").unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn empty_field_list_is_an_error() {
        let err = render_detail(&[], &[], "Report").unwrap_err();
        assert!(matches!(err, Error::Internal(_)));

        let mut row = FieldMap::new();
        row.insert("Name".into(), Scalar::Text("Ani".into()));
        assert!(render_detail(&[row], &[], "Report").is_err());
    }

    #[test]
    fn data_cells_reproduce_parsed_values() {
        use payrep_ingest::parse_value;

        let raw = [
            ("Basic Salary", "1,000,000"),
            ("Employee No", "001200"),
            ("Hari Kerja", "-"),
        ];
        let row: FieldMap = raw
            .iter()
            .map(|(f, v)| (f.to_string(), parse_value(f, v)))
            .collect();

        // Numeric cells carry the parsed value through unchanged.
        assert_eq!(
            plan_cell("Basic Salary", row.get("Basic Salary")),
            DataCell::Number(1_000_000.0)
        );
        // Allowlisted identifiers keep their leading zeros as string cells.
        assert_eq!(
            plan_cell("Employee No", row.get("Employee No")),
            DataCell::ForcedText("001200".into())
        );
        assert_eq!(
            plan_cell("Hari Kerja", row.get("Hari Kerja")),
            DataCell::Text("-".into())
        );
        // Absent and empty values write nothing.
        assert_eq!(plan_cell("Uang Makan", row.get("Uang Makan")), DataCell::Skip);
        assert_eq!(plan_cell("Uang Makan", Some(&Scalar::Empty)), DataCell::Skip);
    }

    #[test]
    fn widths_clamped_and_sampled() {
        let mut row = FieldMap::new();
        row.insert("Name".into(), Scalar::Text("x".repeat(120)));
        let widths = column_widths(&[row], &fields(&["Name", "Basic Salary"]));
        assert_eq!(widths[0], MAX_COLUMN_WIDTH);
        // No data: header name length plus padding.
        assert_eq!(widths[1], ("Basic Salary".len() + 2) as f64);
    }
}
