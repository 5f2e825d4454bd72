//! Cost-center sheet
//!
//! Fixed hand-designed header block, then a grand-total row and one section
//! per COA code, each section a Total row followed by one row per component.
//! Directorates occupy two columns each (employee count, value) with
//! alternating band colors. Cells with no applicable data render the `-`
//! sentinel; a measured zero and "not applicable" are different things to the
//! report's readers, so `-` is never replaced by 0 or a blank.

use crate::aggregate::{CoaSection, CostCenterReport, COST_CENTER_COMPONENTS};
use crate::render::xlsx_err;
use chrono::{Datelike, NaiveDate};
use payrep_common::Result;
use rust_xlsxwriter::{Format, FormatAlign, FormatBorder, Workbook, Worksheet};

const HEADER_BLUE: u32 = 0xC5D9F1;
const HEADER_YELLOW: u32 = 0xFFD966;
const HEADER_GREEN: u32 = 0xA9D08E;
const COA_600_GRAY: u32 = 0xD9D9D9;
const COA_500_BEIGE: u32 = 0xF2DCDB;
const GRAND_TOTAL_BLUE: u32 = 0xB4C7E7;

const MONTH_NAMES: [&str; 12] = [
    "Januari",
    "Februari",
    "Maret",
    "April",
    "Mei",
    "Juni",
    "Juli",
    "Agustus",
    "September",
    "Oktober",
    "November",
    "Desember",
];

fn base(color: u32) -> Format {
    Format::new()
        .set_background_color(color)
        .set_border(FormatBorder::Thin)
        .set_align(FormatAlign::VerticalCenter)
        .set_font_name("Calibri")
        .set_font_size(11)
}

fn label(color: u32, bold: bool, align: FormatAlign) -> Format {
    let format = base(color).set_align(align);
    if bold {
        format.set_bold()
    } else {
        format
    }
}

fn number(color: u32) -> Format {
    base(color)
        .set_align(FormatAlign::Right)
        .set_num_format("#,##0")
}

/// Per-band cell formats for one section color.
struct Band {
    coa: Format,
    component: Format,
    number: Format,
    dash: Format,
}

impl Band {
    fn new(color: u32) -> Self {
        Self {
            coa: label(color, true, FormatAlign::Center),
            component: label(color, false, FormatAlign::Left),
            number: number(color),
            dash: label(color, false, FormatAlign::Center),
        }
    }
}

/// Render the aggregated report for one period into workbook bytes.
pub fn render_cost_center(report: &CostCenterReport, period: NaiveDate) -> Result<Vec<u8>> {
    let directorates = report.all_directorates();
    tracing::debug!(
        directorates = directorates.len(),
        employees = report.grand_total_employees,
        "Rendering cost-center sheet"
    );

    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.set_name("Cost Center Report").map_err(xlsx_err)?;

    let header = label(HEADER_BLUE, true, FormatAlign::Center);

    // Title block.
    sheet
        .write_with_format(0, 0, "Salary Cost", &header)
        .map_err(xlsx_err)?;
    sheet
        .write_with_format(0, 1, period.year().to_string(), &header)
        .map_err(xlsx_err)?;
    sheet.write_with_format(2, 0, "COA", &header).map_err(xlsx_err)?;
    sheet
        .write_with_format(2, 1, "Komponen Gaji", &header)
        .map_err(xlsx_err)?;
    let month = MONTH_NAMES[period.month0() as usize];
    sheet.write_with_format(2, 2, month, &header).map_err(xlsx_err)?;

    // Directorate band rows: "Cost Center" over count/value column pairs,
    // then "Jumlah Karyawan" and the directorate name.
    for (i, name) in directorates.iter().enumerate() {
        let color = if i % 2 == 0 { HEADER_GREEN } else { HEADER_YELLOW };
        let band = label(color, true, FormatAlign::Center);
        let col = (2 + i * 2) as u16;
        sheet
            .write_with_format(3, col, "Cost Center", &band)
            .map_err(xlsx_err)?;
        sheet.write_with_format(3, col + 1, "", &band).map_err(xlsx_err)?;
        sheet
            .write_with_format(4, col, "Jumlah Karyawan", &band)
            .map_err(xlsx_err)?;
        sheet
            .write_with_format(4, col + 1, name.as_str(), &band)
            .map_err(xlsx_err)?;
    }

    // Grand total row: per directorate, only COA sections with a non-zero
    // combined sum contribute.
    let grand = Band::new(GRAND_TOTAL_BLUE);
    sheet.write_with_format(5, 0, "", &grand.coa).map_err(xlsx_err)?;
    sheet
        .write_with_format(5, 1, "Grand Total", &label(GRAND_TOTAL_BLUE, true, FormatAlign::Left))
        .map_err(xlsx_err)?;
    for (i, name) in directorates.iter().enumerate() {
        let col = (2 + i * 2) as u16;
        let mut employees = 0usize;
        let mut value = 0.0f64;
        for section in [&report.coa_600, &report.coa_500] {
            if let Some(dir) = section.directorate(name) {
                let combined = dir.combined_total();
                if combined > 0.0 {
                    employees += dir.employee_count;
                    value += combined;
                }
            }
        }
        write_count_value(sheet, 5, col, (employees > 0).then_some(employees), value, &grand)?;
    }

    let mut row = 6;
    row = write_coa_section(sheet, row, &report.coa_600, &directorates, COA_600_GRAY)?;
    write_coa_section(sheet, row, &report.coa_500, &directorates, COA_500_BEIGE)?;

    sheet.set_column_width(0, 8).map_err(xlsx_err)?;
    sheet.set_column_width(1, 45).map_err(xlsx_err)?;
    for i in 0..directorates.len() {
        let col = (2 + i * 2) as u16;
        sheet.set_column_width(col, 15).map_err(xlsx_err)?;
        sheet.set_column_width(col + 1, 20).map_err(xlsx_err)?;
    }

    workbook.save_to_buffer().map_err(xlsx_err)
}

/// One COA section: a Total row, then one row per component. Returns the
/// next free sheet row.
fn write_coa_section(
    sheet: &mut Worksheet,
    start_row: u32,
    section: &CoaSection,
    directorates: &[String],
    color: u32,
) -> Result<u32> {
    let band = Band::new(color);
    let mut row = start_row;

    sheet
        .write_with_format(row, 0, section.code, &band.coa)
        .map_err(xlsx_err)?;
    sheet
        .write_with_format(row, 1, "Total", &label(color, true, FormatAlign::Left))
        .map_err(xlsx_err)?;
    for (i, name) in directorates.iter().enumerate() {
        let col = (2 + i * 2) as u16;
        match section.directorate(name) {
            Some(dir) if dir.combined_total() > 0.0 => {
                write_count_value(sheet, row, col, Some(dir.employee_count), dir.combined_total(), &band)?;
            }
            _ => write_count_value(sheet, row, col, None, 0.0, &band)?,
        }
    }
    row += 1;

    for component in COST_CENTER_COMPONENTS {
        sheet.write_with_format(row, 0, "", &band.coa).map_err(xlsx_err)?;
        sheet
            .write_with_format(row, 1, *component, &band.component)
            .map_err(xlsx_err)?;
        for (i, name) in directorates.iter().enumerate() {
            let col = (2 + i * 2) as u16;
            match section.directorate(name) {
                Some(dir) => {
                    let value = dir.components.get(*component).copied().unwrap_or(0.0);
                    write_count_value(sheet, row, col, Some(dir.employee_count), value, &band)?;
                }
                None => write_count_value(sheet, row, col, None, 0.0, &band)?,
            }
        }
        row += 1;
    }

    Ok(row)
}

/// Resolved content for a count/value column pair; `None` renders the `-`
/// sentinel. An absent directorate dashes both cells; a present one keeps
/// its employee count and dashes only non-positive values.
fn resolve_pair(employees: Option<usize>, value: f64) -> (Option<f64>, Option<f64>) {
    (
        employees.map(|count| count as f64),
        (value > 0.0).then_some(value),
    )
}

/// Write a count/value column pair per [`resolve_pair`].
fn write_count_value(
    sheet: &mut Worksheet,
    row: u32,
    col: u16,
    employees: Option<usize>,
    value: f64,
    band: &Band,
) -> Result<()> {
    let (count, value) = resolve_pair(employees, value);
    match count {
        Some(n) => sheet
            .write_with_format(row, col, n, &band.number)
            .map_err(xlsx_err)?,
        None => sheet.write_with_format(row, col, "-", &band.dash).map_err(xlsx_err)?,
    };
    match value {
        Some(v) => sheet
            .write_with_format(row, col + 1, v, &band.number)
            .map_err(xlsx_err)?,
        None => sheet
            .write_with_format(row, col + 1, "-", &band.dash)
            .map_err(xlsx_err)?,
    };
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::aggregate::aggregate;
    use payrep_common::{FieldMap, Scalar};

    fn row(cost_center: &str, directorate: &str, basic: f64) -> FieldMap {
        let mut map = FieldMap::new();
        map.insert("Cost Center".into(), Scalar::Text(cost_center.into()));
        map.insert("Directorate".into(), Scalar::Text(directorate.into()));
        map.insert("Total Basic Salary".into(), Scalar::Number(basic));
        map
    }

    #[test]
    fn renders_workbook_bytes() {
        let report = aggregate(&[
            row("Cabang Solo", "Ops", 100.0),
            row("Cabang Solo", "Ops", 200.0),
            row("Kantor Pusat", "Finance", 500.0),
        ]);
        let period = NaiveDate::from_ymd_opt(2025, 6, 1).unwrap();
        let bytes = render_cost_center(&report, period).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn renders_with_no_rows() {
        let report = aggregate(&[]);
        let period = NaiveDate::from_ymd_opt(2025, 1, 1).unwrap();
        let bytes = render_cost_center(&report, period).unwrap();
        assert_eq!(&bytes[0..2], b"PK");
    }

    #[test]
    fn sentinel_distinguishes_absent_from_measured_zero() {
        // Directorate not in this COA section: both cells dash.
        assert_eq!(resolve_pair(None, 0.0), (None, None));
        // Present but nothing measured for this component: the employee
        // count stays, only the value dashes.
        assert_eq!(resolve_pair(Some(4), 0.0), (Some(4.0), None));
        assert_eq!(resolve_pair(Some(4), -250_000.0), (Some(4.0), None));
        assert_eq!(
            resolve_pair(Some(4), 1_500_000.0),
            (Some(4.0), Some(1_500_000.0))
        );
    }
}
