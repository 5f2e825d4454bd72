//! Report service
//!
//! Turns a stored report definition plus the batch's employee records into
//! workbook bytes. Rendering is pure and re-derived on every call; the
//! definition stores intent, never bytes, so a report can be downloaded any
//! number of times and always reflects the same records.

use crate::aggregate::aggregate;
use crate::derive::apply_derivations;
use crate::fields::{HEADCOUNT_FIELDS, OUTPUT_FIELDS};
use crate::render::{render_cost_center, render_detail};
use chrono::NaiveDate;
use payrep_common::{
    EmployeeRecord, Error, FieldMap, FieldSelection, ReportDefinition, ReportType, Result, Scalar,
};

/// MIME type for xlsx workbooks.
pub const XLSX_CONTENT_TYPE: &str =
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet";

/// A rendered report ready for download.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub bytes: Vec<u8>,
    pub filename: String,
    pub content_type: &'static str,
}

/// Generate the workbook for one report definition.
pub fn generate(
    definition: &ReportDefinition,
    records: &[EmployeeRecord],
    period: NaiveDate,
) -> Result<RenderedReport> {
    if records.is_empty() {
        return Err(Error::NotFound(format!(
            "no employee records for batch {}",
            definition.upload_id
        )));
    }

    tracing::info!(
        report_id = %definition.id,
        report_type = ?definition.report_type,
        records = records.len(),
        "Generating report"
    );

    let rows = derived_rows(records);
    let bytes = match definition.report_type {
        ReportType::Detail => {
            let fields = select_fields(&definition.selected_fields, OUTPUT_FIELDS);
            render_detail(&numbered(rows), &fields, "Report")?
        }
        ReportType::BranchFiltered => {
            let fields = select_fields(&definition.selected_fields, OUTPUT_FIELDS);
            let branch: Vec<FieldMap> = rows
                .into_iter()
                .filter(|row| row.get("Coa").and_then(Scalar::as_text) == Some("500"))
                .collect();
            if branch.is_empty() {
                return Err(Error::NotFound("no branch employees in batch".into()));
            }
            render_detail(&numbered(branch), &fields, "Report")?
        }
        ReportType::CostCenterAggregate => {
            let report = aggregate(&rows);
            render_cost_center(&report, period)?
        }
        ReportType::Headcount => {
            let fields: Vec<String> = HEADCOUNT_FIELDS.iter().map(|f| f.to_string()).collect();
            render_detail(&numbered(rows), &fields, "Headcount")?
        }
    };

    Ok(RenderedReport {
        bytes,
        filename: download_filename(&definition.name),
        content_type: XLSX_CONTENT_TYPE,
    })
}

/// Merge each record's maps and apply derivations and totals.
fn derived_rows(records: &[EmployeeRecord]) -> Vec<FieldMap> {
    records
        .iter()
        .map(|record| {
            let mut row = record.merged_fields();
            row.insert("Name".into(), Scalar::Text(record.name.clone()));
            row.insert("Employee No".into(), Scalar::Text(record.employee_no.clone()));
            apply_derivations(&mut row);
            row
        })
        .collect()
}

/// Fill the `No` column with 1-based sequence numbers.
fn numbered(mut rows: Vec<FieldMap>) -> Vec<FieldMap> {
    for (i, row) in rows.iter_mut().enumerate() {
        row.insert("No".into(), Scalar::Number((i + 1) as f64));
    }
    rows
}

/// Resolve a field selection against the canonical order.
///
/// Explicit selections keep canonical relative order; selected names outside
/// the canonical list are appended in the order given.
fn select_fields(selection: &FieldSelection, canonical: &[&str]) -> Vec<String> {
    match selection {
        FieldSelection::All => canonical.iter().map(|f| f.to_string()).collect(),
        FieldSelection::Fields(selected) => {
            let mut fields: Vec<String> = canonical
                .iter()
                .filter(|f| selected.iter().any(|s| s == *f))
                .map(|f| f.to_string())
                .collect();
            for name in selected {
                if !canonical.contains(&name.as_str()) {
                    fields.push(name.clone());
                }
            }
            fields
        }
    }
}

/// Download filename: non-alphanumerics replaced by `_`, xlsx extension.
fn download_filename(report_name: &str) -> String {
    let stem: String = report_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}.xlsx")
}

#[cfg(test)]
mod tests {
    use super::*;
    use payrep_common::Bucket;
    use uuid::Uuid;

    fn record(no: &str, name: &str, cost_center: &str, basic: f64) -> EmployeeRecord {
        let mut rec = EmployeeRecord::new(no, name);
        rec.directorate = Some("Ops".into());
        rec.bucket_mut(Bucket::Neutral)
            .insert("Cost Center".into(), Scalar::Text(cost_center.into()));
        rec.bucket_mut(Bucket::Salary)
            .insert("Basic Salary".into(), Scalar::Number(basic));
        rec.bucket_mut(Bucket::Neutral)
            .insert("Directorate".into(), Scalar::Text("Ops".into()));
        rec
    }

    fn definition(report_type: ReportType, selection: FieldSelection) -> ReportDefinition {
        ReportDefinition::new(Uuid::new_v4(), "June Payroll #1", report_type, selection)
    }

    #[test]
    fn empty_records_is_not_found() {
        let def = definition(ReportType::Detail, FieldSelection::All);
        let err = generate(&def, &[], NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));
    }

    #[test]
    fn detail_report_renders_with_filename() {
        let def = definition(ReportType::Detail, FieldSelection::All);
        let records = vec![record("E001", "Ani", "Cabang", 100.0)];
        let report = generate(&def, &records, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap();
        assert_eq!(report.filename, "June_Payroll__1.xlsx");
        assert_eq!(report.content_type, XLSX_CONTENT_TYPE);
        assert_eq!(&report.bytes[0..2], b"PK");
    }

    #[test]
    fn branch_filter_excludes_head_office() {
        let def = definition(ReportType::BranchFiltered, FieldSelection::All);
        // Only head-office records: nothing left after the branch filter.
        let records = vec![record("E001", "Ani", "Kantor Pusat", 100.0)];
        let err = generate(&def, &records, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap())
            .unwrap_err();
        assert!(matches!(err, Error::NotFound(_)));

        let records = vec![
            record("E001", "Ani", "Kantor Pusat", 100.0),
            record("E002", "Budi", "Cabang", 200.0),
        ];
        let report = generate(&def, &records, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap();
        assert_eq!(&report.bytes[0..2], b"PK");
    }

    #[test]
    fn cost_center_report_renders() {
        let def = definition(ReportType::CostCenterAggregate, FieldSelection::All);
        let records = vec![
            record("E001", "Ani", "Cabang", 100.0),
            record("E002", "Budi", "Kantor Pusat", 200.0),
        ];
        let report = generate(&def, &records, NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()).unwrap();
        assert_eq!(&report.bytes[0..2], b"PK");
    }

    #[test]
    fn selection_keeps_canonical_order() {
        let selection = FieldSelection::Fields(vec![
            "Basic Salary".into(),
            "Name".into(),
            "Custom Extra".into(),
        ]);
        let fields = select_fields(&selection, OUTPUT_FIELDS);
        // Canonical order puts Name before Basic Salary; extras go last.
        assert_eq!(fields, vec!["Name", "Basic Salary", "Custom Extra"]);
    }

    #[test]
    fn filename_sanitizes_non_alphanumerics() {
        assert_eq!(download_filename("a/b c:2025"), "a_b_c_2025.xlsx");
    }
}
