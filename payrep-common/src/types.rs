//! Core data model shared by ingestion and reporting

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use uuid::Uuid;

/// Storage bucket for a classified payroll field.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Bucket {
    Salary,
    Allowance,
    Deduction,
    Neutral,
}

/// A parsed cell value.
///
/// Numeric coercion happens once, at parse time, driven by the text-only
/// allowlist; downstream code never re-infers type from value shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Scalar {
    Number(f64),
    Text(String),
    Empty,
}

impl Scalar {
    /// Numeric view; `None` for text and empty values.
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Scalar::Number(n) => Some(*n),
            _ => None,
        }
    }

    /// Textual view; numbers are not stringified here.
    pub fn as_text(&self) -> Option<&str> {
        match self {
            Scalar::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Scalar::Empty)
    }

    /// Display form used when writing cells: numbers via `{}`, empty as "".
    pub fn display(&self) -> String {
        match self {
            Scalar::Number(n) => {
                if n.fract() == 0.0 && n.abs() < 1e15 {
                    format!("{}", *n as i64)
                } else {
                    format!("{}", n)
                }
            }
            Scalar::Text(s) => s.clone(),
            Scalar::Empty => String::new(),
        }
    }
}

impl From<f64> for Scalar {
    fn from(n: f64) -> Self {
        Scalar::Number(n)
    }
}

impl From<&str> for Scalar {
    fn from(s: &str) -> Self {
        if s.is_empty() {
            Scalar::Empty
        } else {
            Scalar::Text(s.to_string())
        }
    }
}

/// Open-ended field map keyed by source column name.
pub type FieldMap = BTreeMap<String, Scalar>;

/// Fields that must stay text end to end: identifiers, codes and account
/// numbers where numeric coercion would lose leading zeros or precision.
///
/// Checked before any coercion attempt at parse time, and again at render
/// time to force string-typed cells. Type is never inferred from value shape.
pub const TEXT_FIELDS: &[&str] = &[
    "Jobstatus Code",
    "No KTP",
    "Gov. Tax File No.",
    "Employee No",
    "Cost Center Code",
    "Work Location Code",
    "Tax Location Code",
    "Company Bank Account",
    "Bank Account",
    "Insurance No BPJSKT",
    "Insurance No BPJSKES",
];

/// Whether a field belongs to the closed text-only allowlist.
pub fn is_text_field(field_name: &str) -> bool {
    TEXT_FIELDS.contains(&field_name)
}

/// One employee row from one ingested batch.
///
/// Immutable after ingestion; deleted only with its owning batch. Every
/// non-identity source column lands in exactly one of the four maps, and
/// dedicated metadata columns are mirrored into `neutral_data` so they stay
/// selectable as report columns.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmployeeRecord {
    pub employee_no: String,
    pub name: String,
    pub gender: Option<String>,
    pub no_ktp: Option<String>,
    pub tax_file_no: Option<String>,
    pub position: Option<String>,
    pub directorate: Option<String>,
    pub org_unit: Option<String>,
    pub grade: Option<String>,
    pub employment_status: Option<String>,
    pub join_date: Option<NaiveDate>,
    pub terminate_date: Option<NaiveDate>,
    pub length_of_service: Option<String>,
    pub tax_status: Option<String>,
    pub salary_data: FieldMap,
    pub allowance_data: FieldMap,
    pub deduction_data: FieldMap,
    pub neutral_data: FieldMap,
}

impl EmployeeRecord {
    pub fn new(employee_no: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            employee_no: employee_no.into(),
            name: name.into(),
            gender: None,
            no_ktp: None,
            tax_file_no: None,
            position: None,
            directorate: None,
            org_unit: None,
            grade: None,
            employment_status: None,
            join_date: None,
            terminate_date: None,
            length_of_service: None,
            tax_status: None,
            salary_data: FieldMap::new(),
            allowance_data: FieldMap::new(),
            deduction_data: FieldMap::new(),
            neutral_data: FieldMap::new(),
        }
    }

    /// Mutable handle to the map backing a bucket.
    pub fn bucket_mut(&mut self, bucket: Bucket) -> &mut FieldMap {
        match bucket {
            Bucket::Salary => &mut self.salary_data,
            Bucket::Allowance => &mut self.allowance_data,
            Bucket::Deduction => &mut self.deduction_data,
            Bucket::Neutral => &mut self.neutral_data,
        }
    }

    /// Flatten the four attribute maps into one lookup view.
    ///
    /// Bucket precedence on (unexpected) key collisions follows storage
    /// order: salary, allowance, deduction, neutral.
    pub fn merged_fields(&self) -> FieldMap {
        let mut merged = FieldMap::new();
        for map in [
            &self.neutral_data,
            &self.deduction_data,
            &self.allowance_data,
            &self.salary_data,
        ] {
            for (k, v) in map {
                merged.insert(k.clone(), v.clone());
            }
        }
        merged
    }
}

/// Lifecycle status of an upload batch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BatchStatus {
    Processing,
    Completed,
    Failed,
}

/// One ingested source file, scoped to a reporting period.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadBatch {
    pub id: Uuid,
    /// First day of the reporting month.
    pub period: NaiveDate,
    pub row_count: usize,
    pub status: BatchStatus,
    /// 0-100, advanced monotonically by the ingestion pipeline.
    pub progress: u8,
    /// Terminal failure message, or a non-fatal completion warning.
    pub error_message: Option<String>,
}

impl UploadBatch {
    pub fn new(period: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            period,
            row_count: 0,
            status: BatchStatus::Processing,
            progress: 0,
            error_message: None,
        }
    }
}

/// Which report layout to produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ReportType {
    /// Flat per-employee export over the canonical field order.
    Detail,
    /// Detail restricted to branch (Coa 500) employees.
    BranchFiltered,
    /// Cost-center aggregation by COA and directorate.
    CostCenterAggregate,
    /// Demographic subset, no salary components.
    Headcount,
}

/// Column selection for a report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum FieldSelection {
    All,
    Fields(Vec<String>),
}

/// Stored report intent. Rendering is re-derived from the employee records
/// on every download; the definition never stores rendered bytes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportDefinition {
    pub id: Uuid,
    pub upload_id: Uuid,
    pub name: String,
    pub report_type: ReportType,
    pub selected_fields: FieldSelection,
    pub total_records: usize,
}

impl ReportDefinition {
    pub fn new(
        upload_id: Uuid,
        name: impl Into<String>,
        report_type: ReportType,
        selected_fields: FieldSelection,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            upload_id,
            name: name.into(),
            report_type,
            selected_fields,
            total_records: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scalar_number_views() {
        assert_eq!(Scalar::Number(12.5).as_number(), Some(12.5));
        assert_eq!(Scalar::Text("0123".into()).as_number(), None);
        assert!(Scalar::Empty.is_empty());
    }

    #[test]
    fn scalar_display_trims_integral_floats() {
        assert_eq!(Scalar::Number(100.0).display(), "100");
        assert_eq!(Scalar::Number(12.75).display(), "12.75");
        assert_eq!(Scalar::Empty.display(), "");
    }

    #[test]
    fn merged_fields_prefers_storage_order_on_collision() {
        let mut rec = EmployeeRecord::new("E001", "Ani");
        rec.neutral_data
            .insert("Basic Salary".into(), Scalar::Text("shadow".into()));
        rec.salary_data
            .insert("Basic Salary".into(), Scalar::Number(100.0));
        let merged = rec.merged_fields();
        assert_eq!(merged["Basic Salary"], Scalar::Number(100.0));
    }

    #[test]
    fn scalar_serde_is_untagged() {
        let n: Scalar = serde_json::from_str("42.0").unwrap();
        assert_eq!(n, Scalar::Number(42.0));
        let s: Scalar = serde_json::from_str("\"0812\"").unwrap();
        assert_eq!(s, Scalar::Text("0812".into()));
    }
}
