//! Chunked ingestion pipeline
//!
//! Orchestrates one batch end to end: decode and normalize the raw file,
//! validate its structure, classify every column into its storage bucket,
//! and persist employee records in fixed-size chunks, advancing batch
//! progress after each chunk. Chunk boundaries are the only suspension
//! points; each chunk is one bulk write.
//!
//! Error policy per §taxonomy: structural problems (parse, empty file,
//! missing columns, in-file duplicates) are fatal and persist nothing;
//! per-row problems are logged and skipped; same-period duplicates from
//! earlier batches are skipped and reported as a non-fatal warning.

use crate::classify::{classify, is_dedicated};
use crate::header::{decode_bytes, parse_table, RawTable};
use crate::store::{BatchStore, EmployeeStore};
use crate::value::parse_value;
use chrono::NaiveDate;
use payrep_common::config::IngestConfig;
use payrep_common::{ComponentRegistry, EmployeeRecord, Error, Result, Scalar};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;
use uuid::Uuid;

/// Columns that must be present (matched by substring against headers).
const REQUIRED_COLUMNS: &[&str] = &["Name", "Employee No"];

/// Date formats seen across source exports, tried in order.
const DATE_FORMATS: &[&str] = &["%Y-%m-%d", "%d/%m/%Y", "%m/%d/%Y", "%d-%m-%Y"];

/// Non-fatal outcome counts for a completed ingestion.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct IngestSummary {
    /// Data rows in the file (excluding headers).
    pub total_rows: usize,
    pub inserted: usize,
    pub skipped_blank: usize,
    /// Rows dropped by per-row processing errors.
    pub row_errors: usize,
    /// Same-period duplicates from earlier batches, skipped at the store.
    pub duplicates_skipped: usize,
}

impl IngestSummary {
    /// Warning message for the batch record, or `None` for a clean run.
    pub fn warning(&self) -> Option<String> {
        let mut parts = Vec::new();
        if self.row_errors > 0 {
            parts.push(format!("{} row errors", self.row_errors));
        }
        if self.duplicates_skipped > 0 {
            parts.push(format!(
                "{} duplicates skipped (already ingested this period)",
                self.duplicates_skipped
            ));
        }
        if parts.is_empty() {
            None
        } else {
            Some(format!("Completed with {}", parts.join(", ")))
        }
    }
}

/// Ingestion pipeline over store collaborators.
///
/// One `Ingestor` may run batches concurrently; batches share nothing but
/// the append-only employee store.
pub struct Ingestor {
    employees: Arc<dyn EmployeeStore>,
    batches: Arc<dyn BatchStore>,
    config: IngestConfig,
}

impl Ingestor {
    pub fn new(employees: Arc<dyn EmployeeStore>, batches: Arc<dyn BatchStore>) -> Self {
        Self::with_config(employees, batches, IngestConfig::default())
    }

    pub fn with_config(
        employees: Arc<dyn EmployeeStore>,
        batches: Arc<dyn BatchStore>,
        config: IngestConfig,
    ) -> Self {
        Self {
            employees,
            batches,
            config,
        }
    }

    /// Ingest one uploaded file into an existing batch.
    ///
    /// On a fatal error the batch is marked failed with the error message
    /// and nothing from the file has been persisted (per-chunk writes only
    /// begin after all structural validation has passed).
    pub async fn ingest(
        &self,
        batch_id: Uuid,
        period: NaiveDate,
        registry: &ComponentRegistry,
        bytes: &[u8],
    ) -> Result<IngestSummary> {
        if bytes.is_empty() {
            let err = Error::MissingFile;
            self.batches.fail(batch_id, err.to_string()).await?;
            return Err(err);
        }
        match self.run(batch_id, period, registry, bytes).await {
            Ok(summary) => Ok(summary),
            Err(err) => {
                tracing::error!(batch_id = %batch_id, error = %err, "Ingestion failed");
                self.batches.fail(batch_id, err.to_string()).await?;
                Err(err)
            }
        }
    }

    async fn run(
        &self,
        batch_id: Uuid,
        period: NaiveDate,
        registry: &ComponentRegistry,
        bytes: &[u8],
    ) -> Result<IngestSummary> {
        let content = decode_bytes(bytes);
        let table = parse_table(&content)?;
        if table.rows.is_empty() {
            return Err(Error::EmptyFile);
        }

        tracing::info!(
            batch_id = %batch_id,
            rows = table.rows.len(),
            columns = table.headers.len(),
            components = registry.len(),
            "Starting payroll ingestion"
        );

        validate_required_columns(&table.headers)?;
        check_in_file_duplicates(&table, self.config.duplicate_sample_cap)?;

        let mut summary = IngestSummary {
            total_rows: table.rows.len(),
            ..Default::default()
        };
        let total = table.rows.len();
        let mut processed = 0usize;

        for chunk in table.rows.chunks(self.config.chunk_size) {
            let mut records = Vec::with_capacity(chunk.len());
            for (offset, row) in chunk.iter().enumerate() {
                let row_number = processed + offset + 1;
                match build_record(&table, row, registry) {
                    Ok(Some(record)) => records.push(record),
                    Ok(None) => summary.skipped_blank += 1,
                    Err(err) => {
                        tracing::warn!(
                            batch_id = %batch_id,
                            row = row_number,
                            error = %err,
                            "Row skipped"
                        );
                        summary.row_errors += 1;
                    }
                }
            }

            let written = self
                .employees
                .put_chunk(batch_id, period, records)
                .await?;
            summary.inserted += written.inserted;
            summary.duplicates_skipped += written.duplicates_skipped;

            processed += chunk.len();
            let progress = (processed * 100 / total) as u8;
            self.batches.update_progress(batch_id, progress).await?;
        }

        self.batches
            .complete(batch_id, summary.inserted, summary.warning())
            .await?;

        tracing::info!(
            batch_id = %batch_id,
            inserted = summary.inserted,
            skipped_blank = summary.skipped_blank,
            row_errors = summary.row_errors,
            duplicates_skipped = summary.duplicates_skipped,
            "Ingestion completed"
        );
        Ok(summary)
    }
}

fn validate_required_columns(headers: &[String]) -> Result<()> {
    let missing: Vec<String> = REQUIRED_COLUMNS
        .iter()
        .filter(|required| !headers.iter().any(|h| h.contains(*required)))
        .map(|s| s.to_string())
        .collect();
    if missing.is_empty() {
        Ok(())
    } else {
        Err(Error::MissingColumns(missing))
    }
}

/// Duplicate employee numbers within one file are a hard rejection; nothing
/// from the file may be persisted.
fn check_in_file_duplicates(table: &RawTable, sample_cap: usize) -> Result<()> {
    let mut seen = BTreeSet::new();
    let mut duplicates = BTreeSet::new();
    for row in &table.rows {
        let employee_no = table.get(row, "Employee No").unwrap_or("").trim();
        if employee_no.is_empty() {
            continue;
        }
        if !seen.insert(employee_no.to_string()) {
            duplicates.insert(employee_no.to_string());
        }
    }
    if duplicates.is_empty() {
        return Ok(());
    }
    let total = duplicates.len();
    let sample = duplicates.into_iter().take(sample_cap).collect();
    Err(Error::DuplicateInFile { sample, total })
}

/// Build one employee record from a data row.
///
/// Returns `Ok(None)` for blank rows (no name and no employee number).
/// Dedicated metadata columns fill the record's fixed fields and are
/// mirrored into the neutral map; every other column is classified into
/// exactly one bucket map. The row-number column and synthesized
/// `Column_<i>` placeholders are dropped.
fn build_record(
    table: &RawTable,
    row: &[String],
    registry: &ComponentRegistry,
) -> Result<Option<EmployeeRecord>> {
    let name = table.get(row, "Name").unwrap_or("").trim();
    let employee_no = table.get(row, "Employee No").unwrap_or("").trim();
    if name.is_empty() && employee_no.is_empty() {
        return Ok(None);
    }
    if employee_no.is_empty() {
        return Err(Error::Internal(format!("missing employee number for '{name}'")));
    }
    if name.is_empty() {
        return Err(Error::Internal(format!("missing name for employee {employee_no}")));
    }

    let mut record = EmployeeRecord::new(employee_no, name);
    let opt = |v: Option<&str>| v.map(str::trim).filter(|s| !s.is_empty()).map(String::from);
    record.gender = opt(table.get(row, "Gender"));
    record.no_ktp = opt(table.get(row, "No KTP"));
    record.tax_file_no = opt(table.get(row, "Gov. Tax File No."));
    record.position = opt(table.get(row, "Position"));
    record.directorate = opt(table.get(row, "Directorate"));
    record.org_unit = opt(table.get(row, "Org Unit"));
    record.grade = opt(table.get(row, "Grade"));
    record.employment_status = opt(table.get(row, "Employment Status"));
    record.length_of_service = opt(table.get(row, "Length of Service"));
    record.tax_status = opt(table.get(row, "Tax Status"));
    record.join_date = parse_date_lenient(table.get(row, "Join Date"));
    record.terminate_date = parse_date_lenient(table.get(row, "Terminate Date"));

    for (header, raw) in table.headers.iter().zip(row) {
        if header == "No" || header.starts_with("Column_") {
            continue;
        }
        let value = parse_value(header, raw);
        if value.is_empty() {
            continue;
        }
        let bucket = if is_dedicated(header) {
            // Mirrored so metadata stays selectable as report columns.
            payrep_common::Bucket::Neutral
        } else {
            classify(header, registry)
        };
        record.bucket_mut(bucket).insert(header.clone(), value);
    }

    Ok(Some(record))
}

/// Parse a date with the known export formats; unparseable dates yield
/// `None` rather than failing the row.
fn parse_date_lenient(raw: Option<&str>) -> Option<NaiveDate> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    DATE_FORMATS
        .iter()
        .find_map(|fmt| NaiveDate::parse_from_str(raw, fmt).ok())
}

/// Bucketed inventory of the fields one batch actually carries, for the
/// report-building UI.
#[derive(Debug, Clone, Default, Serialize)]
pub struct FieldInventory {
    pub salary: Vec<String>,
    pub allowance: Vec<String>,
    pub deduction: Vec<String>,
    pub neutral: Vec<String>,
}

impl FieldInventory {
    /// Inventory from a sample of records (union across the sample; maps
    /// are sorted so the output is stable).
    pub fn from_records(records: &[EmployeeRecord]) -> Self {
        let mut inventory = FieldInventory::default();
        let mut collect = |target: &mut Vec<String>, map: fn(&EmployeeRecord) -> &BTreeMap<String, Scalar>| {
            let mut names = BTreeSet::new();
            for record in records {
                names.extend(map(record).keys().cloned());
            }
            *target = names.into_iter().collect();
        };
        collect(&mut inventory.salary, |r| &r.salary_data);
        collect(&mut inventory.allowance, |r| &r.allowance_data);
        collect(&mut inventory.deduction, |r| &r.deduction_data);
        collect(&mut inventory.neutral, |r| &r.neutral_data);
        inventory
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::{MemoryBatchStore, MemoryEmployeeStore};
    use payrep_common::BatchStatus;

    fn period() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 6, 1).unwrap()
    }

    fn ingestor() -> (Ingestor, Arc<MemoryEmployeeStore>, Arc<MemoryBatchStore>) {
        let employees = Arc::new(MemoryEmployeeStore::new());
        let batches = Arc::new(MemoryBatchStore::new());
        (
            Ingestor::new(employees.clone(), batches.clone()),
            employees,
            batches,
        )
    }

    const BASIC_CSV: &[u8] =
        b"Name,Employee No,Grade,Basic Salary,Pot. Kasbon,Hari Kerja\n\
          Ani,E001,Staff,1000000,50000,22\n\
          Budi,E002,Manager,2000000,,20\n";

    #[tokio::test]
    async fn ingests_and_partitions_buckets() {
        let (ingestor, employees, batches) = ingestor();
        let batch = batches.create(period()).await.unwrap();
        let registry = ComponentRegistry::default();

        let summary = ingestor
            .ingest(batch.id, period(), &registry, BASIC_CSV)
            .await
            .unwrap();
        assert_eq!(summary.inserted, 2);
        assert_eq!(summary.row_errors, 0);
        assert!(summary.warning().is_none());

        let records = employees.list_by_batch(batch.id).await.unwrap();
        let ani = records.iter().find(|r| r.employee_no == "E001").unwrap();
        assert_eq!(ani.salary_data["Basic Salary"], Scalar::Number(1_000_000.0));
        assert_eq!(ani.deduction_data["Pot. Kasbon"], Scalar::Number(50_000.0));
        assert_eq!(ani.neutral_data["Hari Kerja"], Scalar::Number(22.0));
        // Metadata mirrored into the neutral map.
        assert_eq!(ani.neutral_data["Grade"], Scalar::Text("Staff".into()));
        assert_eq!(ani.grade.as_deref(), Some("Staff"));

        let loaded = batches.get(batch.id).await.unwrap();
        assert_eq!(loaded.status, BatchStatus::Completed);
        assert_eq!(loaded.progress, 100);
        assert_eq!(loaded.row_count, 2);
    }

    #[tokio::test]
    async fn in_file_duplicate_is_fatal_and_persists_nothing() {
        let (ingestor, employees, batches) = ingestor();
        let batch = batches.create(period()).await.unwrap();
        let registry = ComponentRegistry::default();

        let csv = b"Name,Employee No\nAni,E001\nBudi,E002\nAni Again,E001\n";
        let err = ingestor
            .ingest(batch.id, period(), &registry, csv)
            .await
            .unwrap_err();
        match err {
            Error::DuplicateInFile { sample, total } => {
                assert_eq!(sample, vec!["E001".to_string()]);
                assert_eq!(total, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
        assert_eq!(employees.count_by_batch(batch.id).await.unwrap(), 0);
        assert_eq!(
            batches.get(batch.id).await.unwrap().status,
            BatchStatus::Failed
        );
    }

    #[tokio::test]
    async fn cross_batch_same_period_duplicate_is_skipped_with_warning() {
        let (ingestor, employees, batches) = ingestor();
        let registry = ComponentRegistry::default();

        let first = batches.create(period()).await.unwrap();
        ingestor
            .ingest(first.id, period(), &registry, b"Name,Employee No\nAni,E001\n")
            .await
            .unwrap();

        let second = batches.create(period()).await.unwrap();
        let summary = ingestor
            .ingest(
                second.id,
                period(),
                &registry,
                b"Name,Employee No\nAni,E001\nBudi,E002\n",
            )
            .await
            .unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.duplicates_skipped, 1);
        let warning = batches.get(second.id).await.unwrap().error_message.unwrap();
        assert!(warning.contains("1 duplicates skipped"));
        assert_eq!(employees.count_by_batch(second.id).await.unwrap(), 1);

        // Different period: ingests cleanly.
        let july = NaiveDate::from_ymd_opt(2025, 7, 1).unwrap();
        let third = batches.create(july).await.unwrap();
        let summary = ingestor
            .ingest(third.id, july, &registry, b"Name,Employee No\nAni,E001\n")
            .await
            .unwrap();
        assert_eq!(summary.inserted, 1);
        assert!(summary.warning().is_none());
    }

    #[tokio::test]
    async fn missing_columns_rejected() {
        let (ingestor, _, batches) = ingestor();
        let batch = batches.create(period()).await.unwrap();
        let registry = ComponentRegistry::default();

        let err = ingestor
            .ingest(batch.id, period(), &registry, b"Nama,NIK\nAni,E001\n")
            .await
            .unwrap_err();
        match err {
            Error::MissingColumns(missing) => {
                assert_eq!(missing, vec!["Name".to_string(), "Employee No".to_string()]);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn row_errors_skip_but_do_not_abort() {
        let (ingestor, employees, batches) = ingestor();
        let batch = batches.create(period()).await.unwrap();
        let registry = ComponentRegistry::default();

        // Second row has a name but no employee number; third has neither
        // and is skipped silently.
        let csv = b"Name,Employee No,Grade\nAni,E001,Staff\nBudi,,Staff\n,,Staff\n";
        let summary = ingestor
            .ingest(batch.id, period(), &registry, csv)
            .await
            .unwrap();
        assert_eq!(summary.inserted, 1);
        assert_eq!(summary.row_errors, 1);
        assert_eq!(summary.skipped_blank, 1);
        assert_eq!(employees.count_by_batch(batch.id).await.unwrap(), 1);
        let warning = batches.get(batch.id).await.unwrap().error_message.unwrap();
        assert!(warning.contains("1 row errors"));
    }

    #[tokio::test]
    async fn chunked_ingestion_advances_progress() {
        let employees = Arc::new(MemoryEmployeeStore::new());
        let batches = Arc::new(MemoryBatchStore::new());
        let config = IngestConfig {
            chunk_size: 2,
            ..Default::default()
        };
        let ingestor = Ingestor::with_config(employees.clone(), batches.clone(), config);
        let registry = ComponentRegistry::default();
        let batch = batches.create(period()).await.unwrap();

        let mut csv = String::from("Name,Employee No\n");
        for i in 0..5 {
            csv.push_str(&format!("Emp {i},E{i:03}\n"));
        }
        let summary = ingestor
            .ingest(batch.id, period(), &registry, csv.as_bytes())
            .await
            .unwrap();
        assert_eq!(summary.inserted, 5);
        assert_eq!(batches.get(batch.id).await.unwrap().progress, 100);
    }

    #[test]
    fn lenient_date_parsing() {
        assert_eq!(
            parse_date_lenient(Some("2024-03-15")),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(
            parse_date_lenient(Some("15/03/2024")),
            NaiveDate::from_ymd_opt(2024, 3, 15)
        );
        assert_eq!(parse_date_lenient(Some("not a date")), None);
        assert_eq!(parse_date_lenient(None), None);
    }

    #[test]
    fn field_inventory_unions_across_records() {
        let mut a = EmployeeRecord::new("E001", "Ani");
        a.salary_data.insert("Basic Salary".into(), Scalar::Number(1.0));
        let mut b = EmployeeRecord::new("E002", "Budi");
        b.salary_data.insert("Rapel Salary".into(), Scalar::Number(2.0));
        b.deduction_data.insert("Pot. Kasbon".into(), Scalar::Number(3.0));

        let inventory = FieldInventory::from_records(&[a, b]);
        assert_eq!(inventory.salary, vec!["Basic Salary", "Rapel Salary"]);
        assert_eq!(inventory.deduction, vec!["Pot. Kasbon"]);
    }
}
