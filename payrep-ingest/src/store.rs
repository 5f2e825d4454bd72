//! Store collaborator interfaces and in-memory implementations
//!
//! Persistence proper (schema, migrations, connections) is outside this
//! engine; the pipeline only sees these traits. The in-memory stores back
//! tests and single-process deployments, and encode the same contracts a
//! database-backed implementation must honor: chunk writes are
//! all-or-nothing, same-period duplicates are silently skipped, and batch
//! progress is safe to poll while ingestion runs.

use async_trait::async_trait;
use chrono::NaiveDate;
use payrep_common::{BatchStatus, EmployeeRecord, Error, Result, UploadBatch};
use serde::Serialize;
use std::collections::{HashMap, HashSet};
use tokio::sync::RwLock;
use uuid::Uuid;

/// Outcome of one bulk chunk write.
#[derive(Debug, Clone, Copy, Default, Serialize)]
pub struct ChunkWriteSummary {
    pub inserted: usize,
    /// Same employee number already ingested for this period (a different
    /// batch); skipped, not an error.
    pub duplicates_skipped: usize,
}

/// Append-only employee record store, unique on (period, employee number).
#[async_trait]
pub trait EmployeeStore: Send + Sync {
    /// Persist one chunk as a single bulk write. Records whose employee
    /// number already exists for `period` are skipped and counted.
    async fn put_chunk(
        &self,
        batch_id: Uuid,
        period: NaiveDate,
        records: Vec<EmployeeRecord>,
    ) -> Result<ChunkWriteSummary>;

    async fn list_by_batch(&self, batch_id: Uuid) -> Result<Vec<EmployeeRecord>>;

    async fn count_by_batch(&self, batch_id: Uuid) -> Result<usize>;
}

/// Batch lifecycle store. Progress advances monotonically; readers never
/// block writers.
#[async_trait]
pub trait BatchStore: Send + Sync {
    async fn create(&self, period: NaiveDate) -> Result<UploadBatch>;

    async fn get(&self, batch_id: Uuid) -> Result<UploadBatch>;

    async fn update_progress(&self, batch_id: Uuid, progress: u8) -> Result<()>;

    /// Terminal success; `warning` carries a non-fatal summary (row errors,
    /// cross-period duplicates) when present.
    async fn complete(&self, batch_id: Uuid, row_count: usize, warning: Option<String>)
        -> Result<()>;

    /// Terminal failure with the fatal error message.
    async fn fail(&self, batch_id: Uuid, message: String) -> Result<()>;
}

#[derive(Default)]
struct EmployeeState {
    by_batch: HashMap<Uuid, Vec<EmployeeRecord>>,
    by_period: HashMap<NaiveDate, HashSet<String>>,
}

/// In-process employee store.
#[derive(Default)]
pub struct MemoryEmployeeStore {
    state: RwLock<EmployeeState>,
}

impl MemoryEmployeeStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl EmployeeStore for MemoryEmployeeStore {
    async fn put_chunk(
        &self,
        batch_id: Uuid,
        period: NaiveDate,
        records: Vec<EmployeeRecord>,
    ) -> Result<ChunkWriteSummary> {
        let mut state = self.state.write().await;
        let mut summary = ChunkWriteSummary::default();
        let seen = state.by_period.entry(period).or_default();
        let mut accepted = Vec::with_capacity(records.len());
        for record in records {
            if seen.contains(&record.employee_no) {
                summary.duplicates_skipped += 1;
                continue;
            }
            seen.insert(record.employee_no.clone());
            accepted.push(record);
        }
        summary.inserted = accepted.len();
        state.by_batch.entry(batch_id).or_default().extend(accepted);
        Ok(summary)
    }

    async fn list_by_batch(&self, batch_id: Uuid) -> Result<Vec<EmployeeRecord>> {
        let state = self.state.read().await;
        Ok(state.by_batch.get(&batch_id).cloned().unwrap_or_default())
    }

    async fn count_by_batch(&self, batch_id: Uuid) -> Result<usize> {
        let state = self.state.read().await;
        Ok(state.by_batch.get(&batch_id).map(Vec::len).unwrap_or(0))
    }
}

/// In-process batch lifecycle store.
#[derive(Default)]
pub struct MemoryBatchStore {
    batches: RwLock<HashMap<Uuid, UploadBatch>>,
}

impl MemoryBatchStore {
    pub fn new() -> Self {
        Self::default()
    }

    async fn with_batch<F>(&self, batch_id: Uuid, mutate: F) -> Result<()>
    where
        F: FnOnce(&mut UploadBatch),
    {
        let mut batches = self.batches.write().await;
        let batch = batches
            .get_mut(&batch_id)
            .ok_or_else(|| Error::NotFound(format!("batch {batch_id}")))?;
        mutate(batch);
        Ok(())
    }
}

#[async_trait]
impl BatchStore for MemoryBatchStore {
    async fn create(&self, period: NaiveDate) -> Result<UploadBatch> {
        let batch = UploadBatch::new(period);
        self.batches.write().await.insert(batch.id, batch.clone());
        Ok(batch)
    }

    async fn get(&self, batch_id: Uuid) -> Result<UploadBatch> {
        self.batches
            .read()
            .await
            .get(&batch_id)
            .cloned()
            .ok_or_else(|| Error::NotFound(format!("batch {batch_id}")))
    }

    async fn update_progress(&self, batch_id: Uuid, progress: u8) -> Result<()> {
        self.with_batch(batch_id, |batch| {
            // Monotonic: a stale writer can never move the bar backwards.
            batch.progress = batch.progress.max(progress.min(100));
        })
        .await
    }

    async fn complete(
        &self,
        batch_id: Uuid,
        row_count: usize,
        warning: Option<String>,
    ) -> Result<()> {
        self.with_batch(batch_id, |batch| {
            batch.status = BatchStatus::Completed;
            batch.progress = 100;
            batch.row_count = row_count;
            batch.error_message = warning;
        })
        .await
    }

    async fn fail(&self, batch_id: Uuid, message: String) -> Result<()> {
        self.with_batch(batch_id, |batch| {
            batch.status = BatchStatus::Failed;
            batch.error_message = Some(message);
        })
        .await
    }
}
