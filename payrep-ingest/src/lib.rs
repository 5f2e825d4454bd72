//! Payroll file ingestion
//!
//! Takes a raw payroll export (CSV or TSV, single or stacked headers) and
//! turns it into classified employee records:
//!
//! - [`header`] — decoding, delimiter detection, header normalization
//! - [`value`] — cell-level text-to-typed conversion
//! - [`classify`] — field-name classification into storage buckets
//! - [`store`] — store collaborator traits and in-memory implementations
//! - [`pipeline`] — the chunked ingestion orchestrator

pub mod classify;
pub mod header;
pub mod pipeline;
pub mod store;
pub mod value;

pub use classify::{classify, is_dedicated, DEDICATED_FIELDS};
pub use header::{decode_bytes, detect_delimiter, parse_table, RawTable};
pub use pipeline::{FieldInventory, IngestSummary, Ingestor};
pub use store::{
    BatchStore, ChunkWriteSummary, EmployeeStore, MemoryBatchStore, MemoryEmployeeStore,
};
pub use value::parse_value;
