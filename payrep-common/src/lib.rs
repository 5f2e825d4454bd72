//! # Payrep Common Library
//!
//! Shared code for the payroll report engine:
//! - Core data model (buckets, scalars, employee records, batches, reports)
//! - Error taxonomy
//! - Component registry snapshots
//! - Configuration loading

pub mod config;
pub mod error;
pub mod registry;
pub mod types;

pub use error::{Error, Result, StatusClass};
pub use registry::{ComponentEntry, ComponentRegistry};
pub use types::{
    is_text_field, BatchStatus, Bucket, EmployeeRecord, FieldMap, FieldSelection,
    ReportDefinition, ReportType, Scalar, UploadBatch, TEXT_FIELDS,
};
