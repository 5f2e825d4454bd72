//! Report generation for ingested payroll batches
//!
//! Everything here is pure computation over [`payrep_common::EmployeeRecord`]
//! values: derivations and fixed-membership totals ([`derive`]), the canonical
//! output column order ([`fields`]), presentation categories ([`category`]),
//! cost-center aggregation ([`aggregate`]), the two spreadsheet layouts
//! ([`render`]) and the service surface tying them together ([`report`]).

pub mod aggregate;
pub mod category;
pub mod derive;
pub mod fields;
pub mod render;
pub mod report;

pub use aggregate::{aggregate, CoaSection, CostCenterReport, DirectorateSummary, COST_CENTER_COMPONENTS};
pub use category::{categorize, CategoryPath};
pub use derive::{
    apply_derivations, derive_coa, derive_cost_center_by_function, derive_level, TotalDef, TOTALS,
};
pub use fields::{is_output_field, HEADCOUNT_FIELDS, OUTPUT_FIELDS};
pub use render::{render_cost_center, render_detail};
pub use report::{generate, RenderedReport, XLSX_CONTENT_TYPE};
