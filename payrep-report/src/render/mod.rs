//! Spreadsheet renderers
//!
//! Two layouts: the flat detail sheet with five header rows and merged label
//! bands ([`detail`]), and the hand-designed cost-center sheet with colored
//! section bands and the `-` sentinel ([`cost_center`]).

pub mod cost_center;
pub mod detail;

use payrep_common::Error;
use rust_xlsxwriter::XlsxError;

pub use cost_center::render_cost_center;
pub use detail::render_detail;

pub(crate) fn xlsx_err(e: XlsxError) -> Error {
    Error::Internal(format!("xlsx: {e}"))
}
