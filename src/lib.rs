//! Turns the biweekly retail-audit CSV export into the Co-op client report.
//!
//! The whole system is one in-memory pipeline: load the export as a string
//! table, filter and normalize it against the fixed report layout, write the
//! result back out as CSV. See [`report::build_report`] for the stages.

pub mod report;
pub mod table;

pub use report::{build_report, REPORT_FILE_NAME};
pub use table::{read_csv_table, write_csv_table, RawTable};
