//! Console, progress and JSON reporting.

mod json;
pub mod progress;
mod reporter;
mod types;

pub use json::{ReportSettings, RunReport, write_run_report};
pub use reporter::{ConsoleReporter, NullReporter, SyncReporter, best_match_line};
pub use types::{ClipRecord, ClipStatus, RunTotals};
