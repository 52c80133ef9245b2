//! Interval export and progress display.

mod export;
mod progress;
mod writer;

pub use export::{CsvIntervalWriter, ExportFormat, JsonIntervalWriter, export_intervals};
pub use progress::ProgressReporter;
pub use writer::IntervalWriter;
