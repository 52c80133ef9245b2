//! Interval writer trait definition.

use crate::error::Result;
use crate::selector::ClipInterval;

/// Trait for writing kept intervals.
pub trait IntervalWriter {
    /// Write the file header (if applicable).
    fn write_header(&mut self) -> Result<()>;

    /// Write a single interval.
    fn write_interval(&mut self, interval: &ClipInterval) -> Result<()>;

    /// Finalize the output (flush, close, etc.).
    fn finalize(&mut self) -> Result<()>;
}
