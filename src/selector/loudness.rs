//! Per-chunk loudness extraction.

use crate::error::{Error, Result};

/// Receives progress updates from long-running passes (loudness extraction,
/// segment rendering).
///
/// Purely observational: implementations must not influence the result.
pub trait ProgressObserver {
    /// Called after each unit of work. `total` is the expected count, if known.
    fn on_progress(&mut self, done: usize, total: Option<usize>);

    /// Called once after the last unit.
    fn on_finish(&mut self, _done: usize) {}
}

/// Observer that ignores all updates.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProgress;

impl ProgressObserver for NoProgress {
    fn on_progress(&mut self, _done: usize, _total: Option<usize>) {}
}

impl<F> ProgressObserver for F
where
    F: FnMut(usize, Option<usize>),
{
    fn on_progress(&mut self, done: usize, total: Option<usize>) {
        self(done, total);
    }
}

/// Root-mean-square amplitude of a slice of samples.
///
/// An empty slice has loudness 0.
#[must_use]
#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation)]
pub fn rms(samples: &[f32]) -> f32 {
    if samples.is_empty() {
        return 0.0;
    }
    let sum_sq: f64 = samples.iter().map(|&s| f64::from(s) * f64::from(s)).sum();
    (sum_sq / samples.len() as f64).sqrt() as f32
}

/// Compute the loudness series of a chunk sequence, consuming it once.
///
/// # Errors
///
/// Returns [`Error::EmptySignal`] if the sequence yields no chunks.
pub fn loudness_series<I, C, O>(chunks: I, observer: &mut O) -> Result<Vec<f32>>
where
    I: IntoIterator<Item = C>,
    C: AsRef<[f32]>,
    O: ProgressObserver + ?Sized,
{
    let chunks = chunks.into_iter();
    let total = match chunks.size_hint() {
        (lower, Some(upper)) if lower == upper => Some(upper),
        _ => None,
    };

    let mut loudness = Vec::with_capacity(total.unwrap_or(0));
    for chunk in chunks {
        loudness.push(rms(chunk.as_ref()));
        observer.on_progress(loudness.len(), total);
    }
    observer.on_finish(loudness.len());

    if loudness.is_empty() {
        return Err(Error::EmptySignal);
    }
    Ok(loudness)
}
