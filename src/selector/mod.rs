//! Segment selection: loudness, mask, thresholding.
//!
//! Turns a sequence of fixed-duration audio chunks into the ordered,
//! non-overlapping intervals that are loud enough and long enough to keep.
//! Everything in here is pure computation; the only side channel is the
//! optional [`ProgressObserver`].

mod loudness;
mod mask;
mod params;
mod runs;

pub use loudness::{NoProgress, ProgressObserver, loudness_series, rms};
pub use mask::{MaskStream, window_mask};
pub use params::{Parameters, TrailingRun};
pub use runs::{ClipInterval, INITIAL_STATE, RunDetector, RunState, detect_runs};

use crate::error::Result;
use tracing::debug;

/// Everything computed for one signal.
///
/// Loudness and mask are kept alongside the intervals because the preview
/// plot draws all three.
#[derive(Debug, Clone, PartialEq)]
pub struct Selection {
    /// RMS loudness per chunk.
    pub loudness: Vec<f32>,
    /// Windowed maximum of `loudness`.
    pub mask: Vec<f32>,
    /// Intervals to keep, ascending and non-overlapping.
    pub intervals: Vec<ClipInterval>,
}

impl Selection {
    /// Total length of the kept intervals in seconds.
    #[must_use]
    pub fn kept_secs(&self) -> f64 {
        self.intervals.iter().map(ClipInterval::duration).sum()
    }

    /// Loudest chunk in the signal.
    #[must_use]
    pub fn max_loudness(&self) -> f32 {
        self.loudness.iter().copied().fold(0.0, f32::max)
    }
}

/// Run the whole selection over raw audio chunks.
///
/// The chunk sequence is consumed exactly once.
///
/// # Errors
///
/// Returns [`crate::Error::EmptySignal`] if `chunks` yields nothing.
pub fn select_segments<I, C, O>(
    chunks: I,
    params: &Parameters,
    observer: &mut O,
) -> Result<Selection>
where
    I: IntoIterator<Item = C>,
    C: AsRef<[f32]>,
    O: ProgressObserver + ?Sized,
{
    let loudness = loudness_series(chunks, observer)?;
    select_from_loudness(loudness, params)
}

/// Run mask and run detection over a precomputed loudness series.
///
/// # Errors
///
/// Returns [`crate::Error::EmptySignal`] if `loudness` is empty.
pub fn select_from_loudness(loudness: Vec<f32>, params: &Parameters) -> Result<Selection> {
    if loudness.is_empty() {
        return Err(crate::Error::EmptySignal);
    }

    let window_size = params.window_size().min(loudness.len());
    debug!(
        chunks = loudness.len(),
        window_size, "Computing loudness mask"
    );
    let mask = window_mask(&loudness, window_size);
    let intervals = detect_runs(&mask, params);
    debug!(intervals = intervals.len(), "Run detection complete");

    Ok(Selection {
        loudness,
        mask,
        intervals,
    })
}
