//! Thresholding of the mask and run detection.

use serde::Serialize;

use super::params::{Parameters, TrailingRun};

/// A retained region of the source, in seconds.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClipInterval {
    /// Start time in seconds.
    pub start: f64,
    /// End time in seconds.
    pub end: f64,
}

impl ClipInterval {
    /// Length of the interval in seconds.
    #[must_use]
    pub fn duration(&self) -> f64 {
        self.end - self.start
    }

    /// Midpoint of the interval in seconds.
    #[must_use]
    pub fn midpoint(&self) -> f64 {
        (self.start + self.end) / 2.0
    }
}

/// State of the run walker between two mask values.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RunState {
    /// Whether the walker is currently inside a run.
    pub clip_on: bool,
    /// Chunk index at which the current run started.
    pub start_index: usize,
}

/// The walker starts inside a run that began at time 0.
///
/// A recording that starts loud therefore keeps its first chunk, and one that
/// starts quiet closes this implicit run immediately (it never meets the
/// minimum length).
pub const INITIAL_STATE: RunState = RunState {
    clip_on: true,
    start_index: 0,
};

/// Incremental run detector over mask values.
#[derive(Debug, Clone)]
pub struct RunDetector {
    params: Parameters,
    state: RunState,
    index: usize,
}

impl RunDetector {
    /// Create a detector in [`INITIAL_STATE`].
    #[must_use]
    pub fn new(params: Parameters) -> Self {
        Self {
            params,
            state: INITIAL_STATE,
            index: 0,
        }
    }

    /// Current walker state.
    #[must_use]
    pub fn state(&self) -> RunState {
        self.state
    }

    /// Feed the next mask value. Returns an interval when a run closes and is
    /// long enough to keep.
    pub fn push(&mut self, mask_value: f32) -> Option<ClipInterval> {
        let index = self.index;
        self.index += 1;

        if mask_value >= self.params.threshold() {
            if !self.state.clip_on {
                self.state = RunState {
                    clip_on: true,
                    start_index: index,
                };
            }
            None
        } else if self.state.clip_on {
            self.state.clip_on = false;
            // The run ends on the chunk before the first quiet one.
            self.close_run(index)
        } else {
            None
        }
    }

    /// Signal the end of the mask and apply the trailing-run policy.
    #[must_use]
    pub fn finish(self) -> Option<ClipInterval> {
        match self.params.trailing() {
            TrailingRun::Drop => None,
            TrailingRun::Close if self.state.clip_on && self.index > 0 => {
                self.close_run(self.index)
            }
            TrailingRun::Close => None,
        }
    }

    /// Close the current run at the chunk before `next_index`.
    fn close_run(&self, next_index: usize) -> Option<ClipInterval> {
        let start = self.params.time_of(self.state.start_index);
        #[allow(clippy::cast_precision_loss)]
        let end = (next_index as f64 - 1.0) * self.params.chunk_length();
        let interval = ClipInterval { start, end };
        let duration = interval.duration();
        (duration > 0.0 && duration >= self.params.min_clip()).then_some(interval)
    }
}

/// Walk a whole mask and collect the intervals to keep.
#[must_use]
pub fn detect_runs(mask: &[f32], params: &Parameters) -> Vec<ClipInterval> {
    let mut detector = RunDetector::new(*params);
    let mut intervals: Vec<ClipInterval> = mask.iter().filter_map(|&m| detector.push(m)).collect();
    intervals.extend(detector.finish());
    intervals
}
