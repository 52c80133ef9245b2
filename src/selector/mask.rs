//! Windowed maximum of the loudness series (the mask).
//!
//! `mask[i]` is the maximum loudness over `[i - w, i + w)`, where the lower
//! bound is clamped to 0 and the upper bound to the end of the series. With
//! `w = 0` the window is the single chunk `i`. Near the end the window simply
//! runs out, so the mask does not look as far ahead as it looks behind.

use std::collections::VecDeque;

/// Upper bound on the candidate buffer reserved up front.
const MAX_PREALLOCATED: usize = 4096;

/// Streaming sliding-window maximum.
///
/// Loudness values are pushed in order; each mask value is emitted as soon as
/// its lookahead is available. At most `2 * window_size + 1` values are
/// buffered at any time.
#[derive(Debug, Clone)]
pub struct MaskStream {
    window_size: usize,
    lookahead: usize,
    /// Candidate maxima as `(index, value)`, values strictly decreasing.
    candidates: VecDeque<(usize, f32)>,
    pushed: usize,
    emitted: usize,
}

impl MaskStream {
    /// Create a stream for the given half-window size in chunks.
    #[must_use]
    pub fn new(window_size: usize) -> Self {
        let lookahead = window_size.max(1);
        let capacity = window_size.saturating_add(lookahead).min(MAX_PREALLOCATED);
        Self {
            window_size,
            lookahead,
            candidates: VecDeque::with_capacity(capacity),
            pushed: 0,
            emitted: 0,
        }
    }

    /// Push the next loudness value, returning the next mask value if ready.
    pub fn push(&mut self, value: f32) -> Option<f32> {
        while self.candidates.back().is_some_and(|&(_, v)| v <= value) {
            self.candidates.pop_back();
        }
        self.candidates.push_back((self.pushed, value));
        self.pushed += 1;

        if self.pushed >= self.emitted.saturating_add(self.lookahead) {
            self.emit()
        } else {
            None
        }
    }

    /// Flush the mask values whose window reaches past the end of the series.
    #[must_use]
    pub fn finish(mut self) -> Vec<f32> {
        let mut tail = Vec::with_capacity(self.pushed - self.emitted);
        while self.emitted < self.pushed {
            if let Some(value) = self.emit() {
                tail.push(value);
            }
        }
        tail
    }

    /// Number of values currently buffered.
    #[must_use]
    pub fn buffered(&self) -> usize {
        self.candidates.len()
    }

    fn emit(&mut self) -> Option<f32> {
        let lower = self.emitted.saturating_sub(self.window_size);
        while self.candidates.front().is_some_and(|&(idx, _)| idx < lower) {
            self.candidates.pop_front();
        }
        self.emitted += 1;
        self.candidates.front().map(|&(_, v)| v)
    }
}

/// Compute the full mask for a loudness series.
///
/// Windows wider than the series are clamped to its length, which leaves the
/// mask unchanged.
#[must_use]
pub fn window_mask(loudness: &[f32], window_size: usize) -> Vec<f32> {
    let mut stream = MaskStream::new(window_size.min(loudness.len()));
    let mut mask = Vec::with_capacity(loudness.len());
    for &value in loudness {
        if let Some(m) = stream.push(value) {
            mask.push(m);
        }
    }
    mask.extend(stream.finish());
    mask
}
