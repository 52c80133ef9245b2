//! Validated cut parameters.

use crate::constants::analysis::WINDOW_RATIO_TOLERANCE;
use crate::constants::{
    DEFAULT_CHUNK_LENGTH, DEFAULT_MIN_CLIP, DEFAULT_THRESHOLD, DEFAULT_WINDOW_LENGTH,
};
use crate::error::{Error, Result};

/// What to do with a run that is still open when the signal ends.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum TrailingRun {
    /// Never emit the open run. Recordings that end loud lose their tail.
    #[default]
    Drop,
    /// Close the open run at the last chunk and apply the usual length check.
    Close,
}

/// Parameter set for one run of the segment selector.
///
/// Construct with [`Parameters::new`], which rejects values that would make
/// the selection meaningless.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Parameters {
    chunk_length: f64,
    window_length: f64,
    threshold: f32,
    min_clip: f64,
    trailing: TrailingRun,
}

impl Parameters {
    /// Validate and build a parameter set.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidParameter`] if `chunk_length` is not positive,
    /// or if any other value is negative or not finite.
    pub fn new(chunk_length: f64, window_length: f64, threshold: f32, min_clip: f64) -> Result<Self> {
        if !chunk_length.is_finite() || chunk_length <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "chunk",
                value: chunk_length,
                reason: "must be a finite number greater than 0",
            });
        }
        check_non_negative("window", window_length)?;
        check_non_negative("thresh", f64::from(threshold))?;
        check_non_negative("min_clip", min_clip)?;

        Ok(Self {
            chunk_length,
            window_length,
            threshold,
            min_clip,
            trailing: TrailingRun::default(),
        })
    }

    /// Replace the trailing-run policy.
    #[must_use]
    pub fn with_trailing(mut self, trailing: TrailingRun) -> Self {
        self.trailing = trailing;
        self
    }

    /// Chunk length in seconds.
    #[must_use]
    pub fn chunk_length(&self) -> f64 {
        self.chunk_length
    }

    /// Mask window length in seconds.
    #[must_use]
    pub fn window_length(&self) -> f64 {
        self.window_length
    }

    /// Loudness threshold.
    #[must_use]
    pub fn threshold(&self) -> f32 {
        self.threshold
    }

    /// Minimum kept clip length in seconds.
    #[must_use]
    pub fn min_clip(&self) -> f64 {
        self.min_clip
    }

    /// Trailing-run policy.
    #[must_use]
    pub fn trailing(&self) -> TrailingRun {
        self.trailing
    }

    /// Number of chunks the mask reaches on each side: `floor(window / chunk)`.
    ///
    /// A quotient within rounding error of an integer counts as that integer.
    /// Saturates at `usize::MAX` for windows too wide to count.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn window_size(&self) -> usize {
        let ratio = self.window_length / self.chunk_length;
        let nearest = ratio.round();
        if (ratio - nearest).abs() <= WINDOW_RATIO_TOLERANCE * nearest.max(1.0) {
            nearest as usize
        } else {
            ratio.floor() as usize
        }
    }

    /// Start time of chunk `index` in seconds.
    #[must_use]
    pub fn time_of(&self, index: usize) -> f64 {
        #[allow(clippy::cast_precision_loss)]
        let index = index as f64;
        index * self.chunk_length
    }
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            chunk_length: DEFAULT_CHUNK_LENGTH,
            window_length: DEFAULT_WINDOW_LENGTH,
            threshold: DEFAULT_THRESHOLD,
            min_clip: DEFAULT_MIN_CLIP,
            trailing: TrailingRun::default(),
        }
    }
}

fn check_non_negative(name: &'static str, value: f64) -> Result<()> {
    if !value.is_finite() || value < 0.0 {
        return Err(Error::InvalidParameter {
            name,
            value,
            reason: "must be a finite number >= 0",
        });
    }
    Ok(())
}
