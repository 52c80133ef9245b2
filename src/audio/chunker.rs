//! Splitting audio into fixed-duration chunks.

/// Lazy iterator over fixed-duration chunks of a sample buffer.
///
/// Chunk `i` spans samples `round(i * d * rate)..round((i + 1) * d * rate)`,
/// so it starts at `i * d` seconds to the nearest sample even when `d * rate`
/// is fractional. The final chunk holds whatever is left and is not padded,
/// so padding never lowers its loudness.
#[derive(Debug, Clone)]
pub struct AudioChunks<'a> {
    samples: &'a [f32],
    samples_per_chunk: f64,
    next_index: usize,
    count: usize,
}

impl<'a> AudioChunks<'a> {
    /// Chunk `samples` at `sample_rate` into pieces of `chunk_duration` seconds.
    ///
    /// Chunks hold at least one sample, even for durations shorter than one
    /// sample period.
    #[must_use]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    pub fn new(samples: &'a [f32], sample_rate: u32, chunk_duration: f64) -> Self {
        let samples_per_chunk = (chunk_duration * f64::from(sample_rate)).max(1.0);
        let len = samples.len();

        let mut count = (len as f64 / samples_per_chunk).ceil() as usize;
        while count > 0 && boundary(count - 1, samples_per_chunk) >= len {
            count -= 1;
        }

        Self {
            samples,
            samples_per_chunk,
            next_index: 0,
            count,
        }
    }

    /// Nominal number of samples per chunk. May be fractional.
    #[must_use]
    pub fn samples_per_chunk(&self) -> f64 {
        self.samples_per_chunk
    }
}

impl<'a> Iterator for AudioChunks<'a> {
    type Item = &'a [f32];

    fn next(&mut self) -> Option<Self::Item> {
        if self.next_index >= self.count {
            return None;
        }
        let len = self.samples.len();
        let start = boundary(self.next_index, self.samples_per_chunk).min(len);
        self.next_index += 1;
        let end = if self.next_index == self.count {
            len
        } else {
            boundary(self.next_index, self.samples_per_chunk).min(len)
        };
        Some(&self.samples[start..end])
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let n = self.count - self.next_index;
        (n, Some(n))
    }
}

impl ExactSizeIterator for AudioChunks<'_> {}

/// First sample of chunk `index`.
#[allow(
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss,
    clippy::cast_precision_loss
)]
fn boundary(index: usize, samples_per_chunk: f64) -> usize {
    (index as f64 * samples_per_chunk).round() as usize
}

#[cfg(test)]
#[allow(clippy::float_cmp)]
mod tests {
    use super::*;

    #[test]
    fn test_chunks_even_split() {
        let samples = vec![0.0; 44_100];
        let mut chunks = AudioChunks::new(&samples, 44_100, 0.01);
        assert_eq!(chunks.samples_per_chunk().round(), 441.0);
        assert_eq!(chunks.len(), 100);
        assert!(chunks.all(|c| c.len() == 441));
    }

    #[test]
    fn test_final_chunk_is_partial() {
        let samples = vec![0.0; 1_000];
        let chunks: Vec<_> = AudioChunks::new(&samples, 1_000, 0.3).collect();
        assert_eq!(chunks.len(), 4);
        assert_eq!(chunks[3].len(), 100);
    }

    #[test]
    fn test_chunks_preserve_order() {
        let samples: Vec<f32> = (0..10u8).map(f32::from).collect();
        let chunks: Vec<_> = AudioChunks::new(&samples, 4, 1.0).collect();
        assert_eq!(chunks, vec![&samples[0..4], &samples[4..8], &samples[8..10]]);
    }

    #[test]
    fn test_fractional_chunk_boundaries_are_rounded() {
        let samples: Vec<f32> = (0..10u8).map(f32::from).collect();
        let chunks = AudioChunks::new(&samples, 1, 2.5);
        assert_eq!(chunks.len(), 4);
        let lens: Vec<usize> = chunks.map(<[f32]>::len).collect();
        assert_eq!(lens, vec![3, 2, 3, 2]);
    }

    #[test]
    #[allow(
        clippy::cast_possible_truncation,
        clippy::cast_sign_loss,
        clippy::cast_precision_loss
    )]
    fn test_fractional_chunks_do_not_drift() {
        // 22050 Hz at 10 ms is 220.5 samples per chunk.
        let samples = vec![0.0; 22_050 * 60];
        let chunks = AudioChunks::new(&samples, 22_050, 0.01);
        assert_eq!(chunks.len(), 6_000);

        let mut offset = 0;
        for (i, chunk) in chunks.enumerate() {
            let expected = (i as f64 * 220.5).round() as usize;
            assert_eq!(offset, expected, "chunk {i}");
            offset += chunk.len();
        }
        assert_eq!(offset, samples.len());
    }

    #[test]
    fn test_no_empty_trailing_chunk() {
        // 5 samples at 2.4 per chunk: boundaries 0, 2, 5.
        let samples = vec![0.0; 5];
        let chunks: Vec<_> = AudioChunks::new(&samples, 10, 0.24).collect();
        assert_eq!(chunks.len(), 2);
        assert!(chunks.iter().all(|c| !c.is_empty()));
    }

    #[test]
    fn test_size_hint_tracks_progress() {
        let samples = vec![0.0; 100];
        let mut chunks = AudioChunks::new(&samples, 10, 1.5);
        assert_eq!(chunks.len(), 7);
        chunks.next();
        chunks.next();
        assert_eq!(chunks.len(), 5);
    }

    #[test]
    fn test_empty_input_yields_nothing() {
        let samples: Vec<f32> = Vec::new();
        assert_eq!(AudioChunks::new(&samples, 44_100, 0.01).count(), 0);
    }

    #[test]
    fn test_tiny_duration_uses_one_sample() {
        let samples = vec![0.0; 5];
        let chunks = AudioChunks::new(&samples, 10, 0.001);
        assert_eq!(chunks.samples_per_chunk(), 1.0);
        assert_eq!(chunks.count(), 5);
    }
}
