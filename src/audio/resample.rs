//! Resampling to the analysis rate using rubato.

use crate::error::{Error, Result};
use audioadapter_buffers::direct::SequentialSlice;
use rubato::{Fft, FixedSync, Resampler};

const BLOCK_FRAMES: usize = 1024;

/// Resample mono audio to the target sample rate.
///
/// Returns the input unchanged if already at the target rate.
pub fn resample(samples: Vec<f32>, from_rate: u32, to_rate: u32) -> Result<Vec<f32>> {
    if from_rate == to_rate || samples.is_empty() {
        return Ok(samples);
    }

    let mut resampler = Fft::<f32>::new(
        from_rate as usize,
        to_rate as usize,
        BLOCK_FRAMES,
        1,
        1,
        FixedSync::Both,
    )
    .map_err(|e| Error::Resample {
        reason: e.to_string(),
    })?;

    let block = resampler.input_frames_next();
    let mut output = Vec::with_capacity(expected_len(samples.len(), from_rate, to_rate) + block);

    let mut blocks = samples.chunks_exact(block);
    for chunk in blocks.by_ref() {
        output.extend(process_block(&mut resampler, chunk)?);
    }

    // Zero-pad the tail and keep only the share of output it accounts for.
    let rest = blocks.remainder();
    if !rest.is_empty() {
        let mut padded = rest.to_vec();
        padded.resize(block, 0.0);
        let resampled = process_block(&mut resampler, &padded)?;
        let keep = expected_len(rest.len(), from_rate, to_rate).min(resampled.len());
        output.extend_from_slice(&resampled[..keep]);
    }

    Ok(output)
}

fn process_block(resampler: &mut Fft<f32>, block: &[f32]) -> Result<Vec<f32>> {
    let input = SequentialSlice::new(block, 1, block.len()).map_err(|e| Error::Resample {
        reason: format!("failed to create input adapter: {e}"),
    })?;

    let resampled = resampler
        .process(&input, 0, None)
        .map_err(|e| Error::Resample {
            reason: e.to_string(),
        })?;

    Ok(resampled.take_data())
}

/// Number of output frames `input_len` frames map to.
#[allow(
    clippy::cast_precision_loss,
    clippy::cast_possible_truncation,
    clippy::cast_sign_loss
)]
fn expected_len(input_len: usize, from_rate: u32, to_rate: u32) -> usize {
    ((input_len as f64) * f64::from(to_rate) / f64::from(from_rate)).ceil() as usize
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_resample_same_rate_returns_input() {
        let samples = vec![0.1, 0.2, 0.3, 0.4, 0.5];
        let result = resample(samples.clone(), 44_100, 44_100).unwrap();
        assert_eq!(result, samples);
    }

    #[test]
    fn test_resample_empty_input() {
        assert!(resample(Vec::new(), 48_000, 44_100).unwrap().is_empty());
    }

    #[test]
    fn test_resample_48k_to_44k() {
        #[allow(clippy::cast_precision_loss)]
        let samples: Vec<f32> = (0..48_000).map(|i| (i as f32 * 0.001).sin()).collect();
        let output = resample(samples, 48_000, 44_100).unwrap();
        // One second in, roughly one second out.
        assert!(output.len() > 40_000);
        assert!(output.len() < 48_000);
    }

    #[test]
    fn test_resample_preserves_level() {
        let samples = vec![0.25_f32; 32_000];
        let output = resample(samples, 16_000, 44_100).unwrap();
        let mid = &output[output.len() / 4..output.len() / 2];
        let rms = crate::selector::rms(mid);
        assert!((rms - 0.25).abs() < 0.02);
    }

    #[test]
    fn test_expected_len_rounds_up() {
        assert_eq!(expected_len(48_000, 48_000, 44_100), 44_100);
        assert_eq!(expected_len(1, 48_000, 44_100), 1);
    }
}
