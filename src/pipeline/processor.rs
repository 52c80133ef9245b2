//! Single file processing pipeline.

use crate::audio::{AudioChunks, decode_audio_file, resample};
use crate::constants::analysis::DEFAULT_SAMPLE_RATE;
use crate::constants::DEFAULT_OUTPUT_DIR;
use crate::error::{Error, Result};
use crate::output::{ProgressReporter, export_intervals};
use crate::pipeline::{output_path_for, prepare_output, preview_path_for};
use crate::plot::{PlotData, write_preview};
use crate::render::{Renderer, probe_duration};
use crate::selector::{Parameters, select_segments};
use std::path::{Path, PathBuf};
use std::time::Instant;
use tracing::{debug, info, warn};

/// What to produce from the selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CutMode {
    /// Render the trimmed video.
    #[default]
    Render,
    /// Write the preview plot only.
    Graph,
}

/// Options for cutting one file.
#[derive(Debug, Clone)]
pub struct CutOptions {
    /// Segment selection parameters.
    pub params: Parameters,
    /// Render the video or only plot.
    pub mode: CutMode,
    /// Directory outputs are written under.
    pub output_dir: PathBuf,
    /// Overwrite existing outputs.
    pub force: bool,
    /// Optional interval export path.
    pub export: Option<PathBuf>,
    /// Sample rate the audio is analysed at.
    pub sample_rate: u32,
    /// Show progress bars.
    pub progress: bool,
}

impl Default for CutOptions {
    fn default() -> Self {
        Self {
            params: Parameters::default(),
            mode: CutMode::Render,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            force: false,
            export: None,
            sample_rate: DEFAULT_SAMPLE_RATE,
            progress: false,
        }
    }
}

/// Summary of one cut.
#[derive(Debug, Clone, PartialEq)]
pub struct CutReport {
    /// Number of kept intervals.
    pub intervals: usize,
    /// Total kept duration in seconds.
    pub kept_secs: f64,
    /// Duration of the source in seconds.
    pub source_secs: f64,
    /// Trimmed video or preview plot that was written.
    pub output: PathBuf,
}

impl CutReport {
    /// Seconds cut out of the source.
    #[must_use]
    pub fn removed_secs(&self) -> f64 {
        (self.source_secs - self.kept_secs).max(0.0)
    }
}

/// Cut the quiet sections out of `input`.
///
/// Decodes the audio track, selects the loud intervals, then either renders
/// them with `renderer` or writes the preview plot, depending on
/// `options.mode`.
///
/// # Errors
///
/// Fails if the input is missing, the output exists without `force`, the
/// audio cannot be decoded, the signal is empty, nothing is loud enough to
/// keep (render mode), or the renderer, plotter or export fail.
pub fn cut_file(input: &Path, options: &CutOptions, renderer: &dyn Renderer) -> Result<CutReport> {
    let start_time = Instant::now();

    if !input.exists() {
        return Err(Error::InputNotFound {
            path: input.to_path_buf(),
        });
    }

    let output = match options.mode {
        CutMode::Render => output_path_for(input, &options.output_dir),
        CutMode::Graph => preview_path_for(input, &options.output_dir),
    };
    prepare_output(&output, options.force)?;

    info!("Processing: {}", input.display());

    let decoded = decode_audio_file(input)?;
    info!(
        "Decoded {:.1}s of audio at {} Hz",
        decoded.duration_secs, decoded.sample_rate
    );

    let samples = if decoded.sample_rate == options.sample_rate {
        decoded.samples
    } else {
        debug!(
            "Resampling from {} Hz to {} Hz...",
            decoded.sample_rate, options.sample_rate
        );
        resample(decoded.samples, decoded.sample_rate, options.sample_rate)?
    };

    let params = &options.params;
    let chunks = AudioChunks::new(&samples, options.sample_rate, params.chunk_length());
    debug!(
        "Chunking into {:.2} samples per chunk, window {} chunks",
        chunks.samples_per_chunk(),
        params.window_size()
    );

    let file_name = input
        .file_name()
        .and_then(|n| n.to_str())
        .unwrap_or("unknown");
    let mut analysis_progress = ProgressReporter::analysis(file_name, options.progress);
    let selection = select_segments(chunks, params, &mut analysis_progress)?;
    drop(samples);

    let kept_secs = selection.kept_secs();
    info!(
        "Selected {} intervals, {:.1}s kept",
        selection.intervals.len(),
        kept_secs
    );

    if let Some(export) = &options.export {
        export_intervals(export, input, params, &selection.intervals)?;
    }

    match options.mode {
        CutMode::Graph => {
            write_preview(&output, &PlotData::new(&selection, params))?;
        }
        CutMode::Render => {
            if selection.intervals.is_empty() {
                return Err(Error::NothingToRender);
            }
            let mut render_progress = ProgressReporter::render(file_name, options.progress);
            renderer.render(input, &selection.intervals, &output, &mut render_progress)?;
        }
    }

    let source_secs = source_duration(input, decoded.duration_secs);
    let report = CutReport {
        intervals: selection.intervals.len(),
        kept_secs,
        source_secs,
        output,
    };

    info!(
        "Wrote {} in {:.2}s ({:.1}s kept, {:.1}s removed)",
        report.output.display(),
        start_time.elapsed().as_secs_f64(),
        report.kept_secs,
        report.removed_secs()
    );

    Ok(report)
}

/// Container duration, falling back to the decoded audio duration.
fn source_duration(input: &Path, decoded_secs: f64) -> f64 {
    match probe_duration(input) {
        Ok(Some(secs)) => secs,
        Ok(None) => decoded_secs,
        Err(e) => {
            warn!("Could not probe duration of {}: {e}", input.display());
            decoded_secs
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::render::FfmpegRenderer;

    #[test]
    fn test_cut_file_missing_input() {
        let result = cut_file(
            Path::new("/nonexistent/talk.mp4"),
            &CutOptions::default(),
            &FfmpegRenderer::default(),
        );
        assert!(matches!(result, Err(Error::InputNotFound { .. })));
    }

    #[test]
    fn test_removed_secs_never_negative() {
        let report = CutReport {
            intervals: 1,
            kept_secs: 10.0,
            source_secs: 9.99,
            output: PathBuf::from("out/a_cut.mp4"),
        };
        assert_eq!(report.removed_secs(), 0.0);
    }
}
