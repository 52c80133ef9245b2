//! Rendering the trimmed video with ffmpeg.
//!
//! Each kept interval is extracted to a temporary file with a two-stage seek
//! (fast input seek close to the start, then a frame-accurate output seek) and
//! re-encoded. The pieces are then joined with the concat demuxer using
//! stream copy, in interval order.

mod command;
mod partial;
mod probe;

pub use command::{FfmpegCommand, check_ffmpeg};
pub use partial::{PartialOutput, cleanup_all_partials};
pub use probe::probe_duration;

use crate::constants::render::{
    DEFAULT_AUDIO_BITRATE, DEFAULT_AUDIO_CODEC, DEFAULT_CRF, DEFAULT_PRESET, DEFAULT_VIDEO_CODEC,
    FAST_SEEK_MARGIN_SECS,
};
use crate::error::{Error, Result};
use crate::selector::{ClipInterval, ProgressObserver};
use std::fmt::Write as _;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Encoder settings for extracted segments.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderSettings {
    /// Video codec passed to `-c:v`.
    pub video_codec: String,
    /// Audio codec passed to `-c:a`.
    pub audio_codec: String,
    /// Encoder preset.
    pub preset: String,
    /// Constant rate factor.
    pub crf: u8,
    /// Audio bitrate, e.g. `128k`.
    pub audio_bitrate: String,
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            video_codec: DEFAULT_VIDEO_CODEC.to_string(),
            audio_codec: DEFAULT_AUDIO_CODEC.to_string(),
            preset: DEFAULT_PRESET.to_string(),
            crf: DEFAULT_CRF,
            audio_bitrate: DEFAULT_AUDIO_BITRATE.to_string(),
        }
    }
}

/// Produces a video containing only the given intervals of a source.
pub trait Renderer {
    /// Render `intervals` of `source` into `output`, in order.
    ///
    /// `progress` receives one update per finished segment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::NothingToRender`] if `intervals` is empty, or an
    /// encoder error. No file is left at `output` on failure.
    fn render(
        &self,
        source: &Path,
        intervals: &[ClipInterval],
        output: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<()>;
}

/// Renderer backed by the ffmpeg command-line tool.
#[derive(Debug, Clone, Default)]
pub struct FfmpegRenderer {
    settings: RenderSettings,
}

impl FfmpegRenderer {
    /// Create a renderer with the given encoder settings.
    #[must_use]
    pub fn new(settings: RenderSettings) -> Self {
        Self { settings }
    }

    /// Command extracting one interval into `segment_path`.
    fn segment_command(
        &self,
        source: &Path,
        interval: &ClipInterval,
        segment_path: &Path,
    ) -> FfmpegCommand {
        let (fast_seek, accurate_seek) = split_seek(interval.start);
        FfmpegCommand::new(source, segment_path)
            .seek(fast_seek)
            .output_seek(accurate_seek)
            .duration(interval.duration())
            .video_codec(&self.settings.video_codec)
            .preset(&self.settings.preset)
            .crf(self.settings.crf)
            .audio_codec(&self.settings.audio_codec)
            .audio_bitrate(&self.settings.audio_bitrate)
            .output_args(["-avoid_negative_ts", "make_zero"])
    }
}

impl Renderer for FfmpegRenderer {
    fn render(
        &self,
        source: &Path,
        intervals: &[ClipInterval],
        output: &Path,
        progress: &mut dyn ProgressObserver,
    ) -> Result<()> {
        if intervals.is_empty() {
            return Err(Error::NothingToRender);
        }
        check_ffmpeg()?;

        info!(
            segments = intervals.len(),
            output = %output.display(),
            "Rendering trimmed video"
        );

        let temp_dir = tempfile::tempdir()?;
        let mut segment_paths = Vec::with_capacity(intervals.len());

        for (i, interval) in intervals.iter().enumerate() {
            let segment_path = temp_dir.path().join(format!("seg_{i:05}.mp4"));
            debug!(
                segment = i,
                start = interval.start,
                end = interval.end,
                "Extracting segment"
            );
            self.segment_command(source, interval, &segment_path)
                .run(&format!("segment {i} extraction"))?;
            segment_paths.push(segment_path);
            progress.on_progress(i + 1, Some(intervals.len()));
        }

        let concat_list = temp_dir.path().join("concat.txt");
        fs::write(&concat_list, concat_list_content(&segment_paths))?;

        let partial = PartialOutput::new(output)?;
        FfmpegCommand::new(&concat_list, partial.path())
            .concat_input()
            .stream_copy()
            .output_args(["-movflags", "+faststart"])
            .run("concat")?;
        partial.commit()?;

        progress.on_finish(intervals.len());
        info!(segments = intervals.len(), "Render complete");
        Ok(())
    }
}

/// Split a start time into a fast input seek and the remaining accurate seek.
fn split_seek(start: f64) -> (f64, f64) {
    let fast = (start - FAST_SEEK_MARGIN_SECS).max(0.0);
    (fast, start - fast)
}

/// Concat demuxer list for the given segment files.
fn concat_list_content(paths: &[PathBuf]) -> String {
    paths.iter().fold(String::new(), |mut list, path| {
        let escaped = path.to_string_lossy().replace('\'', r"'\''");
        let _ = writeln!(list, "file '{escaped}'");
        list
    })
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::float_cmp)]
mod tests {
    use super::*;
    use crate::selector::NoProgress;

    #[test]
    fn test_split_seek_near_start() {
        assert_eq!(split_seek(3.0), (0.0, 3.0));
    }

    #[test]
    fn test_split_seek_far_into_file() {
        assert_eq!(split_seek(65.0), (60.0, 5.0));
    }

    #[test]
    fn test_concat_list_escapes_quotes() {
        let paths = vec![
            PathBuf::from("/tmp/seg_00000.mp4"),
            PathBuf::from("/tmp/it's/seg_00001.mp4"),
        ];
        let list = concat_list_content(&paths);
        assert_eq!(
            list,
            "file '/tmp/seg_00000.mp4'\nfile '/tmp/it'\\''s/seg_00001.mp4'\n"
        );
    }

    #[test]
    fn test_segment_command_uses_settings() {
        let renderer = FfmpegRenderer::new(RenderSettings {
            crf: 28,
            preset: "slow".to_string(),
            ..RenderSettings::default()
        });
        let interval = ClipInterval {
            start: 12.0,
            end: 14.5,
        };
        let args: Vec<String> = renderer
            .segment_command(Path::new("in.mkv"), &interval, Path::new("seg.mp4"))
            .build_args()
            .iter()
            .map(|a| a.to_string_lossy().into_owned())
            .collect();
        let joined = args.join(" ");

        assert!(joined.contains("-ss 7.000 -i in.mkv -ss 5.000 -t 2.500"));
        assert!(joined.contains("-crf 28"));
        assert!(joined.contains("-preset slow"));
        assert!(joined.contains("-c:v libx264"));
        assert!(joined.ends_with("-avoid_negative_ts make_zero seg.mp4"));
    }

    #[test]
    fn test_render_rejects_empty_intervals() {
        let renderer = FfmpegRenderer::default();
        let result = renderer.render(
            Path::new("in.mkv"),
            &[],
            Path::new("out.mp4"),
            &mut NoProgress,
        );
        assert!(matches!(result, Err(Error::NothingToRender)));
    }
}
