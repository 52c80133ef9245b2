//! FFmpeg command builder and runner.

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};
use tracing::debug;

use crate::error::{Error, Result};

/// ffmpeg only reports errors; the last stderr line becomes the message.
const LOG_LEVEL: &str = "error";

/// Builder for a single ffmpeg invocation.
#[derive(Debug, Clone)]
pub struct FfmpegCommand {
    /// Input file path
    input: PathBuf,
    /// Output file path
    output: PathBuf,
    /// Input arguments (before -i)
    input_args: Vec<String>,
    /// Output arguments (after -i)
    output_args: Vec<String>,
    /// Whether to overwrite output
    overwrite: bool,
}

impl FfmpegCommand {
    /// Create a new FFmpeg command.
    pub fn new(input: impl AsRef<Path>, output: impl AsRef<Path>) -> Self {
        Self {
            input: input.as_ref().to_path_buf(),
            output: output.as_ref().to_path_buf(),
            input_args: Vec::new(),
            output_args: Vec::new(),
            overwrite: true,
        }
    }

    /// Add an input argument (before -i).
    #[must_use]
    pub fn input_arg(mut self, arg: impl Into<String>) -> Self {
        self.input_args.push(arg.into());
        self
    }

    /// Add an output argument (after -i).
    #[must_use]
    pub fn output_arg(mut self, arg: impl Into<String>) -> Self {
        self.output_args.push(arg.into());
        self
    }

    /// Add multiple output arguments.
    #[must_use]
    pub fn output_args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.output_args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Fast seek on the input (lands on a keyframe).
    #[must_use]
    pub fn seek(self, seconds: f64) -> Self {
        self.input_arg("-ss").input_arg(format!("{seconds:.3}"))
    }

    /// Frame-accurate seek after decoding starts.
    #[must_use]
    pub fn output_seek(self, seconds: f64) -> Self {
        self.output_arg("-ss").output_arg(format!("{seconds:.3}"))
    }

    /// Limit the output duration.
    #[must_use]
    pub fn duration(self, seconds: f64) -> Self {
        self.output_arg("-t").output_arg(format!("{seconds:.3}"))
    }

    /// Read the input as an ffconcat list.
    #[must_use]
    pub fn concat_input(self) -> Self {
        self.input_arg("-f")
            .input_arg("concat")
            .input_arg("-safe")
            .input_arg("0")
    }

    /// Set video codec.
    #[must_use]
    pub fn video_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:v").output_arg(codec)
    }

    /// Set audio codec.
    #[must_use]
    pub fn audio_codec(self, codec: impl Into<String>) -> Self {
        self.output_arg("-c:a").output_arg(codec)
    }

    /// Set CRF (quality).
    #[must_use]
    pub fn crf(self, crf: u8) -> Self {
        self.output_arg("-crf").output_arg(crf.to_string())
    }

    /// Set preset.
    #[must_use]
    pub fn preset(self, preset: impl Into<String>) -> Self {
        self.output_arg("-preset").output_arg(preset)
    }

    /// Set audio bitrate.
    #[must_use]
    pub fn audio_bitrate(self, bitrate: impl Into<String>) -> Self {
        self.output_arg("-b:a").output_arg(bitrate)
    }

    /// Copy all streams without re-encoding.
    #[must_use]
    pub fn stream_copy(self) -> Self {
        self.output_arg("-c").output_arg("copy")
    }

    /// Build the command arguments.
    #[must_use]
    pub fn build_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = Vec::new();

        if self.overwrite {
            args.push("-y".into());
        }
        args.push("-hide_banner".into());
        args.push("-loglevel".into());
        args.push(LOG_LEVEL.into());

        args.extend(self.input_args.iter().map(OsString::from));
        args.push("-i".into());
        args.push(self.input.clone().into_os_string());

        args.extend(self.output_args.iter().map(OsString::from));
        args.push(self.output.clone().into_os_string());

        args
    }

    /// Run the command to completion.
    ///
    /// `step` names the operation in the error if ffmpeg fails.
    pub fn run(&self, step: &str) -> Result<()> {
        let args = self.build_args();
        debug!(
            "Running: ffmpeg {}",
            args.iter()
                .map(|a| a.to_string_lossy())
                .collect::<Vec<_>>()
                .join(" ")
        );

        let output = Command::new("ffmpeg")
            .args(&args)
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped())
            .output()
            .map_err(|e| Error::FfmpegFailed {
                step: step.to_string(),
                message: e.to_string(),
            })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(Error::FfmpegFailed {
                step: step.to_string(),
                message: last_line(&output.stderr, output.status.code()),
            })
        }
    }
}

/// Last non-empty stderr line, or the exit status when stderr is empty.
pub(crate) fn last_line(stderr: &[u8], code: Option<i32>) -> String {
    String::from_utf8_lossy(stderr)
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .map_or_else(
            || match code {
                Some(code) => format!("exited with status {code}"),
                None => "terminated by signal".to_string(),
            },
            |l| l.trim().to_string(),
        )
}

/// Check if FFmpeg is available.
pub fn check_ffmpeg() -> Result<PathBuf> {
    which::which("ffmpeg").map_err(|_| Error::FfmpegNotFound)
}
