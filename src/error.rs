//! Error types for ezcut.

use std::fmt;
use std::path::PathBuf;

/// Result type alias for ezcut operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Processing stage an error belongs to.
///
/// Used to tell the user which part of a run failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Argument, parameter or configuration handling.
    Config,
    /// Opening and decoding the source audio.
    Decode,
    /// Loudness extraction and segment selection.
    Analysis,
    /// Rendering the trimmed video, the preview plot or the export.
    Encode,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config => write!(f, "config"),
            Self::Decode => write!(f, "decode"),
            Self::Analysis => write!(f, "analysis"),
            Self::Encode => write!(f, "encode"),
        }
    }
}

/// Top-level error type for ezcut.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// I/O operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Configuration directory could not be determined.
    #[error("could not determine configuration directory for this platform")]
    ConfigDirNotFound,

    /// Failed to read configuration file.
    #[error("failed to read config file '{path}'")]
    ConfigRead {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}'")]
    ConfigParse {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying parse error.
        #[source]
        source: toml::de::Error,
    },

    /// Failed to write configuration file.
    #[error("failed to write config file '{path}'")]
    ConfigWrite {
        /// Path to the config file.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to serialize configuration.
    #[error("failed to serialize config")]
    ConfigSerialize {
        /// Underlying serialization error.
        #[source]
        source: toml::ser::Error,
    },

    /// Configuration validation failed.
    #[error("configuration validation failed: {message}")]
    ConfigValidation {
        /// Description of the validation failure.
        message: String,
    },

    /// A cut parameter violates its constraint.
    #[error("invalid parameter {name} = {value}: {reason}")]
    InvalidParameter {
        /// Parameter name as shown on the command line.
        name: &'static str,
        /// Offending value.
        value: f64,
        /// Constraint that was violated.
        reason: &'static str,
    },

    /// Input file does not exist.
    #[error("input file does not exist: {path}")]
    InputNotFound {
        /// Path to the missing input.
        path: PathBuf,
    },

    /// Failed to open the source media file.
    #[error("failed to open media file '{path}'")]
    AudioOpen {
        /// Path to the media file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// Failed to decode audio.
    #[error("failed to decode audio from '{path}'")]
    AudioDecode {
        /// Path to the media file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    /// No audio tracks found.
    #[error("no audio tracks found in '{path}'")]
    NoAudioTracks {
        /// Path to the media file.
        path: PathBuf,
    },

    /// Failed to resample audio.
    #[error("failed to resample audio: {reason}")]
    Resample {
        /// Description of the resampling failure.
        reason: String,
    },

    /// The audio source produced no chunks.
    #[error("audio signal is empty, nothing to analyze")]
    EmptySignal,

    /// Selection produced no intervals, so there is nothing to render.
    #[error("no segment is loud and long enough to keep (try lowering --thresh or --min_clip)")]
    NothingToRender,

    /// The ffmpeg executable was not found on PATH.
    #[error("ffmpeg not found on PATH")]
    FfmpegNotFound,

    /// An ffmpeg or ffprobe invocation failed.
    #[error("{step} failed: {message}")]
    FfmpegFailed {
        /// Which step was running (e.g. "segment 3 extraction", "concat").
        step: String,
        /// Last line of ffmpeg's stderr, or the spawn error.
        message: String,
    },

    /// Output file exists and overwriting was not requested.
    #[error("output file already exists: {path} (use --force to overwrite)")]
    OutputExists {
        /// Path to the existing output.
        path: PathBuf,
    },

    /// Failed to create output directory.
    #[error("failed to create output directory '{path}'")]
    OutputDirCreateFailed {
        /// Path to the output directory.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// Failed to render the preview plot.
    #[error("failed to render preview plot: {reason}")]
    Plot {
        /// Description of the drawing failure.
        reason: String,
    },

    /// Failed to write the interval export as CSV.
    #[error("failed to write CSV export '{path}'")]
    CsvWrite {
        /// Path to the CSV file.
        path: PathBuf,
        /// Underlying error.
        #[source]
        source: csv::Error,
    },

    /// Failed to write the interval export as JSON.
    #[error("failed to write JSON export '{path}'")]
    JsonWrite {
        /// Path to the JSON file.
        path: PathBuf,
        /// Underlying serialization error.
        #[source]
        source: serde_json::Error,
    },
}

impl Error {
    /// Stage of the run this error belongs to.
    #[must_use]
    pub fn stage(&self) -> Stage {
        match self {
            Self::ConfigDirNotFound
            | Self::ConfigRead { .. }
            | Self::ConfigParse { .. }
            | Self::ConfigWrite { .. }
            | Self::ConfigSerialize { .. }
            | Self::ConfigValidation { .. }
            | Self::InvalidParameter { .. }
            | Self::InputNotFound { .. } => Stage::Config,
            Self::AudioOpen { .. }
            | Self::AudioDecode { .. }
            | Self::NoAudioTracks { .. }
            | Self::Resample { .. } => Stage::Decode,
            Self::EmptySignal => Stage::Analysis,
            Self::Io(_)
            | Self::NothingToRender
            | Self::FfmpegNotFound
            | Self::FfmpegFailed { .. }
            | Self::OutputExists { .. }
            | Self::OutputDirCreateFailed { .. }
            | Self::Plot { .. }
            | Self::CsvWrite { .. }
            | Self::JsonWrite { .. } => Stage::Encode,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_stage_mapping() {
        assert_eq!(Error::EmptySignal.stage(), Stage::Analysis);
        assert_eq!(Error::FfmpegNotFound.stage(), Stage::Encode);
        assert_eq!(
            Error::NoAudioTracks {
                path: PathBuf::from("a.mkv")
            }
            .stage(),
            Stage::Decode
        );
        assert_eq!(
            Error::InvalidParameter {
                name: "chunk",
                value: 0.0,
                reason: "must be greater than 0"
            }
            .stage(),
            Stage::Config
        );
    }

    #[test]
    fn test_invalid_parameter_message_names_value() {
        let err = Error::InvalidParameter {
            name: "chunk",
            value: -0.5,
            reason: "must be greater than 0",
        };
        assert_eq!(
            err.to_string(),
            "invalid parameter chunk = -0.5: must be greater than 0"
        );
    }
}
