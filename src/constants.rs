//! Application-wide constants.
//!
//! All magic numbers and strings are defined here to ensure consistency
//! and make changes easy to track.

/// Application name used for config directories and user-facing messages.
pub const APP_NAME: &str = "ezcut";

/// Configuration file name inside the config directory.
pub const CONFIG_FILE_NAME: &str = "config.toml";

/// Default chunk length in seconds.
pub const DEFAULT_CHUNK_LENGTH: f64 = 0.01;

/// Default mask window length in seconds.
pub const DEFAULT_WINDOW_LENGTH: f64 = 0.5;

/// Default loudness threshold (RMS amplitude, full scale = 1.0).
pub const DEFAULT_THRESHOLD: f32 = 0.003;

/// Default minimum length of a kept clip in seconds.
pub const DEFAULT_MIN_CLIP: f64 = 1.5;

/// Default output directory, relative to the working directory.
pub const DEFAULT_OUTPUT_DIR: &str = "out";

/// Suffix appended to the input stem to form the output file name.
pub const OUTPUT_SUFFIX: &str = "_cut.mp4";

/// Suffix appended to the input stem to form the preview plot file name.
pub const PREVIEW_SUFFIX: &str = "_preview.svg";

/// Extension used for the partially written output before it is renamed.
pub const PARTIAL_EXTENSION: &str = "part.mp4";

/// Audio analysis constants.
pub mod analysis {
    /// Default sample rate the audio is resampled to before chunking.
    pub const DEFAULT_SAMPLE_RATE: u32 = 44_100;

    /// Lowest accepted analysis sample rate.
    pub const MIN_SAMPLE_RATE: u32 = 8_000;

    /// Highest accepted analysis sample rate.
    pub const MAX_SAMPLE_RATE: u32 = 192_000;

    /// Relative distance from an integer below which `window / chunk` is
    /// taken to be that integer before flooring.
    ///
    /// Keeps quotients such as `0.3 / 0.1 = 2.9999999999999996` from
    /// losing a whole chunk.
    pub const WINDOW_RATIO_TOLERANCE: f64 = 1e-12;
}

/// Rendering constants.
pub mod render {
    /// Default video codec for the trimmed output.
    pub const DEFAULT_VIDEO_CODEC: &str = "libx264";

    /// Default audio codec for the trimmed output.
    pub const DEFAULT_AUDIO_CODEC: &str = "aac";

    /// Default x264 preset.
    pub const DEFAULT_PRESET: &str = "veryfast";

    /// Default constant rate factor.
    pub const DEFAULT_CRF: u8 = 20;

    /// Highest CRF accepted by x264.
    pub const MAX_CRF: u8 = 51;

    /// Default audio bitrate.
    pub const DEFAULT_AUDIO_BITRATE: &str = "128k";

    /// Seconds before a segment start where the fast input seek lands.
    /// The remainder is covered by an accurate output seek.
    pub const FAST_SEEK_MARGIN_SECS: f64 = 5.0;
}

/// Preview plot constants.
pub mod plot {
    /// Width of the preview image in pixels.
    pub const WIDTH: u32 = 1600;

    /// Height of the preview image in pixels.
    pub const HEIGHT: u32 = 600;

    /// Vertical offset of interval labels relative to the marker line.
    pub const LABEL_OFFSET: f32 = 1.015;
}
