//! Configuration type definitions.

use crate::constants::analysis::DEFAULT_SAMPLE_RATE;
use crate::constants::render::{
    DEFAULT_AUDIO_BITRATE, DEFAULT_AUDIO_CODEC, DEFAULT_CRF, DEFAULT_PRESET, DEFAULT_VIDEO_CODEC,
};
use crate::constants::{
    DEFAULT_CHUNK_LENGTH, DEFAULT_MIN_CLIP, DEFAULT_OUTPUT_DIR, DEFAULT_THRESHOLD,
    DEFAULT_WINDOW_LENGTH,
};
use crate::render::RenderSettings;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Complete application configuration.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Default cut settings.
    #[serde(default)]
    pub defaults: DefaultsConfig,

    /// Encoder settings.
    #[serde(default)]
    pub render: RenderConfig,

    /// Audio analysis settings.
    #[serde(default)]
    pub analysis: AnalysisConfig,
}

/// Default cut settings, overridden by command-line flags.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DefaultsConfig {
    /// Chunk length in seconds.
    pub chunk: f64,

    /// Mask window length in seconds.
    pub window: f64,

    /// Loudness threshold.
    pub thresh: f32,

    /// Minimum kept clip length in seconds.
    pub min_clip: f64,

    /// Keep a loud run that is still open at the end of the signal.
    pub keep_tail: bool,

    /// Directory trimmed videos are written to.
    pub output_dir: PathBuf,
}

impl Default for DefaultsConfig {
    fn default() -> Self {
        Self {
            chunk: DEFAULT_CHUNK_LENGTH,
            window: DEFAULT_WINDOW_LENGTH,
            thresh: DEFAULT_THRESHOLD,
            min_clip: DEFAULT_MIN_CLIP,
            keep_tail: false,
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
        }
    }
}

/// Encoder settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Video codec.
    pub video_codec: String,

    /// Audio codec.
    pub audio_codec: String,

    /// Encoder preset.
    pub preset: String,

    /// Constant rate factor.
    pub crf: u8,

    /// Audio bitrate.
    pub audio_bitrate: String,
}

impl Default for RenderConfig {
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

impl From<&RenderConfig> for RenderSettings {
    fn from(config: &RenderConfig) -> Self {
        Self {
            video_codec: config.video_codec.clone(),
            audio_codec: config.audio_codec.clone(),
            preset: config.preset.clone(),
            crf: config.crf,
            audio_bitrate: config.audio_bitrate.clone(),
        }
    }
}

/// Audio analysis settings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AnalysisConfig {
    /// Sample rate the audio is resampled to before chunking.
    pub sample_rate: u32,
}

impl Default for AnalysisConfig {
    fn default() -> Self {
        Self {
            sample_rate: DEFAULT_SAMPLE_RATE,
        }
    }
}
