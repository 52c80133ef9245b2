//! Configuration validation.

use crate::config::Config;
use crate::constants::analysis::{MAX_SAMPLE_RATE, MIN_SAMPLE_RATE};
use crate::constants::render::MAX_CRF;
use crate::error::{Error, Result};
use crate::selector::Parameters;

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_defaults(config)?;
    validate_render(config)?;
    validate_analysis(config)?;
    Ok(())
}

/// Validate default cut settings.
fn validate_defaults(config: &Config) -> Result<()> {
    let defaults = &config.defaults;
    Parameters::new(
        defaults.chunk,
        defaults.window,
        defaults.thresh,
        defaults.min_clip,
    )
    .map_err(|e| Error::ConfigValidation {
        message: format!("[defaults] {e}"),
    })?;

    if defaults.output_dir.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "output_dir must not be empty".to_string(),
        });
    }

    Ok(())
}

/// Validate encoder settings.
fn validate_render(config: &Config) -> Result<()> {
    let render = &config.render;

    if render.crf > MAX_CRF {
        return Err(Error::ConfigValidation {
            message: format!("crf must be between 0 and {MAX_CRF}, got {}", render.crf),
        });
    }

    for (name, value) in [
        ("video_codec", &render.video_codec),
        ("audio_codec", &render.audio_codec),
        ("preset", &render.preset),
        ("audio_bitrate", &render.audio_bitrate),
    ] {
        if value.trim().is_empty() {
            return Err(Error::ConfigValidation {
                message: format!("{name} must not be empty"),
            });
        }
    }

    Ok(())
}

/// Validate analysis settings.
fn validate_analysis(config: &Config) -> Result<()> {
    let rate = config.analysis.sample_rate;
    if !(MIN_SAMPLE_RATE..=MAX_SAMPLE_RATE).contains(&rate) {
        return Err(Error::ConfigValidation {
            message: format!(
                "sample_rate must be between {MIN_SAMPLE_RATE} and {MAX_SAMPLE_RATE}, got {rate}"
            ),
        });
    }
    Ok(())
}
