//! FFprobe container information.

use serde::Deserialize;
use std::path::Path;
use std::process::{Command, Stdio};

use crate::error::{Error, Result};

#[derive(Debug, Deserialize)]
struct FfprobeOutput {
    format: FfprobeFormat,
}

#[derive(Debug, Deserialize)]
struct FfprobeFormat {
    duration: Option<String>,
}

/// Container duration in seconds as reported by ffprobe.
///
/// Returns `Ok(None)` when ffprobe is not installed or the container does not
/// declare a duration.
pub fn probe_duration(path: &Path) -> Result<Option<f64>> {
    if which::which("ffprobe").is_err() {
        return Ok(None);
    }

    let output = Command::new("ffprobe")
        .args(["-v", "quiet", "-print_format", "json", "-show_format"])
        .arg(path)
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .output()
        .map_err(|e| Error::FfmpegFailed {
            step: "ffprobe".to_string(),
            message: e.to_string(),
        })?;

    if !output.status.success() {
        return Err(Error::FfmpegFailed {
            step: "ffprobe".to_string(),
            message: super::command::last_line(&output.stderr, output.status.code()),
        });
    }

    parse_duration(&output.stdout)
}

fn parse_duration(json: &[u8]) -> Result<Option<f64>> {
    let probe: FfprobeOutput = serde_json::from_slice(json).map_err(|e| Error::FfmpegFailed {
        step: "ffprobe".to_string(),
        message: format!("unexpected output: {e}"),
    })?;

    Ok(probe
        .format
        .duration
        .as_deref()
        .and_then(|d| d.parse::<f64>().ok())
        .filter(|d| d.is_finite() && *d >= 0.0))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_duration() {
        let json = br#"{"format": {"filename": "a.mkv", "duration": "12.480000"}}"#;
        let duration = parse_duration(json).unwrap().unwrap();
        assert!((duration - 12.48).abs() < 1e-9);
    }

    #[test]
    fn test_parse_duration_missing() {
        let json = br#"{"format": {"filename": "a.mkv"}}"#;
        assert_eq!(parse_duration(json).unwrap(), None);
    }

    #[test]
    fn test_parse_duration_invalid_json() {
        assert!(parse_duration(b"not json").is_err());
    }
}
