//! CLI argument validators.
//!
//! Shared validation functions for CLI argument parsing.

/// Parse a finite number.
fn parse_finite(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("'{s}' is not a finite number"));
    }

    Ok(value)
}

/// Parse a duration in seconds that must be strictly positive.
pub fn parse_positive_seconds(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if value <= 0.0 {
        return Err(format!("must be greater than 0, got {value}"));
    }
    Ok(value)
}

/// Parse a duration in seconds that may be zero.
pub fn parse_non_negative_seconds(s: &str) -> Result<f64, String> {
    let value = parse_finite(s)?;
    if value < 0.0 {
        return Err(format!("must not be negative, got {value}"));
    }
    Ok(value)
}

/// Parse a loudness threshold (non-negative RMS amplitude).
#[allow(clippy::cast_possible_truncation)]
pub fn parse_threshold(s: &str) -> Result<f32, String> {
    let value = parse_non_negative_seconds(s)?;
    Ok(value as f32)
}
