//! CLI argument validators.

use crate::constants::sample_rate;

/// Parse an acceptance threshold. Any finite number is allowed.
pub fn parse_threshold(s: &str) -> Result<f64, String> {
    let value: f64 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid number"))?;

    if !value.is_finite() {
        return Err(format!("threshold must be finite, got {value}"));
    }

    Ok(value)
}

/// Parse an analysis sample rate within the supported range.
pub fn parse_sample_rate(s: &str) -> Result<u32, String> {
    let value: u32 = s
        .parse()
        .map_err(|_| format!("'{s}' is not a valid sample rate"))?;

    if !(sample_rate::MIN..=sample_rate::MAX).contains(&value) {
        return Err(format!(
            "sample rate must be between {} and {} Hz, got {value}",
            sample_rate::MIN,
            sample_rate::MAX
        ));
    }

    Ok(value)
}
