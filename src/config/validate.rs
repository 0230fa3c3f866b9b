//! Configuration validation.

use crate::config::Config;
use crate::constants::sample_rate;
use crate::error::{Error, Result};

/// Validate the entire configuration.
pub fn validate_config(config: &Config) -> Result<()> {
    validate_matching(config)?;
    validate_extraction(config)?;
    Ok(())
}

fn validate_matching(config: &Config) -> Result<()> {
    let matching = &config.matching;

    if !matching.threshold.is_finite() {
        return Err(Error::ConfigValidation {
            message: format!("threshold must be a finite number, got {}", matching.threshold),
        });
    }

    if !(sample_rate::MIN..=sample_rate::MAX).contains(&matching.sample_rate) {
        return Err(Error::ConfigValidation {
            message: format!(
                "sample_rate must be between {} and {} Hz, got {}",
                sample_rate::MIN,
                sample_rate::MAX,
                matching.sample_rate
            ),
        });
    }

    if !(matching.epsilon.is_finite() && matching.epsilon > 0.0) {
        return Err(Error::ConfigValidation {
            message: format!("epsilon must be positive, got {}", matching.epsilon),
        });
    }

    Ok(())
}

fn validate_extraction(config: &Config) -> Result<()> {
    if config.extraction.ffmpeg_path.as_os_str().is_empty() {
        return Err(Error::ConfigValidation {
            message: "ffmpeg_path must not be empty".to_string(),
        });
    }
    Ok(())
}
