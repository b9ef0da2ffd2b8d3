use crate::config::types::{CollisionPolicy, Config, DownloadConfig, FetchConfig, OutputConfig};
use crate::ConfigError;

/// Upper bound for `download.concurrency`
pub const MAX_CONCURRENCY: usize = 32;

/// Validates the entire configuration
pub fn validate(config: &Config) -> Result<(), ConfigError> {
    validate_fetch_config(&config.fetch)?;
    validate_download_config(&config.download)?;
    validate_output_config(&config.output)?;
    Ok(())
}

/// Validates HTTP configuration
fn validate_fetch_config(config: &FetchConfig) -> Result<(), ConfigError> {
    for (name, value) in [
        ("page-timeout-secs", config.page_timeout_secs),
        ("resource-timeout-secs", config.resource_timeout_secs),
        ("connect-timeout-secs", config.connect_timeout_secs),
    ] {
        if value < 1 {
            return Err(ConfigError::Validation(format!(
                "{} must be >= 1, got {}",
                name, value
            )));
        }
    }

    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user-agent cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// Validates download configuration
fn validate_download_config(config: &DownloadConfig) -> Result<(), ConfigError> {
    if config.concurrency < 1 || config.concurrency > MAX_CONCURRENCY {
        return Err(ConfigError::Validation(format!(
            "concurrency must be between 1 and {}, got {}",
            MAX_CONCURRENCY, config.concurrency
        )));
    }

    // Last write must follow document order, which only one worker guarantees
    if config.on_collision == CollisionPolicy::Overwrite && config.concurrency > 1 {
        return Err(ConfigError::Validation(format!(
            "on-collision = \"overwrite\" requires concurrency = 1, got {}",
            config.concurrency
        )));
    }

    for ext in &config.document_extensions {
        validate_extension(ext)?;
    }

    Ok(())
}

/// Validates output configuration
fn validate_output_config(config: &OutputConfig) -> Result<(), ConfigError> {
    if config.root.is_empty() {
        return Err(ConfigError::Validation(
            "output root cannot be empty".to_string(),
        ));
    }

    Ok(())
}

/// A document extension must look like `.pdf`
fn validate_extension(ext: &str) -> Result<(), ConfigError> {
    match ext.strip_prefix('.') {
        Some(rest) if !rest.is_empty() && !rest.contains(['/', '.']) => Ok(()),
        _ => Err(ConfigError::Validation(format!(
            "document extension '{}' must be a single suffix like '.pdf'",
            ext
        ))),
    }
}
