use crate::config::types::{Config, HttpConfig, SessionConfig};
use crate::{ConfigError, ConfigResult};
use url::Url;

/// Upper bound on `max-redirects`
const MAX_REDIRECT_LIMIT: usize = 20;

/// Validates the entire configuration
pub fn validate(config: &Config) -> ConfigResult<()> {
    validate_session_config(&config.session)?;
    validate_http_config(&config.http)?;
    Ok(())
}

/// Validates the seed address
///
/// The keyword is not checked: an empty keyword is legal and matches every page.
fn validate_session_config(config: &SessionConfig) -> ConfigResult<()> {
    let url = Url::parse(config.seed.trim())
        .map_err(|e| ConfigError::InvalidUrl(format!("Invalid seed '{}': {}", config.seed, e)))?;

    if url.scheme() != "http" && url.scheme() != "https" {
        return Err(ConfigError::Validation(format!(
            "Seed '{}' must use the http or https scheme",
            config.seed
        )));
    }

    if url.host_str().is_none() {
        return Err(ConfigError::InvalidUrl(format!(
            "Seed '{}' has no host",
            config.seed
        )));
    }

    Ok(())
}

/// Validates HTTP client configuration
fn validate_http_config(config: &HttpConfig) -> ConfigResult<()> {
    if config.user_agent.trim().is_empty() {
        return Err(ConfigError::Validation(
            "user_agent cannot be empty".to_string(),
        ));
    }

    if config.timeout_secs < 1 {
        return Err(ConfigError::Validation(format!(
            "timeout_secs must be >= 1, got {}",
            config.timeout_secs
        )));
    }

    if config.connect_timeout_secs < 1 || config.connect_timeout_secs > config.timeout_secs {
        return Err(ConfigError::Validation(format!(
            "connect_timeout_secs must be between 1 and timeout_secs ({}), got {}",
            config.timeout_secs, config.connect_timeout_secs
        )));
    }

    if config.max_redirects > MAX_REDIRECT_LIMIT {
        return Err(ConfigError::Validation(format!(
            "max_redirects must be <= {}, got {}",
            MAX_REDIRECT_LIMIT, config.max_redirects
        )));
    }

    Ok(())
}
