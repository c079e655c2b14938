use super::models::Config;
use reqwest::header::HeaderValue;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("{field} must be greater than zero")]
    ZeroValue { field: &'static str },

    #[error("{field} is not a valid header value: {value:?}")]
    InvalidHeaderValue { field: &'static str, value: String },

    #[error("app_store.lookup_url must be an http(s) URL, got '{0}'")]
    InvalidLookupUrl(String),

    #[error("app_store.default_country must be a two-letter country code, got '{0}'")]
    InvalidCountry(String),
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_probe(config)?;
    validate_app_store(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    if config.server.max_concurrent_checks == 0 {
        return Err(ValidationError::ZeroValue {
            field: "server.max_concurrent_checks",
        });
    }
    Ok(())
}

fn validate_probe(config: &Config) -> Result<(), ValidationError> {
    let probe = &config.probe;

    if probe.timeout_ms == 0 {
        return Err(ValidationError::ZeroValue {
            field: "probe.timeout_ms",
        });
    }

    if probe.max_logged_body_chars == 0 {
        return Err(ValidationError::ZeroValue {
            field: "probe.max_logged_body_chars",
        });
    }

    if probe.user_agent.trim().is_empty() || HeaderValue::from_str(&probe.user_agent).is_err() {
        return Err(ValidationError::InvalidHeaderValue {
            field: "probe.user_agent",
            value: probe.user_agent.clone(),
        });
    }

    if HeaderValue::from_str(&probe.accept).is_err() {
        return Err(ValidationError::InvalidHeaderValue {
            field: "probe.accept",
            value: probe.accept.clone(),
        });
    }

    Ok(())
}

fn validate_app_store(config: &Config) -> Result<(), ValidationError> {
    let app_store = &config.app_store;

    if app_store.timeout_ms == 0 {
        return Err(ValidationError::ZeroValue {
            field: "app_store.timeout_ms",
        });
    }

    let url = &app_store.lookup_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidLookupUrl(url.clone()));
    }

    if !is_country_code(&app_store.default_country) {
        return Err(ValidationError::InvalidCountry(
            app_store.default_country.clone(),
        ));
    }

    Ok(())
}

/// Two ASCII letters, any case
pub fn is_country_code(code: &str) -> bool {
    code.len() == 2 && code.chars().all(|c| c.is_ascii_alphabetic())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config_is_valid() {
        assert!(validate(&Config::default()).is_ok());
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let mut config = Config::default();
        config.probe.timeout_ms = 0;

        let err = validate(&config).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::ZeroValue {
                field: "probe.timeout_ms"
            }
        ));
    }

    #[test]
    fn test_rejects_zero_concurrency() {
        let mut config = Config::default();
        config.server.max_concurrent_checks = 0;
        assert!(matches!(
            validate(&config),
            Err(ValidationError::ZeroValue { .. })
        ));
    }

    #[test]
    fn test_rejects_empty_user_agent() {
        let mut config = Config::default();
        config.probe.user_agent = "  ".to_string();

        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidHeaderValue {
                field: "probe.user_agent",
                ..
            })
        ));
    }

    #[test]
    fn test_rejects_bad_lookup_url() {
        let mut config = Config::default();
        config.app_store.lookup_url = "itunes.apple.com/lookup".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidLookupUrl(_))
        ));
    }

    #[test]
    fn test_rejects_bad_country() {
        let mut config = Config::default();
        config.app_store.default_country = "usa".to_string();
        assert!(matches!(
            validate(&config),
            Err(ValidationError::InvalidCountry(_))
        ));
    }

    #[test]
    fn test_is_country_code() {
        assert!(is_country_code("us"));
        assert!(is_country_code("GB"));
        assert!(!is_country_code("u"));
        assert!(!is_country_code("u1"));
        assert!(!is_country_code(""));
    }
}
