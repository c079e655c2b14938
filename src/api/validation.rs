//! Request input checks
//!
//! The discovery core accepts any string; these limits only keep obviously
//! useless requests from reaching the network.

use thiserror::Error;

use crate::config::is_country_code;

pub const MAX_DOMAIN_BYTES: usize = 2048;
pub const MAX_BUNDLE_ID_BYTES: usize = 255;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("domain is required")]
    EmptyDomain,
    #[error("domain exceeds 2048 bytes")]
    DomainTooLong,
    #[error("bundle_id is required")]
    EmptyBundleId,
    #[error("bundle_id '{0}' is malformed")]
    InvalidBundleId(String),
    #[error("country '{0}' must be a two-letter code")]
    InvalidCountry(String),
}

/// Trimmed domain input
pub fn validate_domain(input: &str) -> Result<&str, InputError> {
    let domain = input.trim();

    if domain.is_empty() {
        return Err(InputError::EmptyDomain);
    }

    if domain.len() > MAX_DOMAIN_BYTES {
        return Err(InputError::DomainTooLong);
    }

    Ok(domain)
}

pub fn validate_bundle_id(input: &str) -> Result<&str, InputError> {
    let bundle_id = input.trim();

    if bundle_id.is_empty() {
        return Err(InputError::EmptyBundleId);
    }

    if bundle_id.len() > MAX_BUNDLE_ID_BYTES || bundle_id.chars().any(char::is_whitespace) {
        return Err(InputError::InvalidBundleId(bundle_id.to_string()));
    }

    Ok(bundle_id)
}

/// Lowercased country code, falling back to `default` when none is given
pub fn resolve_country(input: Option<&str>, default: &str) -> Result<String, InputError> {
    let country = match input.map(str::trim).filter(|c| !c.is_empty()) {
        Some(country) => country,
        None => default,
    };

    if !is_country_code(country) {
        return Err(InputError::InvalidCountry(country.to_string()));
    }

    Ok(country.to_ascii_lowercase())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_domain() {
        assert_eq!(validate_domain(" example.com "), Ok("example.com"));
        assert_eq!(validate_domain("   "), Err(InputError::EmptyDomain));
        assert_eq!(
            validate_domain(&"a".repeat(MAX_DOMAIN_BYTES + 1)),
            Err(InputError::DomainTooLong)
        );
    }

    #[test]
    fn test_validate_bundle_id() {
        assert_eq!(validate_bundle_id("com.example.app"), Ok("com.example.app"));
        assert_eq!(validate_bundle_id(""), Err(InputError::EmptyBundleId));
        assert!(matches!(
            validate_bundle_id("com.example app"),
            Err(InputError::InvalidBundleId(_))
        ));
    }

    #[test]
    fn test_resolve_country() {
        assert_eq!(resolve_country(Some("GB"), "us"), Ok("gb".to_string()));
        assert_eq!(resolve_country(None, "us"), Ok("us".to_string()));
        assert_eq!(resolve_country(Some(" "), "nl"), Ok("nl".to_string()));
        assert_eq!(
            resolve_country(Some("usa"), "us"),
            Err(InputError::InvalidCountry("usa".to_string()))
        );
    }
}
