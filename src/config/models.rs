use serde::{Deserialize, Serialize};
use std::net::SocketAddr;

/// Top-level configuration
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub probe: ProbeSettings,
    #[serde(default)]
    pub app_store: AppStoreSettings,
}

/// HTTP API configuration
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_bind_addr")]
    pub bind_addr: SocketAddr,
    /// Domain checks allowed to run at once; extra requests wait
    #[serde(default = "default_max_concurrent_checks")]
    pub max_concurrent_checks: usize,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_addr: default_bind_addr(),
            max_concurrent_checks: default_max_concurrent_checks(),
        }
    }
}

fn default_bind_addr() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 8080))
}

fn default_max_concurrent_checks() -> usize {
    64
}

/// Manifest probe settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ProbeSettings {
    /// Ceiling for one fetch attempt, body included
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    #[serde(default = "default_max_redirects")]
    pub max_redirects: usize,
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
    #[serde(default = "default_accept")]
    pub accept: String,
    /// Response bodies are cut to this many characters in request logs
    #[serde(default = "default_max_logged_body_chars")]
    pub max_logged_body_chars: usize,
}

impl Default for ProbeSettings {
    fn default() -> Self {
        Self {
            timeout_ms: default_timeout_ms(),
            max_redirects: default_max_redirects(),
            user_agent: default_user_agent(),
            accept: default_accept(),
            max_logged_body_chars: default_max_logged_body_chars(),
        }
    }
}

fn default_timeout_ms() -> u64 {
    10_000
}

fn default_max_redirects() -> usize {
    10
}

fn default_user_agent() -> String {
    "AppLinkExplorer/1.0".to_string()
}

fn default_accept() -> String {
    "application/json, application/octet-stream, */*".to_string()
}

fn default_max_logged_body_chars() -> usize {
    1000
}

/// App Store lookup settings
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct AppStoreSettings {
    #[serde(default = "default_lookup_url")]
    pub lookup_url: String,
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,
    /// Two-letter storefront used when a request names none
    #[serde(default = "default_country")]
    pub default_country: String,
}

impl Default for AppStoreSettings {
    fn default() -> Self {
        Self {
            lookup_url: default_lookup_url(),
            timeout_ms: default_timeout_ms(),
            default_country: default_country(),
        }
    }
}

fn default_lookup_url() -> String {
    "https://itunes.apple.com/lookup".to_string()
}

fn default_country() -> String {
    "us".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();

        assert_eq!(config.server.bind_addr.to_string(), "0.0.0.0:8080");
        assert_eq!(config.server.max_concurrent_checks, 64);
        assert_eq!(config.probe.timeout_ms, 10_000);
        assert_eq!(config.probe.user_agent, "AppLinkExplorer/1.0");
        assert_eq!(config.probe.max_logged_body_chars, 1000);
        assert_eq!(config.app_store.lookup_url, "https://itunes.apple.com/lookup");
        assert_eq!(config.app_store.default_country, "us");
    }

    #[test]
    fn test_partial_sections_fill_defaults() {
        let config: Config = toml::from_str(
            r#"
[probe]
timeout_ms = 2500
            "#,
        )
        .unwrap();

        assert_eq!(config.probe.timeout_ms, 2500);
        assert_eq!(config.probe.max_redirects, 10);
        assert_eq!(config.app_store.timeout_ms, 10_000);
    }
}
