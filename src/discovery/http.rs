//! HTTP client for probing manifest URLs

use reqwest::header::{ACCEPT, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Client, StatusCode, redirect};
use serde_json::Value;
use std::time::{Duration, Instant};
use thiserror::Error;
use tracing::debug;

use super::models::{FailureReason, HeadersMap, RequestLog};
use crate::config::ProbeSettings;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";

#[derive(Debug, Error)]
pub enum ProbeError {
    #[error("Invalid {name} header value: {value}")]
    InvalidHeader { name: &'static str, value: String },

    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(String),
}

pub type Result<T> = std::result::Result<T, ProbeError>;

/// Probe client configuration
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    pub request_timeout: Duration,
    pub max_redirects: usize,
    pub user_agent: String,
    pub accept: String,
    pub max_logged_body_chars: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            request_timeout: Duration::from_secs(10),
            max_redirects: 10,
            user_agent: "AppLinkExplorer/1.0".to_string(),
            accept: "application/json, application/octet-stream, */*".to_string(),
            max_logged_body_chars: 1000,
        }
    }
}

impl From<&ProbeSettings> for ProbeConfig {
    fn from(settings: &ProbeSettings) -> Self {
        Self {
            request_timeout: Duration::from_millis(settings.timeout_ms),
            max_redirects: settings.max_redirects,
            user_agent: settings.user_agent.clone(),
            accept: settings.accept.clone(),
            max_logged_body_chars: settings.max_logged_body_chars,
        }
    }
}

/// Result of one attempt: the log entry, plus the document when the attempt
/// met the success contract (2xx and a JSON body)
#[derive(Debug, Clone)]
pub struct ProbeOutcome {
    pub log: RequestLog,
    pub document: Option<Value>,
}

impl ProbeOutcome {
    pub fn succeeded(&self) -> bool {
        self.log.success
    }

    fn failed(log: RequestLog) -> Self {
        Self { log, document: None }
    }
}

/// Manifest prober. Cloning shares the underlying connection pool.
#[derive(Debug, Clone)]
pub struct ProbeClient {
    client: Client,
    config: ProbeConfig,
}

impl ProbeClient {
    pub fn new(config: ProbeConfig) -> Result<Self> {
        let accept = HeaderValue::from_str(&config.accept).map_err(|_| ProbeError::InvalidHeader {
            name: "Accept",
            value: config.accept.clone(),
        })?;

        let mut default_headers = HeaderMap::new();
        default_headers.insert(ACCEPT, accept);

        let client = Client::builder()
            .timeout(config.request_timeout)
            .user_agent(&config.user_agent)
            .default_headers(default_headers)
            .redirect(redirect::Policy::limited(config.max_redirects))
            .build()
            .map_err(|e| ProbeError::ClientBuild(e.to_string()))?;

        Ok(Self { client, config })
    }

    pub fn config(&self) -> &ProbeConfig {
        &self.config
    }

    /// Fetch `url` once and try to read it as JSON.
    ///
    /// Never fails: transport errors, timeouts, non-2xx statuses and non-JSON
    /// bodies all end up in the returned log.
    pub async fn fetch_json(&self, url: &str) -> ProbeOutcome {
        let started = Instant::now();
        let mut log = RequestLog::pending(url);

        debug!(url, "Probing manifest");

        let response = match self.client.get(url).send().await {
            Ok(response) => response,
            Err(e) => {
                log.duration = elapsed_ms(started);
                let (reason, message) = self.classify(&e);
                log.fail(reason, message);
                return ProbeOutcome::failed(log);
            }
        };

        let status = response.status();
        log.status = Some(status.as_u16());
        log.content_type = response
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .map(str::to_owned);
        log.headers = Some(collect_headers(response.headers()));

        let body = response.bytes().await;
        log.duration = elapsed_ms(started);

        let bytes = match body {
            Ok(bytes) => bytes,
            Err(e) => {
                log.response_body = Some(format!("[Failed to read response body: {}]", e));
                if status.is_success() {
                    let (reason, message) = self.classify(&e);
                    log.fail(reason, message);
                } else {
                    log.fail(FailureReason::HttpStatus, http_status_error(status));
                }
                return ProbeOutcome::failed(log);
            }
        };

        let text = String::from_utf8_lossy(&bytes);
        log.response_body = Some(truncate_chars(&text, self.config.max_logged_body_chars));

        if !status.is_success() {
            log.fail(FailureReason::HttpStatus, http_status_error(status));
            return ProbeOutcome::failed(log);
        }

        let json = bytes.strip_prefix(UTF8_BOM).unwrap_or(&bytes[..]);
        match serde_json::from_slice::<Value>(json) {
            Ok(document) => {
                log.success = true;
                if !log.content_type.as_deref().is_some_and(is_json_content_type) {
                    debug!(
                        url,
                        content_type = log.content_type.as_deref().unwrap_or("<none>"),
                        "Manifest served without a JSON content type"
                    );
                }
                ProbeOutcome {
                    log,
                    document: Some(document),
                }
            }
            Err(e) => {
                debug!(url, error = %e, "Manifest body is not JSON");
                log.fail(FailureReason::Parse, "Invalid JSON response");
                ProbeOutcome::failed(log)
            }
        }
    }

    fn classify(&self, error: &reqwest::Error) -> (FailureReason, String) {
        if error.is_timeout() {
            (
                FailureReason::Timeout,
                format!(
                    "request timed out after {}ms",
                    self.config.request_timeout.as_millis()
                ),
            )
        } else {
            (FailureReason::Network, error_chain(error))
        }
    }
}

fn http_status_error(status: StatusCode) -> String {
    format!("HTTP {}", status.as_u16())
}

/// Whether a Content-Type names JSON (`application/json` or a `+json` suffix)
pub fn is_json_content_type(content_type: &str) -> bool {
    match content_type.parse::<mime::Mime>() {
        Ok(media_type) => {
            media_type.type_() == mime::APPLICATION
                && (media_type.subtype() == mime::JSON
                    || media_type.suffix() == Some(mime::JSON))
        }
        Err(_) => false,
    }
}

/// First `max` characters of `text`
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}

/// Flatten response headers, joining repeated names with ", "
pub fn collect_headers(headers: &HeaderMap) -> HeadersMap {
    let mut collected = HeadersMap::new();

    for name in headers.keys() {
        let values: Vec<&str> = headers
            .get_all(name)
            .iter()
            .filter_map(|v| v.to_str().ok())
            .collect();
        collected.insert(name.as_str().to_string(), values.join(", "));
    }

    collected
}

fn error_chain(error: &reqwest::Error) -> String {
    let mut message = error.to_string();
    let mut source = std::error::Error::source(error);

    while let Some(cause) = source {
        message.push_str(": ");
        message.push_str(&cause.to_string());
        source = cause.source();
    }

    message
}

fn elapsed_ms(started: Instant) -> u64 {
    started.elapsed().as_millis() as u64
}
