//! Result types for a domain check.
//!
//! These are plain values built once per check and handed to the caller. They
//! serialize with camelCase names, which is the shape the web front-end reads.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use crate::manifest::apple::AppleUniversalLinksData;

pub type HeadersMap = BTreeMap<String, String>;

/// Why a single fetch attempt failed
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    /// Connection, DNS, TLS or body transfer error
    Network,
    /// The per-attempt ceiling elapsed
    Timeout,
    /// Response arrived with a status outside 200..300
    HttpStatus,
    /// 2xx response whose body is not JSON
    Parse,
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            FailureReason::Network => "network",
            FailureReason::Timeout => "timeout",
            FailureReason::HttpStatus => "http_status",
            FailureReason::Parse => "parse",
        };
        f.write_str(s)
    }
}

/// One fetch attempt against a manifest URL
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RequestLog {
    pub url: String,
    /// Absent when no response arrived
    pub status: Option<u16>,
    /// Whole milliseconds from send to body read
    pub duration: u64,
    pub content_type: Option<String>,
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub failure: Option<FailureReason>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub response_body: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub headers: Option<HeadersMap>,
}

impl RequestLog {
    pub(crate) fn pending(url: &str) -> Self {
        Self {
            url: url.to_string(),
            status: None,
            duration: 0,
            content_type: None,
            success: false,
            error: None,
            failure: None,
            response_body: None,
            headers: None,
        }
    }

    pub(crate) fn fail(&mut self, reason: FailureReason, message: impl Into<String>) {
        self.success = false;
        self.failure = Some(reason);
        self.error = Some(message.into());
    }
}

/// Which manifest a probe belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Platform {
    Android,
    Apple,
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Platform::Android => f.write_str("android"),
            Platform::Apple => f.write_str("apple"),
        }
    }
}

/// Android side of a check (`assetlinks.json`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidDiscovery {
    pub url: String,
    pub logs: Vec<RequestLog>,
    pub data: Option<Value>,
    pub valid: bool,
    pub source_url: Option<String>,
}

/// Apple side of a check (`apple-app-site-association`)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppleDiscovery {
    /// Primary (`.well-known`) location, even when the fallback answered
    pub url: String,
    pub logs: Vec<RequestLog>,
    pub data: Option<Value>,
    pub valid: bool,
    pub parsed_data: Option<AppleUniversalLinksData>,
    pub source_url: Option<String>,
}

/// Outcome of checking one domain
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DiscoveryResult {
    pub check_id: String,
    pub origin: String,
    pub checked_at: chrono::DateTime<chrono::Utc>,
    pub android: AndroidDiscovery,
    pub apple: AppleDiscovery,
}
