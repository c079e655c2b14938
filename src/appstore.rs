//! App Store lookup by bundle identifier

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;
use tracing::{debug, warn};

use crate::config::AppStoreSettings;
use crate::discovery::ProbeError;

#[derive(Debug, Error)]
enum LookupError {
    #[error(transparent)]
    Request(#[from] reqwest::Error),

    #[error("invalid lookup response: {0}")]
    Decode(#[from] serde_json::Error),
}

/// Outcome of an App Store lookup
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppStoreLookupResult {
    pub success: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub track_view_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error_message: Option<String>,
}

impl AppStoreLookupResult {
    pub fn found(track_view_url: impl Into<String>) -> Self {
        Self {
            success: true,
            track_view_url: Some(track_view_url.into()),
            error_message: None,
        }
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self {
            success: false,
            track_view_url: None,
            error_message: Some(message.into()),
        }
    }
}

/// Resolves a bundle identifier to a store listing
#[async_trait]
pub trait StoreLookup: Send + Sync {
    async fn lookup(&self, bundle_id: &str, country: &str) -> AppStoreLookupResult;
}

/// iTunes Search API client
#[derive(Debug, Clone)]
pub struct AppStoreClient {
    client: Client,
    lookup_url: String,
}

impl AppStoreClient {
    pub fn new(settings: &AppStoreSettings) -> Result<Self, ProbeError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(settings.timeout_ms))
            .build()
            .map_err(|e| ProbeError::ClientBuild(e.to_string()))?;

        Ok(Self {
            client,
            lookup_url: settings.lookup_url.clone(),
        })
    }

    async fn fetch(
        &self,
        bundle_id: &str,
        country: &str,
    ) -> Result<AppStoreLookupResult, LookupError> {
        let response = self
            .client
            .get(&self.lookup_url)
            .query(&[("bundleId", bundle_id), ("country", country)])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            return Ok(AppStoreLookupResult::failed(format!(
                "App Store lookup failed with status: {}",
                status.as_u16()
            )));
        }

        let bytes = response.bytes().await?;
        let body: Value = serde_json::from_slice(&bytes)?;
        Ok(interpret_lookup(&body, country))
    }
}

#[async_trait]
impl StoreLookup for AppStoreClient {
    async fn lookup(&self, bundle_id: &str, country: &str) -> AppStoreLookupResult {
        debug!(bundle_id, country, "Looking up app in the App Store");

        match self.fetch(bundle_id, country).await {
            Ok(result) => result,
            Err(e) => {
                warn!(bundle_id, country, error = %e, "App Store lookup failed");
                AppStoreLookupResult::failed(e.to_string())
            }
        }
    }
}

/// Read the iTunes lookup response body
pub fn interpret_lookup(body: &Value, country: &str) -> AppStoreLookupResult {
    let results = body
        .get("results")
        .and_then(Value::as_array)
        .filter(|r| !r.is_empty());

    let no_results = body.get("resultCount").and_then(Value::as_u64) == Some(0);

    let first = match results {
        Some(results) if !no_results => &results[0],
        _ => {
            return AppStoreLookupResult::failed(format!(
                "App not found in the {} App Store",
                country.to_uppercase()
            ));
        }
    };

    match first
        .get("trackViewUrl")
        .and_then(Value::as_str)
        .filter(|url| !url.is_empty())
    {
        Some(url) => AppStoreLookupResult::found(url),
        None => AppStoreLookupResult::failed("App found but no store URL available"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_interpret_lookup_found() {
        let body = json!({
            "resultCount": 1,
            "results": [{"trackViewUrl": "https://apps.apple.com/us/app/x/id1"}]
        });
        assert_eq!(
            interpret_lookup(&body, "us"),
            AppStoreLookupResult::found("https://apps.apple.com/us/app/x/id1")
        );
    }

    #[test]
    fn test_interpret_lookup_not_found() {
        let body = json!({"resultCount": 0, "results": []});
        let result = interpret_lookup(&body, "nl");
        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("App not found in the NL App Store")
        );

        let result = interpret_lookup(&json!({}), "us");
        assert_eq!(
            result.error_message.as_deref(),
            Some("App not found in the US App Store")
        );
    }

    #[test]
    fn test_interpret_lookup_missing_url() {
        let body = json!({"resultCount": 1, "results": [{"trackName": "X"}]});
        let result = interpret_lookup(&body, "us");
        assert!(!result.success);
        assert_eq!(
            result.error_message.as_deref(),
            Some("App found but no store URL available")
        );
    }

    #[test]
    fn test_lookup_result_serialization() {
        let json = serde_json::to_value(AppStoreLookupResult::failed("nope")).unwrap();
        assert_eq!(json, json!({"success": false, "errorMessage": "nope"}));
    }
}
