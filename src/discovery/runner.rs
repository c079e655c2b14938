//! Runs one domain check: Android and Apple probes, Apple fallback, normalization

use serde_json::Value;
use std::sync::Arc;
use tracing::{Instrument, info, info_span};
use uuid::Uuid;

use super::http::{ProbeClient, ProbeOutcome};
use super::models::{AndroidDiscovery, AppleDiscovery, DiscoveryResult, Platform};
use super::origin::{ManifestUrls, normalize_origin};
use super::reporter::{DiscoveryReporter, TracingReporter};
use crate::manifest::apple::normalize_apple_manifest;

/// Checks domains for App Links / Universal Links manifests
#[derive(Clone)]
pub struct Discoverer {
    client: ProbeClient,
    reporter: Arc<dyn DiscoveryReporter>,
}

impl Discoverer {
    pub fn new(client: ProbeClient) -> Self {
        Self {
            client,
            reporter: Arc::new(TracingReporter),
        }
    }

    pub fn with_reporter(mut self, reporter: Arc<dyn DiscoveryReporter>) -> Self {
        self.reporter = reporter;
        self
    }

    /// Check a domain. Always returns a complete result; every failure is
    /// recorded in the logs and `valid` flags.
    pub async fn check(&self, input: &str) -> DiscoveryResult {
        let check_id = Uuid::now_v7().to_string();
        let origin = normalize_origin(input);
        let urls = ManifestUrls::for_origin(&origin);

        let span = info_span!("check", check_id = %check_id, origin = %origin);

        async {
            info!("Checking domain");

            let (android, apple) = tokio::join!(self.probe_android(&urls), self.probe_apple(&urls));

            info!(
                android_valid = android.valid,
                apple_valid = apple.valid,
                "Check finished"
            );

            DiscoveryResult {
                check_id: check_id.clone(),
                origin: origin.clone(),
                checked_at: chrono::Utc::now(),
                android,
                apple,
            }
        }
        .instrument(span)
        .await
    }

    async fn probe_android(&self, urls: &ManifestUrls) -> AndroidDiscovery {
        let mut side = AndroidDiscovery {
            url: urls.android.clone(),
            logs: Vec::new(),
            data: None,
            valid: false,
            source_url: None,
        };

        let outcome = self.attempt(Platform::Android, &urls.android).await;
        let (log, document) = (outcome.log, outcome.document);
        side.logs.push(log);

        if let Some(document) = document {
            side.valid = document.is_array();
            side.data = Some(document);
            side.source_url = Some(urls.android.clone());
        }

        side
    }

    async fn probe_apple(&self, urls: &ManifestUrls) -> AppleDiscovery {
        let mut side = AppleDiscovery {
            url: urls.apple.clone(),
            logs: Vec::new(),
            data: None,
            valid: false,
            parsed_data: None,
            source_url: None,
        };

        let primary = self.attempt(Platform::Apple, &urls.apple).await;
        let found = accept_apple(&mut side, primary, &urls.apple);

        if !found {
            self.reporter.fallback_started(&urls.apple_fallback);
            let fallback = self.attempt(Platform::Apple, &urls.apple_fallback).await;
            accept_apple(&mut side, fallback, &urls.apple_fallback);
        }

        side
    }

    async fn attempt(&self, platform: Platform, url: &str) -> ProbeOutcome {
        let outcome = self.client.fetch_json(url).await;
        self.reporter.attempt_finished(platform, &outcome.log);
        outcome
    }
}

/// Record an Apple attempt; returns whether it met the fetch success contract
fn accept_apple(side: &mut AppleDiscovery, outcome: ProbeOutcome, url: &str) -> bool {
    let succeeded = outcome.succeeded();
    let ProbeOutcome { log, document } = outcome;
    side.logs.push(log);

    if let Some(document) = document {
        side.valid = is_apple_manifest(&document);
        side.parsed_data = if side.valid {
            normalize_apple_manifest(&document)
        } else {
            None
        };
        side.data = Some(document);
        side.source_url = Some(url.to_string());
    }

    succeeded
}

/// An AASA document must be an object with an `applinks` key
pub fn is_apple_manifest(document: &Value) -> bool {
    document
        .as_object()
        .is_some_and(|map| map.contains_key("applinks"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::models::{FailureReason, RequestLog};
    use serde_json::json;

    fn empty_apple() -> AppleDiscovery {
        AppleDiscovery {
            url: "https://example.com/.well-known/apple-app-site-association".to_string(),
            logs: Vec::new(),
            data: None,
            valid: false,
            parsed_data: None,
            source_url: None,
        }
    }

    fn ok_outcome(url: &str, document: Value) -> ProbeOutcome {
        let mut log = RequestLog::pending(url);
        log.status = Some(200);
        log.success = true;
        ProbeOutcome {
            log,
            document: Some(document),
        }
    }

    #[test]
    fn test_is_apple_manifest() {
        assert!(is_apple_manifest(&json!({"applinks": {}})));
        assert!(is_apple_manifest(&json!({"applinks": null})));
        assert!(!is_apple_manifest(&json!({"webcredentials": {}})));
        assert!(!is_apple_manifest(&json!([{"applinks": {}}])));
        assert!(!is_apple_manifest(&json!("applinks")));
    }

    #[test]
    fn test_accept_apple_valid_document_is_normalized() {
        let mut side = empty_apple();
        let url = "https://example.com/.well-known/apple-app-site-association";
        let document = json!({"applinks": {"details": [{"appID": "T.com.x", "paths": ["/a"]}]}});

        assert!(accept_apple(&mut side, ok_outcome(url, document), url));
        assert!(side.valid);
        assert_eq!(side.source_url.as_deref(), Some(url));

        let parsed = side.parsed_data.unwrap();
        assert_eq!(parsed.applinks.len(), 1);
        assert_eq!(parsed.applinks[0].app_id, "T.com.x");
    }

    #[test]
    fn test_accept_apple_json_without_applinks_is_success_but_invalid() {
        let mut side = empty_apple();
        let url = "https://example.com/.well-known/apple-app-site-association";

        assert!(accept_apple(&mut side, ok_outcome(url, json!({})), url));
        assert!(!side.valid);
        assert!(side.parsed_data.is_none());
        assert_eq!(side.data, Some(json!({})));
    }

    #[test]
    fn test_accept_apple_failure_leaves_data_empty() {
        let mut side = empty_apple();
        let url = "https://example.com/.well-known/apple-app-site-association";
        let mut log = RequestLog::pending(url);
        log.status = Some(404);
        log.fail(FailureReason::HttpStatus, "HTTP 404");

        let found = accept_apple(&mut side, ProbeOutcome { log, document: None }, url);
        assert!(!found);
        assert!(!side.valid);
        assert!(side.data.is_none());
        assert_eq!(side.logs.len(), 1);
        assert!(!side.logs[0].success);
    }
}
