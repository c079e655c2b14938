//! API response and query models
//!
//! `GET /api/check?domain=example.com` returns a [`DomainReport`]:
//!
//! ```json
//! {
//!   "result": {
//!     "checkId": "0190...",
//!     "origin": "https://example.com",
//!     "android": { "url": "...", "logs": [...], "data": [...], "valid": true },
//!     "apple": { "url": "...", "logs": [...], "data": {...}, "valid": true, "parsedData": {...} }
//!   },
//!   "androidApps": [{ "packageName": "com.example", "relation": [...], "fingerprints": [...] }]
//! }
//! ```

use serde::{Deserialize, Serialize};

use crate::discovery::DiscoveryResult;
use crate::manifest::{AndroidAppInfo, android_apps};
use crate::observability::MetricsSnapshot;

#[derive(Debug, Deserialize)]
pub struct CheckQuery {
    pub domain: String,
}

#[derive(Debug, Deserialize)]
pub struct LookupQuery {
    pub bundle_id: String,
    pub country: Option<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct DomainReport {
    pub result: DiscoveryResult,
    /// Apps declared by a valid assetlinks document
    pub android_apps: Vec<AndroidAppInfo>,
}

impl DomainReport {
    pub fn from_result(result: DiscoveryResult) -> Self {
        let apps = match (&result.android.data, result.android.valid) {
            (Some(document), true) => android_apps(document),
            _ => Vec::new(),
        };

        Self {
            result,
            android_apps: apps,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub code: &'static str,
    pub message: String,
}

#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub metrics: MetricsSnapshot,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::discovery::{AndroidDiscovery, AppleDiscovery};
    use serde_json::json;

    fn result_with_android(data: Option<serde_json::Value>, valid: bool) -> DiscoveryResult {
        DiscoveryResult {
            check_id: "test".to_string(),
            origin: "https://example.com".to_string(),
            checked_at: chrono::Utc::now(),
            android: AndroidDiscovery {
                url: "https://example.com/.well-known/assetlinks.json".to_string(),
                logs: Vec::new(),
                data,
                valid,
                source_url: None,
            },
            apple: AppleDiscovery {
                url: "https://example.com/.well-known/apple-app-site-association".to_string(),
                logs: Vec::new(),
                data: None,
                valid: false,
                parsed_data: None,
                source_url: None,
            },
        }
    }

    #[test]
    fn test_report_lists_apps_from_valid_assetlinks() {
        let document = json!([{
            "relation": ["delegate_permission/common.handle_all_urls"],
            "target": {"namespace": "android_app", "package_name": "com.example.app"}
        }]);

        let report = DomainReport::from_result(result_with_android(Some(document), true));
        assert_eq!(report.android_apps.len(), 1);
        assert_eq!(report.android_apps[0].package_name, "com.example.app");

        let json = serde_json::to_value(&report).unwrap();
        assert_eq!(json["androidApps"][0]["packageName"], "com.example.app");
        assert_eq!(json["result"]["origin"], "https://example.com");
    }

    #[test]
    fn test_report_ignores_invalid_android_data() {
        let report = DomainReport::from_result(result_with_android(Some(json!({})), false));
        assert!(report.android_apps.is_empty());
    }
}
