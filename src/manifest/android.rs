//! Digital Asset Links (`assetlinks.json`) statements

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::json::{array_field, field, non_empty_str, strings};

const PLAY_STORE_DETAILS_URL: &str = "https://play.google.com/store/apps/details";

/// One Android app declared by an `assetlinks.json` statement
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AndroidAppInfo {
    pub package_name: String,
    pub relation: Vec<String>,
    pub fingerprints: Vec<String>,
}

/// Apps declared in an assetlinks document.
///
/// Statements that are not objects or have no `target.package_name` are
/// skipped; missing `relation` or fingerprint lists become empty.
pub fn android_apps(document: &Value) -> Vec<AndroidAppInfo> {
    let Some(statements) = document.as_array() else {
        return Vec::new();
    };

    statements
        .iter()
        .filter_map(|statement| {
            let target = field(statement, "target")?;
            let package_name = non_empty_str(target, "package_name")?;

            Some(AndroidAppInfo {
                package_name: package_name.to_string(),
                relation: array_field(statement, "relation")
                    .map(|r| strings(r))
                    .unwrap_or_default(),
                fingerprints: array_field(target, "sha256_cert_fingerprints")
                    .map(|f| strings(f))
                    .unwrap_or_default(),
            })
        })
        .collect()
}

/// Store listing details for an Android package
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppDetails {
    pub title: String,
    pub developer: String,
    pub url: String,
    /// Set when details came from the store itself rather than the package name
    pub is_enriched: bool,
}

/// Best-effort details derived from the package name alone
pub fn app_details_from_package(package_name: &str) -> AppDetails {
    let parts: Vec<&str> = package_name.split('.').collect();

    let (raw_title, raw_developer) = if parts.len() > 1 {
        (parts[parts.len() - 1], parts[0])
    } else {
        (package_name, "Unknown")
    };

    AppDetails {
        title: humanize_identifier(raw_title),
        developer: humanize_identifier(raw_developer),
        url: format!("{}?id={}", PLAY_STORE_DETAILS_URL, package_name),
        is_enriched: false,
    }
}

/// `myCoolApp` -> `My Cool App`
fn humanize_identifier(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len() + 4);
    let mut prev_lower = false;

    for c in raw.chars() {
        if prev_lower && c.is_ascii_uppercase() {
            out.push(' ');
        }
        prev_lower = c.is_ascii_lowercase();
        out.push(c);
    }

    let mut chars = out.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => out,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_android_apps_extracts_statements() {
        let doc = json!([
            {
                "relation": ["delegate_permission/common.handle_all_urls"],
                "target": {
                    "namespace": "android_app",
                    "package_name": "com.example.app",
                    "sha256_cert_fingerprints": ["AA:BB"]
                }
            },
            {
                "relation": ["delegate_permission/common.get_login_creds"],
                "target": {"namespace": "web", "site": "https://example.com"}
            },
            "junk",
            {"target": {"package_name": "com.example.bare"}}
        ]);

        let apps = android_apps(&doc);
        assert_eq!(apps.len(), 2);
        assert_eq!(apps[0].package_name, "com.example.app");
        assert_eq!(apps[0].relation, vec!["delegate_permission/common.handle_all_urls"]);
        assert_eq!(apps[0].fingerprints, vec!["AA:BB"]);
        assert_eq!(apps[1].package_name, "com.example.bare");
        assert!(apps[1].relation.is_empty());
        assert!(apps[1].fingerprints.is_empty());
    }

    #[test]
    fn test_android_apps_non_array() {
        assert!(android_apps(&json!({"target": {"package_name": "x"}})).is_empty());
        assert!(android_apps(&json!(null)).is_empty());
    }

    #[test]
    fn test_app_details_from_package() {
        let details = app_details_from_package("com.example.myCoolApp");
        assert_eq!(details.title, "My Cool App");
        assert_eq!(details.developer, "Com");
        assert_eq!(
            details.url,
            "https://play.google.com/store/apps/details?id=com.example.myCoolApp"
        );
        assert!(!details.is_enriched);
    }

    #[test]
    fn test_app_details_single_segment() {
        let details = app_details_from_package("launcher");
        assert_eq!(details.title, "Launcher");
        assert_eq!(details.developer, "Unknown");
    }

    #[test]
    fn test_humanize_identifier() {
        assert_eq!(humanize_identifier("twitter"), "Twitter");
        assert_eq!(humanize_identifier("ABCApp"), "ABCApp");
        assert_eq!(humanize_identifier(""), "");
    }
}
