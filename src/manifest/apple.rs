//! Apple App Site Association (AASA) normalization
//!
//! AASA files have carried path rules in two shapes over the years:
//!
//! ```json
//! { "applinks": { "details": [
//!     { "appID": "TEAM.com.example", "paths": ["/docs/*", "NOT /private/*"] },
//!     { "appIDs": ["TEAM.com.a", "TEAM.com.b"],
//!       "components": [{ "/": "/buy/*", "?": { "ref": "?*" }, "#": "top", "exclude": true }] }
//! ]}}
//! ```
//!
//! Both are folded into [`ApplePathRule`]. Legacy `paths` rules come first,
//! then `components` rules. A detail listing several identifiers becomes one
//! [`AppleAppConfig`] per identifier, each carrying the same rules.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

use super::json::{array_field, field, is_truthy, non_empty_str, strings};

const EXCLUDE_PREFIX: &str = "NOT ";
const DEFAULT_COMPONENT_PATH: &str = "/";

/// Expected value(s) of one query parameter in a `components` rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum QueryValue {
    One(String),
    Many(Vec<String>),
    /// Anything else, kept as published
    Other(Value),
}

impl QueryValue {
    fn from_json(value: &Value) -> Self {
        match value {
            Value::String(s) => QueryValue::One(s.clone()),
            Value::Array(items) if items.iter().all(Value::is_string) => {
                QueryValue::Many(strings(items))
            }
            other => QueryValue::Other(other.clone()),
        }
    }
}

pub type QueryParameters = BTreeMap<String, QueryValue>;

/// One path-matching rule
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApplePathRule {
    pub path: String,
    pub exclude: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub query_parameters: Option<QueryParameters>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fragment: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

impl ApplePathRule {
    pub fn new(path: impl Into<String>, exclude: bool) -> Self {
        Self {
            path: path.into(),
            exclude,
            query_parameters: None,
            fragment: None,
            comment: None,
        }
    }
}

/// Rules declared for one application identifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppleAppConfig {
    /// `<TeamID>.<BundleID>`, kept as published
    #[serde(rename = "appID")]
    pub app_id: String,
    pub paths: Vec<ApplePathRule>,
}

impl AppleAppConfig {
    pub fn team_id(&self) -> &str {
        split_app_id(&self.app_id).0
    }

    pub fn bundle_id(&self) -> &str {
        split_app_id(&self.app_id).1
    }

    /// Human-friendly app name guessed from the bundle identifier
    pub fn display_name(&self) -> String {
        display_name(self.bundle_id())
    }

    pub fn developer_name(&self) -> String {
        developer_name(self.bundle_id())
    }
}

/// Split `<TeamID>.<BundleID>` on the first dot.
///
/// Identifiers without a dot have an `"Unknown"` team.
pub fn split_app_id(app_id: &str) -> (&str, &str) {
    app_id.split_once('.').unwrap_or(("Unknown", app_id))
}

/// `com.example.myApp` -> `My App`
pub fn display_name(bundle_id: &str) -> String {
    let last = bundle_id.rsplit('.').next().unwrap_or(bundle_id);
    let mut chars = last.chars();

    let Some(first) = chars.next() else {
        return String::new();
    };

    let mut rest = String::new();
    for c in chars {
        if c.is_ascii_uppercase() {
            rest.push(' ');
        }
        rest.push(c);
    }

    format!("{}{}", first.to_uppercase(), rest.trim())
}

/// `com.example.app` -> `Com`; single-segment ids give `Unknown`
pub fn developer_name(bundle_id: &str) -> String {
    match bundle_id.split_once('.') {
        Some((first, _)) => capitalize(first),
        None => "Unknown".to_string(),
    }
}

fn capitalize(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Identifiers declared for a non-`applinks` service
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppleServiceConfig {
    pub apps: Vec<String>,
}

/// AASA services besides `applinks`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AppleService {
    /// Shared web credentials (password autofill)
    WebCredentials,
    /// Handoff
    ActivityContinuation,
    AppClips,
}

impl AppleService {
    pub const ALL: [AppleService; 3] = [
        AppleService::WebCredentials,
        AppleService::ActivityContinuation,
        AppleService::AppClips,
    ];

    pub fn key(self) -> &'static str {
        match self {
            AppleService::WebCredentials => "webcredentials",
            AppleService::ActivityContinuation => "activitycontinuation",
            AppleService::AppClips => "appclips",
        }
    }
}

impl fmt::Display for AppleService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Normalized AASA document
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppleUniversalLinksData {
    pub applinks: Vec<AppleAppConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webcredentials: Option<AppleServiceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub activitycontinuation: Option<AppleServiceConfig>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub appclips: Option<AppleServiceConfig>,
}

impl AppleUniversalLinksData {
    pub fn service(&self, service: AppleService) -> Option<&AppleServiceConfig> {
        match service {
            AppleService::WebCredentials => self.webcredentials.as_ref(),
            AppleService::ActivityContinuation => self.activitycontinuation.as_ref(),
            AppleService::AppClips => self.appclips.as_ref(),
        }
    }

    /// Entries across all services, duplicates included
    pub fn app_count(&self) -> usize {
        self.applinks.len()
            + AppleService::ALL
                .iter()
                .filter_map(|s| self.service(*s))
                .map(|s| s.apps.len())
                .sum::<usize>()
    }
}

/// Normalize a raw AASA document.
///
/// Returns `None` when the input is not an object or has no truthy
/// `applinks` value. A `null` detail, an app identifier that is not a string
/// or a `paths` entry that is not a string also yields `None`: the result is
/// either complete or absent.
pub fn normalize_apple_manifest(document: &Value) -> Option<AppleUniversalLinksData> {
    let applinks = field(document, "applinks").filter(|v| is_truthy(v))?;

    let mut result = AppleUniversalLinksData {
        applinks: Vec::new(),
        webcredentials: None,
        activitycontinuation: None,
        appclips: None,
    };

    if let Some(details) = array_field(applinks, "details") {
        for detail in details {
            if detail.is_null() {
                return None;
            }

            let app_ids = detail_app_ids(detail)?;
            if app_ids.is_empty() {
                continue;
            }

            let rules = detail_rules(detail)?;
            for app_id in app_ids {
                result.applinks.push(AppleAppConfig {
                    app_id,
                    paths: rules.clone(),
                });
            }
        }
    }

    result.webcredentials = parse_service(document, AppleService::WebCredentials);
    result.activitycontinuation = parse_service(document, AppleService::ActivityContinuation);
    result.appclips = parse_service(document, AppleService::AppClips);

    Some(result)
}

/// A truthy `appID` wins over `appIDs`
fn detail_app_ids(detail: &Value) -> Option<Vec<String>> {
    if let Some(app_id) = field(detail, "appID").filter(|v| is_truthy(v)) {
        return app_id.as_str().map(|id| vec![id.to_string()]);
    }

    match array_field(detail, "appIDs") {
        Some(ids) => ids.iter().map(|id| id.as_str().map(str::to_owned)).collect(),
        None => Some(Vec::new()),
    }
}

fn detail_rules(detail: &Value) -> Option<Vec<ApplePathRule>> {
    let mut rules = parse_legacy_paths(detail)?;
    rules.extend(parse_components(detail));
    Some(rules)
}

/// `paths`: plain strings, `NOT ` prefix marks an exclusion.
///
/// `None` when any entry is not a string.
pub fn parse_legacy_paths(detail: &Value) -> Option<Vec<ApplePathRule>> {
    let Some(paths) = array_field(detail, "paths") else {
        return Some(Vec::new());
    };

    paths
        .iter()
        .map(|path| {
            let path = path.as_str()?;
            Some(match path.strip_prefix(EXCLUDE_PREFIX) {
                Some(stripped) => ApplePathRule::new(stripped, true),
                None => ApplePathRule::new(path, false),
            })
        })
        .collect()
}

/// `components`: objects keyed by `/`, `?`, `#`, `exclude` and `comment`
pub fn parse_components(detail: &Value) -> Vec<ApplePathRule> {
    let Some(components) = array_field(detail, "components") else {
        return Vec::new();
    };

    components
        .iter()
        .filter(|c| c.is_object())
        .map(|component| {
            let path = non_empty_str(component, "/").unwrap_or(DEFAULT_COMPONENT_PATH);
            let exclude = field(component, "exclude").is_some_and(is_truthy);

            let query_parameters = field(component, "?")
                .and_then(Value::as_object)
                .map(|query| {
                    query
                        .iter()
                        .map(|(name, value)| (name.clone(), QueryValue::from_json(value)))
                        .collect::<QueryParameters>()
                });

            ApplePathRule {
                path: path.to_string(),
                exclude,
                query_parameters,
                fragment: non_empty_str(component, "#").map(str::to_owned),
                comment: non_empty_str(component, "comment").map(str::to_owned),
            }
        })
        .collect()
}

fn parse_service(document: &Value, service: AppleService) -> Option<AppleServiceConfig> {
    let section = field(document, service.key())?;
    let apps = array_field(section, "apps")?;

    Some(AppleServiceConfig {
        apps: strings(apps),
    })
}
