//! Origin normalization and well-known manifest locations

pub const ASSETLINKS_PATH: &str = "/.well-known/assetlinks.json";
pub const AASA_PATH: &str = "/.well-known/apple-app-site-association";
pub const AASA_LEGACY_PATH: &str = "/apple-app-site-association";

/// Turn user input into the origin manifest URLs are built from.
///
/// Adds `https://` when no http(s) scheme is given and strips a single
/// trailing slash. Never fails; garbage in produces an origin that simply
/// won't resolve.
pub fn normalize_origin(input: &str) -> String {
    let trimmed = input.trim();

    let mut origin = if trimmed.starts_with("http://") || trimmed.starts_with("https://") {
        trimmed.to_string()
    } else {
        format!("https://{}", trimmed)
    };

    if origin.ends_with('/') {
        origin.pop();
    }

    origin
}

/// Manifest URLs probed for one origin
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestUrls {
    pub android: String,
    pub apple: String,
    pub apple_fallback: String,
}

impl ManifestUrls {
    pub fn for_origin(origin: &str) -> Self {
        Self {
            android: format!("{}{}", origin, ASSETLINKS_PATH),
            apple: format!("{}{}", origin, AASA_PATH),
            apple_fallback: format!("{}{}", origin, AASA_LEGACY_PATH),
        }
    }
}
