//! Manifest discovery for a domain
//!
//! Probes the well-known locations of the Android (`assetlinks.json`) and
//! Apple (`apple-app-site-association`) manifests and records every attempt.
//!
//! ## Flow
//!
//! 1. Normalize the user input into an origin (`https://` added when missing)
//! 2. Android: one GET to `/.well-known/assetlinks.json`
//! 3. Apple: GET `/.well-known/apple-app-site-association`, then
//!    `/apple-app-site-association` only if the first attempt failed
//! 4. Valid Apple documents are normalized into [`AppleUniversalLinksData`]
//!
//! Android and Apple run concurrently. Nothing here returns an error for a
//! missing or malformed manifest; that is reported through [`RequestLog`]
//! entries and the `valid` flags.
//!
//! [`AppleUniversalLinksData`]: crate::manifest::apple::AppleUniversalLinksData

pub mod http;
pub mod models;
pub mod origin;
pub mod reporter;
pub mod runner;

pub use http::{ProbeClient, ProbeConfig, ProbeError, ProbeOutcome};
pub use models::{
    AndroidDiscovery, AppleDiscovery, DiscoveryResult, FailureReason, HeadersMap, Platform,
    RequestLog,
};
pub use origin::{ManifestUrls, normalize_origin};
pub use reporter::{DiscoveryReporter, MetricsReporter, TracingReporter};
pub use runner::{Discoverer, is_apple_manifest};
