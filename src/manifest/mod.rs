//! Typed views over fetched manifest documents
//!
//! - [`apple`] - AASA normalization (`paths` and `components` rules, services)
//! - [`android`] - assetlinks statements and Play Store details
//!
//! Both readers are pure and lenient: unexpected shapes are skipped instead
//! of rejected.

pub mod android;
pub mod apple;
mod json;

pub use android::{AndroidAppInfo, AppDetails, android_apps, app_details_from_package};
pub use apple::{
    AppleAppConfig, ApplePathRule, AppleService, AppleServiceConfig, AppleUniversalLinksData,
    QueryValue, normalize_apple_manifest,
};
