pub mod api;
pub mod appstore;
pub mod config;
pub mod discovery;
pub mod manifest;
pub mod observability;
