//! `sso-client`: request preparation and response decoding for the SSO API.
//!
//! Ties the pieces together: the type registry (built-in or loaded from a
//! manifest), the marshalling engine, authentication and interceptors. Sending
//! the prepared request is the caller's transport's job.

pub mod client;
pub mod config;

pub use client::{ApiClient, Authentications};
pub use config::{ClientConfig, ConfigError, DEFAULT_BASE_PATH};
