//! SSO API models: the generated type table and the endpoint catalogue.
//!
//! No IO here; [`sso_registry`] turns the static table into a registry that the
//! marshalling engine can share.

pub mod endpoint;
pub mod types;

pub use endpoint::Endpoint;
pub use types::{sso_registry, Field, SsoType, UnknownSsoType};
