//! `sso-client-auth`: request authentication and interception.
//!
//! Everything here mutates an [`OutgoingRequest`] in memory; dispatching it is
//! left to the transport.

pub mod credential;
pub mod interceptor;
pub mod request;
pub mod strategy;

pub use credential::{Credential, TokenSource};
pub use interceptor::{default_header, Interceptor, InterceptorPipeline};
pub use request::{BasicCredentials, OutgoingRequest};
pub use strategy::{
    ApiKeyAuth, ApiKeyLocation, AuthStrategy, Authentication, HttpBasicAuth, HttpBearerAuth, OAuth,
    UnknownApiKeyLocation, VoidAuth,
};
