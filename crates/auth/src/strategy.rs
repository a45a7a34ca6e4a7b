//! Authentication strategies.
//!
//! Each strategy mutates an outgoing request to carry its credentials. Applying a
//! strategy performs no I/O and never fails: if the request lacks the aspect a
//! strategy writes to (headers, query), that part is skipped.

use core::fmt;
use core::str::FromStr;
use std::sync::Arc;

use http::header::{HeaderValue, AUTHORIZATION, COOKIE};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::credential::{Credential, TokenSource};
use crate::request::{insert_header, insert_header_bytes, BasicCredentials, OutgoingRequest};

/// Capability shared by every strategy (and by anything else that wants to take
/// part in request preparation).
pub trait Authentication: Send + Sync {
    fn apply_to_request(&self, request: &mut OutgoingRequest);
}

impl<T: Authentication + ?Sized> Authentication for Arc<T> {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        (**self).apply_to_request(request)
    }
}

impl<T: Authentication + ?Sized> Authentication for Box<T> {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        (**self).apply_to_request(request)
    }
}

/// HTTP basic auth, handed to the transport as a credential pair.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct HttpBasicAuth {
    pub username: String,
    pub password: String,
}

impl HttpBasicAuth {
    pub fn new(username: impl Into<String>, password: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password: password.into(),
        }
    }

    /// Both halves of the pair are set.
    pub fn is_configured(&self) -> bool {
        !self.username.is_empty() && !self.password.is_empty()
    }
}

impl fmt::Debug for HttpBasicAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HttpBasicAuth")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

impl Authentication for HttpBasicAuth {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        request.auth = Some(BasicCredentials {
            username: self.username.clone(),
            password: self.password.clone(),
        });
    }
}

/// `Authorization: Bearer <token>` with a fixed or dynamic token.
#[derive(Debug, Clone, Default)]
pub struct HttpBearerAuth {
    access_token: Credential,
}

impl HttpBearerAuth {
    pub fn new(access_token: impl Into<Credential>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn with_token_source(source: impl TokenSource + 'static) -> Self {
        Self {
            access_token: Credential::from_source(source),
        }
    }

    pub fn set_access_token(&mut self, access_token: impl Into<Credential>) {
        self.access_token = access_token.into();
    }

    pub fn access_token(&self) -> &Credential {
        &self.access_token
    }
}

impl Authentication for HttpBearerAuth {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        if let Some(headers) = request.headers.as_mut() {
            let token = self.access_token.resolve();
            insert_header(headers, AUTHORIZATION.as_str(), &format!("Bearer {token}"), true);
        }
    }
}

/// Where an API key is placed on the request.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiKeyLocation {
    Header,
    Query,
    Cookie,
}

impl ApiKeyLocation {
    pub fn as_str(&self) -> &'static str {
        match self {
            ApiKeyLocation::Header => "header",
            ApiKeyLocation::Query => "query",
            ApiKeyLocation::Cookie => "cookie",
        }
    }
}

impl fmt::Display for ApiKeyLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown api key location '{0}' (expected header, query or cookie)")]
pub struct UnknownApiKeyLocation(pub String);

impl FromStr for ApiKeyLocation {
    type Err = UnknownApiKeyLocation;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "header" => Ok(ApiKeyLocation::Header),
            "query" => Ok(ApiKeyLocation::Query),
            "cookie" => Ok(ApiKeyLocation::Cookie),
            other => Err(UnknownApiKeyLocation(other.to_string())),
        }
    }
}

/// API key sent as a named header, query parameter or cookie.
#[derive(Clone, PartialEq, Eq)]
pub struct ApiKeyAuth {
    location: ApiKeyLocation,
    param_name: String,
    api_key: String,
}

impl ApiKeyAuth {
    pub fn new(location: ApiKeyLocation, param_name: impl Into<String>) -> Self {
        Self {
            location,
            param_name: param_name.into(),
            api_key: String::new(),
        }
    }

    pub fn with_api_key(mut self, api_key: impl Into<String>) -> Self {
        self.api_key = api_key.into();
        self
    }

    pub fn set_api_key(&mut self, api_key: impl Into<String>) {
        self.api_key = api_key.into();
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn location(&self) -> ApiKeyLocation {
        self.location
    }

    pub fn param_name(&self) -> &str {
        &self.param_name
    }
}

impl fmt::Debug for ApiKeyAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiKeyAuth")
            .field("location", &self.location)
            .field("param_name", &self.param_name)
            .field("api_key", &"<redacted>")
            .finish()
    }
}

impl Authentication for ApiKeyAuth {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        match self.location {
            ApiKeyLocation::Query => {
                if let Some(query) = request.query.as_mut() {
                    query.insert(self.param_name.clone(), self.api_key.clone());
                }
            }
            ApiKeyLocation::Header => {
                if let Some(headers) = request.headers.as_mut() {
                    insert_header(headers, &self.param_name, &self.api_key, true);
                }
            }
            ApiKeyLocation::Cookie => {
                if let Some(headers) = request.headers.as_mut() {
                    let pair = format!("{}={}", self.param_name, urlencoding::encode(&self.api_key));
                    // Existing values are opaque bytes and may span several header lines.
                    let mut cookie = Vec::new();
                    for existing in headers.get_all(COOKIE).iter().map(HeaderValue::as_bytes) {
                        if !existing.is_empty() {
                            cookie.extend_from_slice(existing);
                            cookie.extend_from_slice(b"; ");
                        }
                    }
                    cookie.extend_from_slice(pair.as_bytes());
                    insert_header_bytes(headers, COOKIE.as_str(), &cookie, true);
                }
            }
        }
    }
}

/// OAuth2 access token sent as a bearer token.
///
/// Same wire effect as a static [`HttpBearerAuth`]; kept separate for call sites
/// that manage OAuth2 tokens specifically.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct OAuth {
    access_token: String,
}

impl OAuth {
    pub fn new(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
        }
    }

    pub fn set_access_token(&mut self, access_token: impl Into<String>) {
        self.access_token = access_token.into();
    }

    pub fn access_token(&self) -> &str {
        &self.access_token
    }
}

impl fmt::Debug for OAuth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("OAuth { access_token: <redacted> }")
    }
}

impl Authentication for OAuth {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        if let Some(headers) = request.headers.as_mut() {
            let value = format!("Bearer {}", self.access_token);
            insert_header(headers, AUTHORIZATION.as_str(), &value, true);
        }
    }
}

/// No credentials.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq)]
pub struct VoidAuth;

impl Authentication for VoidAuth {
    fn apply_to_request(&self, _request: &mut OutgoingRequest) {}
}

/// The closed set of strategies a client can be configured with.
#[derive(Debug, Clone, Default)]
pub enum AuthStrategy {
    Basic(HttpBasicAuth),
    Bearer(HttpBearerAuth),
    ApiKey(ApiKeyAuth),
    OAuth2(OAuth),
    #[default]
    None,
}

impl Authentication for AuthStrategy {
    fn apply_to_request(&self, request: &mut OutgoingRequest) {
        match self {
            AuthStrategy::Basic(auth) => auth.apply_to_request(request),
            AuthStrategy::Bearer(auth) => auth.apply_to_request(request),
            AuthStrategy::ApiKey(auth) => auth.apply_to_request(request),
            AuthStrategy::OAuth2(auth) => auth.apply_to_request(request),
            AuthStrategy::None => VoidAuth.apply_to_request(request),
        }
    }
}

impl From<HttpBasicAuth> for AuthStrategy {
    fn from(value: HttpBasicAuth) -> Self {
        AuthStrategy::Basic(value)
    }
}

impl From<HttpBearerAuth> for AuthStrategy {
    fn from(value: HttpBearerAuth) -> Self {
        AuthStrategy::Bearer(value)
    }
}

impl From<ApiKeyAuth> for AuthStrategy {
    fn from(value: ApiKeyAuth) -> Self {
        AuthStrategy::ApiKey(value)
    }
}

impl From<OAuth> for AuthStrategy {
    fn from(value: OAuth) -> Self {
        AuthStrategy::OAuth2(value)
    }
}

impl From<VoidAuth> for AuthStrategy {
    fn from(_: VoidAuth) -> Self {
        AuthStrategy::None
    }
}
