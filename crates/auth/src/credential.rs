//! Secret material held by authentication strategies.

use std::sync::Arc;

/// Source of the current token value.
///
/// Evaluated each time a request is mutated, so implementations backed by
/// externally rotated state always hand out the value current at that moment.
pub trait TokenSource: Send + Sync {
    fn current_token(&self) -> String;
}

impl<F> TokenSource for F
where
    F: Fn() -> String + Send + Sync,
{
    fn current_token(&self) -> String {
        self()
    }
}

/// A fixed token or a token source.
#[derive(Clone)]
pub enum Credential {
    Static(String),
    Dynamic(Arc<dyn TokenSource>),
}

impl Credential {
    pub fn from_source(source: impl TokenSource + 'static) -> Self {
        Credential::Dynamic(Arc::new(source))
    }

    /// Current value; dynamic credentials are re-evaluated on every call.
    pub fn resolve(&self) -> String {
        match self {
            Credential::Static(token) => token.clone(),
            Credential::Dynamic(source) => source.current_token(),
        }
    }

    /// `true` only for an empty static token.
    pub fn is_empty(&self) -> bool {
        matches!(self, Credential::Static(token) if token.is_empty())
    }
}

impl Default for Credential {
    fn default() -> Self {
        Credential::Static(String::new())
    }
}

impl core::fmt::Debug for Credential {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Credential::Static(_) => f.write_str("Credential::Static(<redacted>)"),
            Credential::Dynamic(_) => f.write_str("Credential::Dynamic(..)"),
        }
    }
}

impl From<String> for Credential {
    fn from(value: String) -> Self {
        Credential::Static(value)
    }
}

impl From<&str> for Credential {
    fn from(value: &str) -> Self {
        Credential::Static(value.to_string())
    }
}
