//! Client configuration.

use core::fmt;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::Context;
use sso_client_auth::BasicCredentials;
use sso_client_core::{RegistryError, TypeRegistry};
use sso_client_models::sso_registry;
use thiserror::Error;

pub const DEFAULT_BASE_PATH: &str = "http://localhost:7042";

pub const BASE_PATH_VAR: &str = "SSO_CLIENT_BASE_PATH";
pub const MANIFEST_VAR: &str = "SSO_CLIENT_MANIFEST";
pub const CLIENT_ID_VAR: &str = "SSO_CLIENT_ID";
pub const CLIENT_SECRET_VAR: &str = "SSO_CLIENT_SECRET";
pub const BEARER_TOKEN_VAR: &str = "SSO_CLIENT_BEARER_TOKEN";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("invalid base path '{0}': expected an http:// or https:// URL")]
    InvalidBasePath(String),

    #[error("failed to read type manifest {path}")]
    ManifestRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error(transparent)]
    Registry(#[from] RegistryError),
}

#[derive(Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Scheme and authority (plus optional prefix), without a trailing slash.
    pub base_path: String,
    /// Headers added to every request before authentication runs.
    pub default_headers: BTreeMap<String, String>,
    /// JSON manifest replacing the built-in SSO registry.
    pub manifest_path: Option<PathBuf>,
    /// Client id/secret for the SSO basic auth scheme.
    pub client_credentials: Option<BasicCredentials>,
    /// Static token for the default bearer strategy.
    pub bearer_token: Option<String>,
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_path", &self.base_path)
            .field("default_headers", &self.default_headers)
            .field("manifest_path", &self.manifest_path)
            .field("client_credentials", &self.client_credentials)
            .field("bearer_token", &self.bearer_token.as_ref().map(|_| "<redacted>"))
            .finish()
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            base_path: DEFAULT_BASE_PATH.to_string(),
            default_headers: BTreeMap::new(),
            manifest_path: None,
            client_credentials: None,
            bearer_token: None,
        }
    }
}

impl ClientConfig {
    pub fn new(base_path: impl Into<String>) -> Result<Self, ConfigError> {
        Ok(Self {
            base_path: normalize_base_path(base_path.into())?,
            ..Self::default()
        })
    }

    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from an arbitrary variable source (the process environment in
    /// [`ClientConfig::from_env`]).
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let base_path = lookup(BASE_PATH_VAR).unwrap_or_else(|| {
            tracing::warn!("{BASE_PATH_VAR} not set; using {DEFAULT_BASE_PATH}");
            DEFAULT_BASE_PATH.to_string()
        });

        let manifest_path = lookup(MANIFEST_VAR).filter(|p| !p.is_empty()).map(PathBuf::from);
        match &manifest_path {
            Some(path) => tracing::info!(manifest = %path.display(), "using external type manifest"),
            None => tracing::info!("using built-in SSO type registry"),
        }

        // Half a credential pair is ignored: basic auth needs both.
        let client_credentials = match (lookup(CLIENT_ID_VAR), lookup(CLIENT_SECRET_VAR)) {
            (Some(username), Some(password)) => Some(BasicCredentials { username, password }),
            (None, None) => None,
            _ => {
                tracing::warn!("only one of {CLIENT_ID_VAR} and {CLIENT_SECRET_VAR} is set; ignoring both");
                None
            }
        };
        let bearer_token = lookup(BEARER_TOKEN_VAR).filter(|t| !t.is_empty());

        Ok(Self {
            base_path: normalize_base_path(base_path)?,
            default_headers: BTreeMap::new(),
            manifest_path,
            client_credentials,
            bearer_token,
        })
    }

    pub fn with_default_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.default_headers.insert(name.into(), value.into());
        self
    }

    pub fn with_manifest(mut self, path: impl Into<PathBuf>) -> Self {
        self.manifest_path = Some(path.into());
        self
    }

    /// The registry this configuration selects.
    pub fn load_registry(&self) -> anyhow::Result<Arc<TypeRegistry>> {
        let registry = match &self.manifest_path {
            Some(path) => read_manifest(path)
                .with_context(|| format!("failed to load type manifest from {}", path.display()))?,
            None => sso_registry().context("failed to build the SSO type registry")?,
        };
        Ok(Arc::new(registry))
    }
}

fn read_manifest(path: &Path) -> Result<TypeRegistry, ConfigError> {
    let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::ManifestRead {
        path: path.to_path_buf(),
        source,
    })?;
    let registry = TypeRegistry::from_json(&raw)?;
    tracing::debug!(types = registry.len(), manifest = %path.display(), "type manifest loaded");
    Ok(registry)
}

fn normalize_base_path(base_path: String) -> Result<String, ConfigError> {
    let trimmed = base_path.trim().trim_end_matches('/');
    let has_authority = ["http://", "https://"]
        .iter()
        .filter_map(|scheme| trimmed.strip_prefix(scheme))
        .any(|rest| !rest.is_empty());
    if !has_authority {
        return Err(ConfigError::InvalidBasePath(base_path));
    }
    Ok(trimmed.to_string())
}
