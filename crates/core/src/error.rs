//! Registry construction errors.
//!
//! Marshalling itself never fails; everything here happens while the registry is
//! being built from a manifest.

use thiserror::Error;

/// Result type used while building a registry.
pub type RegistryResult<T> = Result<T, RegistryError>;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum RegistryError {
    /// The manifest document could not be parsed.
    #[error("invalid manifest: {0}")]
    Manifest(String),

    /// The same type name was registered twice.
    #[error("duplicate type '{0}'")]
    DuplicateType(String),

    /// The same enum name was registered twice.
    #[error("duplicate enum '{0}'")]
    DuplicateEnum(String),

    /// A name was registered both as an enum and as a model type.
    #[error("'{0}' is registered as both an enum and a model type")]
    EnumModelConflict(String),

    /// Two attributes of one type share a wire or domain name.
    #[error("type '{type_name}' declares attribute '{attribute}' more than once")]
    DuplicateAttribute { type_name: String, attribute: String },

    /// A type name is empty or shadows a primitive tag, `Date` or an array form.
    #[error("reserved or empty type name '{0}'")]
    ReservedName(String),
}

impl RegistryError {
    pub fn manifest(msg: impl Into<String>) -> Self {
        Self::Manifest(msg.into())
    }

    pub fn duplicate_attribute(type_name: impl Into<String>, attribute: impl Into<String>) -> Self {
        Self::DuplicateAttribute {
            type_name: type_name.into(),
            attribute: attribute.into(),
        }
    }
}

impl From<serde_json::Error> for RegistryError {
    fn from(value: serde_json::Error) -> Self {
        Self::Manifest(value.to_string())
    }
}
