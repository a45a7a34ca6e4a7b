//! `sso-client-core`: type registry and value model for the SSO API client.
//!
//! This crate contains **pure data** building blocks (no transport concerns):
//! type references, the immutable type registry, and the domain value model the
//! marshalling engine converts to and from the wire.

pub mod date;
pub mod error;
pub mod registry;
pub mod type_ref;
pub mod value;

pub use date::DateValue;
pub use error::{RegistryError, RegistryResult};
pub use registry::{
    AttributeDescriptor, RegistryManifest, TypeDescriptor, TypeKind, TypeRegistry,
    TypeRegistryBuilder,
};
pub use type_ref::{Primitive, TypeRef};
pub use value::{DomainObject, DomainValue};

/// Wire representation: untyped, self-describing JSON.
pub type WireValue = serde_json::Value;
