//! `sso-client-marshal`: marshalling engine.
//!
//! Converts between [`DomainValue`](sso_client_core::DomainValue)s and wire JSON,
//! consulting a shared [`TypeRegistry`](sso_client_core::TypeRegistry) for field
//! renames, nested types and discriminator-based subtype resolution.

pub mod discriminator;
pub mod serializer;

pub use discriminator::DiscriminatorSource;
pub use serializer::ObjectSerializer;
