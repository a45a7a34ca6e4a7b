//! Reading the discriminator field from either side of the conversion.

use serde_json::Value;
use sso_client_core::{DomainValue, TypeDescriptor};

/// Data that may carry a discriminator field.
///
/// Wire data is read by the discriminator's wire name; domain data by the
/// domain name of the attribute that declares it.
pub trait DiscriminatorSource {
    /// `true` for null/missing data, which never re-resolves a type.
    fn is_absent(&self) -> bool;

    /// The discriminator's string value, if present.
    fn discriminator_value<'a>(&'a self, descriptor: &TypeDescriptor) -> Option<&'a str>;

    /// Type the data already knows it is, e.g. a previously decoded instance.
    fn recorded_type_name(&self) -> Option<&str> {
        None
    }
}

impl DiscriminatorSource for Value {
    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn discriminator_value<'a>(&'a self, descriptor: &TypeDescriptor) -> Option<&'a str> {
        let field = descriptor.discriminator()?;
        self.as_object()?.get(field)?.as_str()
    }
}

impl DiscriminatorSource for DomainValue {
    fn is_absent(&self) -> bool {
        self.is_null()
    }

    fn discriminator_value<'a>(&'a self, descriptor: &TypeDescriptor) -> Option<&'a str> {
        let field = descriptor.discriminator_domain_name()?;
        self.field(field)?.as_str()
    }

    fn recorded_type_name(&self) -> Option<&str> {
        self.as_object().map(|object| object.type_name())
    }
}

impl<T: DiscriminatorSource> DiscriminatorSource for Option<T> {
    fn is_absent(&self) -> bool {
        self.as_ref().is_none_or(DiscriminatorSource::is_absent)
    }

    fn discriminator_value<'a>(&'a self, descriptor: &TypeDescriptor) -> Option<&'a str> {
        self.as_ref()?.discriminator_value(descriptor)
    }

    fn recorded_type_name(&self) -> Option<&str> {
        self.as_ref()?.recorded_type_name()
    }
}
