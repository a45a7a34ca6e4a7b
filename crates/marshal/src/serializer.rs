//! Registry-driven conversion between domain values and wire values.
//!
//! Both directions are pure and recursive over the type reference. Neither ever
//! fails: unknown types, missing data and unexpected shapes pass through
//! structurally, and a discriminator that names nothing known falls back to the
//! statically expected type.

use std::sync::Arc;

use serde_json::{Map, Value};
use sso_client_core::{
    DateValue, DomainObject, DomainValue, TypeDescriptor, TypeKind, TypeRef, TypeRegistry,
    WireValue,
};

use crate::discriminator::DiscriminatorSource;

/// Marshalling engine bound to one immutable registry.
///
/// Cloning is cheap (the registry is shared), and a single instance may be used
/// from any number of threads at once.
#[derive(Debug, Clone)]
pub struct ObjectSerializer {
    registry: Arc<TypeRegistry>,
}

impl ObjectSerializer {
    pub fn new(registry: Arc<TypeRegistry>) -> Self {
        Self { registry }
    }

    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Resolve the concrete type of `data` given the statically expected type.
    ///
    /// Only registered model types with a discriminator can resolve to something
    /// else, and only to another registered model type.
    pub fn find_correct_type<D>(&self, data: &D, expected: &TypeRef) -> TypeRef
    where
        D: DiscriminatorSource + ?Sized,
    {
        match self.registry.classify(expected) {
            TypeKind::Model(descriptor) => TypeRef::named(self.resolve(data, descriptor).name()),
            _ => expected.clone(),
        }
    }

    /// Domain → wire.
    pub fn serialize(&self, value: &DomainValue, type_ref: &TypeRef) -> WireValue {
        if value.is_null() {
            return Value::Null;
        }

        match self.registry.classify(type_ref) {
            TypeKind::Primitive(_) | TypeKind::Enum => value.to_wire(),
            TypeKind::Unknown => {
                tracing::trace!(type_ref = %type_ref, "unregistered type; passing through");
                value.to_wire()
            }
            TypeKind::Array(inner) => match value {
                DomainValue::Array(items) => Value::Array(
                    items.iter().map(|item| self.serialize(item, inner)).collect(),
                ),
                other => other.to_wire(),
            },
            TypeKind::Date => match value {
                DomainValue::Date(date) => date.to_wire(),
                other => other.to_wire(),
            },
            TypeKind::Model(descriptor) => {
                let descriptor = self.resolve(value, descriptor);
                match value {
                    DomainValue::Object(_) | DomainValue::Map(_) => {
                        Value::Object(self.serialize_fields(value, descriptor))
                    }
                    other => other.to_wire(),
                }
            }
        }
    }

    /// Wire → domain.
    pub fn deserialize(&self, value: &WireValue, type_ref: &TypeRef) -> DomainValue {
        if value.is_null() {
            return DomainValue::Null;
        }

        match self.registry.classify(type_ref) {
            TypeKind::Primitive(_) | TypeKind::Enum => DomainValue::from_wire(value),
            TypeKind::Unknown => {
                tracing::trace!(type_ref = %type_ref, "unregistered type; passing through");
                DomainValue::from_wire(value)
            }
            TypeKind::Array(inner) => match value {
                Value::Array(items) => DomainValue::Array(
                    items.iter().map(|item| self.deserialize(item, inner)).collect(),
                ),
                other => DomainValue::from_wire(other),
            },
            TypeKind::Date => DomainValue::Date(DateValue::from_wire(value)),
            TypeKind::Model(descriptor) => {
                let descriptor = self.resolve(value, descriptor);
                match value {
                    Value::Object(fields) => {
                        DomainValue::Object(self.deserialize_fields(fields, descriptor))
                    }
                    other => DomainValue::from_wire(other),
                }
            }
        }
    }

    /// [`serialize`](Self::serialize) with a type reference in its string form.
    pub fn serialize_as(&self, value: &DomainValue, type_ref: &str) -> WireValue {
        self.serialize(value, &TypeRef::parse(type_ref))
    }

    /// [`deserialize`](Self::deserialize) with a type reference in its string form.
    pub fn deserialize_as(&self, value: &WireValue, type_ref: &str) -> DomainValue {
        self.deserialize(value, &TypeRef::parse(type_ref))
    }

    fn resolve<'r, D>(&'r self, data: &D, expected: &'r TypeDescriptor) -> &'r TypeDescriptor
    where
        D: DiscriminatorSource + ?Sized,
    {
        if data.is_absent() || expected.discriminator().is_none() {
            return expected;
        }

        match data.discriminator_value(expected) {
            Some(tag) if !tag.is_empty() => match self.registry.get(tag) {
                Some(resolved) => {
                    if resolved.name() != expected.name() {
                        tracing::trace!(
                            expected = expected.name(),
                            resolved = resolved.name(),
                            "discriminator selected subtype"
                        );
                    }
                    resolved
                }
                None => {
                    tracing::debug!(
                        expected = expected.name(),
                        discriminator = tag,
                        "discriminator names an unregistered type; using expected type"
                    );
                    expected
                }
            },
            // No discriminator on the data: keep the subtype an instance was decoded as.
            _ => match data.recorded_type_name().and_then(|name| self.registry.get(name)) {
                Some(recorded) => recorded,
                None => expected,
            },
        }
    }

    fn serialize_fields(&self, value: &DomainValue, descriptor: &TypeDescriptor) -> Map<String, Value> {
        let mut out = Map::with_capacity(descriptor.attributes().len());
        for attribute in descriptor.attributes() {
            if let Some(field) = value.field(&attribute.domain_name) {
                out.insert(
                    attribute.wire_name.clone(),
                    self.serialize(field, &attribute.type_ref),
                );
            }
        }
        out
    }

    fn deserialize_fields(&self, fields: &Map<String, Value>, descriptor: &TypeDescriptor) -> DomainObject {
        let mut instance = DomainObject::new(descriptor.name());
        for attribute in descriptor.attributes() {
            if let Some(field) = fields.get(&attribute.wire_name) {
                instance.set(
                    attribute.domain_name.clone(),
                    self.deserialize(field, &attribute.type_ref),
                );
            }
        }
        instance
    }
}
