//! Immutable table of known domain types and their attribute descriptors.
//!
//! The registry is built once (from a builder or a generated JSON manifest) and is
//! read-only afterwards. Share it behind an `Arc`; lookups take `&self` only.

use std::collections::{HashMap, HashSet};

use serde::{Deserialize, Serialize};

use crate::error::{RegistryError, RegistryResult};
use crate::type_ref::{Primitive, TypeRef};

/// Mapping between one domain field and its wire field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttributeDescriptor {
    /// Field name on the wire (e.g. `client_id`).
    pub wire_name: String,

    /// Field name in the domain representation (e.g. `clientId`).
    pub domain_name: String,

    #[serde(rename = "type")]
    pub type_ref: TypeRef,
}

impl AttributeDescriptor {
    pub fn new(
        wire_name: impl Into<String>,
        domain_name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
    ) -> Self {
        Self {
            wire_name: wire_name.into(),
            domain_name: domain_name.into(),
            type_ref: type_ref.into(),
        }
    }
}

/// Descriptor of one domain type.
///
/// `discriminator` is the *wire* name of the field whose value names the concrete
/// type of a polymorphic value. Types without one are never re-resolved.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TypeDescriptor {
    name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    discriminator: Option<String>,

    #[serde(default)]
    attributes: Vec<AttributeDescriptor>,
}

impl TypeDescriptor {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            discriminator: None,
            attributes: Vec::new(),
        }
    }

    pub fn with_attribute(
        mut self,
        wire_name: impl Into<String>,
        domain_name: impl Into<String>,
        type_ref: impl Into<TypeRef>,
    ) -> Self {
        self.attributes
            .push(AttributeDescriptor::new(wire_name, domain_name, type_ref));
        self
    }

    pub fn with_discriminator(mut self, wire_name: impl Into<String>) -> Self {
        self.discriminator = Some(wire_name.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn attributes(&self) -> &[AttributeDescriptor] {
        &self.attributes
    }

    pub fn discriminator(&self) -> Option<&str> {
        self.discriminator.as_deref()
    }

    pub fn attribute_by_wire_name(&self, wire_name: &str) -> Option<&AttributeDescriptor> {
        self.attributes.iter().find(|a| a.wire_name == wire_name)
    }

    /// Domain-side name of the discriminator field.
    ///
    /// Falls back to the wire name when no attribute declares the discriminator.
    pub fn discriminator_domain_name(&self) -> Option<&str> {
        let wire_name = self.discriminator()?;
        Some(
            self.attribute_by_wire_name(wire_name)
                .map(|a| a.domain_name.as_str())
                .unwrap_or(wire_name),
        )
    }

    fn validate(&self) -> RegistryResult<()> {
        if is_reserved_name(&self.name) {
            return Err(RegistryError::ReservedName(self.name.clone()));
        }

        let mut wire = HashSet::new();
        let mut domain = HashSet::new();
        for attribute in &self.attributes {
            if !wire.insert(attribute.wire_name.as_str()) {
                return Err(RegistryError::duplicate_attribute(&self.name, &attribute.wire_name));
            }
            if !domain.insert(attribute.domain_name.as_str()) {
                return Err(RegistryError::duplicate_attribute(&self.name, &attribute.domain_name));
            }
        }
        Ok(())
    }
}

/// Generated manifest document: the external input a registry is built from.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RegistryManifest {
    #[serde(default)]
    pub types: Vec<TypeDescriptor>,

    #[serde(default)]
    pub enums: Vec<String>,
}

/// How a type reference marshals, as seen by a particular registry.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TypeKind<'r> {
    Primitive(Primitive),
    Date,
    Array(&'r TypeRef),
    Enum,
    Model(&'r TypeDescriptor),
    Unknown,
}

/// The immutable type registry.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    types: HashMap<String, TypeDescriptor>,
    enums: HashSet<String>,
}

impl TypeRegistry {
    pub fn builder() -> TypeRegistryBuilder {
        TypeRegistryBuilder::default()
    }

    /// A registry with no types: every named reference passes through.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_manifest(manifest: RegistryManifest) -> RegistryResult<Self> {
        TypeRegistryBuilder {
            types: manifest.types,
            enums: manifest.enums,
        }
        .build()
    }

    pub fn from_json(manifest: &str) -> RegistryResult<Self> {
        let manifest: RegistryManifest = serde_json::from_str(manifest)?;
        Self::from_manifest(manifest)
    }

    pub fn get(&self, name: &str) -> Option<&TypeDescriptor> {
        self.types.get(name)
    }

    /// Whether `name` is a registered model type.
    pub fn contains(&self, name: &str) -> bool {
        self.types.contains_key(name)
    }

    pub fn is_primitive(&self, name: &str) -> bool {
        Primitive::from_tag(name).is_some()
    }

    pub fn is_enum(&self, name: &str) -> bool {
        self.enums.contains(name)
    }

    pub fn classify<'r>(&'r self, type_ref: &'r TypeRef) -> TypeKind<'r> {
        match type_ref {
            TypeRef::Primitive(p) => TypeKind::Primitive(*p),
            TypeRef::Date => TypeKind::Date,
            TypeRef::Array(inner) => TypeKind::Array(inner),
            TypeRef::Named(name) if self.is_enum(name) => TypeKind::Enum,
            TypeRef::Named(name) => match self.get(name) {
                Some(descriptor) => TypeKind::Model(descriptor),
                None => TypeKind::Unknown,
            },
        }
    }

    pub fn len(&self) -> usize {
        self.types.len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.is_empty()
    }

    /// Registered model type names, sorted.
    pub fn type_names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.types.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

/// Single write path into a [`TypeRegistry`].
#[derive(Debug, Clone, Default)]
pub struct TypeRegistryBuilder {
    types: Vec<TypeDescriptor>,
    enums: Vec<String>,
}

impl TypeRegistryBuilder {
    pub fn model(mut self, descriptor: TypeDescriptor) -> Self {
        self.types.push(descriptor);
        self
    }

    pub fn enumeration(mut self, name: impl Into<String>) -> Self {
        self.enums.push(name.into());
        self
    }

    pub fn build(self) -> RegistryResult<TypeRegistry> {
        let mut enums = HashSet::with_capacity(self.enums.len());
        for name in self.enums {
            if is_reserved_name(&name) {
                return Err(RegistryError::ReservedName(name));
            }
            if enums.contains(&name) {
                return Err(RegistryError::DuplicateEnum(name));
            }
            enums.insert(name);
        }

        let mut types = HashMap::with_capacity(self.types.len());
        for descriptor in self.types {
            descriptor.validate()?;
            if enums.contains(descriptor.name()) {
                return Err(RegistryError::EnumModelConflict(descriptor.name.clone()));
            }
            if types.contains_key(descriptor.name()) {
                return Err(RegistryError::DuplicateType(descriptor.name.clone()));
            }
            types.insert(descriptor.name.clone(), descriptor);
        }

        tracing::debug!(types = types.len(), enums = enums.len(), "type registry built");

        Ok(TypeRegistry { types, enums })
    }
}

fn is_reserved_name(name: &str) -> bool {
    name.is_empty() || !matches!(TypeRef::parse(name), TypeRef::Named(_))
}
