//! Domain-side values.
//!
//! [`DomainValue`] is what application code builds before a request and what
//! response decoding hands back. Typed objects carry the name of the type they
//! were built from, so a polymorphic value remembers its resolved subtype.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde_json::{Map, Number, Value};

use crate::date::DateValue;

/// Typed in-memory value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum DomainValue {
    #[default]
    Null,
    Bool(bool),
    Number(Number),
    String(String),
    Date(DateValue),
    Array(Vec<DomainValue>),
    /// Untyped map (passthrough data, `any` fields).
    Map(BTreeMap<String, DomainValue>),
    /// Instance of a registered type, fields keyed by domain name.
    Object(DomainObject),
}

impl DomainValue {
    /// Structural lift of a wire value, with no type information applied.
    pub fn from_wire(value: &Value) -> Self {
        match value {
            Value::Null => DomainValue::Null,
            Value::Bool(b) => DomainValue::Bool(*b),
            Value::Number(n) => DomainValue::Number(n.clone()),
            Value::String(s) => DomainValue::String(s.clone()),
            Value::Array(items) => DomainValue::Array(items.iter().map(Self::from_wire).collect()),
            Value::Object(map) => DomainValue::Map(
                map.iter()
                    .map(|(k, v)| (k.clone(), Self::from_wire(v)))
                    .collect(),
            ),
        }
    }

    /// Structural lowering to a wire value, with no type information applied.
    ///
    /// Objects lower to maps keyed by their domain field names.
    pub fn to_wire(&self) -> Value {
        match self {
            DomainValue::Null => Value::Null,
            DomainValue::Bool(b) => Value::Bool(*b),
            DomainValue::Number(n) => Value::Number(n.clone()),
            DomainValue::String(s) => Value::String(s.clone()),
            DomainValue::Date(d) => d.to_wire(),
            DomainValue::Array(items) => Value::Array(items.iter().map(Self::to_wire).collect()),
            DomainValue::Map(map) => Value::Object(lower_fields(map)),
            DomainValue::Object(obj) => Value::Object(lower_fields(&obj.fields)),
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, DomainValue::Null)
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            DomainValue::String(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            DomainValue::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            DomainValue::Number(n) => n.as_i64(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            DomainValue::Number(n) => n.as_f64(),
            _ => None,
        }
    }

    pub fn as_date(&self) -> Option<&DateValue> {
        match self {
            DomainValue::Date(d) => Some(d),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[DomainValue]> {
        match self {
            DomainValue::Array(items) => Some(items),
            _ => None,
        }
    }

    pub fn as_object(&self) -> Option<&DomainObject> {
        match self {
            DomainValue::Object(obj) => Some(obj),
            _ => None,
        }
    }

    /// Field lookup on objects and untyped maps.
    pub fn field(&self, name: &str) -> Option<&DomainValue> {
        match self {
            DomainValue::Object(obj) => obj.get(name),
            DomainValue::Map(map) => map.get(name),
            _ => None,
        }
    }
}

fn lower_fields(fields: &BTreeMap<String, DomainValue>) -> Map<String, Value> {
    fields
        .iter()
        .map(|(k, v)| (k.clone(), v.to_wire()))
        .collect()
}

impl From<Value> for DomainValue {
    fn from(value: Value) -> Self {
        DomainValue::from_wire(&value)
    }
}

impl From<bool> for DomainValue {
    fn from(value: bool) -> Self {
        DomainValue::Bool(value)
    }
}

impl From<i32> for DomainValue {
    fn from(value: i32) -> Self {
        DomainValue::Number(value.into())
    }
}

impl From<i64> for DomainValue {
    fn from(value: i64) -> Self {
        DomainValue::Number(value.into())
    }
}

impl From<u64> for DomainValue {
    fn from(value: u64) -> Self {
        DomainValue::Number(value.into())
    }
}

/// Non-finite floats have no wire form and become `Null`.
impl From<f64> for DomainValue {
    fn from(value: f64) -> Self {
        Number::from_f64(value)
            .map(DomainValue::Number)
            .unwrap_or(DomainValue::Null)
    }
}

impl From<&str> for DomainValue {
    fn from(value: &str) -> Self {
        DomainValue::String(value.to_string())
    }
}

impl From<String> for DomainValue {
    fn from(value: String) -> Self {
        DomainValue::String(value)
    }
}

impl From<DateTime<Utc>> for DomainValue {
    fn from(value: DateTime<Utc>) -> Self {
        DomainValue::Date(value.into())
    }
}

impl From<DateValue> for DomainValue {
    fn from(value: DateValue) -> Self {
        DomainValue::Date(value)
    }
}

impl From<DomainObject> for DomainValue {
    fn from(value: DomainObject) -> Self {
        DomainValue::Object(value)
    }
}

impl<T: Into<DomainValue>> From<Vec<T>> for DomainValue {
    fn from(value: Vec<T>) -> Self {
        DomainValue::Array(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<DomainValue>> From<Option<T>> for DomainValue {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(DomainValue::Null)
    }
}

/// Instance of a registered type.
///
/// A field that was never set is *absent*, which is distinct from a field set
/// to [`DomainValue::Null`]: absent fields are left off the wire entirely.
#[derive(Debug, Clone, PartialEq)]
pub struct DomainObject {
    type_name: String,
    fields: BTreeMap<String, DomainValue>,
}

impl DomainObject {
    /// New, empty instance of `type_name`.
    pub fn new(type_name: impl Into<String>) -> Self {
        Self {
            type_name: type_name.into(),
            fields: BTreeMap::new(),
        }
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<DomainValue>) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<DomainValue>) {
        self.fields.insert(field.into(), value.into());
    }

    pub fn remove(&mut self, field: &str) -> Option<DomainValue> {
        self.fields.remove(field)
    }

    pub fn get(&self, field: &str) -> Option<&DomainValue> {
        self.fields.get(field)
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn fields(&self) -> &BTreeMap<String, DomainValue> {
        &self.fields
    }

    pub fn into_fields(self) -> BTreeMap<String, DomainValue> {
        self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn structural_lift_and_lower_are_inverse() {
        let wire = json!({
            "id": 7,
            "tags": ["a", "b"],
            "nested": { "ok": true, "ratio": 0.5 },
            "missing": null
        });
        let domain = DomainValue::from_wire(&wire);
        assert!(matches!(domain, DomainValue::Map(_)));
        assert_eq!(domain.to_wire(), wire);
    }

    #[test]
    fn large_integers_survive_the_lift() {
        let wire = json!(u64::MAX);
        assert_eq!(DomainValue::from_wire(&wire).to_wire(), wire);
    }

    #[test]
    fn absent_and_null_fields_are_distinct() {
        let obj = DomainObject::new("ResponseUser").with("name", DomainValue::Null);
        assert_eq!(obj.get("name"), Some(&DomainValue::Null));
        assert_eq!(obj.get("email"), None);
    }

    #[test]
    fn non_finite_floats_become_null() {
        assert_eq!(DomainValue::from(f64::NAN), DomainValue::Null);
        assert_eq!(DomainValue::from(1.5).as_f64(), Some(1.5));
    }

    #[test]
    fn objects_lower_by_domain_name() {
        let obj = DomainObject::new("ResponseClient").with("redirectUri", "http://x/");
        assert_eq!(
            DomainValue::from(obj).to_wire(),
            json!({ "redirectUri": "http://x/" })
        );
    }
}
