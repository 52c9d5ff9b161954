use std::borrow::Cow;

use serde_json::{Map, Number, Value};

use crate::codec::case::{camel_to_snake, snake_to_camel};
use crate::entities::{Customer, Entity, Metadata, PixKey, Product};

/// A single caller-supplied request parameter.
///
/// Parameters are loosely typed on purpose: the schema validator decides
/// whether a value is acceptable for the field it is bound to, and reports
/// the mismatch instead of coercing.
#[derive(Debug, Clone, PartialEq)]
pub enum Param {
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Str(String),
    /// A domain symbol such as `one_time`. Encoded upper-cased on the wire.
    Symbol(Cow<'static, str>),
    List(Vec<Param>),
    /// Free-form map, passed through unchanged (used for `metadata`).
    Map(Metadata),
    /// An entity already mapped to its wire object.
    Record {
        entity: &'static str,
        wire: Map<String, Value>,
    },
    /// An entity that could not be mapped. Always rejected by validation.
    Unmappable { entity: &'static str, reason: String },
}

impl Param {
    /// A domain symbol, the Rust counterpart of a bare enum literal.
    pub fn symbol(symbol: impl Into<Cow<'static, str>>) -> Self {
        Param::Symbol(symbol.into())
    }

    /// Maps an entity into a record parameter.
    pub fn entity<E: Entity>(entity: &E) -> Self {
        match entity.to_wire() {
            Ok(wire) => Param::Record {
                entity: E::NAME,
                wire,
            },
            Err(err) => Param::Unmappable {
                entity: E::NAME,
                reason: err.to_string(),
            },
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Param::Null)
    }

    /// Short description of the value's type, used in validation messages.
    pub(crate) fn describe(&self) -> Cow<'static, str> {
        match self {
            Param::Null => "null".into(),
            Param::Bool(_) => "a boolean".into(),
            Param::Int(_) => "an integer".into(),
            Param::Float(_) => "a float".into(),
            Param::Str(_) => "a string".into(),
            Param::Symbol(_) => "a symbol".into(),
            Param::List(_) => "a list".into(),
            Param::Map(_) => "a map".into(),
            Param::Record { entity, .. } | Param::Unmappable { entity, .. } => {
                format!("a {entity}").into()
            }
        }
    }

    /// Lifts a wire JSON value back into a parameter.
    ///
    /// Objects become [`Param::Map`] since their entity is unknown.
    pub fn from_wire_value(value: Value) -> Self {
        match value {
            Value::Null => Param::Null,
            Value::Bool(b) => Param::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Param::Int(i),
                None => n.as_f64().map_or(Param::Null, Param::Float),
            },
            Value::String(s) => Param::Str(s),
            Value::Array(items) => {
                Param::List(items.into_iter().map(Param::from_wire_value).collect())
            }
            Value::Object(map) => Param::Map(map),
        }
    }

    /// Encodes the parameter as a wire JSON value.
    pub fn into_wire_value(self) -> Value {
        match self {
            Param::Null | Param::Unmappable { .. } => Value::Null,
            Param::Bool(b) => Value::Bool(b),
            Param::Int(i) => Value::Number(i.into()),
            Param::Float(f) => Number::from_f64(f).map_or(Value::Null, Value::Number),
            Param::Str(s) => Value::String(s),
            Param::Symbol(s) => Value::String(s.to_ascii_uppercase()),
            Param::List(items) => {
                Value::Array(items.into_iter().map(Param::into_wire_value).collect())
            }
            Param::Map(map) => Value::Object(map),
            Param::Record { wire, .. } => Value::Object(strip_nulls(wire)),
        }
    }
}

/// Drops `null` entries from a mapped entity, recursing into nested objects
/// except under `metadata`.
fn strip_nulls(map: Map<String, Value>) -> Map<String, Value> {
    map.into_iter()
        .filter(|(_, value)| !value.is_null())
        .map(|(key, value)| match value {
            Value::Object(inner) if key != "metadata" => (key, Value::Object(strip_nulls(inner))),
            other => (key, other),
        })
        .collect()
}

impl From<bool> for Param {
    fn from(value: bool) -> Self {
        Param::Bool(value)
    }
}

impl From<i32> for Param {
    fn from(value: i32) -> Self {
        Param::Int(value.into())
    }
}

impl From<i64> for Param {
    fn from(value: i64) -> Self {
        Param::Int(value)
    }
}

impl From<u32> for Param {
    fn from(value: u32) -> Self {
        Param::Int(value.into())
    }
}

impl From<u64> for Param {
    /// Values above `i64::MAX` become [`Param::Float`] so integer fields
    /// reject them.
    fn from(value: u64) -> Self {
        match i64::try_from(value) {
            Ok(int) => Param::Int(int),
            Err(_) => Param::Float(value as f64),
        }
    }
}

impl From<f64> for Param {
    fn from(value: f64) -> Self {
        Param::Float(value)
    }
}

impl From<&str> for Param {
    fn from(value: &str) -> Self {
        Param::Str(value.to_string())
    }
}

impl From<String> for Param {
    fn from(value: String) -> Self {
        Param::Str(value)
    }
}

impl From<Metadata> for Param {
    fn from(value: Metadata) -> Self {
        Param::Map(value)
    }
}

impl From<Value> for Param {
    fn from(value: Value) -> Self {
        Param::from_wire_value(value)
    }
}

impl<T: Into<Param>> From<Vec<T>> for Param {
    fn from(value: Vec<T>) -> Self {
        Param::List(value.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map_or(Param::Null, Into::into)
    }
}

impl From<Customer> for Param {
    fn from(value: Customer) -> Self {
        Param::entity(&value)
    }
}

impl From<Product> for Param {
    fn from(value: Product) -> Self {
        Param::entity(&value)
    }
}

impl From<PixKey> for Param {
    fn from(value: PixKey) -> Self {
        Param::entity(&value)
    }
}

/// An ordered set of named request parameters, keyed by snake_case name.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params(Vec<(String, Param)>);

impl Params {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style [`insert`](Self::insert).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Param>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets `key`, replacing an earlier value in place.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Param>) {
        let key = key.into();
        let value = value.into();
        match self.0.iter_mut().find(|(k, _)| *k == key) {
            Some((_, slot)) => *slot = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn get(&self, key: &str) -> Option<&Param> {
        self.0.iter().find(|(k, _)| k == key).map(|(_, v)| v)
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Param)> {
        self.0.iter().map(|(k, v)| (k.as_str(), v))
    }

    /// Rebuilds parameters from a wire object, converting keys to snake_case.
    pub fn from_wire_object(wire: &Map<String, Value>) -> Self {
        wire.iter()
            .map(|(key, value)| (camel_to_snake(key), Param::from_wire_value(value.clone())))
            .collect()
    }

    /// Builds the JSON request body.
    ///
    /// Keys are converted to camelCase and `null` values are left out. The
    /// contents of map parameters are not touched.
    pub fn into_wire_body(self) -> Map<String, Value> {
        self.0
            .into_iter()
            .filter_map(|(key, param)| {
                let value = param.into_wire_value();
                (!value.is_null()).then(|| (snake_to_camel(&key), value))
            })
            .collect()
    }
}

impl<K: Into<String>, V: Into<Param>> FromIterator<(K, V)> for Params {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut params = Params::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

impl IntoIterator for Params {
    type Item = (String, Param);
    type IntoIter = std::vec::IntoIter<(String, Param)>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}
