//! Domain entities of the AbacatePay API and their wire mapping.
//!
//! Each entity is a plain struct whose serde attributes form its field table:
//! struct fields are snake_case, wire keys are camelCase, enum fields go through
//! [`codec::wire_enum`](crate::codec::wire_enum) and timestamps through
//! [`codec::timestamp`](crate::codec::timestamp). The [`Entity`] trait is the
//! single mapping engine that consumes those tables in both directions.
//!
//! Every field is optional: responses may be partial, missing keys decode to
//! `None` and unknown keys are discarded.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

use crate::error::DecodeError;

mod billing;
mod coupon;
mod customer;
mod mrr;
mod pagination;
mod pix;
mod store;
mod withdraw;

pub use billing::*;
pub use coupon::*;
pub use customer::*;
pub use mrr::*;
pub use pagination::*;
pub use pix::*;
pub use store::*;
pub use withdraw::*;

/// Free-form metadata attached to a resource.
///
/// Passed through structurally unchanged in both directions: keys keep the
/// casing they were given and insertion order is preserved.
pub type Metadata = Map<String, Value>;

/// Bidirectional mapping between a wire JSON object and a domain entity.
pub trait Entity: Serialize + DeserializeOwned {
    /// Entity name used in error messages.
    const NAME: &'static str;

    /// Maps a raw wire object to the domain entity.
    ///
    /// # Errors
    ///
    /// Returns [`DecodeError::Entity`] if a field has the wrong type, an enum
    /// value is outside its closed set, or a timestamp is malformed. Field
    /// failures are always reported through this variant, naming the entity:
    /// the codec error (e.g. [`DecodeError::UnknownEnumValue`]) survives only
    /// as the message of the wrapped `serde_json::Error`. Use
    /// [`codec::wire_enum::decode_value`](crate::codec::wire_enum::decode_value)
    /// on the raw field to get the typed variant.
    fn from_wire(raw: Value) -> Result<Self, DecodeError> {
        serde_json::from_value(raw).map_err(|source| DecodeError::Entity {
            entity: Self::NAME,
            source,
        })
    }

    /// Maps a raw wire array to a list of entities.
    fn from_wire_list(raw: Value) -> Result<Vec<Self>, DecodeError> {
        serde_json::from_value(raw).map_err(|source| DecodeError::Entity {
            entity: Self::NAME,
            source,
        })
    }

    /// Maps the entity to its wire object. `None` fields are emitted as `null`.
    fn to_wire(&self) -> Result<Map<String, Value>, DecodeError> {
        let value = serde_json::to_value(self).map_err(|source| DecodeError::Entity {
            entity: Self::NAME,
            source,
        })?;
        match value {
            Value::Object(map) => Ok(map),
            _ => Err(DecodeError::NotAnObject { entity: Self::NAME }),
        }
    }
}

/// Asserts that every key present in `expected` is reproduced in `actual`.
///
/// `actual` may carry extra keys (mapped fields that were absent come back as
/// `null`).
#[cfg(test)]
pub(crate) fn assert_wire_contains(expected: &Value, actual: &Value) {
    match (expected, actual) {
        (Value::Object(expected), Value::Object(actual)) => {
            for (key, value) in expected {
                let found = actual
                    .get(key)
                    .unwrap_or_else(|| panic!("missing wire key `{key}`"));
                assert_wire_contains(value, found);
            }
        }
        (Value::Array(expected), Value::Array(actual)) => {
            assert_eq!(expected.len(), actual.len());
            for (e, a) in expected.iter().zip(actual) {
                assert_wire_contains(e, a);
            }
        }
        (e, a) => assert_eq!(e, a),
    }
}
