//! Error types shared by the codecs, entity mappers and schema validator.

/// A wire value could not be decoded into the expected domain shape.
///
/// This signals a contract mismatch between the client and the API (or a
/// corrupted payload) rather than an expected runtime condition.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    /// An enum string that is not a member of the closed set for `enum_name`.
    #[error("unknown {enum_name} value `{value}`")]
    UnknownEnumValue {
        enum_name: &'static str,
        value: String,
    },
    /// A non-null timestamp that is not valid ISO-8601.
    #[error("malformed timestamp `{value}`: {reason}")]
    MalformedTimestamp { value: String, reason: String },
    /// The JSON shape of an entity did not match its field table.
    ///
    /// Enum and timestamp failures inside an entity land here too, with the
    /// codec message carried by `source`.
    #[error("failed to map {entity}: {source}")]
    Entity {
        entity: &'static str,
        #[source]
        source: serde_json::Error,
    },
    /// An entity serialized to something other than a JSON object.
    #[error("{entity} did not map to a JSON object")]
    NotAnObject { entity: &'static str },
}

/// Caller-supplied parameters failed schema validation.
///
/// Validation stops at the first offending field in declaration order.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("invalid parameter `{field}`: {reason}")]
pub struct ValidationError {
    /// Name of the offending field, as declared in the schema.
    pub field: String,
    /// Human-readable reason.
    pub reason: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            reason: reason.into(),
        }
    }

    /// A required field was not supplied.
    pub fn missing(field: &str) -> Self {
        Self::new(field, "is required")
    }
}
