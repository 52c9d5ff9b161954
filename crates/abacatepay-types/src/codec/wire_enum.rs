//! Closed enum sets encoded as upper-snake-case strings on the wire.
//!
//! Every enumerated field of the API (statuses, kinds, methods) is backed by a
//! Rust enum declared with [`wire_enum!`](crate::wire_enum). Decoding resolves a
//! wire string against the enum's fixed member list and fails with
//! [`DecodeError::UnknownEnumValue`] on anything else, so a status introduced
//! server-side surfaces as an error instead of being miscategorized.

use serde_json::Value;

use crate::error::DecodeError;

/// A closed set of symbolic values with an upper-snake-case wire form.
///
/// `symbol` is the lower snake_case name (`"one_time"`), the wire form is its
/// uppercase (`"ONE_TIME"`).
pub trait WireEnum: Sized + Copy + PartialEq + 'static {
    /// Human-readable name of the set, used in error messages.
    const NAME: &'static str;
    /// Every member of the set.
    const MEMBERS: &'static [Self];

    /// The domain symbol of this member.
    fn symbol(self) -> &'static str;

    /// Resolves a wire string to a member of the set.
    ///
    /// The input is lowercased and `-`, `.` and spaces are folded into `_`
    /// before matching, so `"ONE_TIME"`, `"one_time"` and `"one-time"` all
    /// resolve to the same member.
    fn decode(wire: &str) -> Result<Self, DecodeError> {
        let symbol = normalize(wire);
        Self::MEMBERS
            .iter()
            .copied()
            .find(|member| member.symbol() == symbol)
            .ok_or_else(|| DecodeError::UnknownEnumValue {
                enum_name: Self::NAME,
                value: wire.to_string(),
            })
    }

    /// The upper-snake-case wire string.
    fn encode(self) -> String {
        self.symbol().to_ascii_uppercase()
    }
}

fn normalize(wire: &str) -> String {
    wire.trim()
        .chars()
        .map(|c| match c {
            '-' | '.' | ' ' => '_',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Decodes an arbitrary JSON value. Anything that is not a string is "no value".
pub fn decode_value<T: WireEnum>(raw: &Value) -> Result<Option<T>, DecodeError> {
    match raw {
        Value::String(s) => T::decode(s).map(Some),
        _ => Ok(None),
    }
}

/// Encodes an optional member; `None` becomes JSON `null`.
pub fn encode_value<T: WireEnum>(value: Option<T>) -> Value {
    value.map_or(Value::Null, |v| Value::String(v.encode()))
}

/// Serde adaptor for `Option<T>` enum fields.
///
/// Use as `#[serde(default, with = "crate::codec::wire_enum::option")]`.
pub mod option {
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::{WireEnum, decode_value};

    pub fn serialize<T, S>(value: &Option<T>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: WireEnum,
        S: Serializer,
    {
        match value {
            Some(v) => serializer.serialize_str(&v.encode()),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
    where
        T: WireEnum,
        D: Deserializer<'de>,
    {
        let raw = Value::deserialize(deserializer)?;
        decode_value(&raw).map_err(serde::de::Error::custom)
    }
}

/// Serde adaptor for `Option<Vec<T>>` enum list fields.
///
/// A non-array value decodes to `None`. Inside an array every element must be
/// a member string; any other element fails the whole list.
pub mod option_vec {
    use serde::ser::SerializeSeq;
    use serde::{Deserialize, Deserializer, Serializer};
    use serde_json::Value;

    use super::WireEnum;

    pub fn serialize<T, S>(value: &Option<Vec<T>>, serializer: S) -> Result<S::Ok, S::Error>
    where
        T: WireEnum,
        S: Serializer,
    {
        match value {
            Some(members) => {
                let mut seq = serializer.serialize_seq(Some(members.len()))?;
                for member in members {
                    seq.serialize_element(&member.encode())?;
                }
                seq.end()
            }
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, T, D>(deserializer: D) -> Result<Option<Vec<T>>, D::Error>
    where
        T: WireEnum,
        D: Deserializer<'de>,
    {
        match Value::deserialize(deserializer)? {
            Value::Array(items) => items
                .iter()
                .map(|item| match item.as_str() {
                    Some(wire) => T::decode(wire).map_err(serde::de::Error::custom),
                    None => Err(serde::de::Error::custom(format_args!(
                        "expected a {} string, got `{item}`",
                        T::NAME
                    ))),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(Some),
            _ => Ok(None),
        }
    }
}

/// Declares a closed wire enum.
///
/// Generates the enum together with [`WireEnum`], `Display` (the symbol),
/// `FromStr`, serde impls (the wire string), a `SYMBOLS` table for schema
/// declarations and a conversion into [`Param`](crate::schema::Param) so
/// members can be passed as request parameters.
///
/// ```
/// abacatepay_types::wire_enum! {
///     /// Traffic light colour.
///     pub enum Light {
///         Red => "red",
///         AmberFlashing => "amber_flashing",
///     }
/// }
///
/// use abacatepay_types::codec::WireEnum;
/// assert_eq!(Light::decode("AMBER_FLASHING").unwrap(), Light::AmberFlashing);
/// assert_eq!(Light::Red.encode(), "RED");
/// ```
#[macro_export]
macro_rules! wire_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $( $(#[$vmeta:meta])* $variant:ident => $symbol:literal ),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        $vis enum $name {
            $( $(#[$vmeta])* $variant ),+
        }

        impl $name {
            /// Domain symbols of every member, in declaration order.
            pub const SYMBOLS: &'static [&'static str] = &[ $( $symbol ),+ ];
        }

        impl $crate::codec::WireEnum for $name {
            const NAME: &'static str = stringify!($name);
            const MEMBERS: &'static [Self] = &[ $( Self::$variant ),+ ];

            fn symbol(self) -> &'static str {
                match self {
                    $( Self::$variant => $symbol ),+
                }
            }
        }

        impl ::std::fmt::Display for $name {
            fn fmt(&self, f: &mut ::std::fmt::Formatter<'_>) -> ::std::fmt::Result {
                f.write_str($crate::codec::WireEnum::symbol(*self))
            }
        }

        impl ::std::str::FromStr for $name {
            type Err = $crate::error::DecodeError;

            fn from_str(s: &str) -> ::std::result::Result<Self, Self::Err> {
                <Self as $crate::codec::WireEnum>::decode(s)
            }
        }

        impl $crate::__serde::Serialize for $name {
            fn serialize<S: $crate::__serde::Serializer>(
                &self,
                serializer: S,
            ) -> ::std::result::Result<S::Ok, S::Error> {
                serializer.serialize_str(&$crate::codec::WireEnum::encode(*self))
            }
        }

        impl<'de> $crate::__serde::Deserialize<'de> for $name {
            fn deserialize<D: $crate::__serde::Deserializer<'de>>(
                deserializer: D,
            ) -> ::std::result::Result<Self, D::Error> {
                let wire = <::std::string::String as $crate::__serde::Deserialize>::deserialize(deserializer)?;
                <Self as $crate::codec::WireEnum>::decode(&wire).map_err($crate::__serde::de::Error::custom)
            }
        }

        impl ::std::convert::From<$name> for $crate::schema::Param {
            fn from(value: $name) -> Self {
                $crate::schema::Param::symbol($crate::codec::WireEnum::symbol(value))
            }
        }
    };
}
