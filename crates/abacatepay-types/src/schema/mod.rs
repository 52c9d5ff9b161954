//! Declarative request schemas and the parameter validator.
//!
//! Every request-building operation declares its accepted fields as a static
//! `&[FieldSpec]` table. [`validate`] checks caller-supplied [`Params`] against
//! such a table before anything is sent: required fields must be present,
//! types must match exactly (no coercion), closed sets must contain the given
//! symbol, and nested entities are checked against their own tables.
//!
//! ```
//! use abacatepay_types::schema::{FieldKind, FieldSpec, Params, validate};
//!
//! const SCHEMA: &[FieldSpec] = &[
//!     FieldSpec::required("amount", FieldKind::Amount),
//!     FieldSpec::optional("description", FieldKind::String).max_length(37),
//! ];
//!
//! assert!(validate(SCHEMA, Params::new().with("amount", 10000)).is_ok());
//! let err = validate(SCHEMA, Params::new().with("amount", "10000")).unwrap_err();
//! assert_eq!(err.field, "amount");
//! ```

mod param;

pub use param::{Param, Params};

use serde_json::{Map, Value};

use crate::error::ValidationError;

/// The accepted type of a field.
#[derive(Debug, Clone, Copy)]
pub enum FieldKind {
    String,
    Boolean,
    /// Any integer.
    Integer,
    /// A non-negative integer amount, in cents.
    Amount,
    /// A free-form map.
    Metadata,
    /// One of a closed set of domain symbols.
    OneOf(&'static [&'static str]),
    /// A list whose every element has the given kind.
    ListOf(&'static FieldKind),
    /// A nested entity, validated against its own schema.
    Record {
        entity: &'static str,
        schema: &'static [FieldSpec],
    },
}

/// One entry of a request schema.
#[derive(Debug, Clone, Copy)]
pub struct FieldSpec {
    /// snake_case field name.
    pub name: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Value filled in when the field is absent.
    pub default: Option<fn() -> Param>,
    /// Maximum length in characters, for string fields.
    pub max_length: Option<usize>,
}

impl FieldSpec {
    pub const fn required(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: true,
            default: None,
            max_length: None,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldKind) -> Self {
        Self {
            name,
            kind,
            required: false,
            default: None,
            max_length: None,
        }
    }

    pub const fn with_default(mut self, default: fn() -> Param) -> Self {
        self.default = Some(default);
        self
    }

    pub const fn max_length(mut self, max_length: usize) -> Self {
        self.max_length = Some(max_length);
        self
    }
}

/// Validates `params` against `schema` and returns the normalized set.
///
/// Absent fields with a default get it filled in. A `null` value counts as
/// absent. Keys the schema does not declare are kept as they are. Fields are
/// checked in declaration order and the first failure is returned.
///
/// # Errors
///
/// Returns a [`ValidationError`] naming the offending field. Nested fields
/// are reported with a dotted path (`customer.tax_id`, `products[1].price`).
pub fn validate(schema: &[FieldSpec], mut params: Params) -> Result<Params, ValidationError> {
    for spec in schema {
        match params.get(spec.name).filter(|value| !value.is_null()) {
            Some(value) => check_field(spec, value)?,
            None => match spec.default {
                Some(default) => params.insert(spec.name, default()),
                None if spec.required => return Err(ValidationError::missing(spec.name)),
                None => {}
            },
        }
    }
    Ok(params)
}

fn check_field(spec: &FieldSpec, value: &Param) -> Result<(), ValidationError> {
    check_kind(spec.name, &spec.kind, value)?;
    if let (Some(max), Param::Str(s)) = (spec.max_length, value) {
        let len = s.chars().count();
        if len > max {
            return Err(ValidationError::new(
                spec.name,
                format!("must be at most {max} characters, got {len}"),
            ));
        }
    }
    Ok(())
}

fn check_kind(field: &str, kind: &FieldKind, value: &Param) -> Result<(), ValidationError> {
    let mismatch = |expected: &str| {
        ValidationError::new(
            field,
            format!("must be {expected}, got {}", value.describe()),
        )
    };
    match (kind, value) {
        (FieldKind::String, Param::Str(_))
        | (FieldKind::Boolean, Param::Bool(_))
        | (FieldKind::Integer, Param::Int(_))
        | (FieldKind::Metadata, Param::Map(_)) => Ok(()),
        (FieldKind::Amount, Param::Int(amount)) if *amount >= 0 => Ok(()),
        (FieldKind::Amount, Param::Int(amount)) => Err(ValidationError::new(
            field,
            format!("must be a non-negative integer, got {amount}"),
        )),
        (FieldKind::OneOf(symbols), Param::Symbol(symbol)) => {
            if symbols.iter().any(|candidate| *candidate == symbol.as_ref()) {
                Ok(())
            } else {
                Err(ValidationError::new(
                    field,
                    format!("must be one of {symbols:?}, got `{symbol}`"),
                ))
            }
        }
        (FieldKind::ListOf(element), Param::List(items)) => {
            for (index, item) in items.iter().enumerate() {
                check_kind(&format!("{field}[{index}]"), element, item)?;
            }
            Ok(())
        }
        (FieldKind::Record { entity, schema }, Param::Record { entity: got, wire })
            if got == entity =>
        {
            validate(schema, record_params(schema, wire))
                .map(|_| ())
                .map_err(|err| ValidationError::new(format!("{field}.{}", err.field), err.reason))
        }
        (FieldKind::Record { entity, .. }, Param::Unmappable { reason, .. }) => Err(
            ValidationError::new(field, format!("could not map {entity}: {reason}")),
        ),
        (FieldKind::String, _) => Err(mismatch("a string")),
        (FieldKind::Boolean, _) => Err(mismatch("a boolean")),
        (FieldKind::Integer, _) | (FieldKind::Amount, _) => Err(mismatch("an integer")),
        (FieldKind::Metadata, _) => Err(mismatch("a map")),
        (FieldKind::OneOf(_), _) => Err(mismatch("a symbol")),
        (FieldKind::ListOf(_), _) => Err(mismatch("a list")),
        (FieldKind::Record { entity, .. }, _) => Err(mismatch(&format!("a {entity}"))),
    }
}

/// Lifts a mapped entity back into parameters for nested validation.
///
/// Closed-set fields of an entity are encoded as upper-case wire strings, so
/// they are turned back into symbols here.
fn record_params(schema: &[FieldSpec], wire: &Map<String, Value>) -> Params {
    let mut params = Params::from_wire_object(wire);
    for spec in schema {
        if let FieldKind::OneOf(_) = spec.kind {
            if let Some(Param::Str(encoded)) = params.get(spec.name) {
                let symbol = Param::symbol(encoded.to_ascii_lowercase());
                params.insert(spec.name, symbol);
            }
        }
    }
    params
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::entities::{BillingFrequency, Customer, Metadata, PixKey, PixKeyType, Product};
    use serde_json::json;

    const CUSTOMER: &[FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("tax_id", FieldKind::String),
    ];

    const PRODUCT: &[FieldSpec] = &[
        FieldSpec::required("external_id", FieldKind::String),
        FieldSpec::required("quantity", FieldKind::Amount),
        FieldSpec::required("price", FieldKind::Amount),
    ];

    const BILLING: &[FieldSpec] = &[
        FieldSpec::required("frequency", FieldKind::OneOf(BillingFrequency::SYMBOLS)),
        FieldSpec::required(
            "products",
            FieldKind::ListOf(&FieldKind::Record {
                entity: "Product",
                schema: PRODUCT,
            }),
        ),
        FieldSpec::optional(
            "customer",
            FieldKind::Record {
                entity: "Customer",
                schema: CUSTOMER,
            },
        ),
        FieldSpec::optional("metadata", FieldKind::Metadata),
    ];

    const PIX: &[FieldSpec] = &[
        FieldSpec::required("amount", FieldKind::Amount),
        FieldSpec::optional("expires_in", FieldKind::Integer),
        FieldSpec::optional("description", FieldKind::String).max_length(37),
    ];

    fn pix_methods() -> Param {
        vec![Param::symbol("pix")].into()
    }

    fn billing_params() -> Params {
        Params::new()
            .with("frequency", BillingFrequency::OneTime)
            .with("products", vec![Product::new("p-1", "Plan", 1, 1000)])
    }

    #[test]
    fn test_integer_amount_passes() {
        let out = validate(PIX, Params::new().with("amount", 10000)).unwrap();
        assert_eq!(out.get("amount"), Some(&Param::Int(10000)));
    }

    #[test]
    fn test_string_amount_fails() {
        let err = validate(PIX, Params::new().with("amount", "10000")).unwrap_err();
        assert_eq!(err.field, "amount");
        assert_eq!(err.reason, "must be an integer, got a string");
    }

    #[test]
    fn test_float_amount_fails() {
        let err = validate(PIX, Params::new().with("amount", 100.5)).unwrap_err();
        assert_eq!(err.field, "amount");
    }

    #[test]
    fn test_negative_amount_fails() {
        let err = validate(PIX, Params::new().with("amount", -1)).unwrap_err();
        assert_eq!(err.field, "amount");
    }

    #[test]
    fn test_u64_amount_beyond_i64_fails() {
        let out = validate(PIX, Params::new().with("amount", i64::MAX as u64)).unwrap();
        assert_eq!(out.get("amount"), Some(&Param::Int(i64::MAX)));
        let err = validate(PIX, Params::new().with("amount", u64::MAX)).unwrap_err();
        assert_eq!(err.field, "amount");
        assert_eq!(err.reason, "must be an integer, got a float");
    }

    #[test]
    fn test_missing_required_field() {
        let err = validate(PIX, Params::new().with("description", "x")).unwrap_err();
        assert_eq!(err, ValidationError::missing("amount"));
    }

    #[test]
    fn test_null_counts_as_absent() {
        let err = validate(PIX, Params::new().with("amount", Param::Null)).unwrap_err();
        assert_eq!(err.field, "amount");
    }

    #[test]
    fn test_max_length() {
        let long = "x".repeat(38);
        let err = validate(PIX, Params::new().with("amount", 1).with("description", long))
            .unwrap_err();
        assert_eq!(err.field, "description");
        assert!(validate(PIX, Params::new().with("amount", 1).with("description", "x".repeat(37))).is_ok());
    }

    #[test]
    fn test_unknown_symbol_fails() {
        let params = billing_params().with("frequency", Param::symbol("invalid_frequency"));
        let err = validate(BILLING, params).unwrap_err();
        assert_eq!(err.field, "frequency");
        assert!(err.reason.contains("invalid_frequency"));
    }

    #[test]
    fn test_string_for_symbol_fails() {
        let params = billing_params().with("frequency", "ONE_TIME");
        let err = validate(BILLING, params).unwrap_err();
        assert_eq!(err.field, "frequency");
    }

    #[test]
    fn test_valid_billing_passes() {
        let params = billing_params()
            .with("customer", Customer::new("Ana", "11999990000", "ana@example.com", "12345678901"));
        assert!(validate(BILLING, params).is_ok());
    }

    #[test]
    fn test_raw_map_for_record_fails() {
        let mut raw = Metadata::new();
        raw.insert("name".into(), json!("Ana"));
        let err = validate(BILLING, billing_params().with("customer", raw)).unwrap_err();
        assert_eq!(err.field, "customer");
        assert_eq!(err.reason, "must be a Customer, got a map");
    }

    #[test]
    fn test_nested_record_is_validated() {
        let customer = Customer {
            name: Some("Ana".into()),
            ..Customer::default()
        };
        let err = validate(BILLING, billing_params().with("customer", customer)).unwrap_err();
        assert_eq!(err.field, "customer.tax_id");
        assert_eq!(err.reason, "is required");
    }

    #[test]
    fn test_list_elements_are_validated() {
        let products = vec![Param::from(Product::new("p-1", "Plan", 1, 1000)), Param::Int(3)];
        let err = validate(BILLING, billing_params().with("products", products)).unwrap_err();
        assert_eq!(err.field, "products[1]");
    }

    #[test]
    fn test_nested_closed_set_is_checked() {
        const PIX_KEY: &[FieldSpec] = &[
            FieldSpec::required("type", FieldKind::OneOf(&["cpf", "email"])),
            FieldSpec::required("key", FieldKind::String),
        ];
        const WITHDRAW: &[FieldSpec] = &[FieldSpec::required(
            "pix",
            FieldKind::Record {
                entity: "PixKey",
                schema: PIX_KEY,
            },
        )];
        let ok = Params::new().with("pix", PixKey::new(PixKeyType::Cpf, "12345678901"));
        assert!(validate(WITHDRAW, ok).is_ok());
        let bad = Params::new().with("pix", PixKey::new(PixKeyType::Random, "abc"));
        assert_eq!(validate(WITHDRAW, bad).unwrap_err().field, "pix.type");
    }

    #[test]
    fn test_default_is_filled() {
        const SCHEMA: &[FieldSpec] = &[FieldSpec::optional(
            "methods",
            FieldKind::ListOf(&FieldKind::OneOf(&["pix", "card"])),
        )
        .with_default(pix_methods)];
        let out = validate(SCHEMA, Params::new()).unwrap();
        assert_eq!(out.get("methods"), Some(&pix_methods()));
    }

    #[test]
    fn test_unknown_keys_are_kept() {
        let out = validate(PIX, Params::new().with("amount", 1).with("extra", true)).unwrap();
        assert_eq!(out.get("extra"), Some(&Param::Bool(true)));
    }

    #[test]
    fn test_into_wire_body() {
        let mut metadata = Metadata::new();
        metadata.insert("order_ref".into(), json!("A-1"));
        metadata.insert("note".into(), json!(null));
        let body = billing_params()
            .with("customer", Customer::new("Ana", "11999990000", "ana@example.com", "123"))
            .with("return_url", Param::Null)
            .with("metadata", metadata)
            .into_wire_body();
        assert_eq!(
            serde_json::Value::Object(body),
            json!({
                "frequency": "ONE_TIME",
                "products": [{"externalId": "p-1", "name": "Plan", "quantity": 1, "price": 1000}],
                "customer": {
                    "name": "Ana",
                    "cellphone": "11999990000",
                    "email": "ana@example.com",
                    "taxId": "123"
                },
                "metadata": {"order_ref": "A-1", "note": null}
            })
        );
    }
}
