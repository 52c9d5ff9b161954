#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Wire and domain types for the [AbacatePay](https://abacatepay.com) API.
//!
//! This crate holds everything in the AbacatePay client that does not touch the
//! network: converting between the JSON wire representation and the Rust domain
//! model, validating caller-supplied request parameters, and checking webhook
//! signatures. The HTTP client itself lives in the `abacatepay` crate.
//!
//! # Modules
//!
//! - [`codec`] - Enum and timestamp codecs plus snake_case/camelCase key conversion
//! - [`entities`] - Domain entities (billing, PIX charge, withdraw, coupon, ...) and their wire mapping
//! - [`schema`] - Declarative request schemas and the parameter validator
//! - [`webhook`] - HMAC-SHA256 webhook signature verification
//! - [`error`] - [`DecodeError`](error::DecodeError) and [`ValidationError`](error::ValidationError)
//!
//! # Wire Format
//!
//! The AbacatePay API speaks camelCase JSON with upper-snake-case enum strings
//! (`"ONE_TIME"`) and ISO-8601 timestamps. Domain types use snake_case fields,
//! Rust enums and [`chrono::DateTime<Utc>`](chrono::DateTime).
//!
//! # Feature Flags
//!
//! - `telemetry` - Enables tracing instrumentation

pub mod codec;
pub mod entities;
pub mod error;
pub mod schema;
pub mod webhook;

pub use entities::Metadata;
pub use error::{DecodeError, ValidationError};

#[doc(hidden)]
pub use serde as __serde;
