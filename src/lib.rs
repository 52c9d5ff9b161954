#![cfg_attr(docsrs, feature(doc_auto_cfg))]

//! Rust client for the [AbacatePay](https://abacatepay.com) payments API.
//!
//! AbacatePay settles payments over PIX, the Brazilian instant-payment rail.
//! This crate issues authenticated requests to its REST API, validates request
//! parameters before anything is sent, and maps the camelCase JSON wire format
//! to typed Rust entities and back. It also verifies webhook signatures.
//!
//! # Example
//!
//! ```no_run
//! # async fn run() -> Result<(), abacatepay::ClientError> {
//! use abacatepay::{AbacatePay, ConfigOptions, Params};
//! use abacatepay::entities::{BillingFrequency, Product};
//!
//! let config = ConfigOptions::new().with_api_key("abc_dev_...").resolve()?;
//! let client = AbacatePay::new(config)?;
//!
//! let billing = client
//!     .billing()
//!     .create(
//!         Params::new()
//!             .with("frequency", BillingFrequency::OneTime)
//!             .with("products", vec![Product::new("plan-pro", "Pro plan", 1, 4990)])
//!             .with("return_url", "https://example.com/back")
//!             .with("completion_url", "https://example.com/done"),
//!     )
//!     .await?;
//! println!("pay at {:?}", billing.url);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`config`] - [`Config`] resolution from explicit options, environment and defaults
//! - [`transport`] - The [`Transport`] trait, its `reqwest` implementation and response classification
//! - [`resources`] - Per-resource operations (customers, billing, PIX, withdraw, coupons, store, MRR)
//! - [`error`] - [`ClientError`] and [`ApiError`]
//!
//! Wire types, request schemas and webhook verification come from the
//! `abacatepay-types` crate and are re-exported here.
//!
//! # Feature Flags
//!
//! - `telemetry` - `tracing` spans on every request and operation (default)
//! - `cli` - The `abacatepay` command-line binary (`cargo install abacatepay --features cli`)

pub mod config;
pub mod error;
pub mod resources;
pub mod transport;

pub use abacatepay_types::{codec, entities, schema, webhook};
pub use abacatepay_types::{DecodeError, Metadata, ValidationError};

pub use config::{Config, ConfigError, ConfigOptions};
pub use error::{ApiError, ClientError};
pub use resources::{AbacatePay, Page};
pub use schema::{Param, Params};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};
pub use webhook::{SignatureVerifier, verify_signature};
