//! Codecs between the AbacatePay wire format and the domain model.
//!
//! - [`wire_enum`] - Upper-snake-case enum strings to closed Rust enums
//! - [`timestamp`] - ISO-8601 strings to [`chrono::DateTime<Utc>`](chrono::DateTime)
//! - [`case`] - snake_case and camelCase key conversion

pub mod case;
pub mod timestamp;
pub mod wire_enum;

pub use wire_enum::WireEnum;
