use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Entity, Metadata};

crate::wire_enum! {
    /// Status of a PIX QR code charge.
    pub enum PixChargeStatus {
        Pending => "pending",
        Expired => "expired",
        Cancelled => "cancelled",
        Paid => "paid",
        Refunded => "refunded",
    }
}

/// A PIX QR code charge.
///
/// `br_code` is the copy-and-paste PIX code, `br_code_base64` the QR image as a
/// data URI. `amount` and `platform_fee` are in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixCharge {
    pub id: Option<String>,
    pub amount: Option<u64>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub status: Option<PixChargeStatus>,
    pub dev_mode: Option<bool>,
    pub br_code: Option<String>,
    pub br_code_base64: Option<String>,
    pub platform_fee: Option<u64>,
    pub description: Option<String>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub expires_at: Option<DateTime<Utc>>,
    pub metadata: Option<Metadata>,
}

impl Entity for PixCharge {
    const NAME: &'static str = "PixCharge";
}

impl PixCharge {
    pub fn is_paid(&self) -> bool {
        self.status == Some(PixChargeStatus::Paid)
    }
}
