use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Entity, Metadata};

crate::wire_enum! {
    /// Status of a withdraw.
    pub enum WithdrawStatus {
        Pending => "pending",
        Expired => "expired",
        Cancelled => "cancelled",
        Complete => "complete",
        Refunded => "refunded",
    }
}

crate::wire_enum! {
    /// Transaction kind reported for a withdraw.
    pub enum WithdrawKind {
        Withdraw => "withdraw",
    }
}

crate::wire_enum! {
    /// Rail used to pay out a withdraw.
    pub enum WithdrawMethod {
        Pix => "pix",
    }
}

crate::wire_enum! {
    /// Kind of PIX key receiving a withdraw.
    pub enum PixKeyType {
        Cpf => "cpf",
        Cnpj => "cnpj",
        Phone => "phone",
        Email => "email",
        Random => "random",
        BrCode => "br_code",
    }
}

/// Destination PIX key of a withdraw.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PixKey {
    #[serde(rename = "type", default, with = "crate::codec::wire_enum::option")]
    pub key_type: Option<PixKeyType>,
    pub key: Option<String>,
}

impl PixKey {
    pub fn new(key_type: PixKeyType, key: impl Into<String>) -> Self {
        Self {
            key_type: Some(key_type),
            key: Some(key.into()),
        }
    }
}

impl Entity for PixKey {
    const NAME: &'static str = "PixKey";
}

/// A withdraw of store balance to a PIX key. `amount` is in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Withdraw {
    pub id: Option<String>,
    pub external_id: Option<String>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub status: Option<WithdrawStatus>,
    pub dev_mode: Option<bool>,
    pub receipt_url: Option<String>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub kind: Option<WithdrawKind>,
    pub amount: Option<u64>,
    pub platform_fee: Option<u64>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    pub metadata: Option<Metadata>,
}

impl Entity for Withdraw {
    const NAME: &'static str = "Withdraw";
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WireEnum;
    use crate::entities::assert_wire_contains;
    use serde_json::json;

    #[test]
    fn test_withdraw_roundtrip() {
        let raw = json!({
            "id": "tran_123456",
            "status": "COMPLETE",
            "devMode": false,
            "receiptUrl": "https://abacatepay.com/receipt/tran_123456",
            "kind": "WITHDRAW",
            "amount": 5000,
            "platformFee": 80,
            "externalId": "withdraw-1234",
            "createdAt": "2025-01-15T10:30:45Z",
            "updatedAt": "2025-01-15T10:31:02Z",
            "metadata": {"requestedBy": "finance"}
        });
        let withdraw = Withdraw::from_wire(raw.clone()).unwrap();
        assert_eq!(withdraw.status, Some(WithdrawStatus::Complete));
        assert_eq!(withdraw.kind, Some(WithdrawKind::Withdraw));
        assert_eq!(withdraw.external_id.as_deref(), Some("withdraw-1234"));

        let wire = withdraw.to_wire().unwrap();
        assert_wire_contains(&raw, &wire.clone().into());
        assert_eq!(Withdraw::from_wire(wire.into()).unwrap(), withdraw);
    }

    #[test]
    fn test_pix_key_uses_type_key() {
        let key = PixKey::new(PixKeyType::BrCode, "000201...");
        let wire = key.to_wire().unwrap();
        assert_eq!(wire["type"], json!("BR_CODE"));
        assert_eq!(PixKey::from_wire(wire.into()).unwrap(), key);
    }

    #[test]
    fn test_withdraw_enum_sets() {
        for status in WithdrawStatus::MEMBERS {
            assert_eq!(WithdrawStatus::decode(&status.encode()).unwrap(), *status);
        }
        for key_type in PixKeyType::MEMBERS {
            assert_eq!(PixKeyType::decode(&key_type.encode()).unwrap(), *key_type);
        }
        for kind in WithdrawKind::MEMBERS {
            assert_eq!(WithdrawKind::decode(&kind.encode()).unwrap(), *kind);
        }
        for method in WithdrawMethod::MEMBERS {
            assert_eq!(WithdrawMethod::decode(&method.encode()).unwrap(), *method);
        }
        assert_eq!(WithdrawKind::Withdraw.encode(), "WITHDRAW");
        assert_eq!(WithdrawMethod::Pix.encode(), "PIX");
        assert!(WithdrawStatus::decode("PAID").is_err());
    }
}
