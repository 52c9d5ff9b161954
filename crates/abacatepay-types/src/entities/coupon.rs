use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Entity, Metadata};

crate::wire_enum! {
    /// How a coupon's `discount` is interpreted.
    pub enum CouponDiscountKind {
        /// `discount` is a percentage.
        Percentage => "percentage",
        /// `discount` is an amount in cents.
        Fixed => "fixed",
    }
}

crate::wire_enum! {
    pub enum CouponStatus {
        Active => "active",
        Inactive => "inactive",
        Expired => "expired",
    }
}

/// A discount coupon. The coupon code is its `id`.
///
/// `max_redeems` is `-1` for unlimited redemptions.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Coupon {
    pub id: Option<String>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub discount_kind: Option<CouponDiscountKind>,
    pub discount: Option<u64>,
    pub max_redeems: Option<i64>,
    pub redeems_count: Option<u64>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub status: Option<CouponStatus>,
    pub dev_mode: Option<bool>,
    pub notes: Option<String>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    pub metadata: Option<Metadata>,
}

impl Entity for Coupon {
    const NAME: &'static str = "Coupon";
}

impl Coupon {
    pub fn is_unlimited(&self) -> bool {
        self.max_redeems == Some(-1)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::codec::WireEnum;
    use crate::entities::assert_wire_contains;
    use serde_json::json;

    #[test]
    fn test_coupon_roundtrip() {
        let raw = json!({
            "id": "DEYVIN_20",
            "discountKind": "PERCENTAGE",
            "discount": 20,
            "maxRedeems": -1,
            "redeemsCount": 3,
            "status": "ACTIVE",
            "devMode": true,
            "notes": "Cupom de desconto pro meu público",
            "createdAt": "2025-05-25T23:43:25.250Z",
            "updatedAt": "2025-05-25T23:43:25.250Z",
            "metadata": {}
        });
        let coupon = Coupon::from_wire(raw.clone()).unwrap();
        assert_eq!(coupon.discount_kind, Some(CouponDiscountKind::Percentage));
        assert_eq!(coupon.status, Some(CouponStatus::Active));
        assert!(coupon.is_unlimited());

        let wire = coupon.to_wire().unwrap();
        assert_wire_contains(&raw, &wire.clone().into());
        assert_eq!(Coupon::from_wire(wire.into()).unwrap(), coupon);
    }

    #[test]
    fn test_coupon_enum_sets() {
        for kind in CouponDiscountKind::MEMBERS {
            assert_eq!(CouponDiscountKind::decode(&kind.encode()).unwrap(), *kind);
        }
        for status in CouponStatus::MEMBERS {
            assert_eq!(CouponStatus::decode(&status.encode()).unwrap(), *status);
        }
        assert!(CouponStatus::decode("REDEEMED").is_err());
    }

    #[test]
    fn test_coupon_unknown_discount_kind_fails() {
        assert!(Coupon::from_wire(json!({"discountKind": "BOGO"})).is_err());
    }
}
