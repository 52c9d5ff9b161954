use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::{Customer, Entity, Metadata};

crate::wire_enum! {
    /// Lifecycle status of a billing.
    pub enum BillingStatus {
        Pending => "pending",
        Expired => "expired",
        Cancelled => "cancelled",
        Paid => "paid",
        Refunded => "refunded",
    }
}

crate::wire_enum! {
    /// Whether a billing link can be paid once or repeatedly.
    pub enum BillingFrequency {
        OneTime => "one_time",
        MultiplePayments => "multiple_payments",
    }
}

crate::wire_enum! {
    /// Payment method accepted by a billing.
    pub enum PaymentMethod {
        Pix => "pix",
        Card => "card",
    }
}

/// A product line of a billing. `price` is in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Assigned by the API; left unset on requests.
    pub id: Option<String>,
    pub external_id: Option<String>,
    pub name: Option<String>,
    pub description: Option<String>,
    pub quantity: Option<u64>,
    pub price: Option<u64>,
}

impl Product {
    pub fn new(
        external_id: impl Into<String>,
        name: impl Into<String>,
        quantity: u64,
        price: u64,
    ) -> Self {
        Self {
            external_id: Some(external_id.into()),
            name: Some(name.into()),
            quantity: Some(quantity),
            price: Some(price),
            ..Self::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }
}

impl Entity for Product {
    const NAME: &'static str = "Product";
}

/// A billing (payment link). `amount` is in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Billing {
    pub id: Option<String>,
    pub url: Option<String>,
    pub amount: Option<u64>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub status: Option<BillingStatus>,
    pub dev_mode: Option<bool>,
    #[serde(default, with = "crate::codec::wire_enum::option_vec")]
    pub methods: Option<Vec<PaymentMethod>>,
    pub products: Option<Vec<Product>>,
    #[serde(default, with = "crate::codec::wire_enum::option")]
    pub frequency: Option<BillingFrequency>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub next_billing: Option<DateTime<Utc>>,
    pub customer: Option<Customer>,
    pub customer_id: Option<String>,
    pub allow_coupons: Option<bool>,
    pub coupons: Option<Vec<String>>,
    pub return_url: Option<String>,
    pub completion_url: Option<String>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub updated_at: Option<DateTime<Utc>>,
    pub metadata: Option<Metadata>,
}

impl Entity for Billing {
    const NAME: &'static str = "Billing";
}
