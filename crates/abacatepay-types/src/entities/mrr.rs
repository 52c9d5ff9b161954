use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::entities::Entity;

/// Public monthly recurring revenue figures of a merchant.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PublicMrr {
    /// MRR in cents.
    pub mrr: Option<u64>,
    pub total_active_subscriptions: Option<u64>,
}

impl Entity for PublicMrr {
    const NAME: &'static str = "PublicMrr";
}

/// Public merchant profile.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MerchantInfo {
    pub name: Option<String>,
    pub website: Option<String>,
    #[serde(default, with = "crate::codec::timestamp::option")]
    pub created_at: Option<DateTime<Utc>>,
}

impl Entity for MerchantInfo {
    const NAME: &'static str = "MerchantInfo";
}

/// Revenue of a single day.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyRevenue {
    pub amount: Option<u64>,
    pub count: Option<u64>,
}

/// Revenue over a date range. `transactions_per_day` is keyed by `YYYY-MM-DD`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueReport {
    pub total_revenue: Option<u64>,
    pub total_transactions: Option<u64>,
    pub transactions_per_day: Option<BTreeMap<String, DailyRevenue>>,
}

impl Entity for RevenueReport {
    const NAME: &'static str = "RevenueReport";
}
