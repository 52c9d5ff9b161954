use serde::{Deserialize, Serialize};

use crate::entities::Entity;

/// Balances of a store, in cents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreBalance {
    pub available: Option<u64>,
    pub pending: Option<u64>,
    pub blocked: Option<u64>,
}

impl Entity for StoreBalance {
    const NAME: &'static str = "StoreBalance";
}

/// The store that owns the API key.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Store {
    pub id: Option<String>,
    pub name: Option<String>,
    pub balance: Option<StoreBalance>,
}

impl Entity for Store {
    const NAME: &'static str = "Store";
}
