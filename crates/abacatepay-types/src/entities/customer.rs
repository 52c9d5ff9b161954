use serde::{Deserialize, Serialize};

use crate::entities::{Entity, Metadata};

/// A customer of the store.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Customer {
    pub id: Option<String>,
    pub name: Option<String>,
    pub cellphone: Option<String>,
    pub email: Option<String>,
    /// CPF or CNPJ.
    pub tax_id: Option<String>,
    pub zip_code: Option<String>,
    pub metadata: Option<Metadata>,
}

impl Customer {
    /// Builds a customer for a request body.
    pub fn new(
        name: impl Into<String>,
        cellphone: impl Into<String>,
        email: impl Into<String>,
        tax_id: impl Into<String>,
    ) -> Self {
        Self {
            name: Some(name.into()),
            cellphone: Some(cellphone.into()),
            email: Some(email.into()),
            tax_id: Some(tax_id.into()),
            ..Self::default()
        }
    }

    pub fn with_zip_code(mut self, zip_code: impl Into<String>) -> Self {
        self.zip_code = Some(zip_code.into());
        self
    }

    pub fn with_metadata(mut self, metadata: Metadata) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

impl Entity for Customer {
    const NAME: &'static str = "Customer";
}
