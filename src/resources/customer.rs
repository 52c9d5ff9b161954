use abacatepay_types::entities::Customer;
use abacatepay_types::schema::{Param, Params};

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::{Page, create, fetch_page};
use crate::transport::{ApiRequest, Transport};

pub mod customer_schemas {
    use abacatepay_types::schema::{FieldKind, FieldSpec};

    /// Fields of a customer, top-level on `customer/create` and nested in
    /// billings and PIX charges.
    pub const CUSTOMER: &[FieldSpec] = &[
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::required("cellphone", FieldKind::String),
        FieldSpec::required("email", FieldKind::String),
        FieldSpec::required("tax_id", FieldKind::String),
        FieldSpec::optional("zip_code", FieldKind::String),
        FieldSpec::optional("metadata", FieldKind::Metadata),
    ];

    /// A nested [`Customer`](abacatepay_types::entities::Customer) record.
    pub const CUSTOMER_RECORD: FieldKind = FieldKind::Record {
        entity: "Customer",
        schema: CUSTOMER,
    };
}

/// Customer operations.
#[derive(Debug)]
pub struct CustomerApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> CustomerApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Creates a customer. `name`, `cellphone`, `email` and `tax_id` are required.
    ///
    /// A [`Customer`] built with [`Customer::new`] converts into the matching
    /// parameters with [`customer_params`].
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.customer.create", skip_all, err)
    )]
    pub async fn create(&self, params: Params) -> Result<Customer, ClientError> {
        create(
            self.transport,
            "/customer/create",
            customer_schemas::CUSTOMER,
            params,
        )
        .await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.customer.list", skip_all, err)
    )]
    pub async fn list(&self) -> Result<Page<Customer>, ClientError> {
        fetch_page(self.transport, ApiRequest::get("/customer/list")).await
    }
}

/// Top-level create parameters from a customer value.
pub fn customer_params(customer: Customer) -> Params {
    [
        ("name", Param::from(customer.name)),
        ("cellphone", customer.cellphone.into()),
        ("email", customer.email.into()),
        ("tax_id", customer.tax_id.into()),
        ("zip_code", customer.zip_code.into()),
        ("metadata", customer.metadata.into()),
    ]
    .into_iter()
    .collect()
}
