use abacatepay_types::entities::Billing;
use abacatepay_types::schema::Params;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::{Page, create, fetch, fetch_page};
use crate::transport::{ApiRequest, Transport};

pub mod billing_schemas {
    use abacatepay_types::entities::{BillingFrequency, PaymentMethod};
    use abacatepay_types::schema::{FieldKind, FieldSpec, Param};

    use crate::resources::customer_schemas::CUSTOMER_RECORD;

    pub const PRODUCT: &[FieldSpec] = &[
        FieldSpec::required("external_id", FieldKind::String),
        FieldSpec::required("name", FieldKind::String),
        FieldSpec::optional("description", FieldKind::String),
        FieldSpec::required("quantity", FieldKind::Amount),
        FieldSpec::required("price", FieldKind::Amount),
    ];

    pub const CREATE: &[FieldSpec] = &[
        FieldSpec::required("frequency", FieldKind::OneOf(BillingFrequency::SYMBOLS))
            .with_default(one_time),
        FieldSpec::required(
            "methods",
            FieldKind::ListOf(&FieldKind::OneOf(PaymentMethod::SYMBOLS)),
        )
        .with_default(pix_only),
        FieldSpec::required(
            "products",
            FieldKind::ListOf(&FieldKind::Record {
                entity: "Product",
                schema: PRODUCT,
            }),
        ),
        FieldSpec::required("return_url", FieldKind::String),
        FieldSpec::required("completion_url", FieldKind::String),
        FieldSpec::optional("customer_id", FieldKind::String),
        FieldSpec::optional("customer", CUSTOMER_RECORD),
        FieldSpec::optional("allow_coupons", FieldKind::Boolean),
        FieldSpec::optional("coupons", FieldKind::ListOf(&FieldKind::String)),
        FieldSpec::optional("external_id", FieldKind::String),
        FieldSpec::optional("metadata", FieldKind::Metadata),
    ];

    fn one_time() -> Param {
        BillingFrequency::OneTime.into()
    }

    fn pix_only() -> Param {
        vec![PaymentMethod::Pix].into()
    }
}

/// Billing (payment link) operations.
#[derive(Debug)]
pub struct BillingApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> BillingApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Creates a billing.
    ///
    /// `frequency` defaults to `one_time` and `methods` to `[pix]`. Products
    /// and the optional customer must be passed as entity values.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.billing.create", skip_all, err)
    )]
    pub async fn create(&self, params: Params) -> Result<Billing, ClientError> {
        create(
            self.transport,
            "/billing/create",
            billing_schemas::CREATE,
            params,
        )
        .await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.billing.get", skip(self), err)
    )]
    pub async fn get(&self, id: &str) -> Result<Billing, ClientError> {
        fetch(
            self.transport,
            ApiRequest::get("/billing/get").with_query("id", id),
        )
        .await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.billing.list", skip_all, err)
    )]
    pub async fn list(&self) -> Result<Page<Billing>, ClientError> {
        fetch_page(self.transport, ApiRequest::get("/billing/list")).await
    }
}
