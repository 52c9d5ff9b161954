use abacatepay_types::entities::Coupon;
use abacatepay_types::schema::Params;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::{Page, create, fetch_page};
use crate::transport::{ApiRequest, Transport};

pub mod coupon_schemas {
    use abacatepay_types::entities::CouponDiscountKind;
    use abacatepay_types::schema::{FieldKind, FieldSpec, Param};

    /// `max_redeems` value meaning "no limit".
    pub const UNLIMITED_REDEEMS: i64 = -1;

    pub const CREATE: &[FieldSpec] = &[
        FieldSpec::required("code", FieldKind::String),
        FieldSpec::required(
            "discount_kind",
            FieldKind::OneOf(CouponDiscountKind::SYMBOLS),
        ),
        FieldSpec::required("discount", FieldKind::Amount),
        FieldSpec::optional("notes", FieldKind::String),
        FieldSpec::optional("max_redeems", FieldKind::Integer).with_default(unlimited),
        FieldSpec::optional("metadata", FieldKind::Metadata),
    ];

    fn unlimited() -> Param {
        Param::Int(UNLIMITED_REDEEMS)
    }
}

/// Coupon operations.
#[derive(Debug)]
pub struct CouponApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> CouponApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Creates a coupon. `max_redeems` defaults to unlimited.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.coupon.create", skip_all, err)
    )]
    pub async fn create(&self, params: Params) -> Result<Coupon, ClientError> {
        create(
            self.transport,
            "/coupon/create",
            coupon_schemas::CREATE,
            params,
        )
        .await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.coupon.list", skip_all, err)
    )]
    pub async fn list(&self) -> Result<Page<Coupon>, ClientError> {
        fetch_page(self.transport, ApiRequest::get("/coupon/list")).await
    }
}
