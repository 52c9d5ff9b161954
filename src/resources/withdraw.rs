use abacatepay_types::entities::Withdraw;
use abacatepay_types::schema::Params;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::{Page, create, fetch, fetch_page};
use crate::transport::{ApiRequest, Transport};

pub mod withdraw_schemas {
    use abacatepay_types::entities::{PixKeyType, WithdrawMethod};
    use abacatepay_types::schema::{FieldKind, FieldSpec, Param};

    /// Destination key, as a nested [`PixKey`](abacatepay_types::entities::PixKey).
    pub const PIX_KEY: &[FieldSpec] = &[
        FieldSpec::required("type", FieldKind::OneOf(PixKeyType::SYMBOLS)),
        FieldSpec::required("key", FieldKind::String),
    ];

    pub const CREATE: &[FieldSpec] = &[
        FieldSpec::required("external_id", FieldKind::String),
        FieldSpec::required("method", FieldKind::OneOf(WithdrawMethod::SYMBOLS))
            .with_default(pix),
        FieldSpec::required("amount", FieldKind::Amount),
        FieldSpec::required(
            "pix",
            FieldKind::Record {
                entity: "PixKey",
                schema: PIX_KEY,
            },
        ),
        FieldSpec::optional("description", FieldKind::String),
    ];

    fn pix() -> Param {
        WithdrawMethod::Pix.into()
    }
}

/// Withdraw operations.
#[derive(Debug)]
pub struct WithdrawApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> WithdrawApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Withdraws store balance to a PIX key. `method` defaults to `pix`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.withdraw.create", skip_all, err)
    )]
    pub async fn create(&self, params: Params) -> Result<Withdraw, ClientError> {
        create(
            self.transport,
            "/withdraw/create",
            withdraw_schemas::CREATE,
            params,
        )
        .await
    }

    /// Looks a withdraw up by the caller's own `external_id`.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.withdraw.get", skip(self), err)
    )]
    pub async fn get(&self, external_id: &str) -> Result<Withdraw, ClientError> {
        fetch(
            self.transport,
            ApiRequest::get("/withdraw/get").with_query("externalId", external_id),
        )
        .await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.withdraw.list", skip_all, err)
    )]
    pub async fn list(&self) -> Result<Page<Withdraw>, ClientError> {
        fetch_page(self.transport, ApiRequest::get("/withdraw/list")).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::RecordingTransport;
    use crate::transport::ApiResponse;
    use abacatepay_types::entities::{PixKey, PixKeyType, WithdrawKind, WithdrawStatus};
    use serde_json::json;

    #[tokio::test]
    async fn test_create_withdraw() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({
            "id": "tran_1",
            "externalId": "wd-001",
            "status": "PENDING",
            "kind": "WITHDRAW",
            "amount": 5000,
            "platformFee": 80,
            "devMode": true
        })));
        let api = WithdrawApi::new(&transport);
        let withdraw = api
            .create(
                Params::new()
                    .with("external_id", "wd-001")
                    .with("amount", 5000)
                    .with("pix", PixKey::new(PixKeyType::Email, "ana@example.com")),
            )
            .await
            .unwrap();
        assert_eq!(withdraw.status, Some(WithdrawStatus::Pending));
        assert_eq!(withdraw.kind, Some(WithdrawKind::Withdraw));

        assert_eq!(
            serde_json::Value::Object(transport.sent()[0].body.clone().unwrap()),
            json!({
                "externalId": "wd-001",
                "amount": 5000,
                "pix": {"type": "EMAIL", "key": "ana@example.com"},
                "method": "PIX"
            })
        );
    }

    #[tokio::test]
    async fn test_create_requires_pix_key() {
        let transport = RecordingTransport::replying(ApiResponse::Empty);
        let api = WithdrawApi::new(&transport);
        let err = api
            .create(Params::new().with("external_id", "wd-001").with("amount", 5000))
            .await
            .unwrap_err();
        match err {
            ClientError::Validation(err) => assert_eq!(err.field, "pix"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_get_by_external_id() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({
            "externalId": "wd-001",
            "status": "COMPLETE",
            "receiptUrl": "https://abacatepay.com/receipt/tran_1"
        })));
        let api = WithdrawApi::new(&transport);
        let withdraw = api.get("wd-001").await.unwrap();
        assert_eq!(withdraw.status, Some(WithdrawStatus::Complete));
        assert_eq!(
            transport.sent()[0].query,
            vec![("externalId".to_string(), "wd-001".to_string())]
        );
    }

    #[tokio::test]
    async fn test_unknown_status_is_decode_error() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({
            "status": "SETTLING"
        })));
        let api = WithdrawApi::new(&transport);
        let err = api.get("wd-001").await.unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
