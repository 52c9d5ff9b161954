use abacatepay_types::entities::{Metadata, PixCharge};
use abacatepay_types::schema::Params;
use serde_json::Map;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::{create, fetch};
use crate::transport::{ApiRequest, Transport};

pub mod pix_schemas {
    use abacatepay_types::schema::{FieldKind, FieldSpec};

    use crate::resources::customer_schemas::CUSTOMER_RECORD;

    /// Longest description the API accepts on a PIX charge.
    pub const DESCRIPTION_MAX_LENGTH: usize = 37;

    pub const CREATE: &[FieldSpec] = &[
        FieldSpec::required("amount", FieldKind::Amount),
        FieldSpec::optional("expires_in", FieldKind::Amount),
        FieldSpec::optional("description", FieldKind::String).max_length(DESCRIPTION_MAX_LENGTH),
        FieldSpec::optional("customer", CUSTOMER_RECORD),
        FieldSpec::optional("metadata", FieldKind::Metadata),
    ];
}

/// PIX QR code charge operations.
#[derive(Debug)]
pub struct PixApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> PixApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// Creates a PIX QR code charge. `amount` is required, in cents;
    /// `expires_in` is in seconds.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.pix.create", skip_all, err)
    )]
    pub async fn create(&self, params: Params) -> Result<PixCharge, ClientError> {
        create(
            self.transport,
            "/pixQrCode/create",
            pix_schemas::CREATE,
            params,
        )
        .await
    }

    /// Current status of a charge. Only `status` and `expires_at` are filled.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.pix.check", skip(self), err)
    )]
    pub async fn check(&self, id: &str) -> Result<PixCharge, ClientError> {
        fetch(
            self.transport,
            ApiRequest::get("/pixQrCode/check").with_query("id", id),
        )
        .await
    }

    /// Marks a dev-mode charge as paid.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.pix.simulate_payment", skip(self, metadata), err)
    )]
    pub async fn simulate_payment(
        &self,
        id: &str,
        metadata: Option<Metadata>,
    ) -> Result<PixCharge, ClientError> {
        let mut body = Map::new();
        body.insert("metadata".into(), metadata.unwrap_or_default().into());
        fetch(
            self.transport,
            ApiRequest::post("/pixQrCode/simulate-payment", body).with_query("id", id),
        )
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::resources::testing::RecordingTransport;
    use crate::transport::ApiResponse;
    use abacatepay_types::entities::PixChargeStatus;
    use serde_json::json;

    #[tokio::test]
    async fn test_create_pix_charge() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({
            "id": "pix_char_1",
            "amount": 10000,
            "status": "PENDING",
            "devMode": true,
            "brCode": "00020101021226950014br.gov.bcb.pix",
            "brCodeBase64": "data:image/png;base64,iVBORw0KGgo",
            "platformFee": 80,
            "createdAt": "2026-01-15T10:30:45Z",
            "updatedAt": "2026-01-15T10:30:45Z",
            "expiresAt": "2026-01-16T10:30:45Z"
        })));
        let api = PixApi::new(&transport);
        let charge = api
            .create(
                Params::new()
                    .with("amount", 10000)
                    .with("expires_in", 3600)
                    .with("description", "Order 42"),
            )
            .await
            .unwrap();
        assert_eq!(charge.status, Some(PixChargeStatus::Pending));
        assert_eq!(charge.platform_fee, Some(80));
        assert!(charge.expires_at.is_some());

        let body = serde_json::Value::Object(transport.sent()[0].body.clone().unwrap());
        assert_eq!(
            body,
            json!({"amount": 10000, "expiresIn": 3600, "description": "Order 42"})
        );
    }

    #[tokio::test]
    async fn test_create_rejects_string_amount() {
        let transport = RecordingTransport::replying(ApiResponse::Empty);
        let api = PixApi::new(&transport);
        let err = api
            .create(Params::new().with("amount", "10000"))
            .await
            .unwrap_err();
        match err {
            ClientError::Validation(err) => assert_eq!(err.field, "amount"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[tokio::test]
    async fn test_create_rejects_long_description() {
        let transport = RecordingTransport::replying(ApiResponse::Empty);
        let api = PixApi::new(&transport);
        let err = api
            .create(
                Params::new()
                    .with("amount", 100)
                    .with("description", "x".repeat(pix_schemas::DESCRIPTION_MAX_LENGTH + 1)),
            )
            .await
            .unwrap_err();
        assert!(err.is_validation());
    }

    #[tokio::test]
    async fn test_check() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({
            "status": "PAID",
            "expiresAt": "2026-01-16T10:30:45.123Z"
        })));
        let api = PixApi::new(&transport);
        let charge = api.check("pix_char_1").await.unwrap();
        assert!(charge.is_paid());
        assert_eq!(charge.id, None);
        let sent = transport.sent();
        assert_eq!(sent[0].path, "/pixQrCode/check");
        assert_eq!(sent[0].query, vec![("id".to_string(), "pix_char_1".to_string())]);
    }

    #[tokio::test]
    async fn test_simulate_payment_sends_metadata_verbatim() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({
            "id": "pix_char_1",
            "status": "PAID"
        })));
        let api = PixApi::new(&transport);
        let mut metadata = Metadata::new();
        metadata.insert("orderRef".into(), json!("A-1"));
        metadata.insert("snake_key".into(), json!(null));
        let charge = api
            .simulate_payment("pix_char_1", Some(metadata))
            .await
            .unwrap();
        assert!(charge.is_paid());
        let sent = transport.sent();
        assert_eq!(sent[0].path, "/pixQrCode/simulate-payment");
        assert_eq!(
            serde_json::Value::Object(sent[0].body.clone().unwrap()),
            json!({"metadata": {"orderRef": "A-1", "snake_key": null}})
        );
    }

    #[tokio::test]
    async fn test_simulate_payment_without_metadata() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({"status": "PAID"})));
        let api = PixApi::new(&transport);
        api.simulate_payment("pix_char_1", None).await.unwrap();
        assert_eq!(
            serde_json::Value::Object(transport.sent()[0].body.clone().unwrap()),
            json!({"metadata": {}})
        );
    }
}
