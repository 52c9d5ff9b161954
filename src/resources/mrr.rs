use abacatepay_types::ValidationError;
use abacatepay_types::entities::{MerchantInfo, PublicMrr, RevenueReport};
use chrono::NaiveDate;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::fetch;
use crate::transport::{ApiRequest, Transport};

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Public MRR (monthly recurring revenue) operations.
#[derive(Debug)]
pub struct MrrApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> MrrApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.mrr.get", skip_all, err)
    )]
    pub async fn get(&self) -> Result<PublicMrr, ClientError> {
        fetch(self.transport, ApiRequest::get("/public-mrr/mrr")).await
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.mrr.merchant_info", skip_all, err)
    )]
    pub async fn merchant_info(&self) -> Result<MerchantInfo, ClientError> {
        fetch(self.transport, ApiRequest::get("/public-mrr/merchant-info")).await
    }

    /// Revenue between `start` and `end`, both inclusive.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.mrr.revenue", skip(self), err)
    )]
    pub async fn revenue(
        &self,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<RevenueReport, ClientError> {
        if end < start {
            return Err(ValidationError::new("end_date", "must not be before start_date").into());
        }
        let request = ApiRequest::get("/public-mrr/revenue")
            .with_query("startDate", start.format(DATE_FORMAT).to_string())
            .with_query("endDate", end.format(DATE_FORMAT).to_string());
        fetch(self.transport, request).await
    }
}
