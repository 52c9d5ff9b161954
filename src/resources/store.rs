use abacatepay_types::entities::Store;

#[cfg(feature = "telemetry")]
use tracing::instrument;

use crate::error::ClientError;
use crate::resources::fetch;
use crate::transport::{ApiRequest, Transport};

/// Store operations.
#[derive(Debug)]
pub struct StoreApi<'a, T> {
    transport: &'a T,
}

impl<'a, T: Transport> StoreApi<'a, T> {
    pub(crate) fn new(transport: &'a T) -> Self {
        Self { transport }
    }

    /// The store owning the API key, with its balances.
    #[cfg_attr(
        feature = "telemetry",
        instrument(name = "abacatepay.store.get", skip_all, err)
    )]
    pub async fn get(&self) -> Result<Store, ClientError> {
        fetch(self.transport, ApiRequest::get("/store/get")).await
    }
}
