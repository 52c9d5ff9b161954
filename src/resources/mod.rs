//! Resource façades.
//!
//! Every operation follows the same pipeline: validate the caller's
//! [`Params`] against the operation's schema table, build the camelCase wire
//! body, send it through the [`Transport`], then map the response payload to
//! the domain entity. Handles are borrowed from [`AbacatePay`]:
//!
//! ```no_run
//! # async fn run() -> Result<(), abacatepay::ClientError> {
//! use abacatepay::{AbacatePay, Params};
//!
//! let client = AbacatePay::from_env()?;
//! let charge = client.pix().create(Params::new().with("amount", 1000)).await?;
//! println!("{:?}", charge.br_code);
//! # Ok(())
//! # }
//! ```

mod billing;
mod coupon;
mod customer;
mod mrr;
mod pix;
mod store;
mod withdraw;

pub use billing::{BillingApi, billing_schemas};
pub use coupon::{CouponApi, coupon_schemas};
pub use customer::{CustomerApi, customer_params, customer_schemas};
pub use mrr::MrrApi;
pub use pix::{PixApi, pix_schemas};
pub use store::StoreApi;
pub use withdraw::{WithdrawApi, withdraw_schemas};

use abacatepay_types::entities::{Entity, Pagination};
use abacatepay_types::schema::{FieldSpec, Params, validate};
use serde::Serialize;

use crate::config::{Config, ConfigOptions};
use crate::error::ClientError;
use crate::transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

/// Entry point of the client.
///
/// Generic over the [`Transport`] so tests can substitute their own.
#[derive(Clone, Debug)]
pub struct AbacatePay<T = HttpTransport> {
    transport: T,
}

impl AbacatePay<HttpTransport> {
    /// Client over HTTP with the given configuration.
    pub fn new(config: Config) -> Result<Self, ClientError> {
        Ok(Self::with_transport(HttpTransport::try_new(config)?))
    }

    /// Client configured from `ABACATEPAY_*` environment variables.
    pub fn from_env() -> Result<Self, ClientError> {
        Self::new(ConfigOptions::default().resolve()?)
    }

    /// Client with only the API key set explicitly.
    pub fn with_api_key(api_key: impl Into<String>) -> Result<Self, ClientError> {
        Self::new(ConfigOptions::new().with_api_key(api_key).resolve()?)
    }
}

impl<T: Transport> AbacatePay<T> {
    pub fn with_transport(transport: T) -> Self {
        Self { transport }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    pub fn customers(&self) -> CustomerApi<'_, T> {
        CustomerApi::new(&self.transport)
    }

    pub fn billing(&self) -> BillingApi<'_, T> {
        BillingApi::new(&self.transport)
    }

    pub fn pix(&self) -> PixApi<'_, T> {
        PixApi::new(&self.transport)
    }

    pub fn withdraw(&self) -> WithdrawApi<'_, T> {
        WithdrawApi::new(&self.transport)
    }

    pub fn coupons(&self) -> CouponApi<'_, T> {
        CouponApi::new(&self.transport)
    }

    pub fn store(&self) -> StoreApi<'_, T> {
        StoreApi::new(&self.transport)
    }

    /// Public MRR endpoints.
    pub fn mrr(&self) -> MrrApi<'_, T> {
        MrrApi::new(&self.transport)
    }
}

/// One page of a list operation.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Page<E> {
    pub items: Vec<E>,
    /// Present only when the response carried a non-null `pagination`.
    pub pagination: Option<Pagination>,
}

impl<E> Page<E> {
    pub fn has_more(&self) -> bool {
        self.pagination.as_ref().is_some_and(Pagination::has_more)
    }
}

impl<E> IntoIterator for Page<E> {
    type Item = E;
    type IntoIter = std::vec::IntoIter<E>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

/// Validates `params`, posts the wire body to `path` and maps the result.
pub(crate) async fn create<T, E>(
    transport: &T,
    path: &'static str,
    schema: &[FieldSpec],
    params: Params,
) -> Result<E, ClientError>
where
    T: Transport,
    E: Entity,
{
    let params = validate(schema, params)?;
    let response = transport
        .send(ApiRequest::post(path, params.into_wire_body()))
        .await?;
    into_entity(response)
}

pub(crate) async fn fetch<T, E>(transport: &T, request: ApiRequest) -> Result<E, ClientError>
where
    T: Transport,
    E: Entity,
{
    into_entity(transport.send(request).await?)
}

pub(crate) async fn fetch_page<T, E>(
    transport: &T,
    request: ApiRequest,
) -> Result<Page<E>, ClientError>
where
    T: Transport,
    E: Entity,
{
    into_page(transport.send(request).await?)
}

fn into_entity<E: Entity>(response: ApiResponse) -> Result<E, ClientError> {
    match response {
        ApiResponse::Data(data) | ApiResponse::Paginated { data, .. } => Ok(E::from_wire(data)?),
        ApiResponse::Empty => Err(ClientError::EmptyResponse { expected: E::NAME }),
    }
}

fn into_page<E: Entity>(response: ApiResponse) -> Result<Page<E>, ClientError> {
    match response {
        ApiResponse::Empty => Ok(Page {
            items: Vec::new(),
            pagination: None,
        }),
        ApiResponse::Data(data) => Ok(Page {
            items: E::from_wire_list(data)?,
            pagination: None,
        }),
        ApiResponse::Paginated { data, pagination } => Ok(Page {
            items: E::from_wire_list(data)?,
            pagination: Some(Pagination::from_wire(pagination)?),
        }),
    }
}

#[cfg(test)]
pub(crate) mod testing {
    //! In-memory transport for façade tests.

    use std::sync::Mutex;

    use super::*;

    /// Records every request and answers with a canned classified response.
    pub struct RecordingTransport {
        response: Mutex<Option<Result<ApiResponse, ClientError>>>,
        pub requests: Mutex<Vec<ApiRequest>>,
    }

    impl RecordingTransport {
        pub fn replying(response: ApiResponse) -> Self {
            Self {
                response: Mutex::new(Some(Ok(response))),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn failing(err: ClientError) -> Self {
            Self {
                response: Mutex::new(Some(Err(err))),
                requests: Mutex::new(Vec::new()),
            }
        }

        pub fn sent(&self) -> Vec<ApiRequest> {
            self.requests.lock().unwrap().clone()
        }
    }

    impl Transport for RecordingTransport {
        async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
            self.requests.lock().unwrap().push(request);
            self.response
                .lock()
                .unwrap()
                .take()
                .expect("RecordingTransport answers a single request")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::testing::RecordingTransport;
    use super::*;
    use abacatepay_types::entities::{Customer, PaginationShape};
    use serde_json::json;

    #[tokio::test]
    async fn test_page_without_pagination() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!([
            {"id": "cust_1", "name": "Ana"},
            {"id": "cust_2", "name": "Bia"}
        ])));
        let page: Page<Customer> = fetch_page(&transport, ApiRequest::get("/customer/list"))
            .await
            .unwrap();
        assert_eq!(page.items.len(), 2);
        assert_eq!(page.pagination, None);
        assert!(!page.has_more());
    }

    #[tokio::test]
    async fn test_page_with_cursor_pagination() {
        let transport = RecordingTransport::replying(ApiResponse::Paginated {
            data: json!([{"id": "cust_1"}]),
            pagination: json!({"hasNext": true, "hasPrevious": false, "limit": 1, "nextCursor": "c_2"}),
        });
        let page: Page<Customer> = fetch_page(&transport, ApiRequest::get("/customer/list"))
            .await
            .unwrap();
        let pagination = page.pagination.clone().unwrap();
        assert_eq!(pagination.shape(), PaginationShape::Cursor);
        assert!(page.has_more());
        let ids: Vec<_> = page.into_iter().filter_map(|c| c.id).collect();
        assert_eq!(ids, vec!["cust_1"]);
    }

    #[tokio::test]
    async fn test_empty_response_for_entity() {
        let transport = RecordingTransport::replying(ApiResponse::Empty);
        let err = fetch::<_, Customer>(&transport, ApiRequest::get("/customer/get"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::EmptyResponse { expected: "Customer" }));
    }

    #[tokio::test]
    async fn test_decode_error_surfaces() {
        let transport = RecordingTransport::replying(ApiResponse::Data(json!({"name": 42})));
        let err = fetch::<_, Customer>(&transport, ApiRequest::get("/customer/get"))
            .await
            .unwrap_err();
        assert!(matches!(err, ClientError::Decode(_)));
    }
}
