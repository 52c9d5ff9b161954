//! HTTP transport and response classification.
//!
//! [`Transport`] is the seam between the resource façades and the network.
//! [`HttpTransport`] is the `reqwest`-backed implementation: it resolves
//! `{api_url}/v{api_version}{path}`, attaches the JSON and user-agent headers
//! plus a bearer token when an API key is configured, applies the configured
//! timeout and hands the raw response to [`classify`].
//!
//! Responses are classified by envelope shape, in order:
//!
//! 1. `204 No Content` is [`ApiResponse::Empty`].
//! 2. Non-null `data` and non-null `pagination` is [`ApiResponse::Paginated`].
//! 3. Non-null `data` is [`ApiResponse::Data`].
//! 4. Non-null `error` is an [`ApiError`] carrying the status and message.
//! 5. Anything else, including a body that is not JSON, is an [`ApiError`].

use http::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue, USER_AGENT};
use http::{Method, StatusCode};
use reqwest::Client;
use serde_json::{Map, Value};
use std::fmt::Display;
use std::sync::Arc;
use url::Url;

#[cfg(feature = "telemetry")]
use tracing::{Span, instrument};

use crate::config::Config;
use crate::error::{ApiError, ClientError};

/// A request to the API, relative to the versioned base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path starting with `/`, e.g. `/billing/create`.
    pub path: String,
    pub query: Vec<(String, String)>,
    /// JSON object body. `None` sends no body at all.
    pub body: Option<Map<String, Value>>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    pub fn post(path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self::new(Method::POST, path).with_body(body)
    }

    pub fn put(path: impl Into<String>, body: Map<String, Value>) -> Self {
        Self::new(Method::PUT, path).with_body(body)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    pub fn with_body(mut self, body: Map<String, Value>) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

/// A successfully classified response.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiResponse {
    /// `204 No Content`.
    Empty,
    Data(Value),
    Paginated { data: Value, pagination: Value },
}

/// Sends [`ApiRequest`]s and classifies their responses.
///
/// Implementations hold no per-call state and can be shared across tasks.
pub trait Transport {
    /// Sends one request. No retries are performed.
    ///
    /// # Errors
    ///
    /// [`ClientError::Api`] when the server answered with an error,
    /// [`ClientError::Transport`] when it could not be reached.
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send;
}

impl<T: Transport + Send + Sync> Transport for Arc<T> {
    fn send(
        &self,
        request: ApiRequest,
    ) -> impl Future<Output = Result<ApiResponse, ClientError>> + Send {
        self.as_ref().send(request)
    }
}

/// [`Transport`] over HTTP using `reqwest`.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    config: Config,
    client: Client,
    headers: HeaderMap,
}

impl HttpTransport {
    /// Builds a transport with a fresh `reqwest` client.
    pub fn try_new(config: Config) -> Result<Self, ClientError> {
        Self::with_client(config, Client::new())
    }

    /// Builds a transport around an existing `reqwest` client.
    pub fn with_client(config: Config, client: Client) -> Result<Self, ClientError> {
        let headers = default_headers(&config)?;
        Ok(Self {
            config,
            client,
            headers,
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Full URL of `path` with `query` appended.
    pub fn url_for(&self, path: &str, query: &[(String, String)]) -> Result<Url, ClientError> {
        let base = self.config.api_url().as_str().trim_end_matches('/');
        let path = path.trim_start_matches('/');
        let raw = format!("{base}/v{}/{path}", self.config.api_version());
        let mut url = Url::parse(&raw).map_err(|source| ClientError::UrlParse {
            context: "Failed to construct request URL",
            source,
        })?;
        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }
        Ok(url)
    }

    #[cfg_attr(
        feature = "telemetry",
        instrument(
            name = "abacatepay.transport.send",
            skip_all,
            fields(
                method = %request.method,
                path = %request.path,
                status = tracing::field::Empty,
                otel.status_code = tracing::field::Empty,
                error.message = tracing::field::Empty,
            )
        )
    )]
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        let url = self.url_for(&request.path, &request.query)?;
        let mut req = self
            .client
            .request(request.method, url)
            .headers(self.headers.clone());
        if let Some(body) = &request.body {
            req = req.json(body);
        }
        if let Some(timeout) = self.config.timeout() {
            req = req.timeout(timeout);
        }
        let result = async {
            let response = req.send().await.map_err(|source| ClientError::Transport {
                context: "Failed to send request",
                source,
            })?;
            let status = response.status();
            #[cfg(feature = "telemetry")]
            Span::current().record("status", status.as_u16());
            let body = response
                .bytes()
                .await
                .map_err(|source| ClientError::Transport {
                    context: "Failed to read response body",
                    source,
                })?;
            classify(status, &body).map_err(ClientError::from)
        }
        .await;

        record_result_on_span(&result);

        result
    }
}

impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse, ClientError> {
        self.execute(request).await
    }
}

fn default_headers(config: &Config) -> Result<HeaderMap, ClientError> {
    let mut headers = HeaderMap::new();
    headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
    headers.insert(ACCEPT, HeaderValue::from_static("application/json"));
    let user_agent =
        HeaderValue::from_str(config.user_agent()).map_err(|source| ClientError::InvalidHeader {
            context: "User-Agent",
            source,
        })?;
    headers.insert(USER_AGENT, user_agent);
    if let Some(api_key) = config.api_key() {
        let mut bearer = HeaderValue::from_str(&format!("Bearer {api_key}")).map_err(|source| {
            ClientError::InvalidHeader {
                context: "Authorization",
                source,
            }
        })?;
        bearer.set_sensitive(true);
        headers.insert(AUTHORIZATION, bearer);
    }
    Ok(headers)
}

/// Classifies a raw response by status and envelope shape.
///
/// # Errors
///
/// Returns [`ApiError`] for an `error` envelope or any unrecognized body.
pub fn classify(status: StatusCode, body: &[u8]) -> Result<ApiResponse, ApiError> {
    if status == StatusCode::NO_CONTENT {
        return Ok(ApiResponse::Empty);
    }
    let envelope: Value =
        serde_json::from_slice(body).map_err(|err| ApiError::new(status, err.to_string()))?;
    let Value::Object(mut envelope) = envelope else {
        return Err(ApiError::new(status, "Unexpected response format"));
    };
    let mut take = |key: &str| envelope.remove(key).filter(|value| !value.is_null());

    match (take("data"), take("pagination"), take("error")) {
        (Some(data), Some(pagination), _) => Ok(ApiResponse::Paginated { data, pagination }),
        (Some(data), None, _) => Ok(ApiResponse::Data(data)),
        (None, _, Some(error)) => Err(ApiError::new(status, error_message(error))),
        (None, _, None) => Err(ApiError::new(status, "Unexpected response format")),
    }
}

fn error_message(error: Value) -> String {
    match error {
        Value::String(message) => message,
        Value::Object(ref fields) => match fields.get("message") {
            Some(Value::String(message)) => message.clone(),
            _ => error.to_string(),
        },
        other => other.to_string(),
    }
}

/// Records the outcome of a request on the current span.
#[cfg(feature = "telemetry")]
fn record_result_on_span<R, E: Display>(result: &Result<R, E>) {
    let span = Span::current();
    match result {
        Ok(_) => {
            span.record("otel.status_code", "OK");
        }
        Err(err) => {
            span.record("otel.status_code", "ERROR");
            span.record("error.message", tracing::field::display(err));
            tracing::event!(tracing::Level::ERROR, error = %err, "Request to AbacatePay failed");
        }
    }
}

/// Noop if telemetry feature is off.
#[cfg(not(feature = "telemetry"))]
fn record_result_on_span<R, E: Display>(_result: &Result<R, E>) {}
