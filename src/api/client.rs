use reqwest::header::{AUTHORIZATION, CONTENT_TYPE, HeaderMap, HeaderValue};
use reqwest::{Method, Url};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error};

use crate::errors::ApiError;
use crate::utils::cancel::CancelSignal;

/// Per-call options for [`ApiClient::request`]. Defaults to a bodyless GET.
#[derive(Debug, Clone)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: HeaderMap,
    pub body: Option<Value>,
    pub query: Option<String>,
}

impl Default for RequestOptions {
    fn default() -> Self {
        Self {
            method: Method::GET,
            headers: HeaderMap::new(),
            body: None,
            query: None,
        }
    }
}

impl RequestOptions {
    pub fn get() -> Self {
        Self::default()
    }

    pub fn post<B: Serialize + ?Sized>(body: &B) -> Result<Self, ApiError> {
        Ok(Self {
            method: Method::POST,
            body: Some(serde_json::to_value(body)?),
            ..Self::default()
        })
    }

    pub fn header(mut self, name: reqwest::header::HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    pub fn query(mut self, query: impl Into<String>) -> Self {
        let query = query.into();
        self.query = (!query.is_empty()).then_some(query);
        self
    }
}

/// Thin JSON client for the Business Manager API.
#[derive(Debug, Clone)]
pub struct ApiClient {
    base_url: String,
    http: reqwest::Client,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, reqwest::Client::new())
    }

    pub fn with_client(base_url: impl Into<String>, http: reqwest::Client) -> Self {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        Self { base_url, http }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, endpoint: &str, query: Option<&str>) -> Result<Url, ApiError> {
        let mut raw = format!("{}{}", self.base_url, endpoint);
        if let Some(query) = query {
            raw.push('?');
            raw.push_str(query);
        }
        Url::parse(&raw).map_err(|e| ApiError::InvalidEndpoint {
            endpoint: endpoint.to_string(),
            reason: e.to_string(),
        })
    }

    /// Sends one request and decodes the JSON answer.
    ///
    /// Non-2xx answers become [`ApiError::Status`] carrying the service's
    /// `detail` field, or `HTTP error! status: N` when there is none.
    /// Transport failures pass through as [`ApiError::Transport`].
    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let url = self.url(endpoint, options.query.as_deref())?;

        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        for (name, value) in options.headers.iter() {
            headers.insert(name.clone(), value.clone());
        }

        debug!(method = %options.method, url = %url, "Making request");

        let mut builder = self
            .http
            .request(options.method.clone(), url.clone())
            .headers(headers);
        if let Some(body) = &options.body {
            builder = builder.body(serde_json::to_vec(body)?);
        }

        let response = builder.send().await.map_err(|e| {
            error!(error = %e, url = %url, "API request failed");
            ApiError::Transport(e)
        })?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            let err = error_from_body(status, &body);
            error!(status = status.as_u16(), error = %err, url = %url, "API request failed");
            return Err(err);
        }

        let body = response.bytes().await?;
        let data = serde_json::from_slice(&body).map_err(|e| {
            error!(error = %e, url = %url, "API response is not the expected JSON");
            ApiError::Json(e)
        })?;
        debug!(status = status.as_u16(), url = %url, "Response received");
        Ok(data)
    }

    /// [`request`](Self::request), abandoned as soon as `cancel` fires.
    pub async fn request_with_cancel<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        cancel: &CancelSignal,
    ) -> Result<T, ApiError> {
        cancel
            .run(self.request(endpoint, options))
            .await
            .ok_or(ApiError::Cancelled)?
    }

    /// Binds a bearer token to every request made through the returned handle.
    pub fn auth_request<'a>(&'a self, token: &'a str) -> AuthRequest<'a> {
        AuthRequest {
            client: self,
            token,
        }
    }
}

/// [`ApiClient`] with an `Authorization: Bearer <token>` header applied.
/// Headers set by the caller still take precedence.
#[derive(Debug, Clone, Copy)]
pub struct AuthRequest<'a> {
    client: &'a ApiClient,
    token: &'a str,
}

impl AuthRequest<'_> {
    fn authorize(&self, mut options: RequestOptions) -> Result<RequestOptions, ApiError> {
        if !options.headers.contains_key(AUTHORIZATION) {
            let value = HeaderValue::from_str(&format!("Bearer {}", self.token))
                .map_err(|_| ApiError::InvalidToken)?;
            options.headers.insert(AUTHORIZATION, value);
        }
        Ok(options)
    }

    pub async fn request<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
    ) -> Result<T, ApiError> {
        let options = self.authorize(options)?;
        self.client.request(endpoint, options).await
    }

    pub async fn request_with_cancel<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        options: RequestOptions,
        cancel: &CancelSignal,
    ) -> Result<T, ApiError> {
        let options = self.authorize(options)?;
        self.client.request_with_cancel(endpoint, options, cancel).await
    }
}

fn error_from_body(status: reqwest::StatusCode, body: &[u8]) -> ApiError {
    let detail = serde_json::from_slice::<Value>(body)
        .ok()
        .and_then(|v| v.get("detail").cloned());

    let message = match detail {
        Some(Value::String(s)) if !s.is_empty() => s,
        Some(Value::Null) | Some(Value::String(_)) | None => {
            return ApiError::status_fallback(status);
        }
        // e.g. a list of validation errors
        Some(other) => other.to_string(),
    };

    ApiError::Status { status, message }
}
