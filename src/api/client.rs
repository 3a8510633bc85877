//! Production HTTP client implementation using reqwest.

use super::{ApiError, ApiRequest, ApiResponse, HttpClient};

/// Production HTTP client backed by `reqwest::Client`.
///
/// Thin wrapper that inherits reqwest's defaults, including connection
/// pooling; cloning shares the underlying pool.
#[derive(Debug, Clone, Default)]
pub struct ReqwestClient {
    inner: reqwest::Client,
}

impl ReqwestClient {
    /// Creates a client with default configuration.
    #[must_use]
    pub fn new() -> Self {
        Self {
            inner: reqwest::Client::new(),
        }
    }

    /// Wraps an existing reqwest client, keeping its configuration
    /// (timeouts, proxies, TLS).
    #[must_use]
    pub const fn from_client(client: reqwest::Client) -> Self {
        Self { inner: client }
    }
}

impl HttpClient for ReqwestClient {
    async fn request(&self, request: ApiRequest) -> Result<ApiResponse, ApiError> {
        let mut builder = self.inner.request(request.method, request.url.as_str());

        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }

        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_timeout() {
                ApiError::Timeout
            } else if e.is_builder() {
                ApiError::InvalidUrl(e.to_string())
            } else {
                ApiError::Connection(Box::new(e))
            }
        })?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response
            .bytes()
            .await
            .map_err(|e| ApiError::Connection(Box::new(e)))?
            .to_vec();

        Ok(ApiResponse::new(status, headers, body))
    }
}
