//! HTTP request/response types and client trait for the bot API.

use serde::Serialize;
use serde::de::DeserializeOwned;

use super::ApiError;

/// An HTTP request to the platform.
///
/// A value type built by [`MessagesApi`](super::MessagesApi) and friends
/// and handed to whichever [`HttpClient`] implementation the bot was
/// constructed with. Uses standard `http` crate types for method and
/// headers.
#[derive(Debug, Clone)]
pub struct ApiRequest {
    /// HTTP method
    pub method: http::Method,
    /// Target URL
    pub url: url::Url,
    /// HTTP headers to send
    pub headers: http::HeaderMap,
    /// Optional request body
    pub body: Option<Vec<u8>>,
}

impl ApiRequest {
    /// Creates a request with the given method and URL, no headers, and no
    /// body.
    #[must_use]
    pub fn new(method: http::Method, url: url::Url) -> Self {
        Self {
            method,
            url,
            headers: http::HeaderMap::new(),
            body: None,
        }
    }

    /// Creates a POST request to the given URL.
    #[must_use]
    pub fn post(url: url::Url) -> Self {
        Self::new(http::Method::POST, url)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Sets a JSON body and the matching `Content-Type` header.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError::Serialize`] if the value cannot be encoded.
    pub fn with_json<T: Serialize>(mut self, body: &T) -> Result<Self, ApiError> {
        self.body = Some(serde_json::to_vec(body)?);
        self.headers.insert(
            http::header::CONTENT_TYPE,
            http::HeaderValue::from_static("application/json"),
        );
        Ok(self)
    }
}

/// An HTTP response received from the platform.
///
/// The body is fully buffered into memory.
#[derive(Debug, Clone)]
pub struct ApiResponse {
    /// HTTP status code
    pub status: http::StatusCode,
    /// Response headers
    pub headers: http::HeaderMap,
    /// Response body (fully buffered)
    pub body: Vec<u8>,
}

impl ApiResponse {
    /// Creates a new response value.
    #[must_use]
    pub const fn new(status: http::StatusCode, headers: http::HeaderMap, body: Vec<u8>) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Returns true if the status code indicates success (2xx).
    #[must_use]
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Returns the body as a UTF-8 string, if valid.
    #[must_use]
    pub fn body_text(&self) -> Option<&str> {
        std::str::from_utf8(&self.body).ok()
    }

    /// Deserializes the body as JSON.
    ///
    /// # Errors
    ///
    /// Returns the underlying decode error.
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, serde_json::Error> {
        serde_json::from_slice(&self.body)
    }
}

/// Trait for making HTTP requests to the platform.
///
/// Abstracting the client enables dependency injection in tests (capture
/// the built request, return a canned response) and swapping transports
/// without touching calling code. Production code uses
/// [`ReqwestClient`](super::ReqwestClient).
pub trait HttpClient: Send + Sync {
    /// Sends a request and returns the response.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the transport fails: connection errors,
    /// timeouts, or an unusable URL.
    fn request(
        &self,
        request: ApiRequest,
    ) -> impl std::future::Future<Output = Result<ApiResponse, ApiError>> + Send;
}
