//! Transport-neutral request/response values for the webhook endpoint.
//!
//! These decouple the protocol state machine from any particular web
//! framework: adapters convert their native request type into a
//! [`WebhookRequest`] and the returned [`WebhookResponse`] back out.

use serde::Serialize;

/// An inbound HTTP request, captured independently of the web framework.
///
/// `body` must hold the exact raw bytes received; signature verification
/// runs over them before any parsing.
#[derive(Debug, Clone)]
pub struct WebhookRequest {
    /// HTTP method
    pub method: http::Method,
    /// Request URI (the challenge handshake reads its query string)
    pub uri: http::Uri,
    /// Request headers
    pub headers: http::HeaderMap,
    /// Raw request body
    pub body: Vec<u8>,
}

impl WebhookRequest {
    /// Creates a request with the given method and URI, no headers, and an
    /// empty body.
    #[must_use]
    pub fn new(method: http::Method, uri: http::Uri) -> Self {
        Self {
            method,
            uri,
            headers: http::HeaderMap::new(),
            body: Vec::new(),
        }
    }

    /// Creates a GET request to the given URI.
    #[must_use]
    pub fn get(uri: http::Uri) -> Self {
        Self::new(http::Method::GET, uri)
    }

    /// Creates a POST request to the given URI.
    #[must_use]
    pub fn post(uri: http::Uri) -> Self {
        Self::new(http::Method::POST, uri)
    }

    /// Adds a header to the request.
    #[must_use]
    pub fn with_header(mut self, name: http::HeaderName, value: http::HeaderValue) -> Self {
        self.headers.append(name, value);
        self
    }

    /// Replaces the request headers.
    #[must_use]
    pub fn with_headers(mut self, headers: http::HeaderMap) -> Self {
        self.headers = headers;
        self
    }

    /// Sets the raw request body.
    #[must_use]
    pub fn with_body(mut self, body: Vec<u8>) -> Self {
        self.body = body;
        self
    }

    /// Returns the first query parameter with the given name,
    /// percent-decoded.
    pub(crate) fn query_param(&self, name: &str) -> Option<String> {
        let query = self.uri.query()?;
        url::form_urlencoded::parse(query.as_bytes())
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Returns a header as a string, if present and valid UTF-8.
    pub(crate) fn header_str(&self, name: &str) -> Option<&str> {
        self.headers.get(name)?.to_str().ok()
    }
}

impl From<http::Request<Vec<u8>>> for WebhookRequest {
    fn from(request: http::Request<Vec<u8>>) -> Self {
        let (parts, body) = request.into_parts();
        Self {
            method: parts.method,
            uri: parts.uri,
            headers: parts.headers,
            body,
        }
    }
}

/// JSON body of a 400 response: `{"message": ...}` with an optional
/// `"error"` detail.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ErrorBody {
    /// What went wrong.
    pub message: String,
    /// Underlying parse or validation detail, when there is one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl ErrorBody {
    pub(crate) fn message(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: None,
        }
    }

    pub(crate) fn with_error(message: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: Some(error.into()),
        }
    }
}

/// The response the webhook endpoint hands back to the transport.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WebhookResponse {
    status: http::StatusCode,
    content_type: Option<&'static str>,
    body: Vec<u8>,
}

impl WebhookResponse {
    /// Echoes a verification challenge back to the platform.
    pub(crate) fn challenge(challenge: &str) -> Self {
        Self {
            status: http::StatusCode::OK,
            content_type: Some("text/plain; charset=utf-8"),
            body: challenge.as_bytes().to_vec(),
        }
    }

    /// The delivery was accepted; handlers run in the background.
    pub(crate) fn accepted() -> Self {
        Self {
            status: http::StatusCode::ACCEPTED,
            content_type: None,
            body: b"202 Accepted".to_vec(),
        }
    }

    /// A structured validation or authentication failure.
    pub(crate) fn bad_request(error: &ErrorBody) -> Self {
        Self {
            status: http::StatusCode::BAD_REQUEST,
            content_type: Some("application/json"),
            body: serde_json::to_vec(error).expect("error body serializes"),
        }
    }

    /// Response status code.
    #[must_use]
    pub const fn status(&self) -> http::StatusCode {
        self.status
    }

    /// `Content-Type` of the response, when one is set.
    #[must_use]
    pub const fn content_type(&self) -> Option<&'static str> {
        self.content_type
    }

    /// Response body bytes.
    #[must_use]
    pub fn body(&self) -> &[u8] {
        &self.body
    }

    /// Consumes the response, returning the body bytes.
    #[must_use]
    pub fn into_body(self) -> Vec<u8> {
        self.body
    }
}

impl From<WebhookResponse> for http::Response<Vec<u8>> {
    fn from(response: WebhookResponse) -> Self {
        let mut out = Self::new(response.body);
        *out.status_mut() = response.status;
        if let Some(content_type) = response.content_type {
            out.headers_mut().insert(
                http::header::CONTENT_TYPE,
                http::HeaderValue::from_static(content_type),
            );
        }
        out
    }
}
