//! Header names shared between the webhook and API layers.

/// Correlation identifier attached by the platform to every delivery.
pub(crate) const REQUEST_ID: &str = "x-chat-request-id";

/// HMAC-SHA256 signature over the raw request body.
pub(crate) const SIGNATURE: &str = "x-hub-signature-256";
