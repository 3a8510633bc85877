//! The messages API surface.

use std::sync::Arc;

use serde::Serialize;
use uuid::Uuid;

use crate::headers;
use crate::options::BotOptions;
use crate::webhook::WebhookContext;

use super::{ApiError, ApiRequest, ApiResponse, HttpClient};

/// Endpoint for creating messages, relative to the configured base URL.
const MESSAGES_PATH: &str = "/api/bot/v1/messages";

/// Parameters for creating a message.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateMessage {
    /// The room to send the message in.
    pub room_id: Uuid,
    /// Message content in Markdown format.
    pub markdown: String,
    /// Message being replied to, if any.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reply_to_message_id: Option<Uuid>,
}

/// Message operations against the bot API.
///
/// Obtained from [`BotApi::messages`](super::BotApi::messages). When the
/// parent API object was created for a webhook dispatch, every call also
/// carries the delivery's correlation identifier.
#[derive(Debug, Clone)]
pub struct MessagesApi<H> {
    options: Arc<BotOptions>,
    client: H,
    context: Option<WebhookContext>,
}

impl<H> MessagesApi<H> {
    pub(crate) const fn new(
        options: Arc<BotOptions>,
        client: H,
        context: Option<WebhookContext>,
    ) -> Self {
        Self {
            options,
            client,
            context,
        }
    }
}

impl<H: HttpClient> MessagesApi<H> {
    /// Sends a new message.
    ///
    /// Returns the platform's response as-is; status codes are not
    /// interpreted and nothing is retried.
    ///
    /// # Errors
    ///
    /// Returns [`ApiError`] when the request cannot be built or the
    /// transport fails.
    pub async fn create(&self, message: CreateMessage) -> Result<ApiResponse, ApiError> {
        let url = self
            .options
            .base_url()
            .join(MESSAGES_PATH)
            .map_err(|e| ApiError::InvalidUrl(e.to_string()))?;

        let mut request = ApiRequest::post(url)
            .with_json(&message)?
            .with_header(
                http::header::AUTHORIZATION,
                bearer_value(self.options.api_key())?,
            );

        if let Some(user_agent) = self.options.user_agent() {
            request = request.with_header(
                http::header::USER_AGENT,
                header_value("User-Agent", user_agent)?,
            );
        }

        // Link the call back to the webhook delivery that spawned it.
        if let Some(context) = &self.context {
            request = request.with_header(
                http::HeaderName::from_static(headers::REQUEST_ID),
                header_value("X-Chat-Request-ID", &context.request_id)?,
            );
        }

        self.client.request(request).await
    }
}

fn bearer_value(api_key: &str) -> Result<http::HeaderValue, ApiError> {
    header_value("Authorization", &format!("Bearer {api_key}"))
}

fn header_value(name: &'static str, value: &str) -> Result<http::HeaderValue, ApiError> {
    http::HeaderValue::from_str(value).map_err(|e| ApiError::InvalidHeader {
        name,
        reason: e.to_string(),
    })
}
