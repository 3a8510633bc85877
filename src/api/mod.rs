//! Outbound calls to the Chat bot API.
//!
//! This module provides:
//! - Request/response value types and the client abstraction
//!   ([`ApiRequest`], [`ApiResponse`], [`HttpClient`])
//! - Production HTTP client implementation ([`ReqwestClient`])
//! - The API facade handed to webhook handlers ([`BotApi`])
//! - Message operations ([`MessagesApi`], [`CreateMessage`])

mod client;
mod error;
mod http;
mod messages;


pub use client::ReqwestClient;
pub use error::ApiError;
pub use http::{ApiRequest, ApiResponse, HttpClient};
pub use messages::{CreateMessage, MessagesApi};

use std::sync::Arc;

use crate::options::BotOptions;
use crate::webhook::WebhookContext;

/// Authenticated access to the bot API.
///
/// Standalone instances make plain API calls. Instances passed to webhook
/// handlers additionally carry the delivery's `X-Chat-Request-ID`, which
/// is echoed on every outbound call so the platform can link those calls
/// to the webhook that spawned them.
#[derive(Debug, Clone)]
pub struct BotApi<H = ReqwestClient> {
    options: Arc<BotOptions>,
    client: H,
    context: Option<WebhookContext>,
}

impl BotApi<ReqwestClient> {
    /// Creates a standalone API client with the default HTTP transport.
    #[must_use]
    pub fn new(options: BotOptions) -> Self {
        Self::with_client(options, ReqwestClient::new())
    }
}

impl<H> BotApi<H> {
    /// Creates a standalone API client with a custom HTTP transport.
    #[must_use]
    pub fn with_client(options: BotOptions, client: H) -> Self {
        Self::from_shared(Arc::new(options), client, None)
    }

    pub(crate) const fn from_shared(
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

    /// The correlation identifier of the webhook delivery this instance
    /// was created for, if any.
    #[must_use]
    pub fn request_id(&self) -> Option<&str> {
        self.context.as_ref().map(|context| context.request_id.as_str())
    }

    /// Message operations.
    #[must_use]
    pub fn messages(&self) -> MessagesApi<H>
    where
        H: Clone,
    {
        MessagesApi::new(
            Arc::clone(&self.options),
            self.client.clone(),
            self.context.clone(),
        )
    }
}
