//! The bot facade: one webhook endpoint plus an authenticated API client.

use std::sync::Arc;

use crate::api::{BotApi, ReqwestClient};
use crate::options::BotOptions;
use crate::webhook::Webhook;

/// A Chat bot.
///
/// Bundles the two halves of the SDK around one shared configuration: the
/// [`Webhook`] that receives and dispatches platform events, and a
/// standalone [`BotApi`] for calls made outside any webhook delivery.
/// (Handlers receive their own [`BotApi`], scoped to the delivery that
/// triggered them.)
///
/// ```no_run
/// use chat_bot::{Bot, BotOptions, EventType};
///
/// # fn main() -> Result<(), chat_bot::ConfigError> {
/// let bot = Bot::new(BotOptions::builder().api_key("my-api-key").build()?);
///
/// bot.webhook().on(EventType::MessageSent, |data, _api| async move {
///     println!("{} said something in {}", data.message.author.name, data.room.name);
///     Ok(())
/// });
/// # Ok(())
/// # }
/// ```
pub struct Bot<H = ReqwestClient> {
    webhook: Webhook<H>,
    api: BotApi<H>,
}

impl Bot<ReqwestClient> {
    /// Creates a bot with the default HTTP transport.
    #[must_use]
    pub fn new(options: BotOptions) -> Self {
        Self::with_client(options, ReqwestClient::new())
    }
}

impl<H: Clone> Bot<H> {
    /// Creates a bot with a custom HTTP transport.
    #[must_use]
    pub fn with_client(options: BotOptions, client: H) -> Self {
        let options = Arc::new(options);
        Self {
            webhook: Webhook::from_shared(Arc::clone(&options), client.clone()),
            api: BotApi::from_shared(options, client, None),
        }
    }

    /// The webhook endpoint.
    #[must_use]
    pub const fn webhook(&self) -> &Webhook<H> {
        &self.webhook
    }

    /// The standalone API client (no webhook correlation).
    #[must_use]
    pub const fn api(&self) -> &BotApi<H> {
        &self.api
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{ApiError, ApiRequest, ApiResponse, HttpClient};

    #[derive(Debug, Clone)]
    struct NoopClient;

    impl HttpClient for NoopClient {
        async fn request(&self, _request: ApiRequest) -> Result<ApiResponse, ApiError> {
            Ok(ApiResponse::new(
                http::StatusCode::OK,
                http::HeaderMap::new(),
                Vec::new(),
            ))
        }
    }

    #[test]
    fn facade_shares_one_configuration() {
        let options = BotOptions::builder()
            .api_key("key")
            .build_with(|_| None)
            .unwrap();
        let bot = Bot::with_client(options, NoopClient);

        // The standalone API carries no webhook correlation.
        assert_eq!(bot.api().request_id(), None);
        let _webhook = bot.webhook();
    }
}
