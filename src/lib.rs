//! Bot SDK for Chat.
//!
//! Receive webhook event deliveries from the platform, dispatch them to
//! registered handlers, and call back into the bot API to send messages.
//!
//! The inbound side authenticates deliveries (HMAC-SHA256 over the raw
//! body, opt-in via the webhook secret), validates the event batch against
//! the closed event schema, answers the platform immediately, and runs
//! handlers as background work. Handlers receive the event payload plus an
//! API client carrying the delivery's correlation id.
//!
//! ```no_run
//! use chat_bot::{Bot, BotOptions, CreateMessage, EventType};
//!
//! # #[tokio::main]
//! # async fn main() -> Result<(), Box<dyn std::error::Error>> {
//! // Reads BOT_API_KEY and BOT_WEBHOOK_SECRET from the environment.
//! let bot = Bot::new(BotOptions::builder().build()?);
//!
//! bot.webhook().on(EventType::BotMentioned, |data, api| async move {
//!     api.messages()
//!         .create(CreateMessage {
//!             room_id: data.room.id,
//!             markdown: "You rang?".to_string(),
//!             reply_to_message_id: Some(data.message.id),
//!         })
//!         .await?;
//!     Ok(())
//! });
//!
//! // Hand inbound HTTP requests to `bot.webhook().handle(..)`, or mount
//! // it with `adapter::axum::router` (feature "axum").
//! # Ok(())
//! # }
//! ```

pub mod adapter;
pub mod api;
pub mod bot;
pub mod event;
mod headers;
pub mod options;
pub mod signature;
pub mod text;
pub mod webhook;

pub use api::{BotApi, CreateMessage};
pub use bot::Bot;
pub use event::{Event, EventType, MessageEventData};
pub use options::{BotOptions, ConfigError};
pub use webhook::{HandlerError, Webhook, WebhookRequest, WebhookResponse};
