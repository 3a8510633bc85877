//! Webhook event model.
//!
//! This module is the single source of truth for what a valid event batch
//! looks like:
//! - Wire types ([`Event`], [`Room`], [`Message`], [`Author`])
//! - The closed set of event tags ([`EventType`])
//! - Whole-batch validation ([`parse_events`], [`ValidationError`])

mod validate;

#[cfg(test)]
mod validate_tests;

pub use validate::{ValidationError, parse_events};

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A room the bot is a member of.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Room {
    pub id: Uuid,
    pub emoji: String,
    pub name: String,
    pub description: String,
}

/// Whether a message was written by a person or another bot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AuthorKind {
    User,
    Bot,
}

/// Message author descriptor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Author {
    #[serde(rename = "type")]
    pub kind: AuthorKind,
    pub id: Uuid,
    pub name: String,
    /// Display hue in degrees, 0 through 360.
    pub hue: f64,
}

/// Opaque attachment payload. The platform defines attachment shapes; the
/// SDK passes them through untouched.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Attachment(pub serde_json::Map<String, serde_json::Value>);

/// A message as delivered in an event.
///
/// `text` is nullable on the wire; a valid message has text, at least one
/// attachment, or both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub id: Uuid,
    pub text: Option<String>,
    pub author: Author,
    pub attachments: Vec<Attachment>,
}

/// Payload shared by the message-shaped events.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MessageEventData {
    pub room: Room,
    pub message: Message,
}

/// The closed set of event tags in the webhook wire format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum EventType {
    /// Any message was sent in a room where the bot is a member.
    #[serde(rename = "messageSent")]
    MessageSent,
    /// This bot was mentioned in a message.
    #[serde(rename = "botMentioned")]
    BotMentioned,
}

impl EventType {
    /// Parse from the wire tag (e.g. `"messageSent"`).
    #[must_use]
    pub fn parse_str(s: &str) -> Option<Self> {
        match s {
            "messageSent" => Some(Self::MessageSent),
            "botMentioned" => Some(Self::BotMentioned),
            _ => None,
        }
    }

    /// The wire tag for this event type.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MessageSent => "messageSent",
            Self::BotMentioned => "botMentioned",
        }
    }
}

impl std::fmt::Display for EventType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A single webhook event: a tag plus the payload shaped by that tag.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", content = "data", rename_all = "camelCase")]
pub enum Event {
    /// Any message was sent in a room where the bot is a member.
    MessageSent(MessageEventData),
    /// This bot was mentioned in a message.
    BotMentioned(MessageEventData),
}

impl Event {
    /// Builds an event from its tag and payload.
    #[must_use]
    pub fn new(event_type: EventType, data: MessageEventData) -> Self {
        match event_type {
            EventType::MessageSent => Self::MessageSent(data),
            EventType::BotMentioned => Self::BotMentioned(data),
        }
    }

    /// The tag of this event.
    #[must_use]
    pub const fn event_type(&self) -> EventType {
        match self {
            Self::MessageSent(_) => EventType::MessageSent,
            Self::BotMentioned(_) => EventType::BotMentioned,
        }
    }

    /// The payload of this event.
    #[must_use]
    pub const fn data(&self) -> &MessageEventData {
        match self {
            Self::MessageSent(data) | Self::BotMentioned(data) => data,
        }
    }

    /// Consumes the event, returning its payload.
    #[must_use]
    pub fn into_data(self) -> MessageEventData {
        match self {
            Self::MessageSent(data) | Self::BotMentioned(data) => data,
        }
    }
}
