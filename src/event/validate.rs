//! Whole-batch validation of raw webhook payloads.
//!
//! The dispatcher hands this module the parsed JSON document and gets back
//! either every event fully typed, or the first violation located by field
//! path. Validation is all-or-nothing: one malformed element rejects the
//! whole batch.

use serde_json::{Map, Value};
use thiserror::Error;
use uuid::Uuid;

use super::{Attachment, Author, AuthorKind, Event, EventType, Message, MessageEventData, Room};

/// A single schema violation, located by field path.
///
/// Paths use `$` for the document root, `[i]` for array elements, and dots
/// for object fields, e.g. `[1].data.message.author.hue`.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{path}: {reason}")]
pub struct ValidationError {
    /// Path to the offending value.
    pub path: String,
    /// Why the value was rejected.
    pub reason: String,
}

impl ValidationError {
    fn new(path: impl Into<String>, reason: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            reason: reason.into(),
        }
    }
}

/// Validates a raw JSON document as a webhook event batch.
///
/// The document must be an array in which every element matches one of the
/// known event shapes, selected by its `type` field. Unknown types are
/// rejected, not ignored.
///
/// # Errors
///
/// Returns the first [`ValidationError`] encountered.
pub fn parse_events(value: &Value) -> Result<Vec<Event>, ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(ValidationError::new("$", "expected an array of events"));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| parse_event(&format!("[{index}]"), item))
        .collect()
}

fn parse_event(path: &str, value: &Value) -> Result<Event, ValidationError> {
    let object = require_object(path, value)?;

    let tag = require_string(&field(path, "type"), get(path, object, "type")?)?;
    let Some(event_type) = EventType::parse_str(tag) else {
        return Err(ValidationError::new(
            field(path, "type"),
            format!("unknown event type '{tag}'"),
        ));
    };

    let data_path = field(path, "data");
    let data = parse_event_data(&data_path, get(path, object, "data")?)?;

    Ok(Event::new(event_type, data))
}

fn parse_event_data(path: &str, value: &Value) -> Result<MessageEventData, ValidationError> {
    let object = require_object(path, value)?;

    Ok(MessageEventData {
        room: parse_room(&field(path, "room"), get(path, object, "room")?)?,
        message: parse_message(&field(path, "message"), get(path, object, "message")?)?,
    })
}

fn parse_room(path: &str, value: &Value) -> Result<Room, ValidationError> {
    let object = require_object(path, value)?;

    Ok(Room {
        id: require_uuid(&field(path, "id"), get(path, object, "id")?)?,
        emoji: require_string(&field(path, "emoji"), get(path, object, "emoji")?)?.to_string(),
        name: require_string(&field(path, "name"), get(path, object, "name")?)?.to_string(),
        description: require_string(&field(path, "description"), get(path, object, "description")?)?
            .to_string(),
    })
}

fn parse_message(path: &str, value: &Value) -> Result<Message, ValidationError> {
    let object = require_object(path, value)?;

    let text = match get(path, object, "text")? {
        Value::Null => None,
        Value::String(text) => Some(text.clone()),
        _ => {
            return Err(ValidationError::new(
                field(path, "text"),
                "must be a string or null",
            ));
        }
    };

    let attachments = parse_attachments(
        &field(path, "attachments"),
        get(path, object, "attachments")?,
    )?;

    if text.is_none() && attachments.is_empty() {
        return Err(ValidationError::new(
            path,
            "message must have text or at least one attachment",
        ));
    }

    Ok(Message {
        id: require_uuid(&field(path, "id"), get(path, object, "id")?)?,
        text,
        author: parse_author(&field(path, "author"), get(path, object, "author")?)?,
        attachments,
    })
}

fn parse_author(path: &str, value: &Value) -> Result<Author, ValidationError> {
    let object = require_object(path, value)?;

    let kind = match require_string(&field(path, "type"), get(path, object, "type")?)? {
        "user" => AuthorKind::User,
        "bot" => AuthorKind::Bot,
        _ => {
            return Err(ValidationError::new(
                field(path, "type"),
                "must be either 'user' or 'bot'",
            ));
        }
    };

    let hue_path = field(path, "hue");
    let hue = get(path, object, "hue")?
        .as_f64()
        .filter(|hue| (0.0..=360.0).contains(hue))
        .ok_or_else(|| ValidationError::new(&hue_path, "must be a number between 0 and 360"))?;

    Ok(Author {
        kind,
        id: require_uuid(&field(path, "id"), get(path, object, "id")?)?,
        name: require_string(&field(path, "name"), get(path, object, "name")?)?.to_string(),
        hue,
    })
}

fn parse_attachments(path: &str, value: &Value) -> Result<Vec<Attachment>, ValidationError> {
    let Some(items) = value.as_array() else {
        return Err(ValidationError::new(path, "expected an array"));
    };

    items
        .iter()
        .enumerate()
        .map(|(index, item)| {
            let item_path = format!("{path}[{index}]");
            let object = require_object(&item_path, item)?;
            Ok(Attachment(object.clone()))
        })
        .collect()
}

fn field(path: &str, name: &str) -> String {
    format!("{path}.{name}")
}

fn get<'a>(
    path: &str,
    object: &'a Map<String, Value>,
    name: &str,
) -> Result<&'a Value, ValidationError> {
    object
        .get(name)
        .ok_or_else(|| ValidationError::new(field(path, name), "missing required field"))
}

fn require_object<'a>(path: &str, value: &'a Value) -> Result<&'a Map<String, Value>, ValidationError> {
    value
        .as_object()
        .ok_or_else(|| ValidationError::new(path, "expected an object"))
}

fn require_string<'a>(path: &str, value: &'a Value) -> Result<&'a str, ValidationError> {
    value
        .as_str()
        .ok_or_else(|| ValidationError::new(path, "expected a string"))
}

fn require_uuid(path: &str, value: &Value) -> Result<Uuid, ValidationError> {
    let raw = require_string(path, value)?;
    Uuid::parse_str(raw).map_err(|_| ValidationError::new(path, "must be a valid UUID"))
}
