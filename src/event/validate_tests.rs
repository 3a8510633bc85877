//! Tests for batch validation.

use serde_json::{Value, json};

use super::{AuthorKind, EventType, parse_events};

const ROOM_ID: &str = "6f8b24f1-54f0-4b6e-9f3c-0a4f39c2a101";
const MESSAGE_ID: &str = "9d1a2f45-8f7e-4a0b-b3a5-5a0f6e1c2b02";
const AUTHOR_ID: &str = "1c9f7e23-6a4d-49d8-8b1e-7e2d0c3a4f03";

/// A fully valid single-event batch element.
fn sample_event() -> Value {
    json!({
        "type": "messageSent",
        "data": {
            "room": {
                "id": ROOM_ID,
                "emoji": "🦆",
                "name": "general",
                "description": "The pond"
            },
            "message": {
                "id": MESSAGE_ID,
                "text": "hello",
                "author": {
                    "type": "user",
                    "id": AUTHOR_ID,
                    "name": "June",
                    "hue": 210
                },
                "attachments": []
            }
        }
    })
}

fn expect_error(batch: Value) -> super::ValidationError {
    parse_events(&batch).unwrap_err()
}

mod accepted {
    use super::*;

    #[test]
    fn valid_batch_parses() {
        let events = parse_events(&json!([sample_event()])).unwrap();

        assert_eq!(events.len(), 1);
        assert_eq!(events[0].event_type(), EventType::MessageSent);
        let data = events[0].data();
        assert_eq!(data.room.name, "general");
        assert_eq!(data.message.text.as_deref(), Some("hello"));
        assert_eq!(data.message.author.kind, AuthorKind::User);
    }

    #[test]
    fn empty_batch_parses() {
        assert_eq!(parse_events(&json!([])).unwrap(), vec![]);
    }

    #[test]
    fn bot_mentioned_shares_the_message_shape() {
        let mut event = sample_event();
        event["type"] = json!("botMentioned");
        event["data"]["message"]["author"]["type"] = json!("bot");

        let events = parse_events(&json!([event])).unwrap();
        assert_eq!(events[0].event_type(), EventType::BotMentioned);
        assert_eq!(events[0].data().message.author.kind, AuthorKind::Bot);
    }

    #[test]
    fn null_text_with_attachment_is_valid() {
        let mut event = sample_event();
        event["data"]["message"]["text"] = Value::Null;
        event["data"]["message"]["attachments"] = json!([{"kind": "image"}]);

        let events = parse_events(&json!([event])).unwrap();
        assert_eq!(events[0].data().message.text, None);
        assert_eq!(events[0].data().message.attachments.len(), 1);
    }

    #[test]
    fn hue_boundaries_are_inclusive() {
        for hue in [0, 360] {
            let mut event = sample_event();
            event["data"]["message"]["author"]["hue"] = json!(hue);
            assert!(parse_events(&json!([event])).is_ok(), "hue {hue}");
        }
    }

    #[test]
    fn unknown_object_fields_are_ignored() {
        let mut event = sample_event();
        event["data"]["room"]["topic"] = json!("extra");

        assert!(parse_events(&json!([event])).is_ok());
    }
}

mod rejected {
    use super::*;

    #[test]
    fn document_must_be_an_array() {
        let error = expect_error(json!({"events": []}));

        assert_eq!(error.path, "$");
        assert_eq!(error.to_string(), "$: expected an array of events");
    }

    #[test]
    fn unknown_event_type() {
        let mut event = sample_event();
        event["type"] = json!("roomDeleted");

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].type");
        assert_eq!(error.reason, "unknown event type 'roomDeleted'");
    }

    #[test]
    fn missing_field_is_located_by_path() {
        let mut event = sample_event();
        event["data"]["room"]
            .as_object_mut()
            .unwrap()
            .remove("name");

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].data.room.name");
        assert_eq!(error.reason, "missing required field");
    }

    #[test]
    fn missing_text_field_is_rejected() {
        // `text` is nullable, not optional: the key must be present.
        let mut event = sample_event();
        event["data"]["message"]
            .as_object_mut()
            .unwrap()
            .remove("text");

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].data.message.text");
    }

    #[test]
    fn invalid_uuid() {
        let mut event = sample_event();
        event["data"]["message"]["id"] = json!("not-a-uuid");

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].data.message.id");
        assert_eq!(error.reason, "must be a valid UUID");
    }

    #[test]
    fn hue_out_of_range() {
        for hue in [json!(-1), json!(360.5), json!("210")] {
            let mut event = sample_event();
            event["data"]["message"]["author"]["hue"] = hue;

            let error = expect_error(json!([event]));
            assert_eq!(error.path, "[0].data.message.author.hue");
            assert_eq!(error.reason, "must be a number between 0 and 360");
        }
    }

    #[test]
    fn author_type_must_be_user_or_bot() {
        let mut event = sample_event();
        event["data"]["message"]["author"]["type"] = json!("admin");

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].data.message.author.type");
    }

    #[test]
    fn empty_message_is_rejected() {
        let mut event = sample_event();
        event["data"]["message"]["text"] = Value::Null;
        event["data"]["message"]["attachments"] = json!([]);

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].data.message");
        assert_eq!(error.reason, "message must have text or at least one attachment");
    }

    #[test]
    fn attachments_must_be_objects() {
        let mut event = sample_event();
        event["data"]["message"]["attachments"] = json!(["file.png"]);

        let error = expect_error(json!([event]));
        assert_eq!(error.path, "[0].data.message.attachments[0]");
        assert_eq!(error.reason, "expected an object");
    }

    #[test]
    fn one_bad_element_rejects_the_whole_batch() {
        let mut second = sample_event();
        second["type"] = json!("somethingElse");

        let error = expect_error(json!([sample_event(), second]));
        assert_eq!(error.path, "[1].type");
    }

    #[test]
    fn element_must_be_an_object() {
        let error = expect_error(json!([42]));
        assert_eq!(error.path, "[0]");
        assert_eq!(error.reason, "expected an object");
    }
}
