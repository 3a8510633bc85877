//! Plain-text helpers for message content.

use std::sync::LazyLock;

use regex::Regex;

static MENTION: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"@\[.*?\]\(.*?\)").expect("mention pattern compiles"));

/// Strips mention markup like `@[name](mention://user/<uuid>)` from
/// message text, leaving everything else untouched.
#[must_use]
pub fn strip_mentions(text: &str) -> String {
    MENTION.replace_all(text, "").into_owned()
}
