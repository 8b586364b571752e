use serde::Deserialize;
use serde_json::{Map, Value};

use crate::ValidationError;

/// One Telegram chat export, as the desktop client dumps it.
/// This is the unrefined shape — nothing here has been hashed or scrubbed.
#[derive(Debug, Clone, Deserialize)]
pub struct RawChat {
    pub name: Option<String>,
    #[serde(rename = "type")]
    pub chat_type: Option<String>,
    pub id: Option<i64>,
    pub character_slug: Option<String>,
    pub character_level: Option<i64>,
    pub uploader_tg_id: Option<i64>,
    pub messages: Vec<RawMessage>,
}

impl RawChat {
    /// Validate a raw JSON document against the expected export shape.
    /// The error message carries the serde path of the offending field.
    pub fn parse(value: Value) -> Result<Self, ValidationError> {
        serde_json::from_value(value).map_err(|e| ValidationError(e.to_string()))
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawMessage {
    pub id: Option<i64>,
    #[serde(rename = "type", default = "default_message_type")]
    pub message_type: String,
    pub date: Option<String>,
    pub date_unixtime: Option<String>,
    #[serde(rename = "from")]
    pub from_name: Option<String>,
    pub from_id: Option<String>,
    #[serde(default)]
    pub text: RawText,
    pub text_entities: Option<Vec<RawTextEntity>>,
    pub edited: Option<String>,
    pub edited_unixtime: Option<String>,
    pub reply_to_message_id: Option<i64>,
    pub forwarded_from: Option<String>,
    pub media_type: Option<String>,
    pub mime_type: Option<String>,
    pub duration_seconds: Option<i64>,
    pub reactions: Option<Vec<RawReaction>>,
    /// Every export field without an explicit column lands here; the row
    /// builder turns it into the residual payload after denylisting.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl RawMessage {
    /// Assemble the message text from either the flat form or the run list,
    /// concatenated in document order. This is the pre-redaction text.
    pub fn assembled_text(&self) -> String {
        match &self.text {
            RawText::Flat(s) => s.clone(),
            RawText::Runs(runs) => {
                let mut out = String::new();
                for run in runs {
                    match run {
                        RawTextRun::Plain(s) => out.push_str(s),
                        RawTextRun::Entity(e) => out.push_str(&e.text),
                    }
                }
                out
            }
        }
    }
}

fn default_message_type() -> String {
    "message".to_string()
}

/// Message text is either one flat string or a list of runs.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawText {
    Flat(String),
    Runs(Vec<RawTextRun>),
}

impl Default for RawText {
    fn default() -> Self {
        RawText::Flat(String::new())
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum RawTextRun {
    Plain(String),
    Entity(RawTextEntity),
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawTextEntity {
    #[serde(rename = "type")]
    pub entity_type: String,
    pub text: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct RawReaction {
    pub count: i64,
    pub emoji: String,
    /// Recent reactor identities. Deserialized so they cannot fall through to
    /// the residual payload, and never persisted.
    #[serde(default)]
    pub recent: Option<Value>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn parses_flat_and_run_texts() {
        let chat = RawChat::parse(json!({
            "name": "test",
            "type": "personal_chat",
            "id": 7,
            "messages": [
                {"id": 1, "type": "message", "date": "2025-05-11 18:45:02",
                 "from_id": "user1", "text": "hello"},
                {"id": 2, "type": "message", "date": "2025-05-11 18:46:10",
                 "from_id": "user1",
                 "text": ["see ", {"type": "link", "text": "https://x.com"}, " now"]},
            ]
        }))
        .unwrap();

        assert_eq!(chat.messages[0].assembled_text(), "hello");
        assert_eq!(chat.messages[1].assembled_text(), "see https://x.com now");
    }

    #[test]
    fn unknown_message_fields_are_kept_in_extra() {
        let chat = RawChat::parse(json!({
            "type": "personal_chat",
            "messages": [
                {"id": 1, "type": "message", "date": "2025-05-11 18:45:02",
                 "text": "", "photo": "photos/photo_1.jpg", "width": 640, "height": 480}
            ]
        }))
        .unwrap();

        let extra = &chat.messages[0].extra;
        assert_eq!(extra["photo"], json!("photos/photo_1.jpg"));
        assert_eq!(extra["width"], json!(640));
    }

    #[test]
    fn rejects_wrong_shape() {
        let err = RawChat::parse(json!({"type": "personal_chat"})).unwrap_err();
        assert!(err.to_string().contains("messages"));

        assert!(RawChat::parse(json!({"messages": "not-a-list"})).is_err());
    }

    #[test]
    fn reaction_recent_list_is_parsed_but_separate() {
        let chat = RawChat::parse(json!({
            "type": "personal_chat",
            "messages": [
                {"id": 1, "type": "message", "date": "2025-05-11 18:45:02", "text": "",
                 "reactions": [{"emoji": "👍", "count": 3,
                                "recent": [{"from": "Jane Doe", "from_id": "user99"}]}]}
            ]
        }))
        .unwrap();

        let rx = &chat.messages[0].reactions.as_ref().unwrap()[0];
        assert_eq!(rx.emoji, "👍");
        assert_eq!(rx.count, 3);
        assert!(rx.recent.is_some());
        // Must not have leaked into the residual map.
        assert!(!chat.messages[0].extra.contains_key("reactions"));
    }
}
