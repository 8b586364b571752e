/// Insert payloads and row types — these map directly to SQLite rows.
/// Everything here is post-refinement: identities hashed, text scrubbed.

#[derive(Debug, Clone, Default)]
pub struct NewChat {
    pub tg_chat_id: Option<i64>,
    pub name: Option<String>,
    pub character_slug: Option<String>,
    pub character_level: Option<i64>,
    pub uploader_id: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewMessage {
    pub chat_id: i64,
    pub message_id: i64,
    pub message_type: String,
    pub date_iso: String,
    pub date_unixtime: Option<i64>,
    pub edited_at_iso: Option<String>,
    pub reply_to_id: Option<i64>,
    pub media_type: Option<String>,
    pub mime_type: Option<String>,
    pub duration_s: Option<i64>,
    pub from_pseudo_id: Option<String>,
    pub forwarded_from_pseudo_id: Option<String>,
    pub text_raw: Option<String>,
    pub content_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct NewEntity {
    pub message_rowid: i64,
    pub entity_type: String,
    pub entity_text: String,
}

#[derive(Debug, Clone)]
pub struct NewReaction {
    pub message_rowid: i64,
    pub emoji: String,
    pub count: i64,
}

#[derive(Debug, Clone)]
pub struct ChatRow {
    pub chat_id: i64,
    pub tg_chat_id: Option<i64>,
    pub name: Option<String>,
    pub character_slug: Option<String>,
    pub character_level: Option<i64>,
    pub uploader_id: Option<String>,
    pub created_at: String,
}

#[derive(Debug, Clone)]
pub struct MessageRow {
    pub message_rowid: i64,
    pub chat_id: i64,
    pub message_id: i64,
    pub message_type: String,
    pub date_iso: String,
    pub date_unixtime: Option<i64>,
    pub edited_at_iso: Option<String>,
    pub reply_to_id: Option<i64>,
    pub media_type: Option<String>,
    pub mime_type: Option<String>,
    pub duration_s: Option<i64>,
    pub from_pseudo_id: Option<String>,
    pub forwarded_from_pseudo_id: Option<String>,
    pub text_raw: Option<String>,
    pub content_json: Option<String>,
}

#[derive(Debug, Clone)]
pub struct EntityRow {
    pub id: i64,
    pub message_rowid: i64,
    pub entity_type: String,
    pub entity_text: String,
}

#[derive(Debug, Clone)]
pub struct ReactionRow {
    pub id: i64,
    pub message_rowid: i64,
    pub emoji: String,
    pub count: i64,
}
