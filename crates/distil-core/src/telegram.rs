use std::collections::HashSet;

use serde_json::{Map, Value};
use tracing::{debug, info};

use distil_db::Session;
use distil_db::models::{NewChat, NewEntity, NewMessage, NewReaction};
use distil_pii::{Scrubber, hash_id};
use distil_types::{RawChat, RawMessage};

use crate::error::{Error, TransformError};
use crate::timestamp::{iso8601, to_unix_seconds};
use crate::transform::Transform;

/// Fields that must not survive into the residual payload even though no
/// column models them. Everything with an explicit column is already typed
/// out of the residual map during validation.
const RESIDUAL_DENYLIST: &[&str] = &["file", "file_name"];

/// How the chat display name is persisted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum NamePolicy {
    /// Replace the name with its salted hash.
    #[default]
    Hash,
    /// Keep the name as redacted free text.
    Scrub,
}

/// Refines ONE Telegram chat dump into the normalized schema.
/// Always produces pseudonymised output: identities hashed, text scrubbed,
/// reactor lists dropped.
pub struct TelegramChatTransformer {
    salt: String,
    name_policy: NamePolicy,
    scrubber: Scrubber,
}

impl TelegramChatTransformer {
    pub fn new(salt: impl Into<String>) -> Self {
        Self {
            salt: salt.into(),
            name_policy: NamePolicy::default(),
            scrubber: Scrubber::new(),
        }
    }

    pub fn with_name_policy(mut self, policy: NamePolicy) -> Self {
        self.name_policy = policy;
        self
    }

    fn chat_row(&self, raw: &RawChat) -> NewChat {
        let name = raw.name.as_deref().and_then(|n| match self.name_policy {
            NamePolicy::Hash => hash_id(Some(n), &self.salt),
            NamePolicy::Scrub => Some(self.scrubber.scrub(n)),
        });
        let uploader = raw.uploader_tg_id.map(|id| id.to_string());
        NewChat {
            tg_chat_id: raw.id,
            name,
            character_slug: raw.character_slug.clone(),
            character_level: raw.character_level,
            uploader_id: hash_id(uploader.as_deref(), &self.salt),
        }
    }

    fn message_row(
        &self,
        chat_id: i64,
        m: &RawMessage,
        from_pseudo_id: Option<String>,
        forwarded_from_pseudo_id: Option<String>,
    ) -> Result<NewMessage, TransformError> {
        Ok(NewMessage {
            chat_id,
            message_id: m.id.unwrap_or(0),
            message_type: m.message_type.clone(),
            date_iso: iso8601(m.date.as_deref())?,
            date_unixtime: to_unix_seconds(m.date_unixtime.as_deref()),
            edited_at_iso: m.edited.as_deref().map(|e| iso8601(Some(e))).transpose()?,
            reply_to_id: m.reply_to_message_id,
            media_type: m.media_type.clone(),
            mime_type: m.mime_type.clone(),
            duration_s: m.duration_seconds,
            from_pseudo_id,
            forwarded_from_pseudo_id,
            text_raw: Some(self.scrubber.scrub(&m.assembled_text())),
            content_json: residual_payload(m)?,
        })
    }
}

/// Junk-drawer JSON for media and odd edge fields: whatever the validated
/// message did not map to a column, minus nulls and the denylist. Stored
/// only when non-empty.
fn residual_payload(m: &RawMessage) -> Result<Option<String>, TransformError> {
    let mut content = Map::new();
    for (k, v) in &m.extra {
        if v.is_null() || RESIDUAL_DENYLIST.contains(&k.as_str()) {
            continue;
        }
        content.insert(k.clone(), v.clone());
    }
    if content.is_empty() {
        Ok(None)
    } else {
        Ok(Some(serde_json::to_string(&Value::Object(content))?))
    }
}

impl Transform for TelegramChatTransformer {
    fn transform(&mut self, session: &Session<'_>, doc: &Value) -> Result<(), Error> {
        let raw = RawChat::parse(doc.clone())?;

        let chat_id = session.insert_chat(&self.chat_row(&raw))?;

        // De-dup cache for pseudonymous ids, scoped to this one invocation.
        let mut seen: HashSet<String> = HashSet::new();

        for m in &raw.messages {
            let from_hash = hash_id(m.from_id.as_deref(), &self.salt);
            let fwd_hash = hash_id(m.forwarded_from.as_deref(), &self.salt);

            // Users must exist before the message references them.
            for hash in [&from_hash, &fwd_hash].into_iter().flatten() {
                if seen.insert(hash.clone()) {
                    session.merge_user(hash)?;
                }
            }

            let row = self.message_row(chat_id, m, from_hash, fwd_hash)?;
            let message_rowid = session.insert_message(&row)?;

            for te in m.text_entities.iter().flatten() {
                session.insert_entity(&NewEntity {
                    message_rowid,
                    entity_type: te.entity_type.clone(),
                    entity_text: self.scrubber.scrub(&te.text),
                })?;
            }

            // Only emoji and count survive; the recent reactor list is
            // dropped for privacy.
            for rx in m.reactions.iter().flatten() {
                session.insert_reaction(&NewReaction {
                    message_rowid,
                    emoji: rx.emoji.clone(),
                    count: rx.count,
                })?;
            }

            debug!(message_rowid, "message staged");
        }

        info!(chat_id, messages = raw.messages.len(), "chat staged");
        Ok(())
    }
}
