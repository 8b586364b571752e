use rusqlite::{Connection, Transaction, params};
use tracing::debug;

use crate::StorageError;
use crate::models::{NewChat, NewEntity, NewMessage, NewReaction};

/// One transaction's worth of staged writes. Insert methods return the
/// assigned rowid where children need it; ids are visible inside the
/// transaction before commit. Dropping the session rolls back.
pub struct Session<'conn> {
    tx: Transaction<'conn>,
}

impl<'conn> Session<'conn> {
    pub(crate) fn begin(conn: &'conn mut Connection) -> Result<Self, StorageError> {
        Ok(Self {
            tx: conn.transaction()?,
        })
    }

    pub fn insert_chat(&self, chat: &NewChat) -> Result<i64, StorageError> {
        self.tx.execute(
            "INSERT INTO chats (tg_chat_id, name, character_slug, character_level, uploader_id)
             VALUES (?1, ?2, ?3, ?4, ?5)",
            params![
                chat.tg_chat_id,
                chat.name,
                chat.character_slug,
                chat.character_level,
                chat.uploader_id,
            ],
        )?;
        Ok(self.tx.last_insert_rowid())
    }

    /// Idempotent upsert by primary key: re-merging a known pseudonymous id
    /// is a no-op, not an error.
    pub fn merge_user(&self, pseudo_id: &str) -> Result<(), StorageError> {
        self.tx.execute(
            "INSERT OR IGNORE INTO users (pseudo_id) VALUES (?1)",
            [pseudo_id],
        )?;
        Ok(())
    }

    pub fn insert_message(&self, m: &NewMessage) -> Result<i64, StorageError> {
        self.tx.execute(
            "INSERT INTO messages (
                chat_id, message_id, type, date_iso, date_unixtime, edited_at_iso,
                reply_to_id, media_type, mime_type, duration_s,
                from_pseudo_id, forwarded_from_pseudo_id, text_raw, content_json
             ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14)",
            params![
                m.chat_id,
                m.message_id,
                m.message_type,
                m.date_iso,
                m.date_unixtime,
                m.edited_at_iso,
                m.reply_to_id,
                m.media_type,
                m.mime_type,
                m.duration_s,
                m.from_pseudo_id,
                m.forwarded_from_pseudo_id,
                m.text_raw,
                m.content_json,
            ],
        )?;
        Ok(self.tx.last_insert_rowid())
    }

    pub fn insert_entity(&self, e: &NewEntity) -> Result<(), StorageError> {
        self.tx.execute(
            "INSERT INTO message_entities (message_rowid, entity_type, entity_text)
             VALUES (?1, ?2, ?3)",
            params![e.message_rowid, e.entity_type, e.entity_text],
        )?;
        Ok(())
    }

    pub fn insert_reaction(&self, r: &NewReaction) -> Result<(), StorageError> {
        self.tx.execute(
            "INSERT INTO reactions (message_rowid, emoji, count) VALUES (?1, ?2, ?3)",
            params![r.message_rowid, r.emoji, r.count],
        )?;
        Ok(())
    }

    pub fn commit(self) -> Result<(), StorageError> {
        self.tx.commit()?;
        debug!("session committed");
        Ok(())
    }

    pub fn rollback(self) -> Result<(), StorageError> {
        self.tx.rollback()?;
        debug!("session rolled back");
        Ok(())
    }
}
