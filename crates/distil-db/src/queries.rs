use rusqlite::{OptionalExtension, Row};

use crate::models::{ChatRow, EntityRow, MessageRow, ReactionRow};
use crate::{Database, StorageError};

/// Read side, for verification after commit. The refinement itself only ever
/// writes through a [`crate::Session`].
impl Database {
    pub fn first_chat(&self) -> Result<Option<ChatRow>, StorageError> {
        self.conn
            .query_row(
                "SELECT chat_id, tg_chat_id, name, character_slug, character_level,
                        uploader_id, created_at
                 FROM chats ORDER BY chat_id LIMIT 1",
                [],
                chat_from_row,
            )
            .optional()
            .map_err(StorageError::from)
    }

    pub fn messages(&self, chat_id: i64) -> Result<Vec<MessageRow>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT message_rowid, chat_id, message_id, type, date_iso, date_unixtime,
                    edited_at_iso, reply_to_id, media_type, mime_type, duration_s,
                    from_pseudo_id, forwarded_from_pseudo_id, text_raw, content_json
             FROM messages WHERE chat_id = ?1 ORDER BY message_rowid",
        )?;
        let rows = stmt
            .query_map([chat_id], message_from_row)?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn entities(&self, message_rowid: i64) -> Result<Vec<EntityRow>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, message_rowid, entity_type, entity_text
             FROM message_entities WHERE message_rowid = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map([message_rowid], |row| {
                Ok(EntityRow {
                    id: row.get(0)?,
                    message_rowid: row.get(1)?,
                    entity_type: row.get(2)?,
                    entity_text: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn reactions(&self, message_rowid: i64) -> Result<Vec<ReactionRow>, StorageError> {
        let mut stmt = self.conn.prepare(
            "SELECT id, message_rowid, emoji, count
             FROM reactions WHERE message_rowid = ?1 ORDER BY id",
        )?;
        let rows = stmt
            .query_map([message_rowid], |row| {
                Ok(ReactionRow {
                    id: row.get(0)?,
                    message_rowid: row.get(1)?,
                    emoji: row.get(2)?,
                    count: row.get(3)?,
                })
            })?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }

    pub fn user_count(&self) -> Result<i64, StorageError> {
        self.conn
            .query_row("SELECT COUNT(*) FROM users", [], |row| row.get(0))
            .map_err(StorageError::from)
    }

    pub fn user_ids(&self) -> Result<Vec<String>, StorageError> {
        let mut stmt = self
            .conn
            .prepare("SELECT pseudo_id FROM users ORDER BY pseudo_id")?;
        let rows = stmt
            .query_map([], |row| row.get(0))?
            .collect::<Result<Vec<_>, _>>()?;
        Ok(rows)
    }
}

fn chat_from_row(row: &Row<'_>) -> rusqlite::Result<ChatRow> {
    Ok(ChatRow {
        chat_id: row.get(0)?,
        tg_chat_id: row.get(1)?,
        name: row.get(2)?,
        character_slug: row.get(3)?,
        character_level: row.get(4)?,
        uploader_id: row.get(5)?,
        created_at: row.get(6)?,
    })
}

fn message_from_row(row: &Row<'_>) -> rusqlite::Result<MessageRow> {
    Ok(MessageRow {
        message_rowid: row.get(0)?,
        chat_id: row.get(1)?,
        message_id: row.get(2)?,
        message_type: row.get(3)?,
        date_iso: row.get(4)?,
        date_unixtime: row.get(5)?,
        edited_at_iso: row.get(6)?,
        reply_to_id: row.get(7)?,
        media_type: row.get(8)?,
        mime_type: row.get(9)?,
        duration_s: row.get(10)?,
        from_pseudo_id: row.get(11)?,
        forwarded_from_pseudo_id: row.get(12)?,
        text_raw: row.get(13)?,
        content_json: row.get(14)?,
    })
}
