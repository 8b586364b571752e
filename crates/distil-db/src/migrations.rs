use rusqlite::Connection;
use tracing::info;

use crate::StorageError;

pub fn run(conn: &Connection) -> Result<(), StorageError> {
    conn.execute_batch(
        "
        -- Pseudonymised identities. The hash is the primary key; there is
        -- nothing else to know about a user.
        CREATE TABLE IF NOT EXISTS users (
            pseudo_id   TEXT PRIMARY KEY
        );

        CREATE TABLE IF NOT EXISTS chats (
            chat_id         INTEGER PRIMARY KEY AUTOINCREMENT,
            tg_chat_id      INTEGER,
            name            TEXT,
            character_slug  TEXT,
            character_level INTEGER,
            uploader_id     TEXT,
            created_at      TEXT NOT NULL DEFAULT (datetime('now'))
        );

        CREATE INDEX IF NOT EXISTS idx_chats_tg_chat
            ON chats(tg_chat_id);

        CREATE TABLE IF NOT EXISTS messages (
            message_rowid   INTEGER PRIMARY KEY AUTOINCREMENT,
            chat_id         INTEGER NOT NULL REFERENCES chats(chat_id),
            message_id      INTEGER NOT NULL,
            type            TEXT NOT NULL,
            date_iso        TEXT NOT NULL,
            date_unixtime   INTEGER,
            edited_at_iso   TEXT,
            reply_to_id     INTEGER,
            media_type      TEXT,
            mime_type       TEXT,
            duration_s      INTEGER,
            from_pseudo_id  TEXT REFERENCES users(pseudo_id),
            forwarded_from_pseudo_id TEXT REFERENCES users(pseudo_id),
            text_raw        TEXT,
            content_json    TEXT,
            UNIQUE(chat_id, message_id)
        );

        CREATE INDEX IF NOT EXISTS idx_messages_chat
            ON messages(chat_id);

        CREATE TABLE IF NOT EXISTS message_entities (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            message_rowid   INTEGER NOT NULL
                REFERENCES messages(message_rowid) ON DELETE CASCADE,
            entity_type     TEXT NOT NULL,
            entity_text     TEXT NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_entities_message
            ON message_entities(message_rowid);

        CREATE TABLE IF NOT EXISTS reactions (
            id              INTEGER PRIMARY KEY AUTOINCREMENT,
            message_rowid   INTEGER NOT NULL
                REFERENCES messages(message_rowid) ON DELETE CASCADE,
            emoji           TEXT NOT NULL,
            count           INTEGER NOT NULL
        );

        CREATE INDEX IF NOT EXISTS idx_reactions_message
            ON reactions(message_rowid);
        ",
    )?;

    info!("Database migrations complete");
    Ok(())
}
