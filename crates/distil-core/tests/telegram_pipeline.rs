use distil_core::{Error, TelegramChatTransformer, Transform};
use distil_db::Database;
use serde_json::{Value, json};

const SALT: &str = "test-salt";

fn run(db: &mut Database, doc: &Value) -> Result<(), Error> {
    TelegramChatTransformer::new(SALT).process(db, doc)
}

fn secret_group() -> Value {
    json!({
        "id": 1,
        "name": "Secret Group",
        "messages": [
            {"id": 1, "from_id": "u1", "text": "Call me at 555-123-4567 or john@x.com"}
        ]
    })
}

#[test]
fn refines_one_chat_end_to_end() {
    let mut db = Database::open_in_memory().unwrap();
    run(&mut db, &secret_group()).unwrap();

    let chat = db.first_chat().unwrap().expect("one chat row");
    assert_eq!(chat.tg_chat_id, Some(1));
    let name = chat.name.expect("hashed name");
    assert_ne!(name, "Secret Group");
    assert_eq!(name.len(), 64);
    assert!(name.chars().all(|c| c.is_ascii_hexdigit()));

    assert_eq!(db.user_count().unwrap(), 1);

    let messages = db.messages(chat.chat_id).unwrap();
    assert_eq!(messages.len(), 1);
    let msg = &messages[0];
    assert_eq!(msg.message_id, 1);
    assert_eq!(
        msg.text_raw.as_deref(),
        Some("Call me at [PHONE] or [EMAIL]")
    );
    assert!(msg.from_pseudo_id.as_deref().unwrap().len() == 64);
    assert_ne!(msg.from_pseudo_id.as_deref(), Some("u1"));

    assert!(db.entities(msg.message_rowid).unwrap().is_empty());
    assert!(db.reactions(msg.message_rowid).unwrap().is_empty());
}

#[test]
fn rerunning_the_same_chat_yields_the_same_pseudonyms() {
    let mut db = Database::open_in_memory().unwrap();
    run(&mut db, &secret_group()).unwrap();
    let first = db.messages(1).unwrap()[0].from_pseudo_id.clone();

    // Each invocation is independent: a second run stages a second chat,
    // but hashing is stable so no new identity appears.
    run(&mut db, &secret_group()).unwrap();
    let second = db.messages(2).unwrap()[0].from_pseudo_id.clone();

    assert_eq!(first, second);
    assert_eq!(db.user_count().unwrap(), 1);
}

#[test]
fn reactor_identities_never_reach_storage() {
    let mut db = Database::open_in_memory().unwrap();
    run(
        &mut db,
        &json!({
            "id": 2,
            "name": "reactors",
            "messages": [{
                "id": 1, "from_id": "u1", "date": "2025-05-11 18:45:02", "text": "nice",
                "reactions": [
                    {"emoji": "🔥", "count": 2,
                     "recent": [{"from": "Jane Doe", "from_id": "user4242"}]}
                ]
            }]
        }),
    )
    .unwrap();

    let chat = db.first_chat().unwrap().unwrap();
    let msg = &db.messages(chat.chat_id).unwrap()[0];
    let reactions = db.reactions(msg.message_rowid).unwrap();
    assert_eq!(reactions.len(), 1);
    assert_eq!(reactions[0].emoji, "🔥");
    assert_eq!(reactions[0].count, 2);

    // The reactor list must not survive anywhere, including the residual.
    assert!(msg.content_json.is_none());
}

#[test]
fn forwarded_identity_gets_its_own_user_row() {
    let mut db = Database::open_in_memory().unwrap();
    run(
        &mut db,
        &json!({
            "id": 3,
            "messages": [
                {"id": 1, "from_id": "u1", "forwarded_from": "Some Channel",
                 "date": "2025-05-11 18:45:02", "text": "fwd"},
                {"id": 2, "from_id": "u1", "date": "2025-05-11 18:46:02", "text": "again"}
            ]
        }),
    )
    .unwrap();

    // u1 is cached after first sight; the forward adds exactly one more.
    assert_eq!(db.user_count().unwrap(), 2);

    let chat = db.first_chat().unwrap().unwrap();
    let messages = db.messages(chat.chat_id).unwrap();
    let fwd = messages[0].forwarded_from_pseudo_id.as_deref().unwrap();
    assert_eq!(fwd.len(), 64);
    assert!(db.user_ids().unwrap().contains(&fwd.to_string()));
}

#[test]
fn text_runs_and_entities_are_scrubbed() {
    let mut db = Database::open_in_memory().unwrap();
    run(
        &mut db,
        &json!({
            "id": 4,
            "messages": [{
                "id": 1, "from_id": "u1", "date": "2025-05-11 18:45:02",
                "text": ["ping ", {"type": "mention", "text": "@someuser1"}, " about it"],
                "text_entities": [{"type": "mention", "text": "@someuser1"}]
            }]
        }),
    )
    .unwrap();

    let chat = db.first_chat().unwrap().unwrap();
    let msg = &db.messages(chat.chat_id).unwrap()[0];
    assert_eq!(msg.text_raw.as_deref(), Some("ping [TG_USERNAME] about it"));

    let entities = db.entities(msg.message_rowid).unwrap();
    assert_eq!(entities.len(), 1);
    assert_eq!(entities[0].entity_type, "mention");
    assert_eq!(entities[0].entity_text, "[TG_USERNAME]");
}

#[test]
fn residual_payload_keeps_media_but_never_filenames() {
    let mut db = Database::open_in_memory().unwrap();
    run(
        &mut db,
        &json!({
            "id": 5,
            "messages": [{
                "id": 1, "from_id": "u1", "date": "2025-05-11 18:45:02", "text": "",
                "photo": "photos/photo_7.jpg", "width": 640, "height": 480,
                "file": "files/doc.pdf", "file_name": "doc.pdf"
            }]
        }),
    )
    .unwrap();

    let chat = db.first_chat().unwrap().unwrap();
    let msg = &db.messages(chat.chat_id).unwrap()[0];
    let content: Value = serde_json::from_str(msg.content_json.as_deref().unwrap()).unwrap();
    assert_eq!(content["photo"], json!("photos/photo_7.jpg"));
    assert_eq!(content["width"], json!(640));
    assert!(content.get("file").is_none());
    assert!(content.get("file_name").is_none());
}

#[test]
fn duplicate_original_message_id_rolls_back_the_whole_chat() {
    let mut db = Database::open_in_memory().unwrap();
    let err = run(
        &mut db,
        &json!({
            "id": 6,
            "messages": [
                {"id": 9, "from_id": "u1", "date": "2025-05-11 18:45:02", "text": "first"},
                {"id": 9, "from_id": "u2", "date": "2025-05-11 18:46:02", "text": "second"}
            ]
        }),
    )
    .unwrap_err();

    match err {
        Error::Storage(e) => assert!(e.is_constraint_violation()),
        other => panic!("expected storage error, got {other}"),
    }

    // Strict atomicity: no chat, no messages, no users.
    assert!(db.first_chat().unwrap().is_none());
    assert_eq!(db.user_count().unwrap(), 0);
}

#[test]
fn invalid_document_writes_nothing() {
    let mut db = Database::open_in_memory().unwrap();
    let err = run(&mut db, &json!({"id": 7, "messages": "nope"})).unwrap_err();
    assert!(matches!(err, Error::Validation(_)));
    assert!(db.first_chat().unwrap().is_none());
}

#[test]
fn no_raw_identifier_survives_anywhere() {
    let mut db = Database::open_in_memory().unwrap();
    run(
        &mut db,
        &json!({
            "id": 8,
            "name": "Secret Group",
            "uploader_tg_id": 4242,
            "messages": [
                {"id": 1, "from_id": "user12345", "date": "2025-05-11 18:45:02",
                 "text": "hello there"}
            ]
        }),
    )
    .unwrap();

    let chat = db.first_chat().unwrap().unwrap();
    let uploader = chat.uploader_id.unwrap();
    assert_eq!(uploader.len(), 64);
    assert!(!uploader.contains("4242"));

    for user in db.user_ids().unwrap() {
        assert_ne!(user, "user12345");
        assert_eq!(user.len(), 64);
    }
}
