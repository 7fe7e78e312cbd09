//! E2E messaging tests for QuickChat.
//!
//! Tests composing, sending, searching, reporting, and saving messages.

mod common;

use common::{send, store, TestStore, DINNER, MIKE, OTHER};
use quickchat::message::DISREGARD_CONFIRMED;
use quickchat::{
    ComposeRequest, MessageSession, MessageState, PersistencePort, ReloadPolicy, SendError,
};

/// Test the dinner example from compose to send.
#[test]
fn test_send_dinner_message() {
    let mut session = MessageSession::new("You");
    let sent = session.send(&ComposeRequest::new(MIKE, DINNER)).unwrap();

    let id = sent.id().unwrap().to_string();
    assert_eq!(sent.hash(), format!("{}:1:HITONIGHT", &id[..2]));
    assert_eq!(sent.recipient(), MIKE);
    assert_eq!(sent.state(), MessageState::Sent);

    assert_eq!(session.store_ref().find_by_id(&id).unwrap().content(), DINNER);
    assert_eq!(session.total_sent(), 1);
}

/// Test that oversized content is rejected on send but clipped on compose.
#[test]
fn test_overflow_paths_diverge() {
    let mut session = MessageSession::new("You");
    let long = "a".repeat(300);

    let err = session.send(&ComposeRequest::new(MIKE, long.clone())).unwrap_err();
    assert_eq!(err, SendError::TooLong { excess: 50 });
    assert!(session.store_ref().is_empty());

    let draft = session.compose(&ComposeRequest::new(MIKE, long));
    assert_eq!(draft.content_length(), 250);
    assert!(session.send_message(draft).is_ok());
}

/// Test searching by recipient fragment.
#[test]
fn test_search_by_recipient() {
    let mut session = MessageSession::new("You");
    send(&mut session, MIKE, "Where are you?");
    send(&mut session, OTHER, "Running late");

    let found = session.store_ref().find_by_recipient_substring("718");
    assert_eq!(found.len(), 1);
    assert_eq!(found[0].recipient(), MIKE);
}

/// Test deleting by hash removes exactly one message.
#[test]
fn test_delete_by_hash() {
    let mut session = MessageSession::new("You");
    let hash = send(&mut session, MIKE, "Delete me");
    send(&mut session, OTHER, "Keep me");

    assert!(session.delete_by_hash(&hash));
    assert!(!session.delete_by_hash(&hash));
    assert_eq!(session.store_ref().len(), 1);
}

/// Test a full session report.
#[test]
fn test_session_report() {
    let mut session = MessageSession::new("You");
    send(&mut session, MIKE, DINNER);
    send(&mut session, OTHER, "Ok");
    store(&mut session, "not a number", "Fix the number later");

    let draft = session.compose(&ComposeRequest::new(MIKE, "Never mind"));
    let outcome = session.disregard(draft, true).unwrap();
    assert_eq!(outcome.text(), DISREGARD_CONFIRMED);

    let report = session.report();
    assert_eq!(report.counts.sent, 2);
    assert_eq!(report.counts.stored, 1);
    assert_eq!(report.counts.disregarded, 1);
    assert_eq!(report.longest_sent.unwrap().content(), DINNER);
}

/// Test saving and reloading keeps the user-visible fields.
#[test]
fn test_save_and_reload_round_trip() {
    let test_store = TestStore::new();
    let port = test_store.port();

    let mut session = MessageSession::open(&port, ReloadPolicy::Regenerate, "You");
    assert!(session.store_ref().is_empty());
    send(&mut session, MIKE, DINNER);
    send(&mut session, OTHER, "See you soon");
    store(&mut session, MIKE, "Draft for later");
    session.save(&port).unwrap();
    assert!(test_store.path().exists());

    let reloaded = MessageSession::open(&port, ReloadPolicy::Regenerate, "You");
    assert_eq!(reloaded.store_ref().len(), 3);

    for (before, after) in session.store_ref().iter().zip(reloaded.store_ref().iter()) {
        let before = before.to_record();
        let after = after.to_record();
        assert_eq!(before.recipient, after.recipient);
        assert_eq!(before.content, after.content);
        assert_eq!(before.sent, after.sent);
        assert_eq!(before.stored, after.stored);
        assert!(reloaded.store_ref().find_by_id(&before.id).is_none());
    }
}

/// Test the preserve policy keeps IDs findable after reload.
#[test]
fn test_reload_preserving_ids() {
    let test_store = TestStore::new();
    let port = test_store.port();

    let mut session = MessageSession::new("You");
    let id = session
        .send(&ComposeRequest::new(MIKE, DINNER))
        .unwrap()
        .id()
        .unwrap()
        .to_string();
    session.save(&port).unwrap();

    let reloaded = MessageSession::open(&port, ReloadPolicy::Preserve, "You");
    let found = reloaded.store_ref().find_by_id(&id).unwrap();
    assert_eq!(found.hash(), format!("{}:1:HITONIGHT", &id[..2]));
    assert_eq!(reloaded.next_sequence(), 2);
}

/// Test that a corrupt store file degrades to an empty session.
#[test]
fn test_corrupt_store_starts_empty() {
    let test_store = TestStore::new();
    let port = test_store.port();
    std::fs::create_dir_all(test_store.path().parent().unwrap()).unwrap();
    std::fs::write(test_store.path(), "[{\"id\": 1").unwrap();

    assert!(port.load().is_err());
    let session = MessageSession::open(&port, ReloadPolicy::Regenerate, "You");
    assert!(session.store_ref().is_empty());
}
