//! Session lifecycle through the public API
//!
//! Timer-driven tests run on a paused clock so the simulated reply delay
//! elapses instantly and deterministically.

use std::sync::Arc;
use std::time::Duration;

use edcare::responders::{CannedResponder, SymptomResponder};
use edcare::speech::{listen_once, DictationRecognizer};
use edcare::{InputCoordinator, Message, Role, SessionStore, SubmitOutcome};

const DELAY: Duration = Duration::from_millis(1500);

fn chat_session() -> (SessionStore, InputCoordinator) {
    let store = SessionStore::new();
    let coordinator = InputCoordinator::new(
        store.clone(),
        Arc::new(CannedResponder::chat(Some(21))),
        DELAY,
    );
    (store, coordinator)
}

#[tokio::test(start_paused = true)]
async fn test_hello_scenario() {
    let (store, mut coordinator) = chat_session();

    assert_eq!(coordinator.submit("hello"), SubmitOutcome::Accepted);
    let state = store.snapshot();
    assert!(state.is_busy());
    assert_eq!(state.messages(), &[Message::user("hello")]);

    tokio::time::sleep(DELAY - Duration::from_millis(1)).await;
    assert!(store.is_busy());
    assert_eq!(store.messages().len(), 1);

    store.wait_until_idle().await;
    let messages = store.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].role(), Role::Assistant);
    assert!(CannedResponder::chat(None)
        .replies()
        .contains(&messages[1].content()));
}

#[tokio::test(start_paused = true)]
async fn test_second_submission_while_pending_is_dropped() {
    let (store, mut coordinator) = chat_session();

    assert_eq!(coordinator.submit("a"), SubmitOutcome::Accepted);
    assert_eq!(coordinator.submit("b"), SubmitOutcome::Busy);

    store.wait_until_idle().await;
    let roles: Vec<Role> = store.messages().iter().map(|m| m.role()).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(store.messages()[0].content(), "a");
}

#[tokio::test(start_paused = true)]
async fn test_messages_alternate_over_many_turns() {
    let (store, mut coordinator) = chat_session();

    for turn in ["one", "two", "three"] {
        assert!(coordinator.submit(turn).is_accepted());
        store.wait_until_idle().await;
    }

    let messages = store.messages();
    assert_eq!(messages.len(), 6);
    for (i, message) in messages.iter().enumerate() {
        let expected = if i % 2 == 0 { Role::User } else { Role::Assistant };
        assert_eq!(message.role(), expected);
    }
    assert_eq!(messages[4].content(), "three");
}

#[tokio::test(start_paused = true)]
async fn test_observer_sees_busy_then_idle() {
    let (store, mut coordinator) = chat_session();
    let mut rx = store.subscribe();

    coordinator.submit("watch me");
    rx.changed().await.unwrap();
    assert!(rx.borrow_and_update().is_busy());

    rx.changed().await.unwrap();
    let state = rx.borrow_and_update().clone();
    assert!(!state.is_busy());
    assert_eq!(state.len(), 2);
}

#[tokio::test(start_paused = true)]
async fn test_teardown_mid_delay_suppresses_reply() {
    let (store, mut coordinator) = chat_session();

    coordinator.submit("bye");
    tokio::time::sleep(Duration::from_millis(500)).await;
    coordinator.shutdown().await;

    tokio::time::sleep(DELAY * 2).await;
    assert_eq!(store.messages(), vec![Message::user("bye")]);

    store.clear();
    let state = store.snapshot();
    assert!(state.is_empty());
    assert!(!state.is_busy());
}

#[tokio::test(start_paused = true)]
async fn test_clear_mid_delay_then_resubmit_keeps_alternation() {
    let (store, mut coordinator) = chat_session();

    assert!(coordinator.submit("a").is_accepted());
    tokio::time::sleep(Duration::from_millis(1000)).await;
    store.clear();
    assert!(coordinator.submit("b").is_accepted());

    // Past the moment the reply to "a" was due
    tokio::time::sleep(Duration::from_millis(600)).await;
    assert_eq!(store.messages(), vec![Message::user("b")]);
    assert!(store.is_busy());
    assert_eq!(coordinator.submit("c"), SubmitOutcome::Busy);

    store.wait_until_idle().await;
    let roles: Vec<Role> = store.messages().iter().map(|m| m.role()).collect();
    assert_eq!(roles, vec![Role::User, Role::Assistant]);
    assert_eq!(store.messages()[0].content(), "b");

    assert!(coordinator.submit("c").is_accepted());
    store.wait_until_idle().await;
    let roles: Vec<Role> = store.messages().iter().map(|m| m.role()).collect();
    assert_eq!(
        roles,
        vec![Role::User, Role::Assistant, Role::User, Role::Assistant]
    );
}

#[tokio::test(start_paused = true)]
async fn test_clear_while_pending_leaves_session_empty() {
    let (store, mut coordinator) = chat_session();

    coordinator.submit("never answered");
    tokio::time::sleep(Duration::from_millis(200)).await;
    store.clear();
    let state = store.snapshot();
    assert!(state.is_empty());
    assert!(!state.is_busy());

    store.wait_until_idle().await;
    tokio::time::sleep(DELAY * 2).await;
    assert!(store.messages().is_empty());
    assert!(!store.is_busy());
    assert!(!coordinator.has_pending_reply());
}

#[tokio::test(start_paused = true)]
async fn test_dropping_coordinator_suppresses_reply() {
    let (store, mut coordinator) = chat_session();
    coordinator.submit("gone");
    drop(coordinator);

    tokio::time::sleep(DELAY * 2).await;
    assert_eq!(store.messages().len(), 1);
}

#[tokio::test(start_paused = true)]
async fn test_sessions_are_independent() {
    let (first, mut first_coordinator) = chat_session();
    let (second, mut second_coordinator) = chat_session();

    first_coordinator.submit("first");
    assert!(!second.is_busy());
    assert_eq!(second_coordinator.submit("second"), SubmitOutcome::Accepted);

    first.wait_until_idle().await;
    second.wait_until_idle().await;
    assert_eq!(first.messages()[0].content(), "first");
    assert_eq!(second.messages()[0].content(), "second");
    assert_ne!(first.id(), second.id());
}

#[tokio::test(start_paused = true)]
async fn test_speech_path_reaches_responder() {
    let store = SessionStore::new();
    let mut coordinator = InputCoordinator::new(
        store.clone(),
        Arc::new(SymptomResponder),
        Duration::from_millis(2000),
    );
    let mut recognizer = DictationRecognizer::new("she has a fever and a sore throat");

    let mut interims = 0;
    let outcome = listen_once(&mut recognizer, &mut coordinator, |_| interims += 1)
        .await
        .unwrap();
    assert_eq!(outcome, Some(SubmitOutcome::Accepted));
    assert_eq!(interims, 7);

    store.wait_until_idle().await;
    let messages = store.messages();
    assert_eq!(messages[0].content(), "she has a fever and a sore throat");
    assert!(messages[1].content().contains("respiratory infection"));
}
