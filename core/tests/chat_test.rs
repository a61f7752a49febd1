mod common;

use async_trait::async_trait;
use burbs_core::chat::{TranscriptLine, FALLBACK_REPLY, GREETING};
use burbs_core::{
    ChatReply, ChatRequest, ChatSession, ChatState, ContextSummary, DashboardBackend,
    DashboardError, DataQuery, Dataset, Result, Sender,
};
use common::MockBackend;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Notify;

/// Backend whose chat call never completes
struct SilentBackend;

#[async_trait]
impl DashboardBackend for SilentBackend {
    async fn fetch_dataset(&self, _query: &DataQuery) -> Result<Dataset> {
        Ok(Dataset::default())
    }

    async fn chat(&self, _request: &ChatRequest) -> Result<ChatReply> {
        std::future::pending::<Result<ChatReply>>().await
    }
}

/// Backend whose chat call parks until the test releases it
#[derive(Default)]
struct GatedBackend {
    started: Notify,
    release: Notify,
    calls: AtomicUsize,
}

#[async_trait]
impl DashboardBackend for GatedBackend {
    async fn fetch_dataset(&self, _query: &DataQuery) -> Result<Dataset> {
        Ok(Dataset::default())
    }

    async fn chat(&self, request: &ChatRequest) -> Result<ChatReply> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.started.notify_one();
        self.release.notified().await;
        Ok(ChatReply {
            response: format!("You asked: {}", request.message),
        })
    }
}

fn context() -> ContextSummary {
    ContextSummary::empty("Bondi")
}

// =========================
// Validation
// =========================

#[tokio::test]
async fn blank_message_sends_nothing() {
    let mut backend = MockBackend::new();
    backend.expect_chat().never();
    let session = ChatSession::new();

    let err = session.send_message(&backend, "   ", context()).await.unwrap_err();
    assert!(matches!(err, DashboardError::Validation(_)));
    assert!(session.messages().is_empty());
    assert_eq!(session.state(), ChatState::Idle);
}

// =========================
// Exchanges
// =========================

#[tokio::test]
async fn successful_exchange_appends_both_messages() {
    let mut backend = MockBackend::new();
    backend
        .expect_chat()
        .withf(|req| req.message == "How are prices trending?" && req.context.suburb == "Bondi")
        .times(1)
        .returning(|_| {
            Ok(ChatReply {
                response: "Up 10% over the last year.".to_string(),
            })
        });
    let session = ChatSession::new();

    let reply = session
        .send_message(&backend, "  How are prices trending?  ", context())
        .await
        .unwrap();
    assert_eq!(reply.sender, Sender::Assistant);
    assert_eq!(reply.position, 1);

    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[0].sender, Sender::User);
    assert_eq!(messages[0].text, "How are prices trending?");
    assert_eq!(messages[1].text, "Up 10% over the last year.");
    assert_eq!(session.state(), ChatState::Idle);
    assert!(session.can_send());
}

#[tokio::test]
async fn failed_exchange_appends_fallback_reply() {
    let mut backend = MockBackend::new();
    backend
        .expect_chat()
        .times(1)
        .returning(|_| Err(DashboardError::Chat("status=500".to_string())));
    let session = ChatSession::new();

    let reply = session.send_message(&backend, "Hello", context()).await.unwrap();
    assert_eq!(reply.text, FALLBACK_REPLY);
    assert_eq!(session.messages().len(), 2);
    assert!(session.last_error().unwrap().contains("status=500"));
    assert_eq!(session.state(), ChatState::Error);
    assert!(session.can_send());
    assert!(!session.is_composing());
}

#[tokio::test]
async fn error_state_clears_on_next_successful_send() {
    let mut backend = MockBackend::new();
    backend
        .expect_chat()
        .withf(|req| req.message == "first")
        .returning(|_| Err(DashboardError::Chat("timeout".to_string())));
    backend
        .expect_chat()
        .withf(|req| req.message == "second")
        .returning(|_| {
            Ok(ChatReply {
                response: "Back online.".to_string(),
            })
        });
    let session = ChatSession::new();

    session.send_message(&backend, "first", context()).await.unwrap();
    assert_eq!(session.state(), ChatState::Error);

    let reply = session.send_message(&backend, "second", context()).await.unwrap();
    assert_eq!(reply.text, "Back online.");
    assert_eq!(session.state(), ChatState::Idle);
    assert_eq!(session.last_error(), None);
}

#[tokio::test]
async fn log_is_append_only_across_exchanges() {
    let mut backend = MockBackend::new();
    backend.expect_chat().times(2).returning(|req| {
        Ok(ChatReply {
            response: format!("re: {}", req.message),
        })
    });
    let session = ChatSession::new();

    session.send_message(&backend, "one", context()).await.unwrap();
    let before = session.messages();
    session.send_message(&backend, "two", context()).await.unwrap();
    let after = session.messages();

    assert_eq!(&after[..before.len()], &before[..]);
    let positions: Vec<usize> = after.iter().map(|m| m.position).collect();
    assert_eq!(positions, vec![0, 1, 2, 3]);
}

// =========================
// Single request in flight
// =========================

#[tokio::test]
async fn second_send_is_rejected_while_awaiting() {
    let backend = Arc::new(GatedBackend::default());
    let session = Arc::new(ChatSession::new());

    let first = {
        let backend = Arc::clone(&backend);
        let session = Arc::clone(&session);
        tokio::spawn(async move {
            session
                .send_message(backend.as_ref(), "first", ContextSummary::empty("Bondi"))
                .await
        })
    };
    backend.started.notified().await;

    assert!(session.is_composing());
    assert!(!session.can_send());
    assert_eq!(
        session.transcript().last(),
        Some(&TranscriptLine::Composing)
    );

    let err = session
        .send_message(backend.as_ref(), "second", context())
        .await
        .unwrap_err();
    assert!(matches!(err, DashboardError::RequestInFlight));
    assert_eq!(session.messages().len(), 1);

    backend.release.notify_one();
    let reply = first.await.unwrap().unwrap();
    assert_eq!(reply.text, "You asked: first");
    assert_eq!(backend.calls.load(Ordering::SeqCst), 1);
    assert!(!session.is_composing());
}

#[tokio::test]
async fn transcript_starts_with_greeting() {
    let session = ChatSession::new();
    assert_eq!(session.transcript(), vec![TranscriptLine::Greeting(GREETING)]);
}

#[tokio::test]
async fn abandoned_send_releases_the_session() {
    let session = ChatSession::new();

    let outcome = tokio::time::timeout(
        Duration::from_millis(20),
        session.send_message(&SilentBackend, "hi", context()),
    )
    .await;
    assert!(outcome.is_err());

    assert!(session.can_send());
    assert!(!session.is_composing());
    assert_eq!(session.state(), ChatState::Error);
    assert!(session.last_error().is_some());
    let messages = session.messages();
    assert_eq!(messages.len(), 2);
    assert_eq!(messages[1].sender, Sender::Assistant);
    assert_eq!(messages[1].text, FALLBACK_REPLY);

    let mut backend = MockBackend::new();
    backend.expect_chat().times(1).returning(|_| {
        Ok(ChatReply {
            response: "Hello again.".to_string(),
        })
    });
    let reply = session.send_message(&backend, "still there?", context()).await.unwrap();
    assert_eq!(reply.text, "Hello again.");
    assert_eq!(reply.position, 3);
    assert_eq!(session.state(), ChatState::Idle);
}
