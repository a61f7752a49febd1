//! Chat session with the property assistant.
//!
//! The message log is append-only. Only one request may be outstanding at a
//! time: a send attempted while awaiting a response is rejected with
//! [`DashboardError::RequestInFlight`], never queued, so replies cannot
//! interleave. A failed exchange leaves the session in [`ChatState::Error`]
//! until the next send; sending is allowed again immediately.

use crate::client::{ChatRequest, DashboardBackend};
use crate::context::ContextSummary;
use crate::{DashboardError, Result};
use serde::{Deserialize, Serialize};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tracing::{debug, error, info, warn};

/// Greeting shown before the first exchange; a display line, not a logged message
pub const GREETING: &str = "G'day! I'm Duke, your Microburbs property expert. Ask me anything about the data on this dashboard - market trends, property insights, or suburb analysis. How can I assist you today?";

/// Assistant reply used for every failed exchange
pub const FALLBACK_REPLY: &str = "I apologize, but I'm having trouble processing your request at the moment. Please try again in a moment.";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    pub sender: Sender,
    pub text: String,
    /// Zero-based position in the log
    pub position: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChatState {
    Idle,
    AwaitingResponse,
    Error,
}

/// One line of the chat widget as it should be drawn
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TranscriptLine {
    Greeting(&'static str),
    Message(ChatMessage),
    Composing,
}

#[derive(Debug)]
struct ChatLog {
    messages: Vec<ChatMessage>,
    state: ChatState,
    last_error: Option<String>,
}

impl ChatLog {
    fn append(&mut self, sender: Sender, text: String) -> ChatMessage {
        let message = ChatMessage {
            sender,
            text,
            position: self.messages.len(),
        };
        self.messages.push(message.clone());
        message
    }

    /// Close the outstanding exchange with the fallback reply
    fn fail(&mut self, detail: String) -> ChatMessage {
        self.state = ChatState::Error;
        self.last_error = Some(detail);
        self.append(Sender::Assistant, FALLBACK_REPLY.to_string())
    }
}

/// Closes the exchange if the send future is dropped while awaiting the backend
struct PendingReply<'a> {
    log: &'a Mutex<ChatLog>,
    settled: bool,
}

impl PendingReply<'_> {
    fn settle(mut self) {
        self.settled = true;
    }
}

impl Drop for PendingReply<'_> {
    fn drop(&mut self) {
        if self.settled {
            return;
        }
        warn!(target: "chat_session", "Chat request abandoned before a reply");
        lock(self.log).fail("Chat request cancelled before a reply".to_string());
    }
}

fn lock(log: &Mutex<ChatLog>) -> MutexGuard<'_, ChatLog> {
    log.lock().unwrap_or_else(PoisonError::into_inner)
}

#[derive(Debug)]
pub struct ChatSession {
    log: Mutex<ChatLog>,
}

impl Default for ChatSession {
    fn default() -> Self {
        Self::new()
    }
}

impl ChatSession {
    pub fn new() -> Self {
        Self {
            log: Mutex::new(ChatLog {
                messages: Vec::new(),
                state: ChatState::Idle,
                last_error: None,
            }),
        }
    }

    /// Snapshot of the message log
    pub fn messages(&self) -> Vec<ChatMessage> {
        lock(&self.log).messages.clone()
    }

    pub fn state(&self) -> ChatState {
        lock(&self.log).state
    }

    /// Whether the send control should be enabled
    pub fn can_send(&self) -> bool {
        self.state() != ChatState::AwaitingResponse
    }

    /// Whether the composing indicator is showing
    pub fn is_composing(&self) -> bool {
        self.state() == ChatState::AwaitingResponse
    }

    /// Detail of the most recent failed exchange, for diagnostics only
    pub fn last_error(&self) -> Option<String> {
        lock(&self.log).last_error.clone()
    }

    /// Greeting, every logged message, then the composing indicator if a
    /// request is outstanding
    pub fn transcript(&self) -> Vec<TranscriptLine> {
        let log = lock(&self.log);
        let mut lines = Vec::with_capacity(log.messages.len() + 2);
        lines.push(TranscriptLine::Greeting(GREETING));
        lines.extend(log.messages.iter().cloned().map(TranscriptLine::Message));
        if log.state == ChatState::AwaitingResponse {
            lines.push(TranscriptLine::Composing);
        }
        lines
    }

    /// Send one user message and wait for the assistant's reply.
    ///
    /// Contract:
    /// - Blank text: `Validation` error, nothing appended, no request
    /// - Request already outstanding: `RequestInFlight`, nothing appended
    /// - Otherwise the user message is appended before the request is issued and
    ///   exactly one assistant message is appended afterwards; a failed request
    ///   appends [`FALLBACK_REPLY`] and the failure is only logged
    /// - Dropping the returned future mid-request counts as a failed request
    pub async fn send_message<B>(
        &self,
        backend: &B,
        text: &str,
        context: ContextSummary,
    ) -> Result<ChatMessage>
    where
        B: DashboardBackend + ?Sized,
    {
        let message = text.trim();
        if message.is_empty() {
            return Err(DashboardError::Validation(
                "Please enter a message".to_string(),
            ));
        }

        {
            let mut log = lock(&self.log);
            if log.state == ChatState::AwaitingResponse {
                debug!(target: "chat_session", "Rejecting send while a reply is outstanding");
                return Err(DashboardError::RequestInFlight);
            }
            log.append(Sender::User, message.to_string());
            log.state = ChatState::AwaitingResponse;
        }
        let pending = PendingReply {
            log: &self.log,
            settled: false,
        };

        info!(
            target: "chat_session",
            chars = message.chars().count(),
            suburb = %context.suburb,
            "Sending chat message"
        );
        let request = ChatRequest {
            message: message.to_string(),
            context,
        };
        let outcome = backend.chat(&request).await;
        pending.settle();

        let mut log = lock(&self.log);
        let reply = match outcome {
            Ok(reply) => {
                debug!(target: "chat_session", chars = reply.response.chars().count(), "Chat reply received");
                log.state = ChatState::Idle;
                log.last_error = None;
                log.append(Sender::Assistant, reply.response)
            }
            Err(e) => {
                error!(target: "chat_session", error = %e, "Chat error");
                log.fail(e.to_string())
            }
        };
        Ok(reply)
    }
}
