// Burbs Core Library
// Suburb property dashboard: data-to-view pipeline and grounded chat

pub mod chat;
pub mod client;
pub mod config;
pub mod context;
pub mod controller;
pub mod dataset;
pub mod export;
pub mod format;
mod lenient;
pub mod render;
pub mod sort;
pub mod store;

// Export core types
pub use chat::{ChatMessage, ChatSession, ChatState, Sender};
pub use client::{ChatReply, ChatRequest, DashboardBackend, DataQuery, HttpBackend};
pub use config::DashboardConfig;
pub use context::{ContextBuilder, ContextSummary};
pub use controller::{DashboardController, UiEvent, UiUpdate};
pub use dataset::{Dataset, ModuleKind, PropertyRecord};
pub use export::ExportFile;
pub use render::{ModuleView, Tone};
pub use sort::{SortDirection, SortEngine};
pub use store::DatasetStore;

// Error types
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Fetch error (status {status:?}): {message}")]
    Fetch {
        status: Option<u16>,
        message: String,
    },

    #[error("Chat error: {0}")]
    Chat(String),

    #[error("A chat request is already awaiting a response")]
    RequestInFlight,

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),
}

impl DashboardError {
    pub fn status_code(&self) -> Option<u16> {
        match self {
            DashboardError::Fetch { status, .. } => *status,
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
