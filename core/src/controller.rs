//! Dashboard orchestration: user events in, plain view data out.

use crate::chat::{ChatMessage, ChatSession};
use crate::client::DashboardBackend;
use crate::context::{ContextBuilder, ContextSummary};
use crate::dataset::ModuleKind;
use crate::export::{self, ExportFile};
use crate::render::{self, ModuleView};
use crate::store::DatasetStore;
use crate::{DashboardError, Result};
use chrono::NaiveDate;
use std::sync::Arc;
use tracing::{debug, info};

/// A user interaction
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum UiEvent {
    Load {
        suburb: String,
        modules: Vec<ModuleKind>,
    },
    Sort {
        column: String,
    },
    Export {
        date: NaiveDate,
    },
    SendChat {
        text: String,
    },
}

/// What the frontend should draw in response to a [`UiEvent`]
#[derive(Debug, Clone, PartialEq)]
pub enum UiUpdate {
    /// Every present module, in render order
    Rendered(Vec<ModuleView>),
    /// A single module re-rendered in place
    ModuleReplaced(ModuleView),
    Exported(ExportFile),
    ChatAppended(ChatMessage),
}

pub struct DashboardController<B: DashboardBackend + ?Sized> {
    backend: Arc<B>,
    store: DatasetStore,
    chat: Arc<ChatSession>,
    context_builder: ContextBuilder,
    property_type: String,
}

impl<B: DashboardBackend + ?Sized> DashboardController<B> {
    pub fn new(backend: Arc<B>, property_type: impl Into<String>) -> Self {
        Self {
            backend,
            store: DatasetStore::new(),
            chat: Arc::new(ChatSession::new()),
            context_builder: ContextBuilder::default(),
            property_type: property_type.into(),
        }
    }

    pub fn with_context_builder(mut self, builder: ContextBuilder) -> Self {
        self.context_builder = builder;
        self
    }

    pub fn store(&self) -> &DatasetStore {
        &self.store
    }

    /// Shared handle, so a frontend can drive chat alongside other events
    pub fn chat(&self) -> Arc<ChatSession> {
        Arc::clone(&self.chat)
    }

    /// Load a suburb and render every module in the response
    pub async fn load(&mut self, suburb: &str, modules: &[ModuleKind]) -> Result<Vec<ModuleView>> {
        let dataset = self
            .store
            .load(self.backend.as_ref(), suburb, modules, &self.property_type)
            .await?;
        let views = render::render_dataset(dataset);
        info!(target: "dashboard_controller", modules = views.len(), "Rendered dataset");
        Ok(views)
    }

    /// Current views without reloading
    pub fn views(&self) -> Vec<ModuleView> {
        self.store
            .dataset()
            .map(render::render_dataset)
            .unwrap_or_default()
    }

    /// Sort listings by a column and re-render the properties module
    pub fn sort_properties(&mut self, column: &str) -> Result<ModuleView> {
        let direction = self.store.sort_properties(column).ok_or_else(|| {
            DashboardError::Validation("No properties loaded to sort".to_string())
        })?;
        debug!(target: "dashboard_controller", column, ?direction, "Sorted listings");
        self.store
            .dataset()
            .and_then(|d| render::render_module(d, ModuleKind::Properties))
            .ok_or_else(|| DashboardError::Validation("No properties loaded to sort".to_string()))
    }

    /// CSV export of the listings in their current order
    pub fn export_properties(&self, date: NaiveDate) -> Result<ExportFile> {
        let properties = self
            .store
            .dataset()
            .and_then(|d| d.properties.as_ref())
            .ok_or_else(|| DashboardError::Validation("No properties to export".to_string()))?;
        Ok(export::export_properties(
            &properties.properties,
            self.store.suburb().unwrap_or_default(),
            date,
        ))
    }

    /// Context the next chat message would carry
    pub fn context(&self) -> ContextSummary {
        self.store
            .context(&self.context_builder, self.store.suburb().unwrap_or_default())
    }

    pub async fn send_chat(&self, text: &str) -> Result<ChatMessage> {
        let context = self.context();
        self.chat
            .send_message(self.backend.as_ref(), text, context)
            .await
    }

    /// Dispatch one user event
    pub async fn handle(&mut self, event: UiEvent) -> Result<UiUpdate> {
        match event {
            UiEvent::Load { suburb, modules } => {
                self.load(&suburb, &modules).await.map(UiUpdate::Rendered)
            }
            UiEvent::Sort { column } => self.sort_properties(&column).map(UiUpdate::ModuleReplaced),
            UiEvent::Export { date } => self.export_properties(date).map(UiUpdate::Exported),
            UiEvent::SendChat { text } => self.send_chat(&text).await.map(UiUpdate::ChatAppended),
        }
    }
}
