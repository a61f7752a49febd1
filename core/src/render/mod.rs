// Module renderers - dataset slices to view descriptions
//
// Each renderer reads only its own module slice and returns plain data that any
// frontend (terminal, HTML, TUI) can draw. Missing or empty slices render as a
// single notice rather than failing.

mod amenities;
mod demographics;
mod market;
mod properties;
mod risk;
mod schools;
mod summary;

pub use amenities::render_amenities;
pub use demographics::render_demographics;
pub use market::{change_percent, difference_percent, growth_percent, render_market};
pub use properties::{render_properties, SORTABLE_COLUMNS};
pub use risk::render_risk;
pub use schools::render_schools;
pub use summary::{render_summary, score_tone};

use crate::dataset::{Dataset, ModuleKind};
use serde::{Deserialize, Serialize};

/// Styling hint attached to a value
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum Tone {
    #[default]
    Neutral,
    Positive,
    Negative,
    Good,
    Caution,
    Poor,
}

impl Tone {
    /// Positive at or above zero, negative below (and for NaN)
    pub fn signed(value: f64) -> Self {
        if value >= 0.0 {
            Tone::Positive
        } else {
            Tone::Negative
        }
    }
}

/// Labeled aggregate shown above a module's details
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InsightCard {
    pub label: String,
    pub value: String,
    pub tone: Tone,
}

impl InsightCard {
    pub fn new(label: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            label: label.into(),
            value: value.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn with_tone(mut self, tone: Tone) -> Self {
        self.tone = tone;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Column {
    pub label: String,
    /// Column name to pass to the sort action, when the header is clickable
    pub sort_column: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cell {
    pub text: String,
    pub tone: Tone,
}

impl Cell {
    pub fn plain(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            tone: Tone::Neutral,
        }
    }

    pub fn toned(text: impl Into<String>, tone: Tone) -> Self {
        Self {
            text: text.into(),
            tone,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Table {
    pub columns: Vec<Column>,
    pub rows: Vec<Vec<Cell>>,
}

/// Entry in a list-shaped module (bars, category tiles, risk and score cards)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct ListItem {
    pub title: String,
    pub value: Option<String>,
    pub detail: Option<String>,
    pub note: Option<String>,
    pub tone: Tone,
    /// Bar fill in percent, for proportion charts
    pub share_percent: Option<f64>,
}

/// User action a view offers; the controller maps these back to operations
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum ViewAction {
    SortProperties(String),
    ExportProperties,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum ModuleBody {
    NoData {
        notice: String,
    },
    Content {
        cards: Vec<InsightCard>,
        actions: Vec<ViewAction>,
        table: Option<Table>,
        items: Vec<ListItem>,
    },
}

/// Rendered description of one module section
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ModuleView {
    pub kind: ModuleKind,
    pub title: String,
    pub body: ModuleBody,
}

impl ModuleView {
    pub fn no_data(kind: ModuleKind, notice: impl Into<String>) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            body: ModuleBody::NoData {
                notice: notice.into(),
            },
        }
    }

    pub fn content(
        kind: ModuleKind,
        cards: Vec<InsightCard>,
        table: Option<Table>,
        items: Vec<ListItem>,
    ) -> Self {
        Self {
            kind,
            title: kind.title().to_string(),
            body: ModuleBody::Content {
                cards,
                actions: Vec::new(),
                table,
                items,
            },
        }
    }

    pub fn with_actions(mut self, new_actions: Vec<ViewAction>) -> Self {
        if let ModuleBody::Content { actions, .. } = &mut self.body {
            *actions = new_actions;
        }
        self
    }

    pub fn is_no_data(&self) -> bool {
        matches!(self.body, ModuleBody::NoData { .. })
    }

    pub fn notice(&self) -> Option<&str> {
        match &self.body {
            ModuleBody::NoData { notice } => Some(notice),
            ModuleBody::Content { .. } => None,
        }
    }

    pub fn cards(&self) -> &[InsightCard] {
        match &self.body {
            ModuleBody::Content { cards, .. } => cards,
            ModuleBody::NoData { .. } => &[],
        }
    }

    pub fn card(&self, label: &str) -> Option<&InsightCard> {
        self.cards().iter().find(|c| c.label == label)
    }

    pub fn table(&self) -> Option<&Table> {
        match &self.body {
            ModuleBody::Content { table, .. } => table.as_ref(),
            ModuleBody::NoData { .. } => None,
        }
    }

    pub fn rows(&self) -> &[Vec<Cell>] {
        self.table().map(|t| t.rows.as_slice()).unwrap_or(&[])
    }

    pub fn items(&self) -> &[ListItem] {
        match &self.body {
            ModuleBody::Content { items, .. } => items,
            ModuleBody::NoData { .. } => &[],
        }
    }

    pub fn actions(&self) -> &[ViewAction] {
        match &self.body {
            ModuleBody::Content { actions, .. } => actions,
            ModuleBody::NoData { .. } => &[],
        }
    }
}

/// Render one module if it is present in the dataset
pub fn render_module(dataset: &Dataset, kind: ModuleKind) -> Option<ModuleView> {
    match kind {
        ModuleKind::Properties => dataset.properties.as_ref().map(render_properties),
        ModuleKind::Market => dataset.market.as_ref().map(render_market),
        ModuleKind::Demographics => dataset.demographics.as_ref().map(render_demographics),
        ModuleKind::Schools => dataset.schools.as_ref().map(render_schools),
        ModuleKind::Amenity => dataset.amenity.as_ref().map(render_amenities),
        ModuleKind::Risk => dataset.risk.as_ref().map(render_risk),
        ModuleKind::Summary => dataset.summary.as_ref().map(render_summary),
    }
}

/// Render every present module in fixed order
pub fn render_dataset(dataset: &Dataset) -> Vec<ModuleView> {
    ModuleKind::ALL
        .into_iter()
        .filter_map(|kind| render_module(dataset, kind))
        .collect()
}
