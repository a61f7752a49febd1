use super::{ListItem, ModuleView, Tone};
use crate::dataset::{ModuleKind, SummaryModule};
use crate::format::{self, NOT_AVAILABLE};
use serde_json::Value;

/// `>= 70` good, `50..=69` caution, below 50 poor
pub fn score_tone(score: i64) -> Tone {
    if score >= 70 {
        Tone::Good
    } else if score >= 50 {
        Tone::Caution
    } else {
        Tone::Poor
    }
}

fn score_text(value: &Value) -> String {
    match value {
        Value::Number(n) => n
            .as_f64()
            .map(format::plain_number)
            .unwrap_or_else(|| n.to_string()),
        Value::String(s) => s.clone(),
        _ => NOT_AVAILABLE.to_string(),
    }
}

pub fn render_summary(module: &SummaryModule) -> ModuleView {
    if module.scores().is_empty() {
        return ModuleView::no_data(ModuleKind::Summary, "No summary data available");
    }

    let items = module
        .scores()
        .iter()
        .map(|score| ListItem {
            title: score.name.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            value: Some(score_text(&score.value)),
            detail: score.comment.clone(),
            note: score.first_summary_line(),
            tone: score_tone(score.numeric_value()),
            share_percent: None,
        })
        .collect();

    ModuleView::content(ModuleKind::Summary, Vec::new(), None, items)
}
