use super::{ListItem, ModuleView};
use crate::dataset::{DemographicsModule, ModuleKind};
use crate::format::{self, NOT_AVAILABLE};

pub fn render_demographics(module: &DemographicsModule) -> ModuleView {
    if module.age_brackets().is_empty() {
        return ModuleView::no_data(ModuleKind::Demographics, "No demographic data available");
    }

    let items = module
        .age_brackets()
        .iter()
        .map(|bracket| {
            let percent = format::proportion_percent(bracket.proportion.unwrap_or(0.0));
            ListItem {
                title: format!(
                    "{} years",
                    bracket.age.as_deref().unwrap_or(NOT_AVAILABLE)
                ),
                value: Some(format!("{percent}%")),
                share_percent: percent.parse::<f64>().ok(),
                ..ListItem::default()
            }
        })
        .collect();

    ModuleView::content(ModuleKind::Demographics, Vec::new(), None, items)
}
