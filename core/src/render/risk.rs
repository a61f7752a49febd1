use super::{ListItem, ModuleView};
use crate::dataset::{ModuleKind, RiskModule};

pub fn render_risk(module: &RiskModule) -> ModuleView {
    if module.risks.is_empty() {
        return ModuleView::no_data(ModuleKind::Risk, "No significant risk factors identified");
    }

    let items = module
        .risks
        .iter()
        .map(|risk| ListItem {
            title: risk.name.clone(),
            detail: Some(risk.visible_descriptors().join(", ")),
            ..ListItem::default()
        })
        .collect();

    ModuleView::content(ModuleKind::Risk, Vec::new(), None, items)
}
