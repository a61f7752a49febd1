use super::{InsightCard, ListItem, ModuleView};
use crate::dataset::{AmenityModule, ModuleKind};
use crate::format;

pub fn render_amenities(module: &AmenityModule) -> ModuleView {
    if module.categories.is_empty() {
        return ModuleView::no_data(ModuleKind::Amenity, "No amenity data available");
    }

    let cards = vec![InsightCard::new(
        "Total Amenities",
        format::number_or_na(module.total),
    )];

    let items = module
        .ranked_categories()
        .into_iter()
        .map(|category| ListItem {
            title: category.label,
            value: Some(category.count.to_string()),
            ..ListItem::default()
        })
        .collect();

    ModuleView::content(ModuleKind::Amenity, cards, None, items)
}
