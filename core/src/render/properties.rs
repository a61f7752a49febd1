use super::{Cell, Column, InsightCard, ModuleView, Table, ViewAction};
use crate::dataset::{ModuleKind, PropertiesModule};
use crate::format::{self, NOT_AVAILABLE};

/// Header label and sort column for every clickable listing column
pub const SORTABLE_COLUMNS: [(&str, &str); 5] = [
    ("Address", "address"),
    ("Price", "price"),
    ("Beds", "bedrooms"),
    ("Baths", "bathrooms"),
    ("Land Size", "land_size"),
];

pub fn render_properties(module: &PropertiesModule) -> ModuleView {
    if module.properties.is_empty() {
        return ModuleView::no_data(ModuleKind::Properties, "No properties found");
    }

    let insights = &module.insights;
    let cards = vec![
        InsightCard::new("Total Listings", format::number_or_na(insights.total)),
        InsightCard::new("Average Price", format::currency_or_na(insights.avg_price)),
        InsightCard::new(
            "Average Land Size",
            insights
                .avg_land_size
                .map(|v| format!("{} m²", format::group_thousands(v)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        InsightCard::new("Price per m²", format::currency_or_na(insights.price_per_sqm)),
    ];

    let mut columns: Vec<Column> = SORTABLE_COLUMNS
        .iter()
        .map(|(label, column)| Column {
            label: label.to_string(),
            sort_column: Some(column.to_string()),
        })
        .collect();
    columns.push(Column {
        label: "Listing Date".to_string(),
        sort_column: None,
    });

    let rows = module
        .properties
        .iter()
        .map(|p| {
            vec![
                Cell::plain(
                    p.area_name
                        .clone()
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ),
                Cell::plain(format::currency(p.price_or_zero())),
                Cell::plain(p.bedrooms().to_string()),
                Cell::plain(p.bathrooms().to_string()),
                Cell::plain(format::text_or_na(p.land_size())),
                Cell::plain(
                    p.listing_date
                        .clone()
                        .filter(|s| !s.is_empty())
                        .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                ),
            ]
        })
        .collect();

    let mut actions = vec![ViewAction::ExportProperties];
    actions.extend(
        SORTABLE_COLUMNS
            .iter()
            .map(|(_, column)| ViewAction::SortProperties(column.to_string())),
    );

    ModuleView::content(
        ModuleKind::Properties,
        cards,
        Some(Table { columns, rows }),
        Vec::new(),
    )
    .with_actions(actions)
}
