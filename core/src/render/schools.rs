use super::{Cell, Column, InsightCard, ModuleView, Table};
use crate::dataset::{ModuleKind, SchoolsModule};
use crate::format::{self, NOT_AVAILABLE};

pub fn render_schools(module: &SchoolsModule) -> ModuleView {
    if module.schools.is_empty() {
        return ModuleView::no_data(ModuleKind::Schools, "No schools found");
    }

    let cards = vec![
        InsightCard::new("Total Schools", format::number_or_na(module.total)),
        InsightCard::new("Public Schools", module.public_count().to_string()),
        InsightCard::new("Private Schools", module.private_count().to_string()),
    ];

    let columns = ["School Name", "Type", "Level", "NAPLAN", "Attendance", "Students"]
        .into_iter()
        .map(|label| Column {
            label: label.to_string(),
            sort_column: None,
        })
        .collect();

    let or_na = |field: &Option<String>| field.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string());

    let rows = module
        .schools
        .iter()
        .map(|s| {
            let attendance = s
                .attendance_rate
                .filter(|rate| *rate != 0.0 && !rate.is_nan())
                .map(|rate| format!("{}%", format::to_fixed(rate * 100.0, 0)))
                .unwrap_or_else(|| NOT_AVAILABLE.to_string());
            vec![
                Cell::plain(or_na(&s.name)),
                Cell::plain(or_na(&s.school_sector_type)),
                Cell::plain(or_na(&s.school_level_type)),
                Cell::plain(format::text_or_na(s.naplan_rank.as_ref())),
                Cell::plain(attendance),
                Cell::plain(s.student_count().to_string()),
            ]
        })
        .collect();

    ModuleView::content(
        ModuleKind::Schools,
        cards,
        Some(Table { columns, rows }),
        Vec::new(),
    )
}
