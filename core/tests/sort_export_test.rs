mod common;

use burbs_core::export::{self, CSV_HEADER};
use burbs_core::{Dataset, PropertyRecord, SortDirection, SortEngine};
use chrono::NaiveDate;
use common::bondi_dataset;

fn listings() -> Vec<PropertyRecord> {
    bondi_dataset().properties.unwrap().properties
}

fn addresses(records: &[PropertyRecord]) -> Vec<String> {
    records
        .iter()
        .map(|r| r.area_name.clone().unwrap_or_default())
        .collect()
}

// =========================
// Sorting
// =========================

#[test]
fn first_click_sorts_ascending_then_toggles() {
    let mut records = listings();
    let mut engine = SortEngine::new();

    assert_eq!(engine.sort(&mut records, "price"), SortDirection::Asc);
    assert_eq!(records[0].price, Some(950000.0));
    assert_eq!(records[2].price, Some(1500000.0));

    assert_eq!(engine.sort(&mut records, "price"), SortDirection::Desc);
    assert_eq!(records[0].price, Some(1500000.0));

    assert_eq!(engine.sort(&mut records, "price"), SortDirection::Asc);
    assert_eq!(records[0].price, Some(950000.0));
}

#[test]
fn columns_toggle_independently() {
    let mut records = listings();
    let mut engine = SortEngine::new();

    engine.sort(&mut records, "price");
    assert_eq!(engine.sort(&mut records, "bedrooms"), SortDirection::Asc);
    assert_eq!(engine.direction("price"), Some(SortDirection::Asc));
    assert_eq!(engine.sort(&mut records, "price"), SortDirection::Desc);
    assert_eq!(engine.direction("bedrooms"), Some(SortDirection::Asc));
}

#[test]
fn address_sorts_as_text() {
    let mut records = listings();
    let mut engine = SortEngine::new();
    engine.sort(&mut records, "address");
    assert_eq!(
        addresses(&records),
        vec!["12 Beach Rd, Bondi", "3 \"The Crest\" Ave", "8 Hall St"]
    );
}

#[test]
fn land_size_compares_leading_integers() {
    let mut records = listings();
    let mut engine = SortEngine::new();
    engine.sort(&mut records, "land_size");
    assert_eq!(
        addresses(&records),
        vec!["3 \"The Crest\" Ave", "8 Hall St", "12 Beach Rd, Bondi"]
    );
}

#[test]
fn missing_attributes_sort_as_zero() {
    let mut records = listings();
    let mut engine = SortEngine::new();
    engine.sort(&mut records, "bathrooms");
    assert_eq!(records[0].area_name.as_deref(), Some("8 Hall St"));
}

#[test]
fn reset_forgets_directions() {
    let mut records = listings();
    let mut engine = SortEngine::new();
    engine.sort(&mut records, "price");
    engine.reset();
    assert_eq!(engine.direction("price"), None);
    assert_eq!(engine.sort(&mut records, "price"), SortDirection::Asc);
}

// =========================
// CSV export
// =========================

#[test]
fn csv_has_header_and_one_line_per_record() {
    let csv = export::to_csv(&listings());
    let lines: Vec<&str> = csv.lines().collect();
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], CSV_HEADER);
    assert_eq!(
        lines[1],
        "\"12 Beach Rd, Bondi\",1500000,4,2,\"650 m²\",2024-03-01,House"
    );
}

#[test]
fn csv_quotes_embedded_quotes() {
    let csv = export::to_csv(&listings());
    let line = csv.lines().nth(2).unwrap();
    assert!(line.starts_with("\"3 \"\"The Crest\"\" Ave\",950000,2,1,"));
}

#[test]
fn csv_marks_missing_fields() {
    let dataset = Dataset::from_json(r#"{"properties": {"properties": [{"area_name": "1 Lone St"}]}}"#)
        .unwrap();
    let csv = export::to_csv(&dataset.properties.unwrap().properties);
    assert_eq!(
        csv.lines().nth(1),
        Some("\"1 Lone St\",0,N/A,N/A,\"N/A\",N/A,N/A")
    );
}

#[test]
fn empty_listing_exports_header_only() {
    let csv = export::to_csv(&[]);
    assert_eq!(csv.lines().collect::<Vec<_>>(), vec![CSV_HEADER]);
}

#[test]
fn export_filename_uses_suburb_and_date() {
    let date = NaiveDate::from_ymd_opt(2024, 3, 15).unwrap();
    assert_eq!(
        export::export_filename("Bondi", date),
        "microburbs_properties_Bondi_2024-03-15.csv"
    );

    let file = export::export_properties(&listings(), "Bondi", date);
    assert_eq!(file.mime_type, "text/csv");
    assert_eq!(file.content.lines().count(), 4);
}
