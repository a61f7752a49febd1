mod common;

use burbs_core::{DashboardError, Dataset, ModuleKind};
use common::{bondi_dataset, BONDI_JSON};

// =========================
// Module presence
// =========================

#[test]
fn full_response_decodes_every_module() {
    let dataset = bondi_dataset();
    assert_eq!(dataset.modules(), ModuleKind::ALL.to_vec());
    assert!(!dataset.is_empty());
}

#[test]
fn only_requested_modules_are_present() {
    let dataset = Dataset::from_json(r#"{"schools": {"total": 0, "schools": []}}"#).unwrap();
    assert_eq!(dataset.modules(), vec![ModuleKind::Schools]);
    assert!(dataset.properties.is_none());
    assert!(dataset.contains(ModuleKind::Schools));
}

#[test]
fn null_slices_are_absent() {
    let dataset =
        Dataset::from_json(r#"{"properties": null, "schools": {"schools": []}}"#).unwrap();
    assert!(dataset.properties.is_none());
    assert_eq!(dataset.modules(), vec![ModuleKind::Schools]);
}

#[test]
fn missing_and_empty_lists_stay_distinct() {
    let dataset = Dataset::from_json(r#"{"demographics": {}, "summary": {"scores": []}}"#).unwrap();
    let demographics = dataset.demographics.unwrap();
    assert_eq!(demographics.age_brackets.as_ref().map(Vec::len), None);
    assert!(demographics.age_brackets().is_empty());
    let summary = dataset.summary.unwrap();
    assert_eq!(summary.scores.as_ref().map(Vec::len), Some(0));
}

#[test]
fn unknown_modules_are_ignored() {
    let dataset = Dataset::from_json(r#"{"weather": {"temp": 21}}"#).unwrap();
    assert!(dataset.is_empty());
}

#[test]
fn non_object_body_is_a_fetch_error() {
    let err = Dataset::from_json("[1, 2, 3]").unwrap_err();
    assert!(matches!(err, DashboardError::Fetch { status: None, .. }));

    let err = Dataset::from_json("<html>oops</html>").unwrap_err();
    assert!(matches!(err, DashboardError::Fetch { .. }));
}

// =========================
// Tolerant decoding
// =========================

#[test]
fn numeric_strings_decode_as_numbers() {
    let dataset = bondi_dataset();
    let props = dataset.properties.unwrap();
    assert_eq!(props.properties[1].price, Some(950000.0));
}

#[test]
fn malformed_slice_degrades_to_empty_module() {
    let dataset = Dataset::from_json(r#"{"market": "unavailable", "risk": null}"#).unwrap();
    assert!(dataset.market.unwrap().recent_trends.is_empty());
    assert!(dataset.risk.unwrap().risks.is_empty());
}

#[test]
fn missing_listing_fields_stay_missing() {
    let dataset = Dataset::from_json(r#"{"properties": {"properties": [{}]}}"#).unwrap();
    let props = dataset.properties.unwrap();
    let record = &props.properties[0];
    assert_eq!(record.area_name, None);
    assert_eq!(record.price_or_zero(), 0.0);
    assert_eq!(record.bedrooms(), 0);
    assert!(record.land_size().is_none());
    assert_eq!(props.insights.total, None);
}

// =========================
// Keyed collections keep document order
// =========================

#[test]
fn amenity_categories_keep_document_order() {
    let dataset = Dataset::from_json(BONDI_JSON).unwrap();
    let amenity = dataset.amenity.unwrap();
    let labels: Vec<&str> = amenity.categories.iter().map(|c| c.label.as_str()).collect();
    assert_eq!(labels, vec!["Cafe", "Park", "Gym", "Beach", "School", "Library"]);

    let ranked: Vec<String> = amenity.ranked_categories().into_iter().map(|c| c.label).collect();
    assert_eq!(ranked, vec!["Cafe", "Gym", "Park", "School", "Beach", "Library"]);
}

#[test]
fn risk_entries_keep_document_order_and_blank_descriptors() {
    let dataset = bondi_dataset();
    let risk = dataset.risk.unwrap();
    assert_eq!(risk.risks[0].name, "Flood");
    assert_eq!(risk.risks[0].descriptors, vec!["Low", "", "Coastal"]);
    assert_eq!(risk.risks[0].visible_descriptors(), vec!["Low", "Coastal"]);
    assert_eq!(risk.risks[1].name, "Bushfire");
}

#[test]
fn summary_values_parse_leniently() {
    let dataset = bondi_dataset();
    let summary = dataset.summary.unwrap();
    let scores = summary.scores();
    assert_eq!(scores[0].numeric_value(), 82);
    assert_eq!(scores[1].numeric_value(), 55);
    assert_eq!(scores[0].first_summary_line(), Some("Walkable".to_string()));
    assert_eq!(scores[1].first_summary_line(), None);
    assert_eq!(scores[2].first_summary_line(), None);
}

// =========================
// Module names
// =========================

#[test]
fn module_names_round_trip_through_from_str() {
    for kind in ModuleKind::ALL {
        assert_eq!(kind.as_str().parse::<ModuleKind>().unwrap(), kind);
    }
    assert!(matches!(
        "weather".parse::<ModuleKind>(),
        Err(DashboardError::Validation(_))
    ));
}
