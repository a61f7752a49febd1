#![allow(dead_code)]

use async_trait::async_trait;
use burbs_core::{ChatReply, ChatRequest, DashboardBackend, DataQuery, Dataset, Result};
use mockall::mock;

mock! {
    pub Backend {}

    #[async_trait]
    impl DashboardBackend for Backend {
        async fn fetch_dataset(&self, query: &DataQuery) -> Result<Dataset>;
        async fn chat(&self, request: &ChatRequest) -> Result<ChatReply>;
    }
}

/// Response body for a Bondi load with every module selected
pub const BONDI_JSON: &str = r#"{
  "properties": {
    "insights": {"total": 3, "avg_price": 1250000, "avg_land_size": 512.5, "price_per_sqm": 2439.02},
    "properties": [
      {"area_name": "12 Beach Rd, Bondi", "price": 1500000,
       "attributes": {"bedrooms": 4, "bathrooms": 2, "land_size": "650 m²"},
       "listing_date": "2024-03-01", "property_type": "House"},
      {"area_name": "3 \"The Crest\" Ave", "price": "950000",
       "attributes": {"bedrooms": 2, "bathrooms": 1, "land_size": "375 m²"},
       "listing_date": "2024-02-20", "property_type": "House"},
      {"area_name": "8 Hall St", "price": 1300000,
       "attributes": {"bedrooms": 3, "land_size": 512},
       "listing_date": "2024-03-10", "property_type": "House"}
    ]
  },
  "market": {
    "recent_trends": [
      {"date": "2024-03", "value": 220000, "sa3": {"value": 200000}},
      {"date": "2024-02", "value": 210000, "sa3": {"value": 205000}},
      {"date": "2024-01", "value": 205000, "sa3": {"value": 210000}},
      {"date": "2023-12", "value": 200000, "sa3": {"value": 200000}}
    ]
  },
  "demographics": {
    "age_brackets": [
      {"age": "0-14", "proportion": 0.18},
      {"age": "25-34", "proportion": 0.3125}
    ]
  },
  "schools": {
    "total": 6,
    "schools": [
      {"name": "Bondi Public School", "school_sector_type": "Public", "school_level_type": "Primary",
       "naplan_rank": 120, "attendance_rate": 0.935, "boys": 210, "girls": 198},
      {"name": "Rose Bay Secondary", "school_sector_type": "Public", "school_level_type": "Secondary",
       "naplan_rank": "N/A", "attendance_rate": 0.88, "boys": 400, "girls": 380},
      {"name": "St Catherine's", "school_sector_type": "Private", "school_level_type": "Combined",
       "naplan_rank": 15, "attendance_rate": 0.95, "boys": 0, "girls": 900},
      {"name": "Waverley College", "school_sector_type": "Private", "school_level_type": "Secondary",
       "naplan_rank": 40, "attendance_rate": 0.92, "boys": 1500, "girls": 0},
      {"name": "Bondi Beach Public", "school_sector_type": "Public", "school_level_type": "Primary"},
      {"name": "Dover Heights Public", "school_sector_type": "Public", "school_level_type": "Primary",
       "attendance_rate": 0.9}
    ]
  },
  "amenity": {
    "categories": {"Cafe": 12, "Park": 4, "Gym": 12, "Beach": 2, "School": 3, "Library": 1},
    "total": 34
  },
  "risk": {
    "risks": {"Flood": ["Low", "", "Coastal"], "Bushfire": ["None"]}
  },
  "summary": {
    "scores": [
      {"name": "Lifestyle", "value": 82, "comment": "Great beach lifestyle", "summary": ["Walkable", "Vibrant"]},
      {"name": "Safety", "value": "55", "comment": "Average", "summary": []},
      {"name": "Affordability", "value": 31, "comment": "Expensive"},
      {"name": "Transport", "value": 75, "comment": "Good bus links"}
    ]
  }
}"#;

pub fn bondi_dataset() -> Dataset {
    Dataset::from_json(BONDI_JSON).expect("fixture decodes")
}

pub fn trend_json(values: &[f64]) -> String {
    let points: Vec<String> = values
        .iter()
        .enumerate()
        .map(|(i, v)| format!(r#"{{"date": "P{i}", "value": {v}, "sa3": {{"value": {v}}}}}"#))
        .collect();
    format!(r#"{{"market": {{"recent_trends": [{}]}}}}"#, points.join(","))
}
