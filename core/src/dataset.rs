//! Dataset model: one optional slice per dashboard module.
//!
//! A [`Dataset`] mirrors the `/api/data` response for the selected suburb. Each
//! module is decoded on its own; a slice that does not match its expected shape
//! degrades to an empty default instead of failing the whole load.

use crate::lenient;
use crate::{DashboardError, Result};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::value::RawValue;
use serde_json::{Map, Value};
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;
use tracing::warn;

/// Named slice of backend data
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Properties,
    Market,
    Demographics,
    Schools,
    Amenity,
    Risk,
    Summary,
}

impl ModuleKind {
    /// Every module, in render order
    pub const ALL: [ModuleKind; 7] = [
        ModuleKind::Properties,
        ModuleKind::Market,
        ModuleKind::Demographics,
        ModuleKind::Schools,
        ModuleKind::Amenity,
        ModuleKind::Risk,
        ModuleKind::Summary,
    ];

    /// Wire name used in the `endpoints` query parameter and response keys
    pub fn as_str(&self) -> &'static str {
        match self {
            ModuleKind::Properties => "properties",
            ModuleKind::Market => "market",
            ModuleKind::Demographics => "demographics",
            ModuleKind::Schools => "schools",
            ModuleKind::Amenity => "amenity",
            ModuleKind::Risk => "risk",
            ModuleKind::Summary => "summary",
        }
    }

    /// Section heading
    pub fn title(&self) -> &'static str {
        match self {
            ModuleKind::Properties => "Property Listings",
            ModuleKind::Market => "Market Insights",
            ModuleKind::Demographics => "Demographics",
            ModuleKind::Schools => "Schools",
            ModuleKind::Amenity => "Local Amenities",
            ModuleKind::Risk => "Risk Factors",
            ModuleKind::Summary => "Area Summary Scores",
        }
    }
}

impl fmt::Display for ModuleKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ModuleKind {
    type Err = DashboardError;

    fn from_str(s: &str) -> Result<Self> {
        let name = s.trim();
        ModuleKind::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .ok_or_else(|| DashboardError::Validation(format!("Unknown data module: {name}")))
    }
}

// =========================
// Properties
// =========================

/// Aggregates computed upstream for the listing set
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyInsights {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_price: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub avg_land_size: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price_per_sqm: Option<f64>,
}

/// A single listing; every field may be missing
#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertyRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub area_name: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "object_or_empty")]
    pub attributes: Map<String, Value>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub listing_date: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub property_type: Option<String>,
}

impl PropertyRecord {
    /// Raw attribute value (`bedrooms`, `land_size`, ...)
    pub fn attribute(&self, name: &str) -> Option<&Value> {
        self.attributes.get(name).filter(|v| !v.is_null())
    }

    /// Numeric attribute, `0` when absent or non-numeric
    pub fn attribute_number(&self, name: &str) -> f64 {
        self.attribute(name)
            .and_then(lenient::as_number)
            .unwrap_or(0.0)
    }

    pub fn bedrooms(&self) -> i64 {
        crate::format::round_to_int(self.attribute_number("bedrooms"))
    }

    pub fn bathrooms(&self) -> i64 {
        crate::format::round_to_int(self.attribute_number("bathrooms"))
    }

    pub fn land_size(&self) -> Option<&Value> {
        self.attribute("land_size")
    }

    /// Price used for display and comparison
    pub fn price_or_zero(&self) -> f64 {
        self.price.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct PropertiesModule {
    #[serde(default, deserialize_with = "object_or_default")]
    pub insights: PropertyInsights,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub properties: Vec<PropertyRecord>,
}

// =========================
// Market
// =========================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RegionalValue {
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
}

/// One market period; index 0 of the trend list is the most recent
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketTrendPoint {
    #[serde(default, deserialize_with = "lenient::text")]
    pub date: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub value: Option<f64>,
    #[serde(default, deserialize_with = "object_or_default")]
    pub sa3: RegionalValue,
}

impl MarketTrendPoint {
    pub fn value_or_zero(&self) -> f64 {
        self.value.unwrap_or(0.0)
    }

    pub fn regional_or_zero(&self) -> f64 {
        self.sa3.value.unwrap_or(0.0)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct MarketModule {
    #[serde(default, deserialize_with = "list_or_empty")]
    pub recent_trends: Vec<MarketTrendPoint>,
}

// =========================
// Demographics
// =========================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AgeBracket {
    #[serde(default, deserialize_with = "lenient::text")]
    pub age: Option<String>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub proportion: Option<f64>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct DemographicsModule {
    /// `None` when the payload carries no bracket list at all
    #[serde(default, deserialize_with = "list_or_none")]
    pub age_brackets: Option<Vec<AgeBracket>>,
}

impl DemographicsModule {
    pub fn age_brackets(&self) -> &[AgeBracket] {
        self.age_brackets.as_deref().unwrap_or(&[])
    }
}

// =========================
// Schools
// =========================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolRecord {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub school_sector_type: Option<String>,
    #[serde(default, deserialize_with = "lenient::text")]
    pub school_level_type: Option<String>,
    #[serde(default)]
    pub naplan_rank: Option<Value>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub attendance_rate: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub boys: Option<f64>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub girls: Option<f64>,
}

impl SchoolRecord {
    pub fn is_sector(&self, sector: &str) -> bool {
        self.school_sector_type.as_deref() == Some(sector)
    }

    /// `round(boys + girls)` with absent counts as zero
    pub fn student_count(&self) -> i64 {
        crate::format::round_to_int(self.boys.unwrap_or(0.0) + self.girls.unwrap_or(0.0))
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SchoolsModule {
    #[serde(default, deserialize_with = "lenient::number")]
    pub total: Option<f64>,
    #[serde(default, deserialize_with = "list_or_empty")]
    pub schools: Vec<SchoolRecord>,
}

impl SchoolsModule {
    pub fn public_count(&self) -> usize {
        self.schools.iter().filter(|s| s.is_sector("Public")).count()
    }

    pub fn private_count(&self) -> usize {
        self.schools.iter().filter(|s| s.is_sector("Private")).count()
    }
}

// =========================
// Amenities
// =========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AmenityCategory {
    pub label: String,
    pub count: i64,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct AmenityModule {
    #[serde(default, deserialize_with = "category_counts")]
    pub categories: Vec<AmenityCategory>,
    #[serde(default, deserialize_with = "lenient::number")]
    pub total: Option<f64>,
}

impl AmenityModule {
    /// Categories by descending count; equal counts keep document order
    pub fn ranked_categories(&self) -> Vec<AmenityCategory> {
        let mut ranked = self.categories.clone();
        ranked.sort_by(|a, b| b.count.cmp(&a.count));
        ranked
    }
}

// =========================
// Risk
// =========================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RiskEntry {
    pub name: String,
    /// Descriptors as delivered; empty strings stand in for falsy upstream values
    pub descriptors: Vec<String>,
}

impl RiskEntry {
    pub fn visible_descriptors(&self) -> Vec<&str> {
        self.descriptors
            .iter()
            .map(String::as_str)
            .filter(|d| !d.is_empty())
            .collect()
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct RiskModule {
    #[serde(default, deserialize_with = "risk_entries")]
    pub risks: Vec<RiskEntry>,
}

// =========================
// Summary
// =========================

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryScore {
    #[serde(default, deserialize_with = "lenient::text")]
    pub name: Option<String>,
    /// Raw score; usually a number on a 0-100 scale but not guaranteed
    #[serde(default)]
    pub value: Value,
    #[serde(default, deserialize_with = "lenient::text")]
    pub comment: Option<String>,
    #[serde(default)]
    pub summary: Value,
}

impl SummaryScore {
    /// Integer score used for thresholds; unparseable values count as 0
    pub fn numeric_value(&self) -> i64 {
        crate::format::value_as_int(&self.value).unwrap_or(0)
    }

    pub fn first_summary_line(&self) -> Option<String> {
        match &self.summary {
            Value::Array(lines) => lines.first().and_then(crate::format::truthy_text),
            Value::String(s) if !s.is_empty() => Some(s.clone()),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SummaryModule {
    /// `None` when the payload carries no score list at all
    #[serde(default, deserialize_with = "list_or_none")]
    pub scores: Option<Vec<SummaryScore>>,
}

impl SummaryModule {
    pub fn scores(&self) -> &[SummaryScore] {
        self.scores.as_deref().unwrap_or(&[])
    }
}

// =========================
// Dataset
// =========================

/// The full response for one suburb load
#[derive(Debug, Clone, Default)]
pub struct Dataset {
    pub properties: Option<PropertiesModule>,
    pub market: Option<MarketModule>,
    pub demographics: Option<DemographicsModule>,
    pub schools: Option<SchoolsModule>,
    pub amenity: Option<AmenityModule>,
    pub risk: Option<RiskModule>,
    pub summary: Option<SummaryModule>,
}

impl Dataset {
    /// Decode an `/api/data` response body.
    ///
    /// Only a body that is not a JSON object is an error; unknown keys are ignored
    /// and malformed module slices fall back to empty defaults.
    pub fn from_json(body: &str) -> Result<Self> {
        let slices: HashMap<String, Box<RawValue>> =
            serde_json::from_str(body).map_err(|e| DashboardError::Fetch {
                status: None,
                message: format!("Malformed dataset response: {e}"),
            })?;

        let mut dataset = Dataset::default();
        for (key, raw) in &slices {
            let Ok(kind) = key.parse::<ModuleKind>() else {
                warn!(target: "dataset", module = %key, "Ignoring unknown module in response");
                continue;
            };
            // a null slice means the module is absent
            if raw.get().trim() == "null" {
                continue;
            }
            match kind {
                ModuleKind::Properties => dataset.properties = Some(decode_slice(kind, raw)),
                ModuleKind::Market => dataset.market = Some(decode_slice(kind, raw)),
                ModuleKind::Demographics => dataset.demographics = Some(decode_slice(kind, raw)),
                ModuleKind::Schools => dataset.schools = Some(decode_slice(kind, raw)),
                ModuleKind::Amenity => dataset.amenity = Some(decode_slice(kind, raw)),
                ModuleKind::Risk => dataset.risk = Some(decode_slice(kind, raw)),
                ModuleKind::Summary => dataset.summary = Some(decode_slice(kind, raw)),
            }
        }
        Ok(dataset)
    }

    pub fn contains(&self, kind: ModuleKind) -> bool {
        match kind {
            ModuleKind::Properties => self.properties.is_some(),
            ModuleKind::Market => self.market.is_some(),
            ModuleKind::Demographics => self.demographics.is_some(),
            ModuleKind::Schools => self.schools.is_some(),
            ModuleKind::Amenity => self.amenity.is_some(),
            ModuleKind::Risk => self.risk.is_some(),
            ModuleKind::Summary => self.summary.is_some(),
        }
    }

    /// Present modules in render order
    pub fn modules(&self) -> Vec<ModuleKind> {
        ModuleKind::ALL
            .into_iter()
            .filter(|kind| self.contains(*kind))
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.modules().is_empty()
    }
}

fn decode_slice<T: DeserializeOwned + Default>(kind: ModuleKind, raw: &RawValue) -> T {
    match serde_json::from_str::<T>(raw.get()) {
        Ok(slice) => slice,
        Err(e) => {
            warn!(target: "dataset", module = %kind, error = %e, "Malformed module payload; treating as empty");
            T::default()
        }
    }
}

// =========================
// Shape-tolerant decoders
// =========================

fn object_or_empty<'de, D>(deserializer: D) -> std::result::Result<Map<String, Value>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::Object(map) => Ok(map),
        _ => Ok(Map::new()),
    }
}

fn object_or_default<'de, D, T>(deserializer: D) -> std::result::Result<T, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned + Default,
{
    match Value::deserialize(deserializer)? {
        value @ Value::Object(_) => Ok(serde_json::from_value(value).unwrap_or_default()),
        _ => Ok(T::default()),
    }
}

fn list_or_empty<'de, D, T>(deserializer: D) -> std::result::Result<Vec<T>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(items
            .into_iter()
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect()),
        _ => Ok(Vec::new()),
    }
}

fn list_or_none<'de, D, T>(deserializer: D) -> std::result::Result<Option<Vec<T>>, D::Error>
where
    D: serde::Deserializer<'de>,
    T: DeserializeOwned,
{
    match Value::deserialize(deserializer)? {
        Value::Array(items) => Ok(Some(
            items
                .into_iter()
                .filter_map(|item| serde_json::from_value(item).ok())
                .collect(),
        )),
        _ => Ok(None),
    }
}

fn category_counts<'de, D>(deserializer: D) -> std::result::Result<Vec<AmenityCategory>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = lenient::ordered_entries(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(label, count)| AmenityCategory {
            label,
            count: lenient::as_number(&count)
                .map(crate::format::round_to_int)
                .unwrap_or(0),
        })
        .collect())
}

fn risk_entries<'de, D>(deserializer: D) -> std::result::Result<Vec<RiskEntry>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    let entries = lenient::ordered_entries(deserializer)?;
    Ok(entries
        .into_iter()
        .map(|(name, values)| {
            let descriptors = match values {
                Value::Array(items) => items
                    .iter()
                    .map(|v| crate::format::truthy_text(v).unwrap_or_default())
                    .collect(),
                other => vec![crate::format::truthy_text(&other).unwrap_or_default()],
            };
            RiskEntry { name, descriptors }
        })
        .collect())
}
