//! Chat grounding context.
//!
//! [`ContextBuilder`] compresses the loaded dataset into a [`ContextSummary`]
//! small enough for a language-model prompt. Market, school, amenity and score
//! lists are capped; the property listings are always sent in full because
//! they are what users ask about. Demographics and summary are sent only when
//! their list is present in the payload; market only when it has a trend point.

use crate::dataset::{Dataset, PropertiesModule};
use crate::format::{self, NOT_AVAILABLE};
use crate::render::growth_percent;
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

/// Per-module item caps
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ContextLimits {
    pub market_points: usize,
    pub schools: usize,
    pub amenity_categories: usize,
    pub summary_scores: usize,
}

impl Default for ContextLimits {
    fn default() -> Self {
        Self {
            market_points: 3,
            schools: 5,
            amenity_categories: 5,
            summary_scores: 3,
        }
    }
}

/// Whole numbers serialize without a fraction (`12` rather than `12.0`)
fn figure<S: Serializer>(value: &f64, serializer: S) -> Result<S::Ok, S::Error> {
    if value.is_finite() && value.fract() == 0.0 && value.abs() < 9.0e15 {
        serializer.serialize_i64(*value as i64)
    } else {
        serializer.serialize_f64(*value)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ListingContext {
    pub address: String,
    #[serde(serialize_with = "figure")]
    pub price: f64,
    pub bedrooms: i64,
    pub bathrooms: i64,
    pub land_size: String,
    pub listing_date: String,
    pub property_type: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertiesContext {
    #[serde(serialize_with = "figure")]
    pub total: f64,
    #[serde(serialize_with = "figure")]
    pub avg_price: f64,
    #[serde(serialize_with = "figure")]
    pub avg_land_size: f64,
    #[serde(serialize_with = "figure")]
    pub price_per_sqm: f64,
    pub listings: Vec<ListingContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TrendContext {
    pub date: String,
    pub price: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketContext {
    #[serde(serialize_with = "figure")]
    pub latest_price: f64,
    /// One-decimal growth with trailing `%`
    pub growth: String,
    pub periods: usize,
    pub recent_data: Vec<TrendContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolContext {
    pub name: String,
    #[serde(rename = "type")]
    pub sector: String,
    pub level: String,
    pub naplan: Value,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchoolsContext {
    pub total: usize,
    pub public: usize,
    pub private: usize,
    pub list: Vec<SchoolContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgeShareContext {
    pub age_range: String,
    /// One-decimal percentage, no `%`
    pub percentage: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DemographicsContext {
    pub age_distribution: Vec<AgeShareContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CategoryContext {
    pub category: String,
    pub count: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AmenitiesContext {
    #[serde(serialize_with = "figure")]
    pub total: f64,
    pub top_categories: Vec<CategoryContext>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScoreContext {
    pub name: String,
    pub value: Value,
    pub comment: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryContext {
    pub scores: Vec<ScoreContext>,
}

/// Bounded projection of the dataset sent with every chat message
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextSummary {
    pub suburb: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub properties: Option<PropertiesContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub market: Option<MarketContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schools: Option<SchoolsContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub demographics: Option<DemographicsContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub amenities: Option<AmenitiesContext>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<SummaryContext>,
}

impl ContextSummary {
    /// Context carrying only the suburb, used before any dataset is loaded
    pub fn empty(suburb: &str) -> Self {
        Self {
            suburb: suburb.to_string(),
            properties: None,
            market: None,
            schools: None,
            demographics: None,
            amenities: None,
            summary: None,
        }
    }
}

/// Builds [`ContextSummary`] values; pure and synchronous
#[derive(Debug, Clone, Copy, Default)]
pub struct ContextBuilder {
    limits: ContextLimits,
}

impl ContextBuilder {
    pub fn new(limits: ContextLimits) -> Self {
        Self { limits }
    }

    pub fn limits(&self) -> ContextLimits {
        self.limits
    }

    pub fn build(&self, dataset: Option<&Dataset>, suburb: &str) -> ContextSummary {
        let mut context = ContextSummary::empty(suburb);
        let Some(dataset) = dataset else {
            return context;
        };

        context.properties = dataset.properties.as_ref().map(properties_context);

        context.market = dataset.market.as_ref().and_then(|market| {
            let trends = &market.recent_trends;
            let latest = trends.first()?;
            let growth = growth_percent(trends)?;
            Some(MarketContext {
                latest_price: latest.value_or_zero(),
                growth: format::percent(growth),
                periods: trends.len(),
                recent_data: trends
                    .iter()
                    .take(self.limits.market_points)
                    .map(|t| TrendContext {
                        date: t.date.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
                        price: format::round_to_int(t.value_or_zero()),
                    })
                    .collect(),
            })
        });

        context.schools = dataset.schools.as_ref().map(|schools| SchoolsContext {
            total: schools.schools.len(),
            public: schools.public_count(),
            private: schools.private_count(),
            list: schools
                .schools
                .iter()
                .take(self.limits.schools)
                .map(|s| SchoolContext {
                    name: or_na(&s.name),
                    sector: or_na(&s.school_sector_type),
                    level: or_na(&s.school_level_type),
                    naplan: s.naplan_rank.clone().unwrap_or(Value::Null),
                })
                .collect(),
        });

        context.demographics = dataset
            .demographics
            .as_ref()
            .and_then(|demo| demo.age_brackets.as_ref())
            .map(|brackets| DemographicsContext {
                age_distribution: brackets
                    .iter()
                    .map(|a| AgeShareContext {
                        age_range: or_na(&a.age),
                        percentage: format::proportion_percent(a.proportion.unwrap_or(0.0)),
                    })
                    .collect(),
            });

        context.amenities = dataset.amenity.as_ref().map(|amenity| AmenitiesContext {
            total: amenity.total.unwrap_or(0.0),
            top_categories: amenity
                .ranked_categories()
                .into_iter()
                .take(self.limits.amenity_categories)
                .map(|c| CategoryContext {
                    category: c.label,
                    count: c.count,
                })
                .collect(),
        });

        context.summary = dataset
            .summary
            .as_ref()
            .and_then(|summary| summary.scores.as_ref())
            .map(|scores| SummaryContext {
                scores: scores
                    .iter()
                    .take(self.limits.summary_scores)
                    .map(|s| ScoreContext {
                        name: or_na(&s.name),
                        value: s.value.clone(),
                        comment: or_na(&s.comment),
                    })
                    .collect(),
            });

        context
    }
}

fn or_na(field: &Option<String>) -> String {
    field
        .clone()
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

fn properties_context(module: &PropertiesModule) -> PropertiesContext {
    let insights = &module.insights;
    PropertiesContext {
        total: insights.total.unwrap_or(0.0),
        avg_price: insights.avg_price.unwrap_or(0.0),
        avg_land_size: insights.avg_land_size.unwrap_or(0.0),
        price_per_sqm: insights.price_per_sqm.unwrap_or(0.0),
        listings: module
            .properties
            .iter()
            .map(|p| ListingContext {
                address: or_na(&p.area_name),
                price: p.price_or_zero(),
                bedrooms: p.bedrooms(),
                bathrooms: p.bathrooms(),
                land_size: format::text_or_na(p.land_size()),
                listing_date: or_na(&p.listing_date),
                property_type: or_na(&p.property_type),
            })
            .collect(),
    }
}
