//! Column sorting for the property listing table.
//!
//! The engine remembers the last direction applied to each column. Clicking a
//! column sorts ascending first and flips on every later click of that column;
//! other columns keep whatever direction they last had.

use crate::dataset::PropertyRecord;
use crate::format::parse_int_prefix;
use crate::lenient;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn flipped(self) -> Self {
        match self {
            SortDirection::Asc => SortDirection::Desc,
            SortDirection::Desc => SortDirection::Asc,
        }
    }
}

/// Comparable projection of one record for one column
#[derive(Debug, Clone, PartialEq)]
enum SortKey {
    Text(String),
    Number(f64),
}

impl SortKey {
    fn compare(&self, other: &SortKey) -> Ordering {
        match (self, other) {
            (SortKey::Text(a), SortKey::Text(b)) => a.cmp(b),
            (SortKey::Number(a), SortKey::Number(b)) => a.total_cmp(b),
            (SortKey::Number(_), SortKey::Text(_)) => Ordering::Less,
            (SortKey::Text(_), SortKey::Number(_)) => Ordering::Greater,
        }
    }
}

/// Column resolution:
/// - `address` reads `area_name`
/// - `price` reads `price`
/// - `land_size` reads the attribute, parsing the leading integer of strings
/// - anything else reads the like-named attribute
fn sort_key(record: &PropertyRecord, column: &str) -> SortKey {
    match column {
        "address" => SortKey::Text(record.area_name.clone().unwrap_or_default()),
        "price" => SortKey::Number(record.price_or_zero()),
        "land_size" => SortKey::Number(land_size_key(record.land_size())),
        other => SortKey::Number(record.attribute_number(other)),
    }
}

fn land_size_key(value: Option<&Value>) -> f64 {
    match value {
        Some(Value::String(s)) => parse_int_prefix(s).unwrap_or(0) as f64,
        Some(other) => lenient::as_number(other).unwrap_or(0.0),
        None => 0.0,
    }
}

/// Per-column direction memory
#[derive(Debug, Clone, Default)]
pub struct SortEngine {
    directions: HashMap<String, SortDirection>,
}

impl SortEngine {
    pub fn new() -> Self {
        Self::default()
    }

    /// Direction most recently applied to `column`, if any
    pub fn direction(&self, column: &str) -> Option<SortDirection> {
        self.directions.get(column).copied()
    }

    /// Forget every column's direction
    pub fn reset(&mut self) {
        self.directions.clear();
    }

    /// Sort `records` in place by `column` and return the direction applied.
    ///
    /// Sorting is stable: records with equal keys keep their relative order.
    pub fn sort(&mut self, records: &mut [PropertyRecord], column: &str) -> SortDirection {
        let direction = match self.direction(column) {
            Some(SortDirection::Asc) => SortDirection::Desc,
            _ => SortDirection::Asc,
        };
        self.directions.insert(column.to_string(), direction);

        let mut keyed: Vec<(SortKey, PropertyRecord)> = records
            .iter()
            .map(|r| (sort_key(r, column), r.clone()))
            .collect();
        keyed.sort_by(|(a, _), (b, _)| match direction {
            SortDirection::Asc => a.compare(b),
            SortDirection::Desc => b.compare(a),
        });
        for (slot, (_, record)) in records.iter_mut().zip(keyed) {
            *slot = record;
        }

        direction
    }
}
