//! CSV export of the property listing table.

use crate::dataset::PropertyRecord;
use crate::format::{plain_number, text_or_na, NOT_AVAILABLE};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

pub const CSV_HEADER: &str = "Address,Price,Bedrooms,Bathrooms,Land Size,Listing Date,Property Type";
pub const CSV_MIME_TYPE: &str = "text/csv";

/// A generated download
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ExportFile {
    pub filename: String,
    pub mime_type: String,
    pub content: String,
}

/// `microburbs_properties_<suburb>_<YYYY-MM-DD>.csv`
pub fn export_filename(suburb: &str, date: NaiveDate) -> String {
    format!(
        "microburbs_properties_{}_{}.csv",
        suburb,
        date.format("%Y-%m-%d")
    )
}

/// Render records as CSV.
///
/// The header row is always present, so an empty slice yields a header-only
/// document. Address and Land Size are quoted; Price defaults to `0` and every
/// other missing field becomes `N/A`.
pub fn to_csv(records: &[PropertyRecord]) -> String {
    let mut csv = String::with_capacity(CSV_HEADER.len() + 1 + records.len() * 64);
    csv.push_str(CSV_HEADER);
    csv.push('\n');

    for p in records {
        let row = [
            quoted(p.area_name.as_deref().filter(|s| !s.is_empty()).unwrap_or(NOT_AVAILABLE)),
            plain_number(p.price.unwrap_or(0.0)),
            rounded_or_na(p, "bedrooms"),
            rounded_or_na(p, "bathrooms"),
            quoted(&text_or_na(p.land_size())),
            p.listing_date
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
            p.property_type
                .clone()
                .filter(|s| !s.is_empty())
                .unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ];
        csv.push_str(&row.join(","));
        csv.push('\n');
    }

    csv
}

/// Build the downloadable file for `suburb` on `date`
pub fn export_properties(records: &[PropertyRecord], suburb: &str, date: NaiveDate) -> ExportFile {
    ExportFile {
        filename: export_filename(suburb, date),
        mime_type: CSV_MIME_TYPE.to_string(),
        content: to_csv(records),
    }
}

fn quoted(field: &str) -> String {
    format!("\"{}\"", field.replace('"', "\"\""))
}

fn rounded_or_na(record: &PropertyRecord, attribute: &str) -> String {
    match record
        .attribute(attribute)
        .and_then(crate::lenient::as_number)
    {
        Some(value) => crate::format::round_to_int(value).to_string(),
        None => NOT_AVAILABLE.to_string(),
    }
}
