use super::{Cell, Column, InsightCard, ModuleView, Table, Tone};
use crate::dataset::{MarketModule, MarketTrendPoint, ModuleKind};
use crate::format::{self, NOT_AVAILABLE, NO_CHANGE};

/// Growth across the retained window: `(latest - oldest) / oldest * 100`.
///
/// `trends[0]` is the latest period and the last element the oldest. A zero
/// oldest value is not guarded and yields a non-finite result.
pub fn growth_percent(trends: &[MarketTrendPoint]) -> Option<f64> {
    let latest = trends.first()?;
    let oldest = trends.last()?;
    let base = oldest.value_or_zero();
    Some((latest.value_or_zero() - base) / base * 100.0)
}

/// Change against the next-older period; `None` for the oldest period or a
/// missing/zero previous value
pub fn change_percent(trends: &[MarketTrendPoint], index: usize) -> Option<f64> {
    let current = trends.get(index)?;
    let previous = trends.get(index + 1)?.value.filter(|v| *v != 0.0)?;
    Some((current.value_or_zero() - previous) / previous * 100.0)
}

/// Suburb value against the regional (SA3) value
pub fn difference_percent(point: &MarketTrendPoint) -> f64 {
    let regional = point.regional_or_zero();
    (point.value_or_zero() - regional) / regional * 100.0
}

/// Tone of a one-decimal figure, judged on the rounded value
fn rounded_tone(value: f64) -> Tone {
    let rounded = format::to_fixed(value, 1).parse::<f64>().unwrap_or(f64::NAN);
    Tone::signed(rounded)
}

pub fn render_market(module: &MarketModule) -> ModuleView {
    let trends = &module.recent_trends;
    let (Some(latest), Some(growth)) = (trends.first(), growth_percent(trends)) else {
        return ModuleView::no_data(ModuleKind::Market, "No market data available");
    };

    let cards = vec![
        InsightCard::new("Latest Median Price", format::whole_currency(latest.value_or_zero())),
        InsightCard::new(
            format!("Growth ({} periods)", trends.len()),
            format::percent(growth),
        )
        .with_tone(rounded_tone(growth)),
        InsightCard::new(
            "Latest Period",
            latest.date.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string()),
        ),
        InsightCard::new("Regional Price", format::whole_currency(latest.regional_or_zero())),
    ];

    let columns = ["Period", "Suburb Price", "Regional Price", "Difference", "Change"]
        .into_iter()
        .map(|label| Column {
            label: label.to_string(),
            sort_column: None,
        })
        .collect();

    let rows = trends
        .iter()
        .enumerate()
        .map(|(i, point)| {
            let diff = difference_percent(point);
            let diff_tone = if diff > 0.0 { Tone::Positive } else { Tone::Negative };
            let change = match change_percent(trends, i) {
                Some(change) => Cell::toned(format::percent(change), rounded_tone(change)),
                None => Cell::plain(NO_CHANGE),
            };
            vec![
                Cell::plain(point.date.clone().unwrap_or_else(|| NOT_AVAILABLE.to_string())),
                Cell::plain(format::whole_currency(point.value_or_zero())),
                Cell::plain(format::whole_currency(point.regional_or_zero())),
                Cell::toned(format::percent(diff), diff_tone),
                change,
            ]
        })
        .collect();

    ModuleView::content(
        ModuleKind::Market,
        cards,
        Some(Table { columns, rows }),
        Vec::new(),
    )
}
