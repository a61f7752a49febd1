//! Display formatting for dashboard values.
//!
//! Every function here is pure and total: missing values, non-finite numbers and
//! odd strings all produce a display string instead of an error.

use serde_json::Value;

/// Placeholder shown wherever a value is missing
pub const NOT_AVAILABLE: &str = "N/A";

/// Placeholder for a market period that has no older period to compare with
pub const NO_CHANGE: &str = "-";

/// Round half towards positive infinity (`2.5` -> `3`, `-2.5` -> `-2`)
pub fn js_round(value: f64) -> f64 {
    (value + 0.5).floor()
}

/// Round to a whole number and convert, saturating on overflow
pub fn round_to_int(value: f64) -> i64 {
    js_round(value) as i64
}

/// Fixed-point rendering that breaks ties away from zero.
///
/// The standard formatter rounds exact ties to even (`0.25` -> `0.2`); dashboard
/// figures expect `0.3`, so the rounding digit is inspected on an expanded form.
pub fn to_fixed(value: f64, digits: usize) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return infinity_text(value, "Infinity");
    }

    let expanded = format!("{:.*}", digits + 30, value.abs());
    let (int_part, frac_part) = expanded.split_once('.').unwrap_or((expanded.as_str(), ""));
    let kept: String = int_part
        .chars()
        .chain(frac_part.chars().take(digits))
        .collect();
    // beyond u128 range there are no fraction digits left to round
    let Ok(mut scaled) = kept.parse::<u128>() else {
        return format!("{:.*}", digits, value);
    };
    if frac_part
        .as_bytes()
        .get(digits)
        .is_some_and(|digit| *digit >= b'5')
    {
        scaled += 1;
    }

    let divisor = 10u128.pow(digits as u32);
    let whole = scaled / divisor;
    let frac = scaled % divisor;
    let sign = if value < 0.0 { "-" } else { "" };
    if digits == 0 {
        format!("{sign}{whole}")
    } else {
        format!("{sign}{whole}.{frac:0width$}", width = digits)
    }
}

/// Locale-style grouping: `1234567.5` -> `1,234,567.5`, at most three fraction digits
pub fn group_thousands(value: f64) -> String {
    if value.is_nan() {
        return "NaN".to_string();
    }
    if value.is_infinite() {
        return infinity_text(value, "∞");
    }

    let fixed = to_fixed(value.abs(), 3);
    let (int_part, frac_part) = fixed.split_once('.').unwrap_or((fixed.as_str(), ""));
    let frac_part = frac_part.trim_end_matches('0');

    let mut grouped = String::with_capacity(int_part.len() + int_part.len() / 3);
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    let is_zero = int_part.chars().all(|c| c == '0') && frac_part.is_empty();
    let sign = if value < 0.0 && !is_zero { "-" } else { "" };
    if frac_part.is_empty() {
        format!("{sign}{grouped}")
    } else {
        format!("{sign}{grouped}.{frac_part}")
    }
}

fn infinity_text(value: f64, symbol: &str) -> String {
    if value > 0.0 {
        symbol.to_string()
    } else {
        format!("-{symbol}")
    }
}

/// `$` prefixed grouped amount
pub fn currency(value: f64) -> String {
    format!("${}", group_thousands(value))
}

/// Currency for an aggregate that may be missing upstream
pub fn currency_or_na(value: Option<f64>) -> String {
    value.map(currency).unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Currency rounded to whole dollars
pub fn whole_currency(value: f64) -> String {
    currency(js_round(value))
}

/// Grouped number, or `N/A` when missing
pub fn number_or_na(value: Option<f64>) -> String {
    value
        .map(group_thousands)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// One-decimal percentage with trailing `%`
pub fn percent(value: f64) -> String {
    format!("{}%", to_fixed(value, 1))
}

/// A 0..1 proportion as a one-decimal percentage, without the `%`
pub fn proportion_percent(proportion: f64) -> String {
    to_fixed(proportion * 100.0, 1)
}

/// Plain number rendering: whole values drop the fraction (`650.0` -> `650`)
pub fn plain_number(value: f64) -> String {
    if value.is_nan() {
        "NaN".to_string()
    } else if value.is_infinite() {
        infinity_text(value, "Infinity")
    } else {
        format!("{}", value)
    }
}

/// Text for a raw JSON scalar, treating falsy values (`null`, `""`, `0`, `false`) as missing
pub fn truthy_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => n
            .as_f64()
            .filter(|f| *f != 0.0 && !f.is_nan())
            .map(plain_number),
        Value::Bool(true) => Some("true".to_string()),
        _ => None,
    }
}

/// Text for an optional raw value, `N/A` when missing or falsy
pub fn text_or_na(value: Option<&Value>) -> String {
    value
        .and_then(truthy_text)
        .unwrap_or_else(|| NOT_AVAILABLE.to_string())
}

/// Leading-integer parse: optional whitespace and sign, then digits.
///
/// `"650 m²"` -> `Some(650)`, `"12.9"` -> `Some(12)`, `"about 5"` -> `None`.
pub fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: &str = {
        let end = rest
            .bytes()
            .position(|b| !b.is_ascii_digit())
            .unwrap_or(rest.len());
        &rest[..end]
    };
    if digits.is_empty() {
        return None;
    }
    let magnitude = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -magnitude } else { magnitude })
}

/// Integer view of a raw value: numbers truncate, strings use [`parse_int_prefix`]
pub fn value_as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n
            .as_i64()
            .or_else(|| n.as_f64().filter(|f| f.is_finite()).map(|f| f.trunc() as i64)),
        Value::String(s) => parse_int_prefix(s),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn to_fixed_breaks_ties_away_from_zero() {
        assert_eq!(to_fixed(0.25, 1), "0.3");
        assert_eq!(to_fixed(10.0, 1), "10.0");
        assert_eq!(to_fixed(-10.0, 1), "-10.0");
        assert_eq!(to_fixed(-0.04, 1), "-0.0");
        assert_eq!(to_fixed(2.0 / 3.0 * 100.0, 1), "66.7");
        assert_eq!(to_fixed(f64::INFINITY, 1), "Infinity");
    }

    #[test]
    fn huge_values_keep_their_magnitude() {
        assert_eq!(
            to_fixed(1e45, 1),
            "999999999999999929757289024535551219930759168.0"
        );
        assert_eq!(
            to_fixed(-1e45, 0),
            "-999999999999999929757289024535551219930759168"
        );
        assert_eq!(
            group_thousands(1e36),
            "1,000,000,000,000,000,042,420,637,374,017,961,984"
        );
    }

    #[test]
    fn grouping_matches_locale_output() {
        assert_eq!(group_thousands(0.0), "0");
        assert_eq!(group_thousands(999.0), "999");
        assert_eq!(group_thousands(1000.0), "1,000");
        assert_eq!(group_thousands(1234567.891), "1,234,567.891");
        assert_eq!(group_thousands(1234.5), "1,234.5");
        assert_eq!(group_thousands(-45000.0), "-45,000");
        assert_eq!(currency(850000.0), "$850,000");
    }

    #[test]
    fn rounding_is_half_up() {
        assert_eq!(round_to_int(2.5), 3);
        assert_eq!(round_to_int(2.49), 2);
        assert_eq!(round_to_int(-2.5), -2);
    }

    #[test]
    fn truthy_text_treats_falsy_as_missing() {
        assert_eq!(truthy_text(&json!("650 m²")), Some("650 m²".to_string()));
        assert_eq!(truthy_text(&json!(650)), Some("650".to_string()));
        assert_eq!(truthy_text(&json!(0)), None);
        assert_eq!(truthy_text(&json!("")), None);
        assert_eq!(truthy_text(&Value::Null), None);
        assert_eq!(text_or_na(None), "N/A");
    }

    #[test]
    fn int_prefix_parsing() {
        assert_eq!(parse_int_prefix("650 m²"), Some(650));
        assert_eq!(parse_int_prefix("  -12.9"), Some(-12));
        assert_eq!(parse_int_prefix("approx 5"), None);
        assert_eq!(parse_int_prefix(""), None);
        assert_eq!(value_as_int(&json!(72.6)), Some(72));
        assert_eq!(value_as_int(&json!("81")), Some(81));
        assert_eq!(value_as_int(&json!(null)), None);
    }
}
