// Tolerant field decoders for upstream payloads.
//
// Upstream numbers arrive as numbers, numeric strings or null depending on the
// source API, and object-shaped payloads carry meaning in their key order.

use serde::de::{self, Deserializer, MapAccess, Visitor};
use serde::Deserialize;
use serde_json::Value;
use std::fmt;

/// Numeric view of a raw value
pub(crate) fn as_number(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    }
}

/// Text view of a raw scalar; numbers are rendered, everything else is absent
pub(crate) fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => n.as_f64().map(crate::format::plain_number),
        _ => None,
    }
}

pub(crate) fn number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(as_number))
}

pub(crate) fn text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<Value>::deserialize(deserializer)?;
    Ok(raw.as_ref().and_then(as_text))
}

/// Object entries in document order; `null` decodes as empty
pub(crate) fn ordered_entries<'de, D>(deserializer: D) -> Result<Vec<(String, Value)>, D::Error>
where
    D: Deserializer<'de>,
{
    struct EntriesVisitor;

    impl<'de> Visitor<'de> for EntriesVisitor {
        type Value = Vec<(String, Value)>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("a JSON object or null")
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(Vec::new())
        }

        fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
        where
            A: MapAccess<'de>,
        {
            let mut entries = Vec::with_capacity(map.size_hint().unwrap_or(0));
            while let Some((key, value)) = map.next_entry::<String, Value>()? {
                entries.push((key, value));
            }
            Ok(entries)
        }
    }

    deserializer.deserialize_any(EntriesVisitor)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[derive(Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "number")]
        price: Option<f64>,
        #[serde(default, deserialize_with = "ordered_entries")]
        counts: Vec<(String, Value)>,
    }

    #[test]
    fn numbers_accept_numeric_strings() {
        let probe: Probe = serde_json::from_value(json!({"price": " 725000 "})).unwrap();
        assert_eq!(probe.price, Some(725000.0));

        let probe: Probe = serde_json::from_value(json!({"price": "POA"})).unwrap();
        assert_eq!(probe.price, None);

        let probe: Probe = serde_json::from_value(json!({"price": null})).unwrap();
        assert_eq!(probe.price, None);
    }

    #[test]
    fn entries_keep_document_order() {
        let probe: Probe =
            serde_json::from_str(r#"{"counts": {"Zoo": 1, "Cafe": 2, "Bank": 3}}"#).unwrap();
        let keys: Vec<&str> = probe.counts.iter().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, vec!["Zoo", "Cafe", "Bank"]);
    }
}
