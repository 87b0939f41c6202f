use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// RawParameters is the inbound parameter mapping as collected from a form
/// or an API payload. Strings are trimmed and empty values dropped on
/// construction, so presence always means "the user supplied something".
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(from = "Map<String, Value>")]
pub struct RawParameters(Map<String, Value>);

impl From<Map<String, Value>> for RawParameters {
    fn from(map: Map<String, Value>) -> Self {
        let cleaned = map
            .into_iter()
            .filter_map(|(k, v)| clean_value(v).map(|v| (k.trim().to_string(), v)))
            .collect();
        Self(cleaned)
    }
}

fn clean_value(value: Value) -> Option<Value> {
    match value {
        Value::Null => None,
        Value::String(s) => {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(Value::String(trimmed.to_string()))
            }
        }
        Value::Array(items) if items.is_empty() => None,
        other => Some(other),
    }
}

impl RawParameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from string pairs, e.g. query parameters or form fields
    pub fn from_pairs<I, K, V>(pairs: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let map = pairs
            .into_iter()
            .map(|(k, v)| (k.into(), Value::String(v.into())))
            .collect::<Map<String, Value>>();
        Self::from(map)
    }

    pub fn has(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Read a value as text. Numbers and booleans are stringified and
    /// arrays are comma-joined, matching how a form would have sent them.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(value_text)
    }

    /// Read a checkbox-style flag. Absent means false.
    pub fn flag(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::Number(n)) => n.as_f64().map(|f| f != 0.0).unwrap_or(false),
            Some(Value::String(s)) => {
                matches!(s.to_ascii_lowercase().as_str(), "true" | "on" | "yes" | "1")
            }
            _ => false,
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

fn value_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Array(items) => {
            let parts: Vec<String> = items.iter().filter_map(value_text).collect();
            if parts.is_empty() {
                None
            } else {
                Some(parts.join(","))
            }
        }
        Value::Null | Value::Object(_) => None,
    }
}

/// ParameterSet is the normalized key/value input of a single render.
/// It starts as a copy of the raw parameters; the pipeline adds derived keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct ParameterSet(Map<String, Value>);

impl ParameterSet {
    pub fn from_raw(raw: &RawParameters) -> Self {
        Self(raw.0.clone())
    }

    pub fn insert(&mut self, key: &str, value: impl Into<Value>) {
        self.0.insert(key.to_string(), value.into());
    }

    /// Insert a derived record or record list
    pub fn insert_serialized<T: Serialize + ?Sized>(&mut self, key: &str, value: &T) {
        match serde_json::to_value(value) {
            Ok(v) => {
                self.0.insert(key.to_string(), v);
            }
            Err(e) => tracing::warn!("Dropping derived parameter {}: {}", key, e),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.0.remove(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).and_then(value_text)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_raw_parameters_drop_blank_values() {
        let raw: RawParameters = serde_json::from_value(json!({
            "vlan_id": " 10 ",
            "vlan_name": "   ",
            "description": null,
            "lag_id": 3,
        }))
        .unwrap();
        assert_eq!(raw.text("vlan_id").as_deref(), Some("10"));
        assert!(!raw.has("vlan_name"));
        assert!(!raw.has("description"));
        assert_eq!(raw.text("lag_id").as_deref(), Some("3"));
    }

    #[test]
    fn test_raw_parameters_flag() {
        let raw = RawParameters::from_pairs([("a", "true"), ("b", "False"), ("c", "on")]);
        assert!(raw.flag("a"));
        assert!(!raw.flag("b"));
        assert!(raw.flag("c"));
        assert!(!raw.flag("missing"));
    }

    #[test]
    fn test_array_values_read_as_csv() {
        let raw: RawParameters =
            serde_json::from_value(json!({ "dns_servers": ["8.8.8.8", "1.1.1.1"] })).unwrap();
        assert_eq!(raw.text("dns_servers").as_deref(), Some("8.8.8.8,1.1.1.1"));
    }
}
