use serde_json::{Number, Value};

/// The in-memory form of the configuration file: a JSON object keyed by
/// string. Exists only for the duration of one accessor call — the store
/// keeps no cross-call cache.
pub type Document = serde_json::Map<String, Value>;

/// A value accepted by [`ConfigStore::set`](crate::ConfigStore::set).
///
/// Configuration entries are one of integer, float, or text. The `From`
/// impls let call sites pass literals directly: `store.set("retries", 3)`,
/// `store.set("gain", 0.75)`, `store.set("ssid", "shopfloor")`.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigValue {
    Int(i64),
    Float(f64),
    Text(String),
}

impl ConfigValue {
    /// Convert into the JSON value stored in the document.
    pub(crate) fn into_json(self) -> Value {
        match self {
            ConfigValue::Int(v) => Value::Number(v.into()),
            ConfigValue::Float(v) => Number::from_f64(v)
                .map(Value::Number)
                // Non-finite floats have no JSON form; store null so the
                // getter falls back rather than producing invalid output.
                .unwrap_or(Value::Null),
            ConfigValue::Text(v) => Value::String(v),
        }
    }
}

impl From<i32> for ConfigValue {
    fn from(v: i32) -> Self {
        ConfigValue::Int(v as i64)
    }
}

impl From<i64> for ConfigValue {
    fn from(v: i64) -> Self {
        ConfigValue::Int(v)
    }
}

impl From<u32> for ConfigValue {
    fn from(v: u32) -> Self {
        ConfigValue::Int(v as i64)
    }
}

impl From<f32> for ConfigValue {
    fn from(v: f32) -> Self {
        ConfigValue::Float(v as f64)
    }
}

impl From<f64> for ConfigValue {
    fn from(v: f64) -> Self {
        ConfigValue::Float(v)
    }
}

impl From<&str> for ConfigValue {
    fn from(v: &str) -> Self {
        ConfigValue::Text(v.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(v: String) -> Self {
        ConfigValue::Text(v)
    }
}

/// Read a JSON value as an integer. Floats convert by truncation; anything
/// else is a mismatch.
pub(crate) fn as_int(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| n.as_f64().map(|f| f as i64)),
        _ => None,
    }
}

/// Read a JSON value as a float. Integers widen; anything else is a mismatch.
pub(crate) fn as_float(value: &Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        _ => None,
    }
}

/// Read a JSON value as text. Strict: numbers do not stringify.
pub(crate) fn as_text(value: &Value) -> Option<&str> {
    value.as_str()
}
