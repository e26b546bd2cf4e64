//! User parameters passed through `ANTHILL_PLUGIN_PARAMS`.

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};

/// Key under which an unparseable parameter string is preserved.
pub const RAW_KEY: &str = "_raw";

/// Flat key/value mapping of user parameters.
///
/// Parsing never fails: a value that is not a JSON object is kept verbatim
/// under [`RAW_KEY`] so the plugin can still inspect it.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct PluginParams {
    map: Map<String, Value>,
    /// Set only when parsing fell back to [`RAW_KEY`].
    #[serde(skip)]
    fallback: bool,
}

impl PluginParams {
    /// Parse the raw `ANTHILL_PLUGIN_PARAMS` value.
    ///
    /// - absent or empty: empty mapping
    /// - JSON object: that object
    /// - anything else (invalid JSON, arrays, scalars): `{"_raw": <raw>}`
    pub fn parse(raw: Option<&str>) -> Self {
        let Some(raw) = raw.filter(|s| !s.is_empty()) else {
            return Self::default();
        };

        match serde_json::from_str::<Value>(raw) {
            Ok(Value::Object(map)) => Self::from(map),
            Ok(other) => {
                tracing::warn!(kind = json_kind(&other), "parameters are not a JSON object");
                Self::raw_fallback(raw)
            }
            Err(e) => {
                tracing::warn!(error = %e, "parameters are not valid JSON");
                Self::raw_fallback(raw)
            }
        }
    }

    fn raw_fallback(raw: &str) -> Self {
        let mut map = Map::new();
        map.insert(RAW_KEY.to_string(), Value::String(raw.to_string()));
        Self {
            map,
            fallback: true,
        }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.map.get(key)
    }

    /// Look up `key` as display text, or fall back to `default`.
    ///
    /// String values are returned verbatim; other JSON values are rendered
    /// as compact JSON.
    pub fn get_str_or(&self, key: &str, default: &str) -> String {
        match self.map.get(key) {
            Some(Value::String(s)) => s.clone(),
            Some(other) => other.to_string(),
            None => default.to_string(),
        }
    }

    /// Deserialize a single parameter into `T`.
    ///
    /// Returns `Ok(None)` when the key is missing.
    pub fn get_as<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, serde_json::Error> {
        self.map
            .get(key)
            .map(|v| serde_json::from_value(v.clone()))
            .transpose()
    }

    /// The unparsed parameter string, if parsing fell back to [`RAW_KEY`].
    ///
    /// A user object that happens to contain `_raw` is not a fallback.
    pub fn raw(&self) -> Option<&str> {
        if !self.fallback {
            return None;
        }
        self.map.get(RAW_KEY).and_then(Value::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.map.iter()
    }
}

impl From<Map<String, Value>> for PluginParams {
    fn from(map: Map<String, Value>) -> Self {
        Self {
            map,
            fallback: false,
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
