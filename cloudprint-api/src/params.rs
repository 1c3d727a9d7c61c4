//! Request parameter map shared by all vendor clients

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::Value;

/// Ordered request parameters.
///
/// Keys stay sorted, which the Spyun signature depends on; the other
/// platforms do not care about ordering. Values are JSON values so flat
/// form fields and nested payloads (Xpyun `items`) share one
/// representation. Insertion order is irrelevant by construction.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Params(BTreeMap<String, Value>);

impl Params {
    pub fn new() -> Self {
        Self(BTreeMap::new())
    }

    /// Insert `key`, replacing any previous value.
    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    /// Builder form of [`set`](Self::set).
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(key, value);
        self
    }

    /// Insert `key` only when `value` is present and not blank.
    pub fn set_opt(&mut self, key: impl Into<String>, value: Option<&str>) {
        if let Some(value) = value
            && !value.trim().is_empty()
        {
            self.set(key, value);
        }
    }

    pub fn contains(&self, key: &str) -> bool {
        self.0.contains_key(key)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// The value under `key` rendered the way it goes onto the wire.
    pub fn text(&self, key: &str) -> Option<String> {
        self.0.get(key).map(render)
    }

    /// Drop every null or blank-string entry.
    pub fn strip_blanks(&mut self) {
        self.0.retain(|_, value| !blank(value));
    }

    /// `k1=v1&k2=v2&…` over the sorted entries, values rendered as on the
    /// wire. This is the string Spyun signs.
    pub fn canonical_query(&self) -> String {
        self.0
            .iter()
            .map(|(key, value)| format!("{key}={}", render(value)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Rendered pairs for form bodies and query strings.
    pub fn form_pairs(&self) -> Vec<(String, String)> {
        self.0
            .iter()
            .map(|(key, value)| (key.clone(), render(value)))
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// String form of a value as query strings and form bodies carry it:
/// strings bare, everything else as compact JSON.
fn render(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        other => other.to_string(),
    }
}

fn blank(value: &Value) -> bool {
    match value {
        Value::Null => true,
        Value::String(text) => text.trim().is_empty(),
        _ => false,
    }
}
