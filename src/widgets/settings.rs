//! Per-widget settings, keyed by widget identifier.
//!
//! Settings are JSON objects stored in the local store under
//! [`SETTINGS_KEY`]. Reads are merged over the kind's defaults, so a freshly
//! added weather widget reports its default city without anything stored.

use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::store::{LocalStore, StoreError};
use crate::widgets::WidgetKind;

/// Local store key holding every widget's settings.
pub const SETTINGS_KEY: &str = "widgetSettings";

/// Settings for all widgets, loaded from the local store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct WidgetSettings {
    entries: BTreeMap<String, Map<String, Value>>,
}

impl WidgetSettings {
    /// Load from the store. Missing or unreadable data loads as empty.
    pub fn load(store: &LocalStore) -> Self {
        Self {
            entries: store.get_json_or(SETTINGS_KEY, BTreeMap::new()),
        }
    }

    /// Write back to the store.
    pub fn save(&self, store: &mut LocalStore) -> Result<(), StoreError> {
        store.set_json(SETTINGS_KEY, &self.entries)
    }

    /// Effective settings for `wid`: stored fields over the kind's defaults.
    pub fn get(&self, wid: &str) -> Value {
        let mut merged = match WidgetKind::from_wid(wid).map(WidgetKind::default_settings) {
            Some(Value::Object(defaults)) => defaults,
            _ => Map::new(),
        };
        if let Some(stored) = self.entries.get(wid) {
            merged.extend(stored.iter().map(|(k, v)| (k.clone(), v.clone())));
        }
        Value::Object(merged)
    }

    /// Set one field for `wid`.
    pub fn set(&mut self, wid: &str, key: &str, value: Value) {
        self.entries
            .entry(wid.to_string())
            .or_default()
            .insert(key.to_string(), value);
    }

    /// Drop everything stored for `wid`. Returns `true` if anything was stored.
    pub fn forget(&mut self, wid: &str) -> bool {
        self.entries.remove(wid).is_some()
    }

    /// Returns `true` if anything is stored for `wid`.
    pub fn contains(&self, wid: &str) -> bool {
        self.entries.contains_key(wid)
    }
}

/// Interpret a command-line value: JSON when it parses, a string otherwise.
///
/// `42` becomes a number, `true` a boolean, `"quoted"` a string, and
/// `Boston` (not valid JSON) the string `"Boston"`.
pub fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

/// Drop the settings for `wid` from the store, writing only if something changed.
pub fn forget_in_store(store: &mut LocalStore, wid: &str) -> Result<bool, StoreError> {
    let mut settings = WidgetSettings::load(store);
    if !settings.forget(wid) {
        return Ok(false);
    }
    settings.save(store)?;
    tracing::debug!("Forgot settings for widget '{}'", wid);
    Ok(true)
}
