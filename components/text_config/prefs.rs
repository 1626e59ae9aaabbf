/* This Source Code Form is subject to the terms of the Mozilla Public
 * License, v. 2.0. If a copy of the MPL was not distributed with this
 * file, You can obtain one at https://mozilla.org/MPL/2.0/. */

use std::collections::HashMap;
use std::fmt;
use std::sync::LazyLock;

use log::{debug, warn};
use parking_lot::{RwLock, RwLockReadGuard};
use serde::{Deserialize, Serialize};
use serde_json::Value;

static PREFERENCES: LazyLock<RwLock<Preferences>> = LazyLock::new(Default::default);

/// Get the current set of global preferences.
#[inline]
pub fn get() -> RwLockReadGuard<'static, Preferences> {
    PREFERENCES.read()
}

pub fn set(preferences: Preferences) {
    *PREFERENCES.write() = preferences;
}

/// Reads a single preference field, for example
/// `pref!(layout_text_fixed_pitch_breaking_enabled)`.
#[macro_export]
macro_rules! pref {
    ($name: ident) => {
        $crate::prefs::get().$name.clone()
    };
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub enum PrefValue {
    Bool(bool),
    Int(i64),
}

impl From<bool> for PrefValue {
    fn from(value: bool) -> Self {
        PrefValue::Bool(value)
    }
}

impl From<i64> for PrefValue {
    fn from(value: i64) -> Self {
        PrefValue::Int(value)
    }
}

impl TryFrom<&Value> for PrefValue {
    type Error = PrefError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        match value {
            Value::Bool(value) => Ok(PrefValue::Bool(*value)),
            Value::Number(number) => number
                .as_i64()
                .map(PrefValue::Int)
                .ok_or_else(|| PrefError::InvalidValue(format!("{number} is not an integer"))),
            other => Err(PrefError::InvalidValue(format!(
                "{other} is not a boolean or an integer"
            ))),
        }
    }
}

#[derive(Debug)]
pub enum PrefError {
    NoSuchPref(String),
    InvalidValue(String),
    JsonParseErr(serde_json::Error),
}

impl fmt::Display for PrefError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PrefError::NoSuchPref(name) => write!(f, "Unknown preference: {name:?}"),
            PrefError::InvalidValue(message) => write!(f, "Invalid preference value: {message}"),
            PrefError::JsonParseErr(error) => write!(f, "Could not parse preferences: {error}"),
        }
    }
}

impl std::error::Error for PrefError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            PrefError::JsonParseErr(error) => Some(error),
            _ => None,
        }
    }
}

impl From<serde_json::Error> for PrefError {
    fn from(error: serde_json::Error) -> Self {
        PrefError::JsonParseErr(error)
    }
}

#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
#[serde(default)]
pub struct Preferences {
    /// Guess the break point of fixed pitch text from its character count
    /// before falling back to bisection.
    pub layout_text_fixed_pitch_breaking_enabled: bool,
    /// Measure a range together with the space that follows it, so kerning
    /// against that space is accounted for.
    pub layout_text_trailing_whitespace_measuring_enabled: bool,
    /// Answer break opportunities between ASCII letters and digits without
    /// consulting the line segmenter.
    pub layout_text_line_break_ascii_shortcut_enabled: bool,
    /// How far past the available width, in multiples of it, the first
    /// bisection guess reaches.
    pub layout_text_bisection_seed_factor: i64,
}

impl Default for Preferences {
    fn default() -> Self {
        Self {
            layout_text_fixed_pitch_breaking_enabled: true,
            layout_text_trailing_whitespace_measuring_enabled: true,
            layout_text_line_break_ascii_shortcut_enabled: true,
            layout_text_bisection_seed_factor: 2,
        }
    }
}

/// Preference names may be written with dots, as in preference files, or
/// with underscores, as in field names.
fn field_name(name: &str) -> String {
    name.replace('.', "_")
}

fn expect_bool(name: &str, value: PrefValue) -> Result<bool, PrefError> {
    match value {
        PrefValue::Bool(value) => Ok(value),
        other => Err(PrefError::InvalidValue(format!(
            "{name} expects a boolean, got {other:?}"
        ))),
    }
}

impl Preferences {
    pub fn exists(name: &str) -> bool {
        matches!(
            field_name(name).as_str(),
            "layout_text_fixed_pitch_breaking_enabled" |
                "layout_text_trailing_whitespace_measuring_enabled" |
                "layout_text_line_break_ascii_shortcut_enabled" |
                "layout_text_bisection_seed_factor"
        )
    }

    pub fn get_value(&self, name: &str) -> Result<PrefValue, PrefError> {
        match field_name(name).as_str() {
            "layout_text_fixed_pitch_breaking_enabled" => {
                Ok(self.layout_text_fixed_pitch_breaking_enabled.into())
            },
            "layout_text_trailing_whitespace_measuring_enabled" => {
                Ok(self.layout_text_trailing_whitespace_measuring_enabled.into())
            },
            "layout_text_line_break_ascii_shortcut_enabled" => {
                Ok(self.layout_text_line_break_ascii_shortcut_enabled.into())
            },
            "layout_text_bisection_seed_factor" => {
                Ok(self.layout_text_bisection_seed_factor.into())
            },
            _ => Err(PrefError::NoSuchPref(name.to_owned())),
        }
    }

    pub fn set_value(&mut self, name: &str, value: PrefValue) -> Result<(), PrefError> {
        match field_name(name).as_str() {
            "layout_text_fixed_pitch_breaking_enabled" => {
                self.layout_text_fixed_pitch_breaking_enabled = expect_bool(name, value)?;
            },
            "layout_text_trailing_whitespace_measuring_enabled" => {
                self.layout_text_trailing_whitespace_measuring_enabled = expect_bool(name, value)?;
            },
            "layout_text_line_break_ascii_shortcut_enabled" => {
                self.layout_text_line_break_ascii_shortcut_enabled = expect_bool(name, value)?;
            },
            "layout_text_bisection_seed_factor" => match value {
                PrefValue::Int(factor) if factor >= 1 => {
                    self.layout_text_bisection_seed_factor = factor;
                },
                other => {
                    return Err(PrefError::InvalidValue(format!(
                        "{name} expects a positive integer, got {other:?}"
                    )));
                },
            },
            _ => return Err(PrefError::NoSuchPref(name.to_owned())),
        }
        Ok(())
    }

    /// Applies every entry of `map`, stopping at the first invalid one.
    pub fn apply_prefs_map(&mut self, map: &HashMap<String, PrefValue>) -> Result<(), PrefError> {
        for (name, value) in map {
            self.set_value(name, value.clone())?;
        }
        Ok(())
    }
}

/// Parses a JSON object of preference names to values.
pub fn read_prefs_map(json: &str) -> Result<HashMap<String, PrefValue>, PrefError> {
    let entries: HashMap<String, Value> = serde_json::from_str(json)?;
    let mut map = HashMap::with_capacity(entries.len());
    for (name, value) in entries {
        if !Preferences::exists(&name) {
            warn!("Ignoring unknown preference {name:?}");
            continue;
        }
        map.insert(name, PrefValue::try_from(&value)?);
    }
    Ok(map)
}

/// Parses `json` and applies it on top of the current global preferences.
/// Nothing is changed if any entry is invalid.
pub fn add_user_prefs(json: &str) -> Result<(), PrefError> {
    let map = read_prefs_map(json)?;
    let mut preferences = get().clone();
    preferences.apply_prefs_map(&map)?;
    debug!("Applied {} user preferences", map.len());
    set(preferences);
    Ok(())
}

pub fn set_pref(name: &str, value: PrefValue) -> Result<(), PrefError> {
    PREFERENCES.write().set_value(name, value)
}

/// Restores a single preference to its default value and returns it.
pub fn reset_pref(name: &str) -> Result<PrefValue, PrefError> {
    let default_value = Preferences::default().get_value(name)?;
    set_pref(name, default_value.clone())?;
    Ok(default_value)
}

pub fn reset_all_prefs() {
    set(Preferences::default());
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_values() {
        let preferences = Preferences::default();
        assert!(preferences.layout_text_fixed_pitch_breaking_enabled);
        assert!(preferences.layout_text_trailing_whitespace_measuring_enabled);
        assert_eq!(
            preferences.get_value("layout.text.bisection_seed_factor").ok(),
            Some(PrefValue::Int(2))
        );
    }

    #[test]
    fn test_read_prefs_map() {
        let json = r#"{
            "layout.text.fixed_pitch_breaking.enabled": false,
            "layout_text_bisection_seed_factor": 3,
            "layout.unrelated.enabled": true
        }"#;
        let map = read_prefs_map(json).expect("valid preferences");
        assert_eq!(map.len(), 2);

        let mut preferences = Preferences::default();
        preferences
            .apply_prefs_map(&map)
            .expect("values of the right type");
        assert!(!preferences.layout_text_fixed_pitch_breaking_enabled);
        assert_eq!(preferences.layout_text_bisection_seed_factor, 3);
    }

    #[test]
    fn test_invalid_values() {
        let mut preferences = Preferences::default();
        assert!(matches!(
            preferences.set_value("layout.text.fixed_pitch_breaking.enabled", PrefValue::Int(1)),
            Err(PrefError::InvalidValue(_))
        ));
        assert!(matches!(
            preferences.set_value("layout.text.bisection_seed_factor", PrefValue::Int(0)),
            Err(PrefError::InvalidValue(_))
        ));
        assert!(matches!(
            preferences.set_value("layout.text.nonexistent", PrefValue::Bool(true)),
            Err(PrefError::NoSuchPref(_))
        ));
        assert!(matches!(
            read_prefs_map("[1, 2]"),
            Err(PrefError::JsonParseErr(_))
        ));
        assert!(matches!(
            read_prefs_map(r#"{"layout.text.bisection_seed_factor": "two"}"#),
            Err(PrefError::InvalidValue(_))
        ));
    }

    #[test]
    fn test_partial_deserialization_uses_defaults() {
        let preferences: Preferences =
            serde_json::from_str(r#"{"layout_text_line_break_ascii_shortcut_enabled": false}"#)
                .expect("valid preferences");
        assert!(!preferences.layout_text_line_break_ascii_shortcut_enabled);
        assert!(preferences.layout_text_fixed_pitch_breaking_enabled);
    }
}
