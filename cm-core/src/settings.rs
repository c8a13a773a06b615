//! Settings Accessor
//!
//! A settings snapshot is a JSON object mapping section names to objects of
//! options:
//!
//! ```json
//! {
//!   "chamber_module heated_bay": {
//!     "heater_pin": "PB10",
//!     "chamber_max_power": 0.8,
//!     "fan_pin": "PA1"
//!   }
//! }
//! ```
//!
//! Values may be strings, numbers, booleans or arrays of strings. Typed
//! getters parse and bound-check on read. Options that are absent resolve to
//! the caller's default without a bound check; options without a default are
//! required. Every option read is tracked so `check_unused` can reject keys
//! nobody asked for.

use parking_lot::Mutex;
use serde_json::{Map, Value};
use std::collections::BTreeSet;
use std::fs;
use std::path::Path;
use tracing::debug;

use crate::constants::limits;
use crate::data::{check_bounds, check_finite, Bounds};
use crate::error::{ChamberError, Result};

/// Resolved options of one section
#[derive(Debug)]
pub struct SettingsSection {
    name: String,
    options: Map<String, Value>,
    accessed: Mutex<BTreeSet<String>>,
}

impl SettingsSection {
    /// Create a section from a JSON object of options
    pub fn from_value(name: &str, options: Value) -> Result<Self> {
        let name = name.trim();
        if name.is_empty() {
            return Err(ChamberError::config("section name cannot be empty"));
        }
        let options = match options {
            Value::Object(map) => map,
            other => {
                return Err(ChamberError::config(format!(
                    "section '{}' must be an object of options, found {}",
                    name,
                    json_kind(&other)
                )))
            }
        };

        for (option, value) in &options {
            let valid = match value {
                Value::String(_) | Value::Number(_) | Value::Bool(_) => true,
                Value::Array(items) => items.iter().all(Value::is_string),
                Value::Null | Value::Object(_) => false,
            };
            if !valid {
                return Err(ChamberError::invalid_value(
                    name,
                    option.as_str(),
                    format!("unsupported value type {}", json_kind(value)),
                ));
            }
        }

        Ok(Self {
            name: name.to_string(),
            options,
            accessed: Mutex::new(BTreeSet::new()),
        })
    }

    /// Fully-qualified section name, e.g. `chamber_module heated_bay`
    pub fn name(&self) -> &str {
        &self.name
    }

    /// First whitespace-delimited word of the section name
    pub fn prefix(&self) -> &str {
        self.name.split_whitespace().next().unwrap_or(&self.name)
    }

    fn raw(&self, option: &str) -> Option<&Value> {
        self.accessed.lock().insert(option.to_string());
        self.options.get(option)
    }

    fn scalar_text(&self, option: &str, value: &Value) -> Result<String> {
        match value {
            Value::String(s) => Ok(s.trim().to_string()),
            Value::Number(n) => Ok(n.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            other => Err(ChamberError::invalid_value(
                &self.name,
                option,
                format!("expected a single value, found {}", json_kind(other)),
            )),
        }
    }

    /// Required string option
    pub fn get(&self, option: &str) -> Result<String> {
        match self.raw(option) {
            Some(value) => self.scalar_text(option, value),
            None => Err(ChamberError::missing(&self.name, option)),
        }
    }

    /// String option with a default
    pub fn get_or(&self, option: &str, default: &str) -> Result<String> {
        match self.raw(option) {
            Some(value) => self.scalar_text(option, value),
            None => Ok(default.to_string()),
        }
    }

    /// String option that may be absent
    pub fn get_opt(&self, option: &str) -> Result<Option<String>> {
        self.raw(option)
            .map(|value| self.scalar_text(option, value))
            .transpose()
    }

    fn parse_float(&self, option: &str, value: &Value) -> Result<f64> {
        let parsed = match value {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        };
        let parsed = parsed.ok_or_else(|| {
            ChamberError::invalid_value(&self.name, option, format!("'{}' is not a number", value))
        })?;
        check_finite(&self.name, option, parsed)
    }

    /// Float option. `default: None` makes the option required.
    pub fn getfloat(&self, option: &str, default: Option<f64>, bounds: Bounds) -> Result<f64> {
        match self.getfloat_opt(option, bounds)? {
            Some(value) => Ok(value),
            None => default.ok_or_else(|| ChamberError::missing(&self.name, option)),
        }
    }

    /// Float option that may be absent; present values are bound-checked
    pub fn getfloat_opt(&self, option: &str, bounds: Bounds) -> Result<Option<f64>> {
        let Some(value) = self.raw(option) else {
            return Ok(None);
        };
        let parsed = self.parse_float(option, value)?;
        check_bounds(&self.name, option, parsed, &bounds).map(Some)
    }

    /// Integer option. `default: None` makes the option required.
    pub fn getint(&self, option: &str, default: Option<i64>, bounds: Bounds) -> Result<i64> {
        let Some(value) = self.raw(option) else {
            return default.ok_or_else(|| ChamberError::missing(&self.name, option));
        };
        let parsed = match value {
            Value::Number(n) => n.as_i64(),
            Value::String(s) => s.trim().parse::<i64>().ok(),
            _ => None,
        };
        let parsed = parsed.ok_or_else(|| {
            ChamberError::invalid_value(
                &self.name,
                option,
                format!("'{}' is not an integer", value),
            )
        })?;
        check_bounds(&self.name, option, parsed as f64, &bounds)?;
        Ok(parsed)
    }

    /// Boolean option. Accepts JSON booleans, 0/1 and the usual spellings.
    pub fn getboolean(&self, option: &str, default: Option<bool>) -> Result<bool> {
        let Some(value) = self.raw(option) else {
            return default.ok_or_else(|| ChamberError::missing(&self.name, option));
        };
        let parsed = match value {
            Value::Bool(b) => Some(*b),
            Value::Number(n) => match n.as_i64() {
                Some(0) => Some(false),
                Some(1) => Some(true),
                _ => None,
            },
            Value::String(s) => match s.trim().to_ascii_lowercase().as_str() {
                "1" | "yes" | "true" | "on" => Some(true),
                "0" | "no" | "false" | "off" => Some(false),
                _ => None,
            },
            _ => None,
        };
        parsed.ok_or_else(|| {
            ChamberError::invalid_value(&self.name, option, format!("'{}' is not a boolean", value))
        })
    }

    /// List option: a JSON array of strings or a comma-separated string
    pub fn getlist(&self, option: &str, default: &[&str]) -> Result<Vec<String>> {
        let Some(value) = self.raw(option) else {
            return Ok(default.iter().map(|s| s.to_string()).collect());
        };
        let items: Vec<String> = match value {
            Value::Array(items) => items
                .iter()
                .filter_map(Value::as_str)
                .map(|s| s.trim().to_string())
                .collect(),
            other => self
                .scalar_text(option, other)?
                .split(',')
                .map(|s| s.trim().to_string())
                .collect(),
        };
        Ok(items.into_iter().filter(|s| !s.is_empty()).collect())
    }

    /// Rejects the first option no getter has asked for
    pub fn check_unused(&self) -> Result<()> {
        let accessed = self.accessed.lock();
        match self.options.keys().find(|key| !accessed.contains(key.as_str())) {
            Some(option) => Err(ChamberError::UnknownOption {
                section: self.name.clone(),
                option: option.clone(),
            }),
            None => Ok(()),
        }
    }
}

/// All sections of one settings file, in file order
#[derive(Debug, Default)]
pub struct SettingsSnapshot {
    sections: Vec<SettingsSection>,
}

impl SettingsSnapshot {
    pub fn new(sections: Vec<SettingsSection>) -> Result<Self> {
        let mut seen = BTreeSet::new();
        for section in &sections {
            if !seen.insert(section.name()) {
                return Err(ChamberError::config(format!(
                    "section '{}' defined more than once",
                    section.name()
                )));
            }
        }
        Ok(Self { sections })
    }

    /// Parse a snapshot from JSON text
    pub fn from_json_str(json: &str) -> Result<Self> {
        let root: Value = serde_json::from_str(json)?;
        let Value::Object(root) = root else {
            return Err(ChamberError::config(
                "settings snapshot must be a JSON object of sections",
            ));
        };
        let sections = root
            .into_iter()
            .map(|(name, options)| SettingsSection::from_value(&name, options))
            .collect::<Result<Vec<_>>>()?;
        Self::new(sections)
    }

    /// Load a snapshot file, refusing anything over the size limit
    pub fn load(path: &Path) -> Result<Self> {
        let metadata = fs::metadata(path).map_err(|source| ChamberError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        if metadata.len() > limits::MAX_SNAPSHOT_SIZE {
            return Err(ChamberError::FileTooLarge {
                path: path.to_path_buf(),
                size: metadata.len(),
                max_size: limits::MAX_SNAPSHOT_SIZE,
            });
        }

        let data = fs::read_to_string(path).map_err(|source| ChamberError::FileRead {
            path: path.to_path_buf(),
            source,
        })?;
        let snapshot = Self::from_json_str(&data)?;
        debug!(
            "Loaded {} settings sections from {:?}",
            snapshot.sections.len(),
            path
        );
        Ok(snapshot)
    }

    pub fn sections(&self) -> &[SettingsSection] {
        &self.sections
    }

    /// Look up a section by its full name
    pub fn section(&self, name: &str) -> Result<&SettingsSection> {
        self.sections
            .iter()
            .find(|s| s.name() == name.trim())
            .ok_or_else(|| ChamberError::SectionNotFound(name.to_string()))
    }

    /// Sections whose first word is `prefix`, in file order
    pub fn sections_with_prefix<'a>(
        &'a self,
        prefix: &'a str,
    ) -> impl Iterator<Item = &'a SettingsSection> + 'a {
        self.sections.iter().filter(move |s| s.prefix() == prefix)
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
