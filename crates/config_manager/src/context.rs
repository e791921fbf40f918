//! Runtime context and lenient tag extraction.
//!
//! The runtime context is a flat map of namespaced keys (`hosted:tags`,
//! `hosted:cdk:role:exec`, ...) to loosely-typed values. It is assembled from
//! JSON context files and command-line overrides, later sources replacing
//! earlier ones key by key.
//!
//! Context files may either hold the key map directly or use the
//! `cdk.json` layout where the keys live under a top-level `"context"`
//! object:
//!
//! ```json
//! {
//!   "app": "stack-launcher synth",
//!   "context": {
//!     "hosted:tags": [{ "Team": "platform" }],
//!     "synthesizer:custom": "true"
//!   }
//! }
//! ```

use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::fs;
use std::io::ErrorKind;
use std::path::Path;
use tracing::{debug, warn};

use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "context_tests.rs"]
mod tests;

/// Well-known runtime context keys.
pub mod keys {
    /// Ordered list of tag maps applied to every provisioned resource.
    pub const TAGS: &str = "hosted:tags";
    /// Selects the custom synthesizer identity when set to `true`.
    pub const SYNTHESIZER_CUSTOM: &str = "synthesizer:custom";
    /// External id used when assuming the lookup role.
    pub const API_KEY: &str = "hosted:api:key";
    pub const SYNTHESIZER_NAME: &str = "hosted:synthesizer:name";
    pub const SYNTHESIZER_ALIAS: &str = "hosted:synthesizer:alias";
    pub const ROLE_EXEC: &str = "hosted:cdk:role:exec";
    pub const ROLE_DEPLOY: &str = "hosted:cdk:role:deploy";
    pub const ROLE_LOOKUP: &str = "hosted:cdk:role:lookup";
    pub const ROLE_ASSETS: &str = "hosted:cdk:role:assets";
    pub const ROLE_IMAGES: &str = "hosted:cdk:role:images";
    /// SSM parameter holding the bootstrap version.
    pub const KEYS_SSM: &str = "hosted:cdk:keys:ssm";
    pub const STORAGE_ASSETS: &str = "hosted:cdk:storage:assets";
    pub const STORAGE_IMAGES: &str = "hosted:cdk:storage:images";
}

/// Ordered sequence of string-to-string tag maps.
pub type TagSet = Vec<BTreeMap<String, String>>;

/// Key/value store supplied by the launch environment.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawContext {
    values: Map<String, Value>,
}

impl RawContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds a context from a JSON object.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ContextParse` if `value` is not an object.
    pub fn from_value(value: Value) -> ConfigurationResult<Self> {
        match value {
            Value::Object(mut map) => {
                if matches!(map.get("context"), Some(Value::Object(_))) {
                    if let Some(Value::Object(nested)) = map.remove("context") {
                        return Ok(Self { values: nested });
                    }
                }
                Ok(Self { values: map })
            }
            other => Err(ConfigurationError::ContextParse {
                reason: format!("expected a JSON object, found {}", json_kind(&other)),
            }),
        }
    }

    /// Parses a context document.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::ContextParse` for invalid JSON or a
    /// document that is not an object.
    pub fn from_json_str(document: &str) -> ConfigurationResult<Self> {
        let value: Value =
            serde_json::from_str(document).map_err(|e| ConfigurationError::ContextParse {
                reason: e.to_string(),
            })?;
        Self::from_value(value)
    }

    /// Loads a context file from disk.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::ContextFileNotFound` when the file is absent
    /// - `ConfigurationError::ContextFileAccess` when it cannot be read
    /// - `ConfigurationError::ContextParse` when it is not a JSON object
    pub fn load(path: &Path) -> ConfigurationResult<Self> {
        let content = fs::read_to_string(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => ConfigurationError::ContextFileNotFound {
                path: path.display().to_string(),
            },
            _ => ConfigurationError::ContextFileAccess {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        let context = Self::from_json_str(&content).map_err(|e| match e {
            ConfigurationError::ContextParse { reason } => ConfigurationError::ContextParse {
                reason: format!("{}: {}", path.display(), reason),
            },
            other => other,
        })?;

        debug!(
            "Loaded {} context values from {}",
            context.len(),
            path.display()
        );
        Ok(context)
    }

    /// Loads every existing file in order, merging later files over earlier ones.
    ///
    /// Missing files are skipped.
    pub fn load_all<P: AsRef<Path>>(paths: &[P]) -> ConfigurationResult<Self> {
        let mut context = Self::new();
        for path in paths {
            match Self::load(path.as_ref()) {
                Ok(loaded) => context.merge(loaded),
                Err(ConfigurationError::ContextFileNotFound { path }) => {
                    debug!("Context file {} not present, skipping", path);
                }
                Err(e) => return Err(e),
            }
        }
        Ok(context)
    }

    /// Overlays `other` on this context. Keys in `other` win.
    pub fn merge(&mut self, other: RawContext) {
        for (key, value) in other.values {
            self.values.insert(key, value);
        }
    }

    pub fn set(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.values.insert(key.into(), value.into());
    }

    /// Sets a value given on the command line.
    ///
    /// The raw text is parsed as JSON so lists and booleans can be passed;
    /// anything that does not parse is kept as a plain string.
    pub fn set_raw(&mut self, key: impl Into<String>, raw: &str) {
        let value = serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()));
        self.values.insert(key.into(), value);
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.values.get(key)
    }

    /// Iterates the context values in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.values.iter()
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.values.contains_key(key)
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Reads a boolean switch.
    ///
    /// Only a JSON `true` or the string `"true"` (any case) turn the flag on.
    /// An absent key or any other value reads as `false`.
    pub fn flag(&self, key: &str) -> bool {
        match self.values.get(key) {
            Some(Value::Bool(b)) => *b,
            Some(Value::String(s)) => s.eq_ignore_ascii_case("true"),
            _ => false,
        }
    }

    /// Reads a required scalar value as a string.
    ///
    /// Numbers and booleans are rendered in their JSON text form.
    ///
    /// # Errors
    ///
    /// - `ConfigurationError::ContextMissing` when the key is absent or null
    /// - `ConfigurationError::ContextInvalid` when the value is a list or map
    pub fn require_string(&self, key: &str) -> ConfigurationResult<String> {
        match self.values.get(key) {
            None | Some(Value::Null) => Err(ConfigurationError::ContextMissing {
                key: key.to_string(),
            }),
            Some(Value::String(s)) => Ok(s.clone()),
            Some(Value::Bool(b)) => Ok(b.to_string()),
            Some(Value::Number(n)) => Ok(n.to_string()),
            Some(other) => Err(ConfigurationError::ContextInvalid {
                key: key.to_string(),
                reason: format!("expected a scalar value, found {}", json_kind(other)),
            }),
        }
    }

    /// Reads an optional scalar value; absent or null keys yield `None`.
    pub fn optional_string(&self, key: &str) -> ConfigurationResult<Option<String>> {
        match self.require_string(key) {
            Ok(value) => Ok(Some(value)),
            Err(ConfigurationError::ContextMissing { .. }) => Ok(None),
            Err(e) => Err(e),
        }
    }
}

/// Narrows the value under `key` to a [`TagSet`].
///
/// Extraction is lenient. A missing key or a value that is not a list gives
/// an empty set, list elements that are not maps are skipped, and map
/// entries whose value is not a string are dropped. Surviving maps keep
/// their position in the list even when every entry was dropped.
pub fn extract_tags(context: &RawContext, key: &str) -> TagSet {
    let items = match context.get(key) {
        None => {
            debug!("No tags under context key '{}'", key);
            return Vec::new();
        }
        Some(Value::Array(items)) => items,
        Some(other) => {
            warn!(
                "Context key '{}' holds {} instead of a list of tag maps, ignoring",
                key,
                json_kind(other)
            );
            return Vec::new();
        }
    };

    let mut tags = Vec::with_capacity(items.len());
    for (index, item) in items.iter().enumerate() {
        let Value::Object(entries) = item else {
            debug!(
                "Dropping {} at {}[{}]: not a tag map",
                json_kind(item),
                key,
                index
            );
            continue;
        };

        let mut safe = BTreeMap::new();
        for (name, value) in entries {
            match value {
                Value::String(s) => {
                    safe.insert(name.clone(), s.clone());
                }
                other => debug!(
                    "Dropping tag '{}' at {}[{}]: {} is not a string",
                    name,
                    key,
                    index,
                    json_kind(other)
                ),
            }
        }
        tags.push(safe);
    }

    tags
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "a list",
        Value::Object(_) => "a map",
    }
}
