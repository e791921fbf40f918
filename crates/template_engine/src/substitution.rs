//! Namespaced substitution values for template rendering.
//!
//! Launch code collects substitution values under flat, namespaced keys such
//! as `hosted:tags` or `synthesizer:role:exec`. The namespace keeps unrelated
//! template sections from colliding. Before rendering, the flat keys are
//! expanded into a nested JSON object so templates address them as
//! `{{hosted.tags}}` or `{{synthesizer.role.exec}}`.

use serde::Serialize;
use serde_json::{Map, Value};
use std::collections::BTreeMap;

use crate::errors::{TemplateError, TemplateResult};

#[cfg(test)]
#[path = "substitution_tests.rs"]
mod tests;

/// Separator between the namespace segments of a substitution key.
pub const NAMESPACE_SEPARATOR: char = ':';

/// Mapping from namespaced keys to template values.
///
/// Values are stored as JSON so strings, lists of tag maps and nested
/// structures can all be passed to the same template.
///
/// # Examples
///
/// ```rust
/// use template_engine::SubstitutionMap;
/// use serde_json::json;
///
/// let substitutions = SubstitutionMap::new()
///     .with("synthesizer:qualifier", "platform-prod")
///     .with("hosted:tags", json!([{"Team": "platform"}]));
///
/// let context = substitutions.to_context().unwrap();
/// assert_eq!(context["synthesizer"]["qualifier"], "platform-prod");
/// assert_eq!(context["hosted"]["tags"][0]["Team"], "platform");
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubstitutionMap {
    entries: BTreeMap<String, Value>,
}

impl SubstitutionMap {
    /// Creates an empty substitution map.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a value and returns the map, for chained construction.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Inserts a value, returning the value previously stored under the key.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.entries.insert(key.into(), value.into())
    }

    /// Serializes `value` and inserts it under `key`.
    ///
    /// # Errors
    ///
    /// Returns `TemplateError::InvalidSubstitution` if the value cannot be
    /// represented as JSON (for example a map with non-string keys).
    pub fn insert_serialized<T: Serialize>(
        &mut self,
        key: impl Into<String>,
        value: &T,
    ) -> TemplateResult<()> {
        let key = key.into();
        let value = serde_json::to_value(value).map_err(|e| TemplateError::InvalidSubstitution {
            key: key.clone(),
            reason: e.to_string(),
        })?;
        self.entries.insert(key, value);
        Ok(())
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.entries.get(key)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Checks that `key` could be added without breaking [`to_context`](Self::to_context).
    ///
    /// Replacing an existing key is fine. A key that would nest under an
    /// existing value, or that is the namespace of an existing key, is not.
    ///
    /// # Errors
    ///
    /// - `TemplateError::InvalidSubstitution` when the key has an empty segment
    /// - `TemplateError::NamespaceConflict` when it collides with an entry
    pub fn check_key(&self, key: &str) -> TemplateResult<()> {
        split_key(key)?;

        let namespace = format!("{}{}", key, NAMESPACE_SEPARATOR);
        let is_namespace = self
            .entries
            .range(namespace.clone()..)
            .next()
            .is_some_and(|(existing, _)| existing.starts_with(&namespace));
        let under_value = key
            .match_indices(NAMESPACE_SEPARATOR)
            .any(|(index, _)| self.entries.contains_key(&key[..index]));

        if is_namespace || under_value {
            return Err(TemplateError::NamespaceConflict {
                key: key.to_string(),
            });
        }
        Ok(())
    }

    /// Iterates the flat entries in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.entries.iter()
    }

    /// Expands the namespaced keys into the nested object handed to the renderer.
    ///
    /// # Errors
    ///
    /// - `TemplateError::NamespaceConflict` when a key is both a value and
    ///   the namespace of another key
    /// - `TemplateError::InvalidSubstitution` when a key has an empty segment
    pub fn to_context(&self) -> TemplateResult<Value> {
        let mut root = Map::new();
        for (key, value) in &self.entries {
            place(&mut root, key, value)?;
        }

        Ok(Value::Object(root))
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for SubstitutionMap {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::new();
        for (key, value) in iter {
            map.insert(key, value);
        }
        map
    }
}

fn split_key(key: &str) -> TemplateResult<Vec<&str>> {
    let segments: Vec<&str> = key.split(NAMESPACE_SEPARATOR).collect();
    if segments.iter().any(|s| s.is_empty()) {
        return Err(TemplateError::InvalidSubstitution {
            key: key.to_string(),
            reason: "key contains an empty namespace segment".to_string(),
        });
    }
    Ok(segments)
}

fn place(root: &mut Map<String, Value>, key: &str, value: &Value) -> TemplateResult<()> {
    let segments = split_key(key)?;

    let Some((leaf, parents)) = segments.split_last() else {
        return Err(TemplateError::InvalidSubstitution {
            key: key.to_string(),
            reason: "key is empty".to_string(),
        });
    };

    let mut current = root;
    for segment in parents {
        let entry = current
            .entry(segment.to_string())
            .or_insert_with(|| Value::Object(Map::new()));
        current = match entry {
            Value::Object(map) => map,
            _ => {
                return Err(TemplateError::NamespaceConflict {
                    key: key.to_string(),
                })
            }
        };
    }

    if current.contains_key(*leaf) {
        return Err(TemplateError::NamespaceConflict {
            key: key.to_string(),
        });
    }
    current.insert(leaf.to_string(), value.clone());

    Ok(())
}
