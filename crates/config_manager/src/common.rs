//! Identity and tagging shared by every release.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::de::{null_as_default, optional_scalar_string, required_string, scalar_string};

#[cfg(test)]
#[path = "common_tests.rs"]
mod tests;

/// Deployment identity fields.
///
/// `id`, `account` and `region` are required. Everything else is optional
/// and only shapes names and descriptions.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Common {
    #[serde(deserialize_with = "required_string")]
    pub id: String,
    #[serde(deserialize_with = "scalar_string")]
    pub account: String,
    #[serde(deserialize_with = "required_string")]
    pub region: String,
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default, deserialize_with = "optional_scalar_string")]
    pub version: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}

impl Common {
    /// Human readable release label, `"<name> <alias> release"`.
    ///
    /// Falls back to the id when neither name nor alias is set.
    pub fn display_name(&self) -> String {
        let parts: Vec<&str> = [self.name.as_deref(), self.alias.as_deref()]
            .into_iter()
            .flatten()
            .filter(|s| !s.trim().is_empty())
            .collect();

        if parts.is_empty() {
            format!("{} release", self.id)
        } else {
            format!("{} release", parts.join(" "))
        }
    }
}

/// Organization-wide settings inherited by a release.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Platform {
    #[serde(default)]
    pub organization: Option<String>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub alias: Option<String>,
    #[serde(default)]
    pub environment: Option<String>,
    #[serde(default)]
    pub domain: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}

/// Merges tag maps left to right; later maps override earlier keys.
pub fn merge_tags<'a, I>(layers: I) -> BTreeMap<String, String>
where
    I: IntoIterator<Item = &'a BTreeMap<String, String>>,
{
    let mut merged = BTreeMap::new();
    for layer in layers {
        for (key, value) in layer {
            merged.insert(key.clone(), value.clone());
        }
    }
    merged
}
