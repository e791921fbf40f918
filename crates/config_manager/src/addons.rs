//! Add-on unit configuration (Helm charts installed into the cluster).

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::de::{null_as_default, required_string, scalar_string};

#[cfg(test)]
#[path = "addons_tests.rs"]
mod tests;

fn enabled_by_default() -> bool {
    true
}

/// A set of charts deployed as one unit.
///
/// Used for both the `addons` and `observability-addons` units.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddonsConf {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub charts: Vec<HelmChartConf>,
}

impl Default for AddonsConf {
    fn default() -> Self {
        Self {
            enabled: true,
            charts: Vec::new(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelmChartConf {
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    #[serde(deserialize_with = "required_string")]
    pub chart: String,
    #[serde(deserialize_with = "required_string")]
    pub repository: String,
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default)]
    pub namespace: Option<String>,
    #[serde(default)]
    pub create_namespace: Option<bool>,
    /// Chart values passed through verbatim.
    #[serde(default)]
    pub values: Option<Value>,
}
