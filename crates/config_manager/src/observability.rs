//! Observability unit configuration.

use serde::{Deserialize, Serialize};

use crate::de::{null_as_default, required_string};

#[cfg(test)]
#[path = "observability_tests.rs"]
mod tests;

fn enabled_by_default() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObservabilityConf {
    #[serde(default = "enabled_by_default")]
    pub enabled: bool,
    #[serde(default)]
    pub container_insights: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub alarms: Vec<AlarmConf>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub dashboards: Vec<String>,
    #[serde(default)]
    pub notification_topic: Option<String>,
}

impl Default for ObservabilityConf {
    fn default() -> Self {
        Self {
            enabled: true,
            container_insights: None,
            alarms: Vec::new(),
            dashboards: Vec::new(),
            notification_topic: None,
        }
    }
}

/// Metric alarm raised when `metric` crosses `threshold`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AlarmConf {
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    #[serde(deserialize_with = "required_string")]
    pub metric: String,
    pub threshold: f64,
    #[serde(default = "default_evaluation_periods")]
    pub evaluation_periods: u32,
}

fn default_evaluation_periods() -> u32 {
    1
}
