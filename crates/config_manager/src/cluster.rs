//! Kubernetes cluster unit configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::de::{null_as_default, required_string, scalar_string};

#[cfg(test)]
#[path = "cluster_tests.rs"]
mod tests;

/// Reachability of the cluster API endpoint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum EndpointAccess {
    Public,
    Private,
    #[default]
    PublicAndPrivate,
}

/// Control plane log streams.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum LoggingType {
    Api,
    Audit,
    Authenticator,
    ControllerManager,
    Scheduler,
}

/// Cluster provisioned by the `cluster` unit.
///
/// `rbac`, `tenancy`, `nodeGroups`, `addons`, `interruption` and
/// `observability` name further template assets that the provisioning
/// backend expands; they are carried through unchanged.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KubernetesConf {
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    #[serde(deserialize_with = "scalar_string")]
    pub version: String,
    #[serde(default)]
    pub endpoint_access: EndpointAccess,
    #[serde(default)]
    pub prune: Option<bool>,
    #[serde(default)]
    pub rbac: Option<String>,
    #[serde(default)]
    pub tenancy: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub logging_types: Vec<LoggingType>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub vpc_subnet_types: Vec<String>,
    #[serde(default)]
    pub node_groups: Option<String>,
    #[serde(default)]
    pub addons: Option<String>,
    #[serde(default)]
    pub interruption: Option<String>,
    #[serde(default)]
    pub observability: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub annotations: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub labels: BTreeMap<String, String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}
