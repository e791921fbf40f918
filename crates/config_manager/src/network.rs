//! Network unit configuration.

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::de::{null_as_default, required_string};

#[cfg(test)]
#[path = "network_tests.rs"]
mod tests;

/// Tenancy applied to instances launched into the network.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum InstanceTenancy {
    #[default]
    Default,
    Dedicated,
}

/// Routing class of a subnet group.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum SubnetType {
    Public,
    PrivateWithEgress,
    PrivateIsolated,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubnetConf {
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    pub subnet_type: SubnetType,
    pub cidr_mask: u8,
    #[serde(default)]
    pub reserved: bool,
    #[serde(default)]
    pub map_public_ip_on_launch: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SecurityGroupConf {
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub allow_all_outbound: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}

/// Virtual network provisioned by the `network` unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NetworkConf {
    #[serde(deserialize_with = "required_string")]
    pub name: String,
    #[serde(deserialize_with = "required_string")]
    pub cidr: String,
    #[serde(default)]
    pub ip_protocol: Option<String>,
    #[serde(default)]
    pub nat_gateways: Option<u32>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub subnets: Vec<SubnetConf>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub security_groups: Vec<SecurityGroupConf>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub availability_zones: Vec<String>,
    #[serde(default)]
    pub default_instance_tenancy: InstanceTenancy,
    #[serde(default)]
    pub create_internet_gateway: Option<bool>,
    #[serde(default)]
    pub enable_dns_hostnames: Option<bool>,
    #[serde(default)]
    pub enable_dns_support: Option<bool>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub tags: BTreeMap<String, String>,
}
