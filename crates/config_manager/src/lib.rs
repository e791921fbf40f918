//! Configuration management for StackLauncher
//!
//! Turns the loosely typed runtime context of a launch into strongly typed
//! configuration:
//!
//! - [`RawContext`] collects context values from files and overrides, and
//!   [`extract_tags`] narrows the tag list leniently.
//! - [`release_substitutions`] and [`synthesizer_substitutions`] prepare the
//!   values for the two configuration templates.
//! - [`resolve_release`] and [`resolve_synthesizer`] decode the rendered
//!   documents into [`Release`] and [`SynthesizerIdentity`].
//! - [`extract_container_name`] reduces storage resource identifiers to
//!   bucket names.

// Runtime context
pub mod context;
pub mod errors;

// Configuration records
pub mod addons;
pub mod cluster;
pub mod common;
pub mod network;
pub mod observability;
pub mod release;
pub mod synthesizer;

// Decoding and identity
pub mod arn;
mod de;
pub mod resolver;

pub use addons::{AddonsConf, HelmChartConf};
pub use arn::{extract_container_name, S3_ARN_PREFIX};
pub use cluster::{EndpointAccess, KubernetesConf, LoggingType};
pub use common::{merge_tags, Common, Platform};
pub use context::{extract_tags, keys, RawContext, TagSet};
pub use errors::{ConfigurationError, ConfigurationResult};
pub use network::{InstanceTenancy, NetworkConf, SecurityGroupConf, SubnetConf, SubnetType};
pub use observability::{AlarmConf, ObservabilityConf};
pub use release::{release_substitutions, ClusterReleaseConf, Release};
pub use resolver::{decode, resolve_release, resolve_synthesizer};
pub use synthesizer::{
    custom_synthesizer_requested, synthesizer_qualifier, synthesizer_substitutions,
    SynthesizerConf, SynthesizerIdentity,
};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;
