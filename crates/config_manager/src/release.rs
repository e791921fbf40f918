//! Release documents.
//!
//! A release document pairs the shared [`Common`] identity with a
//! release-specific payload:
//!
//! ```yaml
//! common:
//!   id: platform
//!   account: "123456789012"
//!   region: us-west-2
//! platform:
//!   tags:
//!     CostCenter: infra
//! release:
//!   vpc: { name: platform-vpc, cidr: 10.0.0.0/16 }
//!   eks: { name: platform, version: "1.30" }
//! ```

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use tracing::{debug, warn};

use template_engine::SubstitutionMap;

use crate::addons::AddonsConf;
use crate::cluster::KubernetesConf;
use crate::common::{merge_tags, Common, Platform};
use crate::context::{extract_tags, keys, RawContext};
use crate::errors::{ConfigurationError, ConfigurationResult};
use crate::network::NetworkConf;
use crate::observability::ObservabilityConf;

#[cfg(test)]
#[path = "release_tests.rs"]
mod tests;

/// Decoded release configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Release<T> {
    pub common: Common,
    #[serde(default)]
    pub platform: Option<Platform>,
    pub release: T,
}

impl<T> Release<T> {
    /// Checks the constraints serde cannot express.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::InvalidConfiguration` when `common.id`
    /// is blank.
    pub fn validate(&self) -> ConfigurationResult<()> {
        if self.common.id.trim().is_empty() {
            return Err(ConfigurationError::InvalidConfiguration {
                field: "common.id".to_string(),
                reason: "must not be blank".to_string(),
            });
        }
        Ok(())
    }

    /// Tags applied to every stack: platform tags overlaid with release tags.
    pub fn stack_tags(&self) -> BTreeMap<String, String> {
        let platform = self.platform.as_ref().map(|p| &p.tags);
        merge_tags(platform.into_iter().chain(std::iter::once(&self.common.tags)))
    }
}

/// Payload of a cluster release.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClusterReleaseConf {
    pub vpc: NetworkConf,
    pub eks: KubernetesConf,
    #[serde(default)]
    pub addons: Option<AddonsConf>,
    #[serde(default)]
    pub observability_addons: Option<AddonsConf>,
    #[serde(default)]
    pub observability: Option<ObservabilityConf>,
}

/// Builds the substitution values for the release template.
///
/// Every context value is exposed under its own key, except `hosted:tags`
/// which is replaced by the narrowed [`TagSet`](crate::TagSet). A key that
/// cannot be nested (an empty segment, or a value that is also the namespace
/// of another key) is skipped with a warning. On a collision the more deeply
/// nested key is kept.
///
/// # Errors
///
/// Returns `ConfigurationError::Substitution` if the tag set cannot be
/// serialized.
pub fn release_substitutions(context: &RawContext) -> ConfigurationResult<SubstitutionMap> {
    let mut substitutions = SubstitutionMap::new();

    let tags = extract_tags(context, keys::TAGS);
    debug!("Exposing {} tag maps to the release template", tags.len());
    substitutions
        .insert_serialized(keys::TAGS, &tags)
        .map_err(|e| ConfigurationError::Substitution {
            reason: e.to_string(),
        })?;

    let mut entries: Vec<(&String, &serde_json::Value)> = context
        .iter()
        .filter(|(key, _)| key.as_str() != keys::TAGS)
        .collect();
    // Descending order visits `a:b:c` before `a:b`.
    entries.sort_by(|a, b| b.0.cmp(a.0));

    for (key, value) in entries {
        if let Err(e) = substitutions.check_key(key) {
            warn!("Context key '{}' is not passed to the release template: {}", key, e);
            continue;
        }
        substitutions.insert(key.clone(), value.clone());
    }

    Ok(substitutions)
}
