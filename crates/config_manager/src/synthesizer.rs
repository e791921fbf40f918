//! Deployment identity used to synthesize stacks.
//!
//! By default stacks are synthesized with the provider's standard
//! bootstrap roles and storage. When the runtime context sets
//! `synthesizer:custom`, the roles, bootstrap parameter and asset storage
//! come from the hosted context instead and are rendered through the
//! synthesizer template into a [`SynthesizerConf`].

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use template_engine::SubstitutionMap;

use crate::arn::extract_container_name;
use crate::context::{keys, RawContext};
use crate::de::required_string;
use crate::errors::{ConfigurationError, ConfigurationResult};

#[cfg(test)]
#[path = "synthesizer_tests.rs"]
mod tests;

/// Substitution keys exposed to the synthesizer template.
pub mod substitution_keys {
    pub const ROLE_EXEC: &str = "synthesizer:role:exec";
    pub const ROLE_DEPLOY: &str = "synthesizer:role:deploy";
    pub const ROLE_LOOKUP: &str = "synthesizer:role:lookup";
    pub const ROLE_ASSETS: &str = "synthesizer:role:assets";
    pub const ROLE_IMAGES: &str = "synthesizer:role:images";
    pub const SSM: &str = "synthesizer:ssm";
    pub const STORAGE_ASSETS: &str = "synthesizer:storage:assets";
    pub const STORAGE_IMAGES: &str = "synthesizer:storage:images";
    pub const QUALIFIER: &str = "synthesizer:qualifier";
    pub const ASSETS_PREFIX: &str = "synthesizer:assets:prefix";
    pub const IMAGES_TAG: &str = "synthesizer:images:tag";
    pub const EXTERNAL_ID: &str = "synthesizer:externalid";
}

fn enabled_by_default() -> bool {
    true
}

/// Custom synthesizer settings decoded from the rendered template.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SynthesizerConf {
    #[serde(deserialize_with = "required_string")]
    pub qualifier: String,
    #[serde(deserialize_with = "required_string")]
    pub cloud_formation_execution_role: String,
    #[serde(deserialize_with = "required_string")]
    pub deploy_role_arn: String,
    #[serde(deserialize_with = "required_string")]
    pub lookup_role_arn: String,
    #[serde(deserialize_with = "required_string")]
    pub file_asset_publishing_role_arn: String,
    #[serde(deserialize_with = "required_string")]
    pub image_asset_publishing_role_arn: String,
    #[serde(deserialize_with = "required_string")]
    pub bootstrap_stack_version_ssm_parameter: String,
    #[serde(deserialize_with = "required_string")]
    pub file_assets_bucket_name: String,
    #[serde(deserialize_with = "required_string")]
    pub image_assets_repository_name: String,
    #[serde(default = "enabled_by_default")]
    pub generate_bootstrap_version_rule: bool,
    #[serde(default = "enabled_by_default")]
    pub use_lookup_role_for_stack_operations: bool,
    #[serde(default)]
    pub bucket_prefix: Option<String>,
    #[serde(default)]
    pub docker_tag_prefix: Option<String>,
    #[serde(default)]
    pub lookup_role_external_id: Option<String>,
    #[serde(default)]
    pub file_asset_publishing_external_id: Option<String>,
    #[serde(default)]
    pub image_asset_publishing_external_id: Option<String>,
    #[serde(default)]
    pub deploy_role_external_id: Option<String>,
}

/// How stacks are synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum SynthesizerIdentity {
    /// The provider's standard bootstrap resources.
    Default,
    /// Explicit roles and storage; `file_assets_bucket_name` holds a bucket name.
    Custom(Box<SynthesizerConf>),
}

impl SynthesizerIdentity {
    pub fn is_custom(&self) -> bool {
        matches!(self, Self::Custom(_))
    }

    /// Qualifier of the custom synthesizer, if any.
    pub fn qualifier(&self) -> Option<&str> {
        match self {
            Self::Default => None,
            Self::Custom(conf) => Some(conf.qualifier.as_str()),
        }
    }
}

impl SynthesizerConf {
    /// Finalizes a decoded configuration into a custom identity.
    ///
    /// The file asset storage is given as a resource identifier and is
    /// reduced to its bucket name. An empty bucket name is accepted.
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError::IdentityResolution` when the file asset
    /// storage is not an S3 resource identifier.
    pub fn into_identity(mut self) -> ConfigurationResult<SynthesizerIdentity> {
        let bucket = extract_container_name(&self.file_assets_bucket_name)
            .ok_or_else(|| ConfigurationError::IdentityResolution {
                field: "fileAssetsBucketName".to_string(),
                reason: format!(
                    "'{}' is not an S3 resource identifier",
                    self.file_assets_bucket_name
                ),
            })?
            .to_string();

        debug!(
            "Resolved file asset storage '{}' to bucket '{}'",
            self.file_assets_bucket_name, bucket
        );
        self.file_assets_bucket_name = bucket;

        Ok(SynthesizerIdentity::Custom(Box::new(self)))
    }
}

/// Whether the runtime context asks for a custom synthesizer.
pub fn custom_synthesizer_requested(context: &RawContext) -> bool {
    let custom = context.flag(keys::SYNTHESIZER_CUSTOM);
    info!(
        "Synthesizer mode: {}",
        if custom { "custom" } else { "default" }
    );
    custom
}

/// Qualifier shared by the bootstrap resources, `"<name>-<alias>"`.
pub fn synthesizer_qualifier(context: &RawContext) -> ConfigurationResult<String> {
    let name = context.require_string(keys::SYNTHESIZER_NAME)?;
    let alias = context.require_string(keys::SYNTHESIZER_ALIAS)?;
    Ok(format!("{}-{}", name, alias))
}

/// Builds the substitution values for the synthesizer template.
///
/// # Errors
///
/// - `ConfigurationError::ContextMissing` when a hosted key is absent
/// - `ConfigurationError::ContextInvalid` when a hosted key is not a scalar
pub fn synthesizer_substitutions(context: &RawContext) -> ConfigurationResult<SubstitutionMap> {
    use substitution_keys as sk;

    let qualifier = synthesizer_qualifier(context)?;

    let substitutions = SubstitutionMap::new()
        .with(sk::ROLE_EXEC, context.require_string(keys::ROLE_EXEC)?)
        .with(sk::ROLE_DEPLOY, context.require_string(keys::ROLE_DEPLOY)?)
        .with(sk::ROLE_LOOKUP, context.require_string(keys::ROLE_LOOKUP)?)
        .with(sk::ROLE_ASSETS, context.require_string(keys::ROLE_ASSETS)?)
        .with(sk::ROLE_IMAGES, context.require_string(keys::ROLE_IMAGES)?)
        .with(sk::SSM, context.require_string(keys::KEYS_SSM)?)
        .with(
            sk::STORAGE_ASSETS,
            context.require_string(keys::STORAGE_ASSETS)?,
        )
        .with(
            sk::STORAGE_IMAGES,
            context.require_string(keys::STORAGE_IMAGES)?,
        )
        .with(sk::QUALIFIER, qualifier.clone())
        .with(sk::ASSETS_PREFIX, qualifier.clone())
        .with(sk::IMAGES_TAG, qualifier)
        .with(sk::EXTERNAL_ID, context.require_string(keys::API_KEY)?);

    Ok(substitutions)
}
