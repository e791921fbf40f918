//! Decoding rendered documents into configuration records.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};

use crate::errors::{ConfigurationError, ConfigurationResult};
use crate::release::Release;
use crate::synthesizer::{SynthesizerConf, SynthesizerIdentity};

#[cfg(test)]
#[path = "resolver_tests.rs"]
mod tests;

static LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\s+at (line \d+ column \d+|position \d+)$").expect("valid location pattern")
});

static MISSING_FIELD: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^missing field `([^`]+)`").expect("valid missing field pattern"));

/// Decodes a rendered YAML (or JSON) document into `T`.
///
/// # Errors
///
/// Returns `ConfigurationError::Decode` carrying the dotted path of the
/// offending field. For a missing field the path ends with the field name.
pub fn decode<T: DeserializeOwned>(document: &str) -> ConfigurationResult<T> {
    serde_yaml::from_str(document).map_err(|e| decode_error(&e))
}

/// Decodes and validates a release document.
///
/// # Errors
///
/// - `ConfigurationError::Decode` when the document does not match the records
/// - `ConfigurationError::InvalidConfiguration` when `common.id` is blank
#[instrument(skip(document), fields(bytes = document.len()))]
pub fn resolve_release<T: DeserializeOwned>(document: &str) -> ConfigurationResult<Release<T>> {
    let release: Release<T> = decode(document)?;
    release.validate()?;

    debug!(
        "Resolved release '{}' for account {} in {}",
        release.common.id, release.common.account, release.common.region
    );
    Ok(release)
}

/// Decodes the rendered synthesizer document into a custom identity.
///
/// # Errors
///
/// - `ConfigurationError::Decode` when the document does not match
/// - `ConfigurationError::IdentityResolution` when the file asset storage
///   is not an S3 resource identifier
#[instrument(skip(document), fields(bytes = document.len()))]
pub fn resolve_synthesizer(document: &str) -> ConfigurationResult<SynthesizerIdentity> {
    let conf: SynthesizerConf = decode(document)?;
    conf.into_identity()
}

/// Splits a decoder message into the field path and the bare reason.
fn decode_error(error: &serde_yaml::Error) -> ConfigurationError {
    let message = LOCATION.replace(&error.to_string(), "").into_owned();

    let (mut path, reason) = match message.split_once(": ") {
        Some((prefix, rest)) if is_field_path(prefix) => (prefix.to_string(), rest.to_string()),
        _ => (String::new(), message.clone()),
    };

    if let Some(field) = missing_field(&reason) {
        path = if path.is_empty() {
            field
        } else {
            format!("{}.{}", path, field)
        };
    }

    ConfigurationError::Decode { path, reason }
}

fn missing_field(reason: &str) -> Option<String> {
    let captures = MISSING_FIELD.captures(reason)?;
    captures.get(1).map(|m| m.as_str().to_string())
}

fn is_field_path(candidate: &str) -> bool {
    !candidate.is_empty()
        && candidate
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-' | '[' | ']'))
}
