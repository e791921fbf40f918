//! Deterministic names for stacks and units.

use config_manager::{Common, Platform};

use crate::unit::UnitKind;

#[cfg(test)]
#[path = "naming_tests.rs"]
mod tests;

/// Version used in unit ids when the release does not carry one.
pub const DEFAULT_VERSION: &str = "0";

/// Namespace prefix of unit descriptions.
pub const DESCRIPTION_NAMESPACE: &str = "eks";

/// Name of the outer stack, `"<id>-<suffix>"`.
pub fn stack_name(common: &Common, suffix: &str) -> String {
    format!("{}-{}", common.id, suffix)
}

/// Stable identifier of a unit, `"<id>-<unit>-v<version>"` normalized to
/// lowercase alphanumerics separated by single dashes.
pub fn unit_id(common: &Common, unit: UnitKind) -> String {
    let version = common
        .version
        .as_deref()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or(DEFAULT_VERSION);

    normalize(&format!("{}-{}-v{}", common.id, unit.name(), version))
}

/// Lowercases `raw` and collapses every run of characters outside
/// `[a-z0-9]` into a single `-`, trimming dashes at either end.
pub fn normalize(raw: &str) -> String {
    let mut normalized = String::with_capacity(raw.len());
    let mut pending_dash = false;

    for c in raw.chars().flat_map(char::to_lowercase) {
        if c.is_ascii_lowercase() || c.is_ascii_digit() {
            if pending_dash && !normalized.is_empty() {
                normalized.push('-');
            }
            pending_dash = false;
            normalized.push(c);
        } else {
            pending_dash = true;
        }
    }

    normalized
}

/// Description of a unit, `"<name> <alias> eks::<unit>"`.
pub fn unit_description(common: &Common, unit: UnitKind) -> String {
    describe(
        &[common.name.as_deref(), common.alias.as_deref()],
        &format!("{}::{}", DESCRIPTION_NAMESPACE, unit.name()),
    )
}

/// Description of the outer stack, prefixed with the platform identity.
pub fn stack_description(platform: Option<&Platform>, common: &Common) -> String {
    let prefix = platform
        .map(|p| [p.organization.as_deref(), p.name.as_deref(), p.alias.as_deref()])
        .unwrap_or_default();
    describe(&prefix, &common.display_name())
}

fn describe(prefix: &[Option<&str>], text: &str) -> String {
    prefix
        .iter()
        .flatten()
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .chain(std::iter::once(text))
        .collect::<Vec<_>>()
        .join(" ")
}
