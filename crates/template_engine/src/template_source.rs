//! Sources of named template assets.
//!
//! A launch renders two assets by name: the release configuration template
//! and the synthesizer identity template. Assets normally live in a directory
//! shipped next to the launcher; tests and embedding callers can supply them
//! from memory instead.

use std::collections::HashMap;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use tracing::debug;

use crate::errors::{TemplateError, TemplateResult};

#[cfg(test)]
#[path = "template_source_tests.rs"]
mod tests;

/// Trait for loading the raw text of a named template asset.
pub trait TemplateSource: Send + Sync {
    /// Loads the template text stored under `name`.
    ///
    /// # Errors
    ///
    /// - `TemplateError::InvalidName` if `name` is not a safe relative name
    /// - `TemplateError::TemplateNotFound` if no asset exists under `name`
    /// - `TemplateError::Io` if the asset exists but cannot be read
    fn load(&self, name: &str) -> TemplateResult<String>;
}

/// Loads template assets from a directory on disk.
#[derive(Debug, Clone)]
pub struct DirectoryTemplateSource {
    root: PathBuf,
}

impl DirectoryTemplateSource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }
}

impl TemplateSource for DirectoryTemplateSource {
    fn load(&self, name: &str) -> TemplateResult<String> {
        validate_template_name(name)?;

        let path = self.root.join(name);
        debug!("Loading template asset {:?}", path);

        fs::read_to_string(&path).map_err(|e| match e.kind() {
            io::ErrorKind::NotFound => TemplateError::TemplateNotFound {
                name: name.to_string(),
            },
            _ => TemplateError::Io {
                name: name.to_string(),
                source: e,
            },
        })
    }
}

/// Serves template assets from memory.
///
/// # Examples
///
/// ```rust
/// use template_engine::{InMemoryTemplateSource, TemplateSource};
///
/// let source = InMemoryTemplateSource::new().with_template("conf.yaml.hbs", "id: {{id}}");
/// assert_eq!(source.load("conf.yaml.hbs").unwrap(), "id: {{id}}");
/// assert!(source.load("other.hbs").is_err());
/// ```
#[derive(Debug, Clone, Default)]
pub struct InMemoryTemplateSource {
    templates: HashMap<String, String>,
}

impl InMemoryTemplateSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_template(mut self, name: impl Into<String>, content: impl Into<String>) -> Self {
        self.templates.insert(name.into(), content.into());
        self
    }
}

impl TemplateSource for InMemoryTemplateSource {
    fn load(&self, name: &str) -> TemplateResult<String> {
        validate_template_name(name)?;

        self.templates
            .get(name)
            .cloned()
            .ok_or_else(|| TemplateError::TemplateNotFound {
                name: name.to_string(),
            })
    }
}

/// Validates that a template name is a safe, relative asset name.
///
/// # Validation Rules
///
/// - Not empty, `.` or `..`
/// - No directory traversal sequences (`..`)
/// - No absolute paths (`/`, `\`, drive letters, UNC paths)
/// - No null bytes
/// - At most 255 characters
///
/// # Examples
///
/// ```rust
/// use template_engine::validate_template_name;
///
/// assert!(validate_template_name("conf.yaml.hbs").is_ok());
/// assert!(validate_template_name("eks/addons.yaml.hbs").is_ok());
/// assert!(validate_template_name("../../etc/passwd").is_err());
/// assert!(validate_template_name("/absolute/path").is_err());
/// ```
pub fn validate_template_name(name: &str) -> TemplateResult<()> {
    let invalid = |reason: &str| TemplateError::InvalidName {
        name: name.to_string(),
        reason: reason.to_string(),
    };

    if name.is_empty() {
        return Err(invalid("Name cannot be empty"));
    }

    if name == "." || name == ".." {
        return Err(invalid("Name cannot be '.' or '..'"));
    }

    if name.contains("..") {
        return Err(invalid("Name contains directory traversal sequence '..'"));
    }

    if name.starts_with('/') || name.starts_with('\\') {
        return Err(invalid("Absolute paths are not allowed"));
    }

    // Windows drive letters
    if name.len() >= 2 && name.chars().nth(1) == Some(':') {
        return Err(invalid("Windows drive letters are not allowed"));
    }

    if name.contains('\0') {
        return Err(invalid("Name contains null byte"));
    }

    if name.len() > 255 {
        return Err(invalid("Name exceeds maximum length of 255 characters"));
    }

    Ok(())
}
