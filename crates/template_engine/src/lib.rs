//! Template Engine for StackLauncher
//!
//! This crate renders the named configuration templates a launch depends on.
//! A template asset is loaded from a [`TemplateSource`], compiled with
//! Handlebars and rendered against a [`SubstitutionMap`] of namespaced values.
//! The result is a plain document string that the configuration resolver
//! decodes into typed records.

use std::sync::Arc;
use tracing::debug;

mod errors;
mod handlebars_engine;
mod substitution;
mod template_source;

pub use errors::{TemplateError, TemplateResult};
pub use handlebars_engine::{HandlebarsTemplateEngine, TemplateRenderConfig};
pub use substitution::{SubstitutionMap, NAMESPACE_SEPARATOR};
pub use template_source::{
    validate_template_name, DirectoryTemplateSource, InMemoryTemplateSource, TemplateSource,
};

#[cfg(test)]
#[path = "lib_tests.rs"]
mod tests;

/// Renders named template assets with substitution values.
///
/// Every call compiles the asset into a fresh engine, so rendering has no
/// side effects beyond reading the asset and identical inputs always yield
/// identical documents.
///
/// # Examples
///
/// ```rust
/// use template_engine::{InMemoryTemplateSource, SubstitutionMap, TemplateRenderer};
///
/// let source = InMemoryTemplateSource::new()
///     .with_template("synthesizer.yaml.hbs", "qualifier: {{json synthesizer.qualifier}}");
/// let renderer = TemplateRenderer::new(source);
///
/// let substitutions = SubstitutionMap::new().with("synthesizer:qualifier", "platform-prod");
/// let document = renderer.render("synthesizer.yaml.hbs", &substitutions).unwrap();
///
/// assert_eq!(document, "qualifier: \"platform-prod\"");
/// ```
#[derive(Clone)]
pub struct TemplateRenderer {
    source: Arc<dyn TemplateSource>,
    config: TemplateRenderConfig,
}

impl TemplateRenderer {
    pub fn new(source: impl TemplateSource + 'static) -> Self {
        Self::with_config(source, TemplateRenderConfig::default())
    }

    pub fn with_config(source: impl TemplateSource + 'static, config: TemplateRenderConfig) -> Self {
        Self {
            source: Arc::new(source),
            config,
        }
    }

    /// Loads, compiles and renders the template asset `name`.
    ///
    /// # Errors
    ///
    /// - `TemplateError::TemplateNotFound`: the asset does not exist
    /// - `TemplateError::TemplateSyntax`: the asset is malformed
    /// - `TemplateError::NamespaceConflict`: substitution keys collide
    /// - `TemplateError::Render`: rendering failed
    pub fn render(&self, name: &str, substitutions: &SubstitutionMap) -> TemplateResult<String> {
        let template = self.source.load(name)?;

        let mut engine = HandlebarsTemplateEngine::with_config(self.config.clone());
        engine.register_custom_helpers();
        engine.compile(name, &template)?;

        let context = substitutions.to_context()?;
        let document = engine.render(name, &context)?;

        debug!(
            "Rendered template '{}' with {} substitutions into {} bytes",
            name,
            substitutions.len(),
            document.len()
        );
        Ok(document)
    }
}

impl std::fmt::Debug for TemplateRenderer {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TemplateRenderer")
            .field("config", &self.config)
            .finish_non_exhaustive()
    }
}
