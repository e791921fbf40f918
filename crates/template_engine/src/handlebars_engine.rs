//! # Handlebars Template Engine
//!
//! This module compiles and renders configuration templates with the
//! Handlebars templating engine. The engine is configured for logic-less
//! document generation:
//!
//! - **Variable Substitution**: `{{key}}` and dotted `{{category.field}}`
//! - **Sections**: `{{#each list}}` iteration and `{{#if flag}}` conditionals
//! - **No HTML escaping**: output is YAML or JSON, never markup
//! - **Lenient lookups**: absent keys render empty and are falsy
//! - **Helpers**: `json`, `lower_case`, `upper_case`, `kebab_case`, `default`
//!
//! ## Examples
//!
//! ```rust
//! # use template_engine::HandlebarsTemplateEngine;
//! # use serde_json::json;
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut engine = HandlebarsTemplateEngine::new();
//! engine.register_custom_helpers();
//!
//! engine.compile("conf", "id: {{json common.id}}\nname: {{kebab_case common.name}}")?;
//! let document = engine.render("conf", &json!({
//!     "common": {"id": "platform", "name": "Platform Release"}
//! }))?;
//!
//! assert_eq!(document, "id: \"platform\"\nname: platform-release");
//! # Ok(())
//! # }
//! ```

use handlebars::{handlebars_helper, no_escape, Handlebars};
use serde_json::Value;
use tracing::debug;

use crate::errors::{TemplateError, TemplateResult};

#[cfg(test)]
#[path = "handlebars_tests.rs"]
mod handlebars_tests;

// ================================
// Custom Handlebars Helpers
// ================================

// Renders any value as a JSON literal. JSON scalars are valid YAML flow
// scalars, so quoted output stays safe inside YAML documents.
handlebars_helper!(json_helper: |value: Json| value.to_string());

handlebars_helper!(lower_case_helper: |text: str| text.to_lowercase());

handlebars_helper!(upper_case_helper: |text: str| text.to_uppercase());

handlebars_helper!(kebab_case_helper: |text: str| to_kebab_case(text));

handlebars_helper!(default_helper: |value: Json, fallback: Json| {
    if value.is_null() {
        fallback.clone()
    } else {
        value.clone()
    }
});

fn to_kebab_case(text: &str) -> String {
    text.trim()
        .chars()
        .map(|c| match c {
            ' ' | '_' => '-',
            c => c.to_ascii_lowercase(),
        })
        .collect()
}

/// Configuration for template rendering behavior.
#[derive(Debug, Clone)]
pub struct TemplateRenderConfig {
    /// Whether to fail on undefined variables (true) or render them empty (false).
    ///
    /// **Default**: `false`, matching logic-less template semantics where an
    /// absent key is an empty value and a false condition.
    pub strict_variables: bool,

    /// Maximum size of template content in bytes.
    ///
    /// **Default**: 1MB (1,048,576 bytes)
    pub max_template_size: usize,
}

impl Default for TemplateRenderConfig {
    fn default() -> Self {
        Self {
            strict_variables: false,
            max_template_size: 1_048_576, // 1MB
        }
    }
}

/// Handlebars engine holding compiled templates and the custom helpers.
///
/// Each engine instance owns its own registry. Rendering never mutates
/// shared state, so identical inputs always produce identical documents.
pub struct HandlebarsTemplateEngine {
    handlebars: Handlebars<'static>,
    config: TemplateRenderConfig,
}

impl HandlebarsTemplateEngine {
    /// Creates a new engine with the default configuration.
    ///
    /// Custom helpers must be registered separately using
    /// `register_custom_helpers()`.
    pub fn new() -> Self {
        Self::with_config(TemplateRenderConfig::default())
    }

    /// Creates a new engine with custom configuration.
    ///
    /// # Examples
    ///
    /// ```rust
    /// use template_engine::{HandlebarsTemplateEngine, TemplateRenderConfig};
    ///
    /// let config = TemplateRenderConfig {
    ///     strict_variables: true,
    ///     ..Default::default()
    /// };
    ///
    /// let engine = HandlebarsTemplateEngine::with_config(config);
    /// assert!(engine.config().strict_variables);
    /// ```
    pub fn with_config(config: TemplateRenderConfig) -> Self {
        let mut handlebars = Handlebars::new();

        // Configure handlebars based on our config
        handlebars.set_strict_mode(config.strict_variables);
        handlebars.register_escape_fn(no_escape);

        Self { handlebars, config }
    }

    pub fn config(&self) -> &TemplateRenderConfig {
        &self.config
    }

    /// Registers the helpers available to configuration templates.
    ///
    /// - `json`: render a value as a JSON literal
    /// - `lower_case`: convert text to lowercase
    /// - `upper_case`: convert text to UPPERCASE
    /// - `kebab_case`: convert text to kebab-case
    /// - `default`: substitute a fallback for an absent value
    pub fn register_custom_helpers(&mut self) {
        self.handlebars.register_helper("json", Box::new(json_helper));
        self.handlebars
            .register_helper("lower_case", Box::new(lower_case_helper));
        self.handlebars
            .register_helper("upper_case", Box::new(upper_case_helper));
        self.handlebars
            .register_helper("kebab_case", Box::new(kebab_case_helper));
        self.handlebars
            .register_helper("default", Box::new(default_helper));
    }

    /// Compiles `template` and registers it under `name`.
    ///
    /// # Errors
    ///
    /// - `TemplateError::ResourceLimit`: template exceeds `max_template_size`
    /// - `TemplateError::TemplateSyntax`: template is not valid Handlebars
    pub fn compile(&mut self, name: &str, template: &str) -> TemplateResult<()> {
        if template.len() > self.config.max_template_size {
            return Err(TemplateError::ResourceLimit {
                limit_type: "template_size".to_string(),
                message: format!(
                    "Template '{}' size {} bytes exceeds limit of {} bytes",
                    name,
                    template.len(),
                    self.config.max_template_size
                ),
            });
        }

        self.handlebars
            .register_template_string(name, template)
            .map_err(|e| TemplateError::TemplateSyntax {
                name: name.to_string(),
                message: e.to_string(),
            })?;

        debug!("Compiled template '{}' ({} bytes)", name, template.len());
        Ok(())
    }

    pub fn has_template(&self, name: &str) -> bool {
        self.handlebars.has_template(name)
    }

    /// Renders a previously compiled template with `data`.
    ///
    /// # Errors
    ///
    /// - `TemplateError::TemplateNotFound`: no template compiled under `name`
    /// - `TemplateError::Render`: a helper failed or, in strict mode, a
    ///   variable was missing
    pub fn render(&self, name: &str, data: &Value) -> TemplateResult<String> {
        if !self.has_template(name) {
            return Err(TemplateError::TemplateNotFound {
                name: name.to_string(),
            });
        }

        self.handlebars
            .render(name, data)
            .map_err(|e| TemplateError::Render {
                name: name.to_string(),
                message: e.to_string(),
            })
    }
}

impl Default for HandlebarsTemplateEngine {
    fn default() -> Self {
        Self::new()
    }
}
