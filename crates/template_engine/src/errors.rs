use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Error types that can occur while loading and rendering template assets.
///
/// Every variant is fatal for a launch: configuration documents are produced
/// from templates, so nothing downstream can run once rendering fails.
///
/// # Examples
///
/// ```rust,ignore
/// use template_engine::TemplateError;
///
/// match renderer.render("conf.yaml.hbs", &substitutions) {
///     Ok(document) => println!("{document}"),
///     Err(TemplateError::TemplateNotFound { name }) => {
///         eprintln!("No template asset named '{}'", name);
///     },
///     Err(e) => eprintln!("Other error: {}", e),
/// }
/// ```
#[derive(Error, Debug)]
pub enum TemplateError {
    /// I/O operation failed while reading a template asset.
    #[error("IO error while reading template '{name}': {source}")]
    Io {
        /// The template asset being read
        name: String,
        /// The underlying I/O failure
        #[source]
        source: std::io::Error,
    },

    /// No template asset exists under the requested name.
    #[error("Template not found: {name}")]
    TemplateNotFound {
        /// The requested template name
        name: String,
    },

    /// The template asset itself is malformed and cannot be compiled.
    ///
    /// Templates ship with the launcher, so this is a build-time defect rather
    /// than an expected runtime condition.
    #[error("Template syntax error in '{name}': {message}")]
    TemplateSyntax {
        /// The template that failed to compile
        name: String,
        /// Detailed error message from the template parser
        message: String,
    },

    /// A compiled template failed while rendering.
    ///
    /// This usually means a helper received a value of the wrong shape.
    #[error("Template rendering failed for '{name}': {message}")]
    Render {
        /// The template being rendered
        name: String,
        /// Detailed error message from the renderer
        message: String,
    },

    /// The template name is not a safe relative asset name.
    #[error("Invalid template name: {name} - {reason}")]
    InvalidName {
        /// The rejected template name
        name: String,
        /// Specific reason why the name is invalid
        reason: String,
    },

    /// A namespaced substitution key collides with another key.
    ///
    /// Raised when one key is used both as a value and as the namespace
    /// prefix of another key, e.g. `synthesizer:role` and `synthesizer:role:exec`.
    #[error("Substitution key '{key}' conflicts with an existing namespace or value")]
    NamespaceConflict {
        /// The key that could not be placed
        key: String,
    },

    /// A substitution value could not be converted to template data.
    #[error("Substitution value for '{key}' could not be serialized: {reason}")]
    InvalidSubstitution {
        /// The substitution key
        key: String,
        /// Serializer failure message
        reason: String,
    },

    /// The template asset exceeds the configured size limit.
    #[error("Resource limit exceeded: {limit_type} - {message}")]
    ResourceLimit {
        /// Type of resource limit that was exceeded
        limit_type: String,
        /// Detailed message about the limit violation
        message: String,
    },
}

/// Result type alias for template operations.
pub type TemplateResult<T> = Result<T, TemplateError>;
