use config_manager::ConfigurationError;
use stack_launcher_core::LaunchError;
use template_engine::TemplateError;
use thiserror::Error;

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that can occur in the StackLauncher CLI application.
///
/// Library failures are wrapped as-is so the message printed on exit is the
/// one the failing component produced.
#[derive(Error, Debug)]
pub enum Error {
    /// The settings file could not be found, read, parsed or written.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The runtime context could not be assembled.
    #[error(transparent)]
    Context(#[from] ConfigurationError),

    /// Rendering a template for inspection failed.
    #[error(transparent)]
    Template(#[from] TemplateError),

    /// Resolving, planning or handing off the launch failed.
    #[error(transparent)]
    Launch(#[from] LaunchError),

    /// Command output could not be produced.
    #[error("Failed to format output: {0}")]
    Output(String),
}
