use thiserror::Error;

use config_manager::ConfigurationError;
use template_engine::TemplateError;

use crate::unit::{UnitKind, UnitState};

#[cfg(test)]
#[path = "errors_tests.rs"]
mod tests;

/// Errors that abort a launch.
///
/// Every variant is raised before the plan is handed to a provisioner, so a
/// failed launch never leaves a partially declared unit graph behind.
#[derive(Error, Debug)]
pub enum LaunchError {
    #[error(transparent)]
    Template(#[from] TemplateError),

    #[error(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error("Stack unit '{unit}' has not been declared")]
    UnknownUnit { unit: UnitKind },

    #[error("Stack unit '{unit}' is declared more than once")]
    DuplicateUnit { unit: UnitKind },

    #[error("Stack unit '{unit}' cannot depend on itself")]
    SelfDependency { unit: UnitKind },

    #[error("Dependency of '{dependent}' on '{prerequisite}' would create a cycle")]
    DependencyCycle {
        dependent: UnitKind,
        prerequisite: UnitKind,
    },

    #[error("Stack unit '{unit}' cannot move from {from} to {to}")]
    InvalidTransition {
        unit: UnitKind,
        from: UnitState,
        to: UnitState,
    },

    #[error("Stack unit '{unit}' cannot start before '{dependency}' is provisioned")]
    DependencyNotReady {
        unit: UnitKind,
        dependency: UnitKind,
    },

    #[error("Failed to serialize the deployment plan: {reason}")]
    Serialization { reason: String },

    #[error("Failed to write plan manifest {path}")]
    ManifestWrite {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias for launch operations.
pub type LaunchResult<T> = Result<T, LaunchError>;
