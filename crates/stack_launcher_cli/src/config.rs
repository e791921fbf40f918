//! Settings file for the StackLauncher CLI.
//!
//! The settings are stored in TOML format. Every section is optional; a
//! missing file is equivalent to an empty one unless its path was given
//! explicitly.

use std::{
    fs,
    path::{Path, PathBuf},
};

use serde::{Deserialize, Serialize};
use stack_launcher_core::{PlanOptions, Topology, RELEASE_TEMPLATE, SYNTHESIZER_TEMPLATE};
use tracing::{debug, info};

use crate::errors::Error;

/// Default settings file name
pub const DEFAULT_CONFIG_FILENAME: &str = "launcher.toml";

/// Default directory holding the template assets
pub const DEFAULT_TEMPLATES_DIRECTORY: &str = "templates";

/// Default manifest output directory
pub const DEFAULT_OUTPUT_DIRECTORY: &str = "cdk.out";

/// Default stack name suffix
pub const DEFAULT_STACK_SUFFIX: &str = "eks";

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;

/// Main configuration structure for the StackLauncher CLI application.
///
/// # Example TOML Configuration
///
/// ```toml
/// [templates]
/// directory = "templates"
/// release = "conf.yaml.hbs"
/// synthesizer = "synthesizer.yaml.hbs"
///
/// [context]
/// files = ["cdk.json", "cdk.context.json"]
///
/// [output]
/// directory = "cdk.out"
///
/// [plan]
/// topology = "full"
/// stack_suffix = "eks"
/// ```
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub templates: TemplatesConfig,

    #[serde(default)]
    pub context: ContextConfig,

    #[serde(default)]
    pub output: OutputConfig,

    #[serde(default)]
    pub plan: PlanConfig,
}

impl AppConfig {
    /// Loads configuration from a TOML file at the specified path.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if the file does not exist, cannot be read or
    /// does not match the expected structure.
    pub fn load(path: &Path) -> Result<Self, Error> {
        debug!("Loading configuration from {:?}", path);

        if !path.exists() {
            return Err(Error::Config(format!(
                "Configuration file not found: {:?}",
                path
            )));
        }

        let content = fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("Failed to read configuration file: {}", e)))?;

        let config: AppConfig = toml::from_str(&content)
            .map_err(|e| Error::Config(format!("Failed to parse configuration file: {}", e)))?;

        Ok(config)
    }

    /// Loads the settings named on the command line, or the default file.
    ///
    /// An explicitly named file must exist. The default file is optional
    /// and its absence yields the default settings.
    pub fn load_or_default(config_path: Option<&str>) -> Result<Self, Error> {
        let path = get_config_path(config_path);
        if config_path.is_none() && !path.exists() {
            debug!("No configuration file at {:?}, using defaults", path);
            return Ok(Self::default());
        }

        Self::load(&path)
    }

    /// Saves the configuration to a TOML file, creating parent directories.
    ///
    /// # Errors
    ///
    /// Returns `Error::Config` if serialization fails or the file cannot be
    /// written.
    pub fn save(&self, path: &Path) -> Result<(), Error> {
        debug!("Saving configuration to {:?}", path);

        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::Config(format!("Failed to serialize configuration: {}", e)))?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| Error::Config(format!("Failed to create directory: {}", e)))?;
        }

        fs::write(path, content)
            .map_err(|e| Error::Config(format!("Failed to write configuration file: {}", e)))?;

        info!("Configuration saved to {:?}", path);
        Ok(())
    }

    pub fn plan_options(&self) -> PlanOptions {
        PlanOptions {
            topology: self.plan.topology,
            stack_suffix: self.plan.stack_suffix.clone(),
        }
    }
}

/// Location and names of the template assets.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TemplatesConfig {
    #[serde(default = "TemplatesConfig::default_directory")]
    pub directory: PathBuf,

    #[serde(default = "TemplatesConfig::default_release")]
    pub release: String,

    #[serde(default = "TemplatesConfig::default_synthesizer")]
    pub synthesizer: String,
}

impl TemplatesConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from(DEFAULT_TEMPLATES_DIRECTORY)
    }

    fn default_release() -> String {
        RELEASE_TEMPLATE.to_string()
    }

    fn default_synthesizer() -> String {
        SYNTHESIZER_TEMPLATE.to_string()
    }
}

impl Default for TemplatesConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
            release: Self::default_release(),
            synthesizer: Self::default_synthesizer(),
        }
    }
}

/// Context documents merged before command-line overrides.
///
/// Later files override keys of earlier ones; missing files are skipped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextConfig {
    #[serde(default = "ContextConfig::default_files")]
    pub files: Vec<PathBuf>,
}

impl ContextConfig {
    fn default_files() -> Vec<PathBuf> {
        vec![PathBuf::from("cdk.json"), PathBuf::from("cdk.context.json")]
    }
}

impl Default for ContextConfig {
    fn default() -> Self {
        Self {
            files: Self::default_files(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OutputConfig {
    #[serde(default = "OutputConfig::default_directory")]
    pub directory: PathBuf,
}

impl OutputConfig {
    fn default_directory() -> PathBuf {
        PathBuf::from(DEFAULT_OUTPUT_DIRECTORY)
    }
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            directory: Self::default_directory(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default)]
    pub topology: Topology,

    #[serde(default = "PlanConfig::default_stack_suffix")]
    pub stack_suffix: String,
}

impl PlanConfig {
    fn default_stack_suffix() -> String {
        DEFAULT_STACK_SUFFIX.to_string()
    }
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            topology: Topology::default(),
            stack_suffix: Self::default_stack_suffix(),
        }
    }
}

/// Resolves the path to the configuration file.
///
/// - If `config_path` is `Some(path)`, returns that path
/// - Otherwise returns `./launcher.toml` in the current directory
pub fn get_config_path(config_path: Option<&str>) -> PathBuf {
    if let Some(path) = config_path {
        PathBuf::from(path)
    } else {
        let current_dir = std::env::current_dir().unwrap_or_else(|_| PathBuf::from("."));
        current_dir.join(DEFAULT_CONFIG_FILENAME)
    }
}
