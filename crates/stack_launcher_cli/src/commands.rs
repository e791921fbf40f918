//! Command modules for the StackLauncher CLI.
//!
//! - `plan_cmd`: resolve a launch and print its unit graph
//! - `render_cmd`: print a rendered configuration document
//! - `synth_cmd`: resolve a launch and write its plan manifest
//!
//! All three share [`LaunchArgs`], which assembles the settings, the runtime
//! context and the launcher the same way for every command.

use std::path::PathBuf;

use clap::Args;
use config_manager::RawContext;
use stack_launcher_core::{Launcher, TemplateNames, Topology};
use template_engine::{DirectoryTemplateSource, TemplateRenderer};
use tracing::debug;

use crate::config::AppConfig;
use crate::errors::Error;

pub mod plan_cmd;
pub mod render_cmd;
pub mod synth_cmd;

#[cfg(test)]
#[path = "commands_tests.rs"]
mod tests;

/// Options shared by every command that resolves a launch.
#[derive(Args, Debug, Clone, Default)]
pub struct LaunchArgs {
    /// Path to the settings file (defaults to ./launcher.toml when present)
    #[arg(long)]
    pub config: Option<String>,

    /// Additional JSON context file, merged after the configured ones
    #[arg(long = "context-file")]
    pub context_files: Vec<PathBuf>,

    /// Context override as KEY=VALUE; VALUE is parsed as JSON when possible
    #[arg(short = 'c', long = "context", value_parser = parse_key_val)]
    pub overrides: Vec<(String, String)>,

    /// Directory holding the template assets
    #[arg(long)]
    pub templates: Option<PathBuf>,

    /// Unit topology to declare (full or reduced)
    #[arg(long)]
    pub topology: Option<Topology>,
}

impl LaunchArgs {
    /// Loads the settings and applies the command-line overrides to them.
    pub fn settings(&self) -> Result<AppConfig, Error> {
        let mut config = AppConfig::load_or_default(self.config.as_deref())?;

        if let Some(directory) = &self.templates {
            config.templates.directory = directory.clone();
        }
        if let Some(topology) = self.topology {
            config.plan.topology = topology;
        }

        Ok(config)
    }

    /// Assembles the runtime context.
    ///
    /// Configured context files are optional. Files named on the command
    /// line must exist. `-c` overrides are applied last.
    pub fn context(&self, config: &AppConfig) -> Result<RawContext, Error> {
        let mut context = RawContext::load_all(&config.context.files)?;

        for path in &self.context_files {
            context.merge(RawContext::load(path)?);
        }

        for (key, value) in &self.overrides {
            debug!("Context override '{}'", key);
            context.set_raw(key.as_str(), value);
        }

        Ok(context)
    }

    pub fn launcher(&self, config: &AppConfig) -> Launcher {
        let source = DirectoryTemplateSource::new(config.templates.directory.clone());
        Launcher::new(TemplateRenderer::new(source), config.plan_options()).with_templates(
            TemplateNames {
                release: config.templates.release.clone(),
                synthesizer: config.templates.synthesizer.clone(),
            },
        )
    }

    /// Settings, context and launcher in one step.
    pub fn prepare(&self) -> Result<(AppConfig, RawContext, Launcher), Error> {
        let config = self.settings()?;
        let context = self.context(&config)?;
        let launcher = self.launcher(&config);
        Ok((config, context, launcher))
    }
}

pub fn parse_key_val(s: &str) -> Result<(String, String), String> {
    let pos = s
        .find('=')
        .ok_or_else(|| format!("invalid KEY=VALUE: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}
