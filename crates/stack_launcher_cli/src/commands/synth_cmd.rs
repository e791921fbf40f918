//! Resolve a launch and write its plan manifest for the deployment tool.
//!
//! Nothing is written unless the whole launch resolves.

use std::path::PathBuf;

use clap::Args;
use colored::Colorize;
use stack_launcher_core::{HandoffReceipt, ManifestProvisioner};
use tracing::instrument;

use super::LaunchArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "synth_cmd_tests.rs"]
mod tests;

#[derive(Args, Debug, Clone)]
pub struct SynthArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,

    /// Manifest output directory (overrides the settings file)
    #[arg(long)]
    pub out: Option<PathBuf>,
}

#[instrument(skip(args))]
pub fn execute(args: &SynthArgs) -> Result<(), Error> {
    let receipt = synthesize(args)?;
    println!(
        "{} {} units written to {}",
        "✓".green(),
        receipt.unit_count,
        receipt.location.bold()
    );
    Ok(())
}

pub fn synthesize(args: &SynthArgs) -> Result<HandoffReceipt, Error> {
    let (config, context, launcher) = args.launch.prepare()?;
    let directory = args
        .out
        .clone()
        .unwrap_or_else(|| config.output.directory.clone());

    let provisioner = ManifestProvisioner::new(directory);
    Ok(launcher.launch(&context, &provisioner)?)
}
