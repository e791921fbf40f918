//! Print a rendered configuration document for inspection.
//!
//! ```bash
//! stack-launcher render release -c hosted:id=platform
//! stack-launcher render synthesizer --context-file cdk.context.json
//! ```

use clap::{Args, ValueEnum};
use tracing::instrument;

use super::LaunchArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "render_cmd_tests.rs"]
mod tests;

#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderTarget {
    /// The release configuration document
    Release,
    /// The synthesizer identity document
    Synthesizer,
}

#[derive(Args, Debug, Clone)]
pub struct RenderArgs {
    /// Which document to render
    #[arg(value_enum)]
    pub target: RenderTarget,

    #[command(flatten)]
    pub launch: LaunchArgs,
}

#[instrument(skip(args))]
pub fn execute(args: &RenderArgs) -> Result<(), Error> {
    print!("{}", render(args)?);
    Ok(())
}

pub fn render(args: &RenderArgs) -> Result<String, Error> {
    let (_, context, launcher) = args.launch.prepare()?;
    let document = match args.target {
        RenderTarget::Release => launcher.render_release(&context)?,
        RenderTarget::Synthesizer => launcher.render_synthesizer(&context)?,
    };
    Ok(document)
}
