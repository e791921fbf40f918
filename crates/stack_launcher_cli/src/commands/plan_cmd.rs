//! Resolve a launch and print its unit graph without writing anything.
//!
//! ```bash
//! stack-launcher plan -c hosted:id=platform --topology reduced
//! stack-launcher plan --format json
//! ```

use clap::{Args, ValueEnum};
use colored::Colorize;
use config_manager::SynthesizerIdentity;
use stack_launcher_core::LaunchPlan;
use tracing::instrument;

use super::LaunchArgs;
use crate::errors::Error;

#[cfg(test)]
#[path = "plan_cmd_tests.rs"]
mod tests;

#[derive(ValueEnum, Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum OutputFormat {
    #[default]
    Pretty,
    Json,
}

#[derive(Args, Debug, Clone)]
pub struct PlanArgs {
    #[command(flatten)]
    pub launch: LaunchArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = OutputFormat::Pretty)]
    pub format: OutputFormat,
}

#[instrument(skip(args))]
pub fn execute(args: &PlanArgs) -> Result<(), Error> {
    let launch = build_plan(&args.launch)?;
    let output = match args.format {
        OutputFormat::Pretty => format_plan_pretty(&launch)?,
        OutputFormat::Json => format_plan_json(&launch)?,
    };
    println!("{}", output);
    Ok(())
}

pub fn build_plan(args: &LaunchArgs) -> Result<LaunchPlan, Error> {
    let (_, context, launcher) = args.prepare()?;
    Ok(launcher.plan(&context)?)
}

pub fn format_plan_pretty(launch: &LaunchPlan) -> Result<String, Error> {
    let plan = &launch.plan;
    let stack = plan.stack();
    let mut output = String::new();

    output.push_str(&format!("\n{}\n", stack.name.bold().bright_cyan()));
    output.push_str(&format!("{}: {}\n", "Description".bold(), stack.description));
    output.push_str(&format!(
        "{}: {} / {}\n",
        "Target".bold(),
        stack.account,
        stack.region
    ));
    match &launch.identity {
        SynthesizerIdentity::Default => {
            output.push_str(&format!("{}: {}\n", "Synthesizer".bold(), "default".dimmed()))
        }
        SynthesizerIdentity::Custom(conf) => output.push_str(&format!(
            "{}: {} ({})\n",
            "Synthesizer".bold(),
            "custom".green(),
            conf.qualifier
        )),
    }
    if stack.tags.is_empty() {
        output.push_str(&format!("{}: {}\n", "Tags".bold(), "(none)".dimmed()));
    } else {
        let tags: Vec<String> = stack
            .tags
            .iter()
            .map(|(k, v)| format!("{}={}", k, v))
            .collect();
        output.push_str(&format!("{}: {}\n", "Tags".bold(), tags.join(", ")));
    }

    output.push_str(&format!("\n{}\n", "Units:".bold()));
    for unit in plan.units() {
        let depends_on = if unit.depends_on.is_empty() {
            "-".dimmed().to_string()
        } else {
            unit.depends_on
                .iter()
                .map(|k| k.name())
                .collect::<Vec<_>>()
                .join(", ")
        };
        output.push_str(&format!(
            "  {} {} [{}] <- {}\n",
            "•".green(),
            unit.name().bold(),
            unit.id,
            depends_on
        ));
    }

    output.push_str(&format!("\n{}\n", "Waves:".bold()));
    for (index, wave) in plan.waves()?.iter().enumerate() {
        let names: Vec<&str> = wave.iter().map(|k| k.name()).collect();
        output.push_str(&format!("  {}: {}\n", index + 1, names.join(", ")));
    }

    Ok(output)
}

pub fn format_plan_json(launch: &LaunchPlan) -> Result<String, Error> {
    let plan = &launch.plan;
    let document = serde_json::json!({
        "stack": plan.stack(),
        "synthesizer": launch.identity,
        "units": plan.units(),
        "waves": plan.waves()?,
    });

    serde_json::to_string_pretty(&document).map_err(|e| Error::Output(e.to_string()))
}
