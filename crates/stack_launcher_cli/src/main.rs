use clap::{Parser, Subcommand};
use stack_launcher_cli::commands::{plan_cmd, render_cmd, synth_cmd};
use tracing::error;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

/// StackLauncher CLI: declare the infrastructure units of a cluster release
#[derive(Parser)]
#[command(name = "stack-launcher")]
#[command(about = "Resolve a cluster release and declare its stack units", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Resolve the launch and write the plan manifest
    Synth(synth_cmd::SynthArgs),

    /// Resolve the launch and print the unit graph
    Plan(plan_cmd::PlanArgs),

    /// Print a rendered configuration document
    Render(render_cmd::RenderArgs),

    /// Show the CLI version
    Version,
}

fn main() {
    // Initialize logging
    tracing_subscriber::registry()
        .with(fmt::layer().pretty())
        .with(EnvFilter::from_env("STACK_LAUNCHER_LOG"))
        .init();

    let cli = Cli::parse();
    let result = match &cli.command {
        Commands::Synth(args) => synth_cmd::execute(args),
        Commands::Plan(args) => plan_cmd::execute(args),
        Commands::Render(args) => render_cmd::execute(args),
        Commands::Version => {
            println!(
                "stack-launcher version {}",
                option_env!("STACK_LAUNCHER_VERSION").unwrap_or(env!("CARGO_PKG_VERSION"))
            );
            Ok(())
        }
    };

    if let Err(e) = result {
        error!("Error: {e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}
