//! # StackLauncher Core
//!
//! This crate provides the launch orchestration for StackLauncher, a tool
//! that turns a runtime context into a declared graph of infrastructure
//! stack units for a Kubernetes cluster release.
//!
//! ## Overview
//!
//! A launch runs these steps:
//! 1. Build substitution values from the runtime context
//! 2. Render the release and synthesizer templates
//! 3. Decode the rendered documents into typed configuration
//! 4. Declare the network, cluster, add-on and observability units and
//!    their dependencies
//! 5. Hand the complete plan to a [`Provisioner`]
//!
//! ## Examples
//!
//! ```no_run
//! use config_manager::RawContext;
//! use stack_launcher_core::{Launcher, ManifestProvisioner, PlanOptions};
//! use template_engine::{DirectoryTemplateSource, TemplateRenderer};
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let context = RawContext::load_all(&["cdk.context.json"])?;
//! let renderer = TemplateRenderer::new(DirectoryTemplateSource::new("templates"));
//! let launcher = Launcher::new(renderer, PlanOptions::default());
//!
//! let receipt = launcher.launch(&context, &ManifestProvisioner::new("cdk.out"))?;
//! println!("Plan written to {}", receipt.location);
//! # Ok(())
//! # }
//! ```

pub mod errors;
pub mod graph;
pub mod launch;
pub mod naming;
pub mod orchestrator;
pub mod provisioner;
pub mod unit;

pub use errors::{LaunchError, LaunchResult};
pub use graph::StackGraph;
pub use launch::{
    LaunchPlan, Launcher, ResolvedLaunch, TemplateNames, RELEASE_TEMPLATE, SYNTHESIZER_TEMPLATE,
};
pub use orchestrator::{DeploymentPlan, PlanOptions, StackDescriptor, StackOrchestrator, Topology};
pub use provisioner::{HandoffReceipt, ManifestProvisioner, PlanManifest, Provisioner};
pub use unit::{StackUnit, UnitConfig, UnitKind, UnitState};
