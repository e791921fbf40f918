//! The launch pipeline.
//!
//! ```text
//! RawContext -> substitutions -> rendered documents -> Release + identity
//!            -> DeploymentPlan -> Provisioner
//! ```
//!
//! Every configuration error surfaces before the orchestrator runs, and the
//! provisioner only ever receives a complete plan.

use tracing::{info, instrument};

use config_manager::{
    custom_synthesizer_requested, release_substitutions, resolve_release, resolve_synthesizer,
    synthesizer_substitutions, ClusterReleaseConf, RawContext, Release, SynthesizerIdentity,
};
use template_engine::TemplateRenderer;

use crate::errors::LaunchResult;
use crate::orchestrator::{DeploymentPlan, PlanOptions, StackOrchestrator};
use crate::provisioner::{HandoffReceipt, Provisioner};

#[cfg(test)]
#[path = "launch_tests.rs"]
mod tests;

/// Default name of the release configuration template.
pub const RELEASE_TEMPLATE: &str = "conf.yaml.hbs";

/// Default name of the synthesizer identity template.
pub const SYNTHESIZER_TEMPLATE: &str = "synthesizer.yaml.hbs";

/// Names of the two template assets a launch renders.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateNames {
    pub release: String,
    pub synthesizer: String,
}

impl Default for TemplateNames {
    fn default() -> Self {
        Self {
            release: RELEASE_TEMPLATE.to_string(),
            synthesizer: SYNTHESIZER_TEMPLATE.to_string(),
        }
    }
}

/// Resolved configuration of one launch.
#[derive(Debug, Clone)]
pub struct ResolvedLaunch {
    pub release: Release<ClusterReleaseConf>,
    pub identity: SynthesizerIdentity,
}

/// Resolved configuration together with its declared plan.
#[derive(Debug, Clone)]
pub struct LaunchPlan {
    pub release: Release<ClusterReleaseConf>,
    pub identity: SynthesizerIdentity,
    pub plan: DeploymentPlan,
}

#[derive(Clone)]
pub struct Launcher {
    renderer: TemplateRenderer,
    templates: TemplateNames,
    orchestrator: StackOrchestrator,
}

impl Launcher {
    pub fn new(renderer: TemplateRenderer, options: PlanOptions) -> Self {
        Self {
            renderer,
            templates: TemplateNames::default(),
            orchestrator: StackOrchestrator::new(options),
        }
    }

    pub fn with_templates(mut self, templates: TemplateNames) -> Self {
        self.templates = templates;
        self
    }

    pub fn templates(&self) -> &TemplateNames {
        &self.templates
    }

    pub fn options(&self) -> &PlanOptions {
        self.orchestrator.options()
    }

    /// Renders the release template without decoding it.
    pub fn render_release(&self, context: &RawContext) -> LaunchResult<String> {
        let substitutions = release_substitutions(context)?;
        Ok(self
            .renderer
            .render(&self.templates.release, &substitutions)?)
    }

    /// Renders the synthesizer template without decoding it.
    pub fn render_synthesizer(&self, context: &RawContext) -> LaunchResult<String> {
        let substitutions = synthesizer_substitutions(context)?;
        Ok(self
            .renderer
            .render(&self.templates.synthesizer, &substitutions)?)
    }

    /// Resolves the release configuration and the synthesizer identity.
    ///
    /// The synthesizer template is only rendered when the context requests
    /// a custom identity.
    #[instrument(skip(self, context))]
    pub fn resolve(&self, context: &RawContext) -> LaunchResult<ResolvedLaunch> {
        let document = self.render_release(context)?;
        let release: Release<ClusterReleaseConf> = resolve_release(&document)?;

        let identity = if custom_synthesizer_requested(context) {
            let document = self.render_synthesizer(context)?;
            resolve_synthesizer(&document)?
        } else {
            SynthesizerIdentity::Default
        };

        Ok(ResolvedLaunch { release, identity })
    }

    /// Resolves the configuration and declares the unit graph.
    #[instrument(skip(self, context))]
    pub fn plan(&self, context: &RawContext) -> LaunchResult<LaunchPlan> {
        let ResolvedLaunch { release, identity } = self.resolve(context)?;
        let plan = self.orchestrator.plan(&release)?;

        Ok(LaunchPlan {
            release,
            identity,
            plan,
        })
    }

    /// Plans the launch and hands the plan to `provisioner`.
    #[instrument(skip(self, context, provisioner))]
    pub fn launch(
        &self,
        context: &RawContext,
        provisioner: &dyn Provisioner,
    ) -> LaunchResult<HandoffReceipt> {
        let launch = self.plan(context)?;
        let receipt = provisioner.provision(&launch.plan, &launch.identity)?;

        info!(
            "Launch {} handed off {} units of stack '{}'",
            receipt.launch_id,
            receipt.unit_count,
            launch.plan.stack().name
        );
        Ok(receipt)
    }
}
