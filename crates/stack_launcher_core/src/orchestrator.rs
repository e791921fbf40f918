//! Turns a resolved release into a deployment plan.
//!
//! The plan always has the same shape:
//!
//! ```text
//! network <- cluster <- addons
//!                    <- observability-addons
//!                    <- observability
//! ```
//!
//! Add-on units depend on the cluster only and never on each other, so a
//! failed add-on unit neither blocks nor rolls back its siblings and can be
//! retried on its own.

use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};
use std::fmt;
use tracing::{debug, info, instrument};

use config_manager::{AddonsConf, ClusterReleaseConf, Release};

use crate::errors::{LaunchError, LaunchResult};
use crate::graph::StackGraph;
use crate::naming::{stack_description, stack_name, unit_description, unit_id};
use crate::unit::{StackUnit, UnitConfig, UnitKind, UnitState};

#[cfg(test)]
#[path = "orchestrator_tests.rs"]
mod tests;

/// Which units a plan declares.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Topology {
    /// Network, cluster, every enabled add-on unit and observability.
    #[default]
    Full,
    /// Network, cluster and observability only.
    Reduced,
}

impl fmt::Display for Topology {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Full => write!(f, "full"),
            Self::Reduced => write!(f, "reduced"),
        }
    }
}

impl std::str::FromStr for Topology {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "full" => Ok(Self::Full),
            "reduced" => Ok(Self::Reduced),
            _ => Err(format!("Invalid topology: {s}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlanOptions {
    pub topology: Topology,
    /// Appended to the release id to name the outer stack.
    pub stack_suffix: String,
}

impl Default for PlanOptions {
    fn default() -> Self {
        Self {
            topology: Topology::Full,
            stack_suffix: "eks".to_string(),
        }
    }
}

/// The outer stack that holds every unit.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StackDescriptor {
    pub name: String,
    pub account: String,
    pub region: String,
    pub description: String,
    pub tags: BTreeMap<String, String>,
}

/// A fully declared unit graph, ready to be handed to a provisioner.
#[derive(Debug, Clone)]
pub struct DeploymentPlan {
    stack: StackDescriptor,
    units: Vec<StackUnit>,
    graph: StackGraph,
}

impl DeploymentPlan {
    pub fn stack(&self) -> &StackDescriptor {
        &self.stack
    }

    /// Units in declaration order.
    pub fn units(&self) -> &[StackUnit] {
        &self.units
    }

    pub fn unit(&self, kind: UnitKind) -> Option<&StackUnit> {
        self.units.iter().find(|u| u.kind == kind)
    }

    pub fn kinds(&self) -> Vec<UnitKind> {
        self.units.iter().map(|u| u.kind).collect()
    }

    pub fn graph(&self) -> &StackGraph {
        &self.graph
    }

    /// Units ordered so every unit follows its dependencies.
    pub fn provisioning_order(&self) -> LaunchResult<Vec<&StackUnit>> {
        self.graph
            .topological_order()?
            .into_iter()
            .map(|kind| self.unit(kind).ok_or(LaunchError::UnknownUnit { unit: kind }))
            .collect()
    }

    pub fn waves(&self) -> LaunchResult<Vec<Vec<UnitKind>>> {
        self.graph.waves()
    }

    /// Units that cannot proceed while `kind` has not been provisioned.
    pub fn blocked_by(&self, kind: UnitKind) -> BTreeSet<UnitKind> {
        self.graph.blocked_by(kind)
    }

    /// Units whose dependencies are all provisioned and that have not started.
    pub fn ready_units(&self) -> Vec<UnitKind> {
        self.units
            .iter()
            .filter(|u| matches!(u.state(), UnitState::Declared | UnitState::DependentWait))
            .filter(|u| self.dependencies_provisioned(u.kind).is_ok())
            .map(|u| u.kind)
            .collect()
    }

    fn dependencies_provisioned(&self, kind: UnitKind) -> LaunchResult<()> {
        for dependency in self.graph.direct_dependencies(kind) {
            let state = self
                .unit(dependency)
                .map(StackUnit::state)
                .ok_or(LaunchError::UnknownUnit { unit: dependency })?;
            if state != UnitState::Provisioned {
                return Err(LaunchError::DependencyNotReady {
                    unit: kind,
                    dependency,
                });
            }
        }
        Ok(())
    }

    /// Moves a unit through its lifecycle.
    ///
    /// A unit may only enter `Provisioning` once every unit it depends on is
    /// provisioned.
    ///
    /// # Errors
    ///
    /// - `LaunchError::UnknownUnit` if the unit is not part of the plan
    /// - `LaunchError::DependencyNotReady` if a dependency is not provisioned
    /// - `LaunchError::InvalidTransition` if the lifecycle forbids the move
    pub fn transition(&mut self, kind: UnitKind, next: UnitState) -> LaunchResult<()> {
        if next == UnitState::Provisioning {
            self.dependencies_provisioned(kind)?;
        }

        let unit = self
            .units
            .iter_mut()
            .find(|u| u.kind == kind)
            .ok_or(LaunchError::UnknownUnit { unit: kind })?;
        unit.transition(next)?;

        debug!("Unit '{}' is now {}", kind, next);
        Ok(())
    }
}

/// Declares the unit graph of a cluster release.
#[derive(Debug, Clone, Default)]
pub struct StackOrchestrator {
    options: PlanOptions,
}

impl StackOrchestrator {
    pub fn new(options: PlanOptions) -> Self {
        Self { options }
    }

    pub fn options(&self) -> &PlanOptions {
        &self.options
    }

    /// Builds the deployment plan for `release`.
    ///
    /// Either the whole graph is declared or an error is returned; no
    /// partial plan escapes.
    #[instrument(skip(self, release), fields(release = %release.common.id, topology = %self.options.topology))]
    pub fn plan(&self, release: &Release<ClusterReleaseConf>) -> LaunchResult<DeploymentPlan> {
        let common = &release.common;
        let conf = &release.release;

        let stack = StackDescriptor {
            name: stack_name(common, &self.options.stack_suffix),
            account: common.account.clone(),
            region: common.region.clone(),
            description: stack_description(release.platform.as_ref(), common),
            tags: release.stack_tags(),
        };

        let mut declared: Vec<(UnitKind, UnitConfig)> = vec![
            (UnitKind::Network, UnitConfig::Network(conf.vpc.clone())),
            (UnitKind::Cluster, UnitConfig::Cluster(conf.eks.clone())),
        ];

        if self.options.topology == Topology::Full {
            for (kind, addons) in [
                (UnitKind::Addons, conf.addons.as_ref()),
                (UnitKind::ObservabilityAddons, conf.observability_addons.as_ref()),
            ] {
                if let Some(addons) = enabled(kind, addons) {
                    declared.push((kind, UnitConfig::Addons(addons.clone())));
                }
            }
        }

        declared.push((
            UnitKind::Observability,
            UnitConfig::Observability(conf.observability.clone().unwrap_or_default()),
        ));

        let mut graph = StackGraph::new();
        for (kind, _) in &declared {
            graph.add_unit(*kind)?;
        }
        for (kind, _) in &declared {
            if let Some(prerequisite) = prerequisite_of(*kind) {
                graph.add_dependency(*kind, prerequisite)?;
            }
        }
        graph.topological_order()?;

        let units: Vec<StackUnit> = declared
            .into_iter()
            .map(|(kind, config)| {
                StackUnit::new(
                    kind,
                    unit_id(common, kind),
                    unit_description(common, kind),
                    graph.direct_dependencies(kind),
                    config,
                )
            })
            .collect();

        for unit in &units {
            info!(
                "Declared unit '{}' ({}) depending on {:?}",
                unit.kind, unit.id, unit.depends_on
            );
        }

        Ok(DeploymentPlan {
            stack,
            units,
            graph,
        })
    }
}

/// The single unit each unit kind depends on.
fn prerequisite_of(kind: UnitKind) -> Option<UnitKind> {
    match kind {
        UnitKind::Network => None,
        UnitKind::Cluster => Some(UnitKind::Network),
        UnitKind::Addons | UnitKind::ObservabilityAddons | UnitKind::Observability => {
            Some(UnitKind::Cluster)
        }
    }
}

fn enabled(kind: UnitKind, addons: Option<&AddonsConf>) -> Option<&AddonsConf> {
    match addons {
        Some(conf) if conf.enabled => Some(conf),
        Some(_) => {
            info!("Unit '{}' is disabled, not declaring it", kind);
            None
        }
        None => {
            debug!("No configuration for unit '{}'", kind);
            None
        }
    }
}
