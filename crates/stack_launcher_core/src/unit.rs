//! Stack units and their lifecycle.

use serde::{Deserialize, Serialize};
use std::fmt;

use config_manager::{AddonsConf, KubernetesConf, NetworkConf, ObservabilityConf};

use crate::errors::{LaunchError, LaunchResult};

#[cfg(test)]
#[path = "unit_tests.rs"]
mod tests;

/// The named infrastructure units a release is split into.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(rename_all = "kebab-case")]
pub enum UnitKind {
    Network,
    Cluster,
    /// Core cluster add-ons.
    Addons,
    /// Add-ons that ship metrics and logs.
    ObservabilityAddons,
    /// Alarms and dashboards.
    Observability,
}

impl UnitKind {
    pub const ALL: [UnitKind; 5] = [
        Self::Network,
        Self::Cluster,
        Self::Addons,
        Self::ObservabilityAddons,
        Self::Observability,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Self::Network => "network",
            Self::Cluster => "cluster",
            Self::Addons => "addons",
            Self::ObservabilityAddons => "observability-addons",
            Self::Observability => "observability",
        }
    }

    /// Add-on units are siblings that only depend on the cluster.
    pub fn is_addon(&self) -> bool {
        matches!(self, Self::Addons | Self::ObservabilityAddons)
    }
}

impl fmt::Display for UnitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for UnitKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.name() == s)
            .ok_or_else(|| format!("Invalid stack unit: {s}"))
    }
}

/// Lifecycle of a stack unit.
///
/// The orchestrator declares units; every later transition is driven by the
/// provisioner.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UnitState {
    #[default]
    Declared,
    /// Waiting for a prerequisite unit to be provisioned.
    DependentWait,
    Provisioning,
    Provisioned,
    /// Provisioning failed; the unit may be retried on its own.
    Failed,
}

impl UnitState {
    /// Check if this is a terminal state (no further transitions allowed)
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Provisioned)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Self::Failed)
    }

    pub fn can_transition_to(&self, next: UnitState) -> bool {
        matches!(
            (self, next),
            (Self::Declared, Self::DependentWait)
                | (Self::Declared, Self::Provisioning)
                | (Self::DependentWait, Self::Provisioning)
                | (Self::Provisioning, Self::Provisioned)
                | (Self::Provisioning, Self::Failed)
                | (Self::Failed, Self::Provisioning)
        )
    }
}

impl fmt::Display for UnitState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Declared => write!(f, "declared"),
            Self::DependentWait => write!(f, "dependent_wait"),
            Self::Provisioning => write!(f, "provisioning"),
            Self::Provisioned => write!(f, "provisioned"),
            Self::Failed => write!(f, "failed"),
        }
    }
}

/// Typed configuration handed to the provisioner for one unit.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", content = "spec", rename_all = "snake_case")]
pub enum UnitConfig {
    Network(NetworkConf),
    Cluster(KubernetesConf),
    Addons(AddonsConf),
    Observability(ObservabilityConf),
}

/// A named node of the deployment plan.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackUnit {
    pub kind: UnitKind,
    /// Stable identifier, identical across launches of the same release version.
    pub id: String,
    pub description: String,
    pub depends_on: Vec<UnitKind>,
    pub config: UnitConfig,
    state: UnitState,
}

impl StackUnit {
    pub fn new(
        kind: UnitKind,
        id: impl Into<String>,
        description: impl Into<String>,
        depends_on: Vec<UnitKind>,
        config: UnitConfig,
    ) -> Self {
        Self {
            kind,
            id: id.into(),
            description: description.into(),
            depends_on,
            config,
            state: UnitState::Declared,
        }
    }

    pub fn name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn state(&self) -> UnitState {
        self.state
    }

    /// Moves the unit to `next`.
    ///
    /// # Errors
    ///
    /// Returns `LaunchError::InvalidTransition` for moves the lifecycle does
    /// not allow.
    pub fn transition(&mut self, next: UnitState) -> LaunchResult<()> {
        if !self.state.can_transition_to(next) {
            return Err(LaunchError::InvalidTransition {
                unit: self.kind,
                from: self.state,
                to: next,
            });
        }
        self.state = next;
        Ok(())
    }
}
