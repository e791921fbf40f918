//! Hand-off of a deployment plan to the provisioning backend.

use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;
use uuid::Uuid;

use config_manager::SynthesizerIdentity;

use crate::errors::{LaunchError, LaunchResult};
use crate::naming::normalize;
use crate::orchestrator::{DeploymentPlan, StackDescriptor};
use crate::unit::{StackUnit, UnitKind};

#[cfg(test)]
#[path = "provisioner_tests.rs"]
mod tests;

/// Receives fully declared plans.
///
/// Implementations perform (or record) the physical provisioning. The plan
/// passed in is always complete; provisioners never see a partial graph.
pub trait Provisioner {
    fn provision(
        &self,
        plan: &DeploymentPlan,
        identity: &SynthesizerIdentity,
    ) -> LaunchResult<HandoffReceipt>;
}

/// Acknowledgement returned by a provisioner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HandoffReceipt {
    pub launch_id: Uuid,
    /// Where the provisioner recorded the plan.
    pub location: String,
    pub unit_count: usize,
}

/// The document a [`ManifestProvisioner`] writes.
#[derive(Debug, Clone, Serialize)]
pub struct PlanManifest<'a> {
    pub launch_id: Uuid,
    pub generated_at: DateTime<Utc>,
    pub stack: &'a StackDescriptor,
    pub synthesizer: &'a SynthesizerIdentity,
    pub units: &'a [StackUnit],
    pub waves: Vec<Vec<UnitKind>>,
}

/// Writes the plan to `<directory>/<stack>.plan.json` for an external
/// deployment tool to pick up.
#[derive(Debug, Clone)]
pub struct ManifestProvisioner {
    directory: PathBuf,
}

impl ManifestProvisioner {
    pub fn new(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: directory.into(),
        }
    }

    pub fn directory(&self) -> &Path {
        &self.directory
    }

    /// `<directory>/<stack>.plan.json`, with the stack name normalized so the
    /// manifest always lands directly inside the output directory.
    pub fn manifest_path(&self, plan: &DeploymentPlan) -> PathBuf {
        let stem = match normalize(&plan.stack().name) {
            stem if stem.is_empty() => "stack".to_string(),
            stem => stem,
        };
        self.directory.join(format!("{}.plan.json", stem))
    }
}

impl Provisioner for ManifestProvisioner {
    fn provision(
        &self,
        plan: &DeploymentPlan,
        identity: &SynthesizerIdentity,
    ) -> LaunchResult<HandoffReceipt> {
        let manifest = PlanManifest {
            launch_id: Uuid::new_v4(),
            generated_at: Utc::now(),
            stack: plan.stack(),
            synthesizer: identity,
            units: plan.units(),
            waves: plan.waves()?,
        };

        let document =
            serde_json::to_string_pretty(&manifest).map_err(|e| LaunchError::Serialization {
                reason: e.to_string(),
            })?;

        let path = self.manifest_path(plan);
        fs::create_dir_all(&self.directory).map_err(|source| LaunchError::ManifestWrite {
            path: self.directory.display().to_string(),
            source,
        })?;
        fs::write(&path, document).map_err(|source| LaunchError::ManifestWrite {
            path: path.display().to_string(),
            source,
        })?;

        info!(
            "Wrote plan for stack '{}' with {} units to {}",
            plan.stack().name,
            plan.units().len(),
            path.display()
        );

        Ok(HandoffReceipt {
            launch_id: manifest.launch_id,
            location: path.display().to_string(),
            unit_count: plan.units().len(),
        })
    }
}
