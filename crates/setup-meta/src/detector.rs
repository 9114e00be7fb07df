//! Tool detection.
//!
//! Probes are read-only existence checks: a binary on the search path or a
//! well-known directory under the home directory. Missing evidence is not an
//! error; the target is just reported as not installed.

use std::path::PathBuf;

use serde::ser::{Serialize, SerializeStruct, Serializer};

use crate::environment::Environment;
use crate::registry::TargetRegistry;
use crate::target::{Evidence, TargetDescriptor};

/// A target paired with the outcome of probing for it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DetectedTarget {
    pub descriptor: TargetDescriptor,
    pub installed: bool,
    /// The first path that proved the target is installed.
    pub evidence_path: Option<PathBuf>,
}

impl DetectedTarget {
    pub fn id(&self) -> &'static str {
        self.descriptor.id
    }
}

impl Serialize for DetectedTarget {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let scopes: Vec<&str> = self
            .descriptor
            .scopes
            .iter()
            .map(|sp| sp.scope.as_str())
            .collect();
        let mut state = serializer.serialize_struct("DetectedTarget", 5)?;
        state.serialize_field("id", self.descriptor.id)?;
        state.serialize_field("display_name", self.descriptor.display_name)?;
        state.serialize_field("scopes", &scopes)?;
        state.serialize_field("installed", &self.installed)?;
        state.serialize_field("evidence_path", &self.evidence_path)?;
        state.end()
    }
}

/// Probe the environment for every target in the registry.
///
/// Returns one entry per registry target, in registry order. Meant to run
/// once per session; the result is a point-in-time snapshot.
pub fn detect_installed_targets(
    registry: &TargetRegistry,
    env: &Environment,
) -> Vec<DetectedTarget> {
    registry
        .list_targets()
        .iter()
        .map(|target| {
            let evidence_path = find_evidence(target, env);
            tracing::debug!(
                target_id = target.id,
                installed = evidence_path.is_some(),
                evidence = ?evidence_path,
                "Probed target"
            );
            DetectedTarget {
                descriptor: target.clone(),
                installed: evidence_path.is_some(),
                evidence_path,
            }
        })
        .collect()
}

fn find_evidence(target: &TargetDescriptor, env: &Environment) -> Option<PathBuf> {
    target.evidence.iter().find_map(|evidence| match evidence {
        Evidence::Binary(name) => env.find_binary(name),
        Evidence::HomeDir(home_path) => {
            let path = home_path.resolve(env.home()?);
            path.exists().then_some(path)
        }
    })
}
