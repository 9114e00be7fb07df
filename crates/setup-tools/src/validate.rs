//! Pre-flight validation of a target selection.
//!
//! Pure with respect to the file system: the only work done is path
//! resolution through the registry. Unsupported targets are reported, never
//! dropped, so the user can decide whether to deselect them or switch scope.

use std::path::PathBuf;

use serde::Serialize;
use setup_meta::{Environment, Scope, TargetDescriptor, resolve_for};

/// Validation outcome for one (target, scope) pair.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    pub target_id: String,
    pub scope: Scope,
    pub scope_supported: bool,
    /// Config path the batch would write, when resolvable.
    pub path: Option<PathBuf>,
    /// Why the target will be skipped or flagged.
    pub reason: Option<String>,
}

impl ValidationResult {
    /// The batch is expected to succeed in reaching this target's file.
    pub fn is_eligible(&self) -> bool {
        self.scope_supported && self.path.is_some()
    }
}

/// Validate every target in `targets` against `scope`, preserving order.
pub fn validate(
    targets: &[TargetDescriptor],
    scope: Scope,
    env: &Environment,
) -> Vec<ValidationResult> {
    targets
        .iter()
        .map(|target| validate_one(target, scope, env))
        .collect()
}

fn validate_one(target: &TargetDescriptor, scope: Scope, env: &Environment) -> ValidationResult {
    let mut result = ValidationResult {
        target_id: target.id.to_string(),
        scope,
        scope_supported: target.supports(scope),
        path: None,
        reason: None,
    };

    if !result.scope_supported {
        let supported: Vec<&str> = target.scopes.iter().map(|sp| sp.scope.as_str()).collect();
        result.reason = Some(format!(
            "{} does not support {scope} scope (supported: {})",
            target.display_name,
            supported.join(", ")
        ));
        return result;
    }

    match resolve_for(target, scope, env) {
        Ok(location) => result.path = Some(location.path),
        Err(e) => result.reason = Some(e.to_string()),
    }

    if result.reason.is_some() {
        tracing::debug!(target_id = target.id, %scope, reason = ?result.reason, "Target flagged");
    }
    result
}
