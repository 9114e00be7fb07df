//! Sequential multi-target installation.
//!
//! Targets are processed one after another in selection order. Each target's
//! file is its own unit of consistency: there is no cross-target transaction,
//! and a failure on one target never prevents the next from being attempted.

use serde::Serialize;
use setup_meta::{Scope, TargetDescriptor};

use crate::credentials::Credentials;
use crate::inject::{InjectionResult, Installer};

/// Inject into every target in `targets`, returning one result per target in
/// input order.
pub fn run_batch(
    installer: &Installer,
    targets: &[TargetDescriptor],
    scope: Scope,
    credentials: &Credentials,
) -> Vec<InjectionResult> {
    tracing::info!(count = targets.len(), %scope, "Starting batch");
    let results: Vec<InjectionResult> = targets
        .iter()
        .map(|target| installer.inject(target, scope, credentials))
        .collect();

    let summary = BatchSummary::from_results(&results);
    tracing::info!(
        succeeded = summary.succeeded,
        failed = summary.failed,
        "Batch finished"
    );
    results
}

/// Success and failure counts for a batch.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct BatchSummary {
    pub succeeded: usize,
    pub failed: usize,
}

impl BatchSummary {
    pub fn from_results(results: &[InjectionResult]) -> Self {
        let succeeded = results.iter().filter(|r| r.success).count();
        Self {
            succeeded,
            failed: results.len() - succeeded,
        }
    }

    pub fn total(&self) -> usize {
        self.succeeded + self.failed
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed == 0
    }
}
