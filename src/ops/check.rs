//! Whole-file validation.

use crate::core::{RulesFile, TargetRef};
use crate::ops::resolve::resolve_all;
use crate::resolver::ResolveError;
use crate::rules::ManifestDescription;

/// Result of checking a rules file.
#[derive(Debug, Default)]
pub struct CheckReport {
    /// Number of rules in the graph
    pub rules: usize,

    /// Manifest targets that resolved cleanly, sorted
    pub resolved: Vec<TargetRef>,

    /// Manifest targets that failed, sorted
    pub failures: Vec<(TargetRef, ResolveError)>,
}

impl CheckReport {
    pub fn is_ok(&self) -> bool {
        self.failures.is_empty()
    }
}

/// Verify the graph is acyclic, then resolve every manifest target.
///
/// A cycle fails the whole check; per-target errors are collected.
pub fn check(
    rules: &RulesFile,
    description: &ManifestDescription,
) -> Result<CheckReport, ResolveError> {
    rules.graph().check_acyclic()?;

    let mut report = CheckReport {
        rules: rules.graph().len(),
        ..CheckReport::default()
    };

    for (target, result) in resolve_all(rules, description) {
        match result {
            Ok(_) => report.resolved.push(target),
            Err(e) => report.failures.push((target, e)),
        }
    }

    Ok(report)
}
