//! Manifest target resolution operations.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use rayon::prelude::*;

use crate::core::{DependencyNode, GraphView, RuleType, RulesFile, TargetRef};
use crate::resolver::{filter_resource_deps, ConfigurationError, PassThroughPolicy, ResolveError};
use crate::rules::{ManifestArtifact, ManifestDescription, RuleDescription};
use crate::util::fs::write_if_changed;

/// Resolve the merge unit of one `android_manifest` target.
pub fn resolve_target(
    rules: &RulesFile,
    description: &ManifestDescription,
    target: &TargetRef,
) -> Result<ManifestArtifact, ResolveError> {
    let node = rules
        .graph()
        .node(target)
        .ok_or_else(|| ConfigurationError::UnknownTarget {
            target: target.clone(),
        })?;

    let arg = rules
        .manifest(target)
        .ok_or_else(|| ConfigurationError::NotAManifestRule {
            target: target.clone(),
            rule_type: node.rule_type().clone(),
        })?;

    description.create_buildable(target, arg, rules.graph())
}

/// Resolve every `android_manifest` target in parallel.
///
/// Results come back sorted by target regardless of scheduling.
pub fn resolve_all(
    rules: &RulesFile,
    description: &ManifestDescription,
) -> Vec<(TargetRef, Result<ManifestArtifact, ResolveError>)> {
    let targets: Vec<&TargetRef> = rules.manifests().keys().collect();

    tracing::debug!("resolving {} manifest targets", targets.len());

    targets
        .par_iter()
        .map(|&target| (target.clone(), resolve_target(rules, description, target)))
        .collect()
}

/// The resource-bearing rules among a target's direct dependencies.
pub fn resource_deps<'r>(
    rules: &'r RulesFile,
    policy: &PassThroughPolicy,
    target: &TargetRef,
) -> Result<Vec<&'r DependencyNode>, ResolveError> {
    let graph = rules.graph();
    let node = graph
        .node(target)
        .ok_or_else(|| ConfigurationError::UnknownTarget {
            target: target.clone(),
        })?;

    let direct = node
        .deps()
        .iter()
        .map(|dep| graph.edge_target(target, dep))
        .collect::<Result<Vec<_>, _>>()?;

    filter_resource_deps(graph, policy, &direct)
}

/// Outcome of writing artifact definitions.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct WriteSummary {
    /// Files created or updated
    pub written: Vec<PathBuf>,

    /// Files already up to date
    pub unchanged: Vec<PathBuf>,
}

/// Where the definition of `target` is written under `out_dir`.
pub fn definition_path(out_dir: &Path, target: &TargetRef) -> PathBuf {
    out_dir
        .join(target.base_path())
        .join(format!("{}.manifest.json", target.short_name()))
}

/// Write one JSON definition per artifact under `out_dir`.
///
/// Unchanged definitions are left alone so their mtimes stay put.
pub fn write_artifacts(
    artifacts: &[ManifestArtifact],
    out_dir: &Path,
    gen_dir: &Path,
) -> Result<WriteSummary> {
    let mut summary = WriteSummary::default();

    for artifact in artifacts {
        let path = definition_path(out_dir, artifact.target());
        let mut json = serde_json::to_string_pretty(&artifact.to_record(gen_dir))
            .with_context(|| format!("failed to serialize `{}`", artifact.target()))?;
        json.push('\n');

        if write_if_changed(&path, json.as_bytes())? {
            tracing::debug!("wrote {}", path.display());
            summary.written.push(path);
        } else {
            tracing::trace!("up to date: {}", path.display());
            summary.unchanged.push(path);
        }
    }

    Ok(summary)
}

/// Whether a target is an `android_manifest` rule.
pub fn is_manifest_target(rules: &RulesFile, target: &TargetRef) -> bool {
    rules
        .graph()
        .node(target)
        .is_some_and(|n| n.rule_type() == &RuleType::ANDROID_MANIFEST)
}
