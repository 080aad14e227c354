//! The `android_manifest` rule.
//!
//! An `android_manifest` rule combines a skeleton manifest with the manifest
//! fragments of every resource rule in its dependency closure. This module
//! only decides *which* fragments take part; merging them is done later by
//! whatever consumes the [`ManifestArtifact`].

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::core::{DependencyNode, GraphView, RuleType, SourcePath, TargetRef};
use crate::resolver::{
    collect_transitive_resources, filter_resource_deps, ConfigurationError, ManifestFragmentSet,
    PassThroughPolicy, ResolveError,
};
use crate::rules::RuleDescription;
use crate::util::hash::Fingerprint;

/// Configuration of one `android_manifest` rule.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ManifestArg {
    /// Skeleton manifest the fragments are merged into
    #[serde(default)]
    pub skeleton: Option<SourcePath>,

    /// Dependencies whose resource rules contribute fragments
    #[serde(default)]
    pub deps: Option<Vec<TargetRef>>,
}

impl ManifestArg {
    /// Declared dependencies, empty if none were given.
    pub fn deps(&self) -> &[TargetRef] {
        self.deps.as_deref().unwrap_or_default()
    }
}

/// The manifest merge unit for one `android_manifest` rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManifestArtifact {
    target: TargetRef,
    skeleton: SourcePath,
    manifests: ManifestFragmentSet,
    resource_dirs: BTreeSet<SourcePath>,
}

/// Serialized form of a [`ManifestArtifact`].
#[derive(Debug, Serialize)]
pub struct ArtifactRecord<'a> {
    pub target: &'a TargetRef,
    pub rule_type: RuleType,
    pub skeleton: &'a SourcePath,
    pub manifests: &'a ManifestFragmentSet,
    pub resource_dirs: &'a BTreeSet<SourcePath>,
    pub output: String,
    pub fingerprint: String,
}

impl ManifestArtifact {
    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn skeleton(&self) -> &SourcePath {
        &self.skeleton
    }

    /// Manifest fragments to merge, in lexicographic order.
    pub fn manifests(&self) -> &ManifestFragmentSet {
        &self.manifests
    }

    /// Resource directories reachable from the same deps.
    pub fn resource_dirs(&self) -> &BTreeSet<SourcePath> {
        &self.resource_dirs
    }

    /// Where the merged manifest goes: `<gen_dir>/<base_path>/AndroidManifest__<name>__.xml`.
    pub fn output_path(&self, gen_dir: &Path) -> PathBuf {
        gen_dir
            .join(self.target.base_path())
            .join(format!("AndroidManifest__{}__.xml", self.target.short_name()))
    }

    /// Stable digest of every input to the merge.
    pub fn fingerprint(&self) -> String {
        let mut fp = Fingerprint::new();
        fp.update_str(RuleType::ANDROID_MANIFEST.as_str())
            .update_str(self.target.as_str())
            .update_str(self.skeleton.as_str())
            .update_str(&self.manifests.len().to_string())
            .update_strs(self.manifests.iter().map(|p| p.as_str()))
            .update_str(&self.resource_dirs.len().to_string())
            .update_strs(self.resource_dirs.iter().map(|p| p.as_str()));
        fp.finish()
    }

    pub fn to_record(&self, gen_dir: &Path) -> ArtifactRecord<'_> {
        ArtifactRecord {
            target: &self.target,
            rule_type: RuleType::ANDROID_MANIFEST,
            skeleton: &self.skeleton,
            manifests: &self.manifests,
            resource_dirs: &self.resource_dirs,
            output: self.output_path(gen_dir).display().to_string(),
            fingerprint: self.fingerprint(),
        }
    }
}

/// Resolve the merge unit of one `android_manifest` rule.
///
/// Fails before walking anything if the skeleton is missing or a declared
/// dependency is not in the graph.
pub fn build_manifest_artifact<G: GraphView>(
    graph: &G,
    policy: &PassThroughPolicy,
    target: &TargetRef,
    skeleton: Option<&SourcePath>,
    deps: &[TargetRef],
) -> Result<ManifestArtifact, ResolveError> {
    let skeleton = skeleton.ok_or_else(|| ConfigurationError::MissingSkeleton {
        target: target.clone(),
    })?;

    let dep_nodes = deps
        .iter()
        .map(|dep| {
            graph
                .node(dep)
                .ok_or_else(|| ConfigurationError::UnresolvedDependency {
                    target: target.clone(),
                    dependency: dep.clone(),
                })
        })
        .collect::<Result<Vec<&DependencyNode>, _>>()?;

    let resource_deps = filter_resource_deps(graph, policy, &dep_nodes)?;
    let resources = collect_transitive_resources(graph, &resource_deps)?;

    tracing::debug!(
        "resolved `{}`: {} resource deps, {} manifest fragments",
        target,
        resource_deps.len(),
        resources.manifests.len()
    );

    Ok(ManifestArtifact {
        target: target.clone(),
        skeleton: skeleton.clone(),
        manifests: resources.manifests,
        resource_dirs: resources.res_dirs,
    })
}

/// Description of the `android_manifest` rule type.
#[derive(Debug, Clone, Default)]
pub struct ManifestDescription {
    policy: PassThroughPolicy,
}

impl ManifestDescription {
    pub fn new(policy: PassThroughPolicy) -> Self {
        ManifestDescription { policy }
    }

    pub fn policy(&self) -> &PassThroughPolicy {
        &self.policy
    }
}

impl RuleDescription for ManifestDescription {
    type Arg = ManifestArg;
    type Buildable = ManifestArtifact;

    fn rule_type(&self) -> RuleType {
        RuleType::ANDROID_MANIFEST
    }

    fn create_buildable<G: GraphView>(
        &self,
        target: &TargetRef,
        arg: &ManifestArg,
        graph: &G,
    ) -> Result<ManifestArtifact, ResolveError> {
        build_manifest_artifact(graph, &self.policy, target, arg.skeleton.as_ref(), arg.deps())
    }
}
