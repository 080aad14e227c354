//! Rules.toml loading.
//!
//! A rules file declares every rule instance of a project as a `[[rule]]`
//! table. Loading turns it into a [`TargetGraph`] plus the configuration of
//! each `android_manifest` rule.

use std::collections::{BTreeMap, HashSet};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::core::{
    DependencyNode, ResourceCapability, RuleType, SourcePath, TargetGraph, TargetRef,
};
use crate::rules::ManifestArg;

/// Name of the rules file.
pub const RULES_FILE_NAME: &str = "Rules.toml";

#[derive(Debug, Deserialize)]
struct RawRulesFile {
    #[serde(default, rename = "rule")]
    rules: Vec<RawRule>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
struct RawRule {
    #[serde(rename = "type")]
    rule_type: RuleType,

    name: TargetRef,

    #[serde(default)]
    deps: Option<Vec<TargetRef>>,

    #[serde(default)]
    manifest: Option<SourcePath>,

    #[serde(default)]
    res: Option<SourcePath>,

    #[serde(default)]
    skeleton: Option<SourcePath>,
}

/// A loaded rules file.
#[derive(Debug)]
pub struct RulesFile {
    path: PathBuf,
    graph: TargetGraph,
    manifests: BTreeMap<TargetRef, ManifestArg>,
}

impl RulesFile {
    /// Load and validate a rules file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read rules file: {}", path.display()))?;

        Self::parse(&contents, path)
    }

    /// Parse rules file contents. `path` is used for error messages.
    pub fn parse(contents: &str, path: &Path) -> Result<Self> {
        let raw: RawRulesFile = toml::from_str(contents)
            .with_context(|| format!("failed to parse rules file: {}", path.display()))?;

        let mut builder = TargetGraph::builder();
        let mut manifests = BTreeMap::new();

        // Manifest deps are checked when the manifest is resolved, so only
        // their declared targets become graph edges.
        let declared: HashSet<TargetRef> = raw.rules.iter().map(|r| r.name.clone()).collect();

        for rule in raw.rules {
            let mut deps = rule.deps.clone().unwrap_or_default();

            if rule.rule_type == RuleType::ANDROID_MANIFEST {
                manifests.insert(
                    rule.name.clone(),
                    ManifestArg {
                        skeleton: rule.skeleton.clone(),
                        deps: rule.deps,
                    },
                );
                deps.retain(|dep| declared.contains(dep));
            } else if rule.skeleton.is_some() {
                tracing::warn!(
                    "ignoring `skeleton` on `{}`: only `android_manifest` rules take one",
                    rule.name
                );
            }

            let resources = ResourceCapability {
                manifest: rule.manifest,
                res: rule.res,
            };

            builder.add(
                DependencyNode::new(rule.name, rule.rule_type)
                    .with_deps(deps)
                    .with_resources(resources),
            );
        }

        let graph = builder
            .build()
            .with_context(|| format!("invalid target graph in {}", path.display()))?;

        tracing::debug!(
            "loaded {} rules ({} manifest rules) from {}",
            graph.len(),
            manifests.len(),
            path.display()
        );

        Ok(RulesFile {
            path: path.to_path_buf(),
            graph,
            manifests,
        })
    }

    /// Path this file was loaded from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// The target graph of every declared rule.
    pub fn graph(&self) -> &TargetGraph {
        &self.graph
    }

    /// Configuration of every `android_manifest` rule, sorted by target.
    pub fn manifests(&self) -> &BTreeMap<TargetRef, ManifestArg> {
        &self.manifests
    }

    /// Configuration of one `android_manifest` rule.
    pub fn manifest(&self, target: &TargetRef) -> Option<&ManifestArg> {
        self.manifests.get(target)
    }
}

/// Find the rules file in a directory.
pub fn find_rules_file(dir: &Path) -> Option<PathBuf> {
    let path = dir.join(RULES_FILE_NAME);
    path.is_file().then_some(path)
}
