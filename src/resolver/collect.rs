//! Transitive collection of manifest fragments and resource directories.
//!
//! The result is keyed and ordered by path string, never by the order in
//! which the walk happened to visit nodes, so the same graph always produces
//! the same bytes.

use std::collections::{BTreeSet, HashSet};

use serde::{Deserialize, Serialize};

use crate::core::{DependencyNode, GraphView, SourcePath};
use crate::resolver::ResolveError;

/// Distinct manifest fragment paths, enumerated in lexicographic order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ManifestFragmentSet(BTreeSet<SourcePath>);

impl ManifestFragmentSet {
    /// Add a fragment. Returns false if it was already present.
    pub fn insert(&mut self, path: SourcePath) -> bool {
        self.0.insert(path)
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Fragments in lexicographic order.
    pub fn iter(&self) -> impl Iterator<Item = &SourcePath> {
        self.0.iter()
    }
}

impl FromIterator<SourcePath> for ManifestFragmentSet {
    fn from_iter<I: IntoIterator<Item = SourcePath>>(iter: I) -> Self {
        ManifestFragmentSet(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a ManifestFragmentSet {
    type Item = &'a SourcePath;
    type IntoIter = std::collections::btree_set::Iter<'a, SourcePath>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Everything the transitive closure of a set of resource rules contributes.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitiveResources {
    /// Manifest fragments
    pub manifests: ManifestFragmentSet,

    /// Resource directories, sorted
    pub res_dirs: BTreeSet<SourcePath>,
}

/// Walk the closure of `nodes` and gather manifests and resource directories.
///
/// Each input node is part of its own closure. Every reachable node is
/// visited once, which bounds the walk on diamonds and on cycles alike.
pub fn collect_transitive_resources<'g, G: GraphView>(
    graph: &'g G,
    nodes: &[&'g DependencyNode],
) -> Result<TransitiveResources, ResolveError> {
    let mut resources = TransitiveResources::default();
    let mut visited = HashSet::new();
    let mut stack: Vec<&'g DependencyNode> = nodes.to_vec();

    while let Some(node) = stack.pop() {
        if !visited.insert(node.target().clone()) {
            continue;
        }

        if let Some(manifest) = node.manifest_fragment() {
            resources.manifests.insert(manifest.clone());
        }
        if let Some(res) = node.res_dir() {
            resources.res_dirs.insert(res.clone());
        }

        for dep in node.deps() {
            if !visited.contains(dep) {
                stack.push(graph.edge_target(node.target(), dep)?);
            }
        }
    }

    tracing::trace!(
        visited = visited.len(),
        manifests = resources.manifests.len(),
        res_dirs = resources.res_dirs.len(),
        "collected transitive resources"
    );

    Ok(resources)
}

/// Walk the closure of `nodes` and gather their manifest fragments.
pub fn collect_manifest_fragments<'g, G: GraphView>(
    graph: &'g G,
    nodes: &[&'g DependencyNode],
) -> Result<ManifestFragmentSet, ResolveError> {
    Ok(collect_transitive_resources(graph, nodes)?.manifests)
}
