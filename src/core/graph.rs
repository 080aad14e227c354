//! TargetGraph - the immutable graph of rule instances.
//!
//! Once built, a TargetGraph is read-only and can be shared between threads
//! resolving different targets at the same time.

use std::collections::{BTreeMap, HashMap};

use petgraph::algo::toposort;
use petgraph::graph::{DiGraph, NodeIndex};
use petgraph::Direction;

use crate::core::{DependencyNode, TargetRef};
use crate::resolver::GraphIntegrityError;

/// Read-only access to the nodes of a target graph.
///
/// Resolution only ever looks nodes up through this trait, so any graph
/// that can answer "which node is this target?" can be resolved against.
pub trait GraphView: Sync {
    /// Look up the node for a target.
    fn node(&self, target: &TargetRef) -> Option<&DependencyNode>;

    /// Look up the node at the other end of an edge `from -> to`.
    fn edge_target(
        &self,
        from: &TargetRef,
        to: &TargetRef,
    ) -> Result<&DependencyNode, GraphIntegrityError> {
        self.node(to).ok_or_else(|| GraphIntegrityError::DanglingEdge {
            from: from.clone(),
            to: to.clone(),
        })
    }
}

impl GraphView for HashMap<TargetRef, DependencyNode> {
    fn node(&self, target: &TargetRef) -> Option<&DependencyNode> {
        self.get(target)
    }
}

impl GraphView for BTreeMap<TargetRef, DependencyNode> {
    fn node(&self, target: &TargetRef) -> Option<&DependencyNode> {
        self.get(target)
    }
}

/// The target graph.
///
/// Edges point from a rule to the rules it depends on.
#[derive(Debug, Clone, Default)]
pub struct TargetGraph {
    graph: DiGraph<DependencyNode, ()>,

    /// Map from TargetRef to node index
    index: HashMap<TargetRef, NodeIndex>,
}

/// Collects nodes and validates them into a [`TargetGraph`].
#[derive(Debug, Default)]
pub struct TargetGraphBuilder {
    nodes: Vec<DependencyNode>,
}

impl TargetGraphBuilder {
    /// Add a node.
    pub fn add(&mut self, node: DependencyNode) -> &mut Self {
        self.nodes.push(node);
        self
    }

    /// Add a node, builder style.
    pub fn node(mut self, node: DependencyNode) -> Self {
        self.nodes.push(node);
        self
    }

    /// Build the graph, rejecting duplicate targets and edges to unknown targets.
    pub fn build(self) -> Result<TargetGraph, GraphIntegrityError> {
        let mut graph = DiGraph::with_capacity(self.nodes.len(), 0);
        let mut index = HashMap::with_capacity(self.nodes.len());

        for node in self.nodes {
            let target = node.target().clone();
            if index.contains_key(&target) {
                return Err(GraphIntegrityError::DuplicateTarget { target });
            }
            let idx = graph.add_node(node);
            index.insert(target, idx);
        }

        let mut edges = Vec::new();
        for from_idx in graph.node_indices() {
            let from = &graph[from_idx];
            for dep in from.deps() {
                let to_idx = index.get(dep).copied().ok_or_else(|| {
                    GraphIntegrityError::DanglingEdge {
                        from: from.target().clone(),
                        to: dep.clone(),
                    }
                })?;
                edges.push((from_idx, to_idx));
            }
        }
        for (from, to) in edges {
            graph.add_edge(from, to, ());
        }

        tracing::trace!(
            nodes = graph.node_count(),
            edges = graph.edge_count(),
            "built target graph"
        );

        Ok(TargetGraph { graph, index })
    }
}

impl TargetGraph {
    /// Start building a graph.
    pub fn builder() -> TargetGraphBuilder {
        TargetGraphBuilder::default()
    }

    /// Get the number of nodes.
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Check if empty.
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Check if a target is in the graph.
    pub fn contains(&self, target: &TargetRef) -> bool {
        self.index.contains_key(target)
    }

    /// All targets, sorted.
    pub fn targets(&self) -> Vec<&TargetRef> {
        let mut targets: Vec<_> = self.index.keys().collect();
        targets.sort();
        targets
    }

    /// All nodes, sorted by target.
    pub fn nodes(&self) -> impl Iterator<Item = &DependencyNode> {
        self.targets()
            .into_iter()
            .map(move |t| &self.graph[self.index[t]])
    }

    /// Targets that directly depend on the given target, sorted.
    pub fn dependents(&self, target: &TargetRef) -> Vec<&TargetRef> {
        let Some(&idx) = self.index.get(target) else {
            return Vec::new();
        };

        let mut dependents: Vec<_> = self
            .graph
            .neighbors_directed(idx, Direction::Incoming)
            .map(|n| self.graph[n].target())
            .collect();
        dependents.sort();
        dependents.dedup();
        dependents
    }

    /// Verify the graph has no cycles.
    pub fn check_acyclic(&self) -> Result<(), GraphIntegrityError> {
        toposort(&self.graph, None)
            .map(|_| ())
            .map_err(|cycle| GraphIntegrityError::Cycle {
                target: self.graph[cycle.node_id()].target().clone(),
            })
    }
}

impl GraphView for TargetGraph {
    fn node(&self, target: &TargetRef) -> Option<&DependencyNode> {
        self.index.get(target).map(|&idx| &self.graph[idx])
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{ResourceCapability, RuleType};

    fn target(s: &str) -> TargetRef {
        TargetRef::parse(s).unwrap()
    }

    fn node(name: &str, deps: &[&str]) -> DependencyNode {
        DependencyNode::new(target(name), RuleType::GENRULE)
            .with_deps(deps.iter().map(|d| target(d)))
    }

    #[test]
    fn test_graph_basic() {
        let graph = TargetGraph::builder()
            .node(node("//a:a", &["//b:b"]))
            .node(
                DependencyNode::new(target("//b:b"), RuleType::ANDROID_RESOURCE)
                    .with_resources(ResourceCapability::manifest("b.xml")),
            )
            .build()
            .unwrap();

        assert_eq!(graph.len(), 2);
        assert!(graph.contains(&target("//a:a")));
        assert_eq!(graph.dependents(&target("//b:b")), vec![&target("//a:a")]);
        assert!(graph.dependents(&target("//a:a")).is_empty());
        assert_eq!(
            graph.node(&target("//b:b")).unwrap().rule_type(),
            &RuleType::ANDROID_RESOURCE
        );
        assert!(graph.check_acyclic().is_ok());
    }

    #[test]
    fn test_duplicate_target_rejected() {
        let result = TargetGraph::builder()
            .node(node("//a:a", &[]))
            .node(node("//a:a", &[]))
            .build();

        assert_eq!(
            result.unwrap_err(),
            GraphIntegrityError::DuplicateTarget {
                target: target("//a:a")
            }
        );
    }

    #[test]
    fn test_dangling_edge_rejected() {
        let result = TargetGraph::builder()
            .node(node("//a:a", &["//missing:m"]))
            .build();

        assert_eq!(
            result.unwrap_err(),
            GraphIntegrityError::DanglingEdge {
                from: target("//a:a"),
                to: target("//missing:m"),
            }
        );
    }

    #[test]
    fn test_cycle_detected() {
        let graph = TargetGraph::builder()
            .node(node("//a:a", &["//b:b"]))
            .node(node("//b:b", &["//a:a"]))
            .build()
            .unwrap();

        assert!(matches!(
            graph.check_acyclic(),
            Err(GraphIntegrityError::Cycle { .. })
        ));
    }

    #[test]
    fn test_targets_sorted() {
        let graph = TargetGraph::builder()
            .node(node("//z:z", &[]))
            .node(node("//a:b", &[]))
            .node(node("//a:a", &[]))
            .build()
            .unwrap();

        let names: Vec<_> = graph.targets().iter().map(|t| t.as_str()).collect();
        assert_eq!(names, vec!["//a:a", "//a:b", "//z:z"]);

        let node_names: Vec<_> = graph.nodes().map(|n| n.target().as_str()).collect();
        assert_eq!(node_names, names);
    }

    #[test]
    fn test_edge_target_reports_dangling() {
        let mut map = HashMap::new();
        map.insert(target("//a:a"), node("//a:a", &["//b:b"]));

        let err = map.edge_target(&target("//a:a"), &target("//b:b")).unwrap_err();
        assert!(matches!(err, GraphIntegrityError::DanglingEdge { .. }));
    }
}
