//! Test utilities for Manifold unit tests.
//!
//! Provides a terse builder for synthetic target graphs so resolution tests
//! can describe a graph in a few lines.
//!
//! # Example
//!
//! ```rust,ignore
//! use crate::test_support::{nodes, GraphFixture};
//!
//! let graph = GraphFixture::new()
//!     .passthrough("//gen:a", &["//res:b"])
//!     .resource("//res:b", "b.xml", &[])
//!     .build();
//! let roots = nodes(&graph, &["//gen:a"]);
//! ```

pub mod fixtures;

use std::collections::HashMap;

use crate::core::{
    DependencyNode, GraphView, ResourceCapability, RuleType, TargetGraph, TargetRef,
};

pub use fixtures::*;

/// Parse a target reference, panicking on bad input.
pub fn target(s: &str) -> TargetRef {
    TargetRef::parse(s).unwrap_or_else(|e| panic!("bad test target {s}: {e}"))
}

/// Look up nodes by name, in the given order.
pub fn nodes<'a, G: GraphView>(graph: &'a G, names: &[&str]) -> Vec<&'a DependencyNode> {
    names
        .iter()
        .map(|name| {
            graph
                .node(&target(name))
                .unwrap_or_else(|| panic!("no node {name} in test graph"))
        })
        .collect()
}

/// Builder for synthetic target graphs.
#[derive(Debug, Default)]
pub struct GraphFixture {
    nodes: Vec<DependencyNode>,
}

impl GraphFixture {
    pub fn new() -> Self {
        GraphFixture::default()
    }

    fn push(
        mut self,
        name: &str,
        rule_type: RuleType,
        deps: &[&str],
        res: ResourceCapability,
    ) -> Self {
        self.nodes.push(
            DependencyNode::new(target(name), rule_type)
                .with_deps(deps.iter().map(|d| target(d)))
                .with_resources(res),
        );
        self
    }

    /// An `android_resource` rule with a manifest fragment.
    pub fn resource(self, name: &str, manifest: &str, deps: &[&str]) -> Self {
        self.push(
            name,
            RuleType::ANDROID_RESOURCE,
            deps,
            ResourceCapability::manifest(manifest),
        )
    }

    /// An `android_resource` rule with a resource directory and no manifest.
    pub fn res_only(self, name: &str, res: &str, deps: &[&str]) -> Self {
        self.push(
            name,
            RuleType::ANDROID_RESOURCE,
            deps,
            ResourceCapability::res(res),
        )
    }

    /// A `genrule` with no resources of its own.
    pub fn passthrough(self, name: &str, deps: &[&str]) -> Self {
        self.push(name, RuleType::GENRULE, deps, ResourceCapability::default())
    }

    /// A rule kind the filter never looks through.
    pub fn opaque(self, name: &str, deps: &[&str]) -> Self {
        self.push(
            name,
            RuleType::new("prebuilt_jar"),
            deps,
            ResourceCapability::default(),
        )
    }

    /// Build a validated graph.
    pub fn build(self) -> TargetGraph {
        let mut builder = TargetGraph::builder();
        for node in self.nodes {
            builder.add(node);
        }
        builder.build().expect("invalid test graph")
    }

    /// Build an unvalidated map, which may contain dangling edges.
    pub fn into_map(self) -> HashMap<TargetRef, DependencyNode> {
        self.nodes
            .into_iter()
            .map(|node| (node.target().clone(), node))
            .collect()
    }
}
