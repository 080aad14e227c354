//! Resource-dependency filtering.
//!
//! Narrows a rule's direct dependencies down to the rules that carry
//! resources, looking through rule kinds that merely wrap other rules
//! (genrules, plain libraries) to find the resource rules behind them.

use std::collections::{BTreeSet, HashSet};

use crate::core::{DependencyNode, GraphView, RuleType};
use crate::resolver::ResolveError;

/// Rule kinds the filter looks through when they carry no resources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassThroughPolicy {
    kinds: BTreeSet<RuleType>,
}

impl PassThroughPolicy {
    /// A policy looking through exactly the given kinds.
    pub fn new(kinds: impl IntoIterator<Item = RuleType>) -> Self {
        PassThroughPolicy {
            kinds: kinds.into_iter().collect(),
        }
    }

    /// Whether rules of this kind are looked through.
    pub fn is_pass_through(&self, rule_type: &RuleType) -> bool {
        self.kinds.contains(rule_type)
    }
}

impl Default for PassThroughPolicy {
    fn default() -> Self {
        PassThroughPolicy::new([
            RuleType::GENRULE,
            RuleType::JAVA_LIBRARY,
            RuleType::ANDROID_LIBRARY,
        ])
    }
}

/// Find the resource-bearing rules among `nodes`.
///
/// Walks depth first in input order. A resource-bearing rule is returned and
/// not descended into; a pass-through rule is replaced by whatever its own
/// dependencies yield; any other rule is dropped. Each target appears at most
/// once, at its first encounter.
pub fn filter_resource_deps<'g, G: GraphView>(
    graph: &'g G,
    policy: &PassThroughPolicy,
    nodes: &[&'g DependencyNode],
) -> Result<Vec<&'g DependencyNode>, ResolveError> {
    let mut found = Vec::new();
    let mut seen = HashSet::new();

    // Reversed so the first input is popped first.
    let mut stack: Vec<&'g DependencyNode> = nodes.iter().rev().copied().collect();

    while let Some(node) = stack.pop() {
        if !seen.insert(node.target()) {
            continue;
        }

        if node.is_resource_bearing() {
            tracing::trace!("resource dep: {}", node.target());
            found.push(node);
        } else if policy.is_pass_through(node.rule_type()) {
            tracing::trace!("looking through {} `{}`", node.rule_type(), node.target());
            for dep in node.deps().iter().rev() {
                let child = graph.edge_target(node.target(), dep)?;
                if !seen.contains(child.target()) {
                    stack.push(child);
                }
            }
        } else {
            tracing::trace!("skipping {} `{}`", node.rule_type(), node.target());
        }
    }

    Ok(found)
}
