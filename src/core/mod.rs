//! Core data structures for Manifold.
//!
//! This module contains the foundational types used throughout Manifold:
//! - Target identifiers (TargetRef)
//! - Rule instances and their resources (DependencyNode)
//! - The immutable target graph and the read-only view resolution uses
//! - Rules.toml loading and the workspace around it

pub mod graph;
pub mod node;
pub mod rules_file;
pub mod target_ref;
pub mod workspace;

pub use graph::{GraphView, TargetGraph, TargetGraphBuilder};
pub use node::{DependencyNode, ResourceCapability, RuleType, SourcePath};
pub use rules_file::{find_rules_file, RulesFile, RULES_FILE_NAME};
pub use target_ref::{TargetRef, TargetRefParseError};
pub use workspace::Workspace;
