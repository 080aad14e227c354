//! Manifold - manifest merge-unit resolution for a build target graph
//!
//! Given an `android_manifest` rule (a skeleton manifest plus dependencies),
//! this crate determines which manifest fragments its dependency closure
//! contributes and produces a deterministic artifact definition for the
//! merge step.

pub mod core;
pub mod ops;
pub mod resolver;
pub mod rules;
pub mod util;

/// Test utilities for Manifold unit tests.
///
/// Only available when compiling tests. Provides a terse builder for
/// synthetic target graphs and Rules.toml fixtures.
#[cfg(test)]
pub mod test_support;

pub use core::{
    DependencyNode, GraphView, ResourceCapability, RuleType, SourcePath, TargetGraph, TargetRef,
    Workspace,
};

pub use resolver::{
    collect_manifest_fragments, filter_resource_deps, ConfigurationError, GraphIntegrityError,
    ManifestFragmentSet, PassThroughPolicy, ResolveError,
};
pub use rules::{build_manifest_artifact, ManifestArg, ManifestArtifact, ManifestDescription};
pub use util::context::GlobalContext;
