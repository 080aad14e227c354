//! High-level operations.
//!
//! This module contains the implementation of Manifold commands.

pub mod check;
pub mod resolve;

pub use check::{check, CheckReport};
pub use resolve::{
    definition_path, is_manifest_target, resolve_all, resolve_target, resource_deps,
    write_artifacts, WriteSummary,
};
