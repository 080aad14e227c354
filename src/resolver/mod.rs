//! Resource dependency resolution.
//!
//! Filtering picks the resource-bearing rules out of a rule's direct deps;
//! collection walks their closure and gathers manifest fragments. Both are
//! pure functions of a read-only [`GraphView`](crate::core::GraphView) and
//! hold no state between calls.

pub mod collect;
pub mod errors;
pub mod filter;

pub use collect::{
    collect_manifest_fragments, collect_transitive_resources, ManifestFragmentSet,
    TransitiveResources,
};
pub use errors::{ConfigurationError, GraphIntegrityError, ResolveError};
pub use filter::{filter_resource_deps, PassThroughPolicy};
