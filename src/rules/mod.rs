//! Rule descriptions.
//!
//! Each rule type that produces an artifact implements [`RuleDescription`].
//! Only `android_manifest` lives here; every other rule type is just a node
//! in the target graph.

pub mod description;
pub mod manifest;

pub use description::RuleDescription;
pub use manifest::{
    build_manifest_artifact, ArtifactRecord, ManifestArg, ManifestArtifact, ManifestDescription,
};
