//! Dependency nodes - the rule instances that make up the target graph.
//!
//! A node knows its own identity, its rule type, the targets it depends on
//! (in declaration order), and optionally which resources it carries.

use std::borrow::{Borrow, Cow};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::core::TargetRef;

/// The type of a build rule (e.g. `android_resource`, `genrule`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RuleType(Cow<'static, str>);

impl RuleType {
    pub const ANDROID_MANIFEST: RuleType = RuleType(Cow::Borrowed("android_manifest"));
    pub const ANDROID_RESOURCE: RuleType = RuleType(Cow::Borrowed("android_resource"));
    pub const ANDROID_LIBRARY: RuleType = RuleType(Cow::Borrowed("android_library"));
    pub const JAVA_LIBRARY: RuleType = RuleType(Cow::Borrowed("java_library"));
    pub const GENRULE: RuleType = RuleType(Cow::Borrowed("genrule"));

    /// Create a rule type from any name.
    pub fn new(name: impl Into<String>) -> Self {
        RuleType(Cow::Owned(name.into()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for RuleType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// An opaque path to a source file, as written in the rule declaration.
///
/// Ordering is plain lexicographic order on the path string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SourcePath(String);

impl SourcePath {
    pub fn new(path: impl Into<String>) -> Self {
        SourcePath(path.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourcePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl Borrow<str> for SourcePath {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl From<&str> for SourcePath {
    fn from(s: &str) -> Self {
        SourcePath::new(s)
    }
}

impl From<String> for SourcePath {
    fn from(s: String) -> Self {
        SourcePath(s)
    }
}

/// Resources a rule makes available to its dependents.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ResourceCapability {
    /// Manifest fragment to be merged into dependent manifests
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub manifest: Option<SourcePath>,

    /// Resource directory
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub res: Option<SourcePath>,
}

impl ResourceCapability {
    /// Capability carrying only a manifest fragment.
    pub fn manifest(path: impl Into<SourcePath>) -> Self {
        ResourceCapability {
            manifest: Some(path.into()),
            res: None,
        }
    }

    /// Capability carrying only a resource directory.
    pub fn res(path: impl Into<SourcePath>) -> Self {
        ResourceCapability {
            manifest: None,
            res: Some(path.into()),
        }
    }

    /// Add a resource directory.
    pub fn with_res(mut self, path: impl Into<SourcePath>) -> Self {
        self.res = Some(path.into());
        self
    }

    pub fn is_empty(&self) -> bool {
        self.manifest.is_none() && self.res.is_none()
    }
}

/// A build rule instance in the target graph.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DependencyNode {
    target: TargetRef,
    rule_type: RuleType,
    deps: Vec<TargetRef>,
    resources: Option<ResourceCapability>,
}

impl DependencyNode {
    /// Create a node with no dependencies and no resources.
    pub fn new(target: TargetRef, rule_type: RuleType) -> Self {
        DependencyNode {
            target,
            rule_type,
            deps: Vec::new(),
            resources: None,
        }
    }

    /// Set the declared dependencies. Repeated entries are dropped.
    pub fn with_deps(mut self, deps: impl IntoIterator<Item = TargetRef>) -> Self {
        for dep in deps {
            if !self.deps.contains(&dep) {
                self.deps.push(dep);
            }
        }
        self
    }

    /// Attach resources. An empty capability is stored as none.
    pub fn with_resources(mut self, resources: ResourceCapability) -> Self {
        self.resources = (!resources.is_empty()).then_some(resources);
        self
    }

    pub fn target(&self) -> &TargetRef {
        &self.target
    }

    pub fn rule_type(&self) -> &RuleType {
        &self.rule_type
    }

    /// Direct dependencies in declaration order.
    pub fn deps(&self) -> &[TargetRef] {
        &self.deps
    }

    /// Whether this node declares a manifest fragment or resource directory.
    pub fn is_resource_bearing(&self) -> bool {
        self.resources.is_some()
    }

    /// The manifest fragment this node contributes, if any.
    pub fn manifest_fragment(&self) -> Option<&SourcePath> {
        self.resources.as_ref().and_then(|r| r.manifest.as_ref())
    }

    /// The resource directory this node contributes, if any.
    pub fn res_dir(&self) -> Option<&SourcePath> {
        self.resources.as_ref().and_then(|r| r.res.as_ref())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(s: &str) -> TargetRef {
        TargetRef::parse(s).unwrap()
    }

    #[test]
    fn test_resource_capability() {
        let node = DependencyNode::new(target("//res:a"), RuleType::ANDROID_RESOURCE)
            .with_resources(ResourceCapability::manifest("a.xml").with_res("res/a"));

        assert!(node.is_resource_bearing());
        assert_eq!(node.manifest_fragment().map(|p| p.as_str()), Some("a.xml"));
        assert_eq!(node.res_dir().map(|p| p.as_str()), Some("res/a"));
    }

    #[test]
    fn test_empty_capability_is_not_resource_bearing() {
        let node = DependencyNode::new(target("//gen:g"), RuleType::GENRULE)
            .with_resources(ResourceCapability::default());

        assert!(!node.is_resource_bearing());
        assert!(node.manifest_fragment().is_none());
    }

    #[test]
    fn test_res_only_is_resource_bearing() {
        let node = DependencyNode::new(target("//res:b"), RuleType::ANDROID_RESOURCE)
            .with_resources(ResourceCapability::res("res/b"));

        assert!(node.is_resource_bearing());
        assert!(node.manifest_fragment().is_none());
    }

    #[test]
    fn test_duplicate_deps_keep_first() {
        let node = DependencyNode::new(target("//app:a"), RuleType::GENRULE).with_deps([
            target("//x:b"),
            target("//x:a"),
            target("//x:b"),
        ]);

        let deps: Vec<_> = node.deps().iter().map(|d| d.as_str()).collect();
        assert_eq!(deps, vec!["//x:b", "//x:a"]);
    }

    #[test]
    fn test_rule_type_constants_compare_by_name() {
        assert_eq!(RuleType::new("genrule"), RuleType::GENRULE);
        assert_ne!(RuleType::GENRULE, RuleType::JAVA_LIBRARY);
    }
}
