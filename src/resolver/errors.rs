//! Resolution error types and diagnostics.

use miette::Diagnostic as MietteDiagnostic;
use thiserror::Error;

use crate::core::{RuleType, TargetRef};
use crate::util::diagnostic::{suggestions, Diagnostic};

/// A rule's declared configuration cannot be turned into a merge unit.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ConfigurationError {
    #[error("`{target}` is missing required attribute `skeleton`")]
    #[diagnostic(code(manifold::config::missing_skeleton))]
    MissingSkeleton { target: TargetRef },

    #[error("`{target}` depends on `{dependency}`, which is not in the target graph")]
    #[diagnostic(code(manifold::config::unresolved_dependency))]
    UnresolvedDependency {
        target: TargetRef,
        dependency: TargetRef,
    },

    #[error("`{target}` is a `{rule_type}` rule, not `android_manifest`")]
    #[diagnostic(code(manifold::config::not_a_manifest_rule))]
    NotAManifestRule {
        target: TargetRef,
        rule_type: RuleType,
    },

    #[error("no rule named `{target}`")]
    #[diagnostic(code(manifold::config::unknown_target))]
    UnknownTarget { target: TargetRef },
}

/// The target graph itself is malformed.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum GraphIntegrityError {
    #[error("cycle detected in target graph at `{target}`")]
    #[diagnostic(code(manifold::graph::cycle))]
    Cycle { target: TargetRef },

    #[error("`{from}` has an edge to `{to}`, which is not in the target graph")]
    #[diagnostic(code(manifold::graph::dangling_edge))]
    DanglingEdge { from: TargetRef, to: TargetRef },

    #[error("target `{target}` is declared more than once")]
    #[diagnostic(code(manifold::graph::duplicate_target))]
    DuplicateTarget { target: TargetRef },
}

/// Any error raised while resolving a manifest merge unit.
#[derive(Debug, Clone, PartialEq, Eq, Error, MietteDiagnostic)]
pub enum ResolveError {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Configuration(#[from] ConfigurationError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    GraphIntegrity(#[from] GraphIntegrityError),
}

impl ResolveError {
    /// Convert to a user-friendly diagnostic.
    pub fn to_diagnostic(&self) -> Diagnostic {
        match self {
            ResolveError::Configuration(ConfigurationError::MissingSkeleton { target }) => {
                Diagnostic::error(self.to_string())
                    .with_context(format!("rule: {}", target))
                    .with_suggestion(
                        "Add `skeleton = \"AndroidManifest.xml\"` to the rule".to_string(),
                    )
            }

            ResolveError::Configuration(ConfigurationError::UnresolvedDependency {
                target,
                dependency,
            }) => Diagnostic::error(self.to_string())
                .with_context(format!("{} -> {}", target, dependency))
                .with_suggestion(format!("Declare a rule named `{}`", dependency))
                .with_suggestion(format!(
                    "Remove `{}` from the `deps` of `{}`",
                    dependency, target
                )),

            ResolveError::Configuration(ConfigurationError::NotAManifestRule { .. }) => {
                Diagnostic::error(self.to_string()).with_suggestion(suggestions::LIST_TARGETS)
            }

            ResolveError::Configuration(ConfigurationError::UnknownTarget { .. }) => {
                Diagnostic::error(self.to_string()).with_suggestion(suggestions::LIST_TARGETS)
            }

            ResolveError::GraphIntegrity(GraphIntegrityError::Cycle { target }) => {
                Diagnostic::error(self.to_string())
                    .with_context(format!("`{}` can reach itself through its deps", target))
                    .with_suggestion(
                        "Break the cycle by removing or restructuring dependencies".to_string(),
                    )
            }

            ResolveError::GraphIntegrity(GraphIntegrityError::DanglingEdge { to, .. }) => {
                Diagnostic::error(self.to_string())
                    .with_suggestion(format!("Declare a rule named `{}`", to))
            }

            ResolveError::GraphIntegrity(GraphIntegrityError::DuplicateTarget { .. }) => {
                Diagnostic::error(self.to_string())
                    .with_suggestion("Rename one of the rules".to_string())
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target(s: &str) -> TargetRef {
        TargetRef::parse(s).unwrap()
    }

    #[test]
    fn test_unresolved_dependency_diagnostic() {
        let err = ResolveError::from(ConfigurationError::UnresolvedDependency {
            target: target("//app:manifest"),
            dependency: target("//res:missing"),
        });

        let output = err.to_diagnostic().format(false);

        assert!(output.contains("error: `//app:manifest` depends on `//res:missing`"));
        assert!(output.contains("//app:manifest -> //res:missing"));
        assert!(output.contains("1. Declare a rule named `//res:missing`"));
    }

    #[test]
    fn test_missing_skeleton_message() {
        let err = ResolveError::from(ConfigurationError::MissingSkeleton {
            target: target("//app:manifest"),
        });

        assert_eq!(
            err.to_string(),
            "`//app:manifest` is missing required attribute `skeleton`"
        );
        assert!(err.to_diagnostic().format(false).contains("help: consider:"));
    }

    #[test]
    fn test_diagnostic_codes_pass_through() {
        let err = ResolveError::from(GraphIntegrityError::Cycle {
            target: target("//a:a"),
        });

        let code = MietteDiagnostic::code(&err).map(|c| c.to_string());
        assert_eq!(code.as_deref(), Some("manifold::graph::cycle"));
    }
}
