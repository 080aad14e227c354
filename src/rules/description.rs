//! The rule description seam.
//!
//! A description knows one rule type: what configuration it takes and how
//! to turn that configuration into a buildable artifact definition.

use crate::core::{GraphView, RuleType, TargetRef};
use crate::resolver::ResolveError;

/// Describes how to build one type of rule.
pub trait RuleDescription {
    /// Parsed configuration of one rule instance.
    type Arg;

    /// The artifact definition the rule produces.
    type Buildable;

    /// The rule type this description handles.
    fn rule_type(&self) -> RuleType;

    /// Create the buildable for `target` from its configuration.
    fn create_buildable<G: GraphView>(
        &self,
        target: &TargetRef,
        arg: &Self::Arg,
        graph: &G,
    ) -> Result<Self::Buildable, ResolveError>;
}
