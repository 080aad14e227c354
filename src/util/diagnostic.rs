//! User-friendly diagnostic messages.
//!
//! Every error shown to the user carries its cause and, where one exists,
//! a suggested fix.

use std::fmt;
use std::path::PathBuf;

/// Common suggestion messages for consistent error handling.
pub mod suggestions {
    /// Suggestion when no rules file is found.
    pub const NO_RULES_FILE: &str = "help: Create a Rules.toml declaring your rules";

    /// Suggestion when a target is unknown or of the wrong type.
    pub const LIST_TARGETS: &str = "Run `manifold check` to see every manifest target";
}

/// A diagnostic message with optional suggestions.
#[derive(Debug, Clone)]
pub struct Diagnostic {
    /// Primary message
    pub message: String,
    /// Additional context lines
    pub context: Vec<String>,
    /// Suggested fixes
    pub suggestions: Vec<String>,
    /// Related location (file path)
    pub location: Option<PathBuf>,
}

impl Diagnostic {
    /// Create a new error diagnostic.
    pub fn error(message: impl Into<String>) -> Self {
        Diagnostic {
            message: message.into(),
            context: Vec::new(),
            suggestions: Vec::new(),
            location: None,
        }
    }

    /// Add context to the diagnostic.
    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context.push(context.into());
        self
    }

    /// Add a suggestion for fixing the issue.
    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    /// Add a file location.
    pub fn with_location(mut self, path: impl Into<PathBuf>) -> Self {
        self.location = Some(path.into());
        self
    }

    /// Format the diagnostic for terminal output.
    pub fn format(&self, color: bool) -> String {
        let mut output = String::new();

        let severity_str = if color {
            "\x1b[1;31merror\x1b[0m"
        } else {
            "error"
        };

        output.push_str(&format!("{}: {}\n", severity_str, self.message));

        if let Some(ref path) = self.location {
            output.push_str(&format!("  --> {}\n", path.display()));
        }

        for ctx in &self.context {
            output.push_str(&format!("  = {}\n", ctx));
        }

        if !self.suggestions.is_empty() {
            output.push('\n');
            let help_prefix = if color {
                "\x1b[1;32mhelp\x1b[0m"
            } else {
                "help"
            };
            output.push_str(&format!("{}: consider:\n", help_prefix));
            for (i, suggestion) in self.suggestions.iter().enumerate() {
                output.push_str(&format!("  {}. {}\n", i + 1, suggestion));
            }
        }

        output
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.format(false))
    }
}

/// Print a diagnostic to stderr.
pub fn emit(diagnostic: &Diagnostic, color: bool) {
    eprint!("{}", diagnostic.format(color));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_diagnostic_formatting() {
        let diag = Diagnostic::error("`//app:manifest` depends on `//res:gone`")
            .with_location("Rules.toml")
            .with_context("//app:manifest -> //res:gone")
            .with_suggestion("Declare a rule named `//res:gone`")
            .with_suggestion("Remove `//res:gone` from the `deps` of `//app:manifest`");

        let output = diag.format(false);
        assert!(output.starts_with("error: `//app:manifest` depends on"));
        assert!(output.contains("  --> Rules.toml"));
        assert!(output.contains("  = //app:manifest -> //res:gone"));
        assert!(output.contains("help: consider:"));
        assert!(output.contains("2. Remove `//res:gone`"));
    }

    #[test]
    fn test_plain_error() {
        let output = Diagnostic::error("no rule named `//x:y`").format(false);
        assert_eq!(output, "error: no rule named `//x:y`\n");
    }
}
