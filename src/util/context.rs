//! Global context for Manifold operations.
//!
//! Provides centralized access to configuration, paths, and environment.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use thiserror::Error;

use crate::core::rules_file::find_rules_file;
use crate::util::config::{global_config_dir, load_config, project_config_path, Config};

/// Error locating the rules file.
#[derive(Debug, Error)]
pub enum RulesFileError {
    #[error("could not find Rules.toml in {} or any parent directory", dir.display())]
    NotFound { dir: PathBuf },
}

/// Global context containing configuration and paths.
#[derive(Debug, Clone)]
pub struct GlobalContext {
    /// Current working directory
    cwd: PathBuf,

    /// Home directory for global Manifold data (~/.manifold/)
    home: PathBuf,

    /// Whether to use verbose output
    verbose: bool,

    /// Whether to use colors in output
    color: bool,
}

impl GlobalContext {
    /// Create a new GlobalContext with defaults.
    pub fn new() -> Result<Self> {
        let cwd = std::env::current_dir().context("failed to get current directory")?;
        let home = global_config_dir().unwrap_or_else(|| PathBuf::from(".manifold"));

        Ok(GlobalContext {
            cwd,
            home,
            verbose: false,
            color: true,
        })
    }

    /// Create a GlobalContext with a specific working directory.
    pub fn with_cwd(cwd: PathBuf) -> Result<Self> {
        let mut ctx = Self::new()?;
        ctx.cwd = cwd;
        Ok(ctx)
    }

    /// Set verbose mode.
    pub fn set_verbose(&mut self, verbose: bool) {
        self.verbose = verbose;
    }

    /// Set color output.
    pub fn set_color(&mut self, color: bool) {
        self.color = color;
    }

    /// Get the current working directory.
    pub fn cwd(&self) -> &Path {
        &self.cwd
    }

    /// Get the Manifold home directory (~/.manifold/).
    pub fn home(&self) -> &Path {
        &self.home
    }

    /// Get the global configuration file path.
    pub fn config_path(&self) -> PathBuf {
        self.home.join("config.toml")
    }

    /// Check if verbose mode is enabled.
    pub fn is_verbose(&self) -> bool {
        self.verbose
    }

    /// Check if color output is enabled.
    pub fn color(&self) -> bool {
        self.color
    }

    /// Load global config merged with the config of the project at `root`.
    pub fn load_config(&self, root: &Path) -> Config {
        load_config(&self.config_path(), &project_config_path(root))
    }

    /// Find the rules file starting from cwd and searching upward.
    pub fn find_rules_file(&self) -> Result<PathBuf, RulesFileError> {
        self.cwd
            .ancestors()
            .find_map(find_rules_file)
            .ok_or_else(|| RulesFileError::NotFound {
                dir: self.cwd.clone(),
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::RULES_FILE_NAME;
    use tempfile::TempDir;

    #[test]
    fn test_context_paths() {
        let ctx = GlobalContext::new().unwrap();
        assert!(ctx.cwd().is_absolute());
        assert!(ctx.config_path().ends_with("config.toml"));
    }

    #[test]
    fn test_find_rules_file_in_parent() {
        let tmp = TempDir::new().unwrap();
        let rules = tmp.path().join(RULES_FILE_NAME);
        std::fs::write(&rules, "").unwrap();
        let nested = tmp.path().join("app").join("src");
        std::fs::create_dir_all(&nested).unwrap();

        let ctx = GlobalContext::with_cwd(nested).unwrap();
        assert_eq!(ctx.find_rules_file().ok(), Some(rules));
    }

    #[test]
    fn test_find_rules_file_missing() {
        let tmp = TempDir::new().unwrap();
        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();

        // A Rules.toml further up the real filesystem would be found; only
        // check the error shape when nothing is.
        if let Err(err) = ctx.find_rules_file() {
            assert!(err.to_string().contains("could not find Rules.toml"));
        }
    }

    #[test]
    fn test_project_config_is_loaded() {
        let tmp = TempDir::new().unwrap();
        let config_dir = tmp.path().join(".manifold");
        std::fs::create_dir_all(&config_dir).unwrap();
        std::fs::write(
            config_dir.join("config.toml"),
            "[output]\ngen_dir = \"custom/gen\"\n",
        )
        .unwrap();

        let ctx = GlobalContext::with_cwd(tmp.path().to_path_buf()).unwrap();
        let config = ctx.load_config(tmp.path());
        assert_eq!(config.output.gen_dir, Some(PathBuf::from("custom/gen")));
    }
}
