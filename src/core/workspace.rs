//! Workspace - central configuration hub.
//!
//! A Workspace is a loaded rules file together with the configuration that
//! applies to it, providing centralized access to paths and settings.

use std::path::{Path, PathBuf};

use anyhow::Result;

use crate::core::RulesFile;
use crate::rules::ManifestDescription;
use crate::util::{Config, GlobalContext};

/// A rules file, its project root, and its effective configuration.
#[derive(Debug)]
pub struct Workspace {
    /// Directory containing the rules file
    root: PathBuf,

    /// The loaded rules
    rules: RulesFile,

    /// Global config merged with project config
    config: Config,
}

impl Workspace {
    /// Load a workspace from a rules file path.
    pub fn new(rules_path: &Path, ctx: &GlobalContext) -> Result<Self> {
        let rules = RulesFile::load(rules_path)?;
        let root = rules_path
            .parent()
            .filter(|p| !p.as_os_str().is_empty())
            .unwrap_or(Path::new("."))
            .to_path_buf();
        let config = ctx.load_config(&root);

        Ok(Workspace {
            root,
            rules,
            config,
        })
    }

    /// Get the workspace root directory.
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Get the loaded rules.
    pub fn rules(&self) -> &RulesFile {
        &self.rules
    }

    /// Get the effective configuration.
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Directory merged manifests will be generated into.
    pub fn gen_dir(&self) -> PathBuf {
        self.config.gen_dir(&self.root)
    }

    /// Configured directory for artifact definitions, if any.
    pub fn out_dir(&self) -> Option<PathBuf> {
        self.config.output.out_dir.as_ref().map(|d| self.root.join(d))
    }

    /// The `android_manifest` description configured for this workspace.
    pub fn manifest_description(&self) -> ManifestDescription {
        ManifestDescription::new(self.config.passthrough_policy())
    }
}
