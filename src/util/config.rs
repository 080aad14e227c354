//! Configuration file support for Manifold.
//!
//! Manifold supports two configuration file locations:
//! - Global: `~/.manifold/config.toml` - User-wide defaults
//! - Project: `.manifold/config.toml` - Project-specific overrides
//!
//! Project config takes precedence over global config.

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::core::RuleType;
use crate::resolver::PassThroughPolicy;

/// Default directory merged manifests are generated into.
pub const DEFAULT_GEN_DIR: &str = "manifold-out/gen";

/// Manifold configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Resolution settings
    pub resolve: ResolveConfig,

    /// Output settings
    pub output: OutputConfig,
}

/// Resolution-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ResolveConfig {
    /// Rule types looked through when searching for resource rules
    /// (None = genrule, java_library, android_library)
    pub passthrough_kinds: Option<Vec<String>>,
}

/// Output-related configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    /// Directory merged manifests will be generated into
    pub gen_dir: Option<PathBuf>,

    /// Default directory for `resolve --out-dir`
    pub out_dir: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file: {}", path.display()))?;

        toml::from_str(&contents)
            .with_context(|| format!("failed to parse config file: {}", path.display()))
    }

    /// Load configuration with fallback to defaults if file doesn't exist.
    pub fn load_or_default(path: &Path) -> Self {
        if path.exists() {
            Self::load(path).unwrap_or_else(|e| {
                tracing::warn!("Failed to load config from {}: {:#}", path.display(), e);
                Self::default()
            })
        } else {
            Self::default()
        }
    }

    /// Merge another config into this one (other takes precedence).
    pub fn merge(&mut self, other: Config) {
        if other.resolve.passthrough_kinds.is_some() {
            self.resolve.passthrough_kinds = other.resolve.passthrough_kinds;
        }

        if other.output.gen_dir.is_some() {
            self.output.gen_dir = other.output.gen_dir;
        }
        if other.output.out_dir.is_some() {
            self.output.out_dir = other.output.out_dir;
        }
    }

    /// The pass-through policy this config selects.
    pub fn passthrough_policy(&self) -> PassThroughPolicy {
        match &self.resolve.passthrough_kinds {
            Some(kinds) => PassThroughPolicy::new(kinds.iter().map(|k| RuleType::new(k.as_str()))),
            None => PassThroughPolicy::default(),
        }
    }

    /// The generated-file directory, relative paths taken against `root`.
    pub fn gen_dir(&self, root: &Path) -> PathBuf {
        let dir = self
            .output
            .gen_dir
            .clone()
            .unwrap_or_else(|| PathBuf::from(DEFAULT_GEN_DIR));
        root.join(dir)
    }
}

/// Load merged configuration from global and project locations.
///
/// Order of precedence (highest to lowest):
/// 1. Project config (.manifold/config.toml)
/// 2. Global config (~/.manifold/config.toml)
/// 3. Defaults
pub fn load_config(global_path: &Path, project_path: &Path) -> Config {
    let mut config = Config::default();

    if global_path.exists() {
        config.merge(Config::load_or_default(global_path));
    }

    if project_path.exists() {
        config.merge(Config::load_or_default(project_path));
    }

    config
}

/// Get the global manifold config directory (~/.manifold).
pub fn global_config_dir() -> Option<PathBuf> {
    directories::BaseDirs::new().map(|b| b.home_dir().join(".manifold"))
}

/// Get the project config path (.manifold/config.toml).
pub fn project_config_path(project_root: &Path) -> PathBuf {
    project_root.join(".manifold").join("config.toml")
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_config_default() {
        let config = Config::default();
        assert!(config.resolve.passthrough_kinds.is_none());
        assert_eq!(config.passthrough_policy(), PassThroughPolicy::default());
        assert_eq!(
            config.gen_dir(Path::new("/proj")),
            PathBuf::from("/proj/manifold-out/gen")
        );
    }

    #[test]
    fn test_config_load() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");

        std::fs::write(
            &config_path,
            r#"
[resolve]
passthrough_kinds = ["genrule", "filegroup"]

[output]
gen_dir = "out/gen"
"#,
        )
        .unwrap();

        let config = Config::load(&config_path).unwrap();
        let policy = config.passthrough_policy();
        assert!(policy.is_pass_through(&RuleType::new("filegroup")));
        assert!(policy.is_pass_through(&RuleType::GENRULE));
        assert!(!policy.is_pass_through(&RuleType::JAVA_LIBRARY));
        assert_eq!(config.output.gen_dir, Some(PathBuf::from("out/gen")));
    }

    #[test]
    fn test_config_merge() {
        let mut base = Config::default();
        base.resolve.passthrough_kinds = Some(vec!["genrule".to_string()]);
        base.output.gen_dir = Some(PathBuf::from("base/gen"));

        let mut override_cfg = Config::default();
        override_cfg.output.gen_dir = Some(PathBuf::from("project/gen"));

        base.merge(override_cfg);

        assert_eq!(base.output.gen_dir, Some(PathBuf::from("project/gen")));
        // Not overridden
        assert_eq!(
            base.resolve.passthrough_kinds,
            Some(vec!["genrule".to_string()])
        );
    }

    #[test]
    fn test_invalid_config_falls_back_to_default() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join("config.toml");
        std::fs::write(&config_path, "[resolve\nbroken").unwrap();

        assert!(Config::load(&config_path).is_err());
        assert_eq!(Config::load_or_default(&config_path), Config::default());
    }

    #[test]
    fn test_load_config_precedence() {
        let tmp = TempDir::new().unwrap();
        let global_path = tmp.path().join("global.toml");
        let project_path = tmp.path().join("project.toml");

        std::fs::write(
            &global_path,
            r#"
[resolve]
passthrough_kinds = ["genrule"]

[output]
gen_dir = "global/gen"
"#,
        )
        .unwrap();

        std::fs::write(
            &project_path,
            r#"
[output]
gen_dir = "project/gen"
"#,
        )
        .unwrap();

        let config = load_config(&global_path, &project_path);

        assert_eq!(config.output.gen_dir, Some(PathBuf::from("project/gen")));
        assert_eq!(
            config.resolve.passthrough_kinds,
            Some(vec!["genrule".to_string()])
        );
    }
}
