//! Locates and loads `stylekit.toml`.
//!
//! Lookup order, first hit wins:
//!
//! 1. the `--config` flag, relative to the project directory
//! 2. `stylekit.toml`, then `.stylekit.toml`, in the project directory
//! 3. `config.toml` in `$STYLEKIT_CONFIG_DIR`, or `~/.stylekit/`
//! 4. built-in defaults

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use stylekit::Config;

/// File names looked up in the project directory.
pub const PROJECT_CONFIG_NAMES: [&str; 2] = ["stylekit.toml", ".stylekit.toml"];

/// Environment variable overriding the user config directory.
pub const CONFIG_DIR_ENV: &str = "STYLEKIT_CONFIG_DIR";

/// Where a configuration comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigSource {
    /// Given with `--config`.
    Explicit(PathBuf),
    /// Found next to the sources.
    Project(PathBuf),
    /// Found in the user config directory.
    Global(PathBuf),
    /// Nothing found.
    Default,
}

impl ConfigSource {
    /// Path of the config file, unless defaults are used.
    #[must_use]
    pub fn path(&self) -> Option<&Path> {
        match self {
            Self::Explicit(path) | Self::Project(path) | Self::Global(path) => Some(path),
            Self::Default => None,
        }
    }

    /// Reads and parses the config file, or returns defaults.
    pub fn load(&self) -> Result<Config> {
        match self {
            Self::Default => {
                tracing::debug!("No stylekit.toml found, using defaults");
                Ok(Config::default())
            }
            source => {
                let path = source.path().context("config source has no path")?;
                if let Self::Global(_) = source {
                    tracing::info!("Using user config {}", path.display());
                }
                Config::from_file(path)
                    .with_context(|| format!("Failed to load {}", path.display()))
            }
        }
    }
}

/// Finds the config for a project directory.
#[derive(Debug, Clone)]
pub struct ConfigResolver {
    project_dir: PathBuf,
    user_dir: Option<PathBuf>,
}

impl ConfigResolver {
    /// Resolver for `project_dir` using the user config directory from the
    /// environment.
    #[must_use]
    pub fn new(project_dir: impl Into<PathBuf>) -> Self {
        Self {
            project_dir: project_dir.into(),
            user_dir: user_config_dir(),
        }
    }

    /// Replaces the user config directory.
    #[must_use]
    pub fn with_user_dir(mut self, dir: Option<PathBuf>) -> Self {
        self.user_dir = dir;
        self
    }

    /// Picks the config source; an explicit path is trusted without checking.
    #[must_use]
    pub fn resolve(&self, explicit: Option<&Path>) -> ConfigSource {
        if let Some(path) = explicit {
            return ConfigSource::Explicit(self.project_dir.join(path));
        }

        let project = PROJECT_CONFIG_NAMES
            .iter()
            .map(|name| self.project_dir.join(name))
            .find(|path| path.is_file());
        if let Some(path) = project {
            tracing::debug!("Found {}", path.display());
            return ConfigSource::Project(path);
        }

        self.user_dir
            .as_ref()
            .map(|dir| dir.join("config.toml"))
            .filter(|path| path.is_file())
            .map_or(ConfigSource::Default, ConfigSource::Global)
    }
}

/// `$STYLEKIT_CONFIG_DIR`, falling back to `~/.stylekit`.
#[must_use]
pub fn user_config_dir() -> Option<PathBuf> {
    std::env::var_os(CONFIG_DIR_ENV)
        .map(PathBuf::from)
        .or_else(|| home::home_dir().map(|home| home.join(".stylekit")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn resolver(project: &Path, user: Option<&Path>) -> ConfigResolver {
        ConfigResolver::new(project).with_user_dir(user.map(Path::to_path_buf))
    }

    #[test]
    fn flag_wins_over_project_file() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join("stylekit.toml"), "").unwrap();

        let source = resolver(project.path(), None).resolve(Some(Path::new("ci.toml")));
        assert_eq!(source, ConfigSource::Explicit(project.path().join("ci.toml")));
    }

    #[test]
    fn absolute_flag_is_kept() {
        let source = resolver(Path::new("/work"), None).resolve(Some(Path::new("/etc/sk.toml")));
        assert_eq!(source.path(), Some(Path::new("/etc/sk.toml")));
    }

    #[test]
    fn plain_name_before_dotfile() {
        let project = TempDir::new().unwrap();
        fs::write(project.path().join(".stylekit.toml"), "").unwrap();
        assert_eq!(
            resolver(project.path(), None).resolve(None),
            ConfigSource::Project(project.path().join(".stylekit.toml"))
        );

        fs::write(project.path().join("stylekit.toml"), "").unwrap();
        assert_eq!(
            resolver(project.path(), None).resolve(None),
            ConfigSource::Project(project.path().join("stylekit.toml"))
        );
    }

    #[test]
    fn user_dir_only_used_without_project_file() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        fs::write(user.path().join("config.toml"), "").unwrap();

        assert_eq!(
            resolver(project.path(), Some(user.path())).resolve(None),
            ConfigSource::Global(user.path().join("config.toml"))
        );

        fs::write(project.path().join("stylekit.toml"), "").unwrap();
        assert!(matches!(
            resolver(project.path(), Some(user.path())).resolve(None),
            ConfigSource::Project(_)
        ));
    }

    #[test]
    fn empty_user_dir_means_defaults() {
        let project = TempDir::new().unwrap();
        let user = TempDir::new().unwrap();
        assert_eq!(
            resolver(project.path(), Some(user.path())).resolve(None),
            ConfigSource::Default
        );
    }

    #[test]
    fn loads_defaults_and_files() {
        assert_eq!(
            ConfigSource::Default.load().unwrap().outdir,
            PathBuf::from("styled-system")
        );

        let project = TempDir::new().unwrap();
        let path = project.path().join("stylekit.toml");
        fs::write(&path, "outdir = \"gen\"\nminify = true\n").unwrap();

        let config = ConfigSource::Project(path).load().unwrap();
        assert_eq!(config.outdir, PathBuf::from("gen"));
        assert!(config.minify);
    }

    #[test]
    fn missing_flag_file_fails_to_load() {
        let err = ConfigSource::Explicit(PathBuf::from("/nonexistent/stylekit.toml"))
            .load()
            .unwrap_err();
        assert!(err.to_string().starts_with("Failed to load"));
    }
}
