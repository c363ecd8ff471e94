use crate::domain::VersionBump;
use crate::error::{PdgError, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

/// File name looked up in the project root and the user config directory
pub const CONFIG_FILE_NAME: &str = "pdg.toml";

/// Represents the complete configuration for pdg.
///
/// Every field has a default, so an empty `pdg.toml` is valid.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct Config {
    /// Application name, used in banners
    #[serde(default = "default_app_name")]
    pub app_name: String,

    #[serde(default)]
    pub paths: PathsConfig,

    #[serde(default)]
    pub lint: LintConfig,

    #[serde(default)]
    pub release: ReleaseConfig,
}

fn default_app_name() -> String {
    "VelocityDB".to_string()
}

/// Project layout, relative to the project root.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct PathsConfig {
    #[serde(default = "default_frontend_dir")]
    pub frontend_dir: PathBuf,

    #[serde(default = "default_build_dir")]
    pub build_dir: PathBuf,
}

fn default_frontend_dir() -> PathBuf {
    PathBuf::from("frontend")
}

fn default_build_dir() -> PathBuf {
    PathBuf::from("build")
}

impl Default for PathsConfig {
    fn default() -> Self {
        PathsConfig {
            frontend_dir: default_frontend_dir(),
            build_dir: default_build_dir(),
        }
    }
}

/// Configuration for the C++ formatting check.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct LintConfig {
    /// Directories whose tracked sources are checked with clang-format
    #[serde(default = "default_cpp_dirs")]
    pub cpp_dirs: Vec<String>,

    /// File extensions (without the dot) treated as C++ sources
    #[serde(default = "default_cpp_extensions")]
    pub cpp_extensions: Vec<String>,
}

fn default_cpp_dirs() -> Vec<String> {
    vec!["src".to_string(), "backend".to_string()]
}

fn default_cpp_extensions() -> Vec<String> {
    vec!["cpp".to_string(), "h".to_string()]
}

impl Default for LintConfig {
    fn default() -> Self {
        LintConfig {
            cpp_dirs: default_cpp_dirs(),
            cpp_extensions: default_cpp_extensions(),
        }
    }
}

impl LintConfig {
    /// git pathspecs selecting every configured C++ source
    pub fn cpp_pathspecs(&self) -> Vec<String> {
        self.cpp_dirs
            .iter()
            .flat_map(|dir| {
                let dir = dir.trim_end_matches('/');
                self.cpp_extensions
                    .iter()
                    .map(move |ext| format!(":(glob){}/**/*.{}", dir, ext.trim_start_matches('.')))
            })
            .collect()
    }
}

/// Configuration for the release workflow.
#[derive(Debug, Deserialize, Serialize, Clone, PartialEq)]
pub struct ReleaseConfig {
    /// Bump applied when `--bump` is not given
    #[serde(default = "default_bump")]
    pub default_bump: String,

    /// Number of characters of the notes shown after a release
    #[serde(default = "default_preview_chars")]
    pub notes_preview_chars: usize,

    /// Remote used in the printed push command
    #[serde(default = "default_remote")]
    pub remote: String,
}

fn default_bump() -> String {
    "patch".to_string()
}

fn default_preview_chars() -> usize {
    500
}

fn default_remote() -> String {
    "origin".to_string()
}

impl Default for ReleaseConfig {
    fn default() -> Self {
        ReleaseConfig {
            default_bump: default_bump(),
            notes_preview_chars: default_preview_chars(),
            remote: default_remote(),
        }
    }
}

impl ReleaseConfig {
    /// Configured default bump; unknown names mean patch
    pub fn bump(&self) -> VersionBump {
        VersionBump::from_name(&self.default_bump)
    }
}

impl Default for Config {
    fn default() -> Self {
        Config {
            app_name: default_app_name(),
            paths: PathsConfig::default(),
            lint: LintConfig::default(),
            release: ReleaseConfig::default(),
        }
    }
}

impl Config {
    /// Parse configuration from TOML text
    pub fn from_toml(text: &str) -> Result<Self> {
        Ok(toml::from_str(text)?)
    }

    pub fn frontend_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.frontend_dir)
    }

    pub fn build_dir(&self, root: &Path) -> PathBuf {
        root.join(&self.paths.build_dir)
    }
}

/// Loads configuration from file or returns defaults.
///
/// Attempts to load configuration in the following order:
/// 1. Custom path provided as parameter (must exist)
/// 2. `pdg.toml` in the project root
/// 3. `pdg/pdg.toml` in the user config directory
/// 4. Default configuration if no file found
///
/// # Returns
/// * `Ok(Config)` - Loaded or default configuration
/// * `Err` - If a file exists but cannot be read or parsed
pub fn load_config(config_path: Option<&Path>, project_root: &Path) -> Result<Config> {
    let path = match config_path {
        Some(path) => {
            if !path.exists() {
                return Err(PdgError::config(format!(
                    "Config file not found: {}",
                    path.display()
                )));
            }
            Some(path.to_path_buf())
        }
        None => candidate_paths(project_root)
            .into_iter()
            .find(|candidate| candidate.is_file()),
    };

    match path {
        Some(path) => {
            tracing::debug!(path = %path.display(), "loading configuration");
            let text = fs::read_to_string(&path)?;
            Config::from_toml(&text).map_err(|e| {
                PdgError::config(format!("{}: {}", path.display(), e))
            })
        }
        None => Ok(Config::default()),
    }
}

fn candidate_paths(project_root: &Path) -> Vec<PathBuf> {
    let mut paths = vec![project_root.join(CONFIG_FILE_NAME)];
    if let Some(config_dir) = dirs::config_dir() {
        paths.push(config_dir.join("pdg").join(CONFIG_FILE_NAME));
    }
    paths
}
