//! Thin wrappers around the external toolchains.
//!
//! Each operation builds a command line, runs it through a [CommandRunner],
//! prints human-readable status and reports success as a `bool`. Failures are
//! shown to the user as they happen, so callers only need the outcome.

pub mod build;
pub mod lint;
pub mod package_manager;

pub use package_manager::{PackageManager, PackageManagerKind};

use crate::config::Config;
use crate::runner::CommandRunner;
use std::fmt;
use std::path::{Path, PathBuf};

/// CMake build configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, clap::ValueEnum)]
pub enum BuildType {
    #[value(name = "Debug")]
    Debug,
    #[default]
    #[value(name = "Release")]
    Release,
}

impl BuildType {
    pub fn as_str(&self) -> &'static str {
        match self {
            BuildType::Debug => "Debug",
            BuildType::Release => "Release",
        }
    }
}

impl fmt::Display for BuildType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Looks up an executable by name; `None` when it is not installed.
pub type Locator = fn(&str) -> Option<PathBuf>;

/// Default [Locator]: search `PATH`
pub fn which_locator(name: &str) -> Option<PathBuf> {
    which::which(name).ok()
}

/// Project root plus configuration
#[derive(Debug, Clone)]
pub struct Project {
    pub root: PathBuf,
    pub config: Config,
}

impl Project {
    pub fn new(root: impl Into<PathBuf>, config: Config) -> Self {
        Project {
            root: root.into(),
            config,
        }
    }

    pub fn frontend_dir(&self) -> PathBuf {
        self.config.frontend_dir(&self.root)
    }

    pub fn build_dir(&self) -> PathBuf {
        self.config.build_dir(&self.root)
    }

    /// `path` relative to the project root when possible, for display
    pub fn relative<'p>(&self, path: &'p Path) -> &'p Path {
        path.strip_prefix(&self.root).unwrap_or(path)
    }
}

/// Everything a toolchain operation needs: how to run programs, how to find
/// them, and which project to run them in.
pub struct Toolchain<'a, R: CommandRunner + ?Sized> {
    pub runner: &'a R,
    pub project: &'a Project,
    pub locate: Locator,
}

impl<'a, R: CommandRunner + ?Sized> Toolchain<'a, R> {
    pub fn new(runner: &'a R, project: &'a Project) -> Self {
        Toolchain {
            runner,
            project,
            locate: which_locator,
        }
    }

    /// Replace the executable lookup (tests use a fixed table)
    pub fn with_locator(mut self, locate: Locator) -> Self {
        self.locate = locate;
        self
    }
}
