//! Command-line surface: argument definitions and root resolution.
//!
//! Handlers live in [orchestration]; `main` only parses, sets up logging and
//! dispatches.

pub mod orchestration;

use crate::domain::VersionBump;
use crate::git_ops;
use crate::toolchain::BuildType;
use clap::{Parser, Subcommand, ValueEnum};
use std::path::{Path, PathBuf};

#[derive(Parser, Debug)]
#[command(
    name = "pdg",
    about = "Unified build system for the desktop app: build, test, lint and release",
    version
)]
pub struct Cli {
    /// Project root (default: the enclosing git checkout)
    #[arg(long, global = true, env = "PDG_ROOT")]
    pub root: Option<PathBuf>,

    /// Custom configuration file path
    #[arg(short = 'C', long, global = true, env = "PDG_CONFIG")]
    pub config: Option<PathBuf>,

    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum BuildTarget {
    Backend,
    Frontend,
    All,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum TestTarget {
    Backend,
    Frontend,
}

#[derive(Subcommand, Debug, PartialEq)]
pub enum Commands {
    /// Build the project
    #[command(visible_alias = "b")]
    Build {
        /// Build target
        #[arg(value_enum, default_value_t = BuildTarget::All)]
        target: BuildTarget,

        /// Clean build (rebuild everything, reinstall frontend dependencies)
        #[arg(short, long)]
        clean: bool,

        /// Build type for the backend
        #[arg(short = 't', long = "type", value_enum, default_value_t = BuildType::Release)]
        build_type: BuildType,
    },

    /// Backend Debug build (shortcut for `build backend --type Debug`)
    Debug {
        /// Clean build
        #[arg(short, long)]
        clean: bool,
    },

    /// Run tests
    #[command(visible_alias = "t")]
    Test {
        /// Test target
        #[arg(value_enum, default_value_t = TestTarget::Frontend)]
        target: TestTarget,

        /// Watch mode (frontend only)
        #[arg(short, long)]
        watch: bool,

        /// Build type for backend tests
        #[arg(short = 't', long = "type", value_enum, default_value_t = BuildType::Release)]
        build_type: BuildType,
    },

    /// Lint frontend and C++ code
    #[command(visible_alias = "l")]
    Lint {
        /// Auto-fix issues
        #[arg(short, long)]
        fix: bool,

        /// Apply unsafe fixes (requires --fix)
        #[arg(short, long = "unsafe")]
        unsafe_fixes: bool,
    },

    /// Start the frontend development server
    #[command(visible_alias = "d")]
    Dev,

    /// Create a versioned release
    #[command(visible_alias = "r")]
    Release(ReleaseArgs),

    /// Run lint, frontend tests and a full build
    #[command(visible_alias = "c")]
    Check {
        /// Build type
        #[arg(value_enum, default_value_t = BuildType::Release)]
        build_type: BuildType,
    },
}

#[derive(clap::Args, Debug, Clone, PartialEq, Default)]
pub struct ReleaseArgs {
    /// Version (e.g. 1.2.1); detected from git tags when omitted
    pub version: Option<String>,

    /// Version bump type (default from config, normally patch)
    #[arg(long, value_enum)]
    pub bump: Option<VersionBump>,

    /// Mark the GitHub release as a draft
    #[arg(long)]
    pub draft: bool,

    /// Skip lint and test checks
    #[arg(long)]
    pub skip_checks: bool,

    /// Show the version and notes without building or writing files
    #[arg(long)]
    pub dry_run: bool,
}

/// Resolve the project root.
///
/// An explicit root wins; otherwise the git checkout containing `cwd`, or
/// `cwd` itself outside any checkout.
pub fn resolve_root(explicit: Option<&Path>, cwd: &Path) -> PathBuf {
    match explicit {
        Some(root) => root.to_path_buf(),
        None => git_ops::discover_project_root(cwd),
    }
}
