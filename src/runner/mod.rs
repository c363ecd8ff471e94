//! Subprocess execution abstraction layer
//!
//! Every toolchain invocation in pdg goes through the [CommandRunner] trait,
//! so the release and build logic can be exercised against scripted output.
//!
//! - [system::SystemRunner]: spawns real processes with `std::process::Command`
//! - [mock::MockRunner]: replays canned output and records every call
//!
//! ```rust
//! # use pdg::runner::{CommandRunner, CommandSpec};
//! # fn example<R: CommandRunner>(runner: &R) -> pdg::Result<()> {
//! let out = runner.output(&CommandSpec::new("git").args(["tag", "--sort=-v:refname"]))?;
//! if out.success() {
//!     println!("{}", out.stdout);
//! }
//! # Ok(())
//! # }
//! ```

pub mod mock;
pub mod system;

pub use mock::MockRunner;
pub use system::SystemRunner;

use crate::error::Result;
use crate::ui;
use std::ffi::OsStr;
use std::fmt;
use std::path::{Path, PathBuf};

/// A program invocation: program, arguments and working directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: String,
    pub args: Vec<String>,
    pub cwd: Option<PathBuf>,
}

impl CommandSpec {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        CommandSpec {
            program: program.as_ref().to_string_lossy().into_owned(),
            args: Vec::new(),
            cwd: None,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn cwd(mut self, dir: impl AsRef<Path>) -> Self {
        self.cwd = Some(dir.as_ref().to_path_buf());
        self
    }

    /// Program file name without directories, for short messages
    pub fn program_name(&self) -> String {
        Path::new(&self.program)
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| self.program.clone())
    }

    /// `program arg1 arg2` as a single line, used as the lookup key by [MockRunner]
    pub fn command_line(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.command_line())
    }
}

/// Captured result of a finished process
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code; `None` when the process was killed by a signal
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn new(code: i32, stdout: impl Into<String>) -> Self {
        CommandOutput {
            code: Some(code),
            stdout: stdout.into(),
            stderr: String::new(),
        }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

/// Runs external programs
///
/// All methods block until the child exits. There is no timeout.
pub trait CommandRunner {
    /// Run `spec` with stdout/stderr captured.
    ///
    /// # Returns
    /// * `Ok(CommandOutput)` - The process ran (whatever its exit code)
    /// * `Err(PdgError::Spawn)` - The process could not be started
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput>;

    /// Run `spec` attached to the terminal and report whether it exited 0.
    fn status(&self, spec: &CommandSpec) -> Result<bool>;
}

impl<R: CommandRunner + ?Sized> CommandRunner for &R {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        (**self).output(spec)
    }

    fn status(&self, spec: &CommandSpec) -> Result<bool> {
        (**self).status(spec)
    }
}

/// Run a visible build step: print a banner, stream the child's output, report success.
///
/// A program that cannot be started is reported and counts as a failed step.
pub fn run_step<R: CommandRunner + ?Sized>(runner: &R, spec: &CommandSpec, description: &str) -> bool {
    ui::display_command_banner(description, spec);

    match runner.status(spec) {
        Ok(success) => {
            if !success {
                tracing::warn!(command = %spec, "step '{}' exited with failure", description);
            }
            success
        }
        Err(e) if e.is_not_found() => {
            ui::display_error(&format!("Command not found: {}", spec.program));
            ui::display_detail(&format!("Details: {}", e));
            false
        }
        Err(e) => {
            ui::display_error(&format!("Failed to execute command: {}", e));
            false
        }
    }
}
