use crate::error::{PdgError, Result};
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};
use std::process::{Command, Stdio};

/// Runs commands as real child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemRunner;

impl SystemRunner {
    pub fn new() -> Self {
        SystemRunner
    }

    fn command(spec: &CommandSpec) -> Command {
        let mut cmd = Command::new(&spec.program);
        cmd.args(&spec.args);
        if let Some(dir) = &spec.cwd {
            cmd.current_dir(dir);
        }
        cmd
    }
}

impl CommandRunner for SystemRunner {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        tracing::debug!(command = %spec, cwd = ?spec.cwd, "capturing command output");

        let output = Self::command(spec)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| PdgError::spawn(spec.program.clone(), e))?;

        // git and friends emit UTF-8; anything else is replaced rather than rejected
        let result = CommandOutput {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        };

        tracing::debug!(command = %spec, code = ?result.code, "command finished");
        Ok(result)
    }

    fn status(&self, spec: &CommandSpec) -> Result<bool> {
        tracing::debug!(command = %spec, cwd = ?spec.cwd, "running command");

        let status = Self::command(spec)
            .status()
            .map_err(|e| PdgError::spawn(spec.program.clone(), e))?;

        tracing::debug!(command = %spec, code = ?status.code(), "command finished");
        Ok(status.success())
    }
}
