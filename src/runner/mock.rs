use crate::error::{PdgError, Result};
use crate::runner::{CommandOutput, CommandRunner, CommandSpec};
use std::cell::RefCell;
use std::collections::HashMap;

/// Mock runner for testing without spawning processes
///
/// Responses are keyed by [CommandSpec::command_line]. A command with no
/// scripted response behaves like a program that is not installed.
#[derive(Debug, Default)]
pub struct MockRunner {
    outputs: HashMap<String, CommandOutput>,
    statuses: HashMap<String, bool>,
    calls: RefCell<Vec<CommandSpec>>,
}

impl MockRunner {
    /// Create a runner with nothing scripted
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the captured output of `command_line`
    pub fn with_output(mut self, command_line: impl Into<String>, output: CommandOutput) -> Self {
        self.outputs.insert(command_line.into(), output);
        self
    }

    /// Shorthand for an exit code plus stdout
    pub fn with_stdout(
        self,
        command_line: impl Into<String>,
        code: i32,
        stdout: impl Into<String>,
    ) -> Self {
        self.with_output(command_line, CommandOutput::new(code, stdout))
    }

    /// Script the result of an attached (streaming) run
    pub fn with_status(mut self, command_line: impl Into<String>, success: bool) -> Self {
        self.statuses.insert(command_line.into(), success);
        self
    }

    /// Every command run so far, in order
    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }

    /// Command lines run so far, in order
    pub fn command_lines(&self) -> Vec<String> {
        self.calls.borrow().iter().map(CommandSpec::command_line).collect()
    }

    fn record(&self, spec: &CommandSpec) {
        self.calls.borrow_mut().push(spec.clone());
    }

    fn not_found(spec: &CommandSpec) -> PdgError {
        PdgError::spawn(
            spec.program.clone(),
            std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("no scripted response for `{}`", spec),
            ),
        )
    }
}

impl CommandRunner for MockRunner {
    fn output(&self, spec: &CommandSpec) -> Result<CommandOutput> {
        self.record(spec);
        self.outputs
            .get(&spec.command_line())
            .cloned()
            .ok_or_else(|| Self::not_found(spec))
    }

    fn status(&self, spec: &CommandSpec) -> Result<bool> {
        self.record(spec);
        let key = spec.command_line();
        if let Some(success) = self.statuses.get(&key) {
            return Ok(*success);
        }
        // A scripted captured output doubles as a status script
        self.outputs
            .get(&key)
            .map(CommandOutput::success)
            .ok_or_else(|| Self::not_found(spec))
    }
}
