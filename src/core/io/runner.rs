//! Command runner for external process execution

use crate::core::models::results::{CoreError, CoreResult};
use std::process::{Command, Stdio};
use tracing::debug;

/// Command output
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
}

/// Runs bridge commands and captures their output
#[derive(Debug)]
pub struct CommandRunner;

impl CommandRunner {
    pub fn new() -> Self {
        Self
    }

    /// Run a command and return output
    pub fn run(&self, cmd: &[&str]) -> CoreResult<CommandOutput> {
        if cmd.is_empty() {
            return Err(CoreError::CommandFailed("Empty command".to_string()));
        }

        debug!("[Runner] {}", cmd[0]);
        let output = Command::new(cmd[0])
            .args(&cmd[1..])
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .output()?;

        Ok(CommandOutput {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
        })
    }
}

impl Default for CommandRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_command_rejected() {
        let runner = CommandRunner::new();
        assert!(runner.run(&[]).is_err());
    }

    #[test]
    fn test_run_captures_stdout() {
        let runner = CommandRunner::new();
        let output = runner.run(&["echo", "hello"]).unwrap();
        assert!(output.success);
        assert_eq!(output.stdout.trim(), "hello");
    }
}
