//! Command execution behind a trait seam, so tests can inject a fake.

use crate::error::ExportError;
use std::process::Command;

/// Runs external commands and captures their standard output.
pub trait CommandRunner {
    /// Run a command to completion. A non-zero exit is an error carrying
    /// the tool's stderr.
    fn run(&self, command: &str, args: &[&str]) -> Result<String, ExportError>;
}

/// Runner backed by [`std::process::Command`].
#[derive(Debug, Default)]
pub struct ShellRunner;

impl CommandRunner for ShellRunner {
    fn run(&self, command: &str, args: &[&str]) -> Result<String, ExportError> {
        let output = Command::new(command)
            .args(args)
            .output()
            .map_err(|e| ExportError::Tool(format!("failed to launch {command}: {e}")))?;

        if !output.status.success() {
            return Err(ExportError::Tool(
                String::from_utf8_lossy(&output.stderr).trim().to_string(),
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).to_string())
    }
}
