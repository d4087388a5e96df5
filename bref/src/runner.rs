//! Local command execution in the build output directory.
//!
//! Commands run synchronously with no timeout. A non-zero exit is fatal and
//! is never caught below the top level.

use std::path::Path;
use std::process::{Command, Output};

use bref_core::error::BrefError;

/// Run a shell command through `sh -c` in `dir`, capturing output.
pub fn run(command: &str, dir: &Path) -> Result<String, BrefError> {
    tracing::debug!(command, dir = %dir.display(), "Running command");
    let output = Command::new("sh")
        .arg("-c")
        .arg(command)
        .current_dir(dir)
        .output()?;
    collect(command, &output)
}

/// Run a program with a discrete argument list in `dir`. No shell is
/// involved, so no escaping is needed.
pub fn run_args(program: &str, args: &[String], dir: &Path) -> Result<String, BrefError> {
    tracing::debug!(program, ?args, dir = %dir.display(), "Running command");
    let output = Command::new(program)
        .args(args)
        .current_dir(dir)
        .output()?;
    let command = std::iter::once(program.to_string())
        .chain(args.iter().cloned())
        .collect::<Vec<_>>()
        .join(" ");
    collect(&command, &output)
}

fn collect(command: &str, output: &Output) -> Result<String, BrefError> {
    if output.status.success() {
        return Ok(String::from_utf8_lossy(&output.stdout).to_string());
    }
    let mut combined = String::from_utf8_lossy(&output.stdout).to_string();
    combined.push_str(&String::from_utf8_lossy(&output.stderr));
    Err(BrefError::CommandFailed {
        command: command.to_string(),
        code: output.status.code().unwrap_or(-1),
        output: combined,
    })
}
