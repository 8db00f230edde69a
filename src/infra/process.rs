//! External process invocation
//!
//! Runs a command with inherited standard streams so the output of
//! long-running build and test tools stays visible as it is produced.
//! Nothing is captured or buffered; the only observed result is the exit
//! status. A failed command is never retried here.

use std::collections::HashMap;
use std::ffi::OsString;
use std::path::Path;
use std::process::Command;

use crate::error::PipelineError;

/// Run an external command to completion, blocking the caller.
///
/// `cwd` overrides the working directory and `env` adds variables on top of
/// the inherited environment. Returns `Ok(())` on exit code 0 and
/// [`PipelineError::CommandFailed`] carrying the rendered command line on
/// any non-zero exit.
pub fn run(
    program: &Path,
    args: &[OsString],
    cwd: Option<&Path>,
    env: Option<&HashMap<String, String>>,
) -> Result<(), PipelineError> {
    let rendered = render_command(program, args);

    let mut cmd = Command::new(program);
    cmd.args(args);
    if let Some(dir) = cwd {
        cmd.current_dir(dir);
    }
    if let Some(vars) = env {
        cmd.envs(vars);
    }

    tracing::info!("launching: {rendered}");

    let status = cmd.status().map_err(|e| PipelineError::Spawn {
        command: rendered.clone(),
        error: e.to_string(),
    })?;

    if status.success() {
        Ok(())
    } else {
        Err(PipelineError::CommandFailed { command: rendered })
    }
}

/// Render a command line for log and error messages
fn render_command(program: &Path, args: &[OsString]) -> String {
    let mut parts = vec![program.display().to_string()];
    parts.extend(args.iter().map(|a| a.to_string_lossy().into_owned()));
    parts.join(" ")
}
