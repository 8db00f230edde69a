//! Common test utilities and helpers
//!
//! Integration tests never run the real cmake/ctest. Instead they point
//! the pipeline at small shell scripts that record every invocation
//! (working directory and argument list) into a log file and exit with a
//! controlled status.

#![cfg(unix)]

use std::path::{Path, PathBuf};

/// A fake external tool that logs its invocations
pub struct FakeTool {
    /// Path to the executable script
    pub path: PathBuf,
    /// Path to the invocation log
    pub log: PathBuf,
}

impl FakeTool {
    /// Create a fake tool that always succeeds
    pub fn new(dir: &Path, name: &str) -> Self {
        Self::with_failure(dir, name, None)
    }

    /// Create a fake tool that exits 1 whenever its argument list contains
    /// `fail_pattern`
    pub fn with_failure(dir: &Path, name: &str, fail_pattern: Option<&str>) -> Self {
        use std::os::unix::fs::PermissionsExt;

        let path = dir.join(name);
        let log = dir.join(format!("{name}.log"));
        let fail_clause = match fail_pattern {
            Some(pattern) => format!("case \"$*\" in\n  *{pattern}*) exit 1 ;;\nesac\n"),
            None => String::new(),
        };
        let script = format!(
            "#!/bin/sh\nprintf '%s|%s\\n' \"$PWD\" \"$*\" >> \"{}\"\n{fail_clause}exit 0\n",
            log.display()
        );
        std::fs::write(&path, script).expect("Failed to write fake tool script");

        let mut perms = std::fs::metadata(&path)
            .expect("Failed to stat fake tool")
            .permissions();
        perms.set_mode(0o755);
        std::fs::set_permissions(&path, perms).expect("Failed to mark fake tool executable");

        Self { path, log }
    }

    /// All recorded invocations, one `cwd|args` entry per call
    pub fn invocations(&self) -> Vec<String> {
        if !self.log.exists() {
            return Vec::new();
        }
        std::fs::read_to_string(&self.log)
            .expect("Failed to read fake tool log")
            .lines()
            .map(String::from)
            .collect()
    }

    /// Argument lists of all recorded invocations, in call order
    #[allow(dead_code)]
    pub fn arg_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|line| {
                line.split_once('|')
                    .map(|(_, args)| args.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }

    /// Working directories of all recorded invocations, in call order
    #[allow(dead_code)]
    pub fn cwd_lines(&self) -> Vec<String> {
        self.invocations()
            .iter()
            .map(|line| {
                line.split_once('|')
                    .map(|(cwd, _)| cwd.to_string())
                    .unwrap_or_default()
            })
            .collect()
    }
}
