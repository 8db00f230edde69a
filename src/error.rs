//! Error types for buildpilot
//!
//! Domain-specific error types using thiserror.
//!
//! Stage-ordering and mode violations are deliberately absent here: calling
//! a pipeline operation from the wrong stage is a caller bug and panics
//! instead of returning an error.

use std::path::PathBuf;
use thiserror::Error;

/// Configuration construction errors
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Build and install directories overlap
    #[error("Build dir '{build_dir}' and install dir '{install_dir}' must not contain one another")]
    DirectoryOverlap {
        build_dir: PathBuf,
        install_dir: PathBuf,
    },

    /// Single-configuration generator with more than one build type
    #[error("A single-configuration generator supports exactly one build type, got {count}")]
    SingleGeneratorBuildTypes { count: usize },

    /// External tool could not be resolved
    #[error("Tool not found: {tool}")]
    ToolNotFound { tool: String },

    /// Install verification needs the name of the installed probe executable
    #[error("Install testing requires the name of the installed probe executable")]
    MissingProbe,

    /// Current directory could not be determined while absolutizing paths
    #[error("Failed to resolve current directory: {error}")]
    CurrentDir { error: String },
}

/// Filesystem errors
#[derive(Error, Debug)]
pub enum FilesystemError {
    /// Failed to remove directory
    #[error("Failed to remove directory '{path}': {error}")]
    RemoveDir { path: PathBuf, error: String },

    /// Failed to read directory
    #[error("Failed to read directory '{path}': {error}")]
    ReadDir { path: PathBuf, error: String },
}

/// Pipeline stage errors
#[derive(Error, Debug)]
pub enum PipelineError {
    /// Build directory already exists with content and force was not requested
    #[error("Build dir already exists and is not empty: {path}. Use --force to remove it first")]
    DirectoryConflict { path: PathBuf },

    /// External command exited with non-zero status
    #[error("Command failed: {command}")]
    CommandFailed { command: String },

    /// External command could not be launched at all
    #[error("Failed to launch '{command}': {error}")]
    Spawn { command: String, error: String },

    /// Parallelism environment variable is not a non-negative integer
    #[error("Environment variable {var} must be a non-negative integer, got '{value}'")]
    InvalidJobs { var: String, value: String },

    /// Filesystem error
    #[error("Filesystem error: {0}")]
    Filesystem(#[from] FilesystemError),
}
