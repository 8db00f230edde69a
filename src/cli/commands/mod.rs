//! CLI command implementations
//!
//! Each command is implemented in its own submodule. The commands map
//! one-to-one onto the pipeline modes and differ only in which stage
//! sequence they drive.

pub mod build;
pub mod install;

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};

use crate::core::config::{BuildType, ConfigOptions, Generator, Mode};

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Configure and build
    Build {
        #[command(flatten)]
        args: PipelineArgs,
    },

    /// Configure, build, and run the test suite
    Test {
        #[command(flatten)]
        args: PipelineArgs,

        /// Path to the ctest executable (searched on PATH if not given)
        #[arg(long, value_name = "PATH")]
        ctest: Option<PathBuf>,
    },

    /// Configure, build, install, and verify the install
    Install {
        #[command(flatten)]
        args: PipelineArgs,

        /// Name of the installed executable probed after install
        #[arg(long)]
        probe: String,
    },
}

impl Commands {
    /// Execute the command
    pub fn run(self) -> Result<()> {
        match self {
            Commands::Build { args } => build::execute(args),
            Commands::Test { args, ctest } => test::execute(args, ctest),
            Commands::Install { args, probe } => install::execute(args, probe),
        }
    }
}

/// Arguments shared by all pipeline commands
#[derive(Args, Debug)]
pub struct PipelineArgs {
    /// CMake source directory
    #[arg(short = 'S', long, default_value = ".")]
    pub source_dir: PathBuf,

    /// Build directory
    #[arg(short = 'B', long, default_value = "build")]
    pub build_dir: PathBuf,

    /// Install prefix directory (must not contain or be contained by the
    /// build directory)
    #[arg(long, default_value = "install")]
    pub install_dir: PathBuf,

    /// Build type to drive (repeatable with multi-configuration generators)
    #[arg(short = 't', long = "build-type", value_enum)]
    pub build_types: Vec<BuildType>,

    /// Generator flavor of the underlying backend (platform default if not
    /// given)
    #[arg(long, value_enum)]
    pub generator: Option<Generator>,

    /// Remove an existing non-empty build directory before configuring
    #[arg(short, long)]
    pub force: bool,

    /// Path to the cmake executable (searched on PATH if not given)
    #[arg(long, value_name = "PATH")]
    pub cmake: Option<PathBuf>,

    /// Shared build and test parallelism
    #[arg(short, long, conflicts_with_all = ["build_jobs", "test_jobs"])]
    pub jobs: Option<usize>,

    /// Build parallelism (defaults to CMAKE_BUILD_PARALLEL_LEVEL, then the
    /// processor count)
    #[arg(long)]
    pub build_jobs: Option<usize>,

    /// Test parallelism (defaults to CTEST_PARALLEL_LEVEL, then the
    /// processor count)
    #[arg(long)]
    pub test_jobs: Option<usize>,

    /// Extra configure flags, passed through verbatim after --
    #[arg(last = true)]
    pub extra_flags: Vec<String>,
}

impl PipelineArgs {
    /// Turn parsed arguments into unvalidated configuration input
    pub fn into_options(self, mode: Mode) -> ConfigOptions {
        ConfigOptions {
            source_dir: self.source_dir,
            build_dir: self.build_dir,
            install_dir: self.install_dir,
            mode,
            build_types: self.build_types,
            generator: self.generator,
            extra_flags: self.extra_flags,
            force: self.force,
            cmake: self.cmake,
            ctest: None,
            jobs: self.jobs,
            build_jobs: self.build_jobs,
            test_jobs: self.test_jobs,
            probe: None,
        }
    }
}
