//! Install command implementation
//!
//! Implements `buildpilot install`: configure with an install prefix,
//! build, install per build type, then smoke-test the installed product.

use anyhow::{Context, Result};

use super::PipelineArgs;
use crate::cli::output::status;
use crate::core::config::{BuildConfig, Mode};
use crate::core::pipeline::BuildPipeline;

/// Execute the install command
pub fn execute(args: PipelineArgs, probe: String) -> Result<()> {
    let mut opts = args.into_options(Mode::InstallTest);
    opts.probe = Some(probe);
    let config = BuildConfig::new(opts).context("Invalid pipeline configuration")?;

    let mut pipeline = BuildPipeline::new(config);
    pipeline.configure()?;
    pipeline.build()?;
    pipeline.install()?;
    pipeline.verify_install()?;

    println!("{} Install verified", status::SUCCESS);
    Ok(())
}
