//! Build command implementation
//!
//! Implements `buildpilot build`: configure and build, nothing else.

use anyhow::{Context, Result};

use super::PipelineArgs;
use crate::cli::output::status;
use crate::core::config::{BuildConfig, Mode};
use crate::core::pipeline::BuildPipeline;

/// Execute the build command
pub fn execute(args: PipelineArgs) -> Result<()> {
    let config = BuildConfig::new(args.into_options(Mode::BuildOnly))
        .context("Invalid pipeline configuration")?;

    let mut pipeline = BuildPipeline::new(config);
    pipeline.configure()?;
    pipeline.build()?;

    println!("{} Build complete", status::SUCCESS);
    Ok(())
}
