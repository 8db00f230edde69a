//! Core pipeline logic
//!
//! Configuration validation, parallelism policy, and the stage machine
//! that sequences the external cmake/ctest invocations.

pub mod config;
pub mod jobs;
pub mod pipeline;
