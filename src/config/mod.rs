//! Constants and environment variable names

pub mod defaults;
