//! Default configuration values and tool vocabulary
//!
//! The argument and environment variable names below form the de facto
//! protocol between this driver and the cmake/ctest executables.

/// Environment variable supplying extra configure flags (whitespace separated)
pub const EXTRA_FLAGS_ENV: &str = "CMAKE_ARGS";

/// Environment variable supplying default build parallelism
pub const BUILD_JOBS_ENV: &str = "CMAKE_BUILD_PARALLEL_LEVEL";

/// Environment variable supplying default test parallelism
pub const TEST_JOBS_ENV: &str = "CTEST_PARALLEL_LEVEL";

/// Configure-time cache flags injected in test mode
pub const TEST_MODE_CONFIGURE_FLAGS: &[&str] = &[
    "-DBUILD_TESTING=ON",
    "-DCMAKE_SKIP_INSTALL_RULES=ON",
    "-DCMAKE_SKIP_INSTALL_ALL_DEPENDENCY=ON",
];

/// Captured output limit for failed tests, in bytes
pub const TEST_OUTPUT_SIZE_FAILED: u32 = 10_000;

/// Truncation strategy for over-long failed test output
pub const TEST_OUTPUT_TRUNCATION: &str = "middle";

/// Flag passed to the installed probe executable during install verification
pub const PROBE_FLAG: &str = "--version";
