//! Pipeline configuration
//!
//! [`BuildConfig`] is validated once at construction and immutable
//! afterwards. It owns the tool paths and all policy the pipeline needs, so
//! no stage operation ever consults hidden global state.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use clap::ValueEnum;

use crate::config::defaults;
use crate::error::ConfigError;
use crate::infra::tools;

/// Pipeline mode, deciding which stage operations are legal
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    /// Configure and build only
    BuildOnly,
    /// Configure, build, and run the test suite
    Ctest,
    /// Configure, build, install, and verify the install
    InstallTest,
}

/// Compilation profile driven through the backend.
///
/// The `Ord` derive fixes the iteration order build types are driven in:
/// `Debug < Release < RelWithDebInfo`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, ValueEnum)]
pub enum BuildType {
    /// Unoptimized with debug info
    Debug,
    /// Optimized
    Release,
    /// Optimized with debug info
    #[value(name = "release-with-debug-info", alias = "reldbg")]
    RelWithDebInfo,
}

impl BuildType {
    /// The backend's own name for this build type
    pub fn cmake_name(self) -> &'static str {
        match self {
            Self::Debug => "Debug",
            Self::Release => "Release",
            Self::RelWithDebInfo => "RelWithDebInfo",
        }
    }
}

/// Whether the backend bakes the build type in at configure time (single)
/// or selects it per build/test/install invocation (multi)
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Generator {
    /// Single-configuration backend (Makefiles, Ninja)
    Single,
    /// Multi-configuration backend (Visual Studio, Xcode, Ninja Multi-Config)
    Multi,
}

impl Generator {
    /// Platform default: multi-configuration generators are the norm on
    /// Windows, single-configuration everywhere else.
    pub fn platform_default() -> Self {
        if cfg!(windows) {
            Self::Multi
        } else {
            Self::Single
        }
    }
}

/// Unvalidated configuration input, as collected by the CLI layer
#[derive(Debug)]
pub struct ConfigOptions {
    /// CMake source root
    pub source_dir: PathBuf,
    /// Build directory
    pub build_dir: PathBuf,
    /// Install prefix directory
    pub install_dir: PathBuf,
    /// Pipeline mode
    pub mode: Mode,
    /// Requested build types (empty means release)
    pub build_types: Vec<BuildType>,
    /// Generator flavor (platform default if not given)
    pub generator: Option<Generator>,
    /// Extra configure flags supplied programmatically
    pub extra_flags: Vec<String>,
    /// Remove an existing non-empty build dir before configuring
    pub force: bool,
    /// Explicit cmake path
    pub cmake: Option<PathBuf>,
    /// Explicit ctest path
    pub ctest: Option<PathBuf>,
    /// Shared build and test parallelism
    pub jobs: Option<usize>,
    /// Build parallelism, overrides `jobs`
    pub build_jobs: Option<usize>,
    /// Test parallelism, overrides `jobs`
    pub test_jobs: Option<usize>,
    /// Name of the installed probe executable, required for install testing
    pub probe: Option<String>,
}

/// Validated, immutable pipeline configuration
#[derive(Debug)]
pub struct BuildConfig {
    source_dir: PathBuf,
    build_dir: PathBuf,
    install_dir: PathBuf,
    mode: Mode,
    build_types: BTreeSet<BuildType>,
    generator: Generator,
    extra_flags: Vec<String>,
    force: bool,
    cmake_path: PathBuf,
    ctest_path: Option<PathBuf>,
    build_jobs: Option<usize>,
    test_jobs: Option<usize>,
    probe: Option<String>,
}

impl BuildConfig {
    /// Validate caller input into a usable configuration.
    ///
    /// Paths are absolutized, the build/install non-overlap invariant and
    /// the single-generator arity invariant are enforced, tool paths are
    /// resolved, and the extra configure flags are seeded from the
    /// `CMAKE_ARGS` environment variable with programmatic flags appended
    /// after.
    pub fn new(opts: ConfigOptions) -> Result<Self, ConfigError> {
        let source_dir = absolutize(&opts.source_dir)?;
        let build_dir = absolutize(&opts.build_dir)?;
        let install_dir = absolutize(&opts.install_dir)?;

        if build_dir.starts_with(&install_dir) || install_dir.starts_with(&build_dir) {
            return Err(ConfigError::DirectoryOverlap {
                build_dir,
                install_dir,
            });
        }

        let generator = opts.generator.unwrap_or_else(Generator::platform_default);
        let build_types: BTreeSet<BuildType> = if opts.build_types.is_empty() {
            std::iter::once(BuildType::Release).collect()
        } else {
            opts.build_types.into_iter().collect()
        };
        if generator == Generator::Single && build_types.len() != 1 {
            return Err(ConfigError::SingleGeneratorBuildTypes {
                count: build_types.len(),
            });
        }

        let extra_flags = merge_flags(
            std::env::var(defaults::EXTRA_FLAGS_ENV).ok().as_deref(),
            &opts.extra_flags,
        );

        let cmake_path = tools::resolve(opts.cmake, "cmake")?;
        let ctest_path = if opts.mode == Mode::Ctest {
            Some(tools::resolve(opts.ctest, "ctest")?)
        } else {
            None
        };

        let probe = if opts.mode == Mode::InstallTest {
            Some(opts.probe.ok_or(ConfigError::MissingProbe)?)
        } else {
            opts.probe
        };

        Ok(Self {
            source_dir,
            build_dir,
            install_dir,
            mode: opts.mode,
            build_types,
            generator,
            extra_flags,
            force: opts.force,
            cmake_path,
            ctest_path,
            build_jobs: opts.build_jobs.or(opts.jobs),
            test_jobs: opts.test_jobs.or(opts.jobs),
            probe,
        })
    }

    pub fn source_dir(&self) -> &Path {
        &self.source_dir
    }

    pub fn build_dir(&self) -> &Path {
        &self.build_dir
    }

    pub fn install_dir(&self) -> &Path {
        &self.install_dir
    }

    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Build types in the order they are driven in
    pub fn build_types(&self) -> &BTreeSet<BuildType> {
        &self.build_types
    }

    pub fn generator(&self) -> Generator {
        self.generator
    }

    pub fn extra_flags(&self) -> &[String] {
        &self.extra_flags
    }

    pub fn force(&self) -> bool {
        self.force
    }

    pub fn cmake_path(&self) -> &Path {
        &self.cmake_path
    }

    pub fn ctest_path(&self) -> Option<&Path> {
        self.ctest_path.as_deref()
    }

    pub fn build_jobs(&self) -> Option<usize> {
        self.build_jobs
    }

    pub fn test_jobs(&self) -> Option<usize> {
        self.test_jobs
    }

    pub fn probe(&self) -> Option<&str> {
        self.probe.as_deref()
    }
}

/// Seed configure flags from the environment, programmatic flags after.
///
/// Environment flags come first in position; if the backend treats
/// duplicates as overrides, later flags still win.
fn merge_flags(env_value: Option<&str>, programmatic: &[String]) -> Vec<String> {
    let mut flags: Vec<String> = env_value
        .unwrap_or_default()
        .split_whitespace()
        .map(String::from)
        .collect();
    flags.extend(programmatic.iter().cloned());
    flags
}

fn absolutize(path: &Path) -> Result<PathBuf, ConfigError> {
    if path.is_absolute() {
        Ok(path.to_path_buf())
    } else {
        let cwd = std::env::current_dir().map_err(|e| ConfigError::CurrentDir {
            error: e.to_string(),
        })?;
        Ok(cwd.join(path))
    }
}
