//! Build pipeline state machine
//!
//! [`BuildPipeline`] drives an external CMake project through the fixed
//! sequence configure -> build -> test-or-install. Every operation checks
//! the current stage before doing anything; calling one out of order or in
//! the wrong mode is a caller bug and panics. Reported errors are reserved
//! for the world misbehaving: a dirty build directory or a failing
//! external command.
//!
//! Invocations are strictly sequential and blocking. Build types are
//! driven one at a time, in ascending order, and the first non-zero exit
//! stops the pipeline with the stage unchanged.

use std::ffi::OsString;

use crate::config::defaults;
use crate::core::config::{BuildConfig, BuildType, Generator, Mode};
use crate::core::jobs;
use crate::error::PipelineError;
use crate::infra::{filesystem, process};

/// Position in the one-way stage sequence
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    /// Nothing has run yet
    None,
    /// Configure completed
    Configured,
    /// All build types built
    Built,
    /// Test suite passed for all build types
    Tested,
    /// All build types installed
    Installed,
    /// Installed product answered the smoke probe
    InstallVerified,
}

/// One-shot pipeline over a validated [`BuildConfig`].
///
/// Created, run through its stages, and discarded; there is no reuse and
/// no way to revisit a stage.
#[derive(Debug)]
pub struct BuildPipeline {
    config: BuildConfig,
    stage: Stage,
}

impl BuildPipeline {
    /// Create a fresh pipeline at stage [`Stage::None`]
    pub fn new(config: BuildConfig) -> Self {
        Self {
            config,
            stage: Stage::None,
        }
    }

    /// Current stage
    pub fn stage(&self) -> Stage {
        self.stage
    }

    /// The configuration this pipeline runs under
    pub fn config(&self) -> &BuildConfig {
        &self.config
    }

    /// Run the configure step.
    ///
    /// An existing non-empty build directory is a conflict unless `force`
    /// was requested, in which case it is removed first. The conflict is
    /// detected before any external process is spawned.
    pub fn configure(&mut self) -> Result<(), PipelineError> {
        assert_eq!(
            self.stage,
            Stage::None,
            "configure called on a pipeline that already ran"
        );

        let build_dir = self.config.build_dir();
        if build_dir.exists() && !filesystem::is_empty_dir(build_dir)? {
            if !self.config.force() {
                return Err(PipelineError::DirectoryConflict {
                    path: build_dir.to_path_buf(),
                });
            }
            tracing::info!("forcefully removing {}", build_dir.display());
            filesystem::remove_dir_all(build_dir)?;
        }

        tracing::info!("using build dir {}", build_dir.display());
        let args = self.configure_args();
        process::run(self.config.cmake_path(), &args, None, None)?;
        self.stage = Stage::Configured;
        Ok(())
    }

    /// Build every configured build type, in ascending order.
    pub fn build(&mut self) -> Result<(), PipelineError> {
        assert_eq!(
            self.stage,
            Stage::Configured,
            "build requires a configured pipeline"
        );

        let jobs = jobs::resolve(self.config.build_jobs(), defaults::BUILD_JOBS_ENV)?;
        for bt in self.config.build_types() {
            let args = self.build_args(jobs, *bt);
            process::run(self.config.cmake_path(), &args, None, None)?;
        }
        self.stage = Stage::Built;
        Ok(())
    }

    /// Run the test suite for every build type, from the build directory.
    pub fn run_tests(&mut self) -> Result<(), PipelineError> {
        assert_eq!(
            self.config.mode(),
            Mode::Ctest,
            "run_tests is only legal in ctest mode"
        );
        assert_eq!(self.stage, Stage::Built, "run_tests requires a built pipeline");

        let jobs = jobs::resolve(self.config.test_jobs(), defaults::TEST_JOBS_ENV)?;
        let ctest = self
            .config
            .ctest_path()
            .expect("ctest is resolved in ctest mode");
        for bt in self.config.build_types() {
            let args = self.test_args(jobs, *bt);
            process::run(ctest, &args, Some(self.config.build_dir()), None)?;
        }
        self.stage = Stage::Tested;
        Ok(())
    }

    /// Install every build type into the install prefix.
    pub fn install(&mut self) -> Result<(), PipelineError> {
        assert_eq!(
            self.config.mode(),
            Mode::InstallTest,
            "install is only legal in installtest mode"
        );
        assert_eq!(self.stage, Stage::Built, "install requires a built pipeline");

        for bt in self.config.build_types() {
            let args = self.install_args(*bt);
            process::run(self.config.cmake_path(), &args, None, None)?;
        }
        self.stage = Stage::Installed;
        Ok(())
    }

    /// Smoke-test the installed product by asking it to report on itself.
    ///
    /// TODO: exercise the installed artifacts beyond the probe invocation
    /// once the installed layout is specified.
    pub fn verify_install(&mut self) -> Result<(), PipelineError> {
        assert_eq!(
            self.config.mode(),
            Mode::InstallTest,
            "verify_install is only legal in installtest mode"
        );
        assert_eq!(
            self.stage,
            Stage::Installed,
            "verify_install requires an installed pipeline"
        );

        let probe = self
            .config
            .install_dir()
            .join("bin")
            .join(self.config.probe().expect("probe is required in installtest mode"));
        process::run(&probe, &[OsString::from(defaults::PROBE_FLAG)], None, None)?;
        self.stage = Stage::InstallVerified;
        Ok(())
    }

    fn configure_args(&self) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            OsString::from("-S"),
            self.config.source_dir().as_os_str().to_owned(),
            OsString::from("-B"),
            self.config.build_dir().as_os_str().to_owned(),
        ];
        args.extend(self.config.extra_flags().iter().map(OsString::from));

        match self.config.mode() {
            Mode::InstallTest => {
                args.push(OsString::from(format!(
                    "-DCMAKE_INSTALL_PREFIX={}",
                    self.config.install_dir().display()
                )));
            }
            Mode::Ctest => {
                args.extend(
                    defaults::TEST_MODE_CONFIGURE_FLAGS
                        .iter()
                        .map(OsString::from),
                );
            }
            Mode::BuildOnly => {}
        }

        if self.config.generator() == Generator::Single {
            let bt = self
                .config
                .build_types()
                .iter()
                .next()
                .expect("build types are never empty");
            args.push(OsString::from(format!(
                "-DCMAKE_BUILD_TYPE={}",
                bt.cmake_name()
            )));
        }
        args
    }

    fn build_args(&self, jobs: usize, bt: BuildType) -> Vec<OsString> {
        vec![
            OsString::from("--build"),
            self.config.build_dir().as_os_str().to_owned(),
            OsString::from("--parallel"),
            OsString::from(jobs.to_string()),
            OsString::from("--config"),
            OsString::from(bt.cmake_name()),
        ]
    }

    fn test_args(&self, jobs: usize, bt: BuildType) -> Vec<OsString> {
        vec![
            OsString::from("--output-on-failure"),
            OsString::from("--test-output-size-failed"),
            OsString::from(defaults::TEST_OUTPUT_SIZE_FAILED.to_string()),
            OsString::from("--test-output-truncation"),
            OsString::from(defaults::TEST_OUTPUT_TRUNCATION),
            OsString::from("--parallel"),
            OsString::from(jobs.to_string()),
            OsString::from("--build-config"),
            OsString::from(bt.cmake_name()),
        ]
    }

    fn install_args(&self, bt: BuildType) -> Vec<OsString> {
        vec![
            OsString::from("--install"),
            self.config.build_dir().as_os_str().to_owned(),
            OsString::from("--config"),
            OsString::from(bt.cmake_name()),
        ]
    }
}
