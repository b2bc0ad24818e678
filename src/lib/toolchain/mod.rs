//! The toolchain invoker: drives the external compiler driver once per target
pub mod environment;

use std::fs;
use std::io;

use color_eyre::eyre::{Context, Result};

use crate::cli::output::executors::{self, EnvVars, Invocation, ProcessRunner};
use crate::compiler::Resolution;
use crate::domain::commands::command_lines::TargetCommandLine;
use crate::domain::errors::BuildError;
use crate::domain::report::BuiltTarget;
use crate::project_model::target::BuildTarget;
use crate::project_model::ForgeModel;
use crate::utils::constants::error_messages;

/// Issues one blocking compile-and-link invocation per applicable target.
///
/// The native build environment is established lazily, right before the first
/// invocation, and reused by every other target of the same session
pub struct ToolchainInvoker<'m, 'a> {
    model: &'m ForgeModel<'a>,
    runner: &'m dyn ProcessRunner,
    env: Option<EnvVars>,
}

impl<'m, 'a> ToolchainInvoker<'m, 'a> {
    pub fn new(model: &'m ForgeModel<'a>, runner: &'m dyn ProcessRunner) -> Self {
        Self {
            model,
            runner,
            env: None,
        }
    }

    /// Loads the build environment the first time that it's requested
    pub fn environment(&mut self) -> Result<&EnvVars> {
        if self.env.is_none() {
            let env = environment::load_build_environment(self.model, self.runner)?;
            self.env = Some(env);
        }
        Ok(self.env.get_or_insert_with(EnvVars::new))
    }

    /// Builds every applicable target, in declaration order, aborting on the
    /// first failure
    pub fn compile_all(
        &mut self,
        resolved: &[(&BuildTarget, Resolution)],
    ) -> Result<Vec<BuiltTarget>> {
        let mut built = Vec::with_capacity(resolved.len());

        for (target, resolution) in resolved {
            match resolution.command_line() {
                Some(cmd) => built.push(self.compile(cmd)?),
                None => log::warn!(
                    "Skipping target: {}, it's not applicable on {}",
                    target.name,
                    self.model.platform
                ),
            }
        }

        Ok(built)
    }

    /// Compiles and links a single target. A non zero exit code, or a missing
    /// or empty output binary, is a [`BuildError::CompilationFailed`]
    pub fn compile(&mut self, cmd: &TargetCommandLine) -> Result<BuiltTarget> {
        let env = self.environment()?.clone();
        let model = self.model;
        let platform = model.platform;
        let output_dir = &model.build.output_dir;
        let driver = model.toolchain.driver.as_ref();

        log::info!("Compiling target: {}", cmd.target);

        match fs::remove_file(&cmd.output) {
            Err(e) if e.kind() != io::ErrorKind::NotFound => {
                return Err(e).with_context(|| {
                    format!("Unable to remove the previous binary: {:?}", cmd.output)
                })
            }
            _ => {}
        }

        let invocation = Invocation::new(driver)
            .args(executors::os_args(cmd.driver_args(platform).iter()))
            .current_dir(output_dir)
            .envs(&env);

        let output = self
            .runner
            .run(&invocation)
            .with_context(|| format!("Unable to launch the compiler driver: {driver}"))?;
        executors::log_process_output(driver, &output);

        if !output.success() {
            return Err(BuildError::CompilationFailed {
                target: cmd.target.to_string(),
                reason: format!("the toolchain exited with code {:?}", output.exit_code),
            }
            .into());
        }

        let produced = fs::metadata(&cmd.output)
            .map(|metadata| metadata.is_file() && metadata.len() > 0)
            .unwrap_or(false);
        if !produced {
            return Err(BuildError::CompilationFailed {
                target: cmd.target.to_string(),
                reason: format!(
                    "the toolchain reported success but {:?} is missing or empty",
                    cmd.output
                ),
            }
            .into());
        }

        log::debug!("Target: {} built at {:?}", cmd.target, cmd.output);
        Ok(BuiltTarget {
            name: cmd.target.to_string(),
            output: cmd.output.clone(),
        })
    }
}

/// Convenience wrapper that runs the whole compile stage with a fresh session
pub fn compile_targets(
    model: &ForgeModel,
    runner: &dyn ProcessRunner,
    resolved: &[(&BuildTarget, Resolution)],
) -> Result<Vec<BuiltTarget>> {
    ToolchainInvoker::new(model, runner)
        .compile_all(resolved)
        .with_context(|| error_messages::FAILURE_COMPILING_TARGETS)
}
