//! The post-compile hook runner.
//!
//! A hook runs once, after every applicable target is compiled and every data
//! directory is staged, and before anything gets deployed. Projects choose the
//! hook on their configuration file; the pipeline only knows the
//! [`PostCompileHook`] contract
pub mod shader;

use std::path::PathBuf;

use color_eyre::eyre::{ContextCompat, Result};

use crate::cli::output::executors::ProcessRunner;
use crate::domain::errors::AssetTranscodeFailed;
use crate::domain::report::BuiltTarget;
use crate::project_model::platform::Platform;
use crate::project_model::post_compile::PostCompileModel;
use crate::project_model::ForgeModel;
use crate::utils::constants::error_messages;

use self::shader::ShaderTranscodeHook;

/// The resolved locations that a hook receives
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPaths {
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
    pub platform: Platform,
    pub built_targets: Vec<BuiltTarget>,
}

/// A project supplied asset processing step.
///
/// An `Err` aborts the pipeline. Failures that only affect a single asset must
/// be handed back on the returned list instead, so the remaining assets still
/// get processed
pub trait PostCompileHook {
    fn name(&self) -> &str;

    fn run(
        &self,
        paths: &ResolvedPaths,
        runner: &dyn ProcessRunner,
    ) -> Result<Vec<AssetTranscodeFailed>>;
}

/// The hook of the projects that don't declare one
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopHook;

impl PostCompileHook for NoopHook {
    fn name(&self) -> &str {
        "none"
    }

    fn run(&self, _: &ResolvedPaths, _: &dyn ProcessRunner) -> Result<Vec<AssetTranscodeFailed>> {
        Ok(Vec::with_capacity(0))
    }
}

/// Instantiates the hook declared on the project model
pub fn from_model(model: &ForgeModel) -> Result<Box<dyn PostCompileHook>> {
    match &model.post_compile {
        PostCompileModel::None => Ok(Box::new(NoopHook)),
        PostCompileModel::ShaderTranscode {
            dir,
            extensions,
            output_suffix,
            compiler_args,
        } => {
            let asset_compiler = model
                .toolchain
                .asset_compiler
                .as_ref()
                .with_context(|| error_messages::MISSING_ASSET_COMPILER)?;

            Ok(Box::new(ShaderTranscodeHook {
                asset_compiler: asset_compiler.clone(),
                dir: dir.clone(),
                extensions: extensions.iter().map(|ext| ext.to_string()).collect(),
                output_suffix: output_suffix.to_string(),
                compiler_args: compiler_args.iter().map(|arg| arg.to_string()).collect(),
            }))
        }
    }
}
