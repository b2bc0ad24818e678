use std::ffi::OsString;
use std::fs;
use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};

use crate::cli::output::executors::{self, Invocation, ProcessRunner};
use crate::domain::errors::AssetTranscodeFailed;
use crate::hooks::{PostCompileHook, ResolvedPaths};

/// Compiles the shader sources found directly under a staged directory into
/// bytecode, replacing each source file with its compiled form
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderTranscodeHook {
    pub asset_compiler: PathBuf,
    /// Relative to the output directory
    pub dir: PathBuf,
    pub extensions: Vec<String>,
    pub output_suffix: String,
    pub compiler_args: Vec<String>,
}

impl ShaderTranscodeHook {
    fn is_shader_source(&self, path: &Path) -> bool {
        path.file_name()
            .and_then(|name| name.to_str())
            .map(|name| self.extensions.iter().any(|ext| name.ends_with(ext.as_str())))
            .unwrap_or(false)
    }

    fn output_for(&self, input: &Path) -> PathBuf {
        let mut output = OsString::from(input.as_os_str());
        output.push(&self.output_suffix);
        PathBuf::from(output)
    }

    /// Transcodes a single file, deleting its source form only when the asset
    /// compiler succeeds
    fn transcode(
        &self,
        input: &Path,
        runner: &dyn ProcessRunner,
    ) -> std::result::Result<PathBuf, AssetTranscodeFailed> {
        let output = self.output_for(input);
        let invocation = Invocation::new(&self.asset_compiler)
            .args(&self.compiler_args)
            .arg(input)
            .arg("-o")
            .arg(&output);

        let failed = |reason: String| AssetTranscodeFailed {
            file: input.to_path_buf(),
            reason,
        };

        let process_output = runner
            .run(&invocation)
            .map_err(|e| failed(format!("{e:#}")))?;
        executors::log_process_output("asset compiler", &process_output);

        if !process_output.success() {
            return Err(failed(format!(
                "the asset compiler exited with code {:?}",
                process_output.exit_code
            )));
        }

        fs::remove_file(input)
            .map_err(|e| failed(format!("unable to remove the source form: {e}")))?;
        Ok(output)
    }
}

impl PostCompileHook for ShaderTranscodeHook {
    fn name(&self) -> &str {
        "shader_transcode"
    }

    fn run(
        &self,
        paths: &ResolvedPaths,
        runner: &dyn ProcessRunner,
    ) -> Result<Vec<AssetTranscodeFailed>> {
        let shaders_dir = paths.output_dir.join(&self.dir);
        if !shaders_dir.is_dir() {
            log::warn!("No shaders directory found at {shaders_dir:?}. Skipping the transcoding");
            return Ok(Vec::with_capacity(0));
        }

        let mut shaders = Vec::new();
        for entry in fs::read_dir(&shaders_dir)
            .with_context(|| format!("Could not read the shaders directory {shaders_dir:?}"))?
        {
            let path = entry
                .with_context(|| format!("Could not read an entry of {shaders_dir:?}"))?
                .path();
            if path.is_file() && self.is_shader_source(&path) {
                shaders.push(path);
            }
        }

        let mut failures = Vec::new();
        for shader in shaders {
            match self.transcode(&shader, runner) {
                Ok(output) => log::debug!("Transcoded {shader:?} into {output:?}"),
                Err(failure) => {
                    log::error!("{failure}");
                    failures.push(failure);
                }
            }
        }

        Ok(failures)
    }
}
