//! Establishes the native build environment.
//!
//! Some toolchains (Microsoft's one is the canonical example) need a script to
//! be sourced before the compiler can find its headers, libraries and tools.
//! The script is run through the platform shell, followed by the command that
//! dumps the resulting environment, and every `KEY=VALUE` line is captured so
//! it can be injected on the compiler invocations.

use std::collections::HashMap;
use std::sync::OnceLock;

use color_eyre::eyre::{Context, Result};
use regex::Regex;

use crate::cli::output::executors::{self, EnvVars, Invocation, ProcessRunner};
use crate::domain::errors::BuildError;
use crate::project_model::platform::Platform;
use crate::project_model::ForgeModel;
use crate::utils::constants::{error_messages, shells};

fn env_key_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(r"^[A-Za-z_][A-Za-z0-9_()]*$").expect("the env var key pattern is a valid regex")
    })
}

/// Runs the environment setup script declared on the toolchain, if any, and
/// returns the environment that it exports. Without a script, the compiler just
/// inherits the environment of this process
pub fn load_build_environment(model: &ForgeModel, runner: &dyn ProcessRunner) -> Result<EnvVars> {
    let Some(script) = model.toolchain.env_script.as_ref() else {
        log::debug!("No environment setup script declared. Inheriting the process environment");
        return Ok(EnvVars::new());
    };

    log::info!("Setting up the native build environment with: {script:?}");

    let script_args = model
        .toolchain
        .env_script_args
        .iter()
        .map(|arg| arg.value())
        .collect::<Vec<_>>();

    let invocation = match model.platform {
        Platform::Windows => Invocation::new(shells::WIN_CMD)
            .arg("/c")
            .arg(script)
            .args(&script_args)
            .args(["&&", "set"]),
        Platform::Linux | Platform::MacOs => {
            let mut sourced = format!(". '{}'", script.display());
            for arg in &script_args {
                sourced.push_str(&format!(" '{arg}'"));
            }
            Invocation::new(shells::POSIX_SH)
                .arg("-c")
                .arg(format!("{sourced} && env"))
        }
    }
    .current_dir(&model.build.project_root);

    let output = runner
        .run(&invocation)
        .with_context(|| error_messages::FAILURE_LOADING_BUILD_ENV)?;
    executors::log_process_output("env", &output);

    if !output.success() {
        return Err(BuildError::EnvironmentSetupFailed(format!(
            "{script:?} exited with code {:?}",
            output.exit_code
        ))
        .into());
    }

    let env_vars = load_env_vars_from_cmd_output(&output.stdout)?;
    log::debug!("Captured {} environment variables", env_vars.len());
    Ok(env_vars)
}

/// Convenient helper to manipulate and store the environmental variables as
/// result of invoking the `set` (Windows) or `env` (Unix) commands
pub fn load_env_vars_from_cmd_output(stdout: &[u8]) -> Result<HashMap<String, String>> {
    let env_vars_str = std::str::from_utf8(stdout).map_err(|e| {
        BuildError::EnvironmentSetupFailed(format!(
            "{}: {e}",
            error_messages::ILL_FORMED_KEY_ON_ENV_VARS_PARSING
        ))
    })?;
    let filter = env_key_regex();

    let mut env_vars: HashMap<String, String> = HashMap::new();
    for line in env_vars_str.lines() {
        // Parse the key-value pair from each line
        let Some((key, value)) = line.split_once('=') else {
            continue;
        };
        let key = key.trim();

        if filter.is_match(key) {
            let value = value.strip_suffix('\r').unwrap_or(value);
            env_vars.insert(key.to_string(), value.to_string());
        }
    }

    Ok(env_vars)
}
