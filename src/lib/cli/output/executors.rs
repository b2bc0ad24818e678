//! The contract that every external program (the compiler driver, the
//! environment setup script, the asset compiler) is invoked through

use std::collections::HashMap;
use std::ffi::{OsStr, OsString};
use std::fmt;
use std::path::{Path, PathBuf};

use color_eyre::{eyre::Context, Result};

use crate::domain::commands::arguments::Argument;

/// Environment variables injected into the spawned process, on top of the
/// ones inherited from `forge` itself
pub type EnvVars = HashMap<String, String>;

/// A fully described invocation of an external process
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Invocation {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub current_dir: Option<PathBuf>,
    pub env: EnvVars,
}

impl Invocation {
    pub fn new(program: impl AsRef<OsStr>) -> Self {
        Self {
            program: program.as_ref().to_os_string(),
            ..Default::default()
        }
    }

    pub fn arg(mut self, arg: impl AsRef<OsStr>) -> Self {
        self.args.push(arg.as_ref().to_os_string());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        self.args
            .extend(args.into_iter().map(|arg| arg.as_ref().to_os_string()));
        self
    }

    pub fn current_dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    pub fn envs(mut self, env: &EnvVars) -> Self {
        self.env
            .extend(env.iter().map(|(k, v)| (k.clone(), v.clone())));
        self
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program.to_string_lossy())?;
        for arg in &self.args {
            write!(f, " {}", arg.to_string_lossy())?;
        }
        Ok(())
    }
}

/// What an external process left behind once it exited
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ProcessOutput {
    /// `None` when the process was terminated by a signal
    pub exit_code: Option<i32>,
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
}

impl ProcessOutput {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }

    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).into_owned()
    }

    pub fn stderr_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stderr).into_owned()
    }
}

/// Runs an [`Invocation`] synchronously, blocking until the process exits.
///
/// An `Err` means that the process couldn't be launched at all; a process that
/// ran and failed is reported through [`ProcessOutput::exit_code`]
pub trait ProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput>;
}

/// Spawns real processes on the host operating system
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemProcessRunner;

impl ProcessRunner for SystemProcessRunner {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        log::trace!("Executing command => {invocation}");

        let mut command = std::process::Command::new(&invocation.program);
        command.args(&invocation.args).envs(&invocation.env);
        if let Some(dir) = &invocation.current_dir {
            command.current_dir(dir);
        }

        let output = command
            .output()
            .with_context(|| format!("Command {invocation} could not be launched"))?;

        Ok(ProcessOutput {
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
        })
    }
}

/// Forwards the captured streams of a finished process to the logger
pub fn log_process_output(who: &str, output: &ProcessOutput) {
    let stdout = output.stdout_lossy();
    let stderr = output.stderr_lossy();
    if output.success() {
        if !stdout.trim().is_empty() {
            log::debug!("[{who}] - stdout:\n{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            log::warn!("[{who}] - stderr:\n{}", stderr.trim_end());
        }
    } else {
        if !stdout.trim().is_empty() {
            log::error!("[{who}] - stdout:\n{}", stdout.trim_end());
        }
        if !stderr.trim().is_empty() {
            log::error!("[{who}] - stderr:\n{}", stderr.trim_end());
        }
    }
}

/// Converts a sequence of [`Argument`] into the owned OS strings of an [`Invocation`]
pub fn os_args<'a, I>(arguments: I) -> Vec<OsString>
where
    I: IntoIterator<Item = &'a Argument<'a>>,
{
    arguments
        .into_iter()
        .map(|arg| AsRef::<OsStr>::as_ref(arg).to_os_string())
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invocation_builder_and_display() {
        let mut env = EnvVars::new();
        env.insert(String::from("INCLUDE"), String::from("C:/sdk/include"));

        let invocation = Invocation::new("cl")
            .arg("-wd4201")
            .args(["src/main.cpp", "/link", "user32.lib"])
            .current_dir(Path::new("out"))
            .envs(&env);

        assert_eq!(
            invocation.to_string(),
            "cl -wd4201 src/main.cpp /link user32.lib"
        );
        assert_eq!(invocation.current_dir, Some(PathBuf::from("out")));
        assert_eq!(invocation.env.get("INCLUDE").unwrap(), "C:/sdk/include");
    }

    #[test]
    fn test_process_output_success() {
        let ok = ProcessOutput {
            exit_code: Some(0),
            ..Default::default()
        };
        let failed = ProcessOutput {
            exit_code: Some(2),
            ..Default::default()
        };
        let killed = ProcessOutput::default();

        assert!(ok.success());
        assert!(!failed.success());
        assert!(!killed.success());
    }

    #[cfg(unix)]
    #[test]
    fn test_system_runner_captures_exit_code_and_output() -> Result<()> {
        let output = SystemProcessRunner.run(
            &Invocation::new("sh")
                .arg("-c")
                .arg("echo $FORGE_PROBE; exit 3")
                .envs(&EnvVars::from([(
                    String::from("FORGE_PROBE"),
                    String::from("hello"),
                )])),
        )?;

        assert_eq!(output.exit_code, Some(3));
        assert_eq!(output.stdout_lossy().trim(), "hello");
        Ok(())
    }
}
