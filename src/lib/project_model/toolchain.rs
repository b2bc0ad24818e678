use std::borrow::Cow;
use std::path::PathBuf;

use crate::domain::commands::arguments::Argument;

/// The external programs that the pipeline drives
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ToolchainModel<'a> {
    /// The compiler driver that compiles and links a target in one invocation
    pub driver: Cow<'a, str>,
    /// Script that prepares the native build environment (ex: `vcvarsall.bat`)
    pub env_script: Option<PathBuf>,
    pub env_script_args: Vec<Argument<'a>>,
    /// The external asset compiler used by the post-compile hook
    pub asset_compiler: Option<PathBuf>,
}
