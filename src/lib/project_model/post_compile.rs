use std::borrow::Cow;
use std::path::PathBuf;

use crate::domain::commands::arguments::Argument;

/// The project supplied step that runs once every target is compiled and
/// every data directory is staged
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub enum PostCompileModel<'a> {
    #[default]
    None,
    /// Converts the shader sources of a staged directory into bytecode
    ShaderTranscode {
        /// Relative to the output directory
        dir: PathBuf,
        extensions: Vec<Cow<'a, str>>,
        output_suffix: Cow<'a, str>,
        compiler_args: Vec<Argument<'a>>,
    },
}
