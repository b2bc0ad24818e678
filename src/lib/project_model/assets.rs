use std::borrow::Cow;
use std::path::PathBuf;

/// A directory tree copied from the project sources into the build output
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct CopyDir {
    /// Relative to the project root
    pub from: PathBuf,
    /// Relative to the output directory, never escaping it
    pub to: PathBuf,
}

/// An entry of the deployment manifest
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum DeployFile<'a> {
    /// A file or directory, relative to the output directory
    Path(PathBuf),
    /// The binary produced by the target with this name on the active platform
    TargetOutput(Cow<'a, str>),
}
