//! The failures that the build pipeline knows how to name.
//!
//! Every fatal variant travels inside an [`color_eyre::Report`] once it leaves
//! the stage that raised it, so callers can still recover it with
//! [`color_eyre::Report::downcast_ref`]

use std::path::PathBuf;

use thiserror::Error;

use crate::project_model::platform::Configuration;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum BuildError {
    #[error("library `{library}` has no compiled artifact registered for the `{configuration}` configuration")]
    UnresolvedLibraryConfiguration {
        library: String,
        configuration: Configuration,
    },

    #[error("library `{0}` is referenced but it isn't declared in the library registry")]
    UnknownLibrary(String),

    #[error("compilation of target `{target}` failed: {reason}")]
    CompilationFailed { target: String, reason: String },

    #[error("the source directory for staging does not exist: {0:?}")]
    AssetSourceMissing(PathBuf),

    #[error("the deploy entry {0:?} does not exist in the build output")]
    DeploymentEntryMissing(PathBuf),

    #[error("failed to set up the native build environment: {0}")]
    EnvironmentSetupFailed(String),

    #[error("the target `{0}` is declared more than once")]
    DuplicatedTarget(String),

    #[error("{0:?} must be a relative path that stays inside its root directory")]
    InvalidRelativePath(PathBuf),

    #[error("the staging destination {to:?} lies inside its own source {from:?}")]
    RecursiveCopyDir { from: PathBuf, to: PathBuf },
}

/// A single asset that the post-compile hook was unable to transcode.
///
/// Never fatal: the hook keeps processing the remaining files and hands
/// back every failure to the pipeline, which summarises them
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("failed to transcode the asset {file:?}: {reason}")]
pub struct AssetTranscodeFailed {
    pub file: PathBuf,
    pub reason: String,
}
