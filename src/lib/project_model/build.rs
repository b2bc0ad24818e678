use std::path::PathBuf;

/// The resolved, absolute, locations that every stage of the pipeline works with
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct BuildModel {
    pub project_root: PathBuf,
    pub output_dir: PathBuf,
    pub deploy_dir: PathBuf,
    pub libs_dir: PathBuf,
}
