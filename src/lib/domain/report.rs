use std::path::PathBuf;

use crate::domain::errors::AssetTranscodeFailed;

/// A target whose binary was produced by the toolchain
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuiltTarget {
    pub name: String,
    pub output: PathBuf,
}

/// What a successful run of the pipeline did
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct BuildReport {
    pub built: Vec<BuiltTarget>,
    /// Targets that declare no options for the active platform
    pub skipped: Vec<String>,
    /// Destination of every staged data directory
    pub staged: Vec<PathBuf>,
    pub transcode_failures: Vec<AssetTranscodeFailed>,
    /// The entries copied into the deploy directory. Empty when no deploy was requested
    pub deployed: Vec<PathBuf>,
}

impl BuildReport {
    pub fn log_summary(&self) {
        log::info!(
            "Built {} target(s), skipped {}, staged {} data director(y/ies), deployed {} entr(y/ies)",
            self.built.len(),
            self.skipped.len(),
            self.staged.len(),
            self.deployed.len()
        );
        for target in &self.skipped {
            log::info!("Target: {target} is not applicable on the active platform");
        }
        if !self.transcode_failures.is_empty() {
            log::warn!(
                "{} asset(s) failed to transcode and were left in their source form:",
                self.transcode_failures.len()
            );
            for failure in &self.transcode_failures {
                log::warn!("    {failure}");
            }
        }
    }
}
