pub mod assets;
pub mod build;
pub mod library;
pub mod platform;
pub mod post_compile;
pub mod project;
pub mod target;
pub mod toolchain;

use self::{
    assets::{CopyDir, DeployFile},
    build::BuildModel,
    library::LibraryRegistry,
    platform::{Configuration, Platform},
    post_compile::PostCompileModel,
    project::ProjectModel,
    target::BuildTarget,
    toolchain::ToolchainModel,
};

/// The read-only data for a whole invocation: the declarations of a
/// configuration file plus the platform, build variant and paths resolved
/// for this run. Every stage of the pipeline receives it explicitly
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct ForgeModel<'a> {
    pub project: ProjectModel<'a>,
    pub platform: Platform,
    pub configuration: Configuration,
    pub build: BuildModel,
    pub toolchain: ToolchainModel<'a>,
    /// In declaration order
    pub targets: Vec<BuildTarget<'a>>,
    pub libraries: LibraryRegistry<'a>,
    pub copy_dirs: Vec<CopyDir>,
    pub deploy: Vec<DeployFile<'a>>,
    pub post_compile: PostCompileModel<'a>,
}

impl<'a> ForgeModel<'a> {
    pub fn find_target(&self, name: &str) -> Option<&BuildTarget<'a>> {
        self.targets.iter().find(|target| target.name.eq(name))
    }
}
