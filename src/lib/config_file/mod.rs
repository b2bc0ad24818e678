//! root file for the crate where the datastructures that holds the TOML
//! parsed data lives.
pub mod assets;
pub mod build;
pub mod library;
pub mod post_compile;
pub mod project;
pub mod target;
pub mod toolchain;

use std::fmt::Debug;

use serde::{Deserialize, Serialize};

use self::{
    assets::{CopyDirAttribute, DeployAttribute},
    build::BuildAttribute,
    library::LibExternalAttribute,
    post_compile::PostCompileAttribute,
    project::ProjectAttribute,
    target::TargetAttribute,
    toolchain::ToolchainAttribute,
};

/// ```rust
/// use forge::config_file::{self, ForgeConfigFile};
/// use forge::config_file::post_compile::PostCompileKind;
/// use forge::project_model::target::TargetKind;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     [project]
///     name = 'Lightmapper'
///     authors = ['someone@example.com']
///
///     [toolchain]
///     env_script = 'C:\VS\VC\Auxiliary\Build\vcvarsall.bat'
///     env_script_args = ['x64']
///     asset_compiler = 'C:\VulkanSDK\Bin\glslangValidator.exe'
///
///     [[targets]]
///     name = 'vulkan'
///     source = 'src/main.cpp'
///     kind = 'executable'
///
///     [targets.platforms.windows]
///     compiler_flags = ['-wd4201']
///     linker_flags = ['user32.lib']
///
///     [[targets]]
///     name = 'lightmap_benchmark'
///     source = 'src/lightmap_benchmark.cpp'
///
///     [[libraries]]
///     name = 'freetype'
///     path = 'freetype-2.8.1'
///     compiled_names = { debug = 'freetype281MTd.lib', release = 'freetype281MT.lib' }
///
///     [[libraries]]
///     name = 'stbimage'
///     path = 'stb_image-2.23'
///
///     [[copy_dirs]]
///     from = 'data'
///     to = 'data'
///
///     [[deploy]]
///     path = 'data'
///
///     [[deploy]]
///     target = 'vulkan'
///
///     [post_compile]
///     kind = 'shader_transcode'
/// "#;
///
/// let config: ForgeConfigFile = config_file::forge_cfg_from_file(CONFIG_FILE_MOCK)
///     .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.project.name, "Lightmapper");
/// assert!(config.build.is_none());
///
/// let targets = config.targets.expect("No targets declared");
/// assert_eq!(targets.len(), 2);
/// assert_eq!(targets[0].name, "vulkan");
/// assert_eq!(targets[0].kind, Some(TargetKind::Executable));
/// assert!(targets[0].platforms.as_ref().unwrap().contains_key("windows"));
/// assert!(targets[1].platforms.is_none());
///
/// let libraries = config.libraries.expect("No libraries declared");
/// assert_eq!(libraries.len(), 2);
/// assert!(libraries[1].compiled_names.is_none());
///
/// assert_eq!(config.copy_dirs.unwrap().len(), 1);
///
/// let deploy = config.deploy.expect("No deploy manifest declared");
/// assert_eq!(deploy[0].path, Some("data"));
/// assert_eq!(deploy[1].target, Some("vulkan"));
///
/// assert_eq!(config.post_compile.unwrap().kind, Some(PostCompileKind::ShaderTranscode));
/// ```
/// The [`ForgeConfigFile`] is the type that holds
/// the whole hierarchy of forge config file attributes
/// and properties
#[derive(Serialize, Deserialize, Debug, Default)]
#[serde(deny_unknown_fields)]
pub struct ForgeConfigFile<'a> {
    #[serde(borrow)]
    pub project: ProjectAttribute<'a>,
    #[serde(borrow)]
    pub build: Option<BuildAttribute<'a>>,
    #[serde(borrow)]
    pub toolchain: Option<ToolchainAttribute<'a>>,
    #[serde(borrow)]
    pub targets: Option<Vec<TargetAttribute<'a>>>,
    #[serde(borrow)]
    pub libraries: Option<Vec<LibExternalAttribute<'a>>>,
    #[serde(borrow)]
    pub copy_dirs: Option<Vec<CopyDirAttribute<'a>>>,
    #[serde(borrow)]
    pub deploy: Option<Vec<DeployAttribute<'a>>>,
    #[serde(borrow)]
    pub post_compile: Option<PostCompileAttribute<'a>>,
}

pub fn forge_cfg_from_file(cfg: &'_ str) -> Result<ForgeConfigFile<'_>, toml::de::Error> {
    <ForgeConfigFile>::deserialize(&mut toml::Deserializer::new(cfg))
}
