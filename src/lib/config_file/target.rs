//! Type for holds the Targets build details

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::project_model::target::TargetKind;

/// [`TargetAttribute`] - The type for holding the build details of every
/// user defined target
/// * `name` - The unique name of the target. It's also the name of the produced binary
/// * `source` - The entry translation unit, relative to the project root
/// * `kind` - Determines which type of binary is generated (console or windowed)
/// * `defines` - Preprocessor definitions applied on every platform
/// * `platforms` - The per platform options. The target is only built on the
/// platforms declared here
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::target::TargetAttribute;
/// use forge::project_model::target::TargetKind;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[targets]]
///     name = 'vulkan'
///     source = 'src/main.cpp'
///     kind = 'executable'
///     defines = ['APP_VULKAN']
///
///     [platforms.windows]
///     compiler_flags = ['-wd4201']
///     linker_flags = ['user32.lib']
///     libraries = ['freetype']
/// "#;
///
/// let config: TargetAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.name, "vulkan");
/// assert_eq!(config.source, "src/main.cpp");
/// assert_eq!(config.kind, Some(TargetKind::Executable));
/// assert_eq!(config.defines, Some(vec!["APP_VULKAN"]));
///
/// let platforms = config.platforms.expect("No platform options found");
/// let windows = platforms.get("windows").expect("No options for windows");
/// assert_eq!(windows.compiler_flags, Some(vec!["-wd4201"]));
/// assert_eq!(windows.linker_flags, Some(vec!["user32.lib"]));
/// assert_eq!(windows.libraries, Some(vec!["freetype"]));
/// assert_eq!(windows.defines, None);
/// ```
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
/// That commented tables aren't the real TOML, they are just there
/// for testing and exemplification purposes of the inner attributes
/// of the configuration file.
///
/// For a test over a real example, please look at the
/// [`forge::config_file::ForgeConfigFile`] doc-test
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TargetAttribute<'a> {
    pub name: &'a str,
    pub source: &'a str,
    pub kind: Option<TargetKind>,
    #[serde(borrow)]
    pub defines: Option<Vec<&'a str>>,
    #[serde(borrow)]
    pub platforms: Option<IndexMap<&'a str, PlatformOptionsAttribute<'a>>>,
}

/// [`PlatformOptionsAttribute`] - The options of a target for a concrete platform
/// * `defines` - Extra preprocessor definitions, applied after the global ones
/// * `compiler_flags` - Opaque compiler tokens, passed in the declared order
/// * `linker_flags` - Opaque linker tokens, passed in the declared order
/// * `libraries` - Names of registered external libraries to compile and link against
///
/// Any compiler or linker token may reference an external library with the
/// `$include(name)`, `$libdir(name)` and `$lib(name)` placeholders
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PlatformOptionsAttribute<'a> {
    #[serde(borrow)]
    pub defines: Option<Vec<&'a str>>,
    #[serde(borrow)]
    pub compiler_flags: Option<Vec<&'a str>>,
    #[serde(borrow)]
    pub linker_flags: Option<Vec<&'a str>>,
    #[serde(borrow)]
    pub libraries: Option<Vec<&'a str>>,
}
