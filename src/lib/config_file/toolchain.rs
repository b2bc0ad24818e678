//! The external programs that `forge` drives
use serde::*;

/// [`ToolchainAttribute`] - Where the native toolchain lives
///
/// * `driver` - The compiler driver that compiles and links every target. When
/// absent, `cl` is used on Windows and `c++` everywhere else
/// * `env_script` - A script that sets up the native build environment, like
/// the `vcvarsall.bat` of the Microsoft's toolchain. Its exported environment
/// variables are captured once per build and handed to every compilation
/// * `env_script_args` - The arguments for the environment script (ex: `x64`)
/// * `asset_compiler` - The external program used by the post-compile hook
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::toolchain::ToolchainAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[toolchain]
///     env_script = 'C:\Program Files (x86)\Microsoft Visual Studio\2019\Community\VC\Auxiliary\Build\vcvarsall.bat'
///     env_script_args = ['x64']
///     asset_compiler = 'C:\VulkanSDK\1.1.85.0\Bin\glslangValidator.exe'
///"#;
///
/// let config: ToolchainAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.driver, None);
/// assert!(config.env_script.unwrap().ends_with("vcvarsall.bat"));
/// assert_eq!(config.env_script_args, Some(vec!["x64"]));
/// assert!(config.asset_compiler.unwrap().ends_with("glslangValidator.exe"));
/// ```
///
/// > Note: Windows paths must be written as TOML literal strings (single quoted),
/// so the backslashes aren't taken as escape sequences
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ToolchainAttribute<'a> {
    #[serde(borrow)]
    pub driver: Option<&'a str>,
    #[serde(borrow)]
    pub env_script: Option<&'a str>,
    #[serde(borrow)]
    pub env_script_args: Option<Vec<&'a str>>,
    #[serde(borrow)]
    pub asset_compiler: Option<&'a str>,
}
