//! file that contains the configuration options available
//! within forge to configure where the build process
//! leaves its byproducts
use serde::*;

/// [`BuildAttribute`] - Stores build process specific configuration
///
/// * `output_dir` - A path relative to the project root
/// where the compiler dumps the files generated in the build process,
/// and where the data directories are staged. Defaults to `./out`
/// * `deploy_dir` - A path relative to the project root where the deployable
/// set is assembled. Defaults to `./deploy`
/// * `libs_dir` - A path relative to the project root holding the external
/// libraries. Defaults to `./libs`
///
/// ```rust
/// use forge::config_file::build::{BuildAttribute};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[build]
///     output_dir = 'build'
///     libs_dir = 'third_party'
///"#;
///
/// let config: BuildAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.output_dir, Some("build"));
/// assert_eq!(config.deploy_dir, None);
/// assert_eq!(config.libs_dir, Some("third_party"));
/// ```
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct BuildAttribute<'a> {
    #[serde(borrow)]
    pub output_dir: Option<&'a str>,
    #[serde(borrow)]
    pub deploy_dir: Option<&'a str>,
    #[serde(borrow)]
    pub libs_dir: Option<&'a str>,
}
