//! The data directories staged into the build output, and the deploy manifest

use serde::{Deserialize, Serialize};

/// [`CopyDirAttribute`] - A directory tree staged into the output directory
/// * `from` - The source directory, relative to the project root
/// * `to` - The destination, relative to the output directory
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::assets::CopyDirAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[copy_dirs]]
///     from = 'data'
///     to = 'data'
/// "#;
///
/// let config: CopyDirAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.from, "data");
/// assert_eq!(config.to, "data");
/// ```
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CopyDirAttribute<'a> {
    pub from: &'a str,
    pub to: &'a str,
}

/// [`DeployAttribute`] - An entry of the deployment manifest. Exactly one of
/// the two fields must be present
/// * `path` - A file or directory, relative to the output directory
/// * `target` - The name of a declared target, whose produced binary is deployed
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::assets::DeployAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[deploy]]
///     target = 'vulkan'
/// "#;
///
/// let config: DeployAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.path, None);
/// assert_eq!(config.target, Some("vulkan"));
/// ```
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct DeployAttribute<'a> {
    #[serde(borrow)]
    pub path: Option<&'a str>,
    #[serde(borrow)]
    pub target: Option<&'a str>,
}
