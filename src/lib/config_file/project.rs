//! Metadata about the user's project
use serde::*;

/// [`ProjectAttribute`] - Metadata about the user's project
/// * `name` - The project's name
/// * `authors` - A list of strings indicating the
/// authors that are responsible for the project
/// * `compilation_db` - Whether `forge` writes a `compile_commands.json`
/// for the resolved targets under the output directory
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::project::ProjectAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[project]
///     name = 'Lightmapper'
///     authors = ['someone@example.com']
///     compilation_db = true
///"#;
///
/// let config: ProjectAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.name, "Lightmapper");
/// assert_eq!(config.authors, Some(vec!["someone@example.com"]));
/// assert_eq!(config.compilation_db, Some(true));
/// ```
///
/// > Note: TOML table are toml commented (#) to allow us to parse
/// the inner attributes as the direct type that they belongs to.
/// That commented tables aren't the real TOML, they are just there
/// for testing and exemplification purposes of the inner attributes
/// of the configuration file.
///
/// For a test over a real example, please look at the
/// [`forge::config_file::ForgeConfigFile`] doc-test
#[derive(Serialize, Deserialize, Debug, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct ProjectAttribute<'a> {
    pub name: &'a str,
    #[serde(borrow)]
    pub authors: Option<Vec<&'a str>>,
    pub compilation_db: Option<bool>,
}
