//! The registry of the prebuilt external libraries

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// [`LibExternalAttribute`] - A prebuilt library that lives under the libraries directory
/// * `name` - The logical name used to reference the library from the targets
/// * `path` - The root directory of the library, relative to `build.libs_dir`
/// * `compiled_names` - The compiled artifact for every build configuration
/// (`debug`, `release`). Header only libraries leave it out
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::library::LibExternalAttribute;
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[[libraries]]
///     name = 'freetype'
///     path = 'freetype-2.8.1'
///     compiled_names = { debug = 'freetype281MTd.lib', release = 'freetype281MT.lib' }
/// "#;
///
/// let config: LibExternalAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.name, "freetype");
/// assert_eq!(config.path, "freetype-2.8.1");
/// let names = config.compiled_names.expect("No compiled names found");
/// assert_eq!(names.get("debug"), Some(&"freetype281MTd.lib"));
/// assert_eq!(names.get("release"), Some(&"freetype281MT.lib"));
/// ```
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LibExternalAttribute<'a> {
    pub name: &'a str,
    pub path: &'a str,
    #[serde(borrow)]
    pub compiled_names: Option<IndexMap<&'a str, &'a str>>,
}
