//! The pluggable step that runs after every target is compiled

use serde::{Deserialize, Serialize};

/// [`PostCompileAttribute`] - Selects and configures the post-compile hook
/// * `kind` - `none` (the default) or `shader_transcode`
/// * `dir` - The staged directory whose files are transcoded, relative to the
/// output directory. Defaults to `data/shaders`
/// * `extensions` - The suffixes of the files that are transcoded.
/// Defaults to `.vert` and `.frag`
/// * `output_suffix` - Appended to the input path to name the output. Defaults to `.spv`
/// * `compiler_args` - Arguments for the asset compiler placed before the input
/// file. Defaults to `-V`
///
/// ### Tests
///
/// ```rust
/// use forge::config_file::post_compile::{PostCompileAttribute, PostCompileKind};
///
/// const CONFIG_FILE_MOCK: &str = r#"
///     #[post_compile]
///     kind = 'shader_transcode'
///     extensions = ['.vert', '.frag', '.comp']
/// "#;
///
/// let config: PostCompileAttribute = toml::from_str(CONFIG_FILE_MOCK)
///    .expect("A failure happened parsing the forge toml file");
///
/// assert_eq!(config.kind, Some(PostCompileKind::ShaderTranscode));
/// assert_eq!(config.dir, None);
/// assert_eq!(config.extensions, Some(vec![".vert", ".frag", ".comp"]));
/// ```
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PostCompileAttribute<'a> {
    pub kind: Option<PostCompileKind>,
    #[serde(borrow)]
    pub dir: Option<&'a str>,
    #[serde(borrow)]
    pub extensions: Option<Vec<&'a str>>,
    #[serde(borrow)]
    pub output_suffix: Option<&'a str>,
    #[serde(borrow)]
    pub compiler_args: Option<Vec<&'a str>>,
}

#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Copy, Clone)]
#[serde(rename_all = "snake_case")]
pub enum PostCompileKind {
    #[default]
    #[serde(alias = "None", alias = "noop")]
    None,
    #[serde(alias = "ShaderTranscode", alias = "shader-transcode", alias = "shaders")]
    ShaderTranscode,
}
