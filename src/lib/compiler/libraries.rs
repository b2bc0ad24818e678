//! Resolution of the external library references found on the targets

use std::path::Path;
use std::sync::OnceLock;

use regex::{Captures, Regex};

use crate::domain::commands::arguments::Argument;
use crate::domain::errors::BuildError;
use crate::project_model::library::{LibExternal, LibraryRegistry};
use crate::project_model::platform::{Configuration, Platform};

const PLACEHOLDER_PATTERN: &str = r"\$(include|libdir|lib)\(([A-Za-z0-9_.+\-]+)\)";

fn placeholder_regex() -> &'static Regex {
    static REGEX: OnceLock<Regex> = OnceLock::new();
    REGEX.get_or_init(|| {
        Regex::new(PLACEHOLDER_PATTERN).expect("the library placeholder pattern is a valid regex")
    })
}

/// Turns library references into concrete paths and artifact names for one
/// (platform, configuration) pair. Pure: it never touches the filesystem
#[derive(Debug, Clone, Copy)]
pub struct LibraryResolver<'r, 'a> {
    pub registry: &'r LibraryRegistry<'a>,
    pub libs_dir: &'r Path,
    pub platform: Platform,
    pub configuration: Configuration,
}

impl<'r, 'a> LibraryResolver<'r, 'a> {
    /// Replaces every `$include(name)`, `$libdir(name)` and `$lib(name)`
    /// placeholder of `token`. Tokens without placeholders are returned as they are
    pub fn expand<'t>(&self, token: &Argument<'t>) -> Result<Argument<'t>, BuildError> {
        let regex = placeholder_regex();
        if !regex.is_match(token) {
            return Ok(token.clone());
        }

        let mut failure: Option<BuildError> = None;
        let expanded = regex.replace_all(token, |caps: &Captures| {
            match self.expand_placeholder(&caps[1], &caps[2]) {
                Ok(value) => value,
                Err(e) => {
                    failure.get_or_insert(e);
                    String::new()
                }
            }
        });

        match failure {
            Some(e) => Err(e),
            None => Ok(Argument::from(expanded.into_owned())),
        }
    }

    fn expand_placeholder(&self, kind: &str, library: &str) -> Result<String, BuildError> {
        let lib = self.registry.get(library)?;
        Ok(match kind {
            "include" => format!("{}", lib.include_dir(self.libs_dir).display()),
            "libdir" => format!("{}", lib.lib_dir(self.libs_dir).display()),
            _ => lib.artifact_for(self.configuration)?.to_string(),
        })
    }

    /// The include flag that the compiler receives for a library listed on a target
    pub fn include_flag<'t>(&self, library: &str) -> Result<Argument<'t>, BuildError> {
        let lib = self.registry.get(library)?;
        Ok(Argument::from(
            self.platform.include_flag(&lib.include_dir(self.libs_dir)),
        ))
    }

    /// The linker arguments for a library listed on a target: its search path
    /// and its artifact for the active configuration. Header only libraries
    /// don't contribute anything to the linker
    pub fn link_args<'t>(&self, library: &str) -> Result<Vec<Argument<'t>>, BuildError> {
        let lib: &LibExternal = self.registry.get(library)?;
        if lib.is_header_only() {
            return Ok(Vec::new());
        }

        let artifact = lib.artifact_for(self.configuration)?;
        Ok(vec![
            Argument::from(self.platform.lib_search_flag(&lib.lib_dir(self.libs_dir))),
            Argument::from(self.platform.lib_artifact_flag(artifact)),
        ])
    }
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::path::PathBuf;

    use indexmap::IndexMap;

    use super::*;

    fn registry() -> LibraryRegistry<'static> {
        let mut names = IndexMap::new();
        names.insert(Configuration::Debug, Cow::Borrowed("freetype281MTd.lib"));
        names.insert(Configuration::Release, Cow::Borrowed("freetype281MT.lib"));

        let mut only_release = IndexMap::new();
        only_release.insert(Configuration::Release, Cow::Borrowed("zlib.lib"));

        LibraryRegistry::new([
            LibExternal {
                name: Cow::Borrowed("freetype"),
                path: PathBuf::from("freetype-2.8.1"),
                compiled_names: Some(names),
            },
            LibExternal {
                name: Cow::Borrowed("stbimage"),
                path: PathBuf::from("stb_image-2.23"),
                compiled_names: None,
            },
            LibExternal {
                name: Cow::Borrowed("zlib"),
                path: PathBuf::from("zlib-1.2.11"),
                compiled_names: Some(only_release),
            },
        ])
    }

    fn resolver<'r>(
        registry: &'r LibraryRegistry<'static>,
        configuration: Configuration,
    ) -> LibraryResolver<'r, 'static> {
        LibraryResolver {
            registry,
            libs_dir: Path::new("libs"),
            platform: Platform::Windows,
            configuration,
        }
    }

    #[test]
    fn test_plain_tokens_are_untouched() {
        let registry = registry();
        let resolver = resolver(&registry, Configuration::Debug);
        let token = Argument::from("user32.lib");
        assert_eq!(resolver.expand(&token), Ok(token));
    }

    #[test]
    fn test_artifact_placeholder_follows_configuration() {
        let registry = registry();
        let token = Argument::from("$lib(freetype)");

        let debug = resolver(&registry, Configuration::Debug).expand(&token);
        let release = resolver(&registry, Configuration::Release).expand(&token);

        assert_eq!(debug, Ok(Argument::from("freetype281MTd.lib")));
        assert_eq!(release, Ok(Argument::from("freetype281MT.lib")));
    }

    #[test]
    fn test_path_placeholders_inside_a_flag() {
        let registry = registry();
        let resolver = resolver(&registry, Configuration::Debug);

        let expanded = resolver
            .expand(&Argument::from("-LIBPATH:$libdir(freetype)"))
            .unwrap();
        let expected = format!(
            "-LIBPATH:{}",
            Path::new("libs")
                .join("freetype-2.8.1")
                .join("lib")
                .display()
        );
        assert_eq!(expanded.value(), expected);

        let include = resolver.expand(&Argument::from("-I$include(stbimage)")).unwrap();
        assert!(include.value().starts_with("-I"));
        assert!(include.value().ends_with("include"));
    }

    #[test]
    fn test_unregistered_configuration_fails() {
        let registry = registry();
        let resolver = resolver(&registry, Configuration::Debug);

        assert_eq!(
            resolver.expand(&Argument::from("$lib(zlib)")),
            Err(BuildError::UnresolvedLibraryConfiguration {
                library: String::from("zlib"),
                configuration: Configuration::Debug,
            })
        );
        assert_eq!(
            resolver.expand(&Argument::from("$lib(stbimage)")),
            Err(BuildError::UnresolvedLibraryConfiguration {
                library: String::from("stbimage"),
                configuration: Configuration::Debug,
            })
        );
    }

    #[test]
    fn test_unknown_library_fails() {
        let registry = registry();
        let resolver = resolver(&registry, Configuration::Release);
        assert_eq!(
            resolver.expand(&Argument::from("$include(sdl2)")),
            Err(BuildError::UnknownLibrary(String::from("sdl2")))
        );
    }

    #[test]
    fn test_header_only_library_contributes_no_link_args() {
        let registry = registry();
        let resolver = resolver(&registry, Configuration::Release);

        assert!(resolver.link_args("stbimage").unwrap().is_empty());
        assert!(resolver.include_flag("stbimage").unwrap().starts_with("/I"));

        let freetype = resolver.link_args("freetype").unwrap();
        assert_eq!(freetype.len(), 2);
        assert!(freetype[0].starts_with("/LIBPATH:"));
        assert_eq!(freetype[1].value(), "freetype281MT.lib");
    }
}
