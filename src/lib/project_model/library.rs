use std::borrow::Cow;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;

use crate::domain::errors::BuildError;
use crate::project_model::platform::Configuration;
use crate::utils::constants::dir_names;

/// A prebuilt, third party library that targets can link against
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct LibExternal<'a> {
    pub name: Cow<'a, str>,
    /// The root directory of the library, relative to the libraries directory
    pub path: PathBuf,
    /// When absent, the library only contributes an include path (header only)
    pub compiled_names: Option<IndexMap<Configuration, Cow<'a, str>>>,
}

impl<'a> LibExternal<'a> {
    pub fn root(&self, libs_dir: &Path) -> PathBuf {
        libs_dir.join(&self.path)
    }

    pub fn include_dir(&self, libs_dir: &Path) -> PathBuf {
        self.root(libs_dir).join(dir_names::INCLUDE)
    }

    pub fn lib_dir(&self, libs_dir: &Path) -> PathBuf {
        self.root(libs_dir).join(dir_names::LIB)
    }

    pub fn is_header_only(&self) -> bool {
        self.compiled_names.is_none()
    }

    /// The compiled artifact filename for the given build variant
    pub fn artifact_for(&self, configuration: Configuration) -> Result<&str, BuildError> {
        self.compiled_names
            .as_ref()
            .and_then(|names| names.get(&configuration))
            .map(|name| name.as_ref())
            .ok_or_else(|| BuildError::UnresolvedLibraryConfiguration {
                library: self.name.to_string(),
                configuration,
            })
    }
}

/// Maps the logical name of a library to its declaration
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct LibraryRegistry<'a> {
    libraries: IndexMap<String, LibExternal<'a>>,
}

impl<'a> LibraryRegistry<'a> {
    pub fn new(libraries: impl IntoIterator<Item = LibExternal<'a>>) -> Self {
        Self {
            libraries: libraries
                .into_iter()
                .map(|lib| (lib.name.to_string(), lib))
                .collect(),
        }
    }

    pub fn get(&self, name: &str) -> Result<&LibExternal<'a>, BuildError> {
        self.libraries
            .get(name)
            .ok_or_else(|| BuildError::UnknownLibrary(name.to_string()))
    }

    pub fn len(&self) -> usize {
        self.libraries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.libraries.is_empty()
    }
}
