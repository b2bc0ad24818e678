//! The platforms where a target can be built, and the build variants

use core::fmt;
use std::path::Path;
use std::str::FromStr;

use color_eyre::eyre::{eyre, Report};

/// Identifies which option set of a target and which environment setup applies
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone)]
pub enum Platform {
    Windows,
    Linux,
    MacOs,
}

impl Platform {
    /// The platform of the machine where `forge` is running
    pub const fn host() -> Self {
        if cfg!(target_os = "windows") {
            Platform::Windows
        } else if cfg!(target_os = "macos") {
            Platform::MacOs
        } else {
            Platform::Linux
        }
    }

    /// The compiler driver used when the configuration doesn't declare one
    pub fn default_driver(&self) -> &'static str {
        match *self {
            Platform::Windows => "cl",
            Platform::Linux | Platform::MacOs => "c++",
        }
    }

    pub fn executable_extension(&self) -> Option<&'static str> {
        match *self {
            Platform::Windows => Some("exe"),
            Platform::Linux | Platform::MacOs => None,
        }
    }

    pub fn define_flag(&self, define: &str) -> String {
        match *self {
            Platform::Windows => format!("/D{define}"),
            Platform::Linux | Platform::MacOs => format!("-D{define}"),
        }
    }

    pub fn include_flag(&self, dir: &Path) -> String {
        match *self {
            Platform::Windows => format!("/I{}", dir.display()),
            Platform::Linux | Platform::MacOs => format!("-I{}", dir.display()),
        }
    }

    pub fn lib_search_flag(&self, dir: &Path) -> String {
        match *self {
            Platform::Windows => format!("/LIBPATH:{}", dir.display()),
            Platform::Linux | Platform::MacOs => format!("-L{}", dir.display()),
        }
    }

    /// How a concrete, already compiled, library file is handed to the linker
    pub fn lib_artifact_flag(&self, artifact: &str) -> String {
        match *self {
            Platform::Windows => artifact.to_string(),
            Platform::Linux | Platform::MacOs => format!("-l:{artifact}"),
        }
    }

    pub fn output_flags(&self, output: &Path) -> Vec<String> {
        match *self {
            Platform::Windows => vec![format!("/Fe{}", output.display())],
            Platform::Linux | Platform::MacOs => {
                vec![String::from("-o"), format!("{}", output.display())]
            }
        }
    }

    /// The token that separates the compiler arguments from the linker ones
    /// on a single compile-and-link invocation, if the driver needs one
    pub fn linker_section_marker(&self) -> Option<&'static str> {
        match *self {
            Platform::Windows => Some("/link"),
            Platform::Linux | Platform::MacOs => None,
        }
    }

    pub fn no_console_linker_flag(&self) -> Option<&'static str> {
        match *self {
            Platform::Windows => Some("/SUBSYSTEM:WINDOWS"),
            Platform::Linux | Platform::MacOs => None,
        }
    }
}

impl Default for Platform {
    fn default() -> Self {
        Platform::host()
    }
}

impl AsRef<str> for Platform {
    fn as_ref(&self) -> &str {
        match *self {
            Platform::Windows => "windows",
            Platform::Linux => "linux",
            Platform::MacOs => "macos",
        }
    }
}

impl fmt::Display for Platform {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Platform {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "windows" | "win32" | "win64" => Ok(Platform::Windows),
            "linux" => Ok(Platform::Linux),
            "macos" | "darwin" | "osx" => Ok(Platform::MacOs),
            _ => Err(eyre!("Unknown platform: {s}")),
        }
    }
}

/// The build variant selector. It decides which compiled artifact of an
/// external library gets linked
#[derive(Debug, PartialEq, Eq, Hash, Copy, Clone, Default)]
pub enum Configuration {
    #[default]
    Debug,
    Release,
}

impl AsRef<str> for Configuration {
    fn as_ref(&self) -> &str {
        match *self {
            Configuration::Debug => "debug",
            Configuration::Release => "release",
        }
    }
}

impl fmt::Display for Configuration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_ref())
    }
}

impl FromStr for Configuration {
    type Err = Report;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "debug" => Ok(Configuration::Debug),
            "release" => Ok(Configuration::Release),
            _ => Err(eyre!("Unknown build configuration: {s}")),
        }
    }
}
