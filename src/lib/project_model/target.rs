use std::borrow::Cow;
use std::path::{Path, PathBuf};

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::domain::commands::arguments::Argument;
use crate::project_model::platform::Platform;

/// One buildable binary, declared once and never mutated afterwards
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct BuildTarget<'a> {
    pub name: Cow<'a, str>,
    /// The entry translation unit, relative to the project root
    pub source: PathBuf,
    pub kind: TargetKind,
    pub defines: Vec<Cow<'a, str>>,
    /// A platform that isn't a key here means that the target isn't built there
    pub platform_options: IndexMap<Platform, PlatformTargetOptions<'a>>,
}

impl<'a> BuildTarget<'a> {
    pub fn options_for(&self, platform: Platform) -> Option<&PlatformTargetOptions<'a>> {
        self.platform_options.get(&platform)
    }

    pub fn is_applicable_on(&self, platform: Platform) -> bool {
        self.platform_options.contains_key(&platform)
    }

    /// The filename of the binary that this target produces on `platform`
    pub fn output_name(&self, platform: Platform) -> String {
        match platform.executable_extension() {
            Some(ext) => format!("{}.{ext}", self.name),
            None => self.name.to_string(),
        }
    }

    pub fn output_path(&self, output_dir: &Path, platform: Platform) -> PathBuf {
        output_dir.join(self.output_name(platform))
    }
}

/// The per (target, platform) options. Flags are kept in declaration order
#[derive(Debug, PartialEq, Eq, Clone, Default)]
pub struct PlatformTargetOptions<'a> {
    pub defines: Vec<Cow<'a, str>>,
    pub compiler_flags: Vec<Argument<'a>>,
    pub linker_flags: Vec<Argument<'a>>,
    /// Names of registered external libraries whose include paths and
    /// artifacts are derived for this platform
    pub libraries: Vec<Cow<'a, str>>,
}

/// The different types of final products
#[derive(Debug, PartialEq, Eq, Serialize, Deserialize, Default, Copy, Clone)]
pub enum TargetKind {
    /// A binary that runs attached to a console
    #[default]
    #[serde(alias = "Executable", alias = "executable", alias = "exe")]
    Executable,
    #[serde(
        alias = "WindowedExecutable",
        alias = "windowed executable",
        alias = "windowed-executable",
        alias = "windowed_executable",
        alias = "windowed"
    )]
    WindowedExecutable,
}

impl TargetKind {
    /// The extra linker token required on `platform` for this kind of binary
    pub fn linker_mode_flag(&self, platform: Platform) -> Option<&'static str> {
        match *self {
            TargetKind::Executable => None,
            TargetKind::WindowedExecutable => platform.no_console_linker_flag(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn target() -> BuildTarget<'static> {
        let mut platform_options = IndexMap::new();
        platform_options.insert(Platform::Windows, PlatformTargetOptions::default());

        BuildTarget {
            name: Cow::Borrowed("vulkan"),
            source: PathBuf::from("src/main.cpp"),
            kind: TargetKind::Executable,
            defines: vec![],
            platform_options,
        }
    }

    #[test]
    fn test_output_name_follows_platform_convention() {
        let target = target();
        assert_eq!(target.output_name(Platform::Windows), "vulkan.exe");
        assert_eq!(target.output_name(Platform::Linux), "vulkan");
        assert_eq!(
            target.output_path(Path::new("out"), Platform::Windows),
            Path::new("out").join("vulkan.exe")
        );
    }

    #[test]
    fn test_applicability_is_driven_by_the_declared_platforms() {
        let target = target();
        assert!(target.is_applicable_on(Platform::Windows));
        assert!(!target.is_applicable_on(Platform::Linux));
        assert!(target.options_for(Platform::MacOs).is_none());
    }

    #[test]
    fn test_linker_mode_flag() {
        assert_eq!(
            TargetKind::WindowedExecutable.linker_mode_flag(Platform::Windows),
            Some("/SUBSYSTEM:WINDOWS")
        );
        assert_eq!(TargetKind::Executable.linker_mode_flag(Platform::Windows), None);
        assert_eq!(
            TargetKind::WindowedExecutable.linker_mode_flag(Platform::Linux),
            None
        );
    }
}
