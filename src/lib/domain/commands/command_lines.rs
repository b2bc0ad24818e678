use std::borrow::Cow;
use std::path::PathBuf;

use crate::domain::commands::arguments::{Argument, Arguments};
use crate::project_model::platform::Platform;

/// The resolved compile-and-link command line of a single target
#[derive(Debug, PartialEq, Eq, Clone)]
pub struct TargetCommandLine<'a> {
    pub target: Cow<'a, str>,
    /// Absolute path to the entry translation unit
    pub source: PathBuf,
    /// Absolute path to the binary that the invocation must produce
    pub output: PathBuf,
    pub compiler_args: Arguments<'a>,
    pub linker_args: Arguments<'a>,
}

impl<'a> TargetCommandLine<'a> {
    /// Joins every component of the command line, in the order expected by the
    /// compiler driver of `platform`
    pub fn driver_args(&self, platform: Platform) -> Arguments<'_> {
        let mut args = Arguments::with_capacity(
            self.compiler_args.len() + self.linker_args.len() + 4,
        );

        args.extend_from_slice(&self.compiler_args);
        args.push(Argument::from(&self.source));
        args.extend(platform.output_flags(&self.output).into_iter().map(Argument::from));
        args.push_opt(platform.linker_section_marker().map(Argument::from));
        args.extend_from_slice(&self.linker_args);

        args
    }
}
