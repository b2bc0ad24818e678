//! The platform option resolver.
//!
//! Merges the global and the platform specific declarations of every target
//! into the final, ordered, compiler and linker argument lists. Everything in
//! here is a pure function of the target, the platform, the configuration and
//! the library registry: no process is launched and no file is touched, so a
//! misconfigured library is reported before any external invocation happens.
pub mod compile_commands;
pub mod libraries;

use crate::domain::commands::arguments::{Argument, Arguments};
use crate::domain::commands::command_lines::TargetCommandLine;
use crate::domain::errors::BuildError;
use crate::project_model::target::BuildTarget;
use crate::project_model::ForgeModel;

use self::libraries::LibraryResolver;

/// The outcome of resolving a target for a platform
#[derive(Debug, PartialEq, Eq, Clone)]
pub enum Resolution<'a> {
    /// The target declares no options for the platform, so it isn't built there
    NotApplicable,
    Applicable(TargetCommandLine<'a>),
}

impl<'a> Resolution<'a> {
    pub fn command_line(&self) -> Option<&TargetCommandLine<'a>> {
        match self {
            Resolution::NotApplicable => None,
            Resolution::Applicable(cmd) => Some(cmd),
        }
    }
}

/// Resolves every declared target of the model, in declaration order
pub fn resolve_targets<'a>(
    model: &'a ForgeModel<'a>,
) -> Result<Vec<(&'a BuildTarget<'a>, Resolution<'a>)>, BuildError> {
    let resolver = LibraryResolver {
        registry: &model.libraries,
        libs_dir: &model.build.libs_dir,
        platform: model.platform,
        configuration: model.configuration,
    };

    model
        .targets
        .iter()
        .map(|target| {
            resolve_target(target, &resolver, model).map(|resolution| (target, resolution))
        })
        .collect()
}

/// Produces the compiler and linker argument lists of `target` for the
/// platform and the configuration of the `resolver`.
///
/// Compiler arguments: global defines, platform defines, platform compiler
/// flags and then the include paths of the listed libraries.
/// Linker arguments: the flag required by the kind of target, the platform
/// linker flags and then the search paths and artifacts of the listed libraries.
///
/// Nothing is deduplicated nor reordered, later flags may legitimately
/// override earlier ones
pub fn resolve_target<'a>(
    target: &'a BuildTarget<'a>,
    resolver: &LibraryResolver<'_, 'a>,
    model: &ForgeModel<'a>,
) -> Result<Resolution<'a>, BuildError> {
    let platform = resolver.platform;
    let Some(options) = target.options_for(platform) else {
        log::debug!("Target: {} declares no options for {platform}", target.name);
        return Ok(Resolution::NotApplicable);
    };

    let mut compiler_args = Arguments::with_capacity(
        target.defines.len()
            + options.defines.len()
            + options.compiler_flags.len()
            + options.libraries.len(),
    );

    for define in target.defines.iter().chain(options.defines.iter()) {
        let define = resolver.expand(&Argument::from(define.as_ref()))?;
        compiler_args.create_and_push(platform.define_flag(&define));
    }
    for flag in &options.compiler_flags {
        compiler_args.push(resolver.expand(flag)?);
    }
    for library in &options.libraries {
        compiler_args.push(resolver.include_flag(library)?);
    }

    let mut linker_args = Arguments::with_capacity(options.linker_flags.len() + 1);
    linker_args.push_opt(target.kind.linker_mode_flag(platform).map(Argument::from));
    for flag in &options.linker_flags {
        linker_args.push(resolver.expand(flag)?);
    }
    for library in &options.libraries {
        linker_args.extend(resolver.link_args(library)?);
    }

    Ok(Resolution::Applicable(TargetCommandLine {
        target: target.name.clone(),
        source: model.build.project_root.join(&target.source),
        output: target.output_path(&model.build.output_dir, platform),
        compiler_args,
        linker_args,
    }))
}
