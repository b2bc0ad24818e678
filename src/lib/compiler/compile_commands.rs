use std::path::{Path, PathBuf};

use color_eyre::eyre::{Context, Result};
use serde::Serialize;

use crate::compiler::Resolution;
use crate::domain::commands::arguments::Argument;
use crate::project_model::target::BuildTarget;
use crate::project_model::ForgeModel;
use crate::utils;
use crate::utils::constants::{error_messages, COMPILATION_DATABASE};

/// Generates the `compile_commands.json` file, that acts as a compilation database
/// for some static analysis external tools, like `clang-tidy`, and populates it with
/// the resolved command line of every target applicable on the active platform
pub fn map_resolved_targets_to_compilation_db(
    model: &ForgeModel,
    resolved: &[(&BuildTarget, Resolution)],
) -> Result<PathBuf> {
    log::debug!("Generating the compilation database...");

    let driver = Argument::from(model.toolchain.driver.as_ref());
    let compilation_db_entries: Vec<CompileCommand> = resolved
        .iter()
        .filter_map(|(_, resolution)| resolution.command_line())
        .map(|cmd| CompileCommand {
            directory: &model.build.output_dir,
            file: &cmd.source,
            arguments: std::iter::once(driver.clone())
                .chain(cmd.driver_args(model.platform))
                .collect(),
        })
        .collect();

    let compile_commands_path = model.build.output_dir.join(COMPILATION_DATABASE);
    utils::fs::save_file(&compile_commands_path, &compilation_db_entries)
        .with_context(|| error_messages::FAILURE_SAVING_COMPILATION_DB)?;

    Ok(compile_commands_path)
}

/// Data model for serialize the data that will be outputted
/// to the `compile_commands.json` compilation database file
#[derive(Serialize, Debug)]
pub struct CompileCommand<'a> {
    pub directory: &'a Path,
    pub file: &'a Path,
    pub arguments: Vec<Argument<'a>>,
}
