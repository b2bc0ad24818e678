pub mod assets;
pub mod cli;
pub mod compiler;
pub mod config_file;
pub mod deploy;
pub mod domain;
pub mod hooks;
pub mod project_model;
pub mod toolchain;
pub mod utils;

/// The entry point for the execution of the program.
///
/// This module existence is motivated to let us run
/// integration tests for the whole operations of the program
/// without having to do fancy work about checking the
/// data sent to stdout/stderr
pub mod worker {
    use std::path::{Path, PathBuf};
    use std::{fs, time::Instant};

    use color_eyre::{eyre::Context, Report, Result};

    use crate::config_file::{self, ForgeConfigFile};
    use crate::domain::report::BuildReport;
    use crate::hooks::{self, PostCompileHook, ResolvedPaths};
    use crate::project_model::ForgeModel;
    use crate::utils::constants::error_messages;
    use crate::{
        assets,
        cli::{
            input::{CliArgs, Command},
            output::executors::{ProcessRunner, SystemProcessRunner},
        },
        compiler::{self, compile_commands},
        deploy, toolchain,
        utils::{
            self,
            reader::{find_config_files, ConfigFile},
        },
    };

    /// The main work of the project. Runs the tasks
    /// inputted in the CLI, spawning the real toolchain processes
    pub fn run_forge(cli_args: &CliArgs, project_root: &Path) -> std::result::Result<(), Report> {
        run_forge_with_runner(cli_args, project_root, &SystemProcessRunner)
    }

    /// Same as [`run_forge`], but every external process is launched through `runner`
    pub fn run_forge_with_runner(
        cli_args: &CliArgs,
        project_root: &Path,
        runner: &dyn ProcessRunner,
    ) -> Result<()> {
        let abs_project_root = determine_absolute_path_of_the_project_root(cli_args, project_root)?;

        let config_files: Vec<ConfigFile> =
            find_config_files(&abs_project_root, &cli_args.match_files)?;

        for config_file in config_files {
            let cfg_path = &config_file.path;
            log::debug!(
                "Launching a forge work event for the configuration file: {:?}",
                cfg_path,
            );
            let raw_file = fs::read_to_string(cfg_path)
                .with_context(|| format!("{}: {:?}", error_messages::READ_CFG_FILE, cfg_path))?;

            let config: ForgeConfigFile<'_> = config_file::forge_cfg_from_file(raw_file.as_str())
                .with_context(|| error_messages::PARSE_CFG_FILE)?;

            let program_data: ForgeModel<'_> =
                utils::reader::build_model(config, cli_args, &abs_project_root)
                    .with_context(|| error_messages::PROJECT_MODEL_MAPPING)?;

            perform_main_work(cli_args, &program_data, runner).with_context(|| {
                format!("{}: {:?}", error_messages::FAILED_BUILD_FOR_CFG_FILE, cfg_path)
            })?;
        }

        Ok(())
    }

    fn perform_main_work(
        cli_args: &CliArgs,
        program_data: &ForgeModel<'_>,
        runner: &dyn ProcessRunner,
    ) -> Result<()> {
        let pipeline_ts = Instant::now();

        match cli_args.command {
            Command::Clean => return clean(program_data),
            Command::Build | Command::Deploy => {
                let hook = hooks::from_model(program_data)?;
                let deploy = cli_args.command == Command::Deploy;
                run_pipeline(program_data, runner, hook.as_ref(), deploy)?;
            }
        }

        log::debug!(
            "forge took a total of {:?} ms on running the pipeline",
            pipeline_ts.elapsed().as_millis()
        );
        Ok(())
    }

    /// Runs every stage of the pipeline, strictly in order:
    /// resolution, compilation, staging, the post-compile hook and, when
    /// requested, deployment. The first fatal error aborts the remaining stages
    pub fn run_pipeline(
        model: &ForgeModel<'_>,
        runner: &dyn ProcessRunner,
        hook: &dyn PostCompileHook,
        deploy: bool,
    ) -> Result<BuildReport> {
        let mut report = BuildReport::default();

        log::info!(
            "Building the project: {} for {} ({})",
            model.project.name,
            model.platform,
            model.configuration
        );
        if !model.project.authors.is_empty() {
            log::debug!("Authored by: {}", model.project.authors.join(", "));
        }
        let resolved = compiler::resolve_targets(model)
            .with_context(|| error_messages::FAILURE_RESOLVING_TARGETS)?;
        report.skipped = resolved
            .iter()
            .filter(|(_, resolution)| resolution.command_line().is_none())
            .map(|(target, _)| target.name.to_string())
            .collect();

        create_output_directory(model)?;

        if model.project.compilation_db {
            let db = compile_commands::map_resolved_targets_to_compilation_db(model, &resolved)?;
            log::debug!("Compilation database written at {db:?}");
        }

        report.built = toolchain::compile_targets(model, runner, &resolved)?;

        log::info!("Staging the data directories");
        report.staged = assets::stage_all(model)?;

        log::info!("Running the post-compile hook: {}", hook.name());
        let resolved_paths = ResolvedPaths {
            project_root: model.build.project_root.clone(),
            output_dir: model.build.output_dir.clone(),
            platform: model.platform,
            built_targets: report.built.clone(),
        };
        report.transcode_failures = hook
            .run(&resolved_paths, runner)
            .with_context(|| error_messages::FAILURE_RUNNING_POST_COMPILE_HOOK)?;

        if deploy {
            report.deployed = deploy::package(model)?;
        }

        report.log_summary();
        Ok(report)
    }

    /// Removes every byproduct of the previous runs: the output and the deploy directories
    pub fn clean(model: &ForgeModel<'_>) -> Result<()> {
        log::info!("Cleaning the byproducts of the project: {}", model.project.name);
        utils::fs::remove_dir_if_exists(&model.build.output_dir)
            .and_then(|_| utils::fs::remove_dir_if_exists(&model.build.deploy_dir))
            .with_context(|| error_messages::FAILURE_CLEANING)
    }

    /// Resolves the full path of the location of the project's root on the fs. If the `--root`
    /// [`CliArgs`] arg is present, it will be used as the project root path, otherwise, we will
    /// assume that the project root is `project_root`, usually the same directory from where the
    /// binary was invoked by the user
    fn determine_absolute_path_of_the_project_root(
        cli_args: &CliArgs,
        project_root: &Path,
    ) -> Result<PathBuf> {
        let project_root = cli_args
            .root
            .as_deref()
            .map(Path::new)
            .unwrap_or(project_root);

        utils::fs::get_project_root_absolute_path(project_root)
            .with_context(|| error_messages::FAILURE_GATHERING_PROJECT_ROOT_ABS_PATH)
    }

    /// Creates the directory where the binaries are produced and the data
    /// directories are staged, with all of its missing parents
    fn create_output_directory(model: &ForgeModel) -> Result<()> {
        utils::fs::create_directory(&model.build.output_dir)
            .with_context(|| error_messages::FAILURE_CREATING_OUTPUT_DIR)
    }

}
