use std::borrow::Cow;
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use color_eyre::eyre::{eyre, Context};
use color_eyre::Result;
use indexmap::IndexMap;
use walkdir::WalkDir;

use crate::cli::input::CliArgs;
use crate::config_file::{
    assets::{CopyDirAttribute, DeployAttribute},
    build::BuildAttribute,
    library::LibExternalAttribute,
    post_compile::{PostCompileAttribute, PostCompileKind},
    project::ProjectAttribute,
    target::{PlatformOptionsAttribute, TargetAttribute},
    toolchain::ToolchainAttribute,
    ForgeConfigFile,
};
use crate::domain::commands::arguments::Argument;
use crate::domain::errors::BuildError;
use crate::project_model::{
    assets::{CopyDir, DeployFile},
    build::BuildModel,
    library::{LibExternal, LibraryRegistry},
    platform::{Configuration, Platform},
    post_compile::PostCompileModel,
    project::ProjectModel,
    target::{BuildTarget, PlatformTargetOptions},
    toolchain::ToolchainModel,
    ForgeModel,
};
use crate::utils;
use crate::utils::constants::{
    debug_messages, dir_names, error_messages, shaders, CONFIG_FILE_EXTENSION, FORGE,
};

/// Details about a found configuration file on the project
///
/// This is just a configuration file with a valid name found
/// at a valid path in some subdirectory
#[derive(Debug)]
pub struct ConfigFile {
    pub path: PathBuf,
}

/// Checks for the existence of the `forge<any>.toml` configuration files
/// present in the project root, or one level below it, and returns
/// a collection of the ones found.
///
/// *filename_match* - When present, only the files whose name contains
/// this value are returned
///
/// This function fails if there's no configuration file
/// (or isn't present in any directory of the project)
pub fn find_config_files(
    base_path: &Path,
    filename_match: &Option<String>,
) -> Result<Vec<ConfigFile>> {
    log::debug!("Searching for forge configuration files...");
    let mut files = vec![];

    for e in WalkDir::new(base_path)
        .max_depth(2)
        .sort_by_file_name()
        .into_iter()
        .filter_map(|e| e.ok())
    {
        let Some(filename) = e.file_name().to_str() else {
            continue;
        };
        let file_match = filename_match.as_deref().unwrap_or(filename);

        if e.file_type().is_file()
            && filename.starts_with(FORGE)
            && filename.ends_with(CONFIG_FILE_EXTENSION)
            && filename.contains(file_match)
        {
            files.push(ConfigFile {
                path: e.path().to_path_buf(),
            })
        }
    }

    if files.is_empty() {
        Err(eyre!(error_messages::NO_CFG_FILES_FOUND))
    } else {
        Ok(files)
    }
}

/// Maps the parsed configuration file, plus the platform and configuration
/// selected for this run, to the immutable [`ForgeModel`]
pub fn build_model<'a>(
    config: ForgeConfigFile<'a>,
    cli_args: &CliArgs,
    absolute_project_root: &Path,
) -> Result<ForgeModel<'a>> {
    log::debug!("{}", debug_messages::MAPPING_CFG_TO_MODEL);

    let platform = cli_args.platform();
    let configuration = cli_args.configuration();

    let project = assemble_project_model(config.project);
    let build = assemble_build_model(config.build, absolute_project_root)?;
    let toolchain = assemble_toolchain_model(config.toolchain, platform);
    let libraries = assemble_library_registry(config.libraries)?;
    let declared_targets = assemble_targets(config.targets)?;
    let copy_dirs = assemble_copy_dirs(config.copy_dirs, &build)?;
    let deploy = assemble_deploy_manifest(config.deploy, &declared_targets)?;
    let post_compile = assemble_post_compile_model(config.post_compile)?;

    let (targets, deploy) = filter_targets(declared_targets, deploy, cli_args.targets.as_deref());

    Ok(ForgeModel {
        project,
        platform,
        configuration,
        build,
        toolchain,
        targets,
        libraries,
        copy_dirs,
        deploy,
        post_compile,
    })
}

fn assemble_project_model(config: ProjectAttribute) -> ProjectModel {
    ProjectModel {
        name: Cow::Borrowed(config.name),
        authors: config
            .authors
            .map(|authors| authors.into_iter().map(Cow::Borrowed).collect())
            .unwrap_or_default(),
        compilation_db: config.compilation_db.unwrap_or_default(),
    }
}

/// The output, deploy and libraries directories must be proper subdirectories
/// of the project root, and none of them may hold another one
fn assemble_build_model(config: Option<BuildAttribute>, project_root: &Path) -> Result<BuildModel> {
    let dir_or_default = |dir: Option<&str>, default: &str| -> Result<PathBuf, BuildError> {
        let dir = Path::new(dir.unwrap_or(default));
        let normalized = utils::fs::normalize_contained_relative_path(dir)?;
        if normalized.as_os_str().is_empty() {
            return Err(BuildError::InvalidRelativePath(dir.to_path_buf()));
        }
        Ok(normalized)
    };

    let output_dir = dir_or_default(
        config.as_ref().and_then(|build| build.output_dir),
        dir_names::DEFAULT_OUTPUT_DIR,
    )?;
    let deploy_dir = dir_or_default(
        config.as_ref().and_then(|build| build.deploy_dir),
        dir_names::DEFAULT_DEPLOY_DIR,
    )?;
    let libs_dir = dir_or_default(
        config.as_ref().and_then(|build| build.libs_dir),
        dir_names::DEFAULT_LIBS_DIR,
    )?;

    for (dir, other) in [
        (&deploy_dir, &output_dir),
        (&libs_dir, &output_dir),
        (&libs_dir, &deploy_dir),
    ] {
        if dir.starts_with(other) || other.starts_with(dir) {
            return Err(BuildError::InvalidRelativePath(dir.clone()))
                .with_context(|| format!("{dir:?} overlaps with {other:?}"));
        }
    }

    Ok(BuildModel {
        project_root: project_root.to_path_buf(),
        output_dir: project_root.join(output_dir),
        deploy_dir: project_root.join(deploy_dir),
        libs_dir: project_root.join(libs_dir),
    })
}

fn assemble_toolchain_model(
    config: Option<ToolchainAttribute>,
    platform: Platform,
) -> ToolchainModel {
    let Some(config) = config else {
        return ToolchainModel {
            driver: Cow::Borrowed(platform.default_driver()),
            ..Default::default()
        };
    };

    ToolchainModel {
        driver: Cow::Borrowed(config.driver.unwrap_or_else(|| platform.default_driver())),
        env_script: config.env_script.map(PathBuf::from),
        env_script_args: config
            .env_script_args
            .map(|args| args.into_iter().map(Argument::from).collect())
            .unwrap_or_default(),
        asset_compiler: config.asset_compiler.map(PathBuf::from),
    }
}

fn assemble_library_registry(
    config: Option<Vec<LibExternalAttribute>>,
) -> Result<LibraryRegistry> {
    let mut libraries = Vec::new();

    for library in config.unwrap_or_default() {
        let compiled_names = match library.compiled_names {
            Some(names) => {
                let mut by_configuration = IndexMap::with_capacity(names.len());
                for (configuration, artifact) in names {
                    let configuration = Configuration::from_str(configuration).with_context(|| {
                        format!("Invalid configuration on the library: {}", library.name)
                    })?;
                    by_configuration.insert(configuration, Cow::Borrowed(artifact));
                }
                Some(by_configuration)
            }
            None => None,
        };

        libraries.push(LibExternal {
            name: Cow::Borrowed(library.name),
            path: PathBuf::from(library.path),
            compiled_names,
        });
    }

    Ok(LibraryRegistry::new(libraries))
}

fn assemble_targets(config: Option<Vec<TargetAttribute>>) -> Result<Vec<BuildTarget>> {
    let mut seen = HashSet::new();
    let mut targets = Vec::new();

    for target in config.unwrap_or_default() {
        if !seen.insert(target.name) {
            return Err(BuildError::DuplicatedTarget(target.name.to_string()).into());
        }

        let mut platform_options = IndexMap::new();
        for (platform, options) in target.platforms.unwrap_or_default() {
            let platform = Platform::from_str(platform)
                .with_context(|| format!("Invalid platform on the target: {}", target.name))?;
            platform_options.insert(platform, assemble_platform_options(options));
        }

        targets.push(BuildTarget {
            name: Cow::Borrowed(target.name),
            source: PathBuf::from(target.source),
            kind: target.kind.unwrap_or_default(),
            defines: borrowed(target.defines),
            platform_options,
        });
    }

    Ok(targets)
}

fn assemble_platform_options(config: PlatformOptionsAttribute) -> PlatformTargetOptions {
    PlatformTargetOptions {
        defines: borrowed(config.defines),
        compiler_flags: arguments(config.compiler_flags),
        linker_flags: arguments(config.linker_flags),
        libraries: borrowed(config.libraries),
    }
}

fn assemble_copy_dirs(
    config: Option<Vec<CopyDirAttribute>>,
    build: &BuildModel,
) -> Result<Vec<CopyDir>> {
    let output_dir = build
        .output_dir
        .strip_prefix(&build.project_root)
        .unwrap_or(&build.output_dir);

    config
        .unwrap_or_default()
        .into_iter()
        .map(|copy_dir| -> Result<CopyDir> {
            let to = PathBuf::from(copy_dir.to);
            let destination = output_dir.join(utils::fs::normalize_contained_relative_path(&to)?);
            // Sources outside of the project are checked again when staged
            let source = utils::fs::normalize_contained_relative_path(Path::new(copy_dir.from));
            if let Ok(source) = source {
                if destination.starts_with(&source) {
                    return Err(BuildError::RecursiveCopyDir {
                        from: PathBuf::from(copy_dir.from),
                        to: destination,
                    }
                    .into());
                }
            }
            Ok(CopyDir {
                from: PathBuf::from(copy_dir.from),
                to,
            })
        })
        .collect()
}

fn assemble_deploy_manifest<'a>(
    config: Option<Vec<DeployAttribute<'a>>>,
    targets: &[BuildTarget],
) -> Result<Vec<DeployFile<'a>>> {
    let mut manifest = Vec::new();

    for entry in config.unwrap_or_default() {
        let deploy_file = match (entry.path, entry.target) {
            (Some(path), None) => {
                let path = PathBuf::from(path);
                utils::fs::ensure_contained_relative_path(&path)?;
                DeployFile::Path(path)
            }
            (None, Some(target)) => {
                if !targets.iter().any(|declared| declared.name == target) {
                    return Err(eyre!(
                        "The deploy manifest references the undeclared target: {target}"
                    ));
                }
                DeployFile::TargetOutput(Cow::Borrowed(target))
            }
            _ => return Err(eyre!(error_messages::INVALID_DEPLOY_ENTRY)),
        };
        manifest.push(deploy_file);
    }

    Ok(manifest)
}

fn assemble_post_compile_model(
    config: Option<PostCompileAttribute>,
) -> Result<PostCompileModel> {
    let Some(config) = config else {
        return Ok(PostCompileModel::None);
    };

    match config.kind.unwrap_or_default() {
        PostCompileKind::None => Ok(PostCompileModel::None),
        PostCompileKind::ShaderTranscode => {
            let dir = PathBuf::from(config.dir.unwrap_or(shaders::DEFAULT_DIR));
            utils::fs::ensure_contained_relative_path(&dir)?;

            Ok(PostCompileModel::ShaderTranscode {
                dir,
                extensions: config
                    .extensions
                    .map(|extensions| extensions.into_iter().map(Cow::Borrowed).collect())
                    .unwrap_or_else(|| {
                        shaders::DEFAULT_EXTENSIONS
                            .into_iter()
                            .map(Cow::Borrowed)
                            .collect()
                    }),
                output_suffix: Cow::Borrowed(
                    config.output_suffix.unwrap_or(shaders::DEFAULT_OUTPUT_SUFFIX),
                ),
                compiler_args: config
                    .compiler_args
                    .unwrap_or_else(|| shaders::DEFAULT_COMPILER_ARGS.to_vec())
                    .into_iter()
                    .map(Argument::from)
                    .collect(),
            })
        }
    }
}

/// Keeps only the targets requested on the command line, together with the
/// deploy entries that don't reference a discarded target
fn filter_targets<'a>(
    targets: Vec<BuildTarget<'a>>,
    deploy: Vec<DeployFile<'a>>,
    requested: Option<&[String]>,
) -> (Vec<BuildTarget<'a>>, Vec<DeployFile<'a>>) {
    let Some(requested) = requested else {
        return (targets, deploy);
    };

    for name in requested {
        if !targets.iter().any(|target| target.name.eq(name)) {
            log::warn!("The requested target: {name} isn't declared on the configuration file");
        }
    }

    let is_requested = |name: &str| requested.iter().any(|requested| requested == name);
    let targets = targets
        .into_iter()
        .filter(|target| is_requested(&target.name))
        .collect();
    let deploy = deploy
        .into_iter()
        .filter(|entry| match entry {
            DeployFile::TargetOutput(name) => {
                let keep = is_requested(name);
                if !keep {
                    log::warn!("Skipping the deploy of the filtered out target: {name}");
                }
                keep
            }
            DeployFile::Path(_) => true,
        })
        .collect();

    (targets, deploy)
}

fn arguments(flags: Option<Vec<&str>>) -> Vec<Argument<'_>> {
    flags
        .map(|flags| flags.into_iter().map(Argument::from).collect())
        .unwrap_or_default()
}

fn borrowed(values: Option<Vec<&str>>) -> Vec<Cow<'_, str>> {
    values
        .map(|values| values.into_iter().map(Cow::Borrowed).collect())
        .unwrap_or_default()
}

#[cfg(test)]
mod test {
    use std::fs;

    use clap::Parser;
    use tempfile::tempdir;

    use super::*;
    use crate::config_file;
    use crate::project_model::target::TargetKind;

    const CONFIG_FILE_MOCK: &str = r#"
        [project]
        name = 'Lightmapper'
        compilation_db = true

        [build]
        output_dir = 'build'

        [toolchain]
        env_script = 'C:\VS\VC\Auxiliary\Build\vcvarsall.bat'
        env_script_args = ['x64']
        asset_compiler = 'C:\VulkanSDK\Bin\glslangValidator.exe'

        [[targets]]
        name = 'vulkan'
        source = 'src/main.cpp'
        kind = 'windowed'
        defines = ['VK_USE_PLATFORM_WIN32_KHR']

        [targets.platforms.windows]
        defines = ['_CRT_SECURE_NO_WARNINGS']
        compiler_flags = ['-wd4201', '$include(freetype)']
        linker_flags = ['user32.lib', '$lib(freetype)']
        libraries = ['stbimage']

        [targets.platforms.linux]
        compiler_flags = ['-O2']

        [[targets]]
        name = 'lightmap_benchmark'
        source = 'src/lightmap_benchmark.cpp'

        [targets.platforms.windows]

        [[libraries]]
        name = 'freetype'
        path = 'freetype-2.8.1'
        compiled_names = { debug = 'freetype281MTd.lib', release = 'freetype281MT.lib' }

        [[libraries]]
        name = 'stbimage'
        path = 'stb_image-2.23'

        [[copy_dirs]]
        from = 'data'
        to = 'data'

        [[deploy]]
        path = 'data'

        [[deploy]]
        target = 'vulkan'

        [[deploy]]
        target = 'lightmap_benchmark'

        [post_compile]
        kind = 'shader_transcode'
    "#;

    fn parse_model<'a>(raw: &'a str, cli_args: &CliArgs) -> Result<ForgeModel<'a>> {
        let config = config_file::forge_cfg_from_file(raw)?;
        build_model(config, cli_args, Path::new("/home/dev/lightmapper"))
    }

    #[test]
    fn test_config_file_is_mapped_to_the_model() -> Result<()> {
        let cli_args = CliArgs::parse_from(["", "--platform", "windows", "--release", "deploy"]);
        let model = parse_model(CONFIG_FILE_MOCK, &cli_args)?;
        let root = Path::new("/home/dev/lightmapper");

        assert_eq!(model.project.name, "Lightmapper");
        assert!(model.project.compilation_db);
        assert_eq!(model.platform, Platform::Windows);
        assert_eq!(model.configuration, Configuration::Release);

        assert_eq!(model.build.output_dir, root.join("build"));
        assert_eq!(model.build.deploy_dir, root.join("deploy"));
        assert_eq!(model.build.libs_dir, root.join("libs"));

        assert_eq!(model.toolchain.driver, "cl");
        assert_eq!(model.toolchain.env_script_args, vec![Argument::from("x64")]);

        assert_eq!(model.targets.len(), 2);
        let vulkan = &model.targets[0];
        assert_eq!(vulkan.kind, TargetKind::WindowedExecutable);
        assert_eq!(vulkan.defines, vec!["VK_USE_PLATFORM_WIN32_KHR"]);
        let windows = vulkan.options_for(Platform::Windows).unwrap();
        assert_eq!(windows.linker_flags[1], Argument::from("$lib(freetype)"));
        assert_eq!(windows.libraries, vec!["stbimage"]);
        assert!(vulkan.is_applicable_on(Platform::Linux));
        assert!(!model.targets[1].is_applicable_on(Platform::Linux));

        let freetype = model.libraries.get("freetype")?;
        assert_eq!(freetype.artifact_for(Configuration::Debug)?, "freetype281MTd.lib");
        assert!(model.libraries.get("stbimage")?.is_header_only());

        assert_eq!(
            model.copy_dirs,
            vec![CopyDir {
                from: PathBuf::from("data"),
                to: PathBuf::from("data"),
            }]
        );
        assert_eq!(model.deploy[1], DeployFile::TargetOutput(Cow::Borrowed("vulkan")));
        assert!(matches!(
            &model.post_compile,
            PostCompileModel::ShaderTranscode { dir, output_suffix, .. }
                if dir == Path::new(shaders::DEFAULT_DIR) && output_suffix == ".spv"
        ));
        Ok(())
    }

    #[test]
    fn test_driver_defaults_to_the_platform_one() -> Result<()> {
        let cli_args = CliArgs::parse_from(["", "--platform", "linux", "build"]);
        let model = parse_model("[project]\nname = 'minimal'", &cli_args)?;

        assert_eq!(model.toolchain.driver, "c++");
        assert_eq!(model.configuration, Configuration::Debug);
        assert!(model.targets.is_empty());
        assert_eq!(model.post_compile, PostCompileModel::None);
        Ok(())
    }

    #[test]
    fn test_targets_filter_from_the_command_line() -> Result<()> {
        let cli_args =
            CliArgs::parse_from(["", "--platform", "windows", "--targets", "vulkan,ghost", "build"]);
        let model = parse_model(CONFIG_FILE_MOCK, &cli_args)?;

        assert_eq!(model.targets.len(), 1);
        assert_eq!(model.targets[0].name, "vulkan");
        assert_eq!(model.deploy.len(), 2);
        Ok(())
    }

    #[test]
    fn test_duplicated_targets_are_rejected() {
        let raw = r#"
            [project]
            name = 'dup'

            [[targets]]
            name = 'app'
            source = 'a.cpp'

            [[targets]]
            name = 'app'
            source = 'b.cpp'
        "#;
        let err = parse_model(raw, &CliArgs::parse_from(["", "build"])).unwrap_err();

        assert_eq!(
            err.downcast_ref::<BuildError>(),
            Some(&BuildError::DuplicatedTarget(String::from("app")))
        );
    }

    #[test]
    fn test_escaping_copy_dir_destination_is_rejected() {
        let raw = r#"
            [project]
            name = 'escape'

            [[copy_dirs]]
            from = 'data'
            to = '../outside'
        "#;
        let err = parse_model(raw, &CliArgs::parse_from(["", "build"])).unwrap_err();

        assert!(matches!(
            err.downcast_ref::<BuildError>(),
            Some(BuildError::InvalidRelativePath(_))
        ));
    }

    #[test]
    fn test_build_directories_must_be_distinct_subdirectories() {
        let cli_args = CliArgs::parse_from(["", "build"]);
        let rejected = [
            ("deploy_dir = '.'", "."),
            ("deploy_dir = ''", ""),
            ("libs_dir = ''", ""),
            ("output_dir = '../x'", "../x"),
            ("output_dir = '/tmp/out'", "/tmp/out"),
            ("deploy_dir = 'out'", "out"),
            ("deploy_dir = './out/'", "out"),
            ("deploy_dir = 'out/deploy'", "out/deploy"),
            ("output_dir = 'deploy/bin'", "deploy"),
            ("libs_dir = 'out/libs'", "out/libs"),
        ];

        for (build, offending) in rejected {
            let raw = format!("[project]\nname = 'x'\n[build]\n{build}");
            let err = parse_model(&raw, &cli_args).unwrap_err();
            assert_eq!(
                err.downcast_ref::<BuildError>(),
                Some(&BuildError::InvalidRelativePath(PathBuf::from(offending))),
                "{build}"
            );
        }
    }

    #[test]
    fn test_copy_dir_into_its_own_source_is_rejected() {
        let raw = r#"
            [project]
            name = 'snapshot'

            [[copy_dirs]]
            from = '.'
            to = 'snapshot'
        "#;
        let err = parse_model(raw, &CliArgs::parse_from(["", "build"])).unwrap_err();

        assert_eq!(
            err.downcast_ref::<BuildError>(),
            Some(&BuildError::RecursiveCopyDir {
                from: PathBuf::from("."),
                to: PathBuf::from("out").join("snapshot"),
            })
        );
    }

    #[test]
    fn test_invalid_deploy_entries_are_rejected() {
        let cli_args = CliArgs::parse_from(["", "build"]);
        let both = "[project]\nname = 'x'\n[[deploy]]\npath = 'data'\ntarget = 'app'";
        let undeclared = "[project]\nname = 'x'\n[[deploy]]\ntarget = 'app'";

        assert!(parse_model(both, &cli_args).is_err());
        assert!(parse_model(undeclared, &cli_args).is_err());
    }

    #[test]
    fn test_unknown_platform_key_is_rejected() {
        let raw = r#"
            [project]
            name = 'x'

            [[targets]]
            name = 'app'
            source = 'a.cpp'

            [targets.platforms.amiga]
        "#;
        assert!(parse_model(raw, &CliArgs::parse_from(["", "build"])).is_err());
    }

    #[test]
    fn test_find_config_files() -> Result<()> {
        let temp = tempdir()?;
        fs::write(temp.path().join("forge.toml"), "")?;
        fs::create_dir_all(temp.path().join("tools"))?;
        fs::write(temp.path().join("tools").join("forge_tools.toml"), "")?;
        fs::write(temp.path().join("Cargo.toml"), "")?;

        let found = find_config_files(temp.path(), &None)?;
        assert_eq!(found.len(), 2);

        let found = find_config_files(temp.path(), &Some(String::from("tools")))?;
        assert_eq!(found.len(), 1);
        assert!(found[0].path.ends_with("forge_tools.toml"));

        assert!(find_config_files(&temp.path().join("tools"), &Some(String::from("x"))).is_err());
        Ok(())
    }
}
