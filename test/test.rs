use std::cell::RefCell;
use std::fs;
use std::path::{Path, PathBuf};

use clap::Parser;
use color_eyre::Result;
use forge::cli::input::CliArgs;
use forge::cli::output::executors::{Invocation, ProcessOutput, ProcessRunner};
use forge::domain::errors::BuildError;
use tempfile::tempdir;

const CONFIG_FILE: &str = r#"
[project]
name = 'vulkan_lightmapper'
compilation_db = true

[toolchain]
driver = 'c++'
asset_compiler = '/opt/vulkan/bin/glslangValidator'

[[targets]]
name = 'vulkan'
source = 'src/main.cpp'
defines = ['VK_ENABLE_BETA_EXTENSIONS']

[targets.platforms.linux]
compiler_flags = ['-std=c++17']
linker_flags = ['-lvulkan']
libraries = ['freetype']

[targets.platforms.windows]
linker_flags = ['user32.lib']

[[targets]]
name = 'win32_tools'
source = 'src/tools.cpp'

[targets.platforms.windows]

[[libraries]]
name = 'freetype'
path = 'freetype-2.8.1'
compiled_names = { debug = 'libfreetyped.a', release = 'libfreetype.a' }

[[copy_dirs]]
from = 'data'
to = 'data'

[[deploy]]
path = 'data'

[[deploy]]
target = 'vulkan'

[post_compile]
kind = 'shader_transcode'
"#;

/// Behaves like both the compiler driver and the asset compiler: it writes
/// whatever follows the `-o` flag
#[derive(Default)]
struct FakeToolchain {
    fail_driver: bool,
    calls: RefCell<Vec<Invocation>>,
}

impl ProcessRunner for FakeToolchain {
    fn run(&self, invocation: &Invocation) -> Result<ProcessOutput> {
        self.calls.borrow_mut().push(invocation.clone());
        let is_driver = invocation.program == "c++";
        if is_driver && self.fail_driver {
            return Ok(ProcessOutput {
                exit_code: Some(1),
                stdout: vec![],
                stderr: b"main.cpp:1:1: error: expected unqualified-id".to_vec(),
            });
        }

        let out_pos = invocation.args.iter().position(|a| a == "-o").unwrap();
        fs::write(PathBuf::from(&invocation.args[out_pos + 1]), b"binary")?;
        Ok(ProcessOutput {
            exit_code: Some(0),
            ..Default::default()
        })
    }
}

fn scaffold_project(root: &Path) -> Result<()> {
    fs::write(root.join("forge.toml"), CONFIG_FILE)?;
    fs::create_dir_all(root.join("src"))?;
    fs::write(root.join("src").join("main.cpp"), "int main() {}")?;
    let shaders = root.join("data").join("shaders");
    fs::create_dir_all(&shaders)?;
    fs::write(shaders.join("mesh.vert"), "#version 450")?;
    fs::write(shaders.join("mesh.frag"), "#version 450")?;
    fs::write(root.join("data").join("level.json"), "{}")?;
    Ok(())
}

#[test]
fn test_full_program_deploy() -> Result<()> {
    let temp = tempdir()?;
    scaffold_project(temp.path())?;
    let toolchain = FakeToolchain::default();

    forge::worker::run_forge_with_runner(
        &CliArgs::parse_from(["", "-vv", "--platform", "linux", "deploy"]),
        temp.path(),
        &toolchain,
    )?;

    let out = temp.path().join("out");
    assert!(out.join("vulkan").exists());
    assert!(!out.join("win32_tools").exists());
    assert!(out.join("compile_commands.json").exists());
    assert!(out.join("data/shaders/mesh.vert.spv").exists());
    assert!(!out.join("data/shaders/mesh.vert").exists());

    let deploy = temp.path().join("deploy");
    assert!(deploy.join("vulkan").exists());
    assert!(deploy.join("data/level.json").exists());
    assert!(deploy.join("data/shaders/mesh.frag.spv").exists());

    let root = temp.path().canonicalize()?;
    let freetype = root.join("libs").join("freetype-2.8.1");
    let calls = toolchain.calls.borrow();
    assert_eq!(calls.len(), 3);
    assert_eq!(
        calls[0].to_string(),
        format!(
            "c++ -DVK_ENABLE_BETA_EXTENSIONS -std=c++17 -I{} {} -o {} -lvulkan -L{} -l:libfreetyped.a",
            freetype.join("include").display(),
            root.join("src").join("main.cpp").display(),
            root.join("out").join("vulkan").display(),
            freetype.join("lib").display(),
        )
    );
    assert_eq!(calls[1].program, "/opt/vulkan/bin/glslangValidator");

    Ok(temp.close()?)
}

#[test]
fn test_failed_compilation_aborts_before_deploy() -> Result<()> {
    let temp = tempdir()?;
    scaffold_project(temp.path())?;
    let toolchain = FakeToolchain {
        fail_driver: true,
        ..Default::default()
    };

    let err = forge::worker::run_forge_with_runner(
        &CliArgs::parse_from(["", "--platform", "linux", "deploy"]),
        temp.path(),
        &toolchain,
    )
    .unwrap_err();

    assert!(matches!(
        err.downcast_ref::<BuildError>(),
        Some(BuildError::CompilationFailed { target, .. }) if target == "vulkan"
    ));
    assert!(!temp.path().join("out").join("data").exists());
    assert!(!temp.path().join("deploy").exists());
    assert_eq!(toolchain.calls.borrow().len(), 1);

    Ok(temp.close()?)
}

#[test]
fn test_clean_after_build() -> Result<()> {
    let temp = tempdir()?;
    scaffold_project(temp.path())?;
    let toolchain = FakeToolchain::default();

    forge::worker::run_forge_with_runner(
        &CliArgs::parse_from(["", "--platform", "linux", "build"]),
        temp.path(),
        &toolchain,
    )?;
    assert!(temp.path().join("out").join("vulkan").exists());
    assert!(!temp.path().join("deploy").exists());

    forge::worker::run_forge_with_runner(
        &CliArgs::parse_from(["", "clean"]),
        temp.path(),
        &toolchain,
    )?;
    assert!(!temp.path().join("out").exists());
    assert!(temp.path().join("src").join("main.cpp").exists());

    Ok(temp.close()?)
}
