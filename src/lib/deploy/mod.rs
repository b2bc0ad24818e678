//! Assembles the deployable directory out of the build output tree

use std::path::PathBuf;

use color_eyre::eyre::{Context, Result};

use crate::domain::errors::BuildError;
use crate::project_model::assets::DeployFile;
use crate::project_model::ForgeModel;
use crate::utils;
use crate::utils::constants::error_messages;

/// The location, relative to the output directory, of a deploy entry
pub fn entry_relative_path(model: &ForgeModel, entry: &DeployFile) -> PathBuf {
    match entry {
        DeployFile::Path(path) => path.clone(),
        DeployFile::TargetOutput(name) => match model.find_target(name) {
            Some(target) => PathBuf::from(target.output_name(model.platform)),
            None => PathBuf::from(name.as_ref()),
        },
    }
}

/// Copies every deploy entry from the output directory into a freshly emptied
/// deploy directory, keeping its relative path.
///
/// Every entry is checked before anything is touched, so a manifest that
/// references a missing file never leaves a half assembled release behind
pub fn package(model: &ForgeModel) -> Result<Vec<PathBuf>> {
    let output_dir = &model.build.output_dir;
    let deploy_dir = &model.build.deploy_dir;

    let entries = model
        .deploy
        .iter()
        .map(|entry| entry_relative_path(model, entry))
        .collect::<Vec<_>>();

    for entry in &entries {
        let source = output_dir.join(entry);
        if !source.exists() {
            return Err(BuildError::DeploymentEntryMissing(source))
                .with_context(|| error_messages::FAILURE_DEPLOYING);
        }
    }

    log::info!("Assembling the deployable directory at {deploy_dir:?}");
    utils::fs::remove_dir_if_exists(deploy_dir)
        .and_then(|_| utils::fs::create_directory(deploy_dir))
        .with_context(|| error_messages::FAILURE_DEPLOYING)?;

    let mut deployed = Vec::with_capacity(entries.len());
    for entry in entries {
        let destination = deploy_dir.join(&entry);
        let copied = utils::fs::copy_entry(&output_dir.join(&entry), &destination)
            .with_context(|| error_messages::FAILURE_DEPLOYING)?;
        log::debug!("Deployed {entry:?} ({copied} file(s))");
        deployed.push(destination);
    }

    Ok(deployed)
}

#[cfg(test)]
mod tests {
    use std::borrow::Cow;
    use std::fs;
    use std::path::Path;

    use indexmap::IndexMap;
    use tempfile::tempdir;

    use super::*;
    use crate::project_model::build::BuildModel;
    use crate::project_model::platform::Platform;
    use crate::project_model::target::{BuildTarget, PlatformTargetOptions, TargetKind};

    fn model(root: &Path, deploy: Vec<DeployFile<'static>>) -> ForgeModel<'static> {
        let mut platform_options = IndexMap::new();
        platform_options.insert(Platform::Windows, PlatformTargetOptions::default());
        ForgeModel {
            platform: Platform::Windows,
            build: BuildModel {
                project_root: root.to_path_buf(),
                output_dir: root.join("out"),
                deploy_dir: root.join("deploy"),
                ..Default::default()
            },
            targets: vec![BuildTarget {
                name: Cow::Borrowed("vulkan"),
                source: PathBuf::from("src/main.cpp"),
                kind: TargetKind::WindowedExecutable,
                defines: vec![],
                platform_options,
            }],
            deploy,
            ..Default::default()
        }
    }

    #[test]
    fn test_target_outputs_resolve_to_their_platform_filename() {
        let model = model(Path::new("."), vec![]);
        assert_eq!(
            entry_relative_path(&model, &DeployFile::TargetOutput(Cow::Borrowed("vulkan"))),
            PathBuf::from("vulkan.exe")
        );
    }

    #[test]
    fn test_package_copies_every_entry_into_a_clean_deploy_dir() -> Result<()> {
        let temp = tempdir()?;
        let out = temp.path().join("out");
        fs::create_dir_all(out.join("data").join("shaders"))?;
        fs::create_dir_all(out.join("logs"))?;
        fs::write(out.join("data").join("shaders").join("a.vert.spv"), "spv")?;
        fs::write(out.join("vulkan.exe"), "MZ")?;
        fs::create_dir_all(temp.path().join("deploy"))?;
        fs::write(temp.path().join("deploy").join("old_release.zip"), "stale")?;

        let model = model(
            temp.path(),
            vec![
                DeployFile::Path(PathBuf::from("data")),
                DeployFile::Path(PathBuf::from("logs")),
                DeployFile::TargetOutput(Cow::Borrowed("vulkan")),
            ],
        );

        let deployed = package(&model)?;

        let deploy = temp.path().join("deploy");
        assert_eq!(
            deployed,
            vec![deploy.join("data"), deploy.join("logs"), deploy.join("vulkan.exe")]
        );
        assert!(deploy.join("data/shaders/a.vert.spv").exists());
        assert!(deploy.join("logs").is_dir());
        assert_eq!(fs::read_to_string(deploy.join("vulkan.exe"))?, "MZ");
        assert!(!deploy.join("old_release.zip").exists());
        Ok(())
    }

    #[test]
    fn test_missing_entry_leaves_the_deploy_dir_untouched() -> Result<()> {
        let temp = tempdir()?;
        fs::create_dir_all(temp.path().join("out").join("data"))?;
        fs::create_dir_all(temp.path().join("deploy"))?;
        fs::write(temp.path().join("deploy").join("previous.exe"), "MZ")?;

        let model = model(
            temp.path(),
            vec![
                DeployFile::Path(PathBuf::from("data")),
                DeployFile::TargetOutput(Cow::Borrowed("vulkan")),
            ],
        );

        let err = package(&model).unwrap_err();

        assert_eq!(
            err.downcast_ref::<BuildError>(),
            Some(&BuildError::DeploymentEntryMissing(
                temp.path().join("out").join("vulkan.exe")
            ))
        );
        assert!(temp.path().join("deploy").join("previous.exe").exists());
        Ok(())
    }
}
