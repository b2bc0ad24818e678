//! Stages the data directories declared by the project next to the built binaries

use std::path::PathBuf;

use color_eyre::eyre::{Context, Result};

use crate::domain::errors::BuildError;
use crate::project_model::assets::CopyDir;
use crate::project_model::ForgeModel;
use crate::utils;
use crate::utils::constants::error_messages;

/// Copies the tree at `<project_root>/<from>` into `<output_dir>/<to>`, returning
/// the destination.
///
/// Staging is idempotent: files already present at the destination are replaced
/// and extra files are left alone. A missing source is reported before a
/// single file gets copied, and so is a destination that lies inside the source
pub fn stage_copy_dir(model: &ForgeModel, copy_dir: &CopyDir) -> Result<PathBuf> {
    let source = model.build.project_root.join(&copy_dir.from);
    let destination = model.build.output_dir.join(&copy_dir.to);

    if !source.is_dir() {
        return Err(BuildError::AssetSourceMissing(source).into());
    }

    utils::fs::create_directory(&model.build.output_dir)?;
    let canonical_source = source
        .canonicalize()
        .with_context(|| format!("Unable to resolve the staging source: {source:?}"))?;
    let output_dir = &model.build.output_dir;
    let canonical_destination = output_dir
        .canonicalize()
        .with_context(|| format!("Unable to resolve the output directory: {output_dir:?}"))?
        .join(utils::fs::normalize_contained_relative_path(&copy_dir.to)?);
    if canonical_destination.starts_with(&canonical_source) {
        return Err(BuildError::RecursiveCopyDir {
            from: source,
            to: destination,
        }
        .into());
    }

    log::debug!("Staging {source:?} into {destination:?}");
    let copied = utils::fs::copy_dir_all(&source, &destination)?;
    log::trace!("Staged {copied} file(s) into {destination:?}");

    Ok(destination)
}

/// Stages every declared directory, in declaration order
pub fn stage_all(model: &ForgeModel) -> Result<Vec<PathBuf>> {
    model
        .copy_dirs
        .iter()
        .map(|copy_dir| stage_copy_dir(model, copy_dir))
        .collect::<Result<Vec<_>>>()
        .with_context(|| error_messages::FAILURE_STAGING_ASSETS)
}
