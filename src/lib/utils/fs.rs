use std::{
    fs::{self, DirBuilder, File},
    io::{BufWriter, Write},
    path::{Component, Path, PathBuf},
};

use color_eyre::{eyre::Context, Result};
use serde::Serialize;
use walkdir::WalkDir;

use crate::domain::errors::BuildError;

pub fn create_directory(path_create: &Path) -> Result<()> {
    DirBuilder::new()
        .recursive(true)
        .create(path_create)
        .with_context(|| format!("Could not create directory {path_create:?}"))
}

/// Removes a whole directory tree. A missing directory isn't an error
pub fn remove_dir_if_exists(path: &Path) -> Result<()> {
    if path.exists() {
        fs::remove_dir_all(path).with_context(|| format!("Could not remove directory {path:?}"))?;
    }
    Ok(())
}

/// Gets the absolute route for an element in the system given a path P,
/// without the extended path prefix on Windows
pub fn get_project_root_absolute_path(project_root: &Path) -> Result<PathBuf> {
    let mut canonical = project_root.canonicalize().with_context(|| {
        format!("Error getting the canonical path for the project root: {project_root:?}")
    })?;
    if cfg!(target_os = "windows") {
        canonical = canonical
            .to_str()
            .map(|unc| PathBuf::from(unc.trim_start_matches(r"\\?\")))
            .unwrap_or(canonical);
    }

    Ok(canonical)
}

/// Recursively copies the tree under `from` into `to`, replacing the files that
/// already exist at the same relative paths. Files in `to` that are absent
/// from `from` are left untouched
pub fn copy_dir_all(from: &Path, to: &Path) -> Result<u64> {
    let mut copied = 0;

    for entry in WalkDir::new(from).follow_links(true) {
        let entry = entry.with_context(|| format!("Could not walk the directory {from:?}"))?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .with_context(|| format!("{:?} is not under {from:?}", entry.path()))?;
        let destination = to.join(relative);

        if entry.file_type().is_dir() {
            create_directory(&destination)?;
        } else {
            fs::copy(entry.path(), &destination).with_context(|| {
                format!("Could not copy {:?} to {destination:?}", entry.path())
            })?;
            copied += 1;
        }
    }

    Ok(copied)
}

/// Copies a single file or a whole directory tree
pub fn copy_entry(from: &Path, to: &Path) -> Result<u64> {
    if from.is_dir() {
        return copy_dir_all(from, to);
    }

    if let Some(parent) = to.parent() {
        create_directory(parent)?;
    }
    fs::copy(from, to).with_context(|| format!("Could not copy {from:?} to {to:?}"))?;
    Ok(1)
}

/// Checks that `path` is relative and that it never climbs above the directory
/// that it will be joined to
pub fn ensure_contained_relative_path(path: &Path) -> Result<(), BuildError> {
    let mut depth: i32 = 0;
    for component in path.components() {
        match component {
            Component::Normal(_) => depth += 1,
            Component::CurDir => {}
            Component::ParentDir => {
                depth -= 1;
                if depth < 0 {
                    return Err(BuildError::InvalidRelativePath(path.to_path_buf()));
                }
            }
            Component::RootDir | Component::Prefix(_) => {
                return Err(BuildError::InvalidRelativePath(path.to_path_buf()))
            }
        }
    }

    Ok(())
}

/// Lexically resolves a contained relative path, dropping every `.` and
/// folding every `..` into its parent. `.` resolves to an empty path
pub fn normalize_contained_relative_path(path: &Path) -> Result<PathBuf, BuildError> {
    ensure_contained_relative_path(path)?;

    let mut normalized = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Normal(part) => normalized.push(part),
            Component::ParentDir => {
                normalized.pop();
            }
            _ => {}
        }
    }

    Ok(normalized)
}

/// Serializes `data` as pretty JSON into the file at `path`
pub fn save_file<T>(path: &Path, data: &T) -> Result<()>
where
    T: Serialize + ?Sized,
{
    let file = File::create(path).with_context(|| format!("Error opening the file: {path:?}"))?;
    let mut writer = BufWriter::new(file);
    serde_json::to_writer_pretty(&mut writer, data)
        .with_context(|| format!("Error serializing data to: {path:?}"))?;
    writer
        .flush()
        .with_context(|| format!("Error flushing the file: {path:?}"))
}
