//! File discovery: directory recursion, the default ignore set, and the
//! fixed skip list of auxiliary documents that are not interview files.

use anyhow::{bail, Context, Result};
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

/// Version-control and dependency-style directories skipped by default.
pub const DEFAULT_IGNORED_DIRS: &[&str] = &[
    ".git",
    ".hg",
    ".svn",
    "node_modules",
    "__pycache__",
    ".venv",
    "venv",
    ".tox",
    ".mypy_cache",
    "target",
];

/// Known auxiliary documents that live next to interview files but are not
/// interviews themselves. They are skipped with no errors produced.
pub const AUXILIARY_FILES: &[&str] = &[
    "pgcodecache.yml",
    "title_documentation.yml",
    "documentation.yml",
    "docstring.yml",
    "example-list.yml",
    "examples.yml",
];

/// Whether a path names one of the known auxiliary documents.
#[must_use]
pub fn is_auxiliary(path: &Path) -> bool {
    let rendered = path.to_string_lossy();
    AUXILIARY_FILES.iter().any(|name| rendered.ends_with(name))
}

/// Resolve the CLI's path arguments into the ordered list of files to
/// check. Directories recurse in file-name order; explicit file arguments
/// are taken as-is.
pub fn collect_targets(
    paths: &[PathBuf],
    extra_ignored: &[String],
    no_default_ignores: bool,
) -> Result<Vec<PathBuf>> {
    let mut ignored: Vec<&str> = if no_default_ignores {
        Vec::new()
    } else {
        DEFAULT_IGNORED_DIRS.to_vec()
    };
    ignored.extend(extra_ignored.iter().map(String::as_str));

    let mut targets = Vec::new();
    for path in paths {
        if path.is_dir() {
            collect_from_directory(path, &ignored, &mut targets)?;
        } else if path.is_file() {
            if !is_auxiliary(path) {
                targets.push(path.clone());
            }
        } else {
            bail!("no such file or directory: {}", path.display());
        }
    }
    Ok(targets)
}

fn collect_from_directory(
    root: &Path,
    ignored: &[&str],
    targets: &mut Vec<PathBuf>,
) -> Result<()> {
    let walker = WalkDir::new(root)
        .sort_by_file_name()
        .into_iter()
        .filter_entry(|entry| {
            // The root the user named is always walked, whatever it is called.
            entry.depth() == 0
                || !(entry.file_type().is_dir()
                    && ignored
                        .iter()
                        .any(|name| entry.file_name().to_string_lossy() == *name))
        });

    for entry in walker {
        let entry =
            entry.with_context(|| format!("failed to walk directory {}", root.display()))?;
        if !entry.file_type().is_file() {
            continue;
        }
        let path = entry.path();
        let is_yaml = path
            .extension()
            .is_some_and(|ext| ext == "yml" || ext == "yaml");
        if is_yaml && !is_auxiliary(path) {
            targets.push(path.to_path_buf());
        }
    }
    Ok(())
}
