//! Directory tree rendering: indented listing with box-drawing prefixes.

use anyhow::{Context, Result};
use std::path::Path;
use walkdir::{DirEntry, WalkDir};

/// Render an indented tree of the directory at `root`.
///
/// Directories are always listed; regular files only when `include_files`,
/// annotated with their byte size (`name (123b)`, or `name (empty)` for zero
/// bytes). Entries appear in name order and are recursed depth-first. The
/// last entry of each listing gets a `└───` prefix, earlier ones `├───`, with
/// `│`-columns continuing open ancestor levels. A root that is not a
/// directory is an error, as are unreadable paths, which abort the remaining
/// traversal of that branch.
pub fn render(root: &Path, include_files: bool) -> Result<String> {
    let root_meta = root.metadata().context("read root metadata")?;
    if !root_meta.is_dir() {
        anyhow::bail!("Not a directory: {}", root.display());
    }

    let mut out = String::new();
    render_level(&mut out, root, include_files, "")?;
    Ok(out)
}

/// Render one directory level into `out`. `prefix` carries the continuation
/// columns of every open ancestor level.
fn render_level(out: &mut String, dir: &Path, include_files: bool, prefix: &str) -> Result<()> {
    let entries = list_level(dir, include_files)?;
    let last = entries.len().saturating_sub(1);

    for (i, entry) in entries.iter().enumerate() {
        let (branch, continuation) = match i == last {
            true => ("└───", "\t"),
            false => ("├───", "│\t"),
        };
        let name = entry.file_name().to_string_lossy();

        if entry.file_type().is_dir() {
            out.push_str(&format!("{prefix}{branch}{name}\n"));
            render_level(
                out,
                entry.path(),
                include_files,
                &format!("{prefix}{continuation}"),
            )?;
        } else {
            let meta = entry
                .metadata()
                .with_context(|| format!("read metadata of {}", entry.path().display()))?;
            out.push_str(&format!("{prefix}{branch}{}\n", file_label(&name, meta.len())));
        }
    }
    Ok(())
}

/// List one level of `dir` in name order. When `include_files` is false only
/// directories are kept, so the last-entry prefix is decided against the
/// filtered listing.
fn list_level(dir: &Path, include_files: bool) -> Result<Vec<DirEntry>> {
    let mut entries = Vec::new();
    for entry in WalkDir::new(dir).min_depth(1).max_depth(1).sort_by_file_name() {
        let entry = entry.with_context(|| format!("list directory {}", dir.display()))?;
        if include_files || entry.file_type().is_dir() {
            entries.push(entry);
        }
    }
    Ok(entries)
}

/// File line label: name plus byte size, `(empty)` for zero-length files.
fn file_label(name: &str, size: u64) -> String {
    match size > 0 {
        true => format!("{name} ({size}b)"),
        false => format!("{name} (empty)"),
    }
}
