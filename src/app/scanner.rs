use crate::app::error::FormatError;
use crate::app::models::{FileTask, RuntimeConfig};
use anyhow::{Context, Result};
use globset::{Glob, GlobSet, GlobSetBuilder};
use ignore::WalkBuilder;
use pathdiff::diff_paths;
use std::collections::HashSet;
use std::path::{Path, PathBuf};

/// Finds the source files under one target directory.
pub struct Scanner {
    root: PathBuf,
    extensions: HashSet<String>,
    exclude_set: GlobSet,
}

impl Scanner {
    /// Fails with `InvalidInput` unless `root` is an existing directory.
    pub fn new(root: &Path, config: &RuntimeConfig) -> Result<Self> {
        if !root.is_dir() {
            return Err(FormatError::InvalidInput {
                path: root.to_path_buf(),
            }
            .into());
        }

        Ok(Self {
            root: root.to_path_buf(),
            extensions: config.extensions.iter().cloned().collect(),
            exclude_set: build_globset(&config.exclude)?,
        })
    }

    /// Walks the whole tree. Nothing is skipped for being hidden or git-ignored.
    /// Symlinks are not followed into directories.
    pub fn scan(&self) -> Vec<FileTask> {
        let mut tasks = Vec::new();

        let walker = WalkBuilder::new(&self.root)
            .standard_filters(false)
            .follow_links(false)
            .build();

        for result in walker {
            match result {
                Ok(entry) => {
                    // Symlinks to files count; symlinked directories are not descended.
                    let is_file = entry.file_type().is_some_and(|ft| {
                        ft.is_file() || (ft.is_symlink() && entry.path().is_file())
                    });
                    if !is_file {
                        continue;
                    }
                    if let Some(task) = self.process_entry(entry.path()) {
                        tasks.push(task);
                    }
                }
                Err(err) => log::warn!("Error walking entry: {}", err),
            }
        }

        tasks.sort_by(|a, b| a.path.cmp(&b.path));
        tasks
    }

    fn process_entry(&self, path: &Path) -> Option<FileTask> {
        let ext = path.extension()?.to_str()?;
        if !self.extensions.contains(ext) {
            return None;
        }

        let relative = diff_paths(path, &self.root)?;
        if self.exclude_set.is_match(&relative) {
            log::debug!("Excluded {}", relative.display());
            return None;
        }

        Some(FileTask {
            path: path.to_path_buf(),
            relative_path: relative.to_string_lossy().to_string(),
        })
    }
}

fn build_globset(patterns: &[String]) -> Result<GlobSet> {
    let mut builder = GlobSetBuilder::new();
    for pat in patterns {
        builder.add(Glob::new(pat).context(format!("Invalid glob pattern: {}", pat))?);
    }
    Ok(builder.build()?)
}
