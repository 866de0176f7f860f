// src/fs/mod.rs

use std::fmt::Debug;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::warn;
use walkdir::WalkDir;

pub mod mock;

/// Abstract filesystem interface used by discovery.
pub trait FileSystem: Send + Sync + Debug {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>>;
    fn is_file(&self, path: &Path) -> bool;
    fn is_dir(&self, path: &Path) -> bool;

    /// Return every file beneath `root`, recursively, sorted by path.
    /// Returns full paths.
    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>>;
}

/// Implementation that uses `std::fs` and `walkdir`.
#[derive(Debug, Clone, Default)]
pub struct RealFileSystem;

impl FileSystem for RealFileSystem {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        fs::read(path).with_context(|| format!("reading file {:?}", path))
    }

    fn is_file(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        if !root.is_dir() {
            anyhow::bail!("not a directory: {:?}", root);
        }

        let mut files = Vec::new();
        for entry in WalkDir::new(root).follow_links(true).sort_by_file_name() {
            match entry {
                Ok(entry) if entry.file_type().is_file() => files.push(entry.into_path()),
                Ok(_) => {}
                Err(err) => {
                    // Unreadable subtrees are skipped; the rest of the walk goes on.
                    warn!(root = %root.display(), error = %err, "skipping unreadable entry");
                }
            }
        }
        files.sort();
        Ok(files)
    }
}
