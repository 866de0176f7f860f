use super::FileSystem;
use anyhow::{anyhow, Result};
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone)]
pub enum MockEntry {
    File(Vec<u8>),
    /// Present in listings but fails on read.
    Unreadable,
    Dir(Vec<String>), // List of child names
}

/// In-memory filesystem for tests.
#[derive(Debug, Clone, Default)]
pub struct MockFileSystem {
    files: Arc<Mutex<HashMap<PathBuf, MockEntry>>>,
}

impl MockFileSystem {
    pub fn new() -> Self {
        let mut files = HashMap::new();
        // Ensure root exists
        files.insert(PathBuf::from("."), MockEntry::Dir(Vec::new()));

        Self {
            files: Arc::new(Mutex::new(files)),
        }
    }

    pub fn add_file(&self, path: impl AsRef<Path>, content: impl Into<Vec<u8>>) {
        self.insert(path.as_ref(), MockEntry::File(content.into()));
    }

    pub fn add_unreadable_file(&self, path: impl AsRef<Path>) {
        self.insert(path.as_ref(), MockEntry::Unreadable);
    }

    pub fn add_dir(&self, path: impl AsRef<Path>) {
        let mut files = self.files.lock().unwrap();
        Self::ensure_dir_entry(&mut files, path.as_ref());
    }

    fn insert(&self, path: &Path, entry: MockEntry) {
        let mut files = self.files.lock().unwrap();
        files.insert(path.to_path_buf(), entry);

        // Parent directories exist implicitly.
        let parent = parent_or_root(path);
        Self::ensure_dir_entry(&mut files, parent);
        Self::link_child(&mut files, parent, path);
    }

    fn ensure_dir_entry(files: &mut HashMap<PathBuf, MockEntry>, path: &Path) {
        if files.contains_key(path) {
            return;
        }
        files.insert(path.to_path_buf(), MockEntry::Dir(Vec::new()));

        let parent = parent_or_root(path);
        if parent != path {
            Self::ensure_dir_entry(files, parent);
            Self::link_child(files, parent, path);
        }
    }

    fn link_child(files: &mut HashMap<PathBuf, MockEntry>, parent: &Path, child: &Path) {
        if let Some(MockEntry::Dir(children)) = files.get_mut(parent) {
            if let Some(name) = child.file_name().and_then(|n| n.to_str()) {
                if !children.iter().any(|c| c == name) {
                    children.push(name.to_string());
                }
            }
        }
    }

    fn walk_into(
        files: &HashMap<PathBuf, MockEntry>,
        dir: &Path,
        out: &mut Vec<PathBuf>,
    ) {
        let Some(MockEntry::Dir(children)) = files.get(dir) else {
            return;
        };
        for name in children {
            let child = if dir == Path::new(".") {
                PathBuf::from(name)
            } else {
                dir.join(name)
            };
            match files.get(&child) {
                Some(MockEntry::Dir(_)) => Self::walk_into(files, &child, out),
                Some(_) => out.push(child),
                None => {}
            }
        }
    }
}

fn parent_or_root(path: &Path) -> &Path {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    }
}

impl FileSystem for MockFileSystem {
    fn read_bytes(&self, path: &Path) -> Result<Vec<u8>> {
        let files = self.files.lock().unwrap();
        match files.get(path) {
            Some(MockEntry::File(content)) => Ok(content.clone()),
            Some(MockEntry::Unreadable) => Err(anyhow!("Permission denied: {:?}", path)),
            Some(MockEntry::Dir(_)) => Err(anyhow!("Is a directory: {:?}", path)),
            None => Err(anyhow!("File not found: {:?}", path)),
        }
    }

    fn is_file(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(
            files.get(path),
            Some(MockEntry::File(_)) | Some(MockEntry::Unreadable)
        )
    }

    fn is_dir(&self, path: &Path) -> bool {
        let files = self.files.lock().unwrap();
        matches!(files.get(path), Some(MockEntry::Dir(_)))
    }

    fn walk_files(&self, root: &Path) -> Result<Vec<PathBuf>> {
        let files = self.files.lock().unwrap();
        if !matches!(files.get(root), Some(MockEntry::Dir(_))) {
            return Err(anyhow!("Not a directory or not found: {:?}", root));
        }
        let mut out = Vec::new();
        Self::walk_into(&files, root, &mut out);
        out.sort();
        Ok(out)
    }
}
