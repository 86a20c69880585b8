//! In-memory filesystem
//!
//! Mirrors the disk semantics the writer relies on (parents must exist,
//! non-recursive creation refuses existing entries) without touching disk.
//! Clones share the same tree, so a fake command runner can populate the
//! files an external scaffolder would have produced.

use super::FileSystem;
use async_trait::async_trait;
use std::collections::{BTreeMap, BTreeSet};
use std::io;
use std::path::{Component, Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

#[derive(Debug, Default)]
struct Tree {
    dirs: BTreeSet<PathBuf>,
    files: BTreeMap<PathBuf, Vec<u8>>,
}

impl Tree {
    fn dir_exists(&self, path: &Path) -> bool {
        is_root(path) || self.dirs.contains(path)
    }

    fn add_dir_all(&mut self, path: &Path) {
        for ancestor in path.ancestors() {
            if is_root(ancestor) {
                break;
            }
            self.dirs.insert(ancestor.to_path_buf());
        }
    }
}

fn is_root(path: &Path) -> bool {
    path.as_os_str().is_empty() || path.parent().is_none()
}

/// Drop `.` components so lookups are not sensitive to how paths were joined
fn normalize(path: &Path) -> PathBuf {
    path.components()
        .filter(|c| !matches!(c, Component::CurDir))
        .collect()
}

fn not_found(path: &Path) -> io::Error {
    io::Error::new(io::ErrorKind::NotFound, format!("{} not found", path.display()))
}

/// Shared in-memory directory tree
#[derive(Debug, Clone, Default)]
pub struct MemoryFs {
    tree: Arc<Mutex<Tree>>,
}

impl MemoryFs {
    pub fn new() -> Self {
        Self::default()
    }

    fn lock(&self) -> MutexGuard<'_, Tree> {
        // A panicking test thread must not hide the tree from the others
        self.tree.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    /// Create a file and any missing parent directories
    pub fn insert_file(&self, path: impl AsRef<Path>, content: &str) {
        let path = normalize(path.as_ref());
        let mut tree = self.lock();
        if let Some(parent) = path.parent() {
            tree.add_dir_all(parent);
        }
        tree.files.insert(path, content.as_bytes().to_vec());
    }

    /// Create a directory and its ancestors
    pub fn insert_dir(&self, path: impl AsRef<Path>) {
        self.lock().add_dir_all(&normalize(path.as_ref()));
    }

    pub fn is_dir(&self, path: impl AsRef<Path>) -> bool {
        self.lock().dir_exists(&normalize(path.as_ref()))
    }

    pub fn is_file(&self, path: impl AsRef<Path>) -> bool {
        self.lock().files.contains_key(&normalize(path.as_ref()))
    }

    pub fn file_contents(&self, path: impl AsRef<Path>) -> Option<String> {
        self.lock()
            .files
            .get(&normalize(path.as_ref()))
            .map(|bytes| String::from_utf8_lossy(bytes).into_owned())
    }

    /// All file paths, sorted
    pub fn files(&self) -> Vec<PathBuf> {
        self.lock().files.keys().cloned().collect()
    }
}

#[async_trait]
impl FileSystem for MemoryFs {
    async fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()> {
        let path = normalize(path);
        let mut tree = self.lock();

        if tree.files.contains_key(&path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} is a file", path.display()),
            ));
        }
        if recursive {
            tree.add_dir_all(&path);
            return Ok(());
        }
        if tree.dir_exists(&path) {
            return Err(io::Error::new(
                io::ErrorKind::AlreadyExists,
                format!("{} already exists", path.display()),
            ));
        }
        match path.parent() {
            Some(parent) if !tree.dir_exists(parent) => Err(not_found(parent)),
            _ => {
                tree.dirs.insert(path);
                Ok(())
            }
        }
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let path = normalize(path);
        let mut tree = self.lock();

        if tree.dir_exists(&path) {
            return Err(io::Error::new(
                io::ErrorKind::Other,
                format!("{} is a directory", path.display()),
            ));
        }
        if let Some(parent) = path.parent() {
            if !tree.dir_exists(parent) {
                return Err(not_found(parent));
            }
        }
        tree.files.insert(path, contents.to_vec());
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        let path = normalize(path);
        let tree = self.lock();
        let bytes = tree.files.get(&path).ok_or_else(|| not_found(&path))?;
        String::from_utf8(bytes.clone()).map_err(|e| io::Error::new(io::ErrorKind::InvalidData, e))
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        let path = normalize(path);
        let mut tree = self.lock();

        if tree.files.remove(&path).is_some() {
            return Ok(());
        }
        if !tree.dirs.contains(&path) {
            return Err(not_found(&path));
        }
        tree.dirs.retain(|d| !d.starts_with(&path));
        tree.files.retain(|f, _| !f.starts_with(&path));
        Ok(())
    }
}
