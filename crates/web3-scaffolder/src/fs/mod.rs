//! Filesystem access for generation steps
//!
//! This module provides:
//! - The [`FileSystem`] trait, implemented for the real disk and in memory
//! - [`FsWriter`], which applies directory, file, manifest-merge and removal steps

pub mod disk;
pub mod memory;

pub use disk::DiskFs;
pub use memory::MemoryFs;

use crate::error::{Result, ScaffoldError};
use async_trait::async_trait;
use serde_json::{Map, Value};
use std::io;
use std::path::Path;

/// Primitive filesystem operations the writer is built on
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Create a directory; with `recursive` missing parents are created and
    /// an existing directory is not an error
    async fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()>;

    /// Replace the file at `path` with `contents` as a single unit
    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()>;

    async fn read_to_string(&self, path: &Path) -> io::Result<String>;

    /// Remove a file, or a directory with everything below it
    async fn remove(&self, path: &Path) -> io::Result<()>;
}

/// Applies the filesystem kinds of generation step
#[derive(Debug, Clone)]
pub struct FsWriter<F> {
    fs: F,
}

impl<F: FileSystem> FsWriter<F> {
    pub fn new(fs: F) -> Self {
        Self { fs }
    }

    pub fn file_system(&self) -> &F {
        &self.fs
    }

    pub async fn make_directory(&self, path: &Path, recursive: bool) -> Result<()> {
        log::debug!("Creating directory {} (recursive: {})", path.display(), recursive);
        self.fs
            .create_dir(path, recursive)
            .await
            .map_err(|e| ScaffoldError::io("create directory", path, e))
    }

    pub async fn write_file(&self, path: &Path, content: &str) -> Result<()> {
        log::debug!("Writing {} ({} bytes)", path.display(), content.len());
        self.fs
            .write(path, content.as_bytes())
            .await
            .map_err(|e| ScaffoldError::io("write", path, e))
    }

    /// Shallow-merge `patch` into the object stored under `key` in a JSON file
    ///
    /// Sibling keys and their order are preserved. The file is rewritten with
    /// two-space indentation and a trailing newline.
    pub async fn merge_json(&self, path: &Path, key: &str, patch: &Map<String, Value>) -> Result<()> {
        log::debug!("Merging {} key(s) into `{}` of {}", patch.len(), key, path.display());
        let content = self
            .fs
            .read_to_string(path)
            .await
            .map_err(|e| ScaffoldError::io("read", path, e))?;

        let merged = merge_into_key(&content, key, patch).map_err(|message| {
            ScaffoldError::ManifestParse {
                path: path.to_path_buf(),
                message,
            }
        })?;

        self.write_file(path, &merged).await
    }

    /// Remove a file or directory tree; a missing target is left alone
    pub async fn remove_path(&self, path: &Path) -> Result<()> {
        log::debug!("Removing {}", path.display());
        match self.fs.remove(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => {
                log::debug!("{} already absent", path.display());
                Ok(())
            }
            Err(e) => Err(ScaffoldError::io("remove", path, e)),
        }
    }
}

/// Parse `content`, merge `patch` into `root[key]`, and render it back
fn merge_into_key(content: &str, key: &str, patch: &Map<String, Value>) -> std::result::Result<String, String> {
    let mut root: Value = serde_json::from_str(content).map_err(|e| e.to_string())?;
    let object = root
        .as_object_mut()
        .ok_or_else(|| "top-level value is not an object".to_string())?;

    let target = object
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    if target.is_null() {
        *target = Value::Object(Map::new());
    }
    let target = target
        .as_object_mut()
        .ok_or_else(|| format!("`{}` is not an object", key))?;

    for (name, value) in patch {
        target.insert(name.clone(), value.clone());
    }

    let mut rendered = serde_json::to_string_pretty(&root).map_err(|e| e.to_string())?;
    rendered.push('\n');
    Ok(rendered)
}
