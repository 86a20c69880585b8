//! Filesystem backed by the real disk through `tokio::fs`

use super::FileSystem;
use async_trait::async_trait;
use std::ffi::OsString;
use std::io;
use std::path::{Path, PathBuf};
use tokio::fs;

#[derive(Debug, Clone, Copy, Default)]
pub struct DiskFs;

impl DiskFs {
    pub fn new() -> Self {
        Self
    }
}

/// Hidden sibling used to stage a write before the rename
fn staging_path(path: &Path) -> io::Result<PathBuf> {
    let file_name = path.file_name().ok_or_else(|| {
        io::Error::new(
            io::ErrorKind::InvalidInput,
            format!("{} has no file name", path.display()),
        )
    })?;
    let mut staged = OsString::from(".");
    staged.push(file_name);
    staged.push(".tmp");
    Ok(path.with_file_name(staged))
}

#[async_trait]
impl FileSystem for DiskFs {
    async fn create_dir(&self, path: &Path, recursive: bool) -> io::Result<()> {
        if recursive {
            fs::create_dir_all(path).await
        } else {
            fs::create_dir(path).await
        }
    }

    async fn write(&self, path: &Path, contents: &[u8]) -> io::Result<()> {
        let staged = staging_path(path)?;
        if let Err(e) = fs::write(&staged, contents).await {
            let _ = fs::remove_file(&staged).await;
            return Err(e);
        }
        if let Err(e) = fs::rename(&staged, path).await {
            let _ = fs::remove_file(&staged).await;
            return Err(e);
        }
        Ok(())
    }

    async fn read_to_string(&self, path: &Path) -> io::Result<String> {
        fs::read_to_string(path).await
    }

    async fn remove(&self, path: &Path) -> io::Result<()> {
        let metadata = fs::symlink_metadata(path).await?;
        if metadata.is_dir() {
            fs::remove_dir_all(path).await
        } else {
            fs::remove_file(path).await
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ScaffoldError;
    use crate::fs::FsWriter;
    use serde_json::json;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_write_replaces_file_without_leftovers() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("tailwind.config.ts");
        let writer = FsWriter::new(DiskFs::new());

        writer.write_file(&path, "old").await.unwrap();
        writer.write_file(&path, "new").await.unwrap();

        assert_eq!(std::fs::read_to_string(&path).unwrap(), "new");
        let entries: Vec<_> = std::fs::read_dir(temp_dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1);
    }

    #[tokio::test]
    async fn test_write_into_missing_directory_fails() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("missing").join("page.tsx");
        let writer = FsWriter::new(DiskFs::new());

        let err = writer.write_file(&path, "x").await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { action: "write", .. }));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_make_directory_twice() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("src").join("components").join("ui");
        let writer = FsWriter::new(DiskFs::new());

        writer.make_directory(&path, true).await.unwrap();
        writer.make_directory(&path, true).await.unwrap();
        assert!(path.is_dir());

        let err = writer.make_directory(&path, false).await.unwrap_err();
        assert!(matches!(err, ScaffoldError::Io { .. }));
    }

    #[tokio::test]
    async fn test_merge_json_on_disk() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("package.json");
        std::fs::write(&path, r#"{"name":"x","dependencies":{"a":"1"}}"#).unwrap();
        let writer = FsWriter::new(DiskFs::new());

        let patch = json!({"b": "2"}).as_object().cloned().unwrap();
        writer.merge_json(&path, "dependencies", &patch).await.unwrap();

        let value: serde_json::Value =
            serde_json::from_str(&std::fs::read_to_string(&path).unwrap()).unwrap();
        assert_eq!(value, json!({"name": "x", "dependencies": {"a": "1", "b": "2"}}));
    }

    #[tokio::test]
    async fn test_remove_file_and_tree() {
        let temp_dir = TempDir::new().unwrap();
        let modules = temp_dir.path().join("node_modules").join("pkg");
        std::fs::create_dir_all(&modules).unwrap();
        std::fs::write(modules.join("index.js"), "").unwrap();
        let manifest = temp_dir.path().join("package.json");
        std::fs::write(&manifest, "{}").unwrap();
        let writer = FsWriter::new(DiskFs::new());

        writer.remove_path(&temp_dir.path().join("node_modules")).await.unwrap();
        writer.remove_path(&manifest).await.unwrap();
        writer.remove_path(&manifest).await.unwrap();

        assert!(!temp_dir.path().join("node_modules").exists());
        assert!(!manifest.exists());
    }
}
