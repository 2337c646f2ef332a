//! Filesystem abstraction for image queries.
//!
//! Paths are slash-separated and relative to the filesystem root. Absolute
//! paths and paths containing `.` or `..` elements are rejected.

use std::collections::HashMap;
use std::io;
use std::io::Cursor;
use std::path::PathBuf;

use async_trait::async_trait;
use bytes::Bytes;
use tokio::io::{AsyncRead, AsyncReadExt};

/// Read-only file access supplied by the caller.
#[async_trait]
pub trait FileSystem: Send + Sync {
    /// Open the file at `path` for reading.
    async fn open(&self, path: &str) -> io::Result<Box<dyn AsyncRead + Send + Unpin>>;

    /// Read the whole file at `path`.
    async fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        let mut reader = self.open(path).await?;
        let mut data = Vec::new();
        reader.read_to_end(&mut data).await?;
        Ok(data)
    }
}

/// Whether `path` is a valid relative, slash-separated path.
pub fn valid_path(path: &str) -> bool {
    if path == "." {
        return true;
    }
    !path.is_empty()
        && path
            .split('/')
            .all(|elem| !elem.is_empty() && elem != "." && elem != ".." && !elem.contains('\\'))
}

fn invalid_path(path: &str) -> io::Error {
    io::Error::new(io::ErrorKind::InvalidInput, format!("invalid path: {path}"))
}

/// Filesystem rooted at a local directory.
#[derive(Debug, Clone)]
pub struct DirFs {
    root: PathBuf,
}

impl DirFs {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    fn resolve(&self, path: &str) -> io::Result<PathBuf> {
        if !valid_path(path) {
            return Err(invalid_path(path));
        }
        Ok(path.split('/').fold(self.root.clone(), |acc, elem| acc.join(elem)))
    }
}

#[async_trait]
impl FileSystem for DirFs {
    async fn open(&self, path: &str) -> io::Result<Box<dyn AsyncRead + Send + Unpin>> {
        let file = tokio::fs::File::open(self.resolve(path)?).await?;
        Ok(Box::new(file))
    }

    async fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        tokio::fs::read(self.resolve(path)?).await
    }
}

/// In-memory filesystem.
#[derive(Debug, Clone, Default)]
pub struct MapFs {
    files: HashMap<String, Bytes>,
}

impl MapFs {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a file.
    pub fn with_file(mut self, path: impl Into<String>, data: impl Into<Bytes>) -> Self {
        self.insert(path, data);
        self
    }

    pub fn insert(&mut self, path: impl Into<String>, data: impl Into<Bytes>) {
        self.files.insert(path.into(), data.into());
    }

    fn get(&self, path: &str) -> io::Result<Bytes> {
        if !valid_path(path) {
            return Err(invalid_path(path));
        }
        self.files.get(path).cloned().ok_or_else(|| {
            io::Error::new(io::ErrorKind::NotFound, format!("file does not exist: {path}"))
        })
    }
}

#[async_trait]
impl FileSystem for MapFs {
    async fn open(&self, path: &str) -> io::Result<Box<dyn AsyncRead + Send + Unpin>> {
        Ok(Box::new(Cursor::new(self.get(path)?)))
    }

    async fn read_file(&self, path: &str) -> io::Result<Vec<u8>> {
        Ok(self.get(path)?.to_vec())
    }
}
