//! Key-addressed file store confined to a data directory.
//!
//! Names come straight from the request path and may contain `/`. They are
//! resolved lexically first and then checked against the canonical data
//! directory, so neither `..` segments nor symlinks can reach files outside it.

use crate::{Error, Result};
use bytes::Bytes;
use futures::{Stream, StreamExt};
use std::io;
use std::path::{Component, Path, PathBuf};
use tokio::fs::{self, File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tracing::debug;

#[derive(Debug, Clone)]
pub struct FileStore {
    base: PathBuf,
}

impl FileStore {
    pub fn new(base: impl Into<PathBuf>) -> Self {
        Self { base: base.into() }
    }

    /// Map `name` to a path under the data directory without touching the filesystem.
    pub fn resolve(&self, name: &str) -> Result<PathBuf> {
        let mut relative = PathBuf::new();

        for component in Path::new(name).components() {
            match component {
                Component::Normal(segment) => relative.push(segment),
                Component::CurDir => {}
                Component::ParentDir => {
                    if !relative.pop() {
                        return Err(Error::PathEscape {
                            name: name.to_string(),
                        });
                    }
                }
                Component::RootDir | Component::Prefix(_) => {
                    return Err(Error::PathEscape {
                        name: name.to_string(),
                    });
                }
            }
        }

        if relative.as_os_str().is_empty() {
            return Err(Error::InvalidName(name.to_string()));
        }

        Ok(self.base.join(relative))
    }

    /// Canonicalize the deepest existing ancestor of `path` and make sure it
    /// is still inside the data directory. A dangling symlink on the way is
    /// rejected, since creating through it would land wherever it points.
    async fn ensure_contained(&self, name: &str, path: &Path) -> Result<()> {
        let base = fs::canonicalize(&self.base).await?;

        let mut probe = Some(path);
        while let Some(candidate) = probe {
            match fs::canonicalize(candidate).await {
                Ok(real) => {
                    if real.starts_with(&base) {
                        return Ok(());
                    }
                    return Err(Error::PathEscape {
                        name: name.to_string(),
                    });
                }
                Err(e) if e.kind() == io::ErrorKind::NotFound => {
                    if fs::symlink_metadata(candidate).await.is_ok() {
                        return Err(Error::PathEscape {
                            name: name.to_string(),
                        });
                    }
                    probe = candidate.parent();
                }
                Err(e) => return Err(e.into()),
            }
        }

        Err(Error::PathEscape {
            name: name.to_string(),
        })
    }

    /// Create or truncate `name` and copy `body` into it chunk by chunk.
    ///
    /// A body error midway leaves the partially written file in place.
    pub async fn write<S, E>(&self, name: &str, body: S) -> Result<u64>
    where
        S: Stream<Item = std::result::Result<Bytes, E>>,
        E: std::fmt::Display,
    {
        let path = self.resolve(name)?;
        self.ensure_contained(name, &path).await?;

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).await?;
            self.ensure_contained(name, parent).await?;
        }

        let mut file = OpenOptions::new()
            .create(true)
            .write(true)
            .truncate(true)
            .open(&path)
            .await?;

        let mut written = 0u64;
        let mut body = std::pin::pin!(body);
        while let Some(chunk) = body.next().await {
            let chunk = chunk.map_err(|e| Error::Body(e.to_string()))?;
            file.write_all(&chunk).await?;
            written += chunk.len() as u64;
        }
        file.flush().await?;

        debug!(bytes = written, name, "file written");
        Ok(written)
    }

    /// Open `name` for streaming reads.
    pub async fn open(&self, name: &str) -> Result<File> {
        let path = self.resolve(name)?;
        self.ensure_contained(name, &path).await?;

        let file = File::open(&path).await?;
        if !file.metadata().await?.is_file() {
            return Err(Error::NotAFile(name.to_string()));
        }
        Ok(file)
    }

    /// Names of the direct entries of the data directory.
    pub async fn list(&self) -> Result<Vec<String>> {
        let mut entries = fs::read_dir(&self.base).await?;
        let mut names = Vec::new();

        while let Some(entry) = entries.next_entry().await? {
            names.push(entry.file_name().to_string_lossy().into_owned());
        }

        Ok(names)
    }
}
