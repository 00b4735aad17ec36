//! External collaborators: where inputs come from and where outputs go.
//!
//! The pipeline only talks to these traits. The directory-backed
//! implementations mirror a remote drop folder and an object store on the
//! local filesystem.

use std::fs;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("remote file not found: {name}")]
    NotFound { name: String },

    #[error("invalid remote file name {name:?}")]
    InvalidName { name: String },

    #[error("failed to fetch {name}: {source}")]
    Read {
        name: String,
        #[source]
        source: std::io::Error,
    },
}

#[derive(Debug, Error)]
pub enum SinkError {
    #[error("invalid destination {destination:?}")]
    InvalidDestination { destination: String },

    #[error("failed to upload {destination}: {source}")]
    Write {
        destination: String,
        #[source]
        source: std::io::Error,
    },
}

/// Yields named files from the remote drop folder.
pub trait FileSource: Send + Sync {
    /// Human-readable location, used in logs.
    fn describe(&self) -> String;

    fn fetch(&self, remote_name: &str) -> Result<Vec<u8>, SourceError>;
}

/// Accepts named uploads into a bucket.
pub trait ArtifactSink: Send + Sync {
    fn describe(&self) -> String;

    fn upload(
        &self,
        bucket: &str,
        destination: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), SinkError>;
}

/// True when `name` is a plain relative path that stays below its root.
fn is_contained(name: &str) -> bool {
    let path = Path::new(name);
    !name.is_empty()
        && path
            .components()
            .all(|component| matches!(component, Component::Normal(_)))
}

/// Serves files from a local directory.
#[derive(Debug, Clone)]
pub struct DirectorySource {
    root: PathBuf,
}

impl DirectorySource {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }
}

impl FileSource for DirectorySource {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn fetch(&self, remote_name: &str) -> Result<Vec<u8>, SourceError> {
        if !is_contained(remote_name) {
            return Err(SourceError::InvalidName {
                name: remote_name.to_string(),
            });
        }
        fs::read(self.root.join(remote_name)).map_err(|source| {
            if source.kind() == ErrorKind::NotFound {
                SourceError::NotFound {
                    name: remote_name.to_string(),
                }
            } else {
                SourceError::Read {
                    name: remote_name.to_string(),
                    source,
                }
            }
        })
    }
}

/// Stores uploads as `<root>/<bucket>/<destination>`.
#[derive(Debug, Clone)]
pub struct DirectorySink {
    root: PathBuf,
}

impl DirectorySink {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// Where an upload ends up on disk.
    pub fn object_path(&self, bucket: &str, destination: &str) -> PathBuf {
        self.root.join(bucket).join(destination)
    }
}

impl ArtifactSink for DirectorySink {
    fn describe(&self) -> String {
        self.root.display().to_string()
    }

    fn upload(
        &self,
        bucket: &str,
        destination: &str,
        bytes: &[u8],
        content_type: Option<&str>,
    ) -> Result<(), SinkError> {
        if !is_contained(bucket) || !is_contained(destination) {
            return Err(SinkError::InvalidDestination {
                destination: format!("{bucket}/{destination}"),
            });
        }
        let path = self.object_path(bucket, destination);
        let write_error = |source| SinkError::Write {
            destination: destination.to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(write_error)?;
        }
        fs::write(&path, bytes).map_err(write_error)?;
        tracing::debug!(
            path = %path.display(),
            bytes = bytes.len(),
            content_type = content_type.unwrap_or("-"),
            "stored upload"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn directory_source_reads_and_reports_missing() {
        let dir = TempDir::new().unwrap();
        fs::write(dir.path().join("Leela Diamond_natural.csv"), b"a,b\n").unwrap();
        let source = DirectorySource::new(dir.path());

        assert_eq!(source.fetch("Leela Diamond_natural.csv").unwrap(), b"a,b\n");
        assert!(matches!(
            source.fetch("missing.csv"),
            Err(SourceError::NotFound { .. })
        ));
        assert!(matches!(
            source.fetch("../etc/passwd"),
            Err(SourceError::InvalidName { .. })
        ));
    }

    #[test]
    fn directory_sink_writes_under_bucket() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        sink.upload("bucket", "Googlefinal/feed.csv", b"id\n", Some("text/csv"))
            .unwrap();

        let stored = fs::read(dir.path().join("bucket/Googlefinal/feed.csv")).unwrap();
        assert_eq!(stored, b"id\n");
    }

    #[test]
    fn directory_sink_rejects_escaping_paths() {
        let dir = TempDir::new().unwrap();
        let sink = DirectorySink::new(dir.path());

        for destination in ["/abs/feed.csv", "../feed.csv", ""] {
            assert!(matches!(
                sink.upload("bucket", destination, b"", None),
                Err(SinkError::InvalidDestination { .. })
            ));
        }
    }
}
