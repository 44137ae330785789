use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use thiserror::Error;
use tokio::io::AsyncWriteExt;

const ARTIFACT_PREFIX: &str = "enrollment_certificate_";
const ARTIFACT_EXTENSION: &str = "pdf";

/// Collisions are resolved by bumping the millisecond suffix; this bounds the
/// search when the directory is flooded with same-instant artifacts.
const MAX_NAME_ATTEMPTS: i64 = 1000;

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("failed to write artifact {path}: {source}")]
    Write {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to read artifact {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("no free artifact name in {dir} near timestamp {millis}")]
    NamesExhausted { dir: PathBuf, millis: i64 },
}

/// Creates the artifact directory if missing. Safe to call repeatedly.
pub fn ensure_dir(artifact_dir: &Path) -> std::io::Result<()> {
    std::fs::create_dir_all(artifact_dir)
}

pub fn artifact_filename(millis: i64) -> String {
    format!("{ARTIFACT_PREFIX}{millis}.{ARTIFACT_EXTENSION}")
}

/// Whether `name` looks like a file this module stages.
pub fn is_artifact_name(name: &str) -> bool {
    name.strip_prefix(ARTIFACT_PREFIX)
        .and_then(|rest| rest.strip_suffix(".pdf"))
        .is_some_and(|stamp| !stamp.is_empty() && stamp.bytes().all(|b| b.is_ascii_digit()))
}

/// A PDF staged on disk for the lifetime of one request.
#[derive(Debug)]
pub struct StagedArtifact {
    path: PathBuf,
    filename: String,
}

impl StagedArtifact {
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn filename(&self) -> &str {
        &self.filename
    }

    /// Reads the staged bytes back for delivery.
    pub async fn read(&self) -> Result<Vec<u8>, StorageError> {
        tokio::fs::read(&self.path)
            .await
            .map_err(|source| StorageError::Read {
                path: self.path.clone(),
                source,
            })
    }

    /// Deletes the staged file. Failures are logged, never returned.
    pub async fn cleanup(self) {
        match tokio::fs::remove_file(&self.path).await {
            Ok(()) => tracing::debug!("Removed artifact {}", self.path.display()),
            Err(e) => tracing::warn!("Failed to delete artifact {}: {}", self.path.display(), e),
        }
    }
}

/// Writes `bytes` to a new `enrollment_certificate_<millis>.pdf` file in
/// `artifact_dir`. An existing file is never overwritten: if the name is
/// taken the suffix is bumped to the next free millisecond.
pub async fn stage(
    artifact_dir: &Path,
    millis: i64,
    bytes: &[u8],
) -> Result<StagedArtifact, StorageError> {
    for stamp in millis..millis + MAX_NAME_ATTEMPTS {
        let filename = artifact_filename(stamp);
        let path = artifact_dir.join(&filename);

        let mut file = match tokio::fs::OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .await
        {
            Ok(file) => file,
            Err(e) if e.kind() == ErrorKind::AlreadyExists => continue,
            Err(source) => return Err(StorageError::Write { path, source }),
        };

        let staged = StagedArtifact { path, filename };
        let written = async {
            file.write_all(bytes).await?;
            file.flush().await
        }
        .await;

        if let Err(source) = written {
            let path = staged.path.clone();
            staged.cleanup().await;
            return Err(StorageError::Write { path, source });
        }

        return Ok(staged);
    }

    Err(StorageError::NamesExhausted {
        dir: artifact_dir.to_path_buf(),
        millis,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ensure_dir_is_idempotent() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().join("nested").join("uploads");
        ensure_dir(&dir).unwrap();
        ensure_dir(&dir).unwrap();
        assert!(dir.is_dir());
    }

    #[test]
    fn artifact_names() {
        assert_eq!(
            artifact_filename(1_700_000_000_123),
            "enrollment_certificate_1700000000123.pdf"
        );
        assert!(is_artifact_name("enrollment_certificate_1700000000123.pdf"));
        assert!(!is_artifact_name("enrollment_certificate_.pdf"));
        assert!(!is_artifact_name("enrollment_certificate_12ab.pdf"));
        assert!(!is_artifact_name("notes.txt"));
    }

    #[tokio::test]
    async fn stage_read_cleanup() {
        let tmp = tempfile::tempdir().unwrap();
        let staged = stage(tmp.path(), 42, b"%PDF-1.5 body").await.unwrap();

        assert_eq!(staged.filename(), "enrollment_certificate_42.pdf");
        assert_eq!(staged.read().await.unwrap(), b"%PDF-1.5 body");

        let path = staged.path().to_path_buf();
        staged.cleanup().await;
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn same_millisecond_gets_distinct_files() {
        let tmp = tempfile::tempdir().unwrap();
        let first = stage(tmp.path(), 7, b"first").await.unwrap();
        let second = stage(tmp.path(), 7, b"second").await.unwrap();

        assert_ne!(first.path(), second.path());
        assert_eq!(second.filename(), "enrollment_certificate_8.pdf");
        assert_eq!(first.read().await.unwrap(), b"first");
        assert_eq!(second.read().await.unwrap(), b"second");
    }

    #[tokio::test]
    async fn cleanup_of_missing_file_does_not_panic() {
        let tmp = tempfile::tempdir().unwrap();
        let staged = stage(tmp.path(), 1, b"x").await.unwrap();
        std::fs::remove_file(staged.path()).unwrap();
        staged.cleanup().await;
    }

    #[tokio::test]
    async fn write_into_missing_dir_fails() {
        let tmp = tempfile::tempdir().unwrap();
        let missing = tmp.path().join("gone");
        let err = stage(&missing, 1, b"x").await.unwrap_err();
        assert!(matches!(err, StorageError::Write { .. }));
    }
}
