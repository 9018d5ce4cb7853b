use std::fs::OpenOptions;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};

use crate::{BuildContext, SourceDescriptor};

/// Transient file holding the source descriptor inside the build context.
///
/// The file is removed by [`MarkerFile::remove`], or on drop if the guard
/// goes out of scope first (early return, `?`, panic).
#[derive(Debug)]
#[must_use = "dropping the guard deletes the marker file immediately"]
pub struct MarkerFile {
    path: PathBuf,
    removed: bool,
}

impl MarkerFile {
    /// Create `context/name` holding `descriptor`.
    ///
    /// Fails with [`MarkerError::Exists`] if the file is already there; a file
    /// the operator keeps in the build context is never touched.
    pub fn write(
        context: &BuildContext,
        name: &str,
        descriptor: &SourceDescriptor,
    ) -> Result<Self, MarkerError> {
        let path = context.path().join(name);
        let mut file = OpenOptions::new()
            .write(true)
            .create_new(true)
            .open(&path)
            .map_err(|e| match e.kind() {
                ErrorKind::AlreadyExists => MarkerError::Exists { path: path.clone() },
                _ => MarkerError::Write {
                    path: path.clone(),
                    source: e,
                },
            })?;

        // From here on the guard owns the file, so a failed write removes it.
        let marker = Self {
            path,
            removed: false,
        };
        file.write_all(descriptor.as_str().as_bytes())
            .map_err(|e| MarkerError::Write {
                path: marker.path.clone(),
                source: e,
            })?;
        tracing::debug!(path = %marker.path.display(), "wrote marker file");
        Ok(marker)
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Delete the marker file, reporting any failure.
    pub fn remove(mut self) -> Result<(), MarkerError> {
        self.removed = true;
        delete(&self.path)
    }
}

impl Drop for MarkerFile {
    fn drop(&mut self) {
        if self.removed {
            return;
        }
        if let Err(e) = delete(&self.path) {
            tracing::warn!(error = %e, "marker file cleanup failed");
        }
    }
}

fn delete(path: &Path) -> Result<(), MarkerError> {
    match std::fs::remove_file(path) {
        Ok(()) => {
            tracing::debug!(path = %path.display(), "removed marker file");
            Ok(())
        }
        Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
        Err(e) => Err(MarkerError::Remove {
            path: path.to_path_buf(),
            source: e,
        }),
    }
}

#[derive(Debug, thiserror::Error)]
pub enum MarkerError {
    #[error("{path} already exists in the build context — remove it or set MARKER_FILE to another name")]
    Exists { path: PathBuf },
    #[error("failed to write marker file {path}")]
    Write {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to remove marker file {path}")]
    Remove {
        path: PathBuf,
        source: std::io::Error,
    },
}
