use std::path::{Path, PathBuf};

/// Directory handed to the container engine as build input.
///
/// Owned by the caller. dockhand only ever writes the transient
/// [`MarkerFile`](crate::MarkerFile) into it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BuildContext {
    dir: PathBuf,
}

impl BuildContext {
    /// Open an existing build context directory.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, ContextError> {
        let dir = dir.into();
        if !dir.is_dir() {
            return Err(ContextError::NotFound(dir));
        }
        Ok(Self { dir })
    }

    pub fn path(&self) -> &Path {
        &self.dir
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ContextError {
    #[error("build context {0} does not exist or is not a directory — check DEPLOY_DIR")]
    NotFound(PathBuf),
}
