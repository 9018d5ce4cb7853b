use std::fmt;
use std::path::Path;
use std::process::Command;

/// Human-readable label for the source revision being built,
/// e.g. `v1.4.0-3-g1a2b3c4`. Never parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceDescriptor(String);

impl SourceDescriptor {
    pub fn new(value: impl Into<String>) -> Self {
        Self(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SourceDescriptor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Source of the descriptor for a build context.
pub trait SourceDescriber {
    fn describe(&self, context: &Path) -> Result<SourceDescriptor, DescribeError>;
}

/// Describes the build context with `git describe --tags`.
#[derive(Debug, Clone, Copy, Default)]
pub struct GitDescriber;

impl SourceDescriber for GitDescriber {
    fn describe(&self, context: &Path) -> Result<SourceDescriptor, DescribeError> {
        let output = Command::new("git")
            .args(["describe", "--tags"])
            .current_dir(context)
            .output()
            .map_err(|e| DescribeError::GitCommand {
                detail: format!("failed to execute git describe in {}", context.display()),
                source: e,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(DescribeError::Unavailable {
                detail: format!(
                    "git describe --tags exited with {}: {}",
                    output.status,
                    stderr.trim()
                ),
            });
        }

        let stdout = String::from_utf8_lossy(&output.stdout);
        let descriptor = stdout.trim_end();
        if descriptor.is_empty() {
            return Err(DescribeError::Unavailable {
                detail: "git describe --tags returned no output".to_owned(),
            });
        }

        tracing::debug!(context = %context.display(), descriptor, "described source");
        Ok(SourceDescriptor::new(descriptor))
    }
}

#[derive(Debug, thiserror::Error)]
pub enum DescribeError {
    #[error("source descriptor unavailable: {detail}")]
    GitCommand {
        detail: String,
        source: std::io::Error,
    },
    #[error("source descriptor unavailable: {detail}")]
    Unavailable { detail: String },
}
