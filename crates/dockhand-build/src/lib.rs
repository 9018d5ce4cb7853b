//! Build context handling for dockhand.
//!
//! # Deploy pipeline
//!
//! ```text
//! dockhand env | release | dev
//!   1. Readiness   ── <engine> info
//!   2. Config      ── .env.deploy → DeployConfig
//!   3. Tag         ── DeployPolicy::resolve (prompt / config)
//!   4. Descriptor  ── git describe --tags (in DEPLOY_DIR)
//!   5. Build       ── <engine> build -t <tag> [--build-arg …] DEPLOY_DIR
//!   6. Push        ── <engine> push <tag>
//! ```
//!
//! # Descriptor delivery
//!
//! The source descriptor reaches the image build in one of two ways:
//! - **Build argument**: `--build-arg SOURCE_VERSION=<descriptor>`
//! - **Marker file**: `version.txt` written into the build context for the
//!   duration of the build and push, then deleted (see [`MarkerFile`])

pub mod context;
pub mod descriptor;
pub mod marker;

pub use context::{BuildContext, ContextError};
pub use descriptor::{DescribeError, GitDescriber, SourceDescriber, SourceDescriptor};
pub use marker::{MarkerError, MarkerFile};

/// How the source descriptor is handed to the image build.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DescriptorMode {
    BuildArg,
    MarkerFile,
}
