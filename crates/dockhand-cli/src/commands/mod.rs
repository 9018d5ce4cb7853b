mod deploy;
mod deploy_pipeline;
mod doctor;

use dockhand_core::CONFIG_FILE_NAME;
use std::path::PathBuf;

pub use deploy::{deploy_dev, deploy_env, deploy_release};
pub use doctor::doctor;

/// Options shared by every subcommand.
pub struct GlobalOptions {
    pub config: PathBuf,
    pub engine: String,
    /// Wait for Enter before exiting after a successful push.
    pub pause: bool,
}

/// Explicit `--config`, or `.env.deploy` in the working directory.
pub fn config_path(explicit: Option<PathBuf>) -> anyhow::Result<PathBuf> {
    match explicit {
        Some(path) => Ok(path),
        None => Ok(std::env::current_dir()?.join(CONFIG_FILE_NAME)),
    }
}
