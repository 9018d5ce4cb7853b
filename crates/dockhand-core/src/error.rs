use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    // ── Configuration ──
    #[error("config file not found at {path} — create it with KEY=VALUE lines")]
    ConfigNotFound { path: PathBuf },

    #[error("failed to read config from {path}")]
    ConfigLoad {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("malformed config at {path}, line {line}: {reason}")]
    MalformedConfig {
        path: PathBuf,
        line: usize,
        reason: &'static str,
    },

    #[error("required key {key} is not set in {path}")]
    MissingKey { key: String, path: PathBuf },

    #[error("invalid {key} value {value:?}: {reason}")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: &'static str,
    },

    // ── Tag resolution ──
    #[error("invalid image tag component {component} {value:?}: {reason}")]
    InvalidTag {
        component: &'static str,
        value: String,
        reason: &'static str,
    },

    #[error("prompt failed: {detail}")]
    Prompt { detail: String },
}
