use std::collections::BTreeMap;
use std::path::{Component, Path, PathBuf};

use crate::{Error, Result};

/// File name looked up in the working directory when no path is given.
pub const CONFIG_FILE_NAME: &str = ".env.deploy";

/// Registry account (namespace) the image is pushed under.
pub const DOCKER_ACCOUNT: &str = "DOCKER_ACCOUNT";
/// Repository name under the account.
pub const DOCKER_REPO: &str = "DOCKER_REPO";
/// Build context directory.
pub const DEPLOY_DIR: &str = "DEPLOY_DIR";
/// Tag suffix for the fixed-tag workflow.
pub const BUILD_TAG: &str = "BUILD_TAG";
/// Prefix joined with the operator's version for the release workflow.
pub const BUILD_TAG_PREFIX: &str = "BUILD_TAG_PREFIX";
/// Optional Dockerfile path, relative to the build context.
pub const DOCKERFILE: &str = "DOCKERFILE";
/// Optional build argument name carrying the source descriptor.
pub const BUILD_ARG_NAME: &str = "BUILD_ARG_NAME";
/// Optional marker file name written into the build context.
pub const MARKER_FILE: &str = "MARKER_FILE";

const DEFAULT_BUILD_ARG_NAME: &str = "SOURCE_VERSION";
const DEFAULT_MARKER_FILE: &str = "version.txt";

/// Deploy configuration loaded from a flat `KEY=VALUE` file.
///
/// The mapping is passed explicitly to every phase; nothing is exported
/// into the process environment.
///
/// # Format
///
/// ```text
/// # comment
/// DOCKER_ACCOUNT=acme
/// DOCKER_REPO=app
/// DEPLOY_DIR=../app
/// ```
///
/// - Blank lines and `#` comments are skipped.
/// - Each other line is split on its first `=`; key and value are trimmed.
/// - Values must not contain `=` (there is no quoting or escaping).
/// - A repeated key overwrites the earlier value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DeployConfig {
    path: PathBuf,
    entries: BTreeMap<String, String>,
}

impl DeployConfig {
    /// Load `.env.deploy` from the given directory.
    pub fn load(dir: &Path) -> Result<Self> {
        Self::from_path(&dir.join(CONFIG_FILE_NAME))
    }

    /// Load a configuration file from an explicit path.
    pub fn from_path(path: &Path) -> Result<Self> {
        if !path.is_file() {
            return Err(Error::ConfigNotFound {
                path: path.to_path_buf(),
            });
        }
        let content = std::fs::read_to_string(path).map_err(|e| Error::ConfigLoad {
            path: path.to_path_buf(),
            source: e,
        })?;
        let config = Self::parse(path, &content)?;
        tracing::debug!(path = %path.display(), keys = config.entries.len(), "loaded deploy config");
        Ok(config)
    }

    /// Parse configuration text. `path` is recorded for error messages and
    /// for resolving relative directories.
    pub fn parse(path: &Path, content: &str) -> Result<Self> {
        let mut entries = BTreeMap::new();

        for (idx, raw) in content.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            let malformed = |reason| Error::MalformedConfig {
                path: path.to_path_buf(),
                line: idx + 1,
                reason,
            };

            let (key, value) = line
                .split_once('=')
                .ok_or_else(|| malformed("expected KEY=VALUE"))?;
            let key = key.trim();
            let value = value.trim();

            if key.is_empty() {
                return Err(malformed("empty key"));
            }
            if value.contains('=') {
                return Err(malformed("value must not contain '='"));
            }

            entries.insert(key.to_owned(), value.to_owned());
        }

        Ok(Self {
            path: path.to_path_buf(),
            entries,
        })
    }

    /// Path the configuration was read from.
    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Look up a key that the current workflow cannot run without.
    pub fn require(&self, key: &str) -> Result<&str> {
        self.get(key).ok_or_else(|| Error::MissingKey {
            key: key.to_owned(),
            path: self.path.clone(),
        })
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }

    /// Build context directory from `DEPLOY_DIR`.
    ///
    /// Relative paths are resolved against the directory holding the
    /// configuration file.
    pub fn deploy_dir(&self) -> Result<PathBuf> {
        let dir = Path::new(self.require(DEPLOY_DIR)?);
        if dir.is_absolute() {
            return Ok(dir.to_path_buf());
        }
        let base = self.path.parent().unwrap_or_else(|| Path::new("."));
        Ok(base.join(dir))
    }

    pub fn dockerfile(&self) -> Option<&str> {
        self.get(DOCKERFILE).filter(|v| !v.is_empty())
    }

    pub fn build_arg_name(&self) -> &str {
        self.get(BUILD_ARG_NAME)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_BUILD_ARG_NAME)
    }

    /// Marker file name; must stay inside the build context.
    pub fn marker_file(&self) -> Result<&str> {
        let name = self
            .get(MARKER_FILE)
            .filter(|v| !v.is_empty())
            .unwrap_or(DEFAULT_MARKER_FILE);

        let mut components = Path::new(name).components();
        match (components.next(), components.next()) {
            (Some(Component::Normal(_)), None) => Ok(name),
            _ => Err(Error::InvalidValue {
                key: MARKER_FILE,
                value: name.to_owned(),
                reason: "must be a plain file name",
            }),
        }
    }
}
