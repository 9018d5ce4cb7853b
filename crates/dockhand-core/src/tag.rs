//! Image tag resolution.
//!
//! Every workflow produces an `account/repo:suffix` reference. Account and
//! repo always come from the deploy config; the suffix depends on the
//! [`DeployPolicy`]:
//!
//! | Policy | Prompt | Suffix |
//! |--------|--------|--------|
//! | `EnvironmentChoice` | Dev / Prod select | `dev` / `prod` |
//! | `VersionPrompt` | free text | `<BUILD_TAG_PREFIX>-<input>` |
//! | `FixedTag` | none | `<BUILD_TAG>` |

use std::fmt;

use crate::config::{self, DeployConfig};
use crate::prompt::{Choice, Prompter};
use crate::{Error, Result};

/// Fully qualified image reference pushed to the registry.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ImageTag {
    account: String,
    repo: String,
    suffix: String,
}

impl ImageTag {
    pub fn new(
        account: impl Into<String>,
        repo: impl Into<String>,
        suffix: impl Into<String>,
    ) -> Result<Self> {
        let tag = Self {
            account: account.into(),
            repo: repo.into(),
            suffix: suffix.into(),
        };
        check_component("account", &tag.account, &[':'])?;
        check_component("repo", &tag.repo, &[':'])?;
        check_component("suffix", &tag.suffix, &[':', '/'])?;
        Ok(tag)
    }

    pub fn account(&self) -> &str {
        &self.account
    }

    pub fn repo(&self) -> &str {
        &self.repo
    }

    pub fn suffix(&self) -> &str {
        &self.suffix
    }
}

impl fmt::Display for ImageTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}:{}", self.account, self.repo, self.suffix)
    }
}

fn check_component(component: &'static str, value: &str, forbidden: &[char]) -> Result<()> {
    if value.is_empty() {
        return Err(Error::InvalidTag {
            component,
            value: value.to_owned(),
            reason: "must not be empty",
        });
    }
    if value.contains(forbidden) {
        return Err(Error::InvalidTag {
            component,
            value: value.to_owned(),
            reason: "contains a reserved separator",
        });
    }
    Ok(())
}

/// Deployment target offered by the environment prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Environment {
    Dev,
    Prod,
}

impl Environment {
    /// Prompt order. The first entry is the default.
    pub const ALL: [Environment; 2] = [Environment::Dev, Environment::Prod];

    pub fn choice(self) -> Choice {
        match self {
            Environment::Dev => Choice {
                label: "Dev",
                description: "Development environment image",
            },
            Environment::Prod => Choice {
                label: "Prod",
                description: "Production environment image",
            },
        }
    }

    /// Tag suffix: the label, lower-cased.
    pub fn suffix(self) -> String {
        self.choice().label.to_lowercase()
    }

    /// Prompt index for this environment.
    pub fn index(self) -> usize {
        match self {
            Environment::Dev => 0,
            Environment::Prod => 1,
        }
    }
}

impl std::str::FromStr for Environment {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dev" => Ok(Environment::Dev),
            "prod" => Ok(Environment::Prod),
            other => Err(format!("unknown environment '{other}' (expected dev or prod)")),
        }
    }
}

/// How the tag suffix is chosen for a run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployPolicy {
    EnvironmentChoice,
    VersionPrompt,
    FixedTag,
}

impl DeployPolicy {
    /// Resolve the full image tag, prompting the operator when the policy
    /// requires it.
    pub fn resolve<P: Prompter + ?Sized>(
        self,
        config: &DeployConfig,
        prompter: &P,
    ) -> Result<ImageTag> {
        let account = config.require(config::DOCKER_ACCOUNT)?;
        let repo = config.require(config::DOCKER_REPO)?;

        let suffix = match self {
            DeployPolicy::EnvironmentChoice => {
                let options = Environment::ALL.map(Environment::choice);
                let index = prompter.choose_one(
                    "Select deployment environment",
                    &options,
                    Environment::Dev.index(),
                )?;
                Environment::ALL
                    .get(index)
                    .ok_or_else(|| Error::Prompt {
                        detail: format!("environment choice {index} out of range"),
                    })?
                    .suffix()
            }
            DeployPolicy::VersionPrompt => {
                let prefix = config.require(config::BUILD_TAG_PREFIX)?;
                let version = prompter.read_line("Enter version (e.g. 2.0.1)")?;
                format!("{prefix}-{version}")
            }
            DeployPolicy::FixedTag => config.require(config::BUILD_TAG)?.to_owned(),
        };

        let tag = ImageTag::new(account, repo, suffix)?;
        tracing::info!(policy = ?self, %tag, "resolved image tag");
        Ok(tag)
    }
}
