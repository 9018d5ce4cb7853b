//! Core types and configuration for dockhand.
//!
//! This crate defines the `.env.deploy` loader ([`DeployConfig`]), image tag
//! resolution ([`DeployPolicy`], [`ImageTag`]), the operator prompt
//! abstraction ([`Prompter`]), and shared error types.

pub mod config;
pub mod error;
pub mod prompt;
pub mod tag;

pub use config::{CONFIG_FILE_NAME, DeployConfig};
pub use error::{Error, Result};
pub use prompt::{Choice, Prompter, ScriptedPrompter};
pub use tag::{DeployPolicy, Environment, ImageTag};
