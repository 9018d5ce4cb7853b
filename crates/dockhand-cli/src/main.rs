mod commands;
mod console;

use clap::{Parser, Subcommand};
use dockhand_core::Environment;
use dockhand_engine::DEFAULT_ENGINE;
use std::path::PathBuf;

#[derive(Parser)]
#[command(
    name = "dockhand",
    about = "Build and push container images tagged by environment or version"
)]
#[command(version)]
struct Cli {
    /// Deploy config file [default: ./.env.deploy]
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    /// Container engine executable (docker, podman, ...)
    #[arg(long, global = true, env = "DOCKHAND_ENGINE", default_value = DEFAULT_ENGINE)]
    engine: String,

    /// Exit without waiting for Enter after a successful push
    #[arg(long, global = true)]
    no_pause: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build and push with a dev/prod environment tag
    Env {
        /// Target environment; prompts when omitted
        #[arg(value_name = "dev|prod")]
        target: Option<Environment>,
    },
    /// Build and push with a BUILD_TAG_PREFIX-<version> tag
    Release {
        /// Release version (e.g. 2.0.1); prompts when omitted
        version: Option<String>,
    },
    /// Build and push with the fixed BUILD_TAG, writing a version marker file
    Dev,
    /// Check container engine, configuration, and repository readiness
    Doctor,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let options = commands::GlobalOptions {
        config: commands::config_path(cli.config)?,
        engine: cli.engine,
        pause: !cli.no_pause,
    };

    match cli.command {
        Commands::Env { target } => commands::deploy_env(&options, target).await?,
        Commands::Release { version } => commands::deploy_release(&options, version).await?,
        Commands::Dev => commands::deploy_dev(&options).await?,
        Commands::Doctor => commands::doctor(&options).await?,
    }

    Ok(())
}
