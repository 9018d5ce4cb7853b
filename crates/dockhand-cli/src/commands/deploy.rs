use super::GlobalOptions;
use super::deploy_pipeline::{self, DeployOutcome, DeployRequest};
use crate::console::ConsolePrompter;
use dockhand_build::GitDescriber;
use dockhand_core::{DeployPolicy, Environment, Prompter, ScriptedPrompter};
use dockhand_engine::EngineClient;

/// Build and push with a `dev` / `prod` tag.
pub async fn deploy_env(
    options: &GlobalOptions,
    target: Option<Environment>,
) -> anyhow::Result<()> {
    let preset = target.map(|env| ScriptedPrompter::new().with_choice(env.index()));
    deploy(options, DeployPolicy::EnvironmentChoice, preset).await
}

/// Build and push with a `<prefix>-<version>` tag.
pub async fn deploy_release(
    options: &GlobalOptions,
    version: Option<String>,
) -> anyhow::Result<()> {
    let preset = version.map(|v| ScriptedPrompter::new().with_line(v));
    deploy(options, DeployPolicy::VersionPrompt, preset).await
}

/// Build and push with the configured `BUILD_TAG`.
pub async fn deploy_dev(options: &GlobalOptions) -> anyhow::Result<()> {
    deploy(options, DeployPolicy::FixedTag, None).await
}

async fn deploy(
    options: &GlobalOptions,
    policy: DeployPolicy,
    preset: Option<ScriptedPrompter>,
) -> anyhow::Result<()> {
    let engine = EngineClient::new(options.engine.as_str());
    let request = DeployRequest {
        policy,
        config_path: options.config.clone(),
    };

    let outcome = match &preset {
        Some(scripted) => deploy_pipeline::run(&engine, &GitDescriber, scripted, &request).await?,
        None => deploy_pipeline::run(&engine, &GitDescriber, &ConsolePrompter, &request).await?,
    };

    report_completion(&outcome, &ConsolePrompter, options.pause)
}

/// Print the completion summary and, when `pause` is set, wait for the
/// operator to acknowledge it.
fn report_completion<P: Prompter + ?Sized>(
    outcome: &DeployOutcome,
    prompter: &P,
    pause: bool,
) -> anyhow::Result<()> {
    println!();
    println!("Pushed: {}", outcome.tag);
    println!("Source: {}", outcome.descriptor);

    if pause {
        prompter.acknowledge("Done. Press Enter to exit")?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockhand_build::SourceDescriptor;
    use dockhand_core::ImageTag;

    fn outcome() -> DeployOutcome {
        DeployOutcome {
            tag: ImageTag::new("acme", "app", "prod").unwrap(),
            descriptor: SourceDescriptor::new("v1.0.0"),
        }
    }

    #[test]
    fn completion_waits_for_acknowledgment() {
        let prompter = ScriptedPrompter::new();

        report_completion(&outcome(), &prompter, true).unwrap();

        assert_eq!(prompter.acknowledged(), vec!["Done. Press Enter to exit"]);
    }

    #[test]
    fn completion_without_pause_skips_acknowledgment() {
        let prompter = ScriptedPrompter::new();

        report_completion(&outcome(), &prompter, false).unwrap();

        assert!(prompter.acknowledged().is_empty());
    }
}
