use dockhand_build::{
    BuildContext, DescriptorMode, MarkerFile, SourceDescriber, SourceDescriptor,
};
use dockhand_core::{DeployConfig, DeployPolicy, ImageTag, Prompter};
use dockhand_engine::{BuildRequest, EngineClient, EngineExecutor};
use std::path::PathBuf;

/// Inputs for one deploy run.
pub(crate) struct DeployRequest {
    pub policy: DeployPolicy,
    pub config_path: PathBuf,
}

/// Result of a successful deploy pipeline run.
#[derive(Debug)]
pub(crate) struct DeployOutcome {
    pub tag: ImageTag,
    pub descriptor: SourceDescriptor,
}

/// Descriptor delivery for each policy: the fixed-tag workflow bakes a
/// marker file into the context, the prompted workflows pass a build arg.
pub(crate) fn descriptor_mode(policy: DeployPolicy) -> DescriptorMode {
    match policy {
        DeployPolicy::EnvironmentChoice | DeployPolicy::VersionPrompt => DescriptorMode::BuildArg,
        DeployPolicy::FixedTag => DescriptorMode::MarkerFile,
    }
}

/// Run the full deploy pipeline: readiness → config → tag → descriptor →
/// build → push.
///
/// Nothing after the readiness check runs if the engine is not ready. The
/// marker file, when used, is gone by the time this returns, whatever the
/// outcome.
pub(crate) async fn run<E, D, P>(
    engine: &EngineClient<E>,
    describer: &D,
    prompter: &P,
    request: &DeployRequest,
) -> anyhow::Result<DeployOutcome>
where
    E: EngineExecutor,
    D: SourceDescriber + ?Sized,
    P: Prompter + ?Sized,
{
    // Readiness gate
    println!("Waiting for container engine...");
    engine.check_ready().await?;

    // Load configuration
    let config = DeployConfig::from_path(&request.config_path)?;

    // Resolve tag
    let tag = request.policy.resolve(&config, prompter)?;
    println!("Image tag: {tag}");

    // Describe source
    let context = BuildContext::open(config.deploy_dir()?)?;
    let descriptor = describer.describe(context.path())?;
    println!("Source: {descriptor}");

    let mode = descriptor_mode(request.policy);
    let mut build_args = Vec::new();
    let marker = match mode {
        DescriptorMode::BuildArg => {
            build_args.push((config.build_arg_name().to_owned(), descriptor.to_string()));
            None
        }
        DescriptorMode::MarkerFile => Some(MarkerFile::write(
            &context,
            config.marker_file()?,
            &descriptor,
        )?),
    };

    // Build
    println!("Building {tag}...");
    engine
        .build_image(&BuildRequest {
            tag: &tag,
            context: context.path(),
            dockerfile: config.dockerfile(),
            build_args,
        })
        .await?;

    // Push
    println!("Pushing {tag}...");
    engine.push_image(&tag).await?;

    if let Some(marker) = marker {
        marker.remove()?;
    }

    tracing::info!(%tag, %descriptor, "deploy finished");
    Ok(DeployOutcome { tag, descriptor })
}
