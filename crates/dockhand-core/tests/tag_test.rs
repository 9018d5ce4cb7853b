use std::path::Path;

use dockhand_core::{
    Choice, DeployConfig, DeployPolicy, Environment, Error, ImageTag, Prompter, ScriptedPrompter,
};

fn config(content: &str) -> DeployConfig {
    DeployConfig::parse(Path::new(".env.deploy"), content).unwrap()
}

fn base_config() -> DeployConfig {
    config("DOCKER_ACCOUNT=acme\nDOCKER_REPO=app\nBUILD_TAG_PREFIX=rel\nBUILD_TAG=nightly\n")
}

/// Prompter that fails the test if the resolver asks anything.
struct NoPrompts;

impl Prompter for NoPrompts {
    fn choose_one(&self, prompt: &str, _: &[Choice], _: usize) -> dockhand_core::Result<usize> {
        panic!("unexpected choice prompt: {prompt}");
    }

    fn read_line(&self, prompt: &str) -> dockhand_core::Result<String> {
        panic!("unexpected line prompt: {prompt}");
    }

    fn acknowledge(&self, message: &str) -> dockhand_core::Result<()> {
        panic!("unexpected acknowledgment: {message}");
    }
}

// ── ImageTag ──

#[test]
fn image_tag_renders_account_repo_suffix() {
    let tag = ImageTag::new("acme", "app", "dev").unwrap();

    assert_eq!(tag.to_string(), "acme/app:dev");
    assert_eq!(tag.account(), "acme");
    assert_eq!(tag.repo(), "app");
    assert_eq!(tag.suffix(), "dev");
}

#[test]
fn image_tag_rejects_separator_in_suffix() {
    let err = ImageTag::new("acme", "app", "rel:2").unwrap_err();
    assert!(matches!(err, Error::InvalidTag { component: "suffix", .. }));

    let err = ImageTag::new("acme", "app", "rel/2").unwrap_err();
    assert!(matches!(err, Error::InvalidTag { component: "suffix", .. }));
}

#[test]
fn image_tag_rejects_empty_components() {
    assert!(matches!(
        ImageTag::new("", "app", "dev"),
        Err(Error::InvalidTag { component: "account", .. })
    ));
    assert!(matches!(
        ImageTag::new("acme", "", "dev"),
        Err(Error::InvalidTag { component: "repo", .. })
    ));
    assert!(matches!(
        ImageTag::new("acme", "app", ""),
        Err(Error::InvalidTag { component: "suffix", .. })
    ));
}

// ── Environment ──

#[test]
fn environment_suffix_is_lowercased_label() {
    assert_eq!(Environment::Dev.suffix(), "dev");
    assert_eq!(Environment::Prod.suffix(), "prod");
    assert_eq!(Environment::ALL[0], Environment::Dev);
}

#[test]
fn environment_parses_case_insensitively() {
    assert_eq!("PROD".parse::<Environment>().unwrap(), Environment::Prod);
    assert_eq!("dev".parse::<Environment>().unwrap(), Environment::Dev);
    assert!("staging".parse::<Environment>().is_err());
}

// ── EnvironmentChoice ──

#[test]
fn environment_choice_default_resolves_to_dev() {
    let prompter = ScriptedPrompter::new();

    let tag = DeployPolicy::EnvironmentChoice
        .resolve(&base_config(), &prompter)
        .unwrap();

    assert_eq!(tag.to_string(), "acme/app:dev");
}

#[test]
fn environment_choice_second_option_resolves_to_prod() {
    let prompter = ScriptedPrompter::new().with_choice(1);

    let tag = DeployPolicy::EnvironmentChoice
        .resolve(&base_config(), &prompter)
        .unwrap();

    assert_eq!(tag.to_string(), "acme/app:prod");
}

#[test]
fn environment_choice_out_of_range_is_prompt_error() {
    let prompter = ScriptedPrompter::new().with_choice(2);

    let err = DeployPolicy::EnvironmentChoice
        .resolve(&base_config(), &prompter)
        .unwrap_err();

    assert!(matches!(err, Error::Prompt { .. }));
}

// ── VersionPrompt ──

#[test]
fn version_prompt_joins_prefix_and_input() {
    let prompter = ScriptedPrompter::new().with_line("2.0.1");

    let tag = DeployPolicy::VersionPrompt
        .resolve(&base_config(), &prompter)
        .unwrap();

    assert_eq!(tag.suffix(), "rel-2.0.1");
    assert_eq!(tag.to_string(), "acme/app:rel-2.0.1");
}

#[test]
fn version_prompt_keeps_input_verbatim() {
    let prompter = ScriptedPrompter::new().with_line("v2.0.1");

    let tag = DeployPolicy::VersionPrompt
        .resolve(&base_config(), &prompter)
        .unwrap();

    assert_eq!(tag.suffix(), "rel-v2.0.1");
}

#[test]
fn version_prompt_requires_prefix() {
    let prompter = ScriptedPrompter::new().with_line("2.0.1");

    let err = DeployPolicy::VersionPrompt
        .resolve(&config("DOCKER_ACCOUNT=acme\nDOCKER_REPO=app\n"), &prompter)
        .unwrap_err();

    assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "BUILD_TAG_PREFIX"));
}

#[test]
fn version_prompt_without_input_is_prompt_error() {
    let err = DeployPolicy::VersionPrompt
        .resolve(&base_config(), &ScriptedPrompter::new())
        .unwrap_err();

    assert!(matches!(err, Error::Prompt { .. }));
}

// ── FixedTag ──

#[test]
fn fixed_tag_uses_config_without_prompting() {
    let tag = DeployPolicy::FixedTag
        .resolve(&base_config(), &NoPrompts)
        .unwrap();

    assert_eq!(tag.to_string(), "acme/app:nightly");
}

#[test]
fn missing_account_fails_before_prompting() {
    let err = DeployPolicy::EnvironmentChoice
        .resolve(&config("DOCKER_REPO=app\n"), &NoPrompts)
        .unwrap_err();

    assert!(matches!(err, Error::MissingKey { ref key, .. } if key == "DOCKER_ACCOUNT"));
}

#[test]
fn same_config_and_input_resolve_to_same_tag() {
    let first = DeployPolicy::VersionPrompt
        .resolve(&base_config(), &ScriptedPrompter::new().with_line("3.1.0"))
        .unwrap();
    let second = DeployPolicy::VersionPrompt
        .resolve(&base_config(), &ScriptedPrompter::new().with_line("3.1.0"))
        .unwrap();

    assert_eq!(first, second);
}
