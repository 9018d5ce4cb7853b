use super::GlobalOptions;
use dockhand_build::{BuildContext, GitDescriber, SourceDescriber};
use dockhand_core::{DeployConfig, config};
use dockhand_engine::{CheckResult, DoctorReport, EngineClient};
use std::path::Path;

pub async fn doctor(options: &GlobalOptions) -> anyhow::Result<()> {
    let client = EngineClient::new(options.engine.as_str());
    let mut report = client.doctor().await;

    check_project(&mut report, &options.config, &GitDescriber);

    println!();
    println!("{report}");

    if !report.all_passed() {
        anyhow::bail!("some checks failed — see above for details");
    }

    Ok(())
}

/// Fill in the configuration, build context and descriptor checks.
/// Every check runs; a failure only marks the checks that depend on it.
fn check_project<D: SourceDescriber + ?Sized>(
    report: &mut DoctorReport,
    config_path: &Path,
    describer: &D,
) {
    let config = match DeployConfig::from_path(config_path) {
        Ok(config) => {
            report.config_file = CheckResult::ok(&config_path.display().to_string());
            config
        }
        Err(e) => {
            report.config_file = CheckResult::fail(&e.to_string());
            report.required_keys = CheckResult::fail("config unavailable");
            report.build_context = CheckResult::fail("config unavailable");
            report.source_descriptor = CheckResult::fail("config unavailable");
            return;
        }
    };

    let missing: Vec<&str> = [config::DOCKER_ACCOUNT, config::DOCKER_REPO, config::DEPLOY_DIR]
        .into_iter()
        .filter(|key| config.get(key).is_none())
        .collect();
    report.required_keys = if missing.is_empty() {
        CheckResult::ok("DOCKER_ACCOUNT, DOCKER_REPO, DEPLOY_DIR")
    } else {
        CheckResult::fail(&format!("missing {}", missing.join(", ")))
    };

    let context = match config
        .deploy_dir()
        .map_err(anyhow::Error::from)
        .and_then(|dir| BuildContext::open(dir).map_err(anyhow::Error::from))
    {
        Ok(context) => {
            report.build_context = CheckResult::ok(&context.path().display().to_string());
            context
        }
        Err(e) => {
            report.build_context = CheckResult::fail(&e.to_string());
            report.source_descriptor = CheckResult::fail("build context unavailable");
            return;
        }
    };

    report.source_descriptor = match describer.describe(context.path()) {
        Ok(descriptor) => CheckResult::ok(descriptor.as_str()),
        Err(e) => CheckResult::fail(&e.to_string()),
    };
}

#[cfg(test)]
mod tests {
    use super::*;
    use dockhand_build::{DescribeError, SourceDescriptor};
    use tempfile::TempDir;

    struct FixedDescriber;

    impl SourceDescriber for FixedDescriber {
        fn describe(&self, _: &Path) -> Result<SourceDescriptor, DescribeError> {
            Ok(SourceDescriptor::new("v0.9.0"))
        }
    }

    #[test]
    fn all_project_checks_pass() {
        let tmp = TempDir::new().unwrap();
        std::fs::create_dir(tmp.path().join("app")).unwrap();
        let config_path = tmp.path().join(".env.deploy");
        std::fs::write(
            &config_path,
            "DOCKER_ACCOUNT=acme\nDOCKER_REPO=app\nDEPLOY_DIR=app\n",
        )
        .unwrap();

        let mut report = DoctorReport::default();
        check_project(&mut report, &config_path, &FixedDescriber);

        assert!(report.config_file.passed);
        assert!(report.required_keys.passed);
        assert!(report.build_context.passed);
        assert_eq!(report.source_descriptor.detail, "v0.9.0");
    }

    #[test]
    fn missing_config_fails_dependent_checks() {
        let tmp = TempDir::new().unwrap();

        let mut report = DoctorReport::default();
        check_project(&mut report, &tmp.path().join(".env.deploy"), &FixedDescriber);

        assert!(!report.config_file.passed);
        assert!(report.config_file.detail.contains("not found"));
        assert!(!report.required_keys.passed);
        assert!(!report.build_context.passed);
        assert!(!report.source_descriptor.passed);
    }

    #[test]
    fn missing_keys_are_listed() {
        let tmp = TempDir::new().unwrap();
        let config_path = tmp.path().join(".env.deploy");
        std::fs::write(&config_path, "DOCKER_ACCOUNT=acme\n").unwrap();

        let mut report = DoctorReport::default();
        check_project(&mut report, &config_path, &FixedDescriber);

        assert!(report.config_file.passed);
        assert_eq!(report.required_keys.detail, "missing DOCKER_REPO, DEPLOY_DIR");
        assert!(!report.build_context.passed);
    }
}
