use crate::engine::EngineError;
use crate::executor::{EngineExecutor, RealExecutor};
use dockhand_core::ImageTag;
use std::fmt;
use std::path::{Path, PathBuf};

/// Container engine client, parameterized over the executor for testability.
pub struct EngineClient<E: EngineExecutor = RealExecutor> {
    executor: E,
}

impl EngineClient<RealExecutor> {
    /// Client for the given engine executable (`docker`, `podman`, …).
    pub fn new(program: impl Into<String>) -> Self {
        Self {
            executor: RealExecutor::new(program),
        }
    }
}

impl Default for EngineClient<RealExecutor> {
    fn default() -> Self {
        Self {
            executor: RealExecutor::default(),
        }
    }
}

impl<E: EngineExecutor> EngineClient<E> {
    pub fn with_executor(executor: E) -> Self {
        Self { executor }
    }

    // ── Readiness ──

    /// Single blocking `info` call. Any failure means the daemon is not ready.
    pub async fn check_ready(&self) -> Result<(), ReadinessError> {
        self.executor
            .exec(&args(["info"]))
            .await
            .map_err(|e| ReadinessError::NotReady { source: e })?;
        tracing::info!("container engine ready");
        Ok(())
    }

    pub async fn server_version(&self) -> Result<String, EngineError> {
        let out = self
            .executor
            .exec(&args(["version", "--format", "{{.Server.Version}}"]))
            .await?;
        Ok(out.trim().to_owned())
    }

    // ── Build / Push ──

    pub async fn build_image(&self, request: &BuildRequest<'_>) -> Result<(), BuildError> {
        let context = request
            .context
            .to_str()
            .ok_or_else(|| BuildError::InvalidPath(request.context.to_path_buf()))?;
        let tag = request.tag.to_string();

        let mut cmd = vec!["build".to_owned(), "-t".to_owned(), tag];
        if let Some(dockerfile) = request.dockerfile {
            cmd.push("-f".to_owned());
            cmd.push(
                request
                    .context
                    .join(dockerfile)
                    .to_string_lossy()
                    .into_owned(),
            );
        }
        for (name, value) in &request.build_args {
            cmd.push("--build-arg".to_owned());
            cmd.push(format!("{name}={value}"));
        }
        cmd.push(context.to_owned());

        tracing::info!(tag = %request.tag, context, "building image");
        self.executor
            .exec_streaming(&cmd)
            .await
            .map_err(|e| BuildError::Failed { source: e })
    }

    pub async fn push_image(&self, tag: &ImageTag) -> Result<(), PushError> {
        tracing::info!(%tag, "pushing image");
        self.executor
            .exec_streaming(&args(["push", &tag.to_string()]))
            .await
            .map_err(|e| PushError::Failed { source: e })
    }

    // ── Doctor ──

    /// Engine checks for the doctor report. The version check is skipped
    /// (and marked failed) when the engine is not ready.
    pub async fn doctor(&self) -> DoctorReport {
        let mut report = DoctorReport::default();

        match self.check_ready().await {
            Ok(()) => report.engine = CheckResult::ok("Ready"),
            Err(e) => {
                report.engine = CheckResult::fail(&error_chain(&e));
                report.engine_version = CheckResult::fail("engine not ready");
                return report;
            }
        }

        match self.server_version().await {
            Ok(v) if !v.is_empty() => report.engine_version = CheckResult::ok(&v),
            Ok(_) => report.engine_version = CheckResult::fail("server version not reported"),
            Err(e) => report.engine_version = CheckResult::fail(&e.to_string()),
        }

        report
    }
}

// ── Helper ──

fn args<const N: usize>(a: [&str; N]) -> Vec<String> {
    a.iter().map(|s| (*s).to_owned()).collect()
}

fn error_chain(err: &dyn std::error::Error) -> String {
    let mut msg = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        msg.push_str(": ");
        msg.push_str(&cause.to_string());
        source = cause.source();
    }
    msg
}

// ── Request types ──

/// Inputs for one `build` invocation.
#[derive(Debug, Clone)]
pub struct BuildRequest<'a> {
    pub tag: &'a ImageTag,
    pub context: &'a Path,
    /// Dockerfile path relative to `context`.
    pub dockerfile: Option<&'a str>,
    /// `--build-arg NAME=VALUE` pairs, in order.
    pub build_args: Vec<(String, String)>,
}

// ── Doctor types ──

#[derive(Debug, Default)]
pub struct DoctorReport {
    pub engine: CheckResult,
    pub engine_version: CheckResult,
    pub config_file: CheckResult,
    pub required_keys: CheckResult,
    pub build_context: CheckResult,
    pub source_descriptor: CheckResult,
}

impl DoctorReport {
    pub fn all_passed(&self) -> bool {
        self.rows().iter().all(|(_, r)| r.passed)
    }

    fn rows(&self) -> [(&'static str, &CheckResult); 6] {
        [
            ("Container engine", &self.engine),
            ("Engine version", &self.engine_version),
            ("Config file", &self.config_file),
            ("Required keys", &self.required_keys),
            ("Build context", &self.build_context),
            ("Source descriptor", &self.source_descriptor),
        ]
    }
}

impl fmt::Display for DoctorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, result) in self.rows() {
            writeln!(f, "[{}] {label:<18} {}", result.icon(), result.detail)?;
        }
        Ok(())
    }
}

#[derive(Debug, Default, Clone)]
pub struct CheckResult {
    pub passed: bool,
    pub detail: String,
}

impl CheckResult {
    pub fn ok(detail: &str) -> Self {
        Self {
            passed: true,
            detail: detail.to_owned(),
        }
    }

    pub fn fail(detail: &str) -> Self {
        Self {
            passed: false,
            detail: detail.to_owned(),
        }
    }

    pub fn icon(&self) -> &'static str {
        if self.passed { "OK" } else { "NG" }
    }
}

// ── Error types ──

#[derive(Debug, thiserror::Error)]
pub enum ReadinessError {
    #[error("container engine is not ready — start the daemon and retry")]
    NotReady { source: EngineError },
}

#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("build context path is not valid UTF-8: {0}")]
    InvalidPath(PathBuf),

    #[error("image build failed")]
    Failed { source: EngineError },
}

#[derive(Debug, thiserror::Error)]
pub enum PushError {
    #[error("image push failed")]
    Failed { source: EngineError },
}
