pub mod client;
pub mod engine;
pub mod executor;

pub use client::{
    BuildError, BuildRequest, CheckResult, DoctorReport, EngineClient, PushError, ReadinessError,
};
pub use engine::EngineError;
pub use executor::{DEFAULT_ENGINE, EngineExecutor, RealExecutor};
