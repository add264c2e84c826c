//! Backend invocation: one bounded model query per call.
//!
//! The [`ModelRunner`] trait decouples orchestration from the actual model
//! runner program (`ollama run <model> <prompt>` by default). Tests use
//! scripted runners that return predetermined outputs without spawning
//! processes.

use std::process::Command;
use std::time::Duration;

use anyhow::Result;
use tracing::{debug, info, instrument, warn};

use crate::core::types::InvocationResult;
use crate::io::process::run_with_timeout;

/// Raw outcome of one runner execution.
#[derive(Debug, Clone)]
pub struct RunnerOutput {
    pub stdout: String,
    pub stderr: String,
    pub exit_code: Option<i32>,
    pub success: bool,
    pub timed_out: bool,
}

/// Abstraction over the external model-runner program.
pub trait ModelRunner {
    /// Execute one query against `model`, bounded by `timeout`.
    ///
    /// `Err` means the runner could not be executed at all (e.g. the binary
    /// is missing); a runner that ran and failed is an `Ok` with
    /// `success == false`.
    fn run(&self, model: &str, prompt: &str, timeout: Duration) -> Result<RunnerOutput>;
}

/// Runner that spawns the configured CLI program.
pub struct CliModelRunner {
    program: String,
    output_limit_bytes: usize,
}

impl CliModelRunner {
    pub fn new(program: impl Into<String>, output_limit_bytes: usize) -> Self {
        Self {
            program: program.into(),
            output_limit_bytes,
        }
    }
}

impl ModelRunner for CliModelRunner {
    #[instrument(skip_all, fields(model, timeout_secs = timeout.as_secs()))]
    fn run(&self, model: &str, prompt: &str, timeout: Duration) -> Result<RunnerOutput> {
        let mut cmd = Command::new(&self.program);
        cmd.arg("run").arg(model).arg(prompt);
        let output = run_with_timeout(cmd, timeout, self.output_limit_bytes)?;
        Ok(RunnerOutput {
            success: output.status.success(),
            exit_code: output.status.code(),
            stdout: output.stdout,
            stderr: output.stderr,
            timed_out: output.timed_out,
        })
    }
}

/// Execute one model query, capturing every failure as data.
///
/// Exactly one attempt is made per call; retry policy belongs to callers.
/// An empty prompt or non-positive timeout is rejected before any process
/// is spawned.
#[instrument(skip_all, fields(model, timeout_secs = timeout.as_secs()))]
pub fn invoke<R: ModelRunner>(
    runner: &R,
    model: &str,
    prompt: &str,
    timeout: Duration,
) -> InvocationResult {
    if prompt.trim().is_empty() {
        return InvocationResult::Failure(
            "refusing to invoke model with an empty prompt".to_string(),
        );
    }
    if timeout.is_zero() {
        return InvocationResult::Failure("timeout must be positive".to_string());
    }

    info!(model, "querying model");
    let output = match runner.run(model, prompt, timeout) {
        Ok(output) => output,
        Err(err) => {
            warn!(err = %err, "model runner unavailable");
            return InvocationResult::Failure(format!("model runner unavailable: {err:#}"));
        }
    };

    if output.timed_out {
        warn!("model query timed out");
        return InvocationResult::Failure(format!(
            "{model} timed out after {}s",
            timeout.as_secs()
        ));
    }
    if !output.success {
        warn!(exit_code = ?output.exit_code, "model runner exited non-zero");
        let detail = match output.exit_code {
            Some(code) => format!("exit status {code}"),
            None => "termination by signal".to_string(),
        };
        let stderr = output.stderr.trim();
        return InvocationResult::Failure(if stderr.is_empty() {
            format!("{model} failed with {detail}")
        } else {
            format!("{model} failed with {detail}: {stderr}")
        });
    }

    debug!(bytes = output.stdout.len(), "model query succeeded");
    InvocationResult::Success(output.stdout.trim().to_string())
}
