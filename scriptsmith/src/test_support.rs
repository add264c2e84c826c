//! Test-only scripted model runner.

use std::sync::Mutex;
use std::time::Duration;

use anyhow::{Result, anyhow};

use crate::io::invoker::{ModelRunner, RunnerOutput};

/// A queued response for [`ScriptedRunner`].
#[derive(Debug, Clone)]
pub enum ScriptedResponse {
    /// Clean exit with the given stdout.
    Stdout(String),
    /// Non-zero exit with the given code and stderr.
    ExitCode(i32, String),
    /// The runner hit its timeout and was killed.
    TimedOut,
    /// The runner could not be launched at all.
    LaunchError(String),
}

/// Model runner that replays queued responses without spawning processes.
///
/// Responses are consumed in order; running past the end is an error so
/// tests notice unexpected extra calls. Every call's `(model, prompt)` pair
/// is recorded for assertions.
pub struct ScriptedRunner {
    responses: Mutex<Vec<ScriptedResponse>>,
    calls: Mutex<Vec<(String, String)>>,
}

impl ScriptedRunner {
    pub fn new(mut responses: Vec<ScriptedResponse>) -> Self {
        responses.reverse();
        Self {
            responses: Mutex::new(responses),
            calls: Mutex::new(Vec::new()),
        }
    }

    /// Every `(model, prompt)` pair seen so far, in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().expect("calls lock").clone()
    }
}

impl ModelRunner for ScriptedRunner {
    fn run(&self, model: &str, prompt: &str, _timeout: Duration) -> Result<RunnerOutput> {
        self.calls
            .lock()
            .expect("calls lock")
            .push((model.to_string(), prompt.to_string()));
        let response = self
            .responses
            .lock()
            .expect("responses lock")
            .pop()
            .ok_or_else(|| anyhow!("scripted runner exhausted"))?;
        Ok(match response {
            ScriptedResponse::Stdout(stdout) => RunnerOutput {
                stdout,
                stderr: String::new(),
                exit_code: Some(0),
                success: true,
                timed_out: false,
            },
            ScriptedResponse::ExitCode(code, stderr) => RunnerOutput {
                stdout: String::new(),
                stderr,
                exit_code: Some(code),
                success: false,
                timed_out: false,
            },
            ScriptedResponse::TimedOut => RunnerOutput {
                stdout: String::new(),
                stderr: String::new(),
                exit_code: None,
                success: false,
                timed_out: true,
            },
            ScriptedResponse::LaunchError(reason) => return Err(anyhow!(reason)),
        })
    }
}
