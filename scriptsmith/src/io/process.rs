//! Child process execution with timeouts and bounded output capture.

use std::io::Read;
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::Duration;

use anyhow::{Context, Result, anyhow};
use tracing::{debug, warn};
use wait_timeout::ChildExt;

/// Captured output of a finished (or killed) child process.
#[derive(Debug)]
pub struct CommandOutput {
    pub status: ExitStatus,
    pub stdout: String,
    pub stderr: String,
    /// Bytes discarded once a stream hit the capture limit.
    pub dropped_bytes: usize,
    pub timed_out: bool,
}

/// Run `cmd` to completion, killing it once `timeout` expires.
///
/// Stdout and stderr are drained concurrently while the child runs so a
/// chatty process can never deadlock on a full pipe. At most
/// `output_limit_bytes` of each stream is kept; the rest is drained and
/// discarded.
pub fn run_with_timeout(
    mut cmd: Command,
    timeout: Duration,
    output_limit_bytes: usize,
) -> Result<CommandOutput> {
    cmd.stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    debug!("spawning child process");
    let mut child = cmd.spawn().context("spawn child process")?;

    let stdout = child
        .stdout
        .take()
        .ok_or_else(|| anyhow!("stdout was not piped"))?;
    let stderr = child
        .stderr
        .take()
        .ok_or_else(|| anyhow!("stderr was not piped"))?;
    let stdout_handle = thread::spawn(move || drain_limited(stdout, output_limit_bytes));
    let stderr_handle = thread::spawn(move || drain_limited(stderr, output_limit_bytes));

    let mut timed_out = false;
    let status = match child.wait_timeout(timeout).context("wait for child")? {
        Some(status) => status,
        None => {
            warn!(timeout_secs = timeout.as_secs(), "child timed out, killing");
            timed_out = true;
            child.kill().context("kill child")?;
            child.wait().context("wait after kill")?
        }
    };

    let (stdout, dropped_out) = join_drain(stdout_handle).context("join stdout reader")?;
    let (stderr, dropped_err) = join_drain(stderr_handle).context("join stderr reader")?;
    let dropped_bytes = dropped_out + dropped_err;
    if dropped_bytes > 0 {
        warn!(dropped_bytes, "output capture limit reached");
    }

    debug!(exit_code = ?status.code(), timed_out, "child finished");
    Ok(CommandOutput {
        status,
        stdout: String::from_utf8_lossy(&stdout).into_owned(),
        stderr: String::from_utf8_lossy(&stderr).into_owned(),
        dropped_bytes,
        timed_out,
    })
}

fn join_drain(handle: thread::JoinHandle<Result<(Vec<u8>, usize)>>) -> Result<(Vec<u8>, usize)> {
    match handle.join() {
        Ok(result) => result,
        Err(_) => Err(anyhow!("output reader thread panicked")),
    }
}

fn drain_limited<R: Read>(mut reader: R, limit: usize) -> Result<(Vec<u8>, usize)> {
    let mut buf = Vec::new();
    let mut dropped = 0usize;
    let mut chunk = [0u8; 8192];

    loop {
        let n = reader.read(&mut chunk).context("read output")?;
        if n == 0 {
            break;
        }
        let remaining = limit.saturating_sub(buf.len());
        let keep = n.min(remaining);
        buf.extend_from_slice(&chunk[..keep]);
        dropped += n - keep;
    }

    Ok((buf, dropped))
}

#[cfg(all(test, unix))]
mod tests {
    use super::*;

    fn sh(script: &str) -> Command {
        let mut cmd = Command::new("sh");
        cmd.arg("-c").arg(script);
        cmd
    }

    #[test]
    fn captures_streams_and_exit_status() {
        let output = run_with_timeout(
            sh("echo out; echo err >&2; exit 3"),
            Duration::from_secs(5),
            10_000,
        )
        .expect("run");
        assert_eq!(output.status.code(), Some(3));
        assert!(output.stdout.contains("out"));
        assert!(output.stderr.contains("err"));
        assert!(!output.timed_out);
    }

    #[test]
    fn timeout_kills_the_child() {
        let output =
            run_with_timeout(sh("sleep 5"), Duration::from_millis(100), 10_000).expect("run");
        assert!(output.timed_out);
        assert!(!output.status.success());
    }

    #[test]
    fn output_limit_bounds_capture() {
        let output = run_with_timeout(sh("printf aaaaaaaaaa"), Duration::from_secs(5), 4)
            .expect("run");
        assert_eq!(output.stdout, "aaaa");
        assert_eq!(output.dropped_bytes, 6);
    }
}
