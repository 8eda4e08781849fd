//! Process execution: the [`Executor`] abstraction and the [`CommandRunner`].
//!
//! Every external tool call goes through a typed argument vector — commands
//! are never built by string interpolation, so there is nothing to quote or
//! escape.

use std::process::{Command, Output};
use std::sync::Arc;

use crate::error::ExecError;
use crate::logging::Log;

/// Result of a command execution.
#[derive(Debug)]
pub struct ExecResult {
    pub stdout: String,
    pub stderr: String,
    pub success: bool,
    pub code: Option<i32>,
}

impl From<Output> for ExecResult {
    fn from(output: Output) -> Self {
        Self {
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            success: output.status.success(),
            code: output.status.code(),
        }
    }
}

/// Abstraction over external process execution.
///
/// Implement this trait to swap in a mock during unit tests. The production
/// implementation is [`SystemExecutor`]. A non-zero exit is *not* an `Err`
/// here — the [`CommandRunner`] decides how exit status maps to failure so
/// that output can be logged either way. `Err` means the process could not
/// be spawned at all.
pub trait Executor: Send + Sync {
    /// Run a command with extra environment variables, capturing its output.
    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, ExecError>;

    /// Run a command, capturing its output.
    fn run(&self, program: &str, args: &[&str]) -> Result<ExecResult, ExecError> {
        self.run_with_env(program, args, &[])
    }

    /// Check if a program is available on PATH.
    fn which(&self, program: &str) -> bool;
}

/// Production [`Executor`] that spawns real processes.
#[derive(Debug, Default)]
pub struct SystemExecutor;

impl Executor for SystemExecutor {
    fn run_with_env(
        &self,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<ExecResult, ExecError> {
        let mut cmd = Command::new(program);
        cmd.args(args);
        for (k, v) in env {
            cmd.env(k, v);
        }
        let output = cmd.output().map_err(|source| ExecError::Spawn {
            program: program.to_string(),
            source,
        })?;
        Ok(ExecResult::from(output))
    }

    fn which(&self, program: &str) -> bool {
        which::which(program).is_ok()
    }
}

/// Labelled command execution with captured output forwarded to the log.
///
/// The full stdout+stderr of every command lands in the run log under the
/// label; the interactive user only ever sees a short failure summary. No
/// retries, no timeouts — a hung command hangs the run, by design.
pub struct CommandRunner {
    executor: Arc<dyn Executor>,
    log: Arc<dyn Log>,
}

impl CommandRunner {
    #[must_use]
    pub fn new(executor: Arc<dyn Executor>, log: Arc<dyn Log>) -> Self {
        Self { executor, log }
    }

    /// Run `program` with `args`, logging all output under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] if the process cannot be spawned or exits
    /// non-zero.
    pub fn run(&self, label: &str, program: &str, args: &[&str]) -> Result<(), ExecError> {
        self.run_with_env(label, program, args, &[])
    }

    /// Run `program` with `args` and extra environment variables, logging
    /// all output under `label`.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] if the process cannot be spawned or exits
    /// non-zero.
    pub fn run_with_env(
        &self,
        label: &str,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<(), ExecError> {
        self.capture_with_env(label, program, args, env).map(|_| ())
    }

    /// Run `program` with `args`, logging output under `label`, and return
    /// the captured stdout.
    ///
    /// # Errors
    ///
    /// Returns [`ExecError`] if the process cannot be spawned or exits
    /// non-zero.
    pub fn capture(&self, label: &str, program: &str, args: &[&str]) -> Result<String, ExecError> {
        self.capture_with_env(label, program, args, &[])
    }

    /// Whether a program resolves on the search path.
    #[must_use]
    pub fn which(&self, program: &str) -> bool {
        self.executor.which(program)
    }

    fn capture_with_env(
        &self,
        label: &str,
        program: &str,
        args: &[&str],
        env: &[(&str, &str)],
    ) -> Result<String, ExecError> {
        self.log
            .debug(&format!("{label}: {program} {}", args.join(" ")));

        let result = self.executor.run_with_env(program, args, env)?;

        for line in result.stdout.lines() {
            self.log.debug(&format!("{label}: {line}"));
        }
        for line in result.stderr.lines() {
            self.log.debug(&format!("{label}: {line}"));
        }

        if result.success {
            Ok(result.stdout)
        } else {
            Err(ExecError::NonZero {
                label: label.to_string(),
                code: result.code.unwrap_or(-1),
                detail: short_detail(&result.stderr),
            })
        }
    }
}

impl std::fmt::Debug for CommandRunner {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CommandRunner").finish_non_exhaustive()
    }
}

/// Condense stderr into the short summary shown to the interactive user.
/// The full output is already in the log file.
fn short_detail(stderr: &str) -> String {
    stderr
        .lines()
        .rev()
        .find(|l| !l.trim().is_empty())
        .unwrap_or("(no output)")
        .trim()
        .to_string()
}

/// Configurable executors for unit tests across the crate.
#[cfg(test)]
pub mod test_helpers {
    use super::{ExecResult, Executor};
    use crate::error::ExecError;
    use std::sync::Mutex;

    /// One recorded executor invocation: program plus arguments.
    pub type RecordedCall = Vec<String>;

    /// A scripted mock executor.
    ///
    /// Maintains a FIFO queue of `(success, stdout)` responses; when the
    /// queue is empty any call returns a failed response. Every invocation
    /// is recorded for later assertion. `which()` returns the configured
    /// value (default `false`).
    #[derive(Debug, Default)]
    pub struct MockExecutor {
        responses: Mutex<std::collections::VecDeque<(bool, String)>>,
        which_result: bool,
        calls: Mutex<Vec<RecordedCall>>,
    }

    impl MockExecutor {
        /// A mock whose every call succeeds with empty stdout.
        #[must_use]
        pub fn ok() -> Self {
            Self::with_responses(vec![(true, String::new()); 32])
        }

        /// A mock with a single failed response.
        #[must_use]
        pub fn fail() -> Self {
            Self::with_responses(vec![(false, String::new())])
        }

        /// A mock from an ordered list of `(success, stdout)` pairs.
        #[must_use]
        pub fn with_responses(responses: Vec<(bool, String)>) -> Self {
            Self {
                responses: Mutex::new(responses.into()),
                which_result: false,
                calls: Mutex::new(Vec::new()),
            }
        }

        /// Set the value returned by every `which()` call.
        #[must_use]
        pub fn with_which(mut self, result: bool) -> Self {
            self.which_result = result;
            self
        }

        /// All recorded calls, each as `[program, arg, ...]`.
        #[must_use]
        pub fn calls(&self) -> Vec<RecordedCall> {
            self.calls.lock().map_or_else(|_| vec![], |g| g.clone())
        }

        /// Number of executor calls made so far.
        #[must_use]
        pub fn call_count(&self) -> usize {
            self.calls.lock().map_or(0, |g| g.len())
        }
    }

    impl Executor for MockExecutor {
        fn run_with_env(
            &self,
            program: &str,
            args: &[&str],
            _env: &[(&str, &str)],
        ) -> Result<ExecResult, ExecError> {
            let mut call = vec![program.to_string()];
            call.extend(args.iter().map(ToString::to_string));
            if let Ok(mut guard) = self.calls.lock() {
                guard.push(call);
            }

            let (success, stdout) = self.responses.lock().map_or_else(
                |_| (false, "mutex poisoned".to_string()),
                |mut guard| {
                    guard
                        .pop_front()
                        .unwrap_or_else(|| (false, "unexpected call".to_string()))
                },
            );
            Ok(ExecResult {
                stdout,
                stderr: String::new(),
                success,
                code: Some(i32::from(!success)),
            })
        }

        fn which(&self, _: &str) -> bool {
            self.which_result
        }
    }

    /// A quiet [`crate::logging::Log`] that records messages for assertions.
    #[derive(Debug, Default)]
    pub struct RecordingLog {
        pub lines: Mutex<Vec<String>>,
        pub steps: Mutex<Vec<(String, crate::logging::StepStatus)>>,
    }

    impl RecordingLog {
        #[must_use]
        pub fn new() -> Self {
            Self::default()
        }

        pub fn push(&self, prefix: &str, msg: &str) {
            if let Ok(mut guard) = self.lines.lock() {
                guard.push(format!("{prefix} {msg}"));
            }
        }

        /// All recorded display lines.
        #[must_use]
        pub fn lines(&self) -> Vec<String> {
            self.lines.lock().map_or_else(|_| vec![], |g| g.clone())
        }

        /// All recorded `(step name, status)` pairs in order.
        #[must_use]
        pub fn statuses(&self) -> Vec<(String, crate::logging::StepStatus)> {
            self.steps.lock().map_or_else(|_| vec![], |g| g.clone())
        }
    }

    impl crate::logging::Log for RecordingLog {
        fn stage(&self, msg: &str) {
            self.push("STG", msg);
        }
        fn info(&self, msg: &str) {
            self.push("INF", msg);
        }
        fn debug(&self, msg: &str) {
            self.push("DBG", msg);
        }
        fn warn(&self, msg: &str) {
            self.push("WRN", msg);
        }
        fn error(&self, msg: &str) {
            self.push("ERR", msg);
        }
        fn dry_run(&self, msg: &str) {
            self.push("DRY", msg);
        }
        fn record_step(
            &self,
            name: &str,
            status: crate::logging::StepStatus,
            _message: Option<&str>,
        ) {
            if let Ok(mut guard) = self.steps.lock() {
                guard.push((name.to_string(), status));
            }
        }
    }
}
