//! External process runner with a bounded wait

use std::path::PathBuf;
use std::process::Stdio;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use tokio::process::Command;

use crate::error::HarnessError;

/// Default upper bound on how long a run may take.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(600);

/// What a finished run looked like.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunOutcome {
    pub program: String,
    pub args: Vec<String>,
    /// `None` when the process was terminated by a signal.
    pub exit_code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
    pub elapsed_ms: u64,
}

impl RunOutcome {
    pub fn success(&self) -> bool {
        self.exit_code == Some(0)
    }
}

/// Runs a program to completion, killing it if it outlives `timeout`.
#[derive(Debug, Clone)]
pub struct ProcessRunner {
    timeout: Duration,
    working_dir: Option<PathBuf>,
}

impl ProcessRunner {
    pub fn new(timeout: Duration) -> Self {
        Self {
            timeout,
            working_dir: None,
        }
    }

    /// Run the program from `dir` instead of the current directory.
    pub fn working_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.working_dir = Some(dir.into());
        self
    }

    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Run `program` with `args`, capturing its output.
    ///
    /// A non-zero exit is not an error here; it is reported in the outcome.
    pub async fn run(&self, program: &str, args: &[String]) -> Result<RunOutcome, HarnessError> {
        let mut command = Command::new(program);
        command
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);
        if let Some(dir) = &self.working_dir {
            command.current_dir(dir);
        }

        tracing::info!("Running {} {}", program, args.join(" "));
        let started = Instant::now();
        let child = command.spawn().map_err(|source| HarnessError::Spawn {
            program: program.to_string(),
            source,
        })?;

        // Dropping the wait future on timeout drops the child, which kills it.
        let output = match tokio::time::timeout(self.timeout, child.wait_with_output()).await {
            Ok(result) => result.map_err(|source| HarnessError::Wait {
                program: program.to_string(),
                source,
            })?,
            Err(_) => {
                tracing::warn!("{} did not finish within {:?}, killed", program, self.timeout);
                return Err(HarnessError::TimedOut {
                    program: program.to_string(),
                    timeout: self.timeout,
                });
            }
        };

        let outcome = RunOutcome {
            program: program.to_string(),
            args: args.to_vec(),
            exit_code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        };
        tracing::debug!(
            "{} finished with {:?} in {}ms",
            program,
            outcome.exit_code,
            outcome.elapsed_ms
        );
        Ok(outcome)
    }
}

impl Default for ProcessRunner {
    fn default() -> Self {
        Self::new(DEFAULT_TIMEOUT)
    }
}
