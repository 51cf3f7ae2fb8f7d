//! Error types for the check harness
//!
//! Two kinds of problem are kept apart:
//! - a check that ran and did not hold ([`CheckFailure`], the run *failed*)
//! - a check that could not run at all (everything else, the run *errored*)

use std::path::PathBuf;
use std::time::Duration;

/// An expectation about the search program's run that did not hold.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CheckFailure {
    #[error("{program} exited with {}, expected 0{}", describe_code(*code), stderr_tail(stderr))]
    ExitStatus {
        program: String,
        code: Option<i32>,
        stderr: String,
    },

    #[error("{} differs from reference {}", produced.display(), reference.display())]
    ContentMismatch { produced: PathBuf, reference: PathBuf },

    #[error("directory {} should {}exist", path.display(), if *expected { "" } else { "not " })]
    DirectoryPresence { path: PathBuf, expected: bool },

    #[error("directory {} is empty", path.display())]
    EmptyDirectory { path: PathBuf },
}

/// Main harness error type.
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    /// A check ran and did not hold
    #[error("check failed: {0}")]
    Check(#[from] CheckFailure),

    #[error("failed to start {program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("failed waiting for {program}: {source}")]
    Wait {
        program: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{program} timed out after {}s", timeout.as_secs_f64())]
    TimedOut { program: String, timeout: Duration },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("configuration error: {0}")]
    Config(String),
}

impl HarnessError {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        HarnessError::Io {
            path: path.into(),
            source,
        }
    }

    /// True when a check ran and did not hold, false when the run errored.
    #[inline]
    #[must_use]
    pub fn is_failure(&self) -> bool {
        matches!(self, Self::Check(_))
    }
}

fn describe_code(code: Option<i32>) -> String {
    match code {
        Some(code) => format!("status {code}"),
        None => "no status (terminated by signal)".to_string(),
    }
}

fn stderr_tail(stderr: &str) -> String {
    match stderr.trim_end().lines().last() {
        Some(line) if !line.is_empty() => format!(": {line}"),
        _ => String::new(),
    }
}
