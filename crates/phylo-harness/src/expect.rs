//! End-to-end expectations about a search run

use std::path::Path;

use crate::compare::files_equivalent;
use crate::error::{CheckFailure, HarnessError};
use crate::process::RunOutcome;

pub fn expect_exit_success(outcome: &RunOutcome) -> Result<(), HarnessError> {
    if outcome.success() {
        return Ok(());
    }
    Err(CheckFailure::ExitStatus {
        program: outcome.program.clone(),
        code: outcome.exit_code,
        stderr: outcome.stderr.clone(),
    }
    .into())
}

/// `produced` must hold the same lines as `reference`, ignoring line endings.
pub fn expect_equivalent(produced: &Path, reference: &Path) -> Result<(), HarnessError> {
    let equivalent = files_equivalent(produced, reference).map_err(|e| {
        // Blame whichever side could not be opened.
        let path = if produced.is_file() { reference } else { produced };
        HarnessError::io(path, e)
    })?;

    if equivalent {
        tracing::debug!("{} matches {}", produced.display(), reference.display());
        Ok(())
    } else {
        Err(CheckFailure::ContentMismatch {
            produced: produced.to_path_buf(),
            reference: reference.to_path_buf(),
        }
        .into())
    }
}

/// `path` must be a directory when `expected`, and must not be one otherwise.
pub fn expect_directory(path: &Path, expected: bool) -> Result<(), HarnessError> {
    if path.is_dir() == expected {
        return Ok(());
    }
    Err(CheckFailure::DirectoryPresence {
        path: path.to_path_buf(),
        expected,
    }
    .into())
}

/// `path` must be a directory holding at least one entry.
pub fn expect_non_empty_directory(path: &Path) -> Result<(), HarnessError> {
    expect_directory(path, true)?;
    let mut entries = std::fs::read_dir(path).map_err(|e| HarnessError::io(path, e))?;
    match entries.next() {
        Some(Ok(_)) => Ok(()),
        Some(Err(e)) => Err(HarnessError::io(path, e)),
        None => Err(CheckFailure::EmptyDirectory {
            path: path.to_path_buf(),
        }
        .into()),
    }
}
