//! Harness configuration, read from a TOML file
//!
//! Every field has a default, so an empty file (or no file) describes the
//! stock layout: `python phylosofs/phylosofs.py` run on `dat/JNK3.txt`,
//! output to `test/tmp`, references in `test/data`.

use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::HarnessError;
use crate::fixtures::{DATA_DIR, Fixtures, TMP_DIR};
use crate::invocation::SearchInvocation;
use crate::process::{DEFAULT_TIMEOUT, ProcessRunner};

/// Default config file name, looked up in the working directory.
pub const CONFIG_FILE: &str = "phylocheck.toml";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct HarnessConfig {
    /// Program to run.
    pub executable: String,
    /// Arguments placed before the search flags.
    pub leading_args: Vec<String>,
    /// Input sequence file passed with `--inseq`.
    pub input: PathBuf,
    pub tmp_dir: PathBuf,
    pub data_dir: PathBuf,
    /// Sample count for the sampling scenario.
    pub sampling: u32,
    /// Files expected in `tmp_dir` that must match their `data_dir` copies.
    pub reference_files: Vec<String>,
    pub timeout_secs: u64,
    /// Directory the program runs from; the current one when unset.
    pub working_dir: Option<PathBuf>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            executable: "python".to_string(),
            leading_args: vec!["phylosofs/phylosofs.py".to_string()],
            input: PathBuf::from("dat/JNK3.txt"),
            tmp_dir: PathBuf::from(TMP_DIR),
            data_dir: PathBuf::from(DATA_DIR),
            sampling: 100,
            reference_files: vec![
                "treeSearch_532_1.txt".to_string(),
                "solution_532_1_config0.sum".to_string(),
                "solution_532_1_config0.info".to_string(),
            ],
            timeout_secs: DEFAULT_TIMEOUT.as_secs(),
            working_dir: None,
        }
    }
}

impl HarnessConfig {
    pub fn from_toml(text: &str) -> Result<Self, HarnessError> {
        let config: Self = toml::from_str(text).map_err(|e| HarnessError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, HarnessError> {
        let text = std::fs::read_to_string(path).map_err(|e| HarnessError::io(path, e))?;
        tracing::debug!("Loaded harness config from {}", path.display());
        Self::from_toml(&text)
    }

    /// Load `path` if given, else `phylocheck.toml` when present, else defaults.
    pub fn discover(path: Option<&Path>) -> Result<Self, HarnessError> {
        match path {
            Some(path) => Self::load(path),
            None if Path::new(CONFIG_FILE).is_file() => Self::load(Path::new(CONFIG_FILE)),
            None => Ok(Self::default()),
        }
    }

    fn validate(&self) -> Result<(), HarnessError> {
        if self.executable.trim().is_empty() {
            return Err(HarnessError::Config("executable must not be empty".to_string()));
        }
        if self.timeout_secs == 0 {
            return Err(HarnessError::Config("timeout_secs must be at least 1".to_string()));
        }
        Ok(())
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Scratch and reference directories as seen from the harness.
    pub fn fixtures(&self) -> Fixtures {
        Fixtures::new(self.resolve(&self.tmp_dir), self.resolve(&self.data_dir))
    }

    /// Relative paths are relative to `working_dir`, when one is set.
    fn resolve(&self, path: &Path) -> PathBuf {
        match &self.working_dir {
            Some(dir) if path.is_relative() => dir.join(path),
            _ => path.to_path_buf(),
        }
    }

    pub fn runner(&self) -> ProcessRunner {
        let runner = ProcessRunner::new(self.timeout());
        match &self.working_dir {
            Some(dir) => runner.working_dir(dir),
            None => runner,
        }
    }

    /// Invocation writing to the scratch directory, without sampling.
    pub fn invocation(&self) -> SearchInvocation {
        let mut invocation = SearchInvocation::new(&self.executable, &self.tmp_dir, &self.input);
        invocation.leading_args = self.leading_args.clone();
        invocation
    }
}
