//! The end-to-end check scenarios for the search program

use std::fmt;
use std::str::FromStr;
use std::time::Instant;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::config::HarnessConfig;
use crate::error::HarnessError;
use crate::expect::{expect_directory, expect_equivalent, expect_exit_success, expect_non_empty_directory};
use crate::fixtures::Fixtures;
use crate::invocation::{BEST_TOPOLOGIES_DIR, BETTER_TREES_DIR};
use crate::process::{ProcessRunner, RunOutcome};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Scenario {
    /// Plain search: outputs match the references, no sampling directories.
    Search,
    /// Search with sampling: both sampling directories exist and are non-empty.
    Sampling,
}

impl Scenario {
    pub const ALL: [Scenario; 2] = [Scenario::Search, Scenario::Sampling];

    pub fn name(&self) -> &'static str {
        match self {
            Scenario::Search => "search",
            Scenario::Sampling => "sampling",
        }
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Scenario {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "search" => Ok(Scenario::Search),
            "sampling" => Ok(Scenario::Sampling),
            other => Err(format!("unknown scenario '{other}' (expected search or sampling)")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", content = "detail", rename_all = "snake_case")]
pub enum ScenarioStatus {
    Passed,
    /// A check ran and did not hold.
    Failed(String),
    /// A check could not run.
    Errored(String),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScenarioReport {
    pub scenario: Scenario,
    pub status: ScenarioStatus,
    pub elapsed_ms: u64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SuiteReport {
    pub started_at: DateTime<Utc>,
    pub scenarios: Vec<ScenarioReport>,
}

impl SuiteReport {
    pub fn passed(&self) -> bool {
        self.scenarios
            .iter()
            .all(|report| report.status == ScenarioStatus::Passed)
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(self)
    }
}

/// Runs scenarios against one configuration.
#[derive(Debug, Clone)]
pub struct Suite {
    config: HarnessConfig,
    runner: ProcessRunner,
    fixtures: Fixtures,
}

impl Suite {
    pub fn new(config: HarnessConfig) -> Self {
        let runner = config.runner();
        let fixtures = config.fixtures();
        Self {
            config,
            runner,
            fixtures,
        }
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn fixtures(&self) -> &Fixtures {
        &self.fixtures
    }

    /// Run one scenario's program and checks, stopping at the first problem.
    ///
    /// Leaves the scratch directory as the program wrote it.
    pub async fn check(&self, scenario: Scenario) -> Result<RunOutcome, HarnessError> {
        self.fixtures
            .ensure_tmp()
            .map_err(|e| HarnessError::io(&self.fixtures.tmp_dir, e))?;

        let invocation = match scenario {
            Scenario::Search => self.config.invocation(),
            Scenario::Sampling => self.config.invocation().sampling(self.config.sampling),
        };
        let outcome = self
            .runner
            .run(&invocation.executable, &invocation.args())
            .await?;
        expect_exit_success(&outcome)?;

        let best_topologies = self.fixtures.tmp_path(BEST_TOPOLOGIES_DIR);
        let better_trees = self.fixtures.tmp_path(BETTER_TREES_DIR);
        match scenario {
            Scenario::Search => {
                for name in &self.config.reference_files {
                    expect_equivalent(&self.fixtures.tmp_path(name), &self.fixtures.data_path(name))?;
                }
                expect_directory(&best_topologies, false)?;
                expect_directory(&better_trees, false)?;
            }
            Scenario::Sampling => {
                expect_non_empty_directory(&best_topologies)?;
                expect_non_empty_directory(&better_trees)?;
            }
        }
        Ok(outcome)
    }

    /// Run one scenario and clear the scratch directory afterwards.
    pub async fn run_scenario(&self, scenario: Scenario) -> ScenarioReport {
        let started = Instant::now();
        let result = self.check(scenario).await;

        let mut status = match result {
            Ok(_) => ScenarioStatus::Passed,
            Err(e) if e.is_failure() => ScenarioStatus::Failed(e.to_string()),
            Err(e) => ScenarioStatus::Errored(e.to_string()),
        };
        if let Err(e) = self.fixtures.clear_tmp() {
            tracing::warn!("Could not clear {}: {}", self.fixtures.tmp_dir.display(), e);
            if status == ScenarioStatus::Passed {
                status = ScenarioStatus::Errored(
                    HarnessError::io(&self.fixtures.tmp_dir, e).to_string(),
                );
            }
        }

        match &status {
            ScenarioStatus::Passed => tracing::info!("Scenario {} passed", scenario),
            ScenarioStatus::Failed(reason) => tracing::error!("Scenario {} failed: {}", scenario, reason),
            ScenarioStatus::Errored(reason) => tracing::error!("Scenario {} errored: {}", scenario, reason),
        }

        ScenarioReport {
            scenario,
            status,
            elapsed_ms: u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX),
        }
    }

    /// Run `scenarios` one after the other.
    pub async fn run(&self, scenarios: &[Scenario]) -> SuiteReport {
        let started_at = Utc::now();
        let mut reports = Vec::with_capacity(scenarios.len());
        for &scenario in scenarios {
            reports.push(self.run_scenario(scenario).await);
        }
        SuiteReport {
            started_at,
            scenarios: reports,
        }
    }
}
