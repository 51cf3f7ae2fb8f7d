//! Phylo Harness: end-to-end checks for the tree-search program
//!
//! This crate runs the external search program with a bounded timeout,
//! compares its output files with reference fixtures regardless of line
//! endings, and checks which output directories it created.

pub mod compare;
pub mod config;
pub mod error;
pub mod expect;
pub mod fixtures;
pub mod invocation;
pub mod process;
pub mod suite;


pub use compare::{files_equivalent, readers_equivalent};
pub use config::{CONFIG_FILE, HarnessConfig};
pub use error::{CheckFailure, HarnessError};
pub use expect::{expect_directory, expect_equivalent, expect_exit_success, expect_non_empty_directory};
pub use fixtures::{Fixtures, clear_folder};
pub use invocation::{BEST_TOPOLOGIES_DIR, BETTER_TREES_DIR, SearchInvocation};
pub use process::{DEFAULT_TIMEOUT, ProcessRunner, RunOutcome};
pub use suite::{Scenario, ScenarioReport, ScenarioStatus, Suite, SuiteReport};
