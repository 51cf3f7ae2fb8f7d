//! Integration tests for phylocheck
//!
//! These drive the scenario suite against a stand-in search program and
//! run the CLI binary end to end.

use phylo_graph::{GraphCompat, GraphDocument, MapGraph, StableGraph};
use phylo_harness::{HarnessConfig, Scenario, ScenarioStatus, Suite};
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Writes the three reference outputs, plus the sampling directories when `-s` is given.
const FAKE_SEARCH: &str = r#"
out=""
sampling=""
while [ $# -gt 0 ]; do
  case "$1" in
    -o) out="$2"; shift 2 ;;
    -s) sampling="$2"; shift 2 ;;
    *) shift ;;
  esac
done
mkdir -p "$out"
printf 'tree 1\nscore 532\n' > "$out/treeSearch_532_1.txt"
printf 'sum\n' > "$out/solution_532_1_config0.sum"
printf 'info\n' > "$out/solution_532_1_config0.info"
if [ -n "$sampling" ]; then
  mkdir -p "$out/bestTopos" "$out/betterTrees"
  echo "((a,b),c);" > "$out/bestTopos/topo_$sampling.txt"
  echo "((a,c),b);" > "$out/betterTrees/tree_$sampling.txt"
fi
"#;

/// A project directory holding a search script, its input and reference data.
fn project(script: &str) -> (TempDir, HarnessConfig) {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();

    fs::write(root.join("search.sh"), script).unwrap();
    fs::create_dir_all(root.join("dat")).unwrap();
    fs::write(root.join("dat/JNK3.txt"), ">seq1\nACGT\n").unwrap();

    // References carry Windows line endings.
    let data = root.join("test/data");
    fs::create_dir_all(&data).unwrap();
    fs::write(data.join("treeSearch_532_1.txt"), "tree 1\r\nscore 532\r\n").unwrap();
    fs::write(data.join("solution_532_1_config0.sum"), "sum\r\n").unwrap();
    fs::write(data.join("solution_532_1_config0.info"), "info\r\n").unwrap();

    let config = HarnessConfig {
        executable: "sh".to_string(),
        leading_args: vec!["search.sh".to_string()],
        timeout_secs: 30,
        working_dir: Some(root.to_path_buf()),
        ..HarnessConfig::default()
    };
    (temp_dir, config)
}

fn tmp_dir(root: &Path) -> PathBuf {
    root.join("test/tmp")
}

#[cfg(unix)]
#[tokio::test]
async fn test_all_scenarios_pass() {
    let (temp_dir, config) = project(FAKE_SEARCH);
    let suite = Suite::new(config);

    let report = suite.run(&Scenario::ALL).await;
    assert_eq!(report.scenarios.len(), 2);
    for entry in &report.scenarios {
        assert_eq!(entry.status, ScenarioStatus::Passed, "{}", entry.scenario);
    }
    assert!(report.passed());

    // Scratch output is cleared after each scenario.
    let tmp = tmp_dir(temp_dir.path());
    assert!(tmp.is_dir());
    assert_eq!(fs::read_dir(&tmp).unwrap().count(), 0);
}

#[cfg(unix)]
#[tokio::test]
async fn test_sampling_directories_are_checked() {
    let (temp_dir, config) = project(FAKE_SEARCH);
    let suite = Suite::new(config);

    suite.check(Scenario::Sampling).await.unwrap();
    let tmp = tmp_dir(temp_dir.path());
    assert!(tmp.join("bestTopos/topo_100.txt").is_file());
    assert!(tmp.join("betterTrees/tree_100.txt").is_file());

    // Leftover sampling output makes the plain search fail.
    let err = suite.check(Scenario::Search).await.unwrap_err();
    assert!(err.is_failure());
    assert!(err.to_string().contains("should not exist"));
}

#[cfg(unix)]
#[tokio::test]
async fn test_content_mismatch_fails() {
    let (temp_dir, config) = project(FAKE_SEARCH);
    fs::write(
        temp_dir.path().join("test/data/solution_532_1_config0.sum"),
        "different\n",
    )
    .unwrap();

    let report = Suite::new(config).run(&[Scenario::Search]).await;
    match &report.scenarios[0].status {
        ScenarioStatus::Failed(reason) => {
            assert!(reason.contains("solution_532_1_config0.sum"), "{reason}")
        }
        other => panic!("expected a failure, got {other:?}"),
    }
    assert!(!report.passed());
}

#[cfg(unix)]
#[tokio::test]
async fn test_missing_reference_errors() {
    let (temp_dir, config) = project(FAKE_SEARCH);
    fs::remove_file(temp_dir.path().join("test/data/treeSearch_532_1.txt")).unwrap();

    let report = Suite::new(config).run(&[Scenario::Search]).await;
    assert!(matches!(
        report.scenarios[0].status,
        ScenarioStatus::Errored(_)
    ));
}

#[cfg(unix)]
#[tokio::test]
async fn test_nonzero_exit_fails() {
    let (_temp_dir, config) = project("echo 'cannot read alignment' >&2\nexit 4\n");

    let report = Suite::new(config).run(&[Scenario::Search]).await;
    match &report.scenarios[0].status {
        ScenarioStatus::Failed(reason) => {
            assert!(reason.contains("status 4"), "{reason}");
            assert!(reason.contains("cannot read alignment"), "{reason}");
        }
        other => panic!("expected a failure, got {other:?}"),
    }
}

#[cfg(unix)]
#[tokio::test]
async fn test_timeout_errors() {
    let (_temp_dir, mut config) = project("sleep 10\n");
    config.timeout_secs = 1;

    let report = Suite::new(config).run(&[Scenario::Sampling]).await;
    match &report.scenarios[0].status {
        ScenarioStatus::Errored(reason) => assert!(reason.contains("timed out"), "{reason}"),
        other => panic!("expected an error, got {other:?}"),
    }
}

#[test]
fn test_document_flow_matches_across_backends() {
    let doc = GraphDocument::from_json(
        r#"{
            "nodes": {"s": {"label": "source"}, "t": {"label": "sink"}},
            "edges": [
                ["s", "a", 10.0], ["s", "b", 5.0], ["a", "b", 15.0],
                ["a", "t", 10.0], ["b", "t", 10.0]
            ]
        }"#,
    )
    .unwrap();

    let (stable, names) = StableGraph::from_document(&doc);
    let stable_flow = GraphCompat::new()
        .maximum_flow_value(&stable, names["s"], names["t"])
        .unwrap();

    let mut map: MapGraph<&str, f64> = MapGraph::new();
    for edge in &doc.edges {
        let (from, to) = edge.endpoints();
        map.add_edge(from, to, edge.capacity().unwrap());
    }
    let map_flow = GraphCompat::new().maximum_flow_value(&map, "s", "t").unwrap();

    assert_eq!(stable_flow, 15.0);
    assert_eq!(map_flow, stable_flow);
}

#[test]
fn test_cli_compare() {
    let temp_dir = TempDir::new().unwrap();
    let first = temp_dir.path().join("first.txt");
    let second = temp_dir.path().join("second.txt");
    let third = temp_dir.path().join("third.txt");
    fs::write(&first, "a\nb\n").unwrap();
    fs::write(&second, "a\r\nb\r\n").unwrap();
    fs::write(&third, "a\nc\n").unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_phylocheck"))
        .arg("compare")
        .arg(&first)
        .arg(&second)
        .output()
        .unwrap();
    assert!(output.status.success());
    assert!(String::from_utf8_lossy(&output.stdout).contains("are equivalent"));

    let output = Command::new(env!("CARGO_BIN_EXE_phylocheck"))
        .arg("compare")
        .arg(&first)
        .arg(&third)
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_graph() {
    let temp_dir = TempDir::new().unwrap();
    let document = temp_dir.path().join("graph.json");
    fs::write(
        &document,
        r#"{"nodes": {"s": {}, "t": {}}, "edges": [["s", "m", 2.5], ["m", "t", 4.0], ["s", "t", 1.0]]}"#,
    )
    .unwrap();

    let output = Command::new(env!("CARGO_BIN_EXE_phylocheck"))
        .arg("graph")
        .arg(&document)
        .args(["--source", "s", "--sink", "t"])
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(output.status.success(), "{stdout}");
    assert!(stdout.contains("max flow s -> t: 3.5"), "{stdout}");
    assert!(stdout.contains("s (out 2, in 0)"), "{stdout}");

    let output = Command::new(env!("CARGO_BIN_EXE_phylocheck"))
        .arg("graph")
        .arg(&document)
        .args(["--source", "s", "--sink", "nowhere"])
        .output()
        .unwrap();
    assert!(!output.status.success());
}

#[test]
fn test_cli_version() {
    let output = Command::new(env!("CARGO_BIN_EXE_phylocheck"))
        .arg("version")
        .output()
        .unwrap();
    let stdout = String::from_utf8_lossy(&output.stdout);
    assert!(stdout.starts_with("phylocheck v"));
}
