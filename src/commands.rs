//! CLI command implementations

use anyhow::Context;
use phylo_graph::{Attributes, GraphBackend, GraphCompat, GraphDocument, NodeId, StableGraph};
use phylo_harness::{HarnessConfig, Scenario, ScenarioStatus, Suite, files_equivalent};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

type DocumentGraph = StableGraph<Attributes, Option<f64>>;

pub fn compare(first: &Path, second: &Path) -> anyhow::Result<()> {
    let equivalent = files_equivalent(first, second).with_context(|| {
        format!("Failed to compare {} with {}", first.display(), second.display())
    })?;

    if !equivalent {
        anyhow::bail!("{} and {} differ", first.display(), second.display());
    }
    println!("{} and {} are equivalent", first.display(), second.display());
    Ok(())
}

pub async fn run(
    config_path: Option<PathBuf>,
    scenario: Option<Scenario>,
    timeout: Option<u64>,
    json: bool,
) -> anyhow::Result<()> {
    let mut config = HarnessConfig::discover(config_path.as_deref())?;
    if let Some(secs) = timeout {
        anyhow::ensure!(secs > 0, "--timeout must be at least 1 second");
        config.timeout_secs = secs;
    }

    let scenarios = match scenario {
        Some(scenario) => vec![scenario],
        None => Scenario::ALL.to_vec(),
    };

    tracing::info!(
        "Running {} scenario(s) against {}",
        scenarios.len(),
        config.executable
    );
    let suite = Suite::new(config);
    let report = suite.run(&scenarios).await;

    if json {
        println!("{}", report.to_json()?);
    } else {
        for entry in &report.scenarios {
            match &entry.status {
                ScenarioStatus::Passed => {
                    println!("{:<10} passed  ({}ms)", entry.scenario, entry.elapsed_ms)
                }
                ScenarioStatus::Failed(reason) => {
                    println!("{:<10} FAILED  {}", entry.scenario, reason)
                }
                ScenarioStatus::Errored(reason) => {
                    println!("{:<10} ERROR   {}", entry.scenario, reason)
                }
            }
        }
    }

    if !report.passed() {
        anyhow::bail!("Some scenarios did not pass");
    }
    Ok(())
}

pub fn graph(document: &Path, flow: Option<(String, String)>) -> anyhow::Result<()> {
    let text = std::fs::read_to_string(document)
        .with_context(|| format!("Failed to read {}", document.display()))?;
    let doc = GraphDocument::from_json(&text)
        .with_context(|| format!("Failed to parse graph document {}", document.display()))?;

    let (graph, names) = StableGraph::from_document(&doc);
    let compat = GraphCompat::<DocumentGraph>::new();
    tracing::info!(
        "Loaded {} nodes, {} edges with {:?}",
        graph.node_count(),
        graph.edge_count(),
        compat.capabilities()
    );

    let labels: BTreeMap<NodeId, &str> = names.iter().map(|(name, id)| (*id, name.as_str())).collect();
    let label = |id: NodeId| labels.get(&id).copied().unwrap_or("?");

    println!("nodes: {}", compat.str_nodes(&graph)?);
    let in_degrees: BTreeMap<NodeId, usize> = compat.in_degrees(&graph)?.into_iter().collect();
    for id in graph.node_ids() {
        let successors: Vec<&str> = compat
            .successors(&graph, id)?
            .into_iter()
            .map(label)
            .collect();
        println!(
            "{} (out {}, in {}): -> [{}]",
            label(id),
            compat.out_degree(&graph, id)?,
            in_degrees.get(&id).copied().unwrap_or(0),
            successors.join(", ")
        );
    }

    if let Some((source, sink)) = flow {
        let lookup = |name: &str| {
            names
                .get(name)
                .copied()
                .with_context(|| format!("No node named '{name}' in {}", document.display()))
        };
        let value = compat.maximum_flow_value(&graph, lookup(&source)?, lookup(&sink)?)?;
        println!("max flow {source} -> {sink}: {value}");
    }
    Ok(())
}
