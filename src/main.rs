//! Blockforge command line interface
//!
//! Drives the export pipeline from the terminal: compile a saved project or
//! a bundled example into a PyTorch project directory, list the node
//! catalog, or validate a graph without exporting it.

use anyhow::{bail, Context};
use blockforge::catalog::NodeCatalog;
use blockforge::codegen::{self, topological_order, ExportOptions, Hyperparameters};
use blockforge::examples;
use blockforge::graph::ModelGraph;
use blockforge::project::ProjectStore;
use clap::{Args, Parser, Subcommand};
use std::path::{Path, PathBuf};

#[derive(Parser)]
#[command(name = "blockforge")]
#[command(about = "Compile node-based neural network graphs into PyTorch projects")]
#[command(version)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Export a saved project to a PyTorch project directory
    Export {
        /// Project name in the store, or a path to a .json save file
        project: String,

        /// Directory to write the generated files into
        #[arg(short, long, default_value = "export")]
        out: PathBuf,

        #[command(flatten)]
        options: ExportArgs,
    },

    /// Export a bundled example
    Example {
        /// Example identifier (see `blockforge examples`)
        id: String,

        /// Directory to write the generated files into
        #[arg(short, long, default_value = "export")]
        out: PathBuf,

        #[command(flatten)]
        options: ExportArgs,
    },

    /// List the bundled examples
    Examples,

    /// List every node type in the catalog
    Catalog {
        /// Only show one category
        #[arg(long)]
        category: Option<String>,
    },

    /// Check that a saved project would export cleanly
    Validate {
        /// Project name in the store, or a path to a .json save file
        project: String,
    },
}

#[derive(Args)]
struct ExportArgs {
    /// Python class name for the generated model
    #[arg(short, long, default_value = "CustomModel")]
    name: String,

    /// Training epochs written into the configuration
    #[arg(long, default_value_t = 10)]
    epochs: u32,

    /// Batch size written into the configuration
    #[arg(long, default_value_t = 32)]
    batch_size: u32,

    /// Learning rate written into the configuration
    #[arg(long, default_value_t = 0.001)]
    learning_rate: f64,
}

impl ExportArgs {
    fn into_options(self) -> ExportOptions {
        ExportOptions {
            model_name: self.name,
            hyperparams: Hyperparameters {
                epochs: self.epochs,
                batch_size: self.batch_size,
                learning_rate: self.learning_rate,
            },
        }
    }
}

fn main() -> anyhow::Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Export {
            project,
            out,
            options,
        } => {
            let graph = load_graph(&project)?;
            export(&graph, &out, options.into_options())
        }
        Commands::Example { id, out, options } => {
            let example = examples::find(&id).with_context(|| {
                format!("no bundled example '{}' (try `blockforge examples`)", id)
            })?;
            export(&example.graph, &out, options.into_options())
        }
        Commands::Examples => {
            list_examples();
            Ok(())
        }
        Commands::Catalog { category } => list_catalog(category.as_deref()),
        Commands::Validate { project } => validate(&project),
    }
}

/// Resolve a project argument as a store name or a file path
fn load_graph(project: &str) -> anyhow::Result<ModelGraph> {
    let store = ProjectStore::default_location();
    let path = PathBuf::from(project);
    let loaded = if path.extension().and_then(|ext| ext.to_str()) == Some("json") || path.exists()
    {
        store.load_path(&path)
    } else {
        store.load(project)
    };
    let project = loaded.with_context(|| format!("failed to load project '{}'", project))?;
    Ok(project.graph)
}

fn export(graph: &ModelGraph, out: &Path, options: ExportOptions) -> anyhow::Result<()> {
    if graph.is_empty() {
        bail!("the graph has no nodes; nothing to export");
    }
    let artifacts = codegen::export_graph_with(graph, NodeCatalog::builtin(), options)?;
    artifacts
        .write_to_dir(out)
        .with_context(|| format!("failed to write artifacts to {}", out.display()))?;
    println!("Exported {} files to {}", artifacts.len(), out.display());
    for name in artifacts.names() {
        println!("  {}", name);
    }
    Ok(())
}

fn list_examples() {
    for example in examples::all() {
        println!(
            "{:<18} {:<13} {}",
            example.id,
            example.difficulty.name(),
            example.description
        );
    }
}

fn list_catalog(only: Option<&str>) -> anyhow::Result<()> {
    let catalog = NodeCatalog::builtin();
    if let Some(name) = only {
        if !catalog.categories().iter().any(|category| *category == name) {
            bail!(
                "no category '{}' (available: {})",
                name,
                catalog.categories().join(", ")
            );
        }
    }
    for category in catalog.categories() {
        if only.is_some() && only != Some(category) {
            continue;
        }
        println!("{}", category);
        for def in catalog.by_category(category) {
            println!("  {:<12} {:<10} {}", def.type_id, def.role.name(), def.description);
        }
        println!();
    }
    Ok(())
}

fn validate(project: &str) -> anyhow::Result<()> {
    let graph = load_graph(project)?;
    topological_order(&graph.nodes, &graph.edges)?;

    let catalog = NodeCatalog::builtin();
    let unknown: Vec<&str> = graph
        .nodes
        .iter()
        .filter(|node| !catalog.contains(&node.type_id))
        .map(|node| node.id.as_str())
        .collect();
    if !unknown.is_empty() {
        bail!("nodes with unknown types: {}", unknown.join(", "));
    }

    if graph.is_empty() {
        println!("project is valid but empty; export would refuse it");
    } else {
        println!(
            "{} nodes, {} edges, export would succeed",
            graph.node_count(),
            graph.edge_count()
        );
    }
    Ok(())
}
