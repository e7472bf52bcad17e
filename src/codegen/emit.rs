//! Python artifact emission from ordered node instances
//!
//! The generator walks a topologically ordered node sequence and assembles
//! the four export artifacts. Every node gets a symbolic name from a
//! per-type 1-based counter (`conv2d1`, `conv2d2`, `relu1`), layer fragments
//! are re-targeted onto those names, and forward-pass values are tracked
//! through a small variable pool so merge operations reference the variables
//! their true predecessors produced.

use super::artifact::{ArtifactSet, CONFIG_FILE, MODEL_FILE, README_FILE, TRAIN_FILE};
use super::error::ExportError;
use crate::catalog::{NodeCatalog, NodeDefinition, NodeRole, ParamMap, ParamValue};
use crate::graph::{Edge, NodeInstance};
use log::{debug, warn};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet, HashMap};

/// Training defaults carried into the configuration artifact
#[derive(Debug, Clone, PartialEq)]
pub struct Hyperparameters {
    pub epochs: u32,
    pub batch_size: u32,
    pub learning_rate: f64,
}

impl Default for Hyperparameters {
    fn default() -> Self {
        Self {
            epochs: 10,
            batch_size: 32,
            learning_rate: 0.001,
        }
    }
}

/// Export-wide settings
#[derive(Debug, Clone, PartialEq)]
pub struct ExportOptions {
    /// Python class name of the generated model
    pub model_name: String,
    pub hyperparams: Hyperparameters,
}

impl Default for ExportOptions {
    fn default() -> Self {
        Self {
            model_name: "CustomModel".to_string(),
            hyperparams: Hyperparameters::default(),
        }
    }
}

/// The forward argument `x` is dataflow variable zero
const ARG_VAR: usize = 0;

/// Where a consumed value comes from
#[derive(Debug, Clone, Copy, PartialEq)]
enum ValueSource {
    /// The forward argument (also what source nodes stand for)
    Arg,
    /// Output of an earlier node, by ordered index
    Produced(usize),
}

/// Pool of dataflow variable numbers
///
/// Fully consumed variables return here and the lowest free number is
/// reused first, so straight chains keep rebinding plain `x` while skip
/// connections hold their value in `x1`, `x2`, ... until merged.
struct VarPool {
    free: BTreeSet<usize>,
    next_fresh: usize,
}

impl VarPool {
    fn new() -> Self {
        Self {
            free: BTreeSet::new(),
            next_fresh: 1,
        }
    }

    fn allocate(&mut self) -> usize {
        if let Some(&lowest) = self.free.iter().next() {
            self.free.remove(&lowest);
            return lowest;
        }
        let fresh = self.next_fresh;
        self.next_fresh += 1;
        fresh
    }

    fn release(&mut self, var: usize) {
        self.free.insert(var);
    }
}

fn var_name(var: usize) -> String {
    if var == ARG_VAR {
        "x".to_string()
    } else {
        format!("x{}", var)
    }
}

fn value_name(source: ValueSource, var_of: &[Option<usize>]) -> String {
    match source {
        ValueSource::Arg => var_name(ARG_VAR),
        ValueSource::Produced(index) => var_of
            .get(index)
            .copied()
            .flatten()
            .map(var_name)
            .unwrap_or_else(|| var_name(ARG_VAR)),
    }
}

/// Replace the declared attribute in `self.attr = ...` with the symbolic name
fn rewrite_declaration(fragment: &str, name: &str, node_id: &str) -> String {
    if let Some(after) = fragment.strip_prefix("self.") {
        if let Some(eq) = after.find('=') {
            let attr = after[..eq].trim_end();
            let is_ident = !attr.is_empty()
                && attr.chars().all(|c| c.is_ascii_alphanumeric() || c == '_');
            if is_ident {
                return format!("self.{} ={}", name, &after[eq + 1..]);
            }
        }
    }
    warn!(
        "Node '{}': fragment declares no module attribute, keeping it verbatim",
        node_id
    );
    fragment.to_string()
}

/// Rewrite the slot tokens of an inline fragment to bound variable names
///
/// Lines assigning to `x` assign to the node's output variable; `x` in an
/// expression is the first input slot and `xN` is slot N. Unbound slots fall
/// back to the forward argument.
fn bind_fragment(fragment: &str, slots: &[String], out: &str) -> String {
    fragment
        .lines()
        .map(|line| {
            if let Some(expr) = line.strip_prefix("x = ") {
                format!("{} = {}", out, bind_tokens(expr, slots))
            } else {
                bind_tokens(line, slots)
            }
        })
        .collect::<Vec<_>>()
        .join("\n")
}

fn bind_tokens(text: &str, slots: &[String]) -> String {
    let mut out = String::with_capacity(text.len());
    let mut chars = text.char_indices().peekable();
    while let Some(&(start, c)) = chars.peek() {
        if c.is_ascii_alphanumeric() || c == '_' {
            let mut end = start;
            while let Some(&(index, word_char)) = chars.peek() {
                if word_char.is_ascii_alphanumeric() || word_char == '_' {
                    end = index + word_char.len_utf8();
                    chars.next();
                } else {
                    break;
                }
            }
            let word = &text[start..end];
            match slot_token(word, slots) {
                Some(name) => out.push_str(name),
                None => out.push_str(word),
            }
        } else {
            out.push(c);
            chars.next();
        }
    }
    out
}

fn slot_token<'a>(word: &str, slots: &'a [String]) -> Option<&'a str> {
    if word == "x" {
        return Some(slots.first().map(String::as_str).unwrap_or("x"));
    }
    let digits = word.strip_prefix('x')?;
    if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    let slot: usize = digits.parse().ok()?;
    if slot == 0 {
        return None;
    }
    Some(slots.get(slot - 1).map(String::as_str).unwrap_or("x"))
}

fn indent_lines(text: &str, indent: &str) -> String {
    text.lines()
        .map(|line| format!("{}{}", indent, line))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Shape of the configuration artifact
#[derive(Serialize)]
struct ModelConfig<'a> {
    model_name: &'a str,
    epochs: u32,
    batch_size: u32,
    learning_rate: ParamValue,
    layers: BTreeMap<&'a str, &'a ParamMap>,
}

/// Assembles the artifact set for one ordered node sequence
pub struct Generator<'a> {
    ordered: Vec<&'a NodeInstance>,
    edges: &'a [Edge],
    catalog: &'a NodeCatalog,
    options: ExportOptions,
}

impl<'a> Generator<'a> {
    /// Creates a generator over an already ordered node sequence
    pub fn new(ordered: Vec<&'a NodeInstance>, edges: &'a [Edge], catalog: &'a NodeCatalog) -> Self {
        Self {
            ordered,
            edges,
            catalog,
            options: ExportOptions::default(),
        }
    }

    pub fn with_options(mut self, options: ExportOptions) -> Self {
        self.options = options;
        self
    }

    /// Produce the four artifacts, or fail without producing any
    pub fn generate(&self) -> Result<ArtifactSet, ExportError> {
        debug!(
            "Generating artifacts for {} nodes, {} edges",
            self.ordered.len(),
            self.edges.len()
        );

        let defs = self.resolve_definitions()?;

        // Per-type counters are seeded fresh per call, so repeated exports
        // of the same snapshot name layers identically.
        let mut counters: HashMap<&str, usize> = HashMap::new();
        let mut names: Vec<String> = Vec::with_capacity(self.ordered.len());
        for node in &self.ordered {
            let counter = counters.entry(node.type_id.as_str()).or_insert(0);
            *counter += 1;
            names.push(format!("{}{}", node.type_id, counter));
        }

        let resolved: Vec<ParamMap> = self
            .ordered
            .iter()
            .zip(&defs)
            .map(|(node, def)| def.resolved_params(&node.params))
            .collect();

        let bindings = self.slot_bindings(&defs);

        // Remaining-consumer counts per producer; the forward argument is
        // tracked as one more producer.
        let mut arg_left = 0usize;
        let mut uses_left = vec![0usize; self.ordered.len()];
        for slots in &bindings {
            for slot in slots {
                match slot {
                    ValueSource::Arg => arg_left += 1,
                    ValueSource::Produced(index) => uses_left[*index] += 1,
                }
            }
        }

        let mut pool = VarPool::new();
        let mut var_of: Vec<Option<usize>> = vec![None; self.ordered.len()];
        let mut decl_lines: Vec<String> = Vec::new();
        let mut forward_lines: Vec<String> = Vec::new();
        let mut last_out: Option<usize> = None;
        let mut sink_return: Option<String> = None;

        for (index, node) in self.ordered.iter().enumerate() {
            let def = defs[index];
            if def.role == NodeRole::Source {
                continue;
            }

            // Input names must be read before consumption so a value freed
            // by this very node can be reused as its output.
            let slot_names: Vec<String> = bindings[index]
                .iter()
                .map(|slot| value_name(*slot, &var_of))
                .collect();

            for slot in &bindings[index] {
                match slot {
                    ValueSource::Arg => {
                        arg_left = arg_left.saturating_sub(1);
                        if arg_left == 0 {
                            pool.release(ARG_VAR);
                        }
                    }
                    ValueSource::Produced(producer) => {
                        uses_left[*producer] = uses_left[*producer].saturating_sub(1);
                        if uses_left[*producer] == 0 {
                            if let Some(var) = var_of[*producer] {
                                pool.release(var);
                            }
                        }
                    }
                }
            }

            match def.role {
                NodeRole::Sink => {
                    sink_return = Some(
                        slot_names
                            .first()
                            .cloned()
                            .unwrap_or_else(|| var_name(ARG_VAR)),
                    );
                }
                NodeRole::Layer => {
                    let out = pool.allocate();
                    var_of[index] = Some(out);
                    last_out = Some(out);
                    let fragment = (def.render)(&resolved[index]);
                    let declaration = rewrite_declaration(&fragment, &names[index], &node.id);
                    decl_lines.push(indent_lines(&declaration, "        "));
                    let input = slot_names
                        .first()
                        .cloned()
                        .unwrap_or_else(|| var_name(ARG_VAR));
                    forward_lines.push(format!(
                        "        {} = self.{}({})",
                        var_name(out),
                        names[index],
                        input
                    ));
                }
                NodeRole::InlineOp => {
                    let out = pool.allocate();
                    var_of[index] = Some(out);
                    last_out = Some(out);
                    let fragment = (def.render)(&resolved[index]);
                    let bound = bind_fragment(&fragment, &slot_names, &var_name(out));
                    forward_lines.push(indent_lines(&bound, "        "));
                }
                NodeRole::Source => {}
            }
        }

        let return_var = sink_return
            .or_else(|| last_out.map(var_name))
            .unwrap_or_else(|| var_name(ARG_VAR));

        let mut artifacts = ArtifactSet::new();
        artifacts.insert(
            MODEL_FILE,
            self.model_artifact(&decl_lines, &forward_lines, &return_var),
        );
        artifacts.insert(TRAIN_FILE, self.train_artifact());
        artifacts.insert(CONFIG_FILE, self.config_artifact(&names, &resolved)?);
        artifacts.insert(README_FILE, self.readme_artifact(&defs));
        Ok(artifacts)
    }

    /// Resolve every node's definition up front; any miss aborts the export
    fn resolve_definitions(&self) -> Result<Vec<&'a NodeDefinition>, ExportError> {
        self.ordered
            .iter()
            .map(|node| {
                self.catalog
                    .get(&node.type_id)
                    .ok_or_else(|| ExportError::UnknownNodeType {
                        node_id: node.id.clone(),
                        type_id: node.type_id.clone(),
                    })
            })
            .collect()
    }

    /// Assign each consuming node's declared input slots to value sources
    ///
    /// Edges naming an input port via `target_port` claim that slot; the
    /// rest fill free slots in emission order of their producers. Unfilled
    /// slots fall back to the forward argument.
    fn slot_bindings(&self, defs: &[&NodeDefinition]) -> Vec<Vec<ValueSource>> {
        let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(self.ordered.len());
        for (index, node) in self.ordered.iter().enumerate() {
            index_of.entry(node.id.as_str()).or_insert(index);
        }

        let mut incoming: Vec<Vec<(usize, usize, &Edge)>> = vec![Vec::new(); self.ordered.len()];
        for (position, edge) in self.edges.iter().enumerate() {
            let (source, target) = match (
                index_of.get(edge.source.as_str()),
                index_of.get(edge.target.as_str()),
            ) {
                (Some(&source), Some(&target)) => (source, target),
                // The orderer already warned about these
                _ => continue,
            };
            if defs[target].role == NodeRole::Source {
                continue;
            }
            incoming[target].push((source, position, edge));
        }

        let mut bindings: Vec<Vec<ValueSource>> = Vec::with_capacity(self.ordered.len());
        for (index, def) in defs.iter().enumerate() {
            if def.role == NodeRole::Source {
                bindings.push(Vec::new());
                continue;
            }

            let slot_count = def.inputs.len().max(1);
            let mut slots: Vec<Option<ValueSource>> = vec![None; slot_count];
            let mut unpinned: Vec<(usize, usize, ValueSource)> = Vec::new();

            for &(source, position, edge) in &incoming[index] {
                let value = match defs[source].role {
                    NodeRole::Source => ValueSource::Arg,
                    NodeRole::Sink => {
                        warn!(
                            "Edge '{}' uses sink node '{}' as a data source",
                            edge.id, edge.source
                        );
                        ValueSource::Arg
                    }
                    _ => ValueSource::Produced(source),
                };
                let pinned = edge
                    .target_port
                    .as_deref()
                    .and_then(|port| def.inputs.iter().position(|spec| spec.name == port));
                match pinned {
                    Some(slot) if slots[slot].is_none() => slots[slot] = Some(value),
                    Some(_) => {
                        warn!(
                            "Edge '{}': input port already connected on node '{}'",
                            edge.id, self.ordered[index].id
                        );
                        unpinned.push((source, position, value));
                    }
                    None => {
                        if let Some(port) = &edge.target_port {
                            warn!(
                                "Edge '{}' names unknown input port '{}' on node '{}'",
                                edge.id, port, self.ordered[index].id
                            );
                        }
                        unpinned.push((source, position, value));
                    }
                }
            }

            unpinned.sort_by_key(|&(source, position, _)| (source, position));
            let mut queue = unpinned.into_iter();
            for slot in slots.iter_mut() {
                if slot.is_none() {
                    if let Some((_, _, value)) = queue.next() {
                        *slot = Some(value);
                    }
                }
            }
            for _ in queue {
                warn!(
                    "Extra connection into node '{}' ignored",
                    self.ordered[index].id
                );
            }

            bindings.push(
                slots
                    .into_iter()
                    .map(|slot| slot.unwrap_or(ValueSource::Arg))
                    .collect(),
            );
        }
        bindings
    }

    fn model_artifact(
        &self,
        decl_lines: &[String],
        forward_lines: &[String],
        return_var: &str,
    ) -> String {
        let mut model = String::new();
        model.push_str("import torch\nimport torch.nn as nn\n\n");
        model.push_str(&format!("class {}(nn.Module):\n", self.options.model_name));
        model.push_str("    def __init__(self, config):\n");
        model.push_str("        super().__init__()\n");
        model.push_str(&decl_lines.join("\n"));
        model.push_str("\n    \n    def forward(self, x):\n");
        model.push_str(&forward_lines.join("\n"));
        model.push_str(&format!("\n        return {}\n", return_var));
        model
    }

    fn train_artifact(&self) -> String {
        let hp = &self.options.hyperparams;
        let mut train = String::new();
        train.push_str("import torch\nimport torch.nn as nn\nimport torch.optim as optim\n");
        train.push_str("from torch.utils.data import DataLoader\n");
        train.push_str(&format!("from model import {}\n", self.options.model_name));
        train.push_str("import json\n\n");
        train.push_str("# Load configuration\nwith open('config.json', 'r') as f:\n    config = json.load(f)\n\n");
        train.push_str("# Initialize model\n");
        train.push_str(&format!("model = {}(config)\n", self.options.model_name));
        train.push_str("device = torch.device('cuda' if torch.cuda.is_available() else 'cpu')\n");
        train.push_str("model = model.to(device)\n\n");
        train.push_str("# Loss function and optimizer\ncriterion = nn.CrossEntropyLoss()\n");
        train.push_str(&format!(
            "optimizer = optim.Adam(model.parameters(), lr=config.get('learning_rate', {}))\n\n",
            ParamValue::Number(hp.learning_rate).as_python()
        ));
        train.push_str("# Training loop\n");
        train.push_str("def train(model, train_loader, criterion, optimizer, epochs):\n");
        train.push_str("    model.train()\n");
        train.push_str("    for epoch in range(epochs):\n");
        train.push_str("        running_loss = 0.0\n");
        train.push_str("        for batch_idx, (data, target) in enumerate(train_loader):\n");
        train.push_str("            data, target = data.to(device), target.to(device)\n            \n");
        train.push_str("            # Forward pass\n");
        train.push_str("            optimizer.zero_grad()\n");
        train.push_str("            output = model(data)\n");
        train.push_str("            loss = criterion(output, target)\n            \n");
        train.push_str("            # Backward pass\n");
        train.push_str("            loss.backward()\n");
        train.push_str("            optimizer.step()\n            \n");
        train.push_str("            running_loss += loss.item()\n            \n");
        train.push_str("            if batch_idx % 10 == 0:\n");
        train.push_str("                print(f'Epoch [{epoch+1}/{epochs}], Step [{batch_idx}], Loss: {loss.item():.4f}')\n        \n");
        train.push_str("        avg_loss = running_loss / len(train_loader)\n");
        train.push_str("        print(f'Epoch [{epoch+1}/{epochs}] Average Loss: {avg_loss:.4f}')\n\n");
        train.push_str("if __name__ == '__main__':\n");
        train.push_str("    # TODO: Load your dataset here\n");
        train.push_str(&format!(
            "    # train_loader = DataLoader(your_dataset, batch_size=config.get('batch_size', {}), shuffle=True)\n    \n",
            hp.batch_size
        ));
        train.push_str("    print(\"Model architecture:\")\n");
        train.push_str("    print(model)\n");
        train.push_str(&format!(
            "    print(f\"\\nTraining for {{config.get('epochs', {})}} epochs...\")\n",
            hp.epochs
        ));
        train.push_str("    # train(model, train_loader, criterion, optimizer, config['epochs'])\n");
        train
    }

    fn config_artifact(
        &self,
        names: &[String],
        resolved: &[ParamMap],
    ) -> Result<String, ExportError> {
        let layers: BTreeMap<&str, &ParamMap> = names
            .iter()
            .map(String::as_str)
            .zip(resolved.iter())
            .collect();
        let config = ModelConfig {
            model_name: &self.options.model_name,
            epochs: self.options.hyperparams.epochs,
            batch_size: self.options.hyperparams.batch_size,
            learning_rate: ParamValue::Number(self.options.hyperparams.learning_rate),
            layers,
        };
        serde_json::to_string_pretty(&config).map_err(|err| ExportError::Config(err.to_string()))
    }

    fn readme_artifact(&self, defs: &[&NodeDefinition]) -> String {
        let total_layers = defs
            .iter()
            .filter(|def| def.role.in_forward_pass())
            .count();
        let mut summary = String::new();
        for (position, node) in self.ordered.iter().enumerate() {
            summary.push_str(&format!(
                "{}. {} - {}\n",
                position + 1,
                node.label,
                node.type_id
            ));
        }

        let mut readme = String::new();
        readme.push_str("# Blockforge Generated Project\n\n");
        readme.push_str("This project was automatically generated by Blockforge.\n\n");
        readme.push_str("## Model Architecture\n\n");
        readme.push_str(&format!("- Total Layers: {}\n", total_layers));
        readme.push_str("- Framework: PyTorch\n\n");
        readme.push_str("## Files\n\n");
        readme.push_str(&format!(
            "- `model.py`: Model definition ({} class)\n",
            self.options.model_name
        ));
        readme.push_str("- `train.py`: Training script template\n");
        readme.push_str("- `config.json`: Model configuration\n\n");
        readme.push_str("## Usage\n\n");
        readme.push_str("1. Install dependencies:\n```bash\npip install torch torchvision\n```\n\n");
        readme.push_str("2. Load your dataset in `train.py`\n\n");
        readme.push_str("3. Run training:\n```bash\npython train.py\n```\n\n");
        readme.push_str("## Model Summary\n\n```python\n");
        readme.push_str(&summary);
        readme.push_str("```\n\n---\n\nGenerated by Blockforge.\n");
        readme
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::{NodeCatalog, ParamSpec, PortSpec};
    use crate::graph::Edge;

    fn generate(
        nodes: &[NodeInstance],
        edges: &[Edge],
    ) -> Result<ArtifactSet, ExportError> {
        let ordered: Vec<&NodeInstance> = nodes.iter().collect();
        Generator::new(ordered, edges, NodeCatalog::builtin()).generate()
    }

    #[test]
    fn test_chain_keeps_single_variable() {
        let nodes = vec![
            NodeInstance::new("i", "input"),
            NodeInstance::new("c", "conv2d")
                .with_param("in_channels", 1)
                .with_param("out_channels", 32),
            NodeInstance::new("r", "relu"),
        ];
        let edges = vec![Edge::new("e1", "i", "c"), Edge::new("e2", "c", "r")];
        let artifacts = generate(&nodes, &edges).unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        assert!(model.contains("self.conv2d1 = nn.Conv2d("));
        assert!(model.contains("            in_channels=1,"));
        assert!(model.contains("        x = self.conv2d1(x)\n"));
        assert!(model.contains("        x = self.relu1(x)\n"));
        assert!(model.ends_with("        return x\n"));
    }

    #[test]
    fn test_per_type_counters() {
        let nodes = vec![
            NodeInstance::new("c1", "conv2d"),
            NodeInstance::new("r1", "relu"),
            NodeInstance::new("c2", "conv2d"),
        ];
        let edges = vec![Edge::new("e1", "c1", "r1"), Edge::new("e2", "r1", "c2")];
        let artifacts = generate(&nodes, &edges).unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        assert!(model.contains("self.conv2d1 ="));
        assert!(model.contains("self.relu1 ="));
        assert!(model.contains("self.conv2d2 ="));
        assert!(!model.contains("self.conv2d3 ="));
    }

    #[test]
    fn test_unknown_type_is_fatal() {
        let nodes = vec![
            NodeInstance::new("a", "conv2d"),
            NodeInstance::new("b", "Conv2d"),
        ];
        let err = generate(&nodes, &[]).unwrap_err();
        assert_eq!(
            err,
            ExportError::UnknownNodeType {
                node_id: "b".to_string(),
                type_id: "Conv2d".to_string(),
            }
        );
    }

    #[test]
    fn test_residual_merge_references_true_predecessors() {
        let nodes = vec![
            NodeInstance::new("i", "input"),
            NodeInstance::new("c", "conv2d"),
            NodeInstance::new("a", "add"),
            NodeInstance::new("o", "output"),
        ];
        let edges = vec![
            Edge::new("e1", "i", "c"),
            Edge::new("e2", "c", "a").with_target_port("input1"),
            Edge::new("e3", "i", "a").with_target_port("input2"),
            Edge::new("e4", "a", "o"),
        ];
        let artifacts = generate(&nodes, &edges).unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        assert!(model.contains("        x1 = self.conv2d1(x)\n"));
        assert!(model.contains("        # Add operation\n        x = x1 + x\n"));
        assert!(model.ends_with("        return x\n"));
    }

    #[test]
    fn test_unlabeled_merge_slots_fill_in_emission_order() {
        let nodes = vec![
            NodeInstance::new("i", "input"),
            NodeInstance::new("c", "conv2d"),
            NodeInstance::new("a", "add"),
        ];
        let edges = vec![
            Edge::new("e1", "i", "c"),
            Edge::new("e2", "c", "a"),
            Edge::new("e3", "i", "a"),
        ];
        let artifacts = generate(&nodes, &edges).unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        // The skip edge comes from the earlier emitted node, so it takes
        // the first slot.
        assert!(model.contains("        x = x + x1\n"));
    }

    #[test]
    fn test_empty_sequence_emits_trivial_model() {
        let artifacts = generate(&[], &[]).unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        assert!(model.contains("class CustomModel(nn.Module):"));
        assert!(model.contains("    def forward(self, x):\n\n        return x\n"));
        assert_eq!(artifacts.len(), 4);
    }

    #[test]
    fn test_double_generation_is_identical() {
        let nodes = vec![
            NodeInstance::new("i", "input"),
            NodeInstance::new("c", "conv2d"),
            NodeInstance::new("r", "relu"),
        ];
        let edges = vec![Edge::new("e1", "i", "c"), Edge::new("e2", "c", "r")];
        let first = generate(&nodes, &edges).unwrap();
        let second = generate(&nodes, &edges).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn test_config_carries_resolved_params() {
        let nodes = vec![
            NodeInstance::new("c", "conv2d").with_param("in_channels", 1),
        ];
        let artifacts = generate(&nodes, &[]).unwrap();
        let config: serde_json::Value =
            serde_json::from_str(artifacts.get(CONFIG_FILE).unwrap()).unwrap();
        assert_eq!(config["model_name"], "CustomModel");
        assert_eq!(config["epochs"], 10);
        assert_eq!(config["batch_size"], 32);
        assert_eq!(config["learning_rate"], 0.001);
        let layer = &config["layers"]["conv2d1"];
        assert_eq!(layer["in_channels"], 1);
        assert_eq!(layer["out_channels"], 64);
        assert_eq!(layer["stride"], 1);
    }

    #[test]
    fn test_config_drops_undeclared_params() {
        let nodes = vec![
            NodeInstance::new("r", "relu").with_param("bogus", 7),
        ];
        let artifacts = generate(&nodes, &[]).unwrap();
        let config: serde_json::Value =
            serde_json::from_str(artifacts.get(CONFIG_FILE).unwrap()).unwrap();
        assert!(config["layers"]["relu1"].get("bogus").is_none());
        assert_eq!(config["layers"]["relu1"]["inplace"], false);
    }

    #[test]
    fn test_readme_counts_and_summary() {
        let nodes = vec![
            NodeInstance::new("i", "input").with_label("Input"),
            NodeInstance::new("c", "conv2d").with_label("Conv2d"),
            NodeInstance::new("o", "output").with_label("Output"),
        ];
        let edges = vec![Edge::new("e1", "i", "c"), Edge::new("e2", "c", "o")];
        let artifacts = generate(&nodes, &edges).unwrap();
        let readme = artifacts.get(README_FILE).unwrap();
        assert!(readme.contains("- Total Layers: 1\n"));
        assert!(readme.contains("1. Input - input\n"));
        assert!(readme.contains("2. Conv2d - conv2d\n"));
        assert!(readme.contains("3. Output - output\n"));
    }

    #[test]
    fn test_train_script_uses_options() {
        let nodes = vec![NodeInstance::new("c", "conv2d")];
        let ordered: Vec<&NodeInstance> = nodes.iter().collect();
        let options = ExportOptions {
            model_name: "TinyNet".to_string(),
            hyperparams: Hyperparameters {
                epochs: 5,
                batch_size: 16,
                learning_rate: 0.01,
            },
        };
        let artifacts = Generator::new(ordered, &[], NodeCatalog::builtin())
            .with_options(options)
            .generate()
            .unwrap();
        let train = artifacts.get(TRAIN_FILE).unwrap();
        assert!(train.contains("from model import TinyNet\n"));
        assert!(train.contains("model = TinyNet(config)\n"));
        assert!(train.contains("lr=config.get('learning_rate', 0.01)"));
        assert!(train.contains("batch_size=config.get('batch_size', 16)"));
        assert!(train.contains("config.get('epochs', 5)"));
        let model = artifacts.get(MODEL_FILE).unwrap();
        assert!(model.contains("class TinyNet(nn.Module):"));
    }

    #[test]
    fn test_synthetic_catalog_layer_declaration_rewrite() {
        let mut catalog = NodeCatalog::new();
        catalog.insert(
            crate::catalog::NodeDefinition::new(
                "probe",
                "Probe",
                "Testing",
                "Synthetic probe layer",
                |params| format!("self.p = nn.Probe(depth={})", params.python("depth", "1")),
            )
            .with_params(vec![ParamSpec::number("depth", "Depth", 2.0)])
            .with_inputs(vec![PortSpec::new("input", "Input")])
            .with_outputs(vec![PortSpec::new("output", "Output")]),
        );
        let nodes = vec![NodeInstance::new("n", "probe")];
        let ordered: Vec<&NodeInstance> = nodes.iter().collect();
        let artifacts = Generator::new(ordered, &[], &catalog).generate().unwrap();
        let model = artifacts.get(MODEL_FILE).unwrap();
        assert!(model.contains("        self.probe1 = nn.Probe(depth=2)\n"));
        assert!(model.contains("        x = self.probe1(x)\n"));
    }

    #[test]
    fn test_rewrite_declaration() {
        assert_eq!(
            rewrite_declaration("self.conv = nn.Conv2d(\n    stride=1\n)", "conv2d1", "n"),
            "self.conv2d1 = nn.Conv2d(\n    stride=1\n)"
        );
        assert_eq!(
            rewrite_declaration("train_loader = DataLoader(...)", "dataloader1", "n"),
            "train_loader = DataLoader(...)"
        );
    }

    #[test]
    fn test_bind_tokens() {
        let slots = vec!["x2".to_string(), "x".to_string()];
        assert_eq!(bind_tokens("x1 + x2", &slots), "x2 + x");
        assert_eq!(
            bind_tokens("torch.cat([x1, x2], dim=1)", &slots),
            "torch.cat([x2, x], dim=1)"
        );
        assert_eq!(bind_tokens("x.view([-1, 512])", &slots), "x2.view([-1, 512])");
        // Unbound slots fall back to the forward argument
        assert_eq!(bind_tokens("x1 + x2", &[]), "x + x");
    }

    #[test]
    fn test_bind_fragment_rewrites_assignment_target() {
        let slots = vec!["x1".to_string(), "x".to_string()];
        assert_eq!(
            bind_fragment("# Add operation\nx = x1 + x2", &slots, "x3"),
            "# Add operation\nx3 = x1 + x"
        );
    }
}
