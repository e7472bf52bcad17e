//! Data processing node types: inputs, loaders, outputs

use crate::catalog::{CatalogNode, NodeDefinition, NodeRole, ParamMap, ParamSpec, PortSpec};

const DTYPE_OPTIONS: &[&str] = &["float32", "float64", "int32", "int64"];

/// Input tensor node, the entry point of a model graph
#[derive(Default)]
pub struct InputNode;

fn render_input(params: &ParamMap) -> String {
    format!(
        "# Input Node\nx = torch.randn({}, dtype=torch.{})",
        params.python("shape", "[1, 3, 224, 224]"),
        params.python("dtype", "float32")
    )
}

impl CatalogNode for InputNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "input",
            "Input",
            "Data Processing",
            "Input tensor node",
            render_input,
        )
        .with_color("#3b82f6")
        .with_params(vec![
            ParamSpec::string("shape", "Shape", "[1, 3, 224, 224]"),
            ParamSpec::select("dtype", "Data Type", DTYPE_OPTIONS, "float32"),
        ])
        .with_outputs(vec![PortSpec::new("output", "Output")])
        .with_role(NodeRole::Source)
    }
}

/// Batched dataset loader feeding the training loop
#[derive(Default)]
pub struct DataLoaderNode;

fn render_dataloader(params: &ParamMap) -> String {
    format!(
        "train_loader = DataLoader(\n    dataset,\n    batch_size={},\n    shuffle={},\n    num_workers={}\n)",
        params.python("batch_size", "32"),
        params.python("shuffle", "True"),
        params.python("num_workers", "4")
    )
}

impl CatalogNode for DataLoaderNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "dataloader",
            "DataLoader",
            "Data Processing",
            "PyTorch DataLoader",
            render_dataloader,
        )
        .with_color("#3b82f6")
        .with_params(vec![
            ParamSpec::number("batch_size", "Batch Size", 32.0).with_min(1.0),
            ParamSpec::boolean("shuffle", "Shuffle", true),
            ParamSpec::number("num_workers", "Num Workers", 4.0).with_min(0.0),
        ])
        .with_outputs(vec![PortSpec::new("output", "Output")])
        .with_role(NodeRole::Source)
    }
}

/// Output node marking the value the model returns
#[derive(Default)]
pub struct OutputNode;

fn render_output(_params: &ParamMap) -> String {
    "return x".to_string()
}

impl CatalogNode for OutputNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "output",
            "Output",
            "Data Processing",
            "Output node",
            render_output,
        )
        .with_color("#3b82f6")
        .with_inputs(vec![PortSpec::new("input", "Input")])
        .with_role(NodeRole::Sink)
    }
}
