//! Tensor operation node types emitted inline in `forward`
//!
//! Fragments here use the slot tokens `x`, `x1`, `x2` for their declared
//! inputs and assign their result to `x`. The emitter rewrites those tokens
//! to the dataflow variables bound at each call site.

use crate::catalog::{CatalogNode, NodeDefinition, NodeRole, ParamMap, ParamSpec, PortSpec};

/// Element-wise addition of two tensors
#[derive(Default)]
pub struct AddNode;

fn render_add(_params: &ParamMap) -> String {
    "# Add operation\nx = x1 + x2".to_string()
}

impl CatalogNode for AddNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "add",
            "Add",
            "Model Architecture",
            "Element-wise addition",
            render_add,
        )
        .with_color("#ec4899")
        .with_inputs(vec![
            PortSpec::new("input1", "Input 1"),
            PortSpec::new("input2", "Input 2"),
        ])
        .with_outputs(vec![PortSpec::new("output", "Output")])
        .with_role(NodeRole::InlineOp)
    }
}

/// Concatenation of two tensors along one dimension
#[derive(Default)]
pub struct ConcatNode;

fn render_concat(params: &ParamMap) -> String {
    let dim = params.python("dim", "1");
    format!(
        "# Concat operation (dim={})\nx = torch.cat([x1, x2], dim={})",
        dim, dim
    )
}

impl CatalogNode for ConcatNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "concat",
            "Concat",
            "Model Architecture",
            "Concatenate tensors",
            render_concat,
        )
        .with_color("#ec4899")
        .with_params(vec![ParamSpec::number("dim", "Dimension", 1.0)])
        .with_inputs(vec![
            PortSpec::new("input1", "Input 1"),
            PortSpec::new("input2", "Input 2"),
        ])
        .with_outputs(vec![PortSpec::new("output", "Output")])
        .with_role(NodeRole::InlineOp)
    }
}

/// Reshape of a tensor to a target shape
#[derive(Default)]
pub struct ReshapeNode;

fn render_reshape(params: &ParamMap) -> String {
    format!(
        "# Reshape operation\nx = x.view({})",
        params.python("shape", "[-1, 512]")
    )
}

impl CatalogNode for ReshapeNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "reshape",
            "Reshape",
            "Model Architecture",
            "Reshape tensor",
            render_reshape,
        )
        .with_color("#ec4899")
        .with_params(vec![ParamSpec::string("shape", "Target Shape", "[-1, 512]")])
        .with_inputs(vec![PortSpec::new("input", "Input")])
        .with_outputs(vec![PortSpec::new("output", "Output")])
        .with_role(NodeRole::InlineOp)
    }
}
