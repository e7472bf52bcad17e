//! Activation function node types

use crate::catalog::{CatalogNode, NodeDefinition, ParamMap, ParamSpec, PortSpec};

fn tensor_in() -> Vec<PortSpec> {
    vec![PortSpec::new("input", "Input")]
}

fn tensor_out() -> Vec<PortSpec> {
    vec![PortSpec::new("output", "Output")]
}

/// Rectified linear unit
#[derive(Default)]
pub struct ReluNode;

fn render_relu(params: &ParamMap) -> String {
    format!(
        "self.relu = nn.ReLU(inplace={})",
        params.python("inplace", "False")
    )
}

impl CatalogNode for ReluNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "relu",
            "ReLU",
            "Model Architecture",
            "ReLU activation",
            render_relu,
        )
        .with_color("#10b981")
        .with_params(vec![ParamSpec::boolean("inplace", "Inplace", false)])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Leaky rectified linear unit
#[derive(Default)]
pub struct LeakyReluNode;

fn render_leakyrelu(params: &ParamMap) -> String {
    format!(
        "self.leakyrelu = nn.LeakyReLU(negative_slope={}, inplace={})",
        params.python("negative_slope", "0.01"),
        params.python("inplace", "False")
    )
}

impl CatalogNode for LeakyReluNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "leakyrelu",
            "LeakyReLU",
            "Model Architecture",
            "Leaky ReLU activation",
            render_leakyrelu,
        )
        .with_color("#10b981")
        .with_params(vec![
            ParamSpec::number("negative_slope", "Negative Slope", 0.01)
                .with_min(0.0)
                .with_step(0.01),
            ParamSpec::boolean("inplace", "Inplace", false),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Sigmoid activation
#[derive(Default)]
pub struct SigmoidNode;

fn render_sigmoid(_params: &ParamMap) -> String {
    "self.sigmoid = nn.Sigmoid()".to_string()
}

impl CatalogNode for SigmoidNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "sigmoid",
            "Sigmoid",
            "Model Architecture",
            "Sigmoid activation",
            render_sigmoid,
        )
        .with_color("#10b981")
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Softmax over one dimension
#[derive(Default)]
pub struct SoftmaxNode;

fn render_softmax(params: &ParamMap) -> String {
    format!("self.softmax = nn.Softmax(dim={})", params.python("dim", "1"))
}

impl CatalogNode for SoftmaxNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "softmax",
            "Softmax",
            "Model Architecture",
            "Softmax activation",
            render_softmax,
        )
        .with_color("#10b981")
        .with_params(vec![ParamSpec::number("dim", "Dimension", 1.0)])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Hyperbolic tangent activation
#[derive(Default)]
pub struct TanhNode;

fn render_tanh(_params: &ParamMap) -> String {
    "self.tanh = nn.Tanh()".to_string()
}

impl CatalogNode for TanhNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "tanh",
            "Tanh",
            "Model Architecture",
            "Tanh activation",
            render_tanh,
        )
        .with_color("#10b981")
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}
