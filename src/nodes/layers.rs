//! Trainable and structural layer node types

use crate::catalog::{CatalogNode, NodeDefinition, ParamMap, ParamSpec, PortSpec};

fn tensor_in() -> Vec<PortSpec> {
    vec![PortSpec::new("input", "Input")]
}

fn tensor_out() -> Vec<PortSpec> {
    vec![PortSpec::new("output", "Output")]
}

/// 2D convolution layer
#[derive(Default)]
pub struct Conv2dNode;

fn render_conv2d(params: &ParamMap) -> String {
    format!(
        "self.conv = nn.Conv2d(\n    in_channels={},\n    out_channels={},\n    kernel_size={},\n    stride={},\n    padding={}\n)",
        params.python("in_channels", "3"),
        params.python("out_channels", "64"),
        params.python("kernel_size", "3"),
        params.python("stride", "1"),
        params.python("padding", "1")
    )
}

impl CatalogNode for Conv2dNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "conv2d",
            "Conv2d",
            "Model Architecture",
            "2D Convolution layer",
            render_conv2d,
        )
        .with_color("#2563eb")
        .with_params(vec![
            ParamSpec::number("in_channels", "In Channels", 3.0).with_min(1.0),
            ParamSpec::number("out_channels", "Out Channels", 64.0).with_min(1.0),
            ParamSpec::number("kernel_size", "Kernel Size", 3.0).with_min(1.0),
            ParamSpec::number("stride", "Stride", 1.0).with_min(1.0),
            ParamSpec::number("padding", "Padding", 1.0).with_min(0.0),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// 3D convolution layer
#[derive(Default)]
pub struct Conv3dNode;

fn render_conv3d(params: &ParamMap) -> String {
    format!(
        "self.conv3d = nn.Conv3d(\n    in_channels={},\n    out_channels={},\n    kernel_size={},\n    stride={},\n    padding={}\n)",
        params.python("in_channels", "3"),
        params.python("out_channels", "64"),
        params.python("kernel_size", "3"),
        params.python("stride", "1"),
        params.python("padding", "1")
    )
}

impl CatalogNode for Conv3dNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "conv3d",
            "Conv3d",
            "Model Architecture",
            "3D Convolution layer",
            render_conv3d,
        )
        .with_color("#2563eb")
        .with_params(vec![
            ParamSpec::number("in_channels", "In Channels", 3.0).with_min(1.0),
            ParamSpec::number("out_channels", "Out Channels", 64.0).with_min(1.0),
            ParamSpec::number("kernel_size", "Kernel Size", 3.0).with_min(1.0),
            ParamSpec::number("stride", "Stride", 1.0).with_min(1.0),
            ParamSpec::number("padding", "Padding", 1.0).with_min(0.0),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Fully connected layer
#[derive(Default)]
pub struct LinearNode;

fn render_linear(params: &ParamMap) -> String {
    format!(
        "self.fc = nn.Linear(\n    in_features={},\n    out_features={},\n    bias={}\n)",
        params.python("in_features", "512"),
        params.python("out_features", "10"),
        params.python("bias", "True")
    )
}

impl CatalogNode for LinearNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "linear",
            "Linear",
            "Model Architecture",
            "Fully connected layer",
            render_linear,
        )
        .with_color("#2563eb")
        .with_params(vec![
            ParamSpec::number("in_features", "In Features", 512.0).with_min(1.0),
            ParamSpec::number("out_features", "Out Features", 10.0).with_min(1.0),
            ParamSpec::boolean("bias", "Use Bias", true),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Batch normalization over 2D feature maps
#[derive(Default)]
pub struct BatchNorm2dNode;

fn render_batchnorm2d(params: &ParamMap) -> String {
    format!(
        "self.bn = nn.BatchNorm2d(\n    num_features={},\n    eps={},\n    momentum={}\n)",
        params.python("num_features", "64"),
        params.python("eps", "0.00001"),
        params.python("momentum", "0.1")
    )
}

impl CatalogNode for BatchNorm2dNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "batchnorm2d",
            "BatchNorm2d",
            "Model Architecture",
            "Batch Normalization 2D",
            render_batchnorm2d,
        )
        .with_color("#8b5cf6")
        .with_params(vec![
            ParamSpec::number("num_features", "Num Features", 64.0).with_min(1.0),
            ParamSpec::number("eps", "Epsilon", 0.00001)
                .with_min(0.0)
                .with_step(0.00001),
            ParamSpec::number("momentum", "Momentum", 0.1)
                .with_min(0.0)
                .with_max(1.0)
                .with_step(0.01),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Max pooling over 2D feature maps
#[derive(Default)]
pub struct MaxPool2dNode;

fn render_maxpool2d(params: &ParamMap) -> String {
    format!(
        "self.pool = nn.MaxPool2d(\n    kernel_size={},\n    stride={},\n    padding={}\n)",
        params.python("kernel_size", "2"),
        params.python("stride", "2"),
        params.python("padding", "0")
    )
}

impl CatalogNode for MaxPool2dNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "maxpool2d",
            "MaxPool2d",
            "Model Architecture",
            "Max Pooling 2D",
            render_maxpool2d,
        )
        .with_color("#f59e0b")
        .with_params(vec![
            ParamSpec::number("kernel_size", "Kernel Size", 2.0).with_min(1.0),
            ParamSpec::number("stride", "Stride", 2.0).with_min(1.0),
            ParamSpec::number("padding", "Padding", 0.0).with_min(0.0),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Average pooling over 2D feature maps
#[derive(Default)]
pub struct AvgPool2dNode;

fn render_avgpool2d(params: &ParamMap) -> String {
    format!(
        "self.avgpool = nn.AvgPool2d(\n    kernel_size={},\n    stride={},\n    padding={}\n)",
        params.python("kernel_size", "2"),
        params.python("stride", "2"),
        params.python("padding", "0")
    )
}

impl CatalogNode for AvgPool2dNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "avgpool2d",
            "AvgPool2d",
            "Model Architecture",
            "Average Pooling 2D",
            render_avgpool2d,
        )
        .with_color("#f59e0b")
        .with_params(vec![
            ParamSpec::number("kernel_size", "Kernel Size", 2.0).with_min(1.0),
            ParamSpec::number("stride", "Stride", 2.0).with_min(1.0),
            ParamSpec::number("padding", "Padding", 0.0).with_min(0.0),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Dropout regularization layer
#[derive(Default)]
pub struct DropoutNode;

fn render_dropout(params: &ParamMap) -> String {
    format!(
        "self.dropout = nn.Dropout(p={}, inplace={})",
        params.python("p", "0.5"),
        params.python("inplace", "False")
    )
}

impl CatalogNode for DropoutNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "dropout",
            "Dropout",
            "Model Architecture",
            "Dropout layer",
            render_dropout,
        )
        .with_color("#8b5cf6")
        .with_params(vec![
            ParamSpec::number("p", "Dropout Rate", 0.5)
                .with_min(0.0)
                .with_max(1.0)
                .with_step(0.1),
            ParamSpec::boolean("inplace", "Inplace", false),
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

/// Flatten layer collapsing trailing dimensions
#[derive(Default)]
pub struct FlattenNode;

fn render_flatten(params: &ParamMap) -> String {
    format!(
        "self.flatten = nn.Flatten(start_dim={})",
        params.python("start_dim", "1")
    )
}

impl CatalogNode for FlattenNode {
    fn definition() -> NodeDefinition {
        NodeDefinition::new(
            "flatten",
            "Flatten",
            "Model Architecture",
            "Flatten layer",
            render_flatten,
        )
        .with_color("#8b5cf6")
        .with_params(vec![
            ParamSpec::number("start_dim", "Start Dim", 1.0).with_min(0.0)
        ])
        .with_inputs(tensor_in())
        .with_outputs(tensor_out())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::NodeRole;

    #[test]
    fn test_conv2d_metadata() {
        let def = Conv2dNode::definition();
        assert_eq!(def.type_id, "conv2d");
        assert_eq!(def.display_name, "Conv2d");
        assert_eq!(def.role, NodeRole::Layer);
        assert_eq!(def.params.len(), 5);
        assert_eq!(def.inputs.len(), 1);
        assert_eq!(def.outputs.len(), 1);
    }

    #[test]
    fn test_conv2d_fragment() {
        let def = Conv2dNode::definition();
        let mut params = ParamMap::new();
        params.insert("in_channels", 1);
        params.insert("out_channels", 32);
        assert_eq!(
            def.fragment(&params),
            "self.conv = nn.Conv2d(\n    in_channels=1,\n    out_channels=32,\n    kernel_size=3,\n    stride=1,\n    padding=1\n)"
        );
    }

    #[test]
    fn test_linear_bias_renders_capitalized() {
        let def = LinearNode::definition();
        let mut params = ParamMap::new();
        params.insert("bias", false);
        assert!(def.fragment(&params).contains("bias=False"));
        assert!(def.fragment(&ParamMap::new()).contains("bias=True"));
    }

    #[test]
    fn test_batchnorm_eps_keeps_precision() {
        let def = BatchNorm2dNode::definition();
        assert!(def.fragment(&ParamMap::new()).contains("eps=0.00001"));
    }

    #[test]
    fn test_single_line_layers() {
        assert_eq!(
            DropoutNode::definition().fragment(&ParamMap::new()),
            "self.dropout = nn.Dropout(p=0.5, inplace=False)"
        );
        assert_eq!(
            FlattenNode::definition().fragment(&ParamMap::new()),
            "self.flatten = nn.Flatten(start_dim=1)"
        );
    }
}
