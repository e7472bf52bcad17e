//! Residual block example
//!
//! The skip connection keeps the block input alive across the conv path and
//! merges it back with an add node, so exporting this graph exercises the
//! multi-input emission path.

use super::{Difficulty, ExampleProject};
use crate::graph::{Edge, ModelGraph, NodeInstance};

pub fn example() -> ExampleProject {
    let graph = ModelGraph {
        nodes: vec![
            NodeInstance::new("input_1", "input")
                .with_label("Input")
                .with_position(100.0, 100.0)
                .with_param("shape", "[1, 64, 56, 56]")
                .with_param("dtype", "float32"),
            NodeInstance::new("conv1", "conv2d")
                .with_label("Conv2d")
                .with_position(100.0, 200.0)
                .with_param("in_channels", 64)
                .with_param("out_channels", 64)
                .with_param("kernel_size", 3)
                .with_param("stride", 1)
                .with_param("padding", 1),
            NodeInstance::new("bn1", "batchnorm2d")
                .with_label("BatchNorm2d")
                .with_position(100.0, 300.0)
                .with_param("num_features", 64),
            NodeInstance::new("relu1", "relu")
                .with_label("ReLU")
                .with_position(100.0, 400.0),
            NodeInstance::new("conv2", "conv2d")
                .with_label("Conv2d")
                .with_position(100.0, 500.0)
                .with_param("in_channels", 64)
                .with_param("out_channels", 64)
                .with_param("kernel_size", 3)
                .with_param("stride", 1)
                .with_param("padding", 1),
            NodeInstance::new("bn2", "batchnorm2d")
                .with_label("BatchNorm2d")
                .with_position(100.0, 600.0)
                .with_param("num_features", 64),
            NodeInstance::new("add_1", "add")
                .with_label("Add (Residual)")
                .with_position(200.0, 650.0),
            NodeInstance::new("relu2", "relu")
                .with_label("ReLU")
                .with_position(200.0, 750.0),
            NodeInstance::new("output_1", "output")
                .with_label("Output")
                .with_position(200.0, 850.0),
        ],
        edges: vec![
            Edge::new("e1", "input_1", "conv1"),
            Edge::new("e2", "conv1", "bn1"),
            Edge::new("e3", "bn1", "relu1"),
            Edge::new("e4", "relu1", "conv2"),
            Edge::new("e5", "conv2", "bn2"),
            Edge::new("e6", "bn2", "add_1").with_target_port("input1"),
            // Skip connection
            Edge::new("e7", "input_1", "add_1").with_target_port("input2"),
            Edge::new("e8", "add_1", "relu2"),
            Edge::new("e9", "relu2", "output_1"),
        ],
    };

    ExampleProject {
        id: "resnet-block",
        name: "ResNet Block",
        description: "Residual Block with skip connection (3x3 conv, BatchNorm, ReLU)",
        difficulty: Difficulty::Intermediate,
        tags: &["vision", "resnet", "residual"],
        graph,
    }
}
