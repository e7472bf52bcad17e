//! Simple CNN example with batch normalization

use super::{Difficulty, ExampleProject};
use crate::graph::{Edge, ModelGraph, NodeInstance};

pub fn example() -> ExampleProject {
    let graph = ModelGraph {
        nodes: vec![
            NodeInstance::new("input-1", "input")
                .with_label("Input")
                .with_position(100.0, 80.0)
                .with_param("shape", "[1, 3, 224, 224]")
                .with_param("dtype", "float32"),
            NodeInstance::new("conv1", "conv2d")
                .with_label("Conv2d")
                .with_position(100.0, 180.0)
                .with_param("in_channels", 3)
                .with_param("out_channels", 64)
                .with_param("kernel_size", 3)
                .with_param("stride", 1)
                .with_param("padding", 1),
            NodeInstance::new("bn1", "batchnorm2d")
                .with_label("BatchNorm2d")
                .with_position(100.0, 280.0)
                .with_param("num_features", 64)
                .with_param("eps", 0.00001)
                .with_param("momentum", 0.1),
            NodeInstance::new("relu1", "relu")
                .with_label("ReLU")
                .with_position(100.0, 380.0)
                .with_param("inplace", false),
            NodeInstance::new("conv2", "conv2d")
                .with_label("Conv2d")
                .with_position(350.0, 80.0)
                .with_param("in_channels", 64)
                .with_param("out_channels", 128)
                .with_param("kernel_size", 3)
                .with_param("stride", 1)
                .with_param("padding", 1),
            NodeInstance::new("bn2", "batchnorm2d")
                .with_label("BatchNorm2d")
                .with_position(350.0, 180.0)
                .with_param("num_features", 128)
                .with_param("eps", 0.00001)
                .with_param("momentum", 0.1),
            NodeInstance::new("relu2", "relu")
                .with_label("ReLU")
                .with_position(350.0, 280.0)
                .with_param("inplace", false),
            NodeInstance::new("pool1", "maxpool2d")
                .with_label("MaxPool2d")
                .with_position(350.0, 380.0)
                .with_param("kernel_size", 2)
                .with_param("stride", 2)
                .with_param("padding", 0),
            NodeInstance::new("avgpool", "avgpool2d")
                .with_label("AvgPool2d")
                .with_position(600.0, 80.0)
                .with_param("kernel_size", 7)
                .with_param("stride", 1)
                .with_param("padding", 0),
            NodeInstance::new("flatten", "flatten")
                .with_label("Flatten")
                .with_position(600.0, 180.0)
                .with_param("start_dim", 1),
            NodeInstance::new("fc1", "linear")
                .with_label("Linear")
                .with_position(600.0, 280.0)
                .with_param("in_features", 128)
                .with_param("out_features", 1000)
                .with_param("bias", true),
        ],
        edges: vec![
            Edge::new("e1", "input-1", "conv1"),
            Edge::new("e2", "conv1", "bn1"),
            Edge::new("e3", "bn1", "relu1"),
            Edge::new("e4", "relu1", "conv2"),
            Edge::new("e5", "conv2", "bn2"),
            Edge::new("e6", "bn2", "relu2"),
            Edge::new("e7", "relu2", "pool1"),
            Edge::new("e8", "pool1", "avgpool"),
            Edge::new("e9", "avgpool", "flatten"),
            Edge::new("e10", "flatten", "fc1"),
        ],
    };

    ExampleProject {
        id: "simple-cnn",
        name: "Simple CNN",
        description: "Standard CNN with BatchNorm layers",
        difficulty: Difficulty::Intermediate,
        tags: &["vision", "cnn", "batchnorm"],
        graph,
    }
}
