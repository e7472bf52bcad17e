//! MNIST classifier example
//!
//! Two conv/pool stages followed by a small classifier head, the classic
//! starter architecture for handwritten digit recognition.

use super::{Difficulty, ExampleProject};
use crate::graph::{Edge, ModelGraph, NodeInstance};

pub fn example() -> ExampleProject {
    let graph = ModelGraph {
        nodes: vec![
            NodeInstance::new("input-1", "input")
                .with_label("Input")
                .with_position(100.0, 80.0)
                .with_param("shape", "[1, 1, 28, 28]")
                .with_param("dtype", "float32"),
            NodeInstance::new("conv1", "conv2d")
                .with_label("Conv2d")
                .with_position(100.0, 180.0)
                .with_param("in_channels", 1)
                .with_param("out_channels", 32)
                .with_param("kernel_size", 3)
                .with_param("stride", 1)
                .with_param("padding", 1),
            NodeInstance::new("relu1", "relu")
                .with_label("ReLU")
                .with_position(100.0, 280.0)
                .with_param("inplace", false),
            NodeInstance::new("pool1", "maxpool2d")
                .with_label("MaxPool2d")
                .with_position(100.0, 380.0)
                .with_param("kernel_size", 2)
                .with_param("stride", 2)
                .with_param("padding", 0),
            NodeInstance::new("conv2", "conv2d")
                .with_label("Conv2d")
                .with_position(350.0, 80.0)
                .with_param("in_channels", 32)
                .with_param("out_channels", 64)
                .with_param("kernel_size", 3)
                .with_param("stride", 1)
                .with_param("padding", 1),
            NodeInstance::new("relu2", "relu")
                .with_label("ReLU")
                .with_position(350.0, 180.0)
                .with_param("inplace", false),
            NodeInstance::new("pool2", "maxpool2d")
                .with_label("MaxPool2d")
                .with_position(350.0, 280.0)
                .with_param("kernel_size", 2)
                .with_param("stride", 2)
                .with_param("padding", 0),
            NodeInstance::new("flatten", "flatten")
                .with_label("Flatten")
                .with_position(350.0, 380.0)
                .with_param("start_dim", 1),
            NodeInstance::new("fc1", "linear")
                .with_label("Linear")
                .with_position(600.0, 80.0)
                .with_param("in_features", 3136)
                .with_param("out_features", 128)
                .with_param("bias", true),
            NodeInstance::new("relu3", "relu")
                .with_label("ReLU")
                .with_position(600.0, 180.0)
                .with_param("inplace", false),
            NodeInstance::new("fc2", "linear")
                .with_label("Linear")
                .with_position(600.0, 280.0)
                .with_param("in_features", 128)
                .with_param("out_features", 10)
                .with_param("bias", true),
        ],
        edges: vec![
            Edge::new("e1", "input-1", "conv1"),
            Edge::new("e2", "conv1", "relu1"),
            Edge::new("e3", "relu1", "pool1"),
            Edge::new("e4", "pool1", "conv2"),
            Edge::new("e5", "conv2", "relu2"),
            Edge::new("e6", "relu2", "pool2"),
            Edge::new("e7", "pool2", "flatten"),
            Edge::new("e8", "flatten", "fc1"),
            Edge::new("e9", "fc1", "relu3"),
            Edge::new("e10", "relu3", "fc2"),
        ],
    };

    ExampleProject {
        id: "mnist-classifier",
        name: "MNIST Classifier",
        description: "Classic handwritten digit recognition model",
        difficulty: Difficulty::Beginner,
        tags: &["vision", "classification", "beginner"],
        graph,
    }
}
