//! Built-in node type library
//!
//! One file per category. Every type here registers into
//! [`NodeCatalog::builtin`](crate::catalog::NodeCatalog::builtin) and can be
//! registered individually into explicit catalogs.

pub mod activations;
pub mod io;
pub mod layers;
pub mod ops;

pub use activations::{LeakyReluNode, ReluNode, SigmoidNode, SoftmaxNode, TanhNode};
pub use io::{DataLoaderNode, InputNode, OutputNode};
pub use layers::{
    AvgPool2dNode, BatchNorm2dNode, Conv2dNode, Conv3dNode, DropoutNode, FlattenNode, LinearNode,
    MaxPool2dNode,
};
pub use ops::{AddNode, ConcatNode, ReshapeNode};
