//! Bundled example graphs
//!
//! Ready-made architectures for exploring the editor and exercising the
//! export pipeline end to end. Each example builds a fresh [`ModelGraph`]
//! from literals, so callers own the result and can edit it freely.

pub mod mnist;
pub mod resnet_block;
pub mod simple_cnn;

use crate::graph::ModelGraph;

/// Rough skill level an example is aimed at
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Difficulty {
    Beginner,
    Intermediate,
    Advanced,
}

impl Difficulty {
    pub fn name(self) -> &'static str {
        match self {
            Difficulty::Beginner => "Beginner",
            Difficulty::Intermediate => "Intermediate",
            Difficulty::Advanced => "Advanced",
        }
    }
}

/// A bundled example: metadata plus the graph itself
#[derive(Debug, Clone)]
pub struct ExampleProject {
    pub id: &'static str,
    pub name: &'static str,
    pub description: &'static str,
    pub difficulty: Difficulty,
    pub tags: &'static [&'static str],
    pub graph: ModelGraph,
}

/// Every bundled example, beginner material first
pub fn all() -> Vec<ExampleProject> {
    vec![
        mnist::example(),
        simple_cnn::example(),
        resnet_block::example(),
    ]
}

/// Look up a bundled example by identifier
pub fn find(id: &str) -> Option<ExampleProject> {
    all().into_iter().find(|example| example.id == id)
}
