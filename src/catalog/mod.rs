//! Node catalog: the library of node types the editor can place
//!
//! A [`NodeDefinition`] describes one node type: identity, category, declared
//! parameters with defaults, ports, its role in the generated model, and the
//! template that renders its Python fragment. Definitions live in a
//! [`NodeCatalog`], an explicit lookup table passed into the code generation
//! pipeline so tests can run against small synthetic catalogs.

pub mod params;

pub use params::{ParamKind, ParamMap, ParamSpec, ParamValue};

use log::{debug, warn};
use once_cell::sync::Lazy;
use std::collections::BTreeMap;

/// A named connection point declared by a node type
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PortSpec {
    pub name: &'static str,
    pub label: &'static str,
}

impl PortSpec {
    pub fn new(name: &'static str, label: &'static str) -> Self {
        Self { name, label }
    }
}

/// How a node type participates in the generated model
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NodeRole {
    /// Declared as a module in `__init__` and invoked in `forward`
    Layer,
    /// Expression emitted directly into `forward`, no module declaration
    InlineOp,
    /// Pure data source, contributes no model lines
    Source,
    /// Pure data sink, drives the final `return`
    Sink,
}

impl NodeRole {
    /// Whether nodes of this role declare a module in `__init__`
    pub fn declares_module(self) -> bool {
        matches!(self, NodeRole::Layer)
    }

    /// Whether nodes of this role emit a line in `forward`
    pub fn in_forward_pass(self) -> bool {
        matches!(self, NodeRole::Layer | NodeRole::InlineOp)
    }

    /// Short name for listings
    pub fn name(self) -> &'static str {
        match self {
            NodeRole::Layer => "layer",
            NodeRole::InlineOp => "inline op",
            NodeRole::Source => "source",
            NodeRole::Sink => "sink",
        }
    }
}

/// Template function producing a node's Python fragment from its parameters
///
/// Called with fully resolved parameters (defaults overlaid with instance
/// values), so implementations read placeholders through the total
/// [`ParamMap::python`] accessor and never panic.
pub type RenderFn = fn(&ParamMap) -> String;

/// Complete description of one node type
#[derive(Debug, Clone)]
pub struct NodeDefinition {
    pub type_id: &'static str,
    pub display_name: &'static str,
    pub category: &'static str,
    pub description: &'static str,
    /// Display color hint for the canvas, as a hex string
    pub color: &'static str,
    pub params: Vec<ParamSpec>,
    pub inputs: Vec<PortSpec>,
    pub outputs: Vec<PortSpec>,
    pub role: NodeRole,
    pub render: RenderFn,
}

impl NodeDefinition {
    /// Create a definition with defaults suitable for a plain layer
    pub fn new(
        type_id: &'static str,
        display_name: &'static str,
        category: &'static str,
        description: &'static str,
        render: RenderFn,
    ) -> Self {
        Self {
            type_id,
            display_name,
            category,
            description,
            color: "#6b7280",
            params: Vec::new(),
            inputs: Vec::new(),
            outputs: Vec::new(),
            role: NodeRole::Layer,
            render,
        }
    }

    pub fn with_color(mut self, color: &'static str) -> Self {
        self.color = color;
        self
    }

    pub fn with_params(mut self, params: Vec<ParamSpec>) -> Self {
        self.params = params;
        self
    }

    pub fn with_inputs(mut self, inputs: Vec<PortSpec>) -> Self {
        self.inputs = inputs;
        self
    }

    pub fn with_outputs(mut self, outputs: Vec<PortSpec>) -> Self {
        self.outputs = outputs;
        self
    }

    pub fn with_role(mut self, role: NodeRole) -> Self {
        self.role = role;
        self
    }

    /// Overlay instance values onto declared defaults
    ///
    /// Every declared parameter appears in the result: the instance value if
    /// present, the default otherwise. Instance keys the type never declared
    /// are dropped.
    pub fn resolved_params(&self, instance: &ParamMap) -> ParamMap {
        let mut resolved = ParamMap::new();
        for spec in &self.params {
            match instance.get(spec.name) {
                Some(value) => resolved.insert(spec.name, value.clone()),
                None => resolved.insert(spec.name, spec.default.clone()),
            }
        }
        for name in instance.names() {
            if !self.params.iter().any(|spec| spec.name == name) {
                warn!(
                    "Node type '{}' declares no parameter '{}', dropping it",
                    self.type_id, name
                );
            }
        }
        resolved
    }

    /// Render this type's Python fragment for the given instance parameters
    ///
    /// Resolves defaults first, so the call is total for any parameter map.
    pub fn fragment(&self, instance: &ParamMap) -> String {
        (self.render)(&self.resolved_params(instance))
    }

    /// Declared default for a parameter name, if the type declares it
    pub fn default_for(&self, name: &str) -> Option<&ParamValue> {
        self.params
            .iter()
            .find(|spec| spec.name == name)
            .map(|spec| &spec.default)
    }
}

/// A type that contributes one definition to the catalog
pub trait CatalogNode {
    fn definition() -> NodeDefinition;
}

/// Lookup table of node definitions keyed by type identifier
///
/// Backed by a `BTreeMap` so listings and generated menus keep a stable
/// order across runs.
pub struct NodeCatalog {
    definitions: BTreeMap<&'static str, NodeDefinition>,
}

impl NodeCatalog {
    /// Creates an empty catalog
    pub fn new() -> Self {
        Self {
            definitions: BTreeMap::new(),
        }
    }

    /// The process-wide catalog holding every built-in node type
    pub fn builtin() -> &'static NodeCatalog {
        static BUILTIN: Lazy<NodeCatalog> = Lazy::new(NodeCatalog::default);
        &BUILTIN
    }

    /// Register a node type
    pub fn register<T: CatalogNode>(&mut self) {
        self.insert(T::definition());
    }

    /// Insert a definition directly (synthetic entries in tests)
    pub fn insert(&mut self, definition: NodeDefinition) {
        debug!("Registered node type: {}", definition.type_id);
        self.definitions.insert(definition.type_id, definition);
    }

    /// Look up a definition by type identifier
    pub fn get(&self, type_id: &str) -> Option<&NodeDefinition> {
        self.definitions.get(type_id)
    }

    /// Whether a type identifier is registered
    pub fn contains(&self, type_id: &str) -> bool {
        self.definitions.contains_key(type_id)
    }

    /// All definitions, in type identifier order
    pub fn all(&self) -> impl Iterator<Item = &NodeDefinition> {
        self.definitions.values()
    }

    /// Registered type identifiers, in order
    pub fn type_ids(&self) -> Vec<&'static str> {
        self.definitions.keys().copied().collect()
    }

    /// Distinct category names, sorted
    pub fn categories(&self) -> Vec<&'static str> {
        let mut categories: Vec<&'static str> =
            self.definitions.values().map(|def| def.category).collect();
        categories.sort_unstable();
        categories.dedup();
        categories
    }

    /// Definitions in one category, in type identifier order
    pub fn by_category(&self, category: &str) -> Vec<&NodeDefinition> {
        self.definitions
            .values()
            .filter(|def| def.category == category)
            .collect()
    }

    pub fn len(&self) -> usize {
        self.definitions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.definitions.is_empty()
    }
}

impl Default for NodeCatalog {
    fn default() -> Self {
        let mut catalog = Self::new();

        // Data processing nodes
        catalog.register::<crate::nodes::io::InputNode>();
        catalog.register::<crate::nodes::io::DataLoaderNode>();
        catalog.register::<crate::nodes::io::OutputNode>();

        // Layers
        catalog.register::<crate::nodes::layers::Conv2dNode>();
        catalog.register::<crate::nodes::layers::Conv3dNode>();
        catalog.register::<crate::nodes::layers::LinearNode>();
        catalog.register::<crate::nodes::layers::BatchNorm2dNode>();
        catalog.register::<crate::nodes::layers::MaxPool2dNode>();
        catalog.register::<crate::nodes::layers::AvgPool2dNode>();
        catalog.register::<crate::nodes::layers::DropoutNode>();
        catalog.register::<crate::nodes::layers::FlattenNode>();

        // Activations
        catalog.register::<crate::nodes::activations::ReluNode>();
        catalog.register::<crate::nodes::activations::LeakyReluNode>();
        catalog.register::<crate::nodes::activations::SigmoidNode>();
        catalog.register::<crate::nodes::activations::SoftmaxNode>();
        catalog.register::<crate::nodes::activations::TanhNode>();

        // Tensor operations
        catalog.register::<crate::nodes::ops::AddNode>();
        catalog.register::<crate::nodes::ops::ConcatNode>();
        catalog.register::<crate::nodes::ops::ReshapeNode>();

        catalog
    }
}
