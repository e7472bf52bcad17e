//! Deterministic topological ordering of graph nodes
//!
//! Kahn's algorithm with one normative refinement: whenever several nodes are
//! eligible at the same time, the one appearing earliest in the input slice
//! is emitted first. The ready set is therefore a min-heap over input
//! indices rather than a plain queue.

use super::error::CycleError;
use crate::graph::{Edge, NodeInstance};
use log::warn;
use std::cmp::Reverse;
use std::collections::{BinaryHeap, HashMap};

/// Orders nodes so every edge points forward in the result
///
/// Edges whose endpoints are not in `nodes` are ignored. On success the
/// result holds every input node exactly once; if any dependency cycle
/// exists, the error names all nodes left unresolved, in input order.
pub fn topological_order<'a>(
    nodes: &'a [NodeInstance],
    edges: &[Edge],
) -> Result<Vec<&'a NodeInstance>, CycleError> {
    if nodes.is_empty() {
        return Ok(Vec::new());
    }

    // First occurrence wins if an id repeats; the container never produces
    // duplicates, raw snapshot slices might.
    let mut index_of: HashMap<&str, usize> = HashMap::with_capacity(nodes.len());
    for (index, node) in nodes.iter().enumerate() {
        index_of.entry(node.id.as_str()).or_insert(index);
    }

    let mut in_degree = vec![0usize; nodes.len()];
    let mut successors: Vec<Vec<usize>> = vec![Vec::new(); nodes.len()];
    for edge in edges {
        let source = match index_of.get(edge.source.as_str()) {
            Some(&index) => index,
            None => {
                warn!(
                    "Ignoring edge '{}': source node '{}' not in graph",
                    edge.id, edge.source
                );
                continue;
            }
        };
        let target = match index_of.get(edge.target.as_str()) {
            Some(&index) => index,
            None => {
                warn!(
                    "Ignoring edge '{}': target node '{}' not in graph",
                    edge.id, edge.target
                );
                continue;
            }
        };
        in_degree[target] += 1;
        successors[source].push(target);
    }

    let mut ready: BinaryHeap<Reverse<usize>> = BinaryHeap::new();
    for (index, &degree) in in_degree.iter().enumerate() {
        if degree == 0 {
            ready.push(Reverse(index));
        }
    }

    let mut ordered: Vec<&NodeInstance> = Vec::with_capacity(nodes.len());
    while let Some(Reverse(index)) = ready.pop() {
        ordered.push(&nodes[index]);
        for &next in &successors[index] {
            in_degree[next] -= 1;
            if in_degree[next] == 0 {
                ready.push(Reverse(next));
            }
        }
    }

    if ordered.len() < nodes.len() {
        let unresolved = nodes
            .iter()
            .enumerate()
            .filter(|(index, _)| in_degree[*index] > 0)
            .map(|(_, node)| node.id.clone())
            .collect();
        return Err(CycleError { nodes: unresolved });
    }

    Ok(ordered)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn node(id: &str) -> NodeInstance {
        NodeInstance::new(id, "relu")
    }

    fn ids(ordered: &[&NodeInstance]) -> Vec<String> {
        ordered.iter().map(|n| n.id.clone()).collect()
    }

    #[test]
    fn test_empty_input() {
        let ordered = topological_order(&[], &[]).unwrap();
        assert!(ordered.is_empty());
    }

    #[test]
    fn test_chain_keeps_dependency_order() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "c")];
        let ordered = topological_order(&nodes, &edges).unwrap();
        assert_eq!(ids(&ordered), vec!["a", "b", "c"]);
    }

    #[test]
    fn test_no_edges_preserves_input_order() {
        let nodes = vec![node("z"), node("m"), node("a")];
        let ordered = topological_order(&nodes, &[]).unwrap();
        assert_eq!(ids(&ordered), vec!["z", "m", "a"]);
    }

    #[test]
    fn test_tie_break_prefers_earliest_input_position() {
        // After b is emitted, both a and c are eligible; a comes first in
        // the input slice and must win even though c became eligible sooner.
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![Edge::new("e1", "b", "a")];
        let ordered = topological_order(&nodes, &edges).unwrap();
        assert_eq!(ids(&ordered), vec!["b", "a", "c"]);
    }

    #[test]
    fn test_diamond_tie_break_follows_input_order() {
        let nodes = vec![node("a"), node("b"), node("c"), node("d")];
        let edges = vec![
            Edge::new("e1", "a", "b"),
            Edge::new("e2", "a", "c"),
            Edge::new("e3", "b", "d"),
            Edge::new("e4", "c", "d"),
        ];
        let ordered = topological_order(&nodes, &edges).unwrap();
        assert_eq!(ids(&ordered), vec!["a", "b", "c", "d"]);

        let swapped = vec![node("a"), node("c"), node("b"), node("d")];
        let ordered = topological_order(&swapped, &edges).unwrap();
        assert_eq!(ids(&ordered), vec!["a", "c", "b", "d"]);
    }

    #[test]
    fn test_cycle_reports_unresolved_nodes() {
        let nodes = vec![node("a"), node("b"), node("c")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "b", "a")];
        let err = topological_order(&nodes, &edges).unwrap_err();
        assert_eq!(err.nodes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_self_loop_is_a_cycle() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![Edge::new("e1", "a", "a"), Edge::new("e2", "a", "b")];
        let err = topological_order(&nodes, &edges).unwrap_err();
        assert_eq!(err.nodes, vec!["a".to_string(), "b".to_string()]);
    }

    #[test]
    fn test_unknown_endpoint_edges_are_ignored() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![
            Edge::new("e1", "a", "b"),
            Edge::new("e2", "ghost", "b"),
            Edge::new("e3", "a", "phantom"),
        ];
        let ordered = topological_order(&nodes, &edges).unwrap();
        assert_eq!(ids(&ordered), vec!["a", "b"]);
    }

    #[test]
    fn test_parallel_edges_resolve() {
        let nodes = vec![node("a"), node("b")];
        let edges = vec![Edge::new("e1", "a", "b"), Edge::new("e2", "a", "b")];
        let ordered = topological_order(&nodes, &edges).unwrap();
        assert_eq!(ids(&ordered), vec!["a", "b"]);
    }
}
