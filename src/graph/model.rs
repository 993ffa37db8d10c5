//! Immutable weighted graph.

use std::collections::{HashMap, HashSet, VecDeque};

use super::edge::{Edge, NodeId};
use crate::error::{Result, SteinerError};

/// An undirected weighted graph given as an edge list.
///
/// The node universe is the union of all edge endpoints. Edges are
/// indexed by their unordered endpoint pair so that lookups work for
/// either orientation. The graph never changes after construction.
#[derive(Debug, Clone)]
pub struct Graph<N: NodeId> {
    edges: Vec<Edge<N>>,
    index: HashMap<(N, N), usize>,
    incidence: HashMap<N, Vec<usize>>,
    nodes: Vec<N>,
}

impl<N: NodeId> Graph<N> {
    /// Builds a graph from `(a, b, weight)` triples or [`Edge`]s.
    ///
    /// # Errors
    ///
    /// - [`SteinerError::SelfLoop`] for an edge `(a, a, w)`.
    /// - [`SteinerError::InvalidWeight`] for negative or non-finite weights.
    /// - [`SteinerError::DuplicateEdge`] when an unordered pair repeats.
    pub fn new<I, E>(edges: I) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
    {
        let mut list = Vec::new();
        let mut index = HashMap::new();
        let mut incidence: HashMap<N, Vec<usize>> = HashMap::new();

        for edge in edges {
            let edge: Edge<N> = edge.into();
            if edge.is_self_loop() {
                return Err(SteinerError::SelfLoop {
                    node: format!("{:?}", edge.a),
                });
            }
            if !edge.weight.is_finite() || edge.weight < 0.0 {
                return Err(SteinerError::InvalidWeight {
                    a: format!("{:?}", edge.a),
                    b: format!("{:?}", edge.b),
                    weight: edge.weight,
                });
            }

            let id = list.len();
            if index.insert(edge.key(), id).is_some() {
                return Err(SteinerError::DuplicateEdge {
                    a: format!("{:?}", edge.a),
                    b: format!("{:?}", edge.b),
                });
            }
            incidence.entry(edge.a).or_default().push(id);
            incidence.entry(edge.b).or_default().push(id);
            list.push(edge);
        }

        let mut nodes: Vec<N> = incidence.keys().copied().collect();
        nodes.sort_unstable();

        Ok(Self {
            edges: list,
            index,
            incidence,
            nodes,
        })
    }

    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// All nodes, sorted ascending.
    pub fn nodes(&self) -> &[N] {
        &self.nodes
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn contains_node(&self, node: N) -> bool {
        self.incidence.contains_key(&node)
    }

    /// The edge joining `a` and `b`, in either orientation.
    pub fn edge_between(&self, a: N, b: N) -> Option<&Edge<N>> {
        let key = if a <= b { (a, b) } else { (b, a) };
        self.index.get(&key).map(|&id| &self.edges[id])
    }

    /// Edges incident to `node`.
    pub fn incident(&self, node: N) -> impl Iterator<Item = &Edge<N>> + '_ {
        self.incidence
            .get(&node)
            .into_iter()
            .flatten()
            .map(move |&id| &self.edges[id])
    }

    /// Nodes reachable from `start` (including `start` itself).
    pub fn reachable_from(&self, start: N) -> HashSet<N> {
        let mut seen = HashSet::new();
        seen.insert(start);
        let mut queue = VecDeque::from([start]);

        while let Some(node) = queue.pop_front() {
            for edge in self.incident(node) {
                if let Some(next) = edge.other(node) {
                    if seen.insert(next) {
                        queue.push_back(next);
                    }
                }
            }
        }
        seen
    }
}
