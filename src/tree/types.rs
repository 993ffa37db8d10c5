//! Candidate solution trees and their fitness.

use std::collections::{HashMap, HashSet};

use crate::graph::{Edge, NodeId};

/// A candidate Steiner tree: a sequence of graph edges.
///
/// Trees are values. Every transformation (trimming, perturbation)
/// returns a new `Tree` and leaves its input untouched, so the accepted
/// best tree can never be corrupted by an exploratory move.
///
/// # Examples
///
/// ```
/// use u_steiner::tree::Tree;
///
/// let t = Tree::from_edges([(1, 2, 1.5), (2, 3, 2.0)]);
/// assert_eq!(t.len(), 2);
/// assert_eq!(t.fitness(), 3.5);
/// assert_eq!(t.degrees()[&2], 2);
/// ```
#[derive(Debug, Clone, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(transparent))]
pub struct Tree<N: NodeId> {
    edges: Vec<Edge<N>>,
}

impl<N: NodeId> Tree<N> {
    /// An empty tree.
    pub fn new() -> Self {
        Self { edges: Vec::new() }
    }

    pub fn from_edges<I, E>(edges: I) -> Self
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
    {
        Self {
            edges: edges.into_iter().map(Into::into).collect(),
        }
    }

    pub fn edges(&self) -> &[Edge<N>] {
        &self.edges
    }

    pub fn into_edges(self) -> Vec<Edge<N>> {
        self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    /// Whether the tree holds `edge` (orientation-insensitive).
    pub fn contains(&self, edge: &Edge<N>) -> bool {
        self.edges.contains(edge)
    }

    /// Nodes touched by at least one edge.
    pub fn nodes(&self) -> HashSet<N> {
        self.edges.iter().flat_map(|e| [e.a, e.b]).collect()
    }

    /// Number of tree edges incident to each node.
    pub fn degrees(&self) -> HashMap<N, usize> {
        let mut degrees = HashMap::new();
        for edge in &self.edges {
            *degrees.entry(edge.a).or_insert(0) += 1;
            *degrees.entry(edge.b).or_insert(0) += 1;
        }
        degrees
    }

    /// A copy of this tree with every occurrence of `edge` removed.
    pub fn without(&self, edge: &Edge<N>) -> Self {
        Self {
            edges: self.edges.iter().filter(|e| *e != edge).copied().collect(),
        }
    }

    /// A copy of this tree with `edge` appended.
    pub fn with(&self, edge: Edge<N>) -> Self {
        let mut edges = self.edges.clone();
        edges.push(edge);
        Self { edges }
    }

    /// Total edge weight. See [`fitness`].
    pub fn fitness(&self) -> f64 {
        fitness(&self.edges)
    }

    pub(crate) fn push(&mut self, edge: Edge<N>) {
        self.edges.push(edge);
    }

    pub(crate) fn pop(&mut self) -> Option<Edge<N>> {
        self.edges.pop()
    }
}

impl<N: NodeId> Default for Tree<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<N: NodeId> FromIterator<Edge<N>> for Tree<N> {
    fn from_iter<I: IntoIterator<Item = Edge<N>>>(iter: I) -> Self {
        Self {
            edges: iter.into_iter().collect(),
        }
    }
}

/// Sum of edge weights. Lower is better; the empty tree scores 0.
pub fn fitness<N>(edges: &[Edge<N>]) -> f64 {
    edges.iter().map(|e| e.weight).sum()
}
