//! Undirected weighted edges.

use std::fmt::Debug;
use std::hash::{Hash, Hasher};

/// Requirements on node identifiers.
///
/// Nodes are opaque values; integers are the common case. Blanket
/// implemented for every type with the listed bounds.
pub trait NodeId: Copy + Eq + Hash + Ord + Debug + Send + Sync {}

impl<T> NodeId for T where T: Copy + Eq + Hash + Ord + Debug + Send + Sync {}

/// An undirected edge `(a, b, weight)`.
///
/// Endpoints are stored in the order they were given. Equality and
/// hashing only look at the unordered endpoint pair, so `(1, 2, w)` and
/// `(2, 1, w')` are the same edge regardless of weight.
///
/// # Examples
///
/// ```
/// use u_steiner::graph::Edge;
///
/// let e = Edge::new(3, 1, 2.5);
/// assert_eq!(e, Edge::new(1, 3, 2.5));
/// assert_eq!(e.key(), (1, 3));
/// assert_eq!(e.other(3), Some(1));
/// ```
#[derive(Debug, Clone, Copy)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Edge<N> {
    /// First endpoint.
    pub a: N,
    /// Second endpoint.
    pub b: N,
    /// Non-negative edge weight.
    pub weight: f64,
}

impl<N: NodeId> Edge<N> {
    pub fn new(a: N, b: N, weight: f64) -> Self {
        Self { a, b, weight }
    }

    /// The endpoint pair sorted ascending.
    pub fn key(&self) -> (N, N) {
        if self.a <= self.b {
            (self.a, self.b)
        } else {
            (self.b, self.a)
        }
    }

    /// Whether `node` is one of the endpoints.
    pub fn touches(&self, node: N) -> bool {
        self.a == node || self.b == node
    }

    /// The endpoint opposite to `node`, if `node` is an endpoint.
    pub fn other(&self, node: N) -> Option<N> {
        if self.a == node {
            Some(self.b)
        } else if self.b == node {
            Some(self.a)
        } else {
            None
        }
    }

    pub fn is_self_loop(&self) -> bool {
        self.a == self.b
    }
}

impl<N: NodeId> From<(N, N, f64)> for Edge<N> {
    fn from((a, b, weight): (N, N, f64)) -> Self {
        Self::new(a, b, weight)
    }
}

impl<N: NodeId> PartialEq for Edge<N> {
    fn eq(&self, other: &Self) -> bool {
        self.key() == other.key()
    }
}

impl<N: NodeId> Eq for Edge<N> {}

impl<N: NodeId> Hash for Edge<N> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.key().hash(state);
    }
}
