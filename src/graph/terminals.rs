//! The fixed terminal set.

use std::collections::HashSet;

use super::edge::NodeId;
use crate::error::{Result, SteinerError};

/// Nodes that every solution tree must connect.
///
/// Keeps the caller's order, since the first terminal seeds tree growth,
/// and a hash set for membership tests. Repeated terminals are collapsed.
#[derive(Debug, Clone)]
pub struct Terminals<N: NodeId> {
    order: Vec<N>,
    set: HashSet<N>,
}

impl<N: NodeId> Terminals<N> {
    /// # Errors
    ///
    /// [`SteinerError::EmptyTerminals`] when `nodes` yields nothing.
    pub fn new(nodes: impl IntoIterator<Item = N>) -> Result<Self> {
        let mut order = Vec::new();
        let mut set = HashSet::new();
        for node in nodes {
            if set.insert(node) {
                order.push(node);
            }
        }
        if order.is_empty() {
            return Err(SteinerError::EmptyTerminals);
        }
        Ok(Self { order, set })
    }

    /// The terminal tree growth starts from.
    pub fn seed(&self) -> N {
        self.order[0]
    }

    pub fn contains(&self, node: N) -> bool {
        self.set.contains(&node)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Always false; construction rejects empty sets.
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = N> + '_ {
        self.order.iter().copied()
    }

    pub fn as_slice(&self) -> &[N] {
        &self.order
    }
}
