//! Randomized initial tree construction.

use std::collections::HashSet;

use rand::Rng;

use crate::error::{Result, SteinerError};
use crate::graph::{Edge, Graph, NodeId, Terminals};
use crate::tree::{has_cycle, trim, Tree};

/// Grows a random tree from the seed terminal until it reaches every
/// terminal, then trims it.
///
/// Each round draws a uniformly random graph edge touching an already
/// reached node. An edge that would close a cycle is dropped again and
/// the round is retried; otherwise both endpoints become reached.
///
/// # Errors
///
/// [`SteinerError::BuildExhausted`] when no edge leads out of the reached
/// set while terminals are still missing (the graph does not connect
/// them).
pub fn build_initial_tree<N: NodeId, R: Rng>(
    graph: &Graph<N>,
    terminals: &Terminals<N>,
    rng: &mut R,
) -> Result<Tree<N>> {
    let mut reached: HashSet<N> = HashSet::from([terminals.seed()]);
    let mut tree = Tree::new();

    loop {
        let missing = terminals.iter().filter(|t| !reached.contains(t)).count();
        if missing == 0 {
            break;
        }

        let candidates: Vec<&Edge<N>> = graph
            .edges()
            .iter()
            .filter(|e| reached.contains(&e.a) || reached.contains(&e.b))
            .collect();
        let can_grow = candidates
            .iter()
            .any(|e| !(reached.contains(&e.a) && reached.contains(&e.b)));
        if !can_grow {
            return Err(SteinerError::BuildExhausted { missing });
        }

        let edge = *candidates[rng.random_range(0..candidates.len())];
        tree.push(edge);
        if has_cycle(tree.edges()) {
            tree.pop();
            continue;
        }
        reached.insert(edge.a);
        reached.insert(edge.b);
    }

    Ok(trim(&tree, terminals))
}
