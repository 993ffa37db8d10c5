//! Neighbor moves on Steiner trees.
//!
//! Two inverse moves:
//!
//! - **Bridge insertion** replaces a tree edge `(a, b)` by the detour
//!   `a - x - b` through a node `x` the tree does not use yet.
//! - **Relay bypass** removes a non-terminal relay node `v` of degree
//!   `k >= 2` and reconnects its `k` former neighbours as a chain of
//!   direct edges.
//!
//! Both keep a valid tree valid: removing an edge or a node splits the
//! tree into components that the new edges join again without closing a
//! cycle. Neither touches its input.

use rand::seq::SliceRandom;
use rand::Rng;

use crate::error::{Result, SteinerError};
use crate::graph::{Edge, Graph, NodeId, Terminals};
use crate::tree::Tree;

/// Applies one random move: a relay bypass with probability
/// `bypass_probability`, a bridge insertion otherwise.
pub fn perturb<N: NodeId, R: Rng>(
    graph: &Graph<N>,
    terminals: &Terminals<N>,
    tree: &Tree<N>,
    bypass_probability: f64,
    rng: &mut R,
) -> Result<Tree<N>> {
    if bypass_probability > 0.0 && rng.random_bool(bypass_probability) {
        bypass_relay(graph, terminals, tree, rng)
    } else {
        insert_bridge(graph, tree, rng)
    }
}

/// Reroutes a random tree edge through a random unused node.
///
/// Returns an unchanged copy when the tree is empty or already uses every
/// graph node.
///
/// # Errors
///
/// [`SteinerError::MissingEdge`] if the graph lacks a direct edge from
/// either endpoint of the chosen edge to the chosen bridge node.
pub fn insert_bridge<N: NodeId, R: Rng>(
    graph: &Graph<N>,
    tree: &Tree<N>,
    rng: &mut R,
) -> Result<Tree<N>> {
    if tree.is_empty() {
        return Ok(tree.clone());
    }
    let victim = tree.edges()[rng.random_range(0..tree.len())];

    let used = tree.nodes();
    let unused: Vec<N> = graph
        .nodes()
        .iter()
        .copied()
        .filter(|n| !used.contains(n))
        .collect();
    if unused.is_empty() {
        return Ok(tree.clone());
    }
    let bridge = unused[rng.random_range(0..unused.len())];

    let first = direct_edge(graph, victim.a, bridge)?;
    let second = direct_edge(graph, victim.b, bridge)?;
    Ok(tree.without(&victim).with(first).with(second))
}

/// Removes a random non-terminal relay and chains its neighbours.
///
/// Returns an unchanged copy when the tree has no relay of degree two or
/// more.
///
/// # Errors
///
/// [`SteinerError::MissingEdge`] if two consecutive neighbours in the
/// chain are not directly connected in the graph.
pub fn bypass_relay<N: NodeId, R: Rng>(
    graph: &Graph<N>,
    terminals: &Terminals<N>,
    tree: &Tree<N>,
    rng: &mut R,
) -> Result<Tree<N>> {
    let mut relays: Vec<N> = tree
        .degrees()
        .into_iter()
        .filter(|&(node, degree)| degree >= 2 && !terminals.contains(node))
        .map(|(node, _)| node)
        .collect();
    if relays.is_empty() {
        return Ok(tree.clone());
    }
    // hash order is unstable; sort so seeded runs repeat
    relays.sort_unstable();
    let relay = relays[rng.random_range(0..relays.len())];

    let mut neighbours: Vec<N> = tree.edges().iter().filter_map(|e| e.other(relay)).collect();
    neighbours.shuffle(rng);

    let mut result: Tree<N> = tree
        .edges()
        .iter()
        .filter(|e| !e.touches(relay))
        .copied()
        .collect();
    for pair in neighbours.windows(2) {
        result.push(direct_edge(graph, pair[0], pair[1])?);
    }
    Ok(result)
}

fn direct_edge<N: NodeId>(graph: &Graph<N>, a: N, b: N) -> Result<Edge<N>> {
    graph
        .edge_between(a, b)
        .copied()
        .ok_or_else(|| SteinerError::MissingEdge {
            a: format!("{a:?}"),
            b: format!("{b:?}"),
        })
}
