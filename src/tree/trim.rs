//! Pruning of dead-end relay edges.
//!
//! An edge is excess when one of its endpoints is a non-terminal leaf
//! (degree 1 in the tree). All excess edges are dropped in one pass,
//! degrees are recomputed, and the process repeats until no excess edge
//! remains. Every pass removes at least one edge, so the loop ends after
//! at most `tree.len()` passes.

use super::types::Tree;
use super::validate::is_connected;
use crate::graph::{NodeId, Terminals};

/// Returns the tree with all dead-end relay branches removed.
///
/// The result is a fixed point: `trim(&trim(t)) == trim(t)`.
///
/// For a connected input that touches at least two terminals, edges with
/// a terminal leaf are never excess, so trimming can neither disconnect
/// nor drop a terminal. An input touching a single terminal trims to the
/// empty tree. A disconnected input is trimmed component by component:
/// a component without two terminals of its own disappears, taking its
/// terminals with it.
pub fn trim<N: NodeId>(tree: &Tree<N>, terminals: &Terminals<N>) -> Tree<N> {
    let mut current = tree.clone();

    loop {
        let degrees = current.degrees();
        let is_dead_end = |node: N| degrees[&node] == 1 && !terminals.contains(node);

        let kept: Tree<N> = current
            .edges()
            .iter()
            .filter(|e| !(is_dead_end(e.a) || is_dead_end(e.b)))
            .copied()
            .collect();

        if kept.len() == current.len() {
            break;
        }
        current = kept;
    }

    debug_assert!(
        !is_connected(tree) || keeps_covered_terminals(tree, &current, terminals),
        "trim dropped a terminal"
    );
    current
}

/// Every terminal of `before` survives in `after`, unless `before` touched
/// at most one terminal and `after` is empty.
fn keeps_covered_terminals<N: NodeId>(
    before: &Tree<N>,
    after: &Tree<N>,
    terminals: &Terminals<N>,
) -> bool {
    let before = before.nodes();
    let covered: Vec<N> = terminals.iter().filter(|t| before.contains(t)).collect();
    if after.is_empty() {
        return covered.len() <= 1;
    }
    let after = after.nodes();
    covered.iter().all(|t| after.contains(t))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::graph::Edge;
    use proptest::prelude::*;

    fn terminals(nodes: &[u32]) -> Terminals<u32> {
        Terminals::new(nodes.iter().copied()).unwrap()
    }

    #[test]
    fn test_removes_relay_branch_to_fixed_point() {
        // 1 - 0 - 3 with a dangling relay chain 0 - 5 - 7 - 8
        let t = Tree::from_edges([
            (1u32, 0, 1.0),
            (0, 3, 1.0),
            (0, 5, 1.0),
            (5, 7, 1.0),
            (7, 8, 1.0),
        ]);
        let trimmed = trim(&t, &terminals(&[1, 3]));
        assert_eq!(trimmed.len(), 2);
        assert!(trimmed.contains(&Edge::new(1, 0, 0.0)));
        assert!(trimmed.contains(&Edge::new(0, 3, 0.0)));
    }

    #[test]
    fn test_keeps_terminal_leaf_edges() {
        let t = Tree::from_edges([(1u32, 2, 1.0)]);
        let trimmed = trim(&t, &terminals(&[1, 2]));
        assert_eq!(trimmed, t);
    }

    #[test]
    fn test_edge_with_terminal_and_relay_leaf_is_removed() {
        // The relay 9 is a dead end even though 1 is a terminal.
        let t = Tree::from_edges([(1u32, 2, 1.0), (1, 9, 1.0)]);
        let trimmed = trim(&t, &terminals(&[1, 2]));
        assert_eq!(trimmed, Tree::from_edges([(1u32, 2, 1.0)]));
    }

    #[test]
    fn test_single_terminal_trims_to_empty() {
        let t = Tree::from_edges([(4u32, 5, 1.0), (5, 6, 1.0)]);
        let trimmed = trim(&t, &terminals(&[4]));
        assert!(trimmed.is_empty());
    }

    #[test]
    fn test_connected_tree_touching_one_terminal_trims_to_empty() {
        // 2 is a terminal but not part of the tree
        let t = Tree::from_edges([(1u32, 5, 1.0), (5, 6, 1.0)]);
        let trimmed = trim(&t, &terminals(&[1, 2]));
        assert!(trimmed.is_empty());
    }

    #[test]
    fn test_components_are_trimmed_independently() {
        // each component holds a single terminal and vanishes
        let split = Tree::from_edges([(1u32, 5, 1.0), (2, 6, 1.0)]);
        assert!(trim(&split, &terminals(&[1, 2])).is_empty());

        // the component joining 3 and 4 survives, the one around 1 does not
        let partial = Tree::from_edges([(1u32, 5, 1.0), (3, 4, 1.0)]);
        let trimmed = trim(&partial, &terminals(&[1, 3, 4]));
        assert_eq!(trimmed, Tree::from_edges([(3u32, 4, 1.0)]));
        assert!(!trimmed.nodes().contains(&1));
    }

    #[test]
    fn test_covered_terminal_check() {
        let terms = terminals(&[1, 2]);
        let path = Tree::from_edges([(1u32, 9, 1.0), (9, 2, 1.0)]);
        assert!(keeps_covered_terminals(&path, &path, &terms));
        assert!(!keeps_covered_terminals(&path, &Tree::new(), &terms));
        assert!(!keeps_covered_terminals(
            &path,
            &Tree::from_edges([(1u32, 9, 1.0)]),
            &terms
        ));

        let lone = Tree::from_edges([(1u32, 9, 1.0)]);
        assert!(keeps_covered_terminals(&lone, &Tree::new(), &terms));
    }

    #[test]
    fn test_input_untouched() {
        let t = Tree::from_edges([(1u32, 2, 1.0), (2, 9, 1.0)]);
        let _ = trim(&t, &terminals(&[1, 2]));
        assert_eq!(t.len(), 2);
    }

    /// Random trees on nodes 0..n built by attaching node i to a random
    /// earlier node.
    fn arb_tree() -> impl Strategy<Value = (Tree<u32>, Vec<u32>)> {
        (2u32..25)
            .prop_flat_map(|n| {
                (
                    Just(n),
                    prop::collection::vec(any::<prop::sample::Index>(), (n - 1) as usize),
                    prop::collection::vec(any::<bool>(), n as usize),
                )
            })
            .prop_map(|(n, parents, is_terminal)| {
                let tree = Tree::from_edges(
                    (1..n).map(|i| (i, parents[(i - 1) as usize].index(i as usize) as u32, 1.0)),
                );
                let mut terms: Vec<u32> = (0..n).filter(|&i| is_terminal[i as usize]).collect();
                if terms.is_empty() {
                    terms.push(0);
                }
                (tree, terms)
            })
    }

    proptest! {
        #[test]
        fn prop_trim_is_idempotent((tree, terms) in arb_tree()) {
            let terminals = Terminals::new(terms).unwrap();
            let once = trim(&tree, &terminals);
            let twice = trim(&once, &terminals);
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_trim_keeps_every_terminal((tree, terms) in arb_tree()) {
            let terminals = Terminals::new(terms.clone()).unwrap();
            let trimmed = trim(&tree, &terminals);
            if terms.len() > 1 {
                let nodes = trimmed.nodes();
                for t in terms {
                    prop_assert!(nodes.contains(&t));
                }
            }
        }

        #[test]
        fn prop_trimmed_leaves_are_terminals((tree, terms) in arb_tree()) {
            let terminals = Terminals::new(terms).unwrap();
            let trimmed = trim(&tree, &terminals);
            for (node, degree) in trimmed.degrees() {
                if degree == 1 {
                    prop_assert!(terminals.contains(node));
                }
            }
        }
    }
}
