//! Tree validity predicates.

use std::collections::{HashMap, HashSet, VecDeque};

use super::types::Tree;
use crate::graph::{Edge, NodeId, Terminals};

/// Whether the edges, read as an undirected multigraph, contain a cycle.
///
/// Each connected component is traversed breadth-first; a component with
/// `n` nodes is acyclic exactly when it carries `n - 1` edges. Parallel
/// copies of the same edge therefore count as a cycle. The empty edge
/// list is never cyclic.
pub fn has_cycle<N: NodeId>(edges: &[Edge<N>]) -> bool {
    let mut adjacency: HashMap<N, Vec<N>> = HashMap::new();
    for edge in edges {
        adjacency.entry(edge.a).or_default().push(edge.b);
        adjacency.entry(edge.b).or_default().push(edge.a);
    }

    let mut visited: HashSet<N> = HashSet::with_capacity(adjacency.len());
    for &start in adjacency.keys() {
        if visited.contains(&start) {
            continue;
        }

        let mut node_count = 0usize;
        let mut degree_sum = 0usize;
        let mut queue = VecDeque::from([start]);
        visited.insert(start);

        while let Some(node) = queue.pop_front() {
            node_count += 1;
            let neighbours = &adjacency[&node];
            degree_sum += neighbours.len();
            for &next in neighbours {
                if visited.insert(next) {
                    queue.push_back(next);
                }
            }
        }

        if degree_sum / 2 >= node_count {
            return true;
        }
    }
    false
}

/// Whether some terminal is missing from the tree's endpoints.
///
/// The empty tree covers a lone terminal: with a single terminal there
/// is nothing to connect.
pub fn has_unused_terminals<N: NodeId>(tree: &Tree<N>, terminals: &Terminals<N>) -> bool {
    if tree.is_empty() {
        return terminals.len() > 1;
    }
    let used = tree.nodes();
    terminals.iter().any(|t| !used.contains(&t))
}

/// A tree is valid when it is acyclic and covers every terminal.
pub fn is_valid<N: NodeId>(tree: &Tree<N>, terminals: &Terminals<N>) -> bool {
    !has_cycle(tree.edges()) && !has_unused_terminals(tree, terminals)
}

/// Whether all tree edges form a single connected component.
pub fn is_connected<N: NodeId>(tree: &Tree<N>) -> bool {
    let Some(first) = tree.edges().first() else {
        return true;
    };
    let nodes = tree.nodes();

    let mut seen = HashSet::from([first.a]);
    let mut queue = VecDeque::from([first.a]);
    while let Some(node) = queue.pop_front() {
        for next in tree.edges().iter().filter_map(|e| e.other(node)) {
            if seen.insert(next) {
                queue.push_back(next);
            }
        }
    }
    seen.len() == nodes.len()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn terminals(nodes: &[u32]) -> Terminals<u32> {
        Terminals::new(nodes.iter().copied()).unwrap()
    }

    #[test]
    fn test_empty_tree_has_no_cycle() {
        assert!(!has_cycle::<u32>(&[]));
    }

    #[test]
    fn test_path_is_acyclic_until_closed() {
        // n nodes, n-1 edges
        let path = Tree::from_edges([(0u32, 1, 1.0), (1, 2, 1.0), (2, 3, 1.0)]);
        assert!(!has_cycle(path.edges()));

        let closed = path.with(Edge::new(3, 0, 1.0));
        assert!(has_cycle(closed.edges()));
    }

    #[test]
    fn test_duplicate_edge_is_a_cycle() {
        let t = Tree::from_edges([(4u32, 7, 1.0), (7, 4, 1.0)]);
        assert!(has_cycle(t.edges()));
    }

    #[test]
    fn test_cycle_outside_first_component_detected() {
        let t = Tree::from_edges([
            (0u32, 1, 1.0),
            (5, 6, 1.0),
            (6, 7, 1.0),
            (7, 5, 1.0),
        ]);
        assert!(has_cycle(t.edges()));
    }

    #[test]
    fn test_unused_terminals() {
        let t = Tree::from_edges([(1u32, 2, 1.0), (2, 3, 1.0)]);
        assert!(!has_unused_terminals(&t, &terminals(&[1, 3])));
        assert!(has_unused_terminals(&t, &terminals(&[1, 4])));
    }

    #[test]
    fn test_empty_tree_covers_single_terminal_only() {
        let empty = Tree::<u32>::new();
        assert!(!has_unused_terminals(&empty, &terminals(&[3])));
        assert!(has_unused_terminals(&empty, &terminals(&[3, 4])));
    }

    #[test]
    fn test_is_valid() {
        let t = Tree::from_edges([(1u32, 0, 1.0), (0, 3, 1.0), (0, 6, 1.0)]);
        assert!(is_valid(&t, &terminals(&[1, 3, 6])));
        assert!(!is_valid(&t, &terminals(&[1, 9])));
        let cyclic = t.with(Edge::new(1, 3, 1.0));
        assert!(!is_valid(&cyclic, &terminals(&[1, 3, 6])));
    }

    #[test]
    fn test_is_connected() {
        assert!(is_connected(&Tree::<u32>::new()));
        assert!(is_connected(&Tree::from_edges([(0u32, 1, 1.0), (1, 2, 1.0)])));
        assert!(!is_connected(&Tree::from_edges([(0u32, 1, 1.0), (2, 3, 1.0)])));
    }
}
