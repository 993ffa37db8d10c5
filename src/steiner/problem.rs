//! The Steiner tree problem as a local search problem.

use rand::Rng;

use super::builder::build_initial_tree;
use super::neighbor::perturb;
use crate::error::{Result, SteinerError};
use crate::graph::{Edge, Graph, NodeId, Terminals};
use crate::search::LocalSearchProblem;
use crate::tree::{has_cycle, has_unused_terminals, is_valid, trim, Tree};

/// A weighted graph with a fixed set of terminals to connect.
///
/// Construction checks the preconditions the search relies on, so a
/// successfully built problem always admits a valid tree.
///
/// # Examples
///
/// ```
/// use u_steiner::steiner::SteinerProblem;
///
/// let problem = SteinerProblem::new([(0, 1, 1.0), (1, 2, 1.0)], [0, 2]).unwrap();
/// assert_eq!(problem.terminals().len(), 2);
/// assert!(SteinerProblem::new([(0, 1, 1.0), (5, 6, 1.0)], [0, 6]).is_err());
/// ```
#[derive(Debug, Clone)]
pub struct SteinerProblem<N: NodeId> {
    graph: Graph<N>,
    terminals: Terminals<N>,
    bypass_probability: f64,
}

impl<N: NodeId> SteinerProblem<N> {
    /// Builds a problem from `(a, b, weight)` edges and terminal nodes.
    ///
    /// # Errors
    ///
    /// - Graph errors: self-loops, invalid weights, duplicate edges.
    /// - [`SteinerError::EmptyTerminals`] for an empty terminal list.
    /// - [`SteinerError::UnknownTerminal`] for a terminal outside the graph
    ///   (a lone terminal in an edgeless graph is allowed).
    /// - [`SteinerError::UnreachableTerminal`] if the graph does not
    ///   connect the terminals.
    pub fn new<I, E, T>(edges: I, terminals: T) -> Result<Self>
    where
        I: IntoIterator<Item = E>,
        E: Into<Edge<N>>,
        T: IntoIterator<Item = N>,
    {
        let graph = Graph::new(edges)?;
        let terminals = Terminals::new(terminals)?;

        if terminals.len() > 1 || graph.edge_count() > 0 {
            if let Some(node) = terminals.iter().find(|&t| !graph.contains_node(t)) {
                return Err(SteinerError::UnknownTerminal {
                    node: format!("{node:?}"),
                });
            }
            let seed = terminals.seed();
            let reachable = graph.reachable_from(seed);
            if let Some(node) = terminals.iter().find(|t| !reachable.contains(t)) {
                return Err(SteinerError::UnreachableTerminal {
                    node: format!("{node:?}"),
                    seed: format!("{seed:?}"),
                });
            }
        }

        Ok(Self {
            graph,
            terminals,
            bypass_probability: 0.5,
        })
    }

    /// Sets how often a neighbor draw tries a relay bypass instead of a
    /// bridge insertion.
    ///
    /// # Errors
    ///
    /// [`SteinerError::InvalidConfig`] unless `p` lies in `[0, 1]`.
    pub fn with_bypass_probability(mut self, p: f64) -> Result<Self> {
        if !(0.0..=1.0).contains(&p) {
            return Err(SteinerError::InvalidConfig(format!(
                "bypass_probability must be in [0, 1], got {p}"
            )));
        }
        self.bypass_probability = p;
        Ok(self)
    }

    pub fn graph(&self) -> &Graph<N> {
        &self.graph
    }

    pub fn terminals(&self) -> &Terminals<N> {
        &self.terminals
    }

    pub fn bypass_probability(&self) -> f64 {
        self.bypass_probability
    }

    pub fn has_cycle(&self, tree: &Tree<N>) -> bool {
        has_cycle(tree.edges())
    }

    pub fn has_unused_terminals(&self, tree: &Tree<N>) -> bool {
        has_unused_terminals(tree, &self.terminals)
    }

    /// Acyclic and covering every terminal.
    pub fn is_valid(&self, tree: &Tree<N>) -> bool {
        is_valid(tree, &self.terminals)
    }

    pub fn build_initial_tree<R: Rng>(&self, rng: &mut R) -> Result<Tree<N>> {
        build_initial_tree(&self.graph, &self.terminals, rng)
    }

    pub fn trim(&self, tree: &Tree<N>) -> Tree<N> {
        trim(tree, &self.terminals)
    }

    /// One random move, untrimmed.
    pub fn perturb<R: Rng>(&self, tree: &Tree<N>, rng: &mut R) -> Result<Tree<N>> {
        perturb(
            &self.graph,
            &self.terminals,
            tree,
            self.bypass_probability,
            rng,
        )
    }

    pub fn fitness(&self, tree: &Tree<N>) -> f64 {
        tree.fitness()
    }
}

impl<N: NodeId> LocalSearchProblem for SteinerProblem<N> {
    type Solution = Tree<N>;

    fn initial_solution<R: Rng>(&self, rng: &mut R) -> Result<Tree<N>> {
        self.build_initial_tree(rng)
    }

    fn cost(&self, tree: &Tree<N>) -> f64 {
        self.fitness(tree)
    }

    fn neighbor<R: Rng>(&self, tree: &Tree<N>, rng: &mut R) -> Result<Tree<N>> {
        let candidate = self.perturb(tree, rng)?;
        Ok(self.trim(&candidate))
    }
}
