//! Error type shared by every fallible Steiner operation.

use thiserror::Error;

/// Errors raised while building a problem or searching it.
///
/// Node identifiers are rendered with their `Debug` form so the error
/// type stays independent of the node type.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum SteinerError {
    /// The terminal set is empty.
    #[error("terminal set must not be empty")]
    EmptyTerminals,

    /// An edge connects a node to itself.
    #[error("self-loop edge on node {node}")]
    SelfLoop { node: String },

    /// An edge weight is negative, NaN or infinite.
    #[error("invalid weight {weight} on edge ({a}, {b})")]
    InvalidWeight { a: String, b: String, weight: f64 },

    /// The same unordered endpoint pair appears twice.
    #[error("duplicate edge ({a}, {b})")]
    DuplicateEdge { a: String, b: String },

    /// A terminal is not a node of the graph.
    #[error("terminal {node} is not a node of the graph")]
    UnknownTerminal { node: String },

    /// A terminal cannot be reached from the seed terminal.
    #[error("terminal {node} is unreachable from seed terminal {seed}")]
    UnreachableTerminal { node: String, seed: String },

    /// Tree growth ran out of edges before covering every terminal.
    #[error("initial tree construction exhausted with {missing} terminal(s) uncovered")]
    BuildExhausted { missing: usize },

    /// A perturbation needed a direct edge that the graph does not have.
    #[error("no edge between {a} and {b}")]
    MissingEdge { a: String, b: String },

    /// The search configuration failed validation.
    #[error("invalid search config: {0}")]
    InvalidConfig(String),

    /// An internal invariant broke. Always a bug, never an input problem.
    ///
    /// Raised in place of a panic where the search would otherwise unwrap
    /// a state that correct code always fills; the message names that state.
    #[error("invariant violated: {0}")]
    InvariantViolation(&'static str),
}

/// Result alias for Steiner operations.
pub type Result<T> = std::result::Result<T, SteinerError>;
