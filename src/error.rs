use thiserror::Error;

use crate::element_list::NodeIndex;
use crate::problem::SetId;

/// A set cover instance that could not be read or built.
#[derive(Debug, Error)]
pub enum InstanceError {
    #[error("failed to read instance: {0}")]
    Io(#[from] std::io::Error),
    #[error("instance has no `numElements numSets` header line")]
    MissingHeader,
    #[error("line {line}: cannot parse `{token}`")]
    InvalidToken { line: usize, token: String },
    #[error("set {set}: cost {cost} must be finite and non-negative")]
    InvalidCost { set: SetId, cost: f64 },
    #[error("set {set}: element {element} is outside the universe 0..{num_elements}")]
    ElementOutOfRange { set: SetId, element: usize, num_elements: usize },
    #[error("header announces {expected} sets but {found} were given")]
    SetCountMismatch { expected: usize, found: usize },
    #[error("a universe of {num_elements} elements does not fit in memory")]
    TooLarge { num_elements: usize },
    #[error("line {line}: {source}")]
    AtLine {
        line: usize,
        #[source]
        source: Box<InstanceError>,
    },
}

/// Terminal outcomes of the greedy engine other than a solution.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum SolveError {
    /// Every set was exhausted while some elements remained uncovered.
    #[error("instance is infeasible: {uncovered} elements belong to no remaining set")]
    Infeasible { uncovered: usize },
    #[error("element list of set {set} is corrupt at node {node}: {reason}")]
    InternalInconsistency { set: SetId, node: NodeIndex, reason: &'static str },
    #[error("solve cancelled after {picked} picks")]
    Cancelled { picked: usize },
}
