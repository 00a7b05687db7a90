//! Error types reported during model construction.

use thiserror::Error;

/// Malformed or inconsistent input tables. Fatal: reported before any
/// search starts, never silently defaulted beyond the documented
/// first-depot fallback for vehicle terminals.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ConfigurationError {
    #[error("duplicate node identifier {0:?}")]
    DuplicateNode(String),

    #[error("arc references unknown node {0:?}")]
    UnknownArcEndpoint(String),

    #[error("arc {from:?} -> {to:?} has a negative time or distance")]
    NegativeArcCost { from: String, to: String },

    #[error("node {0:?} has negative demand")]
    NegativeDemand(String),

    #[error("node {0:?} has an inverted time window")]
    InvertedTimeWindow(String),

    #[error("vehicle {0:?} has negative capacity")]
    NegativeCapacity(String),

    #[error("vehicle {vehicle:?} references unknown node {node:?} and there is no depot to fall back to")]
    UnresolvedTerminal { vehicle: String, node: String },
}
