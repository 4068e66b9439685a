//! Planner error types

use thiserror::Error;

/// Hard failures of the staged planner.
///
/// Unreachable stages, empty results and single-node stages are not errors:
/// they show up as infinite cost, an empty candidate list and a zero-cost tour.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlannerError {
    /// A referenced node id is not in the node table.
    #[error("unknown node '{0}'")]
    UnknownNode(String),
    /// The same node id appears twice in the node table.
    #[error("duplicate node '{0}'")]
    DuplicateNode(String),
    /// A geo-priced node has no coordinates.
    #[error("node '{0}' has no coordinates")]
    MissingLocation(String),
    /// The node table has no stage-0 node.
    #[error("node table has no origin (stage 0) node")]
    NoOrigin,
    /// `top_k` must be a positive integer.
    #[error("top_k must be greater than zero")]
    InvalidTopK,
    /// A tunable parameter is out of range.
    #[error("invalid parameter {name}: {reason}")]
    InvalidParameter { name: &'static str, reason: String },
    /// A hop on an already-chosen path could not be priced.
    #[error("no route from '{from}' to '{to}'")]
    NoRoute { from: String, to: String },
}

pub type PlannerResult<T> = Result<T, PlannerError>;
