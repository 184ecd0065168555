use thiserror::Error;

use crate::types::NodeId;

/// Errors raised while building a graph or computing its routing table.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum RoutingError {
    /// The graph handed in does not satisfy the graph contract.
    #[error("invalid graph: {0}")]
    InvalidGraph(String),

    /// No path exists from vertex `from` to vertex `to`.
    #[error("vertex {to} is unreachable from vertex {from}")]
    Unreachable {
        from: NodeId,
        to: NodeId,
    },
}
