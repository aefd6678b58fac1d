//! Translation from adapter errors to the statuses remote callers see.
//!
//! Callers get one of three codes and a message naming only the operation.
//! The underlying cause stays in the server log.

use graphlink_core::Operation;
use graphlink_graph::GraphError;
use tonic::{Code, Status};

/// The external code for an adapter error.
pub fn code_for(err: &GraphError) -> Code {
    match err {
        GraphError::Connection(_) | GraphError::Session { .. } => Code::Unavailable,
        GraphError::Timeout { .. } => Code::DeadlineExceeded,
        GraphError::Query { .. } | GraphError::UnexpectedResult { .. } => Code::Internal,
    }
}

/// Opaque status for a failed operation.
pub fn to_status(operation: Operation, err: &GraphError) -> Status {
    Status::new(code_for(err), operation.failure_message())
}
