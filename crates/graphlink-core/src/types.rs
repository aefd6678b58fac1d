//! Vocabulary shared by the graph adapter and the gRPC façade.

use std::fmt;

/// The six graph operations GraphLink exposes.
///
/// Every adapter error and every external status is tagged with one of these,
/// so log lines and client-facing messages stay low-cardinality.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    CreateUserNode,
    DeleteUserNode,
    ConnectUsers,
    DisconnectUsers,
    GetConnectedUsers,
    CheckConnectionPath,
}

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::CreateUserNode,
        Operation::DeleteUserNode,
        Operation::ConnectUsers,
        Operation::DisconnectUsers,
        Operation::GetConnectedUsers,
        Operation::CheckConnectionPath,
    ];

    /// The RPC method name, as declared in `graph.proto`.
    pub fn rpc_name(&self) -> &'static str {
        match self {
            Self::CreateUserNode => "CreateUserNode",
            Self::DeleteUserNode => "DeleteUserNode",
            Self::ConnectUsers => "ConnectUsers",
            Self::DisconnectUsers => "DisconnectUsers",
            Self::GetConnectedUsers => "GetConnectedUsers",
            Self::CheckConnectionPath => "CheckConnectionPath",
        }
    }

    /// Lower-case verb phrase, e.g. "create user node".
    pub fn description(&self) -> &'static str {
        match self {
            Self::CreateUserNode => "create user node",
            Self::DeleteUserNode => "delete user node",
            Self::ConnectUsers => "connect users",
            Self::DisconnectUsers => "disconnect users",
            Self::GetConnectedUsers => "get connected users",
            Self::CheckConnectionPath => "check connection path",
        }
    }

    /// The only message a remote caller ever sees when this operation fails.
    pub fn failure_message(&self) -> String {
        format!("failed to {}", self.description())
    }

    /// Whether the operation mutates the graph (runs in a write transaction).
    pub fn is_write(&self) -> bool {
        matches!(
            self,
            Self::CreateUserNode | Self::DeleteUserNode | Self::ConnectUsers | Self::DisconnectUsers
        )
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.rpc_name())
    }
}
