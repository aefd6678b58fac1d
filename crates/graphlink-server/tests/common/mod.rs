//! In-memory stand-ins for the Neo4j-backed store.

#![allow(dead_code)]

use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use graphlink_core::Operation;
use graphlink_graph::{GraphError, GraphStore, MAX_PATH_HOPS};

/// Mirrors the Cypher semantics: CREATE is additive, connect/disconnect
/// against a missing user does nothing, edges are matched in either direction,
/// and a path never reuses an edge.
#[derive(Default)]
pub struct MemoryStore {
    inner: Mutex<MemoryGraph>,
}

#[derive(Default)]
struct MemoryGraph {
    users: Vec<(String, String)>,
    edges: Vec<(String, String)>,
}

impl MemoryGraph {
    fn exists(&self, user_id: &str) -> bool {
        self.users.iter().any(|(id, _)| id == user_id)
    }

    fn neighbours(&self, user_id: &str) -> Vec<String> {
        self.edges
            .iter()
            .filter_map(|(a, b)| {
                if a == user_id {
                    Some(b.clone())
                } else if b == user_id {
                    Some(a.clone())
                } else {
                    None
                }
            })
            .collect()
    }

    /// Depth-first walk that never traverses the same edge twice, matching
    /// Cypher's relationship uniqueness within one path.
    fn path_within(&self, from: &str, to: &str, hops_left: u32, used: &mut Vec<usize>) -> bool {
        if hops_left == 0 {
            return false;
        }
        for (i, (a, b)) in self.edges.iter().enumerate() {
            if used.contains(&i) {
                continue;
            }
            let next = if a == from {
                b
            } else if b == from {
                a
            } else {
                continue;
            };
            if next == to {
                return true;
            }
            used.push(i);
            if self.path_within(next, to, hops_left - 1, used) {
                return true;
            }
            used.pop();
        }
        false
    }
}

impl MemoryStore {
    pub fn edge_count(&self) -> usize {
        self.inner.lock().unwrap().edges.len()
    }

    pub fn user_count(&self) -> usize {
        self.inner.lock().unwrap().users.len()
    }
}

#[async_trait]
impl GraphStore for MemoryStore {
    async fn create_user_node(&self, user_id: &str, name: &str) -> Result<(), GraphError> {
        let mut g = self.inner.lock().unwrap();
        g.users.push((user_id.to_string(), name.to_string()));
        Ok(())
    }

    async fn delete_user_node(&self, user_id: &str) -> Result<(), GraphError> {
        let mut g = self.inner.lock().unwrap();
        g.users.retain(|(id, _)| id != user_id);
        g.edges.retain(|(a, b)| a != user_id && b != user_id);
        Ok(())
    }

    async fn connect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError> {
        let mut g = self.inner.lock().unwrap();
        if g.exists(user_id_1) && g.exists(user_id_2) {
            g.edges.push((user_id_1.to_string(), user_id_2.to_string()));
        }
        Ok(())
    }

    async fn disconnect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError> {
        let mut g = self.inner.lock().unwrap();
        g.edges.retain(|(a, b)| {
            !((a == user_id_1 && b == user_id_2) || (a == user_id_2 && b == user_id_1))
        });
        Ok(())
    }

    async fn get_connected_users(&self, user_id: &str) -> Result<Vec<String>, GraphError> {
        Ok(self.inner.lock().unwrap().neighbours(user_id))
    }

    async fn check_connection_path(
        &self,
        user_id_1: &str,
        user_id_2: &str,
    ) -> Result<bool, GraphError> {
        let g = self.inner.lock().unwrap();
        if !g.exists(user_id_1) || !g.exists(user_id_2) {
            return Ok(false);
        }
        Ok(g.path_within(user_id_1, user_id_2, MAX_PATH_HOPS, &mut Vec::new()))
    }
}

/// Which failure a [`FailingStore`] produces.
#[derive(Clone, Copy)]
pub enum Failure {
    Query,
    Session,
    Timeout,
}

/// Fails every call with a detailed internal error.
pub struct FailingStore {
    pub failure: Failure,
}

pub const LEAKY_DETAIL: &str = "Neo.ClientError.Security.Unauthorized for neo4j@10.0.0.7";

impl FailingStore {
    fn fail<T>(&self, operation: Operation, context: &str) -> Result<T, GraphError> {
        let context = context.to_string();
        Err(match self.failure {
            Failure::Query => GraphError::Query {
                operation,
                context,
                source: neo4rs::Error::AuthenticationError(LEAKY_DETAIL.to_string()),
            },
            Failure::Session => GraphError::Session {
                operation,
                context,
                source: neo4rs::Error::ConnectionError,
            },
            Failure::Timeout => GraphError::Timeout {
                operation,
                context,
                limit: Duration::from_secs(1),
            },
        })
    }
}

#[async_trait]
impl GraphStore for FailingStore {
    async fn create_user_node(&self, user_id: &str, _name: &str) -> Result<(), GraphError> {
        self.fail(Operation::CreateUserNode, user_id)
    }

    async fn delete_user_node(&self, user_id: &str) -> Result<(), GraphError> {
        self.fail(Operation::DeleteUserNode, user_id)
    }

    async fn connect_users(&self, user_id_1: &str, _user_id_2: &str) -> Result<(), GraphError> {
        self.fail(Operation::ConnectUsers, user_id_1)
    }

    async fn disconnect_users(&self, user_id_1: &str, _user_id_2: &str) -> Result<(), GraphError> {
        self.fail(Operation::DisconnectUsers, user_id_1)
    }

    async fn get_connected_users(&self, user_id: &str) -> Result<Vec<String>, GraphError> {
        self.fail(Operation::GetConnectedUsers, user_id)
    }

    async fn check_connection_path(
        &self,
        user_id_1: &str,
        _user_id_2: &str,
    ) -> Result<bool, GraphError> {
        self.fail(Operation::CheckConnectionPath, user_id_1)
    }
}
