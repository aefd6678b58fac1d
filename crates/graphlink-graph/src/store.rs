//! The graph operations as a trait, so callers can be handed any backing store.

use async_trait::async_trait;

use crate::client::{GraphClient, GraphError};

/// The six social-graph operations.
///
/// [`GraphClient`] is the Neo4j implementation. Implementations are shared
/// across concurrent calls and must not hold per-call state.
#[async_trait]
pub trait GraphStore: Send + Sync + 'static {
    async fn create_user_node(&self, user_id: &str, name: &str) -> Result<(), GraphError>;

    async fn delete_user_node(&self, user_id: &str) -> Result<(), GraphError>;

    async fn connect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError>;

    async fn disconnect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError>;

    async fn get_connected_users(&self, user_id: &str) -> Result<Vec<String>, GraphError>;

    async fn check_connection_path(
        &self,
        user_id_1: &str,
        user_id_2: &str,
    ) -> Result<bool, GraphError>;
}

#[async_trait]
impl GraphStore for GraphClient {
    async fn create_user_node(&self, user_id: &str, name: &str) -> Result<(), GraphError> {
        GraphClient::create_user_node(self, user_id, name).await
    }

    async fn delete_user_node(&self, user_id: &str) -> Result<(), GraphError> {
        GraphClient::delete_user_node(self, user_id).await
    }

    async fn connect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError> {
        GraphClient::connect_users(self, user_id_1, user_id_2).await
    }

    async fn disconnect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError> {
        GraphClient::disconnect_users(self, user_id_1, user_id_2).await
    }

    async fn get_connected_users(&self, user_id: &str) -> Result<Vec<String>, GraphError> {
        GraphClient::get_connected_users(self, user_id).await
    }

    async fn check_connection_path(
        &self,
        user_id_1: &str,
        user_id_2: &str,
    ) -> Result<bool, GraphError> {
        GraphClient::check_connection_path(self, user_id_1, user_id_2).await
    }
}
