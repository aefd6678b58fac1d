//! Write operations for the social graph.
//!
//! Users are `:User {userId, name}` nodes and connections are directed
//! `CONNECTED_TO` relationships. Writes use plain CREATE, not MERGE:
//! repeating a create or connect adds another node or edge.

use graphlink_core::Operation;
use neo4rs::query;

use crate::client::{pair_context, user_context, GraphClient, GraphError};

impl GraphClient {
    /// Create one `User` node.
    pub async fn create_user_node(&self, user_id: &str, name: &str) -> Result<(), GraphError> {
        let q = query("CREATE (:User {userId: $userId, name: $name})")
            .param("userId", user_id.to_string())
            .param("name", name.to_string());

        self.run_write(Operation::CreateUserNode, &user_context(user_id), q)
            .await?;
        tracing::info!(user_id = %user_id, "User node created");
        Ok(())
    }

    /// Delete a `User` node together with every relationship touching it.
    pub async fn delete_user_node(&self, user_id: &str) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u:User {userId: $userId})
             DETACH DELETE u",
        )
        .param("userId", user_id.to_string());

        self.run_write(Operation::DeleteUserNode, &user_context(user_id), q)
            .await?;
        tracing::info!(user_id = %user_id, "User node deleted");
        Ok(())
    }

    /// Create a `CONNECTED_TO` edge from `user_id_1` to `user_id_2`.
    ///
    /// Both nodes are matched first, so if either is missing nothing is
    /// created and the call still succeeds.
    pub async fn connect_users(&self, user_id_1: &str, user_id_2: &str) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u1:User {userId: $user1Id}), (u2:User {userId: $user2Id})
             CREATE (u1)-[:CONNECTED_TO]->(u2)",
        )
        .param("user1Id", user_id_1.to_string())
        .param("user2Id", user_id_2.to_string());

        self.run_write(
            Operation::ConnectUsers,
            &pair_context(user_id_1, user_id_2),
            q,
        )
        .await?;
        tracing::info!(user_id_1 = %user_id_1, user_id_2 = %user_id_2, "Users connected");
        Ok(())
    }

    /// Delete the `CONNECTED_TO` edge between two users, whichever way it points.
    pub async fn disconnect_users(
        &self,
        user_id_1: &str,
        user_id_2: &str,
    ) -> Result<(), GraphError> {
        let q = query(
            "MATCH (u1:User {userId: $user1Id})-[r:CONNECTED_TO]-(u2:User {userId: $user2Id})
             DELETE r",
        )
        .param("user1Id", user_id_1.to_string())
        .param("user2Id", user_id_2.to_string());

        self.run_write(
            Operation::DisconnectUsers,
            &pair_context(user_id_1, user_id_2),
            q,
        )
        .await?;
        tracing::info!(user_id_1 = %user_id_1, user_id_2 = %user_id_2, "Users disconnected");
        Ok(())
    }
}
