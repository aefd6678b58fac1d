//! Read operations for the social graph.

use graphlink_core::Operation;
use neo4rs::{query, DeError, Row};

use crate::client::{pair_context, user_context, GraphClient, GraphError};

/// Longest connection chain, in edges, that still counts as reachable.
pub const MAX_PATH_HOPS: u32 = 3;

/// Outcome of reading the single path-existence row.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PathProbe {
    Answer(bool),
    /// No rows, or a row without a usable value.
    Indeterminate(&'static str),
}

impl GraphClient {
    /// Ids of every user one `CONNECTED_TO` hop away, in either direction.
    ///
    /// Unknown users have no neighbours. Parallel edges yield repeated ids.
    pub async fn get_connected_users(&self, user_id: &str) -> Result<Vec<String>, GraphError> {
        let q = query(
            "MATCH (u:User {userId: $userId})-[:CONNECTED_TO]-(connectedUser:User)
             RETURN connectedUser.userId AS connectedUserId",
        )
        .param("userId", user_id.to_string());

        let context = user_context(user_id);
        let rows = self
            .run_read(Operation::GetConnectedUsers, &context, q)
            .await?;

        connected_ids(&rows).map_err(|e| {
            GraphError::unexpected(
                Operation::GetConnectedUsers,
                &context,
                format!("connectedUserId is not a string: {e}"),
            )
        })
    }

    /// Whether a chain of 1 to [`MAX_PATH_HOPS`] connections links the two users,
    /// ignoring edge direction.
    ///
    /// When either user is missing the query returns no rows; that and a row
    /// without a value both read as `false` rather than an error.
    pub async fn check_connection_path(
        &self,
        user_id_1: &str,
        user_id_2: &str,
    ) -> Result<bool, GraphError> {
        let cypher = format!(
            "MATCH (u1:User {{userId: $user1Id}}), (u2:User {{userId: $user2Id}})
             RETURN EXISTS {{ (u1)-[:CONNECTED_TO*1..{MAX_PATH_HOPS}]-(u2) }} AS pathExists
             LIMIT 1"
        );
        let q = query(&cypher)
            .param("user1Id", user_id_1.to_string())
            .param("user2Id", user_id_2.to_string());

        let context = pair_context(user_id_1, user_id_2);
        let rows = self
            .run_read(Operation::CheckConnectionPath, &context, q)
            .await?;

        match probe_path_rows(&rows) {
            Ok(PathProbe::Answer(exists)) => Ok(exists),
            Ok(PathProbe::Indeterminate(reason)) => {
                tracing::info!(
                    user_id_1 = %user_id_1,
                    user_id_2 = %user_id_2,
                    reason,
                    "Connection path indeterminate, reporting no path; users might not exist"
                );
                Ok(false)
            }
            Err(e) => Err(GraphError::unexpected(
                Operation::CheckConnectionPath,
                &context,
                format!("pathExists is not a boolean: {e}"),
            )),
        }
    }
}

fn connected_ids(rows: &[Row]) -> Result<Vec<String>, DeError> {
    rows.iter()
        .map(|row| row.get::<String>("connectedUserId"))
        .collect()
}

fn probe_path_rows(rows: &[Row]) -> Result<PathProbe, DeError> {
    let Some(row) = rows.first() else {
        return Ok(PathProbe::Indeterminate("no rows returned"));
    };
    match row.get::<Option<bool>>("pathExists") {
        Ok(Some(exists)) => Ok(PathProbe::Answer(exists)),
        Ok(None) | Err(DeError::NoSuchProperty) => {
            Ok(PathProbe::Indeterminate("no value in returned row"))
        }
        Err(e) => Err(e),
    }
}
