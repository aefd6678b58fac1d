//! Neo4j connection management and the per-operation session lifecycle.

use std::future::Future;
use std::time::Duration;

use graphlink_core::config::Neo4jSettings;
use graphlink_core::Operation;
use neo4rs::{query, ConfigBuilder, Graph, Query, Row, Txn};

/// Errors from graph operations.
///
/// Every per-call variant names the operation and the input ids it ran with,
/// so the façade can log it before replacing it with an opaque status.
#[derive(Debug, thiserror::Error)]
pub enum GraphError {
    #[error("Neo4j connection error: {0}")]
    Connection(String),

    #[error("failed to open session for {operation} ({context}): {source}")]
    Session {
        operation: Operation,
        context: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("failed to {} ({context}): {source}", .operation.description())]
    Query {
        operation: Operation,
        context: String,
        #[source]
        source: neo4rs::Error,
    },

    #[error("unexpected result from {operation} ({context}): {detail}")]
    UnexpectedResult {
        operation: Operation,
        context: String,
        detail: String,
    },

    #[error("{operation} timed out after {limit:?} ({context})")]
    Timeout {
        operation: Operation,
        context: String,
        limit: Duration,
    },
}

impl GraphError {
    pub(crate) fn session(operation: Operation, context: &str, source: neo4rs::Error) -> Self {
        Self::Session {
            operation,
            context: context.to_string(),
            source,
        }
    }

    pub(crate) fn query(operation: Operation, context: &str, source: neo4rs::Error) -> Self {
        Self::Query {
            operation,
            context: context.to_string(),
            source,
        }
    }

    pub(crate) fn unexpected(operation: Operation, context: &str, detail: impl Into<String>) -> Self {
        Self::UnexpectedResult {
            operation,
            context: context.to_string(),
            detail: detail.into(),
        }
    }

    /// The operation this error belongs to, if it came from a graph call.
    pub fn operation(&self) -> Option<Operation> {
        match self {
            Self::Connection(_) => None,
            Self::Session { operation, .. }
            | Self::Query { operation, .. }
            | Self::UnexpectedResult { operation, .. }
            | Self::Timeout { operation, .. } => Some(*operation),
        }
    }
}

/// Configuration for connecting to Neo4j.
#[derive(Debug, Clone)]
pub struct GraphConfig {
    pub uri: String,
    pub user: String,
    pub password: String,
    pub max_connections: u32,
    pub fetch_size: usize,
    pub query_timeout: Option<Duration>,
}

impl Default for GraphConfig {
    fn default() -> Self {
        Self {
            uri: "bolt://localhost:7687".to_string(),
            user: "neo4j".to_string(),
            password: "password".to_string(),
            max_connections: 16,
            fetch_size: 256,
            query_timeout: None,
        }
    }
}

impl From<&Neo4jSettings> for GraphConfig {
    fn from(settings: &Neo4jSettings) -> Self {
        Self {
            uri: settings.uri.clone(),
            user: settings.username.clone(),
            password: settings.password.clone(),
            max_connections: u32::try_from(settings.max_connections).unwrap_or(u32::MAX),
            fetch_size: settings.fetch_size,
            query_timeout: settings.query_timeout(),
        }
    }
}

/// Thread-safe Neo4j graph client with connection pooling.
///
/// One instance is created at startup and shared by every call.
/// Clone is cheap (inner Arc); the pool is released when the last clone drops.
#[derive(Clone)]
pub struct GraphClient {
    graph: Graph,
    query_timeout: Option<Duration>,
}

impl GraphClient {
    /// Connect to Neo4j and verify the server answers before returning.
    pub async fn connect(config: &GraphConfig) -> Result<Self, GraphError> {
        let neo_config = ConfigBuilder::default()
            .uri(&config.uri)
            .user(&config.user)
            .password(&config.password)
            .max_connections(config.max_connections as usize)
            .fetch_size(config.fetch_size)
            .build()
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let graph = Graph::connect(neo_config)
            .await
            .map_err(|e| GraphError::Connection(e.to_string()))?;

        let client = Self {
            graph,
            query_timeout: config.query_timeout,
        };
        client.verify_connectivity().await?;

        tracing::info!(uri = %config.uri, "Connected to Neo4j");
        Ok(client)
    }

    /// Round-trip a trivial query. The pool connects lazily, so this is the
    /// first point where an unreachable server or bad credentials show up.
    pub async fn verify_connectivity(&self) -> Result<(), GraphError> {
        let connection_err = |e: neo4rs::Error| GraphError::Connection(e.to_string());

        let mut txn = self.graph.start_txn().await.map_err(connection_err)?;
        let mut stream = txn
            .execute(query("RETURN 1 AS ok"))
            .await
            .map_err(connection_err)?;
        while stream
            .next(txn.handle())
            .await
            .map_err(connection_err)?
            .is_some()
        {}
        txn.commit().await.map_err(connection_err)?;
        Ok(())
    }

    /// Release this handle on the connection pool.
    pub fn close(self) {
        drop(self.graph);
        tracing::info!("Neo4j driver closed");
    }

    /// Run a mutation in its own write transaction and commit it.
    pub(crate) async fn run_write(
        &self,
        operation: Operation,
        context: &str,
        q: Query,
    ) -> Result<(), GraphError> {
        self.bounded(operation, context, async {
            let mut txn = self.open_session(operation, context).await?;
            txn.run(q)
                .await
                .map_err(|e| GraphError::query(operation, context, e))?;
            txn.commit()
                .await
                .map_err(|e| GraphError::query(operation, context, e))
        })
        .await
    }

    /// Run a query in its own read transaction and collect every row.
    pub(crate) async fn run_read(
        &self,
        operation: Operation,
        context: &str,
        q: Query,
    ) -> Result<Vec<Row>, GraphError> {
        self.bounded(operation, context, async {
            let mut txn = self.open_session(operation, context).await?;
            let mut stream = txn
                .execute(q)
                .await
                .map_err(|e| GraphError::query(operation, context, e))?;
            let mut rows = Vec::new();
            while let Some(row) = stream
                .next(txn.handle())
                .await
                .map_err(|e| GraphError::query(operation, context, e))?
            {
                rows.push(row);
            }
            txn.commit()
                .await
                .map_err(|e| GraphError::query(operation, context, e))?;
            Ok(rows)
        })
        .await
    }

    // An uncommitted Txn that is dropped (error, timeout, cancelled call)
    // hands its connection back to the pool, which RESETs it on recycle.
    async fn open_session(&self, operation: Operation, context: &str) -> Result<Txn, GraphError> {
        tracing::debug!(%operation, write = operation.is_write(), context, "Opening session");
        self.graph
            .start_txn()
            .await
            .map_err(|e| GraphError::session(operation, context, e))
    }

    async fn bounded<T, F>(&self, operation: Operation, context: &str, fut: F) -> Result<T, GraphError>
    where
        F: Future<Output = Result<T, GraphError>>,
    {
        match self.query_timeout {
            Some(limit) => tokio::time::timeout(limit, fut).await.map_err(|_| {
                GraphError::Timeout {
                    operation,
                    context: context.to_string(),
                    limit,
                }
            })?,
            None => fut.await,
        }
    }
}

/// Input context for single-user operations.
pub(crate) fn user_context(user_id: &str) -> String {
    format!("user_id={user_id:?}")
}

/// Input context for two-user operations.
pub(crate) fn pair_context(user_id_1: &str, user_id_2: &str) -> String {
    format!("user_id_1={user_id_1:?}, user_id_2={user_id_2:?}")
}
