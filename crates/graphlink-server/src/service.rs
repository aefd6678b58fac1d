//! gRPC service implementation for GraphLink.
//!
//! [`GraphLinkService`] forwards each RPC to exactly one [`GraphStore`]
//! method. Request fields are passed through as-is (empty ids included).
//! On failure the adapter error is logged and replaced by an opaque status.

use tonic::{Request, Response, Status};

use graphlink_core::Operation;
use graphlink_graph::{GraphError, GraphStore};

use crate::pb::{
    self,
    graph_service_server::{GraphService, GraphServiceServer},
};
use crate::status::to_status;

/// gRPC handler backed by a shared [`GraphStore`].
pub struct GraphLinkService<S> {
    store: S,
}

impl<S: GraphStore> GraphLinkService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Wrap this service in the generated tonic server.
    pub fn into_server(self) -> GraphServiceServer<Self> {
        GraphServiceServer::new(self)
    }
}

fn reject(operation: Operation, err: GraphError) -> Status {
    tracing::error!(%operation, error = %err, "Graph operation failed");
    to_status(operation, &err)
}

#[tonic::async_trait]
impl<S: GraphStore> GraphService for GraphLinkService<S> {
    async fn create_user_node(
        &self,
        request: Request<pb::CreateUserNodeRequest>,
    ) -> Result<Response<pb::CreateUserNodeResponse>, Status> {
        let r = request.into_inner();
        self.store
            .create_user_node(&r.user_id, &r.name)
            .await
            .map_err(|e| reject(Operation::CreateUserNode, e))?;
        Ok(Response::new(pb::CreateUserNodeResponse { success: true }))
    }

    async fn delete_user_node(
        &self,
        request: Request<pb::DeleteUserNodeRequest>,
    ) -> Result<Response<pb::DeleteUserNodeResponse>, Status> {
        let r = request.into_inner();
        self.store
            .delete_user_node(&r.user_id)
            .await
            .map_err(|e| reject(Operation::DeleteUserNode, e))?;
        Ok(Response::new(pb::DeleteUserNodeResponse { success: true }))
    }

    async fn connect_users(
        &self,
        request: Request<pb::ConnectUsersRequest>,
    ) -> Result<Response<pb::ConnectUsersResponse>, Status> {
        let r = request.into_inner();
        self.store
            .connect_users(&r.user_id_1, &r.user_id_2)
            .await
            .map_err(|e| reject(Operation::ConnectUsers, e))?;
        Ok(Response::new(pb::ConnectUsersResponse { success: true }))
    }

    async fn disconnect_users(
        &self,
        request: Request<pb::DisconnectUsersRequest>,
    ) -> Result<Response<pb::DisconnectUsersResponse>, Status> {
        let r = request.into_inner();
        self.store
            .disconnect_users(&r.user_id_1, &r.user_id_2)
            .await
            .map_err(|e| reject(Operation::DisconnectUsers, e))?;
        Ok(Response::new(pb::DisconnectUsersResponse { success: true }))
    }

    async fn get_connected_users(
        &self,
        request: Request<pb::GetConnectedUsersRequest>,
    ) -> Result<Response<pb::GetConnectedUsersResponse>, Status> {
        let r = request.into_inner();
        let connected_user_ids = self
            .store
            .get_connected_users(&r.user_id)
            .await
            .map_err(|e| reject(Operation::GetConnectedUsers, e))?;
        Ok(Response::new(pb::GetConnectedUsersResponse {
            connected_user_ids,
        }))
    }

    async fn check_connection_path(
        &self,
        request: Request<pb::CheckConnectionPathRequest>,
    ) -> Result<Response<pb::CheckConnectionPathResponse>, Status> {
        let r = request.into_inner();
        let path_exists = self
            .store
            .check_connection_path(&r.user_id_1, &r.user_id_2)
            .await
            .map_err(|e| reject(Operation::CheckConnectionPath, e))?;
        Ok(Response::new(pb::CheckConnectionPathResponse { path_exists }))
    }
}
