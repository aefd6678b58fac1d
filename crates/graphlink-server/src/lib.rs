//! graphlink-server: gRPC façade over the social graph.
//!
//! Maps each `graph.GraphService` RPC onto exactly one [`GraphStore`]
//! operation and turns adapter failures into opaque statuses.
//!
//! [`GraphStore`]: graphlink_graph::GraphStore

// Generated protobuf / tonic code (compiled by build.rs)
#[allow(clippy::all)]
#[allow(clippy::pedantic)]
pub mod pb {
    tonic::include_proto!("graph");
}

/// Encoded protobuf file descriptor set, served through gRPC reflection.
pub const FILE_DESCRIPTOR_SET: &[u8] = tonic::include_file_descriptor_set!("graphlink_descriptor");

pub mod error;
pub mod server;
pub mod service;
pub mod status;

pub use error::ServerError;
pub use server::{bind, serve, shutdown_signal};
pub use service::GraphLinkService;
