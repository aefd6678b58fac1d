//! GraphLink Graph — Neo4j adapter for the social graph.
//!
//! This crate is the only place that talks to Neo4j. Each graph operation
//! opens its own session, runs one parameterized Cypher query in one
//! transaction, and turns the outcome into a plain value or a `GraphError`.

pub mod client;
pub mod mutations;
pub mod queries;
pub mod store;

pub use client::{GraphClient, GraphConfig, GraphError};
pub use queries::MAX_PATH_HOPS;
pub use store::GraphStore;
