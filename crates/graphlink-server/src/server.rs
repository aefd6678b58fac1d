//! Listener setup, reflection registration, and graceful shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::time::Duration;

use tokio::net::TcpListener;
use tokio_stream::wrappers::TcpListenerStream;
use tonic::transport::Server;
use tonic_reflection::server::Builder as ReflectionBuilder;

use graphlink_graph::GraphStore;

use crate::error::Result;
use crate::service::GraphLinkService;
use crate::FILE_DESCRIPTOR_SET;

/// Bind the gRPC listener.
pub async fn bind(addr: SocketAddr) -> Result<TcpListener> {
    Ok(TcpListener::bind(addr).await?)
}

/// Serve the graph service (plus reflection) on `listener` until `shutdown`
/// resolves, then wait for in-flight calls to finish.
pub async fn serve<S, F>(
    store: S,
    listener: TcpListener,
    request_timeout: Option<Duration>,
    shutdown: F,
) -> Result<()>
where
    S: GraphStore,
    F: Future<Output = ()>,
{
    let reflection_service = ReflectionBuilder::configure()
        .register_encoded_file_descriptor_set(FILE_DESCRIPTOR_SET)
        .build_v1()?;

    let local_addr = listener.local_addr()?;
    tracing::info!(addr = %local_addr, "gRPC server listening");

    let mut builder = Server::builder();
    if let Some(limit) = request_timeout {
        builder = builder.timeout(limit);
    }

    builder
        .add_service(GraphLinkService::new(store).into_server())
        .add_service(reflection_service)
        .serve_with_incoming_shutdown(TcpListenerStream::new(listener), shutdown)
        .await?;

    tracing::info!("gRPC server stopped");
    Ok(())
}

/// Resolves on Ctrl-C, or SIGTERM on Unix.
pub async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!(error = %e, "Failed to listen for Ctrl-C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut sig) => {
                sig.recv().await;
            }
            Err(e) => {
                tracing::error!(error = %e, "Failed to listen for SIGTERM");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutting down gRPC server...");
}
