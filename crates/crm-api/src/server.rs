//! API server: binds a listener and serves the router until shutdown.

use std::future::Future;
use std::net::SocketAddr;
use std::sync::Arc;

use crm_storage::Storage;
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::create_router;

/// Serves the API on an already bound listener until `shutdown` resolves.
pub async fn serve_with_shutdown<F>(
    listener: TcpListener,
    store: Arc<dyn Storage>,
    shutdown: F,
) -> std::io::Result<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    let addr = listener.local_addr()?;
    info!("API listening on http://{}", addr);
    axum::serve(listener, create_router(store))
        .with_graceful_shutdown(shutdown)
        .await
}

/// Binds `addr` and serves the API until Ctrl+C.
pub async fn serve(addr: SocketAddr, store: Arc<dyn Storage>) -> std::io::Result<()> {
    let listener = TcpListener::bind(addr).await?;
    serve_with_shutdown(listener, store, shutdown_signal()).await
}

/// Resolves when the process receives Ctrl+C.
pub async fn shutdown_signal() {
    if tokio::signal::ctrl_c().await.is_ok() {
        info!("Shutting down...");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_storage::SqliteStore;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    #[tokio::test]
    async fn serves_until_shutdown() {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let store: Arc<dyn Storage> = Arc::new(SqliteStore::open_in_memory().unwrap());
        let (tx, rx) = tokio::sync::oneshot::channel::<()>();

        let server = tokio::spawn(serve_with_shutdown(listener, store, async {
            rx.await.ok();
        }));

        let mut stream = tokio::net::TcpStream::connect(addr).await.unwrap();
        stream
            .write_all(b"GET /health HTTP/1.1\r\nHost: localhost\r\nConnection: close\r\n\r\n")
            .await
            .unwrap();
        let mut response = String::new();
        stream.read_to_string(&mut response).await.unwrap();
        assert!(response.starts_with("HTTP/1.1 200"));
        assert!(response.contains(r#"{"status":"ok"}"#));

        tx.send(()).unwrap();
        server.await.unwrap().unwrap();
    }
}
