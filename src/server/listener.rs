use std::sync::Arc;

use anyhow::Context;
use tokio::net::TcpListener;
use tokio::sync::Semaphore;
use tracing::info;

use crate::config::Config;
use crate::http::connection::Connection;
use crate::router::Router;

/// Binds the configured address and serves connections until the task is
/// dropped.
pub async fn run(cfg: &Config, router: Arc<Router>) -> anyhow::Result<()> {
    let listener = TcpListener::bind(&cfg.server.listen_addr)
        .await
        .with_context(|| format!("failed to bind {}", cfg.server.listen_addr))?;
    info!(
        "Listening on {} (workers: {}, root: {})",
        cfg.server.listen_addr,
        cfg.server.workers,
        cfg.static_files.root.display()
    );

    serve(listener, cfg, router).await
}

/// Accept loop over an already bound listener.
///
/// At most `workers` connections are handled at once. The loop waits for a
/// free slot before accepting again, so further clients queue in the
/// listen backlog instead of being dropped.
pub async fn serve(
    listener: TcpListener,
    cfg: &Config,
    router: Arc<Router>,
) -> anyhow::Result<()> {
    let workers = Arc::new(Semaphore::new(cfg.server.workers));
    let read_timeout = cfg.server.read_timeout();

    loop {
        let permit = workers
            .clone()
            .acquire_owned()
            .await
            .context("worker pool closed")?;

        let (socket, peer) = match listener.accept().await {
            Ok(accepted) => accepted,
            Err(e) => {
                tracing::error!("Failed to accept connection: {}", e);
                continue;
            }
        };
        info!("Accepted connection from {}", peer);

        let router = router.clone();
        tokio::spawn(async move {
            let mut conn = Connection::new(socket, router, read_timeout);
            if let Err(e) = conn.run().await {
                tracing::error!("Connection error from {}: {}", peer, e);
            }
            drop(permit);
        });
    }
}
