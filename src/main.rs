use std::sync::Arc;

use anyhow::Context;
use plainserve::config::Config;
use plainserve::router::Router;
use plainserve::server;
use plainserve::service::ServiceRegistry;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_target(false)
        .with_level(true)
        .init();

    let cfg = Config::load().context("failed to load configuration")?;
    let router = Arc::new(Router::from_config(&cfg, ServiceRegistry::with_defaults()));

    tokio::select! {
        res = server::listener::run(&cfg, router) => {
            res?;
        }

        _ = tokio::signal::ctrl_c() => {
            tracing::info!("Shutdown signal received");
        }
    }

    Ok(())
}
