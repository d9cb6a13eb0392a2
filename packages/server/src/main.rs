// Main entry point for the Mission Control worker

use anyhow::{Context, Result};
use openclaw_client::OpenClawClient;
use server_core::kernel::{start_scheduler, BaseCronGateway, CronReconciler, OpenClawAdapter};
use server_core::Config;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,server_core=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Mission Control worker");

    // Load configuration
    let config = Config::from_env().context("Failed to load configuration")?;
    tracing::info!("Gateway: {}", config.openclaw_gateway_url);

    let client = Arc::new(
        OpenClawClient::new(
            config.openclaw_gateway_url.clone(),
            config.openclaw_gateway_token.clone(),
        )
        .context("Failed to create gateway client")?,
    );
    let gateway: Arc<dyn BaseCronGateway> = Arc::new(OpenClawAdapter::new(client));

    // Reconcile once up front so a freshly provisioned gateway gets the
    // runner job before the first scheduled tick.
    let outcome = CronReconciler::new(gateway.clone()).reconcile().await;
    tracing::info!(?outcome, "Startup cron reconcile complete");

    // Keep the scheduler handle alive for the life of the process
    let _scheduler = start_scheduler(gateway)
        .await
        .context("Failed to start scheduled tasks")?;

    tokio::signal::ctrl_c()
        .await
        .context("Failed to listen for shutdown signal")?;
    tracing::info!("Shutdown signal received");

    Ok(())
}
