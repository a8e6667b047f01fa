//! Disaster simulation handler binary - resets the target ASG on each trigger

use asg_reset_handler::{
    Config, HttpScalingClient, InvokeConsumer, Metrics, ResetHandler, REGION,
};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse configuration
    let config = Config::parse_config();

    // Initialize logging
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    info!("Starting Disaster Sim ASG Reset Handler");
    info!("Configuration:");
    info!("  NATS URL: {}", config.nats_url);
    info!("  Stream: {}", config.stream_name);
    info!("  Consumer: {}", config.consumer_name);
    info!("  Subject: {}", config.invoke_subject());
    info!(
        "  ASG name: {}",
        config.asg_name.as_deref().unwrap_or("<unset>")
    );
    info!("  Region: {}", REGION);

    let scaling_client = Arc::new(HttpScalingClient::for_region(REGION)?);
    let handler = ResetHandler::new(config.asg_name.clone(), scaling_client);

    let consumer = InvokeConsumer::new(config, handler, Metrics);

    match consumer.run().await {
        Ok(()) => {
            info!("Trigger consumer exited normally");
            Ok(())
        }
        Err(e) => {
            error!("Trigger consumer failed: {}", e);
            Err(e)
        }
    }
}
