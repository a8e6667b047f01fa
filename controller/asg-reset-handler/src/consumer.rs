//! NATS JetStream consumer for disaster simulation triggers

use crate::config::Config;
use crate::handler::{ResetHandler, Status};
use crate::metrics::Metrics;
use crate::scaling::ScalingClient;
use anyhow::{Context, Result};
use async_nats::jetstream::{
    self,
    consumer::{AckPolicy, DeliverPolicy, PullConsumer},
    stream::Stream,
};
use futures_util::StreamExt;
use std::time::Duration;
use tracing::{debug, error, info, warn};

/// Trigger consumer - subscribes to JetStream and runs one reset per message
pub struct InvokeConsumer<C: ScalingClient> {
    config: Config,
    handler: ResetHandler<C>,
    metrics: Metrics,
}

impl<C: ScalingClient> InvokeConsumer<C> {
    /// Create a new trigger consumer
    pub fn new(config: Config, handler: ResetHandler<C>, metrics: Metrics) -> Self {
        Self {
            config,
            handler,
            metrics,
        }
    }

    /// Run the consumer loop
    pub async fn run(&self) -> Result<()> {
        info!("Starting disaster trigger consumer");

        // Connect to NATS
        let client = self.connect_nats().await?;
        let jetstream = jetstream::new(client);

        // Get or create stream
        let stream = self.ensure_stream(&jetstream).await?;

        // Create durable consumer
        let consumer = self.create_consumer(&stream).await?;

        info!(
            consumer_name = %self.config.consumer_name,
            subject = %self.config.invoke_subject(),
            "Consumer created successfully, waiting for triggers"
        );

        // Process messages continuously
        self.process_messages(consumer).await
    }

    /// Connect to NATS server
    async fn connect_nats(&self) -> Result<async_nats::Client> {
        info!("Connecting to NATS at {}", self.config.nats_url);

        let client = if let Some(creds_path) = &self.config.nats_creds_path {
            info!("Using credentials file: {}", creds_path);
            async_nats::ConnectOptions::new()
                .credentials_file(creds_path)
                .await
                .context("Failed to load NATS credentials")?
                .connect(&self.config.nats_url)
                .await
                .context("Failed to connect to NATS with credentials")?
        } else {
            warn!("No NATS credentials provided, connecting without auth");
            async_nats::connect(&self.config.nats_url)
                .await
                .context("Failed to connect to NATS")?
        };

        info!("Successfully connected to NATS");
        Ok(client)
    }

    /// Ensure JetStream stream exists
    async fn ensure_stream(&self, jetstream: &jetstream::Context) -> Result<Stream> {
        let stream_name = &self.config.stream_name;

        match jetstream.get_stream(stream_name).await {
            Ok(stream) => {
                info!("Found existing stream: {}", stream_name);
                Ok(stream)
            }
            Err(_) => {
                info!("Stream {} not found, creating it", stream_name);
                let stream_config = jetstream::stream::Config {
                    name: stream_name.clone(),
                    subjects: vec![self.config.invoke_subject()],
                    max_age: Duration::from_secs(3600 * 24), // Retain triggers for 1 day
                    ..Default::default()
                };

                let stream = jetstream
                    .get_or_create_stream(stream_config)
                    .await
                    .context("Failed to create JetStream stream")?;

                info!("Successfully created stream: {}", stream_name);
                Ok(stream)
            }
        }
    }

    /// Create durable JetStream consumer
    async fn create_consumer(&self, stream: &Stream) -> Result<PullConsumer> {
        let consumer_config = jetstream::consumer::pull::Config {
            durable_name: Some(self.config.consumer_name.clone()),
            filter_subject: self.config.invoke_subject(),
            // Triggers published while the service was down must not replay
            // a disaster simulation on startup.
            deliver_policy: DeliverPolicy::New,
            ack_policy: AckPolicy::Explicit,
            ack_wait: Duration::from_secs(30),
            ..Default::default()
        };

        let consumer = stream
            .get_or_create_consumer(&self.config.consumer_name, consumer_config)
            .await
            .context("Failed to create consumer")?;

        Ok(consumer)
    }

    /// Process messages continuously
    async fn process_messages(&self, consumer: PullConsumer) -> Result<()> {
        const BATCH_SIZE: usize = 10;
        const BATCH_TIMEOUT_SECS: u64 = 30;

        loop {
            let mut messages = consumer
                .batch()
                .max_messages(BATCH_SIZE)
                .expires(Duration::from_secs(BATCH_TIMEOUT_SECS))
                .messages()
                .await
                .context("Failed to fetch message batch")?;

            let mut batch_count = 0;

            while let Some(msg_result) = messages.next().await {
                match msg_result {
                    Ok(msg) => {
                        batch_count += 1;
                        self.handle_message(msg).await;
                    }
                    Err(e) => {
                        error!("Error receiving message: {}", e);
                    }
                }
            }

            if batch_count > 0 {
                debug!("Processed batch of {} triggers", batch_count);
            }

            // Small delay between batches to prevent tight-looping
            if batch_count == 0 {
                tokio::time::sleep(Duration::from_secs(1)).await;
            }
        }
    }

    /// Handle a single trigger message
    async fn handle_message(&self, msg: async_nats::jetstream::Message) {
        let subject = msg.subject.clone();

        // The trigger payload is the platform's event/context pair; it is
        // deliberately unused beyond this debug line.
        debug!(
            subject = %subject,
            payload_size = msg.payload.len(),
            "Received disaster simulation trigger"
        );
        self.metrics.record_invocation();

        let outcome = self.handler.handle().await;
        self.metrics
            .record_reset_call(outcome.status == Status::Success);

        match serde_json::to_string(&outcome) {
            Ok(json) => info!(outcome = %json, "Invocation finished"),
            Err(e) => error!("Failed to serialize outcome record: {}", e),
        }

        // An error outcome is a normal return, not a redeliverable failure;
        // ack either way so the trigger is never replayed.
        if let Err(e) = msg.ack().await {
            error!("Failed to ack trigger message: {}", e);
        }
    }
}
