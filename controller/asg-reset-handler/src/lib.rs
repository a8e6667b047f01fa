//! ASG Reset Handler - consumes disaster simulation triggers and resets an
//! auto-scaling group to zero capacity
//!
//! This service subscribes to trigger events from NATS JetStream and, for each
//! invocation, issues a single update-group call against the fleet-scaling
//! control plane requesting `MinSize=0, DesiredCapacity=0` for the configured
//! group. The trigger payload itself is ignored; every invocation produces a
//! `{status, message}` outcome record that is logged and discarded.

pub mod config;
pub mod consumer;
pub mod handler;
pub mod metrics;
pub mod scaling;

pub use config::Config;
pub use consumer::InvokeConsumer;
pub use handler::{ResetHandler, ResetOutcome, Status};
pub use metrics::Metrics;
pub use scaling::{HttpScalingClient, ScalingClient, REGION};
