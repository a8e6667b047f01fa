//! Configuration for the ASG reset handler service

use clap::Parser;
use std::env;

/// Subject the trigger stream delivers invocations on.
const INVOKE_SUBJECT: &str = "disaster.v1.simulate";

/// Configuration for the ASG reset handler
#[derive(Debug, Clone, Parser)]
#[command(name = "disaster-sim-handler")]
#[command(about = "Consumes disaster simulation triggers and resets the target ASG to zero capacity")]
pub struct Config {
    /// Name of the auto-scaling group to reset. Not validated here; an
    /// absent name is passed through and rejected by the control plane.
    #[arg(long, env)]
    pub asg_name: Option<String>,

    /// NATS server URL
    #[arg(long, env)]
    pub nats_url: String,

    /// Path to NATS credentials file
    #[arg(long, env)]
    pub nats_creds_path: Option<String>,

    /// JetStream stream name
    #[arg(long, env)]
    pub stream_name: String,

    /// Consumer name (for durable JetStream consumer)
    #[arg(long, env)]
    pub consumer_name: String,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            asg_name: env::var("ASG_NAME").ok(),
            nats_url: env::var("NATS_URL").unwrap_or_else(|_| "nats://localhost:4222".to_string()),
            nats_creds_path: env::var("NATS_CREDS_PATH").ok(),
            stream_name: env::var("STREAM_NAME")
                .unwrap_or_else(|_| "DISASTER_TRIGGERS".to_string()),
            consumer_name: env::var("CONSUMER_NAME")
                .unwrap_or_else(|_| "asg-reset-handler".to_string()),
        }
    }
}

impl Config {
    /// Parse configuration from command-line args and environment variables
    pub fn parse_config() -> Self {
        Config::parse()
    }

    /// Get the subject the durable consumer is filtered to
    pub fn invoke_subject(&self) -> String {
        INVOKE_SUBJECT.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn test_config() -> Config {
        Config {
            asg_name: Some("web-fleet".to_string()),
            nats_url: "nats://localhost:4222".to_string(),
            nats_creds_path: None,
            stream_name: "DISASTER_TRIGGERS".to_string(),
            consumer_name: "test-consumer".to_string(),
        }
    }

    #[test]
    fn test_invoke_subject_is_fixed() {
        let config = test_config();
        assert_eq!(config.invoke_subject(), "disaster.v1.simulate");
    }

    #[test]
    fn test_asg_name_is_optional() {
        let mut config = test_config();
        config.asg_name = None;

        // Absence is representable; nothing in the config layer rejects it.
        assert!(config.asg_name.is_none());
    }
}
