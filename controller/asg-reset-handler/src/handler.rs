//! Reset handler - the core disaster simulation operation
//!
//! One invocation = one update-group call forcing the target group's minimum
//! and desired capacity to zero, folded into a two-field outcome record.

use crate::scaling::ScalingClient;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tracing::{error, info};

/// Outcome status. Exactly two values; failures are not classified further.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    Success,
    Error,
}

/// Per-invocation outcome record handed back to the invoking platform
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ResetOutcome {
    pub status: Status,
    pub message: String,
}

/// Reset handler - resets the configured group to zero capacity
pub struct ResetHandler<C: ScalingClient> {
    asg_name: Option<String>,
    client: Arc<C>,
}

impl<C: ScalingClient> ResetHandler<C> {
    /// Create a new reset handler
    pub fn new(asg_name: Option<String>, client: Arc<C>) -> Self {
        Self { asg_name, client }
    }

    /// Run one reset invocation. Always returns an outcome record; any error
    /// raised by the control-plane call is folded into the `error` status.
    pub async fn handle(&self) -> ResetOutcome {
        // No validation here: an absent name goes to the control plane as an
        // empty group name and fails there.
        let group_name = self.asg_name.as_deref().unwrap_or_default();

        match self.client.set_group_capacity(group_name, 0, 0).await {
            Ok(()) => {
                info!(
                    group_name = %group_name,
                    min_size = 0,
                    desired_capacity = 0,
                    "ASG reset"
                );
                ResetOutcome {
                    status: Status::Success,
                    message: "ASG reset successfully.".to_string(),
                }
            }
            Err(err) => {
                let message = format!("{err:#}");
                error!(group_name = %group_name, error = %message, "Error resetting ASG");
                ResetOutcome {
                    status: Status::Error,
                    message,
                }
            }
        }
    }
}
