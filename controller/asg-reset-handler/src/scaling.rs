//! Scaling client trait and HTTP implementation
//!
//! The reset handler talks to the fleet-scaling control plane through the
//! `ScalingClient` trait. The HTTP implementation issues the control plane's
//! update-group operation; tests substitute a mock server or a fake client.

use anyhow::{Context, Result};
use async_trait::async_trait;
use std::time::Duration;
use tracing::info;

/// Region the control plane is addressed in. Fixed, not configurable.
pub const REGION: &str = "us-east-1";

/// Version of the update-group operation.
const API_VERSION: &str = "2011-01-01";

/// Request timeout for control-plane calls.
const REQUEST_TIMEOUT_SECS: u64 = 10;

/// Control-plane endpoint for a region.
pub fn control_plane_endpoint(region: &str) -> String {
    format!("https://autoscaling.{region}.amazonaws.com/")
}

/// Scaling client trait - the seam between the reset handler and the
/// fleet-scaling control plane
#[async_trait]
pub trait ScalingClient: Send + Sync {
    /// Set a group's minimum and desired instance counts.
    async fn set_group_capacity(
        &self,
        group_name: &str,
        min_size: u32,
        desired_capacity: u32,
    ) -> Result<()>;
}

/// HTTP scaling client - POSTs update-group calls to the control plane
pub struct HttpScalingClient {
    endpoint: String,
    client: reqwest::Client,
}

impl HttpScalingClient {
    /// Create a client against an explicit endpoint
    pub fn new(endpoint: String) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self { endpoint, client })
    }

    /// Create a client against the region's default endpoint
    pub fn for_region(region: &str) -> Result<Self> {
        Self::new(control_plane_endpoint(region))
    }
}

#[async_trait]
impl ScalingClient for HttpScalingClient {
    async fn set_group_capacity(
        &self,
        group_name: &str,
        min_size: u32,
        desired_capacity: u32,
    ) -> Result<()> {
        let min_size_param = min_size.to_string();
        let desired_capacity_param = desired_capacity.to_string();
        let params = [
            ("Action", "UpdateAutoScalingGroup"),
            ("Version", API_VERSION),
            ("AutoScalingGroupName", group_name),
            ("MinSize", min_size_param.as_str()),
            ("DesiredCapacity", desired_capacity_param.as_str()),
        ];

        let response = self
            .client
            .post(&self.endpoint)
            .form(&params)
            .send()
            .await
            .context("Control plane request failed")?;

        if response.status().is_success() {
            info!(
                group_name = %group_name,
                min_size = min_size,
                desired_capacity = desired_capacity,
                status = %response.status(),
                "Control plane accepted update-group call"
            );
            Ok(())
        } else {
            let status = response.status();
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "<unable to read body>".to_string());
            Err(anyhow::anyhow!(
                "Control plane returned error status {}: {}",
                status,
                body
            ))
        }
    }
}
