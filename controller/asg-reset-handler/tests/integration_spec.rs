//! Integration tests for the ASG reset handler
//!
//! Tests cover:
//! - Outcome records for successful and failed control-plane calls
//! - The fixed zero-capacity shape of the update-group request
//! - Missing group-name configuration flowing through the error path
//! - Transport failures surfacing as error outcomes, not panics

use asg_reset_handler::{HttpScalingClient, ResetHandler, ScalingClient, Status};
use std::sync::Arc;
use wiremock::matchers::{body_string_contains, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

#[tokio::test]
async fn test_successful_reset_outcome() {
    let mock_server = MockServer::start().await;

    // The mock only matches a request carrying the fixed zero-capacity
    // parameters, so a success outcome proves the request shape.
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("Action=UpdateAutoScalingGroup"))
        .and(body_string_contains("AutoScalingGroupName=web-fleet"))
        .and(body_string_contains("MinSize=0"))
        .and(body_string_contains("DesiredCapacity=0"))
        .respond_with(ResponseTemplate::new(200))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(HttpScalingClient::new(mock_server.uri()).unwrap());
    let handler = ResetHandler::new(Some("web-fleet".to_string()), client);

    let outcome = handler.handle().await;

    assert_eq!(outcome.status, Status::Success);
    assert_eq!(outcome.message, "ASG reset successfully.");
}

#[tokio::test]
async fn test_control_plane_rejection_yields_error_outcome() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("ValidationError: Auto scaling group not found"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(HttpScalingClient::new(mock_server.uri()).unwrap());
    let handler = ResetHandler::new(Some("no-such-group".to_string()), client);

    let outcome = handler.handle().await;

    assert_eq!(outcome.status, Status::Error);
    assert!(
        outcome.message.contains("400"),
        "message should carry the response status: {}",
        outcome.message
    );
    assert!(
        outcome
            .message
            .contains("ValidationError: Auto scaling group not found"),
        "message should carry the response body: {}",
        outcome.message
    );
}

#[tokio::test]
async fn test_missing_asg_name_is_caught_by_error_path() {
    let mock_server = MockServer::start().await;

    // The request still goes out, with an empty group name, and the control
    // plane rejects it. Nothing escapes the handler.
    Mock::given(method("POST"))
        .and(path("/"))
        .and(body_string_contains("AutoScalingGroupName=&"))
        .respond_with(
            ResponseTemplate::new(400)
                .set_body_string("ValidationError: AutoScalingGroupName must not be empty"),
        )
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = Arc::new(HttpScalingClient::new(mock_server.uri()).unwrap());
    let handler = ResetHandler::new(None, client);

    let outcome = handler.handle().await;

    assert_eq!(outcome.status, Status::Error);
    assert!(outcome
        .message
        .contains("ValidationError: AutoScalingGroupName must not be empty"));
}

#[tokio::test]
async fn test_transport_failure_yields_error_outcome() {
    // Nothing listens here; the connection itself fails.
    let client = Arc::new(HttpScalingClient::new("http://127.0.0.1:1/".to_string()).unwrap());
    let handler = ResetHandler::new(Some("web-fleet".to_string()), client);

    let outcome = handler.handle().await;

    assert_eq!(outcome.status, Status::Error);
    assert!(
        outcome.message.contains("Control plane request failed"),
        "message should carry the transport context: {}",
        outcome.message
    );
}

#[tokio::test]
async fn test_client_rejects_server_error_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("InternalFailure"))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = HttpScalingClient::new(mock_server.uri()).unwrap();
    let result = client.set_group_capacity("web-fleet", 0, 0).await;

    assert!(result.is_err(), "client should not retry or mask a 500");
}
