// ABOUTME: Integration tests for waiting on Marathon deployments.
// ABOUTME: Drives the poll loop with a scripted transport and a fake clock.

mod support;

use serde_json::json;
use std::time::Duration;
use stride::marathon::{MarathonClient, Method, Response};
use stride::reconcile::{DeploymentWaiter, ReconcileErrorKind};
use stride::types::DeploymentId;
use support::{FakeClock, FakeMarathon};

fn setup() -> (FakeMarathon, MarathonClient<FakeMarathon>, DeploymentWaiter<FakeClock>) {
    support::init_tracing();
    let fake = FakeMarathon::new();
    let client = MarathonClient::new(fake.clone());
    let waiter = DeploymentWaiter::new(FakeClock::new());
    (fake, client, waiter)
}

#[tokio::test]
async fn returns_on_first_poll_without_the_deployment() {
    let (fake, client, waiter) = setup();
    fake.respond_json(Method::Get, "/deployments", json!([{"id": "d-1"}]))
        .respond_json(Method::Get, "/deployments", json!([{"id": "d-2"}]))
        .respond_json(Method::Get, "/deployments", json!([{"id": "d-1"}]));

    waiter
        .wait(&client, &DeploymentId::new("d-1"), Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(fake.count(Method::Get, "/deployments"), 2);
    assert_eq!(waiter.clock().sleeps(), 1);
}

#[tokio::test]
async fn empty_deployment_list_finishes_immediately() {
    let (fake, client, waiter) = setup();
    fake.respond(Method::Get, "/deployments", Response::empty(200));

    waiter
        .wait(&client, &DeploymentId::new("d-1"), Duration::from_secs(30))
        .await
        .unwrap();

    assert_eq!(fake.count(Method::Get, "/deployments"), 1);
    assert_eq!(waiter.clock().sleeps(), 0);
}

#[tokio::test]
async fn times_out_when_deployment_stays_active() {
    let (fake, client, waiter) = setup();
    fake.respond_json(Method::Get, "/deployments", json!([{"id": "d-1"}]));

    let err = waiter
        .wait(&client, &DeploymentId::new("d-1"), Duration::from_secs(3))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ReconcileErrorKind::DeploymentTimeout);
    assert_eq!(err.to_string(), "timeout waiting for deployment d-1 after 3s");
    // Polls at 0s, 1s, 2s and once more after the sleep that crosses 3s.
    assert_eq!(fake.count(Method::Get, "/deployments"), 4);
    assert_eq!(waiter.clock().elapsed(), Duration::from_secs(3));
}

#[tokio::test]
async fn expired_deadline_still_polls_once() {
    let (fake, client, waiter) = setup();
    fake.respond_json(Method::Get, "/deployments", json!([]));

    waiter
        .wait(&client, &DeploymentId::new("d-1"), Duration::ZERO)
        .await
        .unwrap();
    assert_eq!(fake.count(Method::Get, "/deployments"), 1);
}

#[tokio::test]
async fn poll_errors_are_retried() {
    let (fake, client, waiter) = setup();
    fake.respond(
        Method::Get,
        "/deployments",
        Response::error(503, "leader election in progress"),
    )
    .fail(Method::Get, "/deployments")
    .respond_json(Method::Get, "/deployments", json!({"unexpected": true}))
    .respond_json(Method::Get, "/deployments", json!([]));

    waiter
        .wait(&client, &DeploymentId::new("d-1"), Duration::from_secs(60))
        .await
        .unwrap();

    assert_eq!(fake.count(Method::Get, "/deployments"), 4);
    assert_eq!(waiter.clock().sleeps(), 3);
}

#[tokio::test]
async fn persistent_poll_errors_end_in_timeout() {
    let (fake, client, waiter) = setup();
    fake.fail(Method::Get, "/deployments");

    let err = waiter
        .wait(&client, &DeploymentId::new("d-7"), Duration::from_secs(2))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ReconcileErrorKind::DeploymentTimeout);
    assert_eq!(fake.count(Method::Get, "/deployments"), 3);
}

#[tokio::test]
async fn unbounded_timeout_keeps_polling_without_deadline() {
    let (fake, client, waiter) = setup();
    fake.respond_json(Method::Get, "/deployments", json!([{"id": "d-1"}]))
        .respond_json(Method::Get, "/deployments", json!([{"id": "d-1"}]))
        .respond_json(Method::Get, "/deployments", json!([]));

    waiter
        .wait(&client, &DeploymentId::new("d-1"), Duration::from_secs(u64::MAX))
        .await
        .unwrap();

    assert_eq!(fake.count(Method::Get, "/deployments"), 3);
    assert_eq!(waiter.clock().sleeps(), 2);
}
