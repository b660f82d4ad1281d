// ABOUTME: Integration tests for the reqwest transport against a mock HTTP server.
// ABOUTME: Checks headers, authentication, body handling and error statuses.

use serde_json::json;
use std::time::Duration;
use stride::marathon::{Credentials, HttpTransport, MarathonClient, Method, Transport};
use stride::types::AppId;
use wiremock::matchers::{basic_auth, body_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn transport(server: &MockServer, credentials: Option<Credentials>) -> HttpTransport {
    HttpTransport::new(
        &server.uri(),
        credentials,
        Duration::from_secs(2),
        Duration::from_secs(5),
    )
    .unwrap()
}

#[tokio::test]
async fn sends_json_content_type_and_basic_auth() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/apps/web"))
        .and(header("content-type", "application/json"))
        .and(basic_auth("admin", "s3cret"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"app": {"id": "/web"}})))
        .expect(1)
        .mount(&server)
        .await;

    let credentials = Credentials {
        username: "admin".to_string(),
        password: Some("s3cret".to_string()),
    };
    let response = transport(&server, Some(credentials))
        .send(Method::Get, "/apps/web", None)
        .await
        .unwrap();

    assert_eq!(response.status, 200);
    assert_eq!(response.body["app"]["id"], "/web");
}

#[tokio::test]
async fn no_credentials_means_no_authorization_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&server)
        .await;

    transport(&server, None)
        .send(Method::Get, "/deployments", None)
        .await
        .unwrap();

    let requests = server.received_requests().await.unwrap();
    assert_eq!(requests.len(), 1);
    assert!(requests[0].headers.get("authorization").is_none());
}

#[tokio::test]
async fn empty_success_body_becomes_empty_object() {
    let server = MockServer::start().await;
    Mock::given(method("DELETE"))
        .and(path("/v2/apps/web/tasks"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&server)
        .await;

    let response = transport(&server, None)
        .send(Method::Delete, "/apps/web/tasks", None)
        .await
        .unwrap();

    assert_eq!(response.status, 204);
    assert_eq!(response.body, json!({}));
}

#[tokio::test]
async fn error_status_is_a_response_not_a_transport_error() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/web"))
        .respond_with(
            ResponseTemplate::new(409)
                .set_body_json(json!({"message": "App is locked by one or more deployments."})),
        )
        .mount(&server)
        .await;

    let response = transport(&server, None)
        .send(Method::Put, "/apps/web?force=false", Some(&json!({"id": "/web"})))
        .await
        .unwrap();

    assert!(!response.is_success());
    assert_eq!(response.status, 409);
    assert_eq!(response.message, "App is locked by one or more deployments.");
}

#[tokio::test]
async fn invalid_json_is_a_decode_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/v2/deployments"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>proxy</html>"))
        .mount(&server)
        .await;

    let err = transport(&server, None)
        .send(Method::Get, "/deployments", None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("invalid JSON"));
}

#[tokio::test]
async fn client_update_sends_force_query_and_body() {
    let server = MockServer::start().await;
    Mock::given(method("PUT"))
        .and(path("/v2/apps/prod/web"))
        .and(query_param("force", "true"))
        .and(body_json(json!({"id": "/prod/web", "instances": 3})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"deploymentId": "d-1"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = MarathonClient::new(transport(&server, None));
    let id = AppId::new("/prod/web").unwrap();
    let payload = json!({"id": "/prod/web", "instances": 3});
    let result = client
        .update_app(&id, payload.as_object().unwrap(), true)
        .await
        .unwrap();

    assert_eq!(result.deployment_id().unwrap().as_str(), "d-1");
}

#[tokio::test]
async fn client_create_accepts_201() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v2/apps"))
        .respond_with(
            ResponseTemplate::new(201)
                .set_body_json(json!({"id": "/web", "deployments": [{"id": "d-new"}]})),
        )
        .mount(&server)
        .await;

    let client = MarathonClient::new(transport(&server, None));
    let payload = json!({"id": "/web"});
    let result = client.create_app(payload.as_object().unwrap()).await.unwrap();
    assert_eq!(result.first_deployment().unwrap().as_str(), "d-new");
}

#[tokio::test]
async fn unreachable_server_is_a_transport_error() {
    let transport = HttpTransport::new(
        "http://127.0.0.1:9",
        None,
        Duration::from_millis(200),
        Duration::from_millis(500),
    )
    .unwrap();

    let err = transport
        .send(Method::Get, "/deployments", None)
        .await
        .unwrap_err();
    assert!(err.to_string().contains("http://127.0.0.1:9/v2/deployments"));
}
