//! Integration tests for `RestClient` over `HyperClient` using wiremock.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use assert2::{check, let_assert};
use jsonrest::{
    BaseUrl, Body, Config, Error, HttpClient, HyperClient, Method, NoContent, Request,
    RestClient, TransportError,
};
use serde::{Deserialize, Serialize};
use wiremock::{
    Mock, MockServer, ResponseTemplate,
    matchers::{body_json, body_string, header, method, path, query_param},
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct Cheese {
    id: u64,
    name: String,
}

#[derive(Debug, Serialize)]
struct NewCheese {
    name: String,
}

#[derive(Debug, PartialEq, Eq, Deserialize)]
struct ApiMessage {
    message: String,
}

fn config(server: &MockServer, method: Method, path: &str) -> Config {
    Config::new(method, Arc::new(BaseUrl::new(server.uri())), path)
}

#[tokio::test]
async fn test_get_json() {
    let mock_server = MockServer::start().await;

    let brie = Cheese {
        id: 1,
        name: "brie".to_string(),
    };

    Mock::given(method("GET"))
        .and(path("/cheese/1"))
        .and(header("Accept", "application/json"))
        .respond_with(ResponseTemplate::new(200).set_body_json(&brie))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let config =
        config(&mock_server, Method::Get, "/cheese/1").with_header("Accept", "application/json");

    let cheese: Cheese = client
        .fetch::<_, NoContent>(&config, Body::Empty)
        .await
        .expect("cheese");

    assert_eq!(cheese, brie);
}

#[tokio::test]
async fn test_post_json_with_query() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cheese"))
        .and(query_param("age", "5"))
        .and(header("Content-Type", "application/json"))
        .and(body_json(serde_json::json!({ "name": "comté" })))
        .respond_with(ResponseTemplate::new(201).set_body_json(Cheese {
            id: 42,
            name: "comté".to_string(),
        }))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let config = config(&mock_server, Method::Post, "/cheese").with_param("age", "5");

    let created: Cheese = client
        .fetch_json::<_, _, NoContent>(
            &config,
            &NewCheese {
                name: "comté".to_string(),
            },
        )
        .await
        .expect("created");

    assert_eq!(created.id, 42);
}

#[tokio::test]
async fn test_base_url_trailing_slash() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/cheese/7"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let base = format!("{}/", mock_server.uri());
    let config = Config::new(Method::Delete, Arc::new(BaseUrl::new(base)), "/cheese/7");

    client
        .send::<NoContent>(&config, Body::Empty)
        .await
        .expect("deleted");
}

#[tokio::test]
async fn test_query_value_with_plus_is_escaped() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/events"))
        .and(query_param("tz", "+02:00"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let config = config(&mock_server, Method::Get, "/events").with_param("tz", "+02:00");

    let events: Vec<serde_json::Value> = client
        .fetch::<_, NoContent>(&config, Body::Empty)
        .await
        .expect("events");

    assert!(events.is_empty());
}

#[tokio::test]
async fn test_api_error_is_decoded() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/cheese/404"))
        .respond_with(
            ResponseTemplate::new(404).set_body_json(serde_json::json!({ "message": "not found" })),
        )
        .mount(&mock_server)
        .await;

    let client = RestClient::default();

    let result = client
        .fetch::<Cheese, ApiMessage>(&config(&mock_server, Method::Get, "/cheese/404"), Body::Empty)
        .await;

    let_assert!(Err(Error::Api { status, error }) = result);
    check!(status == 404);
    check!(error.message == "not found");
}

#[tokio::test]
async fn test_non_json_error_is_undecodable() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/boom"))
        .respond_with(ResponseTemplate::new(500).set_body_string("not json"))
        .mount(&mock_server)
        .await;

    let client = RestClient::default();

    let result = client
        .send::<ApiMessage>(&config(&mock_server, Method::Get, "/boom"), Body::Empty)
        .await;

    let_assert!(Err(err) = result);
    check!(err.status() == Some(500));
    check!(err.is_server_error());
    let_assert!(Error::ApiUndecodable { failure, .. } = err);
    check!(failure.is_structural());
}

#[tokio::test]
async fn test_redirect_is_not_followed() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/old"))
        .respond_with(ResponseTemplate::new(302).insert_header("Location", "/new"))
        .mount(&mock_server)
        .await;

    let client = RestClient::default();

    let result = client
        .send::<NoContent>(&config(&mock_server, Method::Get, "/old"), Body::Empty)
        .await;

    let_assert!(Err(Error::Api { status: 302, .. }) = result);
}

#[tokio::test]
async fn test_timeout_has_no_status() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let config = config(&mock_server, Method::Get, "/slow").with_timeout(Duration::from_millis(50));

    let result = client.send::<NoContent>(&config, Body::Empty).await;

    let_assert!(Err(err) = result);
    check!(err.is_timeout());
    check!(err.status().is_none());
}

#[tokio::test]
async fn test_client_timeout_caps_request_timeout() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_millis(500)))
        .mount(&mock_server)
        .await;

    let transport = HyperClient::builder()
        .timeout(Duration::from_millis(50))
        .build();
    let client = RestClient::new(transport);
    let config = config(&mock_server, Method::Get, "/slow").with_timeout(Duration::from_secs(30));

    let result = client.send::<NoContent>(&config, Body::Empty).await;

    let_assert!(Err(err) = result);
    check!(err.is_timeout());
}

#[tokio::test]
async fn test_connection_refused() {
    let addr = {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
        listener.local_addr().expect("addr")
    };

    let client = RestClient::default();
    let config = Config::new(
        Method::Get,
        Arc::new(BaseUrl::new(format!("http://{addr}"))),
        "/",
    );

    let result = client.send::<NoContent>(&config, Body::Empty).await;

    let_assert!(Err(Error::General { status: None, source }) = result);
    check!(let TransportError::Connection(_) = source);
}

#[tokio::test]
async fn test_success_headers_are_flattened() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/page"))
        .respond_with(
            ResponseTemplate::new(200)
                .append_header("X-Page", "1")
                .append_header("X-Page", "2")
                .insert_header("X-Empty", "")
                .set_body_string("ok"),
        )
        .mount(&mock_server)
        .await;

    let client = RestClient::default();

    let success = client
        .execute::<NoContent>(&config(&mock_server, Method::Get, "/page"), Body::Empty)
        .await
        .expect("success");

    check!(success.status() == 200);
    check!(success.header("x-page") == Some("2"));
    check!(success.header("X-Empty") == Some(""));
    check!(success.text() == Ok("ok"));
}

#[tokio::test]
async fn test_raw_bodies() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/notes/1"))
        .and(header("Content-Type", "text/plain; charset=utf-8"))
        .and(body_string("hello"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    Mock::given(method("PUT"))
        .and(path("/blobs/1"))
        .and(header("Content-Type", "application/octet-stream"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();

    client
        .send::<NoContent>(
            &config(&mock_server, Method::Put, "/notes/1"),
            Body::text("hello"),
        )
        .await
        .expect("text");

    client
        .send::<NoContent>(
            &config(&mock_server, Method::Put, "/blobs/1"),
            Body::raw(vec![0_u8, 1, 2]),
        )
        .await
        .expect("raw");
}

#[tokio::test]
async fn test_stale_content_length_is_replaced() {
    let mock_server = MockServer::start().await;

    Mock::given(method("PUT"))
        .and(path("/notes/2"))
        .and(header("Content-Length", "5"))
        .and(body_string("hello"))
        .respond_with(ResponseTemplate::new(204))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let config =
        config(&mock_server, Method::Put, "/notes/2").with_header("Content-Length", "3");

    client
        .send::<NoContent>(&config, Body::text("hello"))
        .await
        .expect("sent");
}

#[tokio::test]
async fn test_long_request_timeout_is_not_capped_by_default() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/report"))
        .respond_with(ResponseTemplate::new(204))
        .mount(&mock_server)
        .await;

    let transport = HyperClient::new();
    let applied = transport.config().effective_timeout(Duration::from_secs(60));
    check!(applied == Duration::from_secs(60));

    let client = RestClient::new(transport);
    let config =
        config(&mock_server, Method::Get, "/report").with_timeout(Duration::from_secs(60));

    client
        .send::<NoContent>(&config, Body::Empty)
        .await
        .expect("report");
}

#[tokio::test]
async fn test_sink_receives_every_attempt() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/cheese"))
        .respond_with(
            ResponseTemplate::new(409).set_body_json(serde_json::json!({ "message": "exists" })),
        )
        .mount(&mock_server)
        .await;

    let messages = Arc::new(Mutex::new(Vec::new()));
    let recorded = Arc::clone(&messages);
    let client = RestClient::default().with_sink(move |message: &str| {
        recorded.lock().expect("lock").push(message.to_string());
    });

    let result = client
        .send_json::<_, ApiMessage>(
            &config(&mock_server, Method::Post, "/cheese"),
            &NewCheese {
                name: "brie".to_string(),
            },
        )
        .await;
    let_assert!(Err(Error::Api { status: 409, .. }) = result);

    let messages = messages.lock().expect("lock").clone();
    let_assert!([message] = messages.as_slice());
    let message = message.replace(&mock_server.uri(), "{server}");
    insta::assert_snapshot!(message, @r#"
    POST {server}/cheese
    input: {
      "name": "brie"
    }
    output: {
      "message": "exists"
    }
    "#);
}

#[tokio::test]
async fn test_serialization_failure_never_calls_server() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&mock_server)
        .await;

    let client = RestClient::default();
    let mut input = std::collections::HashMap::new();
    input.insert(vec![1_u8], "non-string keys are not JSON");

    let result = client
        .send_json::<_, NoContent>(&config(&mock_server, Method::Post, "/cheese"), &input)
        .await;

    let_assert!(Err(Error::Serialization(_)) = result);
}

#[tokio::test]
async fn test_hyper_client_directly() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/ping"))
        .respond_with(ResponseTemplate::new(503).set_body_string("down"))
        .mount(&mock_server)
        .await;

    let client = HyperClient::new();
    let request = Request::builder(Method::Get, format!("{}/ping", mock_server.uri())).build();

    let response = client
        .execute(request, Duration::from_secs(5))
        .await
        .expect("response");

    check!(response.status() == 503);
    check!(!response.is_success());
    check!(response.body().as_ref() == b"down");
}
