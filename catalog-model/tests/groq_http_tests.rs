//! `GroqClient` against a local OpenAI-compatible server.

use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use axum::routing::post;
use axum::{Json, Router};
use catalog_model::{ChatModel, ChatRequest, GroqClient, GroqConfig, ModelError};
use serde_json::{Value, json};

#[derive(Clone, Default)]
struct Recorded {
    authorization: Arc<Mutex<Vec<String>>>,
    bodies: Arc<Mutex<Vec<Value>>>,
}

async fn serve(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

fn record(recorded: &Recorded, headers: &HeaderMap, body: Value) {
    let auth = headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    recorded.authorization.lock().unwrap().push(auth);
    recorded.bodies.lock().unwrap().push(body);
}

async fn answer(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Json<Value> {
    record(&recorded, &headers, body);
    Json(json!({
        "model": "llama-3.1-8b-instant",
        "choices": [{ "message": { "role": "assistant", "content": "Try the Desk Lamp." } }]
    }))
}

async fn rate_limited(
    State(recorded): State<Recorded>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> (StatusCode, Json<Value>) {
    record(&recorded, &headers, body);
    let error = json!({ "error": { "message": "Rate limit reached", "type": "tokens" } });
    (StatusCode::TOO_MANY_REQUESTS, Json(error))
}

async fn client_for(router: Router) -> GroqClient {
    let base = serve(router).await;
    GroqClient::new(GroqConfig::new("gsk-test").with_base_url(base)).unwrap()
}

#[tokio::test]
async fn completion_is_returned_and_request_is_authenticated() {
    let recorded = Recorded::default();
    let router =
        Router::new().route("/chat/completions", post(answer)).with_state(recorded.clone());
    let client = client_for(router).await;

    let response = client.complete(ChatRequest::user("Any desk lamps?")).await.unwrap();

    assert_eq!(response.content, "Try the Desk Lamp.");
    assert_eq!(response.model, "llama-3.1-8b-instant");
    assert_eq!(recorded.authorization.lock().unwrap().as_slice(), ["Bearer gsk-test"]);

    let bodies = recorded.bodies.lock().unwrap();
    assert_eq!(bodies[0]["stream"], json!(false));
    assert_eq!(bodies[0]["messages"][0]["role"], json!("user"));
    assert_eq!(bodies[0]["messages"][0]["content"], json!("Any desk lamps?"));
}

#[tokio::test]
async fn error_status_becomes_api_error_with_message() {
    let recorded = Recorded::default();
    let router =
        Router::new().route("/chat/completions", post(rate_limited)).with_state(recorded.clone());
    let client = client_for(router).await;

    let err = client.complete(ChatRequest::user("hello")).await.unwrap_err();

    match err {
        ModelError::Api { status, message } => {
            assert_eq!(status, 429);
            assert_eq!(message, "Rate limit reached");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[tokio::test]
async fn unreachable_server_is_a_request_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let config = GroqConfig::new("gsk-test").with_base_url(format!("http://{addr}"));
    let err = GroqClient::new(config).unwrap().complete(ChatRequest::user("hi")).await.unwrap_err();

    assert!(matches!(err, ModelError::Request(_)), "{err}");
}
