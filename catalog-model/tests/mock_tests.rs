use catalog_model::{ChatModel, ChatRequest, ChatRole, MockChatModel, ModelError};

#[tokio::test]
async fn reply_is_returned_and_request_recorded() {
    let model = MockChatModel::with_reply("Try the Desk Lamp.");

    let response = model.complete(ChatRequest::user("lamp?").with_temperature(0.7)).await.unwrap();

    assert_eq!(response.content, "Try the Desk Lamp.");
    assert_eq!(model.call_count(), 1);
    let requests = model.requests();
    assert_eq!(requests[0].messages[0].role, ChatRole::User);
    assert_eq!(requests[0].messages[0].content, "lamp?");
    assert_eq!(requests[0].temperature, Some(0.7));
}

#[tokio::test]
async fn failure_keeps_message_verbatim() {
    let model = MockChatModel::failing("rate limit exceeded");

    let err = model.complete(ChatRequest::user("x")).await.unwrap_err();

    assert!(matches!(err, ModelError::Mock(_)));
    assert_eq!(err.to_string(), "rate limit exceeded");
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn echo_returns_last_message() {
    let model = MockChatModel::echo();
    let response = model.complete(ChatRequest::user("ping")).await.unwrap();
    assert_eq!(response.content, "ping");
}
