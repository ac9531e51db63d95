//! Reply behaviour of the responder and the session transcript.

use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;
use catalog_assistant::{
    ChatSession, ERROR_PREFIX, NO_RESULTS_MESSAGE, ReplyKind, Responder, Role,
    UNAVAILABLE_MESSAGE, format_context,
};
use catalog_model::{ChatModel, MockChatModel};
use catalog_rag::document::{Chunk, Metadata};
use catalog_rag::{
    InitFailure, InitFailureKind, RagError, RetrievalState, Retriever, SearchResult,
};

struct FixedRetriever {
    results: Vec<SearchResult>,
    calls: AtomicUsize,
}

impl FixedRetriever {
    fn new(texts: &[&str]) -> Self {
        let results = texts
            .iter()
            .enumerate()
            .map(|(i, text)| SearchResult {
                chunk: Chunk {
                    id: i.to_string(),
                    text: text.to_string(),
                    embedding: vec![1.0],
                    metadata: Metadata::new(),
                    document_id: i.to_string(),
                },
                score: 1.0 - i as f32 * 0.1,
            })
            .collect();
        Self { results, calls: AtomicUsize::new(0) }
    }
}

#[async_trait]
impl Retriever for FixedRetriever {
    async fn retrieve(&self, _query: &str) -> catalog_rag::Result<Vec<SearchResult>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.results.clone())
    }
}

struct FailingRetriever;

fn retrieval_error() -> RagError {
    RagError::EmbeddingError { provider: "Ollama".into(), message: "connection refused".into() }
}

#[async_trait]
impl Retriever for FailingRetriever {
    async fn retrieve(&self, _query: &str) -> catalog_rag::Result<Vec<SearchResult>> {
        Err(retrieval_error())
    }
}

fn unavailable() -> RetrievalState {
    RetrievalState::Unavailable(InitFailure {
        kind: InitFailureKind::Embedding,
        message: "Embedding error (Ollama): request failed".into(),
    })
}

#[tokio::test]
async fn unavailable_retrieval_returns_fixed_message_without_calls() {
    let model = Arc::new(MockChatModel::with_reply("should not be used"));
    let responder = Responder::new(model.clone());

    let reply = responder.reply(&unavailable(), "any lamps?").await;

    assert_eq!(reply.kind, ReplyKind::Unavailable);
    assert_eq!(reply.text, UNAVAILABLE_MESSAGE);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn empty_retrieval_returns_no_results_message() {
    let model = Arc::new(MockChatModel::with_reply("unused"));
    let responder = Responder::new(model.clone());
    let state = RetrievalState::Ready(Arc::new(FixedRetriever::new(&[])));

    let text = responder.respond(&state, "unicorn saddles").await;

    assert_eq!(text, NO_RESULTS_MESSAGE);
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn completion_is_returned_verbatim() {
    let model = Arc::new(MockChatModel::with_reply("  The Desk Lamp costs 24.5 USD.\n"));
    let responder = Responder::new(model.clone());
    let state = RetrievalState::Ready(Arc::new(FixedRetriever::new(&["Product: Desk Lamp"])));

    let reply = responder.reply(&state, "lamp price?").await;

    assert_eq!(reply.kind, ReplyKind::Completion);
    assert_eq!(reply.text, "  The Desk Lamp costs 24.5 USD.\n");
    assert_eq!(model.call_count(), 1);
}

#[tokio::test]
async fn prompt_contains_numbered_context_and_raw_query() {
    let model = Arc::new(MockChatModel::echo());
    let responder = Responder::new(model.clone());
    let retriever = Arc::new(FixedRetriever::new(&["Product: Kettle", "Product: Toaster"]));
    let state = RetrievalState::Ready(retriever.clone());

    let prompt = responder.respond(&state, "something for {breakfast}?").await;

    assert!(prompt.contains("Available Products:\nProduct 1:\nProduct: Kettle\n\nProduct 2:\nProduct: Toaster\n"));
    assert!(prompt.contains("User Question: something for {breakfast}?"));
    assert_eq!(retriever.calls.load(Ordering::SeqCst), 1);

    let requests = model.requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].messages.len(), 1, "no prior turns are sent");
}

#[tokio::test]
async fn retrieval_error_is_reported_inline() {
    let model = Arc::new(MockChatModel::with_reply("unused"));
    let responder = Responder::new(model.clone());
    let state = RetrievalState::Ready(Arc::new(FailingRetriever));

    let reply = responder.reply(&state, "boots").await;

    assert_eq!(reply.kind, ReplyKind::Error);
    assert_eq!(reply.text, format!("Error retrieving products: {}", retrieval_error()));
    assert_eq!(model.call_count(), 0);
}

#[tokio::test]
async fn model_error_is_reported_inline() {
    let responder = Responder::new(Arc::new(MockChatModel::failing("rate limit exceeded")));
    let state = RetrievalState::Ready(Arc::new(FixedRetriever::new(&["Product: Kettle"])));

    let text = responder.respond(&state, "kettle").await;

    assert_eq!(text, "Error retrieving products: rate limit exceeded");
    assert!(text.starts_with(ERROR_PREFIX));
}

#[tokio::test]
async fn temperature_override_is_sent() {
    let model = Arc::new(MockChatModel::with_reply("ok"));
    let responder = Responder::new(model.clone()).with_temperature(0.2);
    let state = RetrievalState::Ready(Arc::new(FixedRetriever::new(&["Product: Kettle"])));

    responder.respond(&state, "kettle").await;

    assert_eq!(model.requests()[0].temperature, Some(0.2));
}

#[test]
fn context_ranks_start_at_one() {
    let retriever = FixedRetriever::new(&["a", "b", "c"]);
    assert_eq!(format_context(&retriever.results), "Product 1:\na\n\nProduct 2:\nb\n\nProduct 3:\nc");
}

#[tokio::test]
async fn each_turn_appends_one_user_and_one_assistant_entry() {
    let model: Arc<dyn ChatModel> = Arc::new(MockChatModel::failing("upstream 503"));
    let mut session = ChatSession::new(
        Responder::new(model),
        RetrievalState::Ready(Arc::new(FixedRetriever::new(&["Product: Kettle"]))),
    );

    let reply = session.submit("kettle?").await.clone();
    assert_eq!(reply.role, Role::Assistant);
    assert_eq!(reply.content, "Error retrieving products: upstream 503");

    let turns = session.conversation().turns();
    assert_eq!(turns.len(), 2);
    assert_eq!((turns[0].role, turns[0].content.as_str()), (Role::User, "kettle?"));
    assert_eq!(turns[1].role, Role::Assistant);

    session.submit("anything else?").await;
    assert_eq!(session.conversation().len(), 4);
}

#[tokio::test]
async fn session_keeps_going_when_unavailable() {
    let mut session =
        ChatSession::new(Responder::new(Arc::new(MockChatModel::echo())), unavailable());

    for question in ["one", "two", "three"] {
        let reply = session.submit(question).await;
        assert_eq!(reply.content, UNAVAILABLE_MESSAGE);
    }
    assert_eq!(session.conversation().len(), 6);
    let roles: Vec<Role> = session.conversation().turns().iter().map(|t| t.role).collect();
    assert_eq!(roles, [Role::User, Role::Assistant].repeat(3));
}
