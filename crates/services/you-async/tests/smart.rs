use serde_json::json;
use you_async::types::smart::SmartRequest;
use you_async::{Client, YouConfig};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_client(server: &MockServer) -> Client<YouConfig> {
    let config = YouConfig::new()
        .with_api_base(server.uri())
        .with_api_key("test-api-key");
    Client::with_config(config).unwrap()
}

#[tokio::test]
async fn smart_returns_body_unmodified() {
    let server = MockServer::start().await;
    let body = json!({
        "answer": "Test answer",
        "search_results": [{"url": "https://example.com", "name": "Example", "snippet": "..."}]
    });

    Mock::given(method("POST"))
        .and(path("/smart"))
        .and(header("x-api-key", "test-api-key"))
        .respond_with(ResponseTemplate::new(200).set_body_json(body.clone()))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp = client.smart().create(SmartRequest::new("test")).await.unwrap();

    assert_eq!(resp, body);
}

#[tokio::test]
async fn smart_omits_absent_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/smart"))
        .and(body_json(json!({"query": "test"})))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    client.smart().create(SmartRequest::new("test")).await.unwrap();

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert_eq!(received[0].body, br#"{"query":"test"}"#);
}

#[tokio::test]
async fn smart_sends_all_params() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/smart"))
        .and(body_json(json!({
            "query": "test",
            "chat_id": "abc",
            "instructions": "Respond in bullet points"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "ok"})))
        .expect(1)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let req = SmartRequest::new("test")
        .with_chat_id("abc")
        .with_instructions("Respond in bullet points");
    let resp = client.smart().create(req).await.unwrap();

    assert_eq!(resp["answer"], "ok");
}

#[tokio::test]
async fn smart_decodes_typed_response() {
    #[derive(serde::Deserialize)]
    struct Answer {
        answer: String,
    }

    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/smart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "42", "extra": true})))
        .mount(&server)
        .await;

    let client = test_client(&server);
    let resp: Answer = client
        .smart()
        .create_as(SmartRequest::new("meaning of life"))
        .await
        .unwrap();

    assert_eq!(resp.answer, "42");
}

#[tokio::test]
async fn repeated_calls_are_identical() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/smart"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"answer": "same"})))
        .expect(2)
        .mount(&server)
        .await;

    let client = test_client(&server);
    let before = format!("{client:?}");

    let first = client.smart().create(SmartRequest::new("q")).await.unwrap();
    let second = client.smart().create(SmartRequest::new("q")).await.unwrap();

    assert_eq!(first, second);
    assert_eq!(format!("{client:?}"), before);
}
