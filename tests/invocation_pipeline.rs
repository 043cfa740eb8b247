//! HTTP-level pipeline tests against a mock upstream.
//!
//! The unit tests beside the pipeline cover sequencing with mock transports;
//! these exercise the real transports over the wire: auth header probing,
//! URL derivation, fall-through, and the no-credentials fast path.

use serde_json::json;
use wiremock::matchers::{body_partial_json, header, header_exists, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

use taskforge::llm::{AuthStyle, LlmConfig, ModelPipeline, RawTransport};

fn config(
    api_key: Option<&str>,
    base_url: Option<&str>,
    auth_style: Option<AuthStyle>,
) -> LlmConfig {
    LlmConfig {
        api_key: api_key.map(str::to_string),
        base_url: base_url.map(str::to_string),
        model: "demo-model".to_string(),
        auth_style,
    }
}

fn completion(text: &str) -> serde_json::Value {
    json!({ "choices": [{ "message": { "role": "assistant", "content": text } }] })
}

fn raw_only() -> ModelPipeline {
    ModelPipeline::with_transports(vec![Box::new(RawTransport)])
}

#[tokio::test]
async fn typed_client_carries_the_fixed_wire_contract() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "demo-model",
            "temperature": 0.2,
            "messages": [
                { "role": "system", "content": "Reply briefly and helpfully." },
                { "role": "user", "content": "ping" },
            ],
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("typed reply")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = ModelPipeline::new()
        .invoke_with(&config(Some("sk-test"), Some(&server.uri()), None), "ping")
        .await;

    assert_eq!(outcome.text, "typed reply");
    assert!(!outcome.degraded);
}

#[tokio::test]
async fn raw_probes_bearer_then_x_api_key_until_success() {
    let server = MockServer::start().await;
    // Bearer probe is rejected; the x-api-key probe lands.
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401).set_body_string("bad auth style"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("x-api-key", "sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("raw reply")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = raw_only()
        .invoke_with(&config(Some("sk-test"), Some(&server.uri()), None), "ping")
        .await;

    assert_eq!(outcome.text, "raw reply");
    assert!(!outcome.degraded);
}

#[tokio::test]
async fn fixed_x_api_key_style_sends_exactly_one_probe() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(header_exists("authorization"))
        .respond_with(ResponseTemplate::new(401))
        .expect(0)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("x-api-key", "sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("keyed reply")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = raw_only()
        .invoke_with(
            &config(
                Some("sk-test"),
                Some(&server.uri()),
                Some(AuthStyle::XApiKey),
            ),
            "ping",
        )
        .await;

    assert_eq!(outcome.text, "keyed reply");
    assert!(!outcome.degraded);
}

#[tokio::test]
async fn versioned_base_is_not_double_versioned() {
    let server = MockServer::start().await;
    let base = format!("{}/openai/v1", server.uri());
    Mock::given(method("POST"))
        .and(path("/openai/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("routed")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = raw_only()
        .invoke_with(&config(Some("sk-test"), Some(&base), None), "ping")
        .await;

    assert_eq!(outcome.text, "routed");
}

#[tokio::test]
async fn missing_api_key_sends_no_traffic_at_all() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("unreachable")))
        .expect(0)
        .mount(&server)
        .await;

    let outcome = ModelPipeline::new()
        .invoke_with(&config(None, Some(&server.uri()), None), "ping")
        .await;

    assert!(outcome.degraded);
    assert_eq!(outcome.text, "[FAKE-MODEL:demo-model] Echo: ping");
}

#[tokio::test]
async fn typed_rejection_falls_through_to_raw() {
    let server = MockServer::start().await;
    // The typed client posts to {base}/chat/completions and gets a 401;
    // the raw transport derives {base}/v1/chat/completions and recovers.
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_string("key rejected"))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("authorization", "Bearer sk-test"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("rescued by raw")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = ModelPipeline::new()
        .invoke_with(&config(Some("sk-test"), Some(&server.uri()), None), "ping")
        .await;

    assert_eq!(outcome.text, "rescued by raw");
    assert!(!outcome.degraded);
}

#[tokio::test]
async fn total_outage_lands_on_the_degraded_echo() {
    let server = MockServer::start().await;
    // One typed attempt plus two raw probes, all refused.
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
        .expect(3)
        .mount(&server)
        .await;

    let outcome = ModelPipeline::new()
        .invoke_with(
            &config(Some("sk-test"), Some(&server.uri()), None),
            "  Build a todo app  ",
        )
        .await;

    assert!(outcome.degraded);
    assert_eq!(outcome.text, "[FAKE-MODEL:demo-model] Echo: Build a todo app");
}

#[tokio::test]
async fn deterministic_upstream_means_identical_outcomes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("stable")))
        .expect(2)
        .mount(&server)
        .await;

    let pipeline = ModelPipeline::new();
    let config = config(Some("sk-test"), Some(&server.uri()), None);

    let first = pipeline.invoke_with(&config, "ping").await;
    let second = pipeline.invoke_with(&config, "ping").await;

    assert_eq!(first, second);
    assert!(!first.degraded);
}

#[tokio::test]
async fn empty_completion_content_is_still_a_success() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion("")))
        .expect(1)
        .mount(&server)
        .await;

    let outcome = ModelPipeline::new()
        .invoke_with(&config(Some("sk-test"), Some(&server.uri()), None), "ping")
        .await;

    assert_eq!(outcome.text, "");
    assert!(!outcome.degraded);
}
