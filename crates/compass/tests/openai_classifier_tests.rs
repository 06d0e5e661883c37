// SPDX-License-Identifier: AGPL-3.0-only
// Copyright (C) 2024 Jonathan Lee
// This program is free software: you can redistribute it and/or modify
// it under the terms of the GNU Affero General Public License version 3
// as published by the Free Software Foundation.
// This program is distributed in the hope that it will be useful,
// but WITHOUT ANY WARRANTY; without even the implied warranty of
// MERCHANTABILITY or FITNESS FOR A PARTICULAR PURPOSE.
// See the GNU Affero General Public License for more details.
// You should have received a copy of the GNU Affero General Public License
// along with this program. If not, see https://www.gnu.org/licenses/.

use compass::{
    BuildingClassifier, ClassificationRequest, CompassConfig, Normalizer, OpenAIClassifier,
    SlotName, SlotValidator, DisambiguationState, REPHRASE_PROMPT,
};
use llm_contracts::{LLMError, ProviderConfig};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use wiremock::matchers::{body_partial_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn completion(content: Value) -> Value {
    json!({
        "id": "chatcmpl-test",
        "object": "chat.completion",
        "model": "gpt-4o-mini",
        "choices": [{
            "index": 0,
            "message": { "role": "assistant", "content": content.to_string() },
            "finish_reason": "stop"
        }],
        "usage": { "prompt_tokens": 180, "completion_tokens": 40, "total_tokens": 220 }
    })
}

fn provider(server: &MockServer) -> ProviderConfig {
    ProviderConfig::default()
        .with_endpoint(format!("{}/v1/chat/completions", server.uri()))
        .with_timeout_seconds(2)
}

#[tokio::test]
async fn test_classify_against_chat_completions() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "response_format": { "type": "json_object" }
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!({
            "normalized": "Elinor Ostromgebouw",
            "confidence": 0.92,
            "candidates": [{ "name": "Elinor Ostromgebouw", "confidence": 0.92, "reason": "EOS" }],
            "followup_question": ""
        }))))
        .expect(1)
        .mount(&server)
        .await;

    let classifier = OpenAIClassifier::new("sk-test", &provider(&server)).unwrap();
    let request = ClassificationRequest::new(
        "EOS",
        3,
        vec!["Huygens".to_string(), "Elinor Ostrom".to_string()],
    );
    let response = classifier.classify(&request).await.unwrap();
    assert_eq!(response.normalized.as_deref(), Some("Elinor Ostromgebouw"));

    let received = server.received_requests().await.unwrap();
    let body: Value = received[0].body_json().unwrap();
    assert_eq!(body["messages"][0]["role"], "system");
    let payload: Value =
        serde_json::from_str(body["messages"][1]["content"].as_str().unwrap()).unwrap();
    assert_eq!(payload["raw"], "EOS");
    assert_eq!(payload["restrict_to"], json!(["Huygens", "Elinor Ostrom"]));
}

#[tokio::test]
async fn test_unauthorised_is_not_retried() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_string("invalid api key"))
        .expect(1)
        .mount(&server)
        .await;

    let classifier =
        OpenAIClassifier::new("sk-test", &provider(&server).with_max_attempts(3)).unwrap();
    let result = classifier
        .classify(&ClassificationRequest::new("EOS", 3, Vec::new()))
        .await;
    assert!(matches!(result, Err(LLMError::Authentication(_))));
}

#[tokio::test]
async fn test_server_errors_are_retried_up_to_limit() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(503))
        .expect(2)
        .mount(&server)
        .await;

    let classifier =
        OpenAIClassifier::new("sk-test", &provider(&server).with_max_attempts(2)).unwrap();
    let result = classifier
        .classify(&ClassificationRequest::new("EOS", 3, Vec::new()))
        .await;
    assert!(matches!(result, Err(LLMError::Provider(_))));
}

#[tokio::test]
async fn test_slow_oracle_times_out() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_body_json(completion(json!({ "normalized": "Huygens", "confidence": 0.9 })))
                .set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let classifier =
        OpenAIClassifier::new("sk-test", &provider(&server).with_timeout_seconds(1)).unwrap();
    let result = classifier
        .classify(&ClassificationRequest::new("EOS", 3, Vec::new()))
        .await;
    assert!(matches!(result, Err(LLMError::Timeout)));
}

#[tokio::test]
async fn test_non_json_content_becomes_rephrase_judgment() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "choices": [{ "message": { "role": "assistant", "content": "Probably the Huygens building!" } }]
        })))
        .mount(&server)
        .await;

    let classifier = OpenAIClassifier::new("sk-test", &provider(&server)).unwrap();
    let validator = SlotValidator::new(Normalizer::new(Arc::new(classifier)));
    let validation = validator
        .validate(SlotName::Origin, Some("EOS"), &DisambiguationState::cleared())
        .await;

    assert_eq!(validation.value, None);
    assert_eq!(validation.followup_question(), Some(REPHRASE_PROMPT));
    assert!(validation.state.candidate_names.is_empty());
}

#[tokio::test]
async fn test_normalizer_from_config_uses_endpoint() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/v1/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(completion(json!({
            "normalized": "Spinozagebouw",
            "confidence": 0.88,
            "candidates": [],
            "followup_question": ""
        }))))
        .mount(&server)
        .await;

    let mut config = CompassConfig::with_api_key("sk-test");
    config.provider = provider(&server);
    let normalizer = Normalizer::from_config(&config).unwrap();
    let judgment = normalizer.normalize(Some("Spinoza"), None).await;
    assert_eq!(judgment.normalized.as_deref(), Some("Spinozagebouw"));
    assert_eq!(judgment.confidence, 0.88);
}

#[test]
fn test_normalizer_requires_key() {
    let config = CompassConfig::with_api_key("");
    assert!(matches!(
        Normalizer::from_config(&config),
        Err(compass::CompassError::MissingApiKey { .. })
    ));
}
