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

use async_trait::async_trait;
use llm_contracts::{
    LLMError, LLMResult, ProviderConfig, ProviderRequest, ProviderResponse, ResponseFormat, Usage,
};
use reqwest::{Client, StatusCode};
use serde_json::{json, Value};
use std::time::Duration;
use tracing::{debug, info, warn};

use super::{prompt, BuildingClassifier, ClassificationRequest, ClassificationResponse};

#[derive(Debug, Clone)]
pub struct OpenAIClassifier {
    client: Client,
    api_key: String,
    endpoint: String,
    model: String,
    temperature: f32,
    max_tokens: Option<u32>,
    timeout: Duration,
    max_attempts: u32,
}

impl OpenAIClassifier {
    pub fn new(api_key: impl Into<String>, config: &ProviderConfig) -> LLMResult<Self> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LLMError::Configuration(
                "OpenAI API key must not be empty".to_string(),
            ));
        }

        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| LLMError::Configuration(format!("Failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key,
            endpoint: config.endpoint.clone(),
            model: config.model.clone(),
            temperature: config.temperature,
            max_tokens: config.max_tokens,
            timeout: config.timeout(),
            max_attempts: config.max_attempts.max(1),
        })
    }

    fn build_provider_request(&self, request: &ClassificationRequest) -> LLMResult<ProviderRequest> {
        let mut provider_request =
            ProviderRequest::new(self.model.clone(), prompt::build_messages(request)?)
                .with_temperature(self.temperature)
                .with_response_format(ResponseFormat::JsonObject);
        if let Some(max_tokens) = self.max_tokens {
            provider_request = provider_request.with_max_tokens(max_tokens);
        }
        Ok(provider_request)
    }

    fn build_openai_payload(&self, request: &ProviderRequest) -> Value {
        let mut payload = json!({
            "model": request.model,
            "messages": request.messages.iter().map(|msg| {
                json!({
                    "role": msg.role,
                    "content": msg.content
                })
            }).collect::<Vec<_>>()
        });

        if let Some(max_tokens) = request.max_tokens {
            payload["max_tokens"] = json!(max_tokens);
        }
        if let Some(temperature) = request.temperature {
            payload["temperature"] = json!(temperature);
        }
        if let Some(format) = request.response_format {
            payload["response_format"] = json!(format);
        }

        payload
    }

    fn parse_openai_response(
        &self,
        response_data: Value,
        model: String,
    ) -> LLMResult<ProviderResponse> {
        let content = response_data["choices"][0]["message"]["content"]
            .as_str()
            .ok_or_else(|| {
                LLMError::Provider("Failed to extract content from OpenAI response".to_string())
            })?;

        let usage = response_data
            .get("usage")
            .map(Usage::from_value)
            .unwrap_or_default();

        let finish_reason = response_data["choices"][0]["finish_reason"]
            .as_str()
            .map(|s| s.to_string());

        Ok(ProviderResponse {
            content: content.to_string(),
            model,
            usage,
            finish_reason,
            raw_response: response_data,
        })
    }

    async fn send_once(&self, payload: &Value) -> LLMResult<Value> {
        let response = tokio::time::timeout(
            self.timeout,
            self.client
                .post(&self.endpoint)
                .header("Authorization", format!("Bearer {}", self.api_key))
                .header("Content-Type", "application/json")
                .json(payload)
                .send(),
        )
        .await
        .map_err(|_| LLMError::Timeout)?
        .map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout
            } else {
                LLMError::Network(format!("Request failed: {e}"))
            }
        })?;

        let status = response.status();
        info!(%status, provider = "openai", "Received response from LLM API");

        if !status.is_success() {
            let body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown error".to_string());
            return Err(status_error(status, body));
        }

        response.json().await.map_err(|e| {
            if e.is_timeout() {
                LLMError::Timeout
            } else {
                LLMError::Serialisation(format!("Failed to parse response: {e}"))
            }
        })
    }

    async fn execute_request_with_retry(&self, payload: &Value) -> LLMResult<Value> {
        let mut last_error = None;

        for attempt in 0..self.max_attempts {
            match self.send_once(payload).await {
                Ok(data) => return Ok(data),
                Err(err) => {
                    let retry = err.is_retryable() && attempt + 1 < self.max_attempts;
                    warn!(attempt, error = %err, retry, "OpenAI request attempt failed");
                    last_error = Some(err);
                    if !retry {
                        break;
                    }
                    let wait_time = Duration::from_millis(250 * 2_u64.pow(attempt.min(3)));
                    tokio::time::sleep(wait_time).await;
                }
            }
        }

        Err(last_error.unwrap_or_else(|| LLMError::Internal("Unknown error".to_string())))
    }
}

fn status_error(status: StatusCode, body: String) -> LLMError {
    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
            LLMError::Authentication(format!("OpenAI API error {status}: {body}"))
        }
        StatusCode::TOO_MANY_REQUESTS => LLMError::RateLimit,
        status if status.is_client_error() => {
            LLMError::Validation(format!("OpenAI API error {status}: {body}"))
        }
        status => LLMError::Provider(format!("OpenAI API error {status}: {body}")),
    }
}

fn parse_classification(content: &str) -> LLMResult<ClassificationResponse> {
    let value: Value = serde_json::from_str(content.trim()).map_err(|e| {
        LLMError::Serialisation(format!("Classification content is not JSON: {e}"))
    })?;
    if !value.is_object() {
        return Err(LLMError::Validation(
            "Classification content must be a JSON object".to_string(),
        ));
    }
    serde_json::from_value(value).map_err(|e| {
        LLMError::Validation(format!("Classification content does not match schema: {e}"))
    })
}

#[async_trait]
impl BuildingClassifier for OpenAIClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> LLMResult<ClassificationResponse> {
        let provider_request = self.build_provider_request(request)?;
        let payload = self.build_openai_payload(&provider_request);
        debug!(payload = ?payload, "Sending classification request to OpenAI API");

        let response_data = self.execute_request_with_retry(&payload).await?;
        let response = self.parse_openai_response(response_data, provider_request.model)?;
        debug!(
            usage = ?response.usage,
            finish_reason = ?response.finish_reason,
            "Classification response received"
        );

        parse_classification(&response.content)
    }

    fn provider_name(&self) -> &'static str {
        "openai"
    }
}
