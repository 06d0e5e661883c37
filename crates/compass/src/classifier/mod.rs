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

pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use llm_contracts::LLMResult;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub use openai::OpenAIClassifier;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassificationRequest {
    pub raw: String,
    pub top_k: u32,
    pub restrict_to: Vec<String>,
    pub output_schema: OutputSchema,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputSchema {
    pub normalized: String,
    pub confidence: String,
    pub candidates: String,
    pub followup_question: String,
}

impl Default for OutputSchema {
    fn default() -> Self {
        Self {
            normalized: "string | 'UNKNOWN'".to_string(),
            confidence: "float [0..1]".to_string(),
            candidates: "list of {name:str, confidence:float, reason: str}".to_string(),
            followup_question: "string".to_string(),
        }
    }
}

impl ClassificationRequest {
    pub fn new(raw: impl Into<String>, top_k: u32, restrict_to: Vec<String>) -> Self {
        Self {
            raw: raw.into(),
            top_k,
            restrict_to,
            output_schema: OutputSchema::default(),
        }
    }

    pub fn is_restricted(&self) -> bool {
        !self.restrict_to.is_empty()
    }
}

// Everything is optional on the wire; defaults are applied when the
// response is turned into a judgment.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ClassificationResponse {
    #[serde(default)]
    pub normalized: Option<String>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub candidates: Option<Vec<WireCandidate>>,
    #[serde(default)]
    pub followup_question: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WireCandidate {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub confidence: Option<Value>,
    #[serde(default)]
    pub reason: Option<String>,
}

#[async_trait]
pub trait BuildingClassifier: Send + Sync {
    async fn classify(&self, request: &ClassificationRequest)
        -> LLMResult<ClassificationResponse>;

    fn provider_name(&self) -> &'static str;
}
