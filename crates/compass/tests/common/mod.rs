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

#![allow(dead_code)]

use async_trait::async_trait;
use compass::{BuildingClassifier, ClassificationRequest, ClassificationResponse, Normalizer};
use llm_contracts::{LLMError, LLMResult};
use serde_json::Value;
use std::sync::{Arc, Mutex};

type Reply = Box<dyn Fn(&ClassificationRequest) -> LLMResult<ClassificationResponse> + Send + Sync>;

pub struct StubClassifier {
    reply: Reply,
    requests: Mutex<Vec<ClassificationRequest>>,
}

impl StubClassifier {
    pub fn with<F>(reply: F) -> Arc<Self>
    where
        F: Fn(&ClassificationRequest) -> LLMResult<ClassificationResponse> + Send + Sync + 'static,
    {
        Arc::new(Self {
            reply: Box::new(reply),
            requests: Mutex::new(Vec::new()),
        })
    }

    pub fn responding(body: Value) -> Arc<Self> {
        Self::with(move |_| Ok(serde_json::from_value(body.clone()).unwrap()))
    }

    pub fn failing() -> Arc<Self> {
        Self::with(|_| Err(LLMError::Timeout))
    }

    pub fn requests(&self) -> Vec<ClassificationRequest> {
        self.requests.lock().unwrap().clone()
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl BuildingClassifier for StubClassifier {
    async fn classify(
        &self,
        request: &ClassificationRequest,
    ) -> LLMResult<ClassificationResponse> {
        self.requests.lock().unwrap().push(request.clone());
        (self.reply)(request)
    }

    fn provider_name(&self) -> &'static str {
        "stub"
    }
}

pub fn normalizer(stub: &Arc<StubClassifier>) -> Normalizer {
    Normalizer::new(stub.clone())
}

pub fn names(items: &[&str]) -> Vec<String> {
    items.iter().map(|s| s.to_string()).collect()
}
