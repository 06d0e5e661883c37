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

use crate::classifier::{BuildingClassifier, ClassificationRequest, OpenAIClassifier};
use crate::config::CompassConfig;
use crate::error::CompassResult;
use crate::judgment::Judgment;
use std::fmt;
use std::sync::Arc;
use tracing::{debug, warn};
use uuid::Uuid;

pub const DEFAULT_TOP_K: u32 = 3;

#[derive(Clone)]
pub struct Normalizer {
    classifier: Arc<dyn BuildingClassifier>,
    top_k: u32,
}

impl fmt::Debug for Normalizer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Normalizer")
            .field("provider", &self.classifier.provider_name())
            .field("top_k", &self.top_k)
            .finish()
    }
}

impl Normalizer {
    pub fn new(classifier: Arc<dyn BuildingClassifier>) -> Self {
        Self {
            classifier,
            top_k: DEFAULT_TOP_K,
        }
    }

    pub fn with_top_k(mut self, top_k: u32) -> Self {
        self.top_k = top_k.max(1);
        self
    }

    pub fn from_config(config: &CompassConfig) -> CompassResult<Self> {
        config.validate()?;
        let classifier = OpenAIClassifier::new(config.api_key.clone(), &config.provider)?;
        Ok(Self::new(Arc::new(classifier)).with_top_k(config.normalizer.top_k))
    }

    pub fn top_k(&self) -> u32 {
        self.top_k
    }

    // Total: every oracle failure becomes a rephrase judgment.
    pub async fn normalize(&self, raw: Option<&str>, restrict_to: Option<&[String]>) -> Judgment {
        let raw = match raw {
            Some(raw) if !raw.trim().is_empty() => raw,
            _ => {
                debug!("Empty building description, asking for a landmark");
                return Judgment::empty_input();
            }
        };

        let request = ClassificationRequest::new(
            raw,
            self.top_k,
            restrict_to.map(<[String]>::to_vec).unwrap_or_default(),
        );
        let request_id = Uuid::new_v4();
        debug!(
            %request_id,
            raw,
            restricted = request.is_restricted(),
            restrict_to = ?request.restrict_to,
            "Normalizing building description"
        );

        match self.classifier.classify(&request).await {
            Ok(response) => {
                let judgment = Judgment::from_response(response);
                debug!(
                    %request_id,
                    normalized = ?judgment.normalized,
                    confidence = judgment.confidence,
                    candidates = judgment.candidates.len(),
                    "Building description normalized"
                );
                judgment
            }
            Err(err) => {
                warn!(
                    %request_id,
                    provider = self.classifier.provider_name(),
                    error = %err,
                    "Building classification failed, asking the user to rephrase"
                );
                Judgment::oracle_failure()
            }
        }
    }
}
