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

use crate::classifier::ClassificationResponse;
use serde::{Deserialize, Serialize};
use serde_json::Value;

pub const UNKNOWN_LABEL: &str = "UNKNOWN";
pub const LANDMARK_PROMPT: &str = "What building name or clear landmark do you see?";
pub const REPHRASE_PROMPT: &str = "I am sorry, I did not understand. Could you describe again?";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Candidate {
    pub name: Option<String>,
    pub confidence: f64,
    pub reason: String,
}

// Produced fresh for every normalization attempt and consumed by the slot
// validator in the same turn.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Judgment {
    pub normalized: Option<String>,
    pub confidence: f64,
    pub candidates: Vec<Candidate>,
    pub followup_question: String,
}

impl Judgment {
    pub fn empty_input() -> Self {
        Self {
            normalized: Some(String::new()),
            confidence: 0.0,
            candidates: Vec::new(),
            followup_question: LANDMARK_PROMPT.to_string(),
        }
    }

    pub fn oracle_failure() -> Self {
        Self {
            normalized: None,
            confidence: 0.0,
            candidates: Vec::new(),
            followup_question: REPHRASE_PROMPT.to_string(),
        }
    }

    pub fn from_response(response: ClassificationResponse) -> Self {
        let candidates = response
            .candidates
            .unwrap_or_default()
            .into_iter()
            .map(|candidate| Candidate {
                name: candidate.name,
                confidence: coerce_confidence(candidate.confidence.as_ref()),
                reason: candidate.reason.unwrap_or_default(),
            })
            .collect();

        let followup_question = response
            .followup_question
            .filter(|question| !question.trim().is_empty())
            .unwrap_or_else(|| REPHRASE_PROMPT.to_string());

        Self {
            normalized: response.normalized,
            confidence: coerce_confidence(response.confidence.as_ref()),
            candidates,
            followup_question,
        }
    }

    // Blank labels never count; the label itself is kept as returned.
    pub fn label(&self) -> Option<&str> {
        self.normalized
            .as_deref()
            .filter(|label| !label.trim().is_empty())
    }

    pub fn candidate_names(&self) -> Vec<String> {
        self.candidates
            .iter()
            .filter_map(|candidate| candidate.name.clone())
            .collect()
    }
}

pub(crate) fn coerce_confidence(value: Option<&Value>) -> f64 {
    let raw = match value {
        Some(Value::Number(number)) => number.as_f64().unwrap_or(0.0),
        Some(Value::String(text)) => text.trim().parse::<f64>().unwrap_or(0.0),
        _ => 0.0,
    };
    if raw.is_nan() {
        0.0
    } else {
        raw.clamp(0.0, 1.0)
    }
}
