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

use crate::disambiguation::DisambiguationState;
use crate::judgment::Judgment;
use crate::normalizer::Normalizer;
use crate::slots::{SlotName, SlotSet, SlotStore, SlotValue};
use serde::Serialize;
use tracing::{debug, info};

// Shared by both building slots. Kept high so a wrong building is never
// silently accepted.
pub const CONFIDENCE_THRESHOLD: f64 = 0.8;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SlotValidation {
    pub slot: SlotName,
    pub value: Option<String>,
    pub state: DisambiguationState,
}

impl SlotValidation {
    pub fn accepted(slot: SlotName, value: impl Into<String>) -> Self {
        Self {
            slot,
            value: Some(value.into()),
            state: DisambiguationState::cleared(),
        }
    }

    pub fn is_accepted(&self) -> bool {
        self.value.is_some()
    }

    pub fn followup_question(&self) -> Option<&str> {
        self.state.followup_question.as_deref()
    }

    pub fn events(&self) -> Vec<SlotSet> {
        let mut events = vec![SlotSet::new(
            self.slot.key(),
            self.value.clone().map(SlotValue::Text),
        )];
        events.extend(self.state.to_events());
        events
    }
}

pub fn decide(slot: SlotName, judgment: &Judgment) -> SlotValidation {
    if let Some(label) = judgment.label() {
        if judgment.confidence >= CONFIDENCE_THRESHOLD {
            return SlotValidation::accepted(slot, label);
        }
    }

    SlotValidation {
        slot,
        value: None,
        state: DisambiguationState::pending(
            slot,
            judgment.candidate_names(),
            judgment.followup_question.clone(),
        ),
    }
}

#[derive(Debug, Clone)]
pub struct SlotValidator {
    normalizer: Normalizer,
}

impl SlotValidator {
    pub fn new(normalizer: Normalizer) -> Self {
        Self { normalizer }
    }

    pub fn normalizer(&self) -> &Normalizer {
        &self.normalizer
    }

    pub async fn validate(
        &self,
        slot: SlotName,
        raw: Option<&str>,
        state: &DisambiguationState,
    ) -> SlotValidation {
        let restriction = state.restriction_for(slot);
        debug!(
            %slot,
            disambiguating = restriction.is_some(),
            "Validating building slot"
        );

        let judgment = self.normalizer.normalize(raw, restriction).await;
        let validation = decide(slot, &judgment);

        if let Some(value) = &validation.value {
            info!(%slot, value = %value, confidence = judgment.confidence, "Building slot accepted");
        } else {
            info!(
                %slot,
                confidence = judgment.confidence,
                candidates = ?validation.state.candidate_names,
                "Building slot needs disambiguation"
            );
        }
        validation
    }

    pub async fn validate_in<S: SlotStore + ?Sized>(
        &self,
        slot: SlotName,
        raw: Option<&str>,
        store: &S,
    ) -> SlotValidation {
        let state = DisambiguationState::from_store(store);
        self.validate(slot, raw, &state).await
    }
}
