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
use crate::slots::{SlotName, SlotStore};
use crate::validator::{SlotValidation, SlotValidator};
use serde::Serialize;
use tracing::debug;

pub const FORM_NAME: &str = "validate_route_form";

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "step", rename_all = "snake_case")]
pub enum FormStep {
    Ask { slot: SlotName, question: String },
    Complete { origin: String, destination: String },
}

#[derive(Debug, Clone)]
pub struct RouteForm {
    validator: SlotValidator,
}

impl RouteForm {
    pub fn new(validator: SlotValidator) -> Self {
        Self { validator }
    }

    pub fn name(&self) -> &'static str {
        FORM_NAME
    }

    pub fn required_slots(&self) -> [SlotName; 2] {
        [SlotName::Origin, SlotName::Destination]
    }

    pub async fn submit<S: SlotStore + ?Sized>(
        &self,
        slot: SlotName,
        raw: Option<&str>,
        store: &mut S,
    ) -> SlotValidation {
        let validation = self.validator.validate_in(slot, raw, &*store).await;
        store.apply(&validation.events());
        validation
    }

    pub fn next_step<S: SlotStore + ?Sized>(&self, store: &S) -> FormStep {
        let filled = |slot: SlotName| {
            store
                .get_text(slot.key())
                .filter(|value| !value.trim().is_empty())
        };

        let (origin, destination) = match (filled(SlotName::Origin), filled(SlotName::Destination))
        {
            (Some(origin), Some(destination)) => (origin, destination),
            (None, _) => return self.ask(SlotName::Origin, store),
            (Some(_), None) => return self.ask(SlotName::Destination, store),
        };

        FormStep::Complete {
            origin,
            destination,
        }
    }

    fn ask<S: SlotStore + ?Sized>(&self, slot: SlotName, store: &S) -> FormStep {
        let state = DisambiguationState::from_store(store);
        let question = state
            .followup_question
            .filter(|question| state.target_slot == Some(slot) && !question.trim().is_empty())
            .unwrap_or_else(|| default_question(slot).to_string());
        debug!(form = FORM_NAME, %slot, "Requesting building slot");
        FormStep::Ask { slot, question }
    }
}

pub fn default_question(slot: SlotName) -> &'static str {
    match slot {
        SlotName::Origin => "Where are you right now? A building name or a landmark you see is fine.",
        SlotName::Destination => "Which building do you want to go to?",
    }
}
