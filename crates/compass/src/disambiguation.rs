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

use crate::slots::{
    SlotName, SlotSet, SlotStore, DISAMBIGUATION_CANDIDATES, DISAMBIGUATION_TARGET_SLOT,
    FOLLOWUP_QUESTION,
};
use serde::{Deserialize, Serialize};

// At most one slot is under disambiguation at a time; `target_slot` names it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DisambiguationState {
    pub target_slot: Option<SlotName>,
    pub candidate_names: Vec<String>,
    pub followup_question: Option<String>,
}

impl DisambiguationState {
    pub fn cleared() -> Self {
        Self::default()
    }

    pub fn pending(
        slot: SlotName,
        candidate_names: Vec<String>,
        followup_question: impl Into<String>,
    ) -> Self {
        Self {
            target_slot: Some(slot),
            candidate_names,
            followup_question: Some(followup_question.into()),
        }
    }

    pub fn is_active_for(&self, slot: SlotName) -> bool {
        self.target_slot == Some(slot) && !self.candidate_names.is_empty()
    }

    pub fn restriction_for(&self, slot: SlotName) -> Option<&[String]> {
        self.is_active_for(slot)
            .then_some(self.candidate_names.as_slice())
    }

    pub fn from_store<S: SlotStore + ?Sized>(store: &S) -> Self {
        Self {
            target_slot: store
                .get_text(DISAMBIGUATION_TARGET_SLOT)
                .and_then(|key| SlotName::from_key(&key)),
            candidate_names: store.get_list(DISAMBIGUATION_CANDIDATES),
            followup_question: store.get_text(FOLLOWUP_QUESTION),
        }
    }

    pub fn to_events(&self) -> Vec<SlotSet> {
        vec![
            match &self.followup_question {
                Some(question) => SlotSet::text(FOLLOWUP_QUESTION, question.clone()),
                None => SlotSet::unset(FOLLOWUP_QUESTION),
            },
            SlotSet::list(DISAMBIGUATION_CANDIDATES, self.candidate_names.clone()),
            match self.target_slot {
                Some(slot) => SlotSet::text(DISAMBIGUATION_TARGET_SLOT, slot.key()),
                None => SlotSet::unset(DISAMBIGUATION_TARGET_SLOT),
            },
        ]
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::slots::InMemorySlotStore;

    fn names(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_active_requires_target_and_candidates() {
        let state = DisambiguationState::pending(
            SlotName::Origin,
            names(&["Huygens", "Elinor Ostrom"]),
            "Is it near the parking garage?",
        );
        assert!(state.is_active_for(SlotName::Origin));
        assert!(!state.is_active_for(SlotName::Destination));
        assert_eq!(
            state.restriction_for(SlotName::Origin),
            Some(&names(&["Huygens", "Elinor Ostrom"])[..])
        );
        assert_eq!(state.restriction_for(SlotName::Destination), None);

        let empty = DisambiguationState::pending(SlotName::Origin, Vec::new(), "");
        assert!(!empty.is_active_for(SlotName::Origin));
        assert!(!DisambiguationState::cleared().is_active_for(SlotName::Origin));
    }

    #[test]
    fn test_store_round_trip() {
        let state = DisambiguationState::pending(
            SlotName::Destination,
            names(&["Huygens", "Spinoza"]),
            "Does it have a green facade?",
        );
        let mut store = InMemorySlotStore::new();
        store.apply(&state.to_events());
        assert_eq!(DisambiguationState::from_store(&store), state);

        store.apply(&DisambiguationState::cleared().to_events());
        assert_eq!(
            DisambiguationState::from_store(&store),
            DisambiguationState::cleared()
        );
    }

    #[test]
    fn test_unknown_target_key_reads_as_none() {
        let mut store = InMemorySlotStore::new();
        store.apply(&[
            SlotSet::text(DISAMBIGUATION_TARGET_SLOT, "parking_spot"),
            SlotSet::list(DISAMBIGUATION_CANDIDATES, names(&["Huygens"])),
        ]);
        let state = DisambiguationState::from_store(&store);
        assert_eq!(state.target_slot, None);
        assert!(!state.is_active_for(SlotName::Origin));
    }
}
