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

pub mod classifier;
pub mod config;
pub mod disambiguation;
pub mod error;
pub mod form;
pub mod judgment;
pub mod normalizer;
pub mod slots;
pub mod summary;
pub mod validator;

pub use classifier::{
    BuildingClassifier, ClassificationRequest, ClassificationResponse, OpenAIClassifier,
    WireCandidate,
};
pub use config::{CompassConfig, NormalizerSettings, API_KEY_VARS};
pub use disambiguation::DisambiguationState;
pub use error::{CompassError, CompassResult};
pub use form::{FormStep, RouteForm};
pub use judgment::{Candidate, Judgment, LANDMARK_PROMPT, REPHRASE_PROMPT, UNKNOWN_LABEL};
pub use normalizer::Normalizer;
pub use slots::{InMemorySlotStore, SlotName, SlotSet, SlotStore, SlotValue};
pub use summary::RouteSummary;
pub use validator::{SlotValidation, SlotValidator, CONFIDENCE_THRESHOLD};
