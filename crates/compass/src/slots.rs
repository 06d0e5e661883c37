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

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

pub const FOLLOWUP_QUESTION: &str = "followup_question";
pub const DISAMBIGUATION_CANDIDATES: &str = "disambiguation_candidates";
pub const DISAMBIGUATION_TARGET_SLOT: &str = "disambiguation_target_slot";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum SlotName {
    #[serde(rename = "origin_building")]
    Origin,
    #[serde(rename = "destination_building")]
    Destination,
}

impl SlotName {
    pub const ALL: [SlotName; 2] = [SlotName::Origin, SlotName::Destination];

    pub fn key(&self) -> &'static str {
        match self {
            SlotName::Origin => "origin_building",
            SlotName::Destination => "destination_building",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|slot| slot.key() == key)
    }
}

impl fmt::Display for SlotName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl FromStr for SlotName {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "origin" | "origin_building" => Ok(SlotName::Origin),
            "destination" | "destination_building" => Ok(SlotName::Destination),
            other => Err(format!("unknown building slot '{other}'")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SlotValue {
    Text(String),
    List(Vec<String>),
}

impl SlotValue {
    pub fn as_text(&self) -> Option<&str> {
        match self {
            SlotValue::Text(text) => Some(text.as_str()),
            SlotValue::List(_) => None,
        }
    }

    pub fn as_list(&self) -> Option<&[String]> {
        match self {
            SlotValue::List(items) => Some(items.as_slice()),
            SlotValue::Text(_) => None,
        }
    }
}

// `value: None` unsets the slot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSet {
    pub key: String,
    pub value: Option<SlotValue>,
}

impl SlotSet {
    pub fn new(key: impl Into<String>, value: Option<SlotValue>) -> Self {
        Self {
            key: key.into(),
            value,
        }
    }

    pub fn text(key: impl Into<String>, text: impl Into<String>) -> Self {
        Self::new(key, Some(SlotValue::Text(text.into())))
    }

    pub fn list(key: impl Into<String>, items: Vec<String>) -> Self {
        Self::new(key, Some(SlotValue::List(items)))
    }

    pub fn unset(key: impl Into<String>) -> Self {
        Self::new(key, None)
    }
}

pub trait SlotStore {
    fn get_slot(&self, key: &str) -> Option<SlotValue>;

    fn set_slot(&mut self, key: &str, value: Option<SlotValue>);

    fn apply(&mut self, events: &[SlotSet]) {
        for event in events {
            self.set_slot(&event.key, event.value.clone());
        }
    }

    fn get_text(&self, key: &str) -> Option<String> {
        match self.get_slot(key) {
            Some(SlotValue::Text(text)) => Some(text),
            _ => None,
        }
    }

    fn get_list(&self, key: &str) -> Vec<String> {
        match self.get_slot(key) {
            Some(SlotValue::List(items)) => items,
            _ => Vec::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InMemorySlotStore {
    slots: BTreeMap<String, SlotValue>,
}

impl InMemorySlotStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    pub fn clear(&mut self) {
        self.slots.clear();
    }
}

impl SlotStore for InMemorySlotStore {
    fn get_slot(&self, key: &str) -> Option<SlotValue> {
        self.slots.get(key).cloned()
    }

    fn set_slot(&mut self, key: &str, value: Option<SlotValue>) {
        match value {
            Some(value) => {
                self.slots.insert(key.to_string(), value);
            }
            None => {
                self.slots.remove(key);
            }
        }
    }
}
