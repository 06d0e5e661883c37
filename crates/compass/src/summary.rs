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

use crate::slots::{SlotName, SlotStore};

pub const ACTION_NAME: &str = "action_route_summary";

// Route computation is not implemented; the action only reports what it
// would route between.
#[derive(Debug, Clone, Copy, Default)]
pub struct RouteSummary;

impl RouteSummary {
    pub fn name(&self) -> &'static str {
        ACTION_NAME
    }

    pub fn run<S: SlotStore + ?Sized>(&self, store: &S) -> Option<String> {
        let origin = store.get_text(SlotName::Origin.key())?;
        let destination = store.get_text(SlotName::Destination.key())?;
        Some(format!(
            "Computing route from '{origin}' to '{destination}' …"
        ))
    }
}
