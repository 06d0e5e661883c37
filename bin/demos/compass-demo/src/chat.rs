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

use anyhow::Result;
use compass::{FormStep, InMemorySlotStore, RouteForm, RouteSummary};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

pub async fn run(form: RouteForm) -> Result<()> {
    let mut store = InMemorySlotStore::new();
    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        let slot = match form.next_step(&store) {
            FormStep::Ask { slot, question } => {
                println!("{question}");
                slot
            }
            FormStep::Complete { .. } => break,
        };

        let Some(line) = lines.next_line().await? else {
            return Ok(());
        };
        let answer = line.trim();
        if matches!(answer, "quit" | "exit") {
            return Ok(());
        }

        let validation = form.submit(slot, Some(answer), &mut store).await;
        debug!(?validation, "Turn processed");
    }

    if let Some(summary) = RouteSummary.run(&store) {
        println!("{summary}");
    }
    Ok(())
}
