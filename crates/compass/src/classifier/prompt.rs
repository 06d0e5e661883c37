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

use super::ClassificationRequest;
use llm_contracts::{LLMResult, Message};

pub const SYSTEM_PROMPT: &str = concat!(
    "You are an expert of the Radboud University in Nijmegen, the Netherlands helping lost students. ",
    "The point is to normalize their vague campus descriptions to a controlled list of building names. ",
    "Always answer in strict JSON. If unsure, return 'UNKNOWN'. ",
    "Users may use abbreviations or shorter variants, e.g. EOS or Elinor Ostrom instead of Elinor Ostromgebouw. ",
    "The user may also give a vague description at the Radboud University such as 'green building with flat roof'. ",
    "Provide top candidates with confidences (0..1) and one discriminating follow-up question. ",
    "If a 'restrict_to' list is provided, you MUST limit candidates and the final normalized choice to that subset."
);

pub fn build_messages(request: &ClassificationRequest) -> LLMResult<Vec<Message>> {
    let payload = serde_json::to_string(request)?;
    Ok(vec![Message::system(SYSTEM_PROMPT), Message::user(payload)])
}
