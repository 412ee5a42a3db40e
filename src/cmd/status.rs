// Copyright 2025 Fernando Borretti
//
// Licensed under the Apache License, Version 2.0 (the "License");
// you may not use this file except in compliance with the License.
// You may obtain a copy of the License at
//
//     http://www.apache.org/licenses/LICENSE-2.0
//
// Unless required by applicable law or agreed to in writing, software
// distributed under the License is distributed on an "AS IS" BASIS,
// WITHOUT WARRANTIES OR CONDITIONS OF ANY KIND, either express or implied.
// See the License for the specific language governing permissions and
// limitations under the License.

use recollect::Status;
use recollect::Timestamp;
use recollect::error::Fallible;
use serde::Serialize;

use crate::cmd::Input;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct StatusReport {
    status: Status,
    is_due: bool,
    /// Percentage, rounded.
    retrievability: u8,
    due: Option<Timestamp>,
}

pub fn card_status(input: &Input) -> Fallible<String> {
    let card = input.card()?;
    let now = input.now()?;
    let retrievability = (card.current_retrievability(now) * 100.0).round() as u8;
    let report = StatusReport {
        status: card.status(),
        is_due: card.is_due(now),
        retrievability,
        due: card.due,
    };
    let json = serde_json::to_string_pretty(&report)?;
    Ok(json)
}
