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

use recollect::Grade;
use recollect::error::Fallible;
use serde::Serialize;

use crate::cmd::Input;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct PreviewEntry {
    grade: Grade,
    interval: String,
}

pub fn preview_card(input: &Input) -> Fallible<String> {
    let scheduler = input.scheduler()?;
    let card = input.card()?;
    let now = input.now()?;
    let entries: Vec<PreviewEntry> = scheduler
        .preview_all(&card, now)
        .into_iter()
        .map(|(grade, interval)| PreviewEntry {
            grade,
            interval: interval.to_string(),
        })
        .collect();
    let json = serde_json::to_string_pretty(&entries)?;
    Ok(json)
}
