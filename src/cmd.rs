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

pub mod new;
pub mod preview;
pub mod review;
pub mod status;

use std::fs::read_to_string;
use std::io::Read;
use std::io::stdin;
use std::path::PathBuf;

use recollect::CardState;
use recollect::Clock;
use recollect::Parameters;
use recollect::Scheduler;
use recollect::SystemClock;
use recollect::Timestamp;
use recollect::error::Fallible;
use recollect::error::fail;

/// Where a command reads its card, parameters, and time from.
pub struct Input {
    pub card: Option<PathBuf>,
    pub config: Option<PathBuf>,
    pub now: Option<i64>,
}

impl Input {
    pub fn card(&self) -> Fallible<CardState> {
        let source: String = match &self.card {
            Some(path) => {
                if !path.exists() {
                    return fail(format!("card file {} does not exist.", path.display()));
                }
                read_to_string(path)?
            }
            None => {
                let mut buffer = String::new();
                stdin().read_to_string(&mut buffer)?;
                buffer
            }
        };
        let card: CardState = serde_json::from_str(&source)?;
        Ok(card)
    }

    pub fn scheduler(&self) -> Fallible<Scheduler> {
        let params: Parameters = match &self.config {
            Some(path) => Parameters::load(path)?,
            None => Parameters::default(),
        };
        Ok(Scheduler::new(params))
    }

    pub fn now(&self) -> Fallible<Timestamp> {
        match self.now {
            Some(millis) => Timestamp::from_millis(millis),
            None => Ok(SystemClock.now()),
        }
    }
}
