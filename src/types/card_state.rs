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

use serde::Deserialize;
use serde::Serialize;

use crate::fsrs::Difficulty;
use crate::fsrs::R;
use crate::fsrs::Stability;
use crate::fsrs::retrievability;
use crate::types::status::Status;
use crate::types::step::Step;
use crate::types::timestamp::Timestamp;

/// Cards whose scheduled interval reaches this many days are mature.
pub const MATURE_INTERVAL: u32 = 21;

/// The scheduling state of a single card. This is the only thing the
/// scheduler reads and writes; storing it is the caller's business.
#[derive(Clone, PartialEq, Debug, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CardState {
    /// Days for retrievability to decay to 90%. Zero before the first review.
    pub stability: Stability,
    /// In [1, 10] after the first review.
    pub difficulty: Difficulty,
    /// The interval chosen at the last scheduling decision. Zero while
    /// learning.
    pub scheduled_days: u32,
    /// Successful (non-Again) reviews.
    pub reps: u32,
    /// Times the card was graded Again.
    pub lapses: u32,
    pub step: Step,
    /// When the card should next be shown. `None` for a new card.
    pub due: Option<Timestamp>,
    pub last_review: Option<Timestamp>,
}

impl CardState {
    /// A card that has never been reviewed.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_new(&self) -> bool {
        self.due.is_none()
    }

    pub fn is_learning(&self) -> bool {
        self.step.is_learning()
    }

    pub fn is_mature(&self) -> bool {
        self.step == Step::Graduated && self.scheduled_days >= MATURE_INTERVAL
    }

    /// New cards are never due: they are introduced separately.
    pub fn is_due(&self, now: Timestamp) -> bool {
        match self.due {
            Some(due) => now >= due,
            None => false,
        }
    }

    pub fn status(&self) -> Status {
        if self.is_new() {
            Status::New
        } else if self.is_learning() {
            Status::Learning
        } else if self.is_mature() {
            Status::Mature
        } else {
            Status::Review
        }
    }

    /// The probability of recalling the card right now. Cards without a
    /// formed memory report full retrievability.
    pub fn current_retrievability(&self, now: Timestamp) -> R {
        match self.last_review {
            Some(last_review) if self.stability > 0.0 => {
                retrievability(self.stability, now.days_since(last_review))
            }
            _ => 1.0,
        }
    }
}
