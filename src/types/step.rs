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
use serde::Deserializer;
use serde::Serialize;
use serde::Serializer;
use serde::de::Error;

use crate::error::ErrorReport;
use crate::error::fail;

/// Where a card is in its lifecycle. Persisted as an integer: the learning
/// step index, or `-1` once the card has graduated to day-scale review.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Step {
    Learning(usize),
    Graduated,
}

impl Step {
    pub fn is_learning(self) -> bool {
        matches!(self, Step::Learning(_))
    }
}

impl Default for Step {
    fn default() -> Self {
        Step::Learning(0)
    }
}

impl From<Step> for i64 {
    fn from(step: Step) -> i64 {
        match step {
            Step::Learning(index) => index as i64,
            Step::Graduated => -1,
        }
    }
}

impl TryFrom<i64> for Step {
    type Error = ErrorReport;

    fn try_from(value: i64) -> Result<Self, Self::Error> {
        match value {
            -1 => Ok(Step::Graduated),
            n if n >= 0 => match usize::try_from(n) {
                Ok(index) => Ok(Step::Learning(index)),
                Err(_) => fail(format!("Step out of range: {value}")),
            },
            _ => fail(format!("Invalid step: {value}")),
        }
    }
}

impl Serialize for Step {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_i64(i64::from(*self))
    }
}

impl<'de> Deserialize<'de> for Step {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = i64::deserialize(deserializer)?;
        Step::try_from(value).map_err(|e| D::Error::custom(e.message()))
    }
}
