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

//! The card lifecycle: new, short-term learning, graduated review, and
//! relapse back into learning.

use crate::clock::Clock;
use crate::fsrs::Difficulty;
use crate::fsrs::Grade;
use crate::fsrs::Stability;
use crate::fsrs::T;
use crate::fsrs::initial_difficulty;
use crate::fsrs::initial_stability;
use crate::fsrs::next_difficulty;
use crate::fsrs::next_forget_stability;
use crate::fsrs::next_recall_stability;
use crate::fsrs::retrievability;
use crate::params::Parameters;
use crate::types::card_state::CardState;
use crate::types::interval::Interval;
use crate::types::step::Step;
use crate::types::timestamp::Timestamp;

#[derive(Clone, Debug, Default)]
pub struct Scheduler {
    params: Parameters,
}

impl Scheduler {
    pub fn new(params: Parameters) -> Self {
        Self { params }
    }

    pub fn params(&self) -> &Parameters {
        &self.params
    }

    /// Grade a card at `now` and return its successor state.
    ///
    /// Total: every `(CardState, Grade)` pair has a successor. Elapsed time
    /// is clamped to zero if `last_review` lies in the future.
    pub fn review(&self, card: &CardState, grade: Grade, now: Timestamp) -> CardState {
        let elapsed: T = match card.last_review {
            Some(last_review) => now.days_since(last_review),
            None => 0.0,
        };
        let next = if grade == Grade::Again {
            log::trace!("again: back to the first learning step");
            self.forget(card, elapsed, now)
        } else if card.reps == 0 && card.step == Step::Learning(0) {
            log::trace!("first successful review");
            self.first_success(card, grade, now)
        } else {
            match card.step {
                Step::Learning(index) => {
                    log::trace!("learning step {index}");
                    self.learning(card, grade, index, elapsed, now)
                }
                Step::Graduated => {
                    log::trace!("review after {elapsed:.2}d");
                    let (stability, difficulty) = self.recall(card, grade, elapsed);
                    self.graduate(card, stability, difficulty, card.reps + 1, now)
                }
            }
        };
        let diff_percent = ((next.difficulty - 1.0) / 9.0) * 100.0;
        log::debug!(
            "{} S={:.2}d D={:.2}% step={} due={}",
            grade.as_str(),
            next.stability,
            diff_percent,
            i64::from(next.step),
            next.due.map(|d| d.to_string()).unwrap_or_default(),
        );
        next
    }

    /// [`Scheduler::review`], reading the time from `clock`.
    pub fn review_at(&self, card: &CardState, grade: Grade, clock: &impl Clock) -> CardState {
        self.review(card, grade, clock.now())
    }

    /// Convert a stability into a whole number of days that targets the
    /// configured retention. Always in `[1, maximum_interval]`.
    pub fn stability_to_interval(&self, stability: Stability) -> u32 {
        let maximum = self.params.maximum_interval.max(1);
        let retention = self.params.request_retention;
        let raw = (stability / 9.0) * (retention.powi(-1) - 1.0);
        if !raw.is_finite() {
            return maximum;
        }
        raw.clamp(1.0, f64::from(maximum)).round() as u32
    }

    /// What the wait would be if the card were graded `grade` at `now`. The
    /// card is not modified.
    pub fn preview(&self, card: &CardState, grade: Grade, now: Timestamp) -> Interval {
        let next = self.review(card, grade, now);
        match next.step {
            Step::Learning(index) => {
                Interval::Minutes(self.params.step_minutes(index).unwrap_or(1))
            }
            Step::Graduated => Interval::Days(next.scheduled_days),
        }
    }

    /// [`Scheduler::preview`] for every grade, in grade order.
    pub fn preview_all(&self, card: &CardState, now: Timestamp) -> [(Grade, Interval); 4] {
        Grade::ALL.map(|grade| (grade, self.preview(card, grade, now)))
    }

    fn forget(&self, card: &CardState, elapsed: T, now: Timestamp) -> CardState {
        let w = &self.params.weights;
        let (stability, difficulty) = if card.reps == 0 {
            (
                initial_stability(w, Grade::Again),
                initial_difficulty(w, Grade::Again),
            )
        } else {
            let r = retrievability(card.stability, elapsed);
            (
                next_forget_stability(w, card.difficulty, card.stability, r),
                next_difficulty(w, card.difficulty, Grade::Again),
            )
        };
        CardState {
            stability,
            difficulty,
            scheduled_days: 0,
            reps: card.reps,
            lapses: card.lapses + 1,
            step: Step::Learning(0),
            due: Some(now.plus_minutes(self.params.first_step_minutes())),
            last_review: Some(now),
        }
    }

    fn first_success(&self, card: &CardState, grade: Grade, now: Timestamp) -> CardState {
        let w = &self.params.weights;
        let stability = initial_stability(w, grade);
        let difficulty = initial_difficulty(w, grade);
        match grade {
            Grade::Hard => match self.params.step_minutes(1) {
                Some(minutes) => self.stay(card, stability, difficulty, 1, minutes, now),
                None => self.graduate(card, stability, difficulty, 1, now),
            },
            _ => self.graduate(card, stability, difficulty, 1, now),
        }
    }

    fn learning(
        &self,
        card: &CardState,
        grade: Grade,
        index: usize,
        elapsed: T,
        now: Timestamp,
    ) -> CardState {
        if grade == Grade::Hard {
            let next_index = index + 1;
            if let Some(minutes) = self.params.step_minutes(next_index) {
                return self.stay(card, card.stability, card.difficulty, next_index, minutes, now);
            }
        }
        let (stability, difficulty) = self.recall(card, grade, elapsed);
        self.graduate(card, stability, difficulty, card.reps + 1, now)
    }

    fn recall(&self, card: &CardState, grade: Grade, elapsed: T) -> (Stability, Difficulty) {
        let w = &self.params.weights;
        let r = retrievability(card.stability, elapsed);
        let stability = next_recall_stability(w, card.difficulty, card.stability, r, grade);
        let difficulty = next_difficulty(w, card.difficulty, grade);
        (stability, difficulty)
    }

    /// Remain in (or advance through) the learning steps.
    fn stay(
        &self,
        card: &CardState,
        stability: Stability,
        difficulty: Difficulty,
        index: usize,
        minutes: u32,
        now: Timestamp,
    ) -> CardState {
        CardState {
            stability,
            difficulty,
            scheduled_days: 0,
            reps: card.reps,
            lapses: card.lapses,
            step: Step::Learning(index),
            due: Some(now.plus_minutes(minutes)),
            last_review: Some(now),
        }
    }

    fn graduate(
        &self,
        card: &CardState,
        stability: Stability,
        difficulty: Difficulty,
        reps: u32,
        now: Timestamp,
    ) -> CardState {
        let interval = self.stability_to_interval(stability);
        CardState {
            stability,
            difficulty,
            scheduled_days: interval,
            reps,
            lapses: card.lapses,
            step: Step::Graduated,
            due: Some(now.plus_days(interval)),
            last_review: Some(now),
        }
    }
}
