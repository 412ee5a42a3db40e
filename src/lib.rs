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

//! A spaced repetition scheduling core.
//!
//! Given a card's scheduling state and the learner's grade, [`Scheduler`]
//! decides how difficult the card is, how stable its memory is, and when it
//! should next be shown. The memory model is FSRS; the lifecycle adds
//! minute-scale learning steps before a card graduates to day-scale review.
//!
//! ```
//! use recollect::CardState;
//! use recollect::Grade;
//! use recollect::Scheduler;
//! use recollect::Timestamp;
//!
//! let now = Timestamp::from_millis(1_700_000_000_000).unwrap();
//! let scheduler = Scheduler::default();
//! let card = scheduler.review(&CardState::new(), Grade::Good, now);
//! assert!(!card.is_learning());
//! assert_eq!(card.reps, 1);
//! ```

pub mod clock;
pub mod error;
pub mod fsrs;
pub mod params;
pub mod scheduler;
pub mod types;

pub use clock::Clock;
pub use clock::FixedClock;
#[cfg(feature = "clock")]
pub use clock::SystemClock;
pub use fsrs::Grade;
pub use params::Parameters;
pub use scheduler::Scheduler;
pub use types::card_state::CardState;
pub use types::interval::Interval;
pub use types::status::Status;
pub use types::step::Step;
pub use types::timestamp::Timestamp;
