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

use std::fmt::Display;
use std::fmt::Formatter;

/// The wait until a card's next review, as shown next to a grade button.
#[derive(Clone, Copy, PartialEq, Eq, Debug)]
pub enum Interval {
    /// Still learning: the length of the next learning step.
    Minutes(u32),
    /// Graduated: the scheduled interval.
    Days(u32),
}

impl Display for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match *self {
            Interval::Minutes(m) => write!(f, "{m}m"),
            Interval::Days(0) => write!(f, "<1d"),
            Interval::Days(d) if d < 7 => write!(f, "{d}d"),
            Interval::Days(d) if d < 30 => write!(f, "{}w", (f64::from(d) / 7.0).round()),
            Interval::Days(d) if d < 365 => write!(f, "{}mo", (f64::from(d) / 30.0).round()),
            Interval::Days(d) => write!(f, "{:.1}y", f64::from(d) / 365.0),
        }
    }
}
