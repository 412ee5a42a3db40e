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

//! The FSRS memory model: pure functions from (difficulty, stability,
//! retrievability, grade) to updated difficulty and stability.

use std::fmt::Display;
use std::fmt::Formatter;

use serde::Deserialize;
use serde::Serialize;

use crate::error::ErrorReport;
use crate::error::fail;

/// Retrievability: probability of recall, in [0, 1].
pub type R = f64;
/// Stability: days for retrievability to decay to 90%.
pub type Stability = f64;
/// Difficulty: in [1, 10] once a card has been reviewed.
pub type Difficulty = f64;
/// Time in days.
pub type T = f64;

/// The model weights, w0 through w18.
pub type Weights = [f64; 19];

/// FSRS-5 default weights.
pub const DEFAULT_WEIGHTS: Weights = [
    0.4072, 1.1829, 3.1262, 15.4722, 7.2102, 0.5316, 1.0651, 0.0234, 1.616, 0.1544, 1.0824,
    1.9813, 0.0953, 0.2975, 2.2042, 0.2407, 2.9466, 0.5034, 0.6567,
];

pub const MIN_DIFFICULTY: Difficulty = 1.0;
pub const MAX_DIFFICULTY: Difficulty = 10.0;
pub const MIN_STABILITY: Stability = 0.1;

/// Ties the decay rate to the definition of stability: R(S, S) = 0.9.
const DECAY_FACTOR: f64 = 9.0;

#[derive(Clone, Copy, PartialEq, Eq, Debug, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Grade {
    Again,
    Hard,
    Good,
    Easy,
}

impl Grade {
    pub const ALL: [Grade; 4] = [Grade::Again, Grade::Hard, Grade::Good, Grade::Easy];

    pub fn as_str(&self) -> &'static str {
        match self {
            Grade::Again => "again",
            Grade::Hard => "hard",
            Grade::Good => "good",
            Grade::Easy => "easy",
        }
    }

    pub fn ordinal(self) -> u8 {
        match self {
            Grade::Again => 0,
            Grade::Hard => 1,
            Grade::Good => 2,
            Grade::Easy => 3,
        }
    }

    fn value(self) -> f64 {
        f64::from(self.ordinal())
    }
}

impl Display for Grade {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl TryFrom<u8> for Grade {
    type Error = ErrorReport;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        match value {
            0 => Ok(Grade::Again),
            1 => Ok(Grade::Hard),
            2 => Ok(Grade::Good),
            3 => Ok(Grade::Easy),
            _ => fail(format!("Invalid grade: {value}")),
        }
    }
}

/// Probability of recall after `t` days with stability `s`. Zero when no
/// memory has formed yet.
pub fn retrievability(s: Stability, t: T) -> R {
    if s <= 0.0 {
        return 0.0;
    }
    (1.0 + t / (DECAY_FACTOR * s)).powi(-1)
}

fn clamp_d(d: Difficulty) -> Difficulty {
    d.clamp(MIN_DIFFICULTY, MAX_DIFFICULTY)
}

pub fn initial_difficulty(w: &Weights, g: Grade) -> Difficulty {
    clamp_d(w[4] - f64::exp(w[5] * (g.value() - 1.0)) + 1.0)
}

/// Linear grade-driven delta, plus mean reversion towards the difficulty of
/// a first review graded `Good`.
pub fn next_difficulty(w: &Weights, d: Difficulty, g: Grade) -> Difficulty {
    let delta = -w[6] * (g.value() - 3.0);
    let reversion = w[7] * (initial_difficulty(w, Grade::Good) - d);
    clamp_d(d + delta + reversion)
}

pub fn initial_stability(w: &Weights, g: Grade) -> Stability {
    let s = match g {
        Grade::Again => w[0],
        Grade::Hard => w[1],
        Grade::Good => w[2],
        Grade::Easy => w[3],
    };
    f64::max(MIN_STABILITY, s)
}

/// Stability after a successful recall. Growth is larger when recall happened
/// at low retrievability, and for easier cards.
pub fn next_recall_stability(
    w: &Weights,
    d: Difficulty,
    s: Stability,
    r: R,
    g: Grade,
) -> Stability {
    let hard_penalty = if g == Grade::Hard { w[15] } else { 1.0 };
    let easy_bonus = if g == Grade::Easy { w[16] } else { 1.0 };
    let t_d = 11.0 - d;
    let t_s = s.powf(-w[9]);
    let t_r = f64::exp((1.0 - r) * w[10]) - 1.0;
    let alpha = 1.0 + f64::exp(w[8]) * t_d * t_s * t_r * hard_penalty * easy_bonus;
    f64::max(MIN_STABILITY, s * alpha)
}

/// Stability after forgetting, floored at [`MIN_STABILITY`].
pub fn next_forget_stability(w: &Weights, d: Difficulty, s: Stability, r: R) -> Stability {
    let d_f = d.powf(-w[12]);
    let s_f = (s + 1.0).powf(w[13]) - 1.0;
    let r_f = f64::exp((1.0 - r) * w[14]);
    let s_new = w[11] * d_f * s_f * r_f;
    f64::max(MIN_STABILITY, s_new)
}

#[cfg(test)]
mod tests {
    use super::*;

    const W: &Weights = &DEFAULT_WEIGHTS;

    fn approx(a: f64, b: f64, eps: f64) -> bool {
        (a - b).abs() < eps
    }

    #[test]
    fn test_retrievability_at_zero() {
        assert_eq!(retrievability(3.0, 0.0), 1.0);
    }

    #[test]
    fn test_retrievability_without_memory() {
        assert_eq!(retrievability(0.0, 5.0), 0.0);
        assert_eq!(retrievability(-1.0, 5.0), 0.0);
    }

    #[test]
    fn test_retrievability_calibration() {
        for s in [0.1, 0.5, 1.0, 3.1262, 15.0, 365.0, 10_000.0] {
            assert!(approx(retrievability(s, s), 0.9, 1e-9), "s = {s}");
        }
    }

    #[test]
    fn test_retrievability_decays() {
        let s = 10.0;
        let mut last = retrievability(s, 0.0);
        for t in 1..100 {
            let r = retrievability(s, t as f64);
            assert!(r < last);
            assert!(r > 0.0);
            last = r;
        }
    }

    #[test]
    fn test_initial_difficulty() {
        assert!(approx(initial_difficulty(W, Grade::Hard), 7.2102, 1e-9));
        assert!(approx(initial_difficulty(W, Grade::Good), 6.50849, 1e-4));
        // Easier first grades produce lower difficulty.
        let ds: Vec<Difficulty> = Grade::ALL.iter().map(|g| initial_difficulty(W, *g)).collect();
        assert!(ds.windows(2).all(|p| p[0] > p[1]));
    }

    #[test]
    fn test_initial_difficulty_clamped() {
        let mut w = DEFAULT_WEIGHTS;
        w[4] = 100.0;
        assert_eq!(initial_difficulty(&w, Grade::Again), MAX_DIFFICULTY);
        w[4] = -100.0;
        assert_eq!(initial_difficulty(&w, Grade::Easy), MIN_DIFFICULTY);
    }

    #[test]
    fn test_next_difficulty_direction() {
        let d = 5.0;
        assert!(next_difficulty(W, d, Grade::Again) > d);
        assert!(next_difficulty(W, d, Grade::Hard) > d);
        assert!(next_difficulty(W, d, Grade::Easy) < d + 0.1);
    }

    #[test]
    fn test_next_difficulty_stays_in_range() {
        let mut d = initial_difficulty(W, Grade::Again);
        for _ in 0..100 {
            d = next_difficulty(W, d, Grade::Again);
            assert!((MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&d));
        }
        assert_eq!(d, MAX_DIFFICULTY);
        for _ in 0..1000 {
            d = next_difficulty(W, d, Grade::Easy);
            assert!((MIN_DIFFICULTY..=MAX_DIFFICULTY).contains(&d));
        }
    }

    #[test]
    fn test_mean_reversion_under_good() {
        // Good still carries a delta of +w6, so the result saturates at the
        // upper bound.
        let target = initial_difficulty(W, Grade::Good);
        let d = next_difficulty(W, 10.0, Grade::Good);
        assert!(d <= 10.0);
        let expected = clamp_d(10.0 + W[6] + W[7] * (target - 10.0));
        assert!(approx(d, expected, 1e-12));
    }

    #[test]
    fn test_initial_stability() {
        assert_eq!(initial_stability(W, Grade::Again), 0.4072);
        assert_eq!(initial_stability(W, Grade::Hard), 1.1829);
        assert_eq!(initial_stability(W, Grade::Good), 3.1262);
        assert_eq!(initial_stability(W, Grade::Easy), 15.4722);
    }

    #[test]
    fn test_initial_stability_floor() {
        let mut w = DEFAULT_WEIGHTS;
        w[0] = 0.0;
        assert_eq!(initial_stability(&w, Grade::Again), MIN_STABILITY);
    }

    #[test]
    fn test_recall_stability_grows() {
        let d = 5.0;
        let s = 3.0;
        let r = retrievability(s, s);
        for g in [Grade::Hard, Grade::Good, Grade::Easy] {
            assert!(next_recall_stability(W, d, s, r, g) > s);
        }
    }

    #[test]
    fn test_recall_stability_ordering() {
        let d = 5.0;
        let s = 3.0;
        let r = retrievability(s, 10.0);
        let hard = next_recall_stability(W, d, s, r, Grade::Hard);
        let good = next_recall_stability(W, d, s, r, Grade::Good);
        let easy = next_recall_stability(W, d, s, r, Grade::Easy);
        assert!(hard < good);
        assert!(good < easy);
    }

    #[test]
    fn test_recall_stability_unchanged_at_full_retrievability() {
        let s = 4.0;
        assert!(approx(next_recall_stability(W, 5.0, s, 1.0, Grade::Good), s, 1e-12));
    }

    #[test]
    fn test_recall_stability_testing_effect() {
        // Recalling at lower retrievability produces a larger gain.
        let d = 5.0;
        let s = 3.0;
        let early = next_recall_stability(W, d, s, 0.95, Grade::Good);
        let late = next_recall_stability(W, d, s, 0.7, Grade::Good);
        assert!(late > early);
    }

    #[test]
    fn test_forget_stability_shrinks() {
        let d = 5.0;
        let s = 3.0;
        let r = retrievability(s, s);
        let new_s = next_forget_stability(W, d, s, r);
        assert!(new_s < s);
        assert!(new_s >= MIN_STABILITY);
    }

    #[test]
    fn test_forget_stability_value() {
        // At low retrievability the result can exceed a small stability.
        let new_s = next_forget_stability(W, 5.0, 0.5, 0.0);
        assert!(approx(new_s, 1.9747294240782347, 1e-12));
    }

    #[test]
    fn test_forget_stability_floor() {
        let tiny = next_forget_stability(W, 10.0, MIN_STABILITY, 1.0);
        assert_eq!(tiny, MIN_STABILITY);
    }

    #[test]
    fn test_recall_stability_floor() {
        // A stored stability below the floor is lifted to it.
        assert_eq!(next_recall_stability(W, 5.0, 0.05, 1.0, Grade::Good), MIN_STABILITY);
        // No memory at all: the NaN from 0 * inf falls back to the floor.
        assert_eq!(next_recall_stability(W, 5.0, 0.0, 1.0, Grade::Good), MIN_STABILITY);
    }

    #[test]
    fn test_grade_ordinals() -> crate::error::Fallible<()> {
        for g in Grade::ALL {
            assert_eq!(Grade::try_from(g.ordinal())?, g);
        }
        assert!(Grade::try_from(4).is_err());
        Ok(())
    }

    #[test]
    fn test_grade_serde() -> crate::error::Fallible<()> {
        assert_eq!(serde_json::to_string(&Grade::Again)?, "\"again\"");
        let g: Grade = serde_json::from_str("\"easy\"")?;
        assert_eq!(g, Grade::Easy);
        assert_eq!(Grade::Hard.to_string(), "hard");
        Ok(())
    }
}
