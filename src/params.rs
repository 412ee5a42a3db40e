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

use std::fs::read_to_string;
use std::path::Path;

use serde::Deserialize;

use crate::error::Fallible;
use crate::error::fail;
use crate::fsrs::DEFAULT_WEIGHTS;
use crate::fsrs::Weights;

/// The desired recall probability.
pub const DEFAULT_REQUEST_RETENTION: f64 = 0.9;

/// The maximum review interval in days (about a century).
pub const DEFAULT_MAXIMUM_INTERVAL: u32 = 36500;

/// Short-term learning steps, in minutes.
pub const DEFAULT_LEARNING_STEPS: [u32; 2] = [1, 10];

/// A named parameter set for the scheduler.
///
/// Every field has a default, so a config file only needs to name the
/// values it overrides:
///
/// ```toml
/// request_retention = 0.85
/// learning_steps = [1, 5, 15]
/// ```
#[derive(Clone, Debug, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Parameters {
    pub weights: Weights,
    pub request_retention: f64,
    pub maximum_interval: u32,
    pub learning_steps: Vec<u32>,
}

impl Default for Parameters {
    fn default() -> Self {
        Self {
            weights: DEFAULT_WEIGHTS,
            request_retention: DEFAULT_REQUEST_RETENTION,
            maximum_interval: DEFAULT_MAXIMUM_INTERVAL,
            learning_steps: DEFAULT_LEARNING_STEPS.to_vec(),
        }
    }
}

impl Parameters {
    pub fn from_toml_str(source: &str) -> Fallible<Self> {
        let params: Parameters = toml::from_str(source)?;
        params.validate()?;
        Ok(params)
    }

    pub fn load(path: &Path) -> Fallible<Self> {
        if !path.exists() {
            return fail(format!("config file {} does not exist.", path.display()));
        }
        log::debug!("Loading parameters from {}", path.display());
        let source = read_to_string(path)?;
        Self::from_toml_str(&source)
    }

    pub fn validate(&self) -> Fallible<()> {
        if !(self.request_retention > 0.0 && self.request_retention < 1.0) {
            return fail(format!(
                "request_retention must be in (0, 1), got {}.",
                self.request_retention
            ));
        }
        if self.maximum_interval < 1 {
            return fail("maximum_interval must be at least 1 day.");
        }
        if self.learning_steps.is_empty() {
            return fail("learning_steps must contain at least one step.");
        }
        if self.learning_steps.contains(&0) {
            return fail("learning steps must be at least 1 minute long.");
        }
        if let Some(i) = self.weights.iter().position(|w| !w.is_finite()) {
            return fail(format!("weight w{i} is not finite."));
        }
        Ok(())
    }

    /// Length of the learning step at `index`, in minutes.
    pub fn step_minutes(&self, index: usize) -> Option<u32> {
        self.learning_steps.get(index).copied()
    }

    /// Length of the first learning step. Falls back to one minute for an
    /// unvalidated parameter set with no steps.
    pub fn first_step_minutes(&self) -> u32 {
        self.step_minutes(0).unwrap_or(1)
    }
}

#[cfg(test)]
mod tests {
    use std::fs::write;

    use tempfile::tempdir;

    use super::*;

    #[test]
    fn test_defaults_are_valid() -> Fallible<()> {
        let params = Parameters::default();
        params.validate()?;
        assert_eq!(params.request_retention, 0.9);
        assert_eq!(params.maximum_interval, 36500);
        assert_eq!(params.learning_steps, vec![1, 10]);
        assert_eq!(params.weights[3], 15.4722);
        Ok(())
    }

    #[test]
    fn test_empty_toml_is_default() -> Fallible<()> {
        assert_eq!(Parameters::from_toml_str("")?, Parameters::default());
        Ok(())
    }

    #[test]
    fn test_partial_override() -> Fallible<()> {
        let params = Parameters::from_toml_str(
            "request_retention = 0.85\nlearning_steps = [1, 5, 15]\n",
        )?;
        assert_eq!(params.request_retention, 0.85);
        assert_eq!(params.learning_steps, vec![1, 5, 15]);
        assert_eq!(params.maximum_interval, DEFAULT_MAXIMUM_INTERVAL);
        assert_eq!(params.weights, DEFAULT_WEIGHTS);
        Ok(())
    }

    #[test]
    fn test_unknown_key_rejected() {
        assert!(Parameters::from_toml_str("enable_fuzz = true").is_err());
    }

    #[test]
    fn test_wrong_weight_count_rejected() {
        assert!(Parameters::from_toml_str("weights = [1.0, 2.0]").is_err());
    }

    #[test]
    fn test_invalid_retention() {
        for value in ["0.0", "1.0", "1.5", "-0.2"] {
            let source = format!("request_retention = {value}");
            let err = Parameters::from_toml_str(&source).unwrap_err();
            assert!(err.message().starts_with("request_retention"), "{value}");
        }
    }

    #[test]
    fn test_invalid_steps() {
        let err = Parameters::from_toml_str("learning_steps = []").unwrap_err();
        assert_eq!(err.message(), "learning_steps must contain at least one step.");
        let err = Parameters::from_toml_str("learning_steps = [1, 0]").unwrap_err();
        assert_eq!(err.message(), "learning steps must be at least 1 minute long.");
    }

    #[test]
    fn test_invalid_maximum_interval() {
        assert!(Parameters::from_toml_str("maximum_interval = 0").is_err());
    }

    #[test]
    fn test_non_finite_weight() {
        let mut params = Parameters::default();
        params.weights[8] = f64::NAN;
        let err = params.validate().unwrap_err();
        assert_eq!(err.message(), "weight w8 is not finite.");
    }

    #[test]
    fn test_load_from_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("params.toml");
        write(&path, "maximum_interval = 365\n")?;
        let params = Parameters::load(&path)?;
        assert_eq!(params.maximum_interval, 365);
        Ok(())
    }

    #[test]
    fn test_load_missing_file() -> Fallible<()> {
        let dir = tempdir()?;
        let path = dir.path().join("nope.toml");
        assert!(Parameters::load(&path).is_err());
        Ok(())
    }

    #[test]
    fn test_step_minutes() {
        let params = Parameters::default();
        assert_eq!(params.step_minutes(0), Some(1));
        assert_eq!(params.step_minutes(1), Some(10));
        assert_eq!(params.step_minutes(2), None);
        assert_eq!(params.first_step_minutes(), 1);
    }
}
