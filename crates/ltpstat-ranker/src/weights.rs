//! Weights for the fix-priority score.

use serde::{Deserialize, Serialize};

use ltpstat_common::report_config::{validate_failure_count_weight, PACKAGED_FAILURE_COUNT_WEIGHT};
use ltpstat_common::Result;

/// Library default for the `ln(1 + fail)` reward weight.
pub const DEFAULT_FAILURE_COUNT_WEIGHT: f64 = 0.5;

/// Tunables of the composite score.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ScoreWeights {
    /// Multiplier on `ln(1 + fail_broken)`. Raising it pushes tests with
    /// many failing units up the ranking.
    pub failure_count_weight: f64,
}

impl Default for ScoreWeights {
    fn default() -> Self {
        Self { failure_count_weight: DEFAULT_FAILURE_COUNT_WEIGHT }
    }
}

impl ScoreWeights {
    /// Build weights, rejecting negative or non-finite values.
    pub fn new(failure_count_weight: f64) -> Result<Self> {
        let weights = Self { failure_count_weight };
        weights.validate()?;
        Ok(weights)
    }

    /// Weights used by packaged ranking runs.
    pub fn packaged() -> Self {
        Self { failure_count_weight: PACKAGED_FAILURE_COUNT_WEIGHT }
    }

    pub fn validate(&self) -> Result<()> {
        validate_failure_count_weight(self.failure_count_weight)
    }
}
