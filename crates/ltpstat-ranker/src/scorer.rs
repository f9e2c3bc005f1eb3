//! Fix-priority score computation and ranking.
//!
//! For a test with `p` passing and `f` failed/broken units (`t = p + f`):
//!
//! S = (p / f) / t + w × ln(1 + f)     when f > 0 and t > 0
//! S = 0                               otherwise
//!
//! The first term is low for tests that mostly fail or that are large;
//! the second gives a diminishing bonus for many failing units. Higher
//! scores are ranked first.

use serde::{Deserialize, Serialize};

use crate::record::TestRecord;
use crate::weights::ScoreWeights;

/// Compute the two score terms `(base, reward)`.
/// Both are zero when there is nothing to fix.
pub fn compute_score_terms(pass: i64, fail_broken: i64, weights: &ScoreWeights) -> (f64, f64) {
    let total = pass.saturating_add(fail_broken);
    if fail_broken <= 0 || total <= 0 {
        return (0.0, 0.0);
    }

    let fail = fail_broken as f64;
    let base = (pass as f64 / fail) / total as f64;
    let reward = weights.failure_count_weight * fail.ln_1p();
    (base, reward)
}

/// Composite priority score S.
pub fn compute_score(pass: i64, fail_broken: i64, weights: &ScoreWeights) -> f64 {
    let (base, reward) = compute_score_terms(pass, fail_broken, weights);
    base + reward
}

/// A record with its score and 1-based position in the ranking.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RankedRecord {
    pub rank: usize,
    pub name: String,
    pub category: String,
    pub pass: i64,
    pub fail_broken: i64,
    pub total_units: i64,
    pub score: f64,
}

/// Score every record and order by score descending.
/// Equal scores keep their input order.
pub fn rank_records<I>(records: I, weights: &ScoreWeights) -> Vec<RankedRecord>
where
    I: IntoIterator<Item = TestRecord>,
{
    let mut ranked: Vec<RankedRecord> = records
        .into_iter()
        .map(|r| RankedRecord {
            rank: 0,
            score: compute_score(r.pass, r.fail_broken, weights),
            total_units: r.total_units(),
            name: r.name,
            category: r.category,
            pass: r.pass,
            fail_broken: r.fail_broken,
        })
        .collect();

    ranked.sort_by(|a, b| b.score.total_cmp(&a.score));
    for (i, r) in ranked.iter_mut().enumerate() {
        r.rank = i + 1;
    }
    ranked
}
