//! Aggregate statistics over an identity's attempt history.

use serde::{Deserialize, Serialize};

use crate::model::Attempt;

/// Summary of one identity's history, for display alongside the raw list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HistorySummary {
    /// Number of recorded attempts.
    pub attempts: usize,
    /// Mean score across attempts, as a percentage in [0, 100].
    pub mean_percentage: f64,
    /// Best single-attempt score, as a percentage in [0, 100].
    pub best_percentage: f64,
}

impl HistorySummary {
    /// Compute the summary. An empty history yields all zeroes.
    pub fn compute(history: &[Attempt]) -> Self {
        if history.is_empty() {
            return Self {
                attempts: 0,
                mean_percentage: 0.0,
                best_percentage: 0.0,
            };
        }

        let mut sum = 0.0;
        let mut best = 0.0f64;
        for attempt in history {
            let pct = attempt.percentage();
            sum += pct;
            best = best.max(pct);
        }

        Self {
            attempts: history.len(),
            mean_percentage: sum / history.len() as f64,
            best_percentage: best,
        }
    }
}
