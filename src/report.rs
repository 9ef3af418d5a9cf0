//! Derived statistics over prediction results, for display by outer layers.

use statrs::statistics::Statistics;

use crate::predictor::PredictionResult;

/// Summary of one result table.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultSummary {
    pub records: usize,
    /// Rows predicted as confirmed sites (class 1).
    pub predicted_sites: usize,
    pub mean_probability: f64,
    pub std_probability: f64,
    /// Fraction of rows where prediction matches ground truth, when ground
    /// truth was present.
    pub accuracy: Option<f64>,
}

pub fn summarize(result: &PredictionResult) -> ResultSummary {
    let probs = &result.probability;
    let mean = if probs.is_empty() {
        0.0
    } else {
        probs.iter().mean()
    };
    let std = if probs.len() < 2 {
        0.0
    } else {
        probs.iter().std_dev()
    };
    let accuracy = result.actual.as_ref().map(|actual| {
        let hits = actual
            .iter()
            .zip(&result.predicted)
            .filter(|(a, p)| a == p)
            .count();
        hits as f64 / actual.len().max(1) as f64
    });
    ResultSummary {
        records: result.n_rows(),
        predicted_sites: result.predicted.iter().filter(|&&c| c == 1).count(),
        mean_probability: mean,
        std_probability: std,
        accuracy,
    }
}

/// A fraction in [0, 1] as a percentage rounded to 2 decimals. This is the
/// only place fractions convert for comparative display.
pub fn percent(p: f64) -> f64 {
    (p * 10_000.0).round() / 100.0
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn percent_rounds_to_two_decimals() {
        assert_eq!(percent(0.84215), 84.22);
        assert_eq!(percent(0.0), 0.0);
        assert_eq!(percent(1.0), 100.0);
    }
}
