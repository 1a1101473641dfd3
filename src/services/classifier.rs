// src/services/classifier.rs
use rand::Rng;

use crate::models::{ClassificationResult, EconomicState};

/// Source of the classifier's uniform draw. Passed in explicitly so runs are
/// reproducible under test; never read from ambient global state.
pub trait RandomSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64;
}

/// Live draw backed by the thread-local generator.
pub struct ThreadRngSource;

impl RandomSource for ThreadRngSource {
    fn uniform(&mut self, low: f64, high: f64) -> f64 {
        rand::thread_rng().gen_range(low..=high)
    }
}

/// Fixed draw for tests and reproducible demos.
pub struct FixedSource(pub f64);

impl RandomSource for FixedSource {
    fn uniform(&mut self, _low: f64, _high: f64) -> f64 {
        self.0
    }
}

/// Tunables of the heuristic score. The formula mixes a percentage-scaled
/// rate with an additive random term and is not clamped; it is kept as-is,
/// parameterized rather than normalized.
#[derive(Debug, Clone, Copy)]
pub struct ClassifierParams {
    pub k: f64,
    pub low: f64,
    pub high: f64,
}

impl Default for ClassifierParams {
    fn default() -> Self {
        ClassifierParams {
            k: 23.4,
            low: 17.0,
            high: 25.0,
        }
    }
}

/// `score = daily_rate * 100 * K + uniform(LOW, HIGH)`, then a label by
/// descending threshold. Always returns a result.
pub fn classify(
    daily_rate: f64,
    params: &ClassifierParams,
    draw: &mut dyn RandomSource,
) -> ClassificationResult {
    let score = daily_rate * 100.0 * params.k + draw.uniform(params.low, params.high);
    ClassificationResult {
        score,
        state: state_for(score),
    }
}

pub fn state_for(score: f64) -> EconomicState {
    if score > 60.0 {
        EconomicState::Corralito
    } else if score > 40.0 {
        EconomicState::Picadolar
    } else if score > 20.0 {
        EconomicState::Npn
    } else {
        EconomicState::Tmc
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn score_formula_with_fixed_draw() {
        let result = classify(0.005, &ClassifierParams::default(), &mut FixedSource(20.0));
        // 0.005 * 100 * 23.4 + 20 = 31.7
        assert!((result.score - 31.7).abs() < 1e-9);
        assert_eq!(result.state, EconomicState::Npn);
    }

    #[test]
    fn zero_rate_score_is_just_the_draw() {
        let result = classify(0.0, &ClassifierParams::default(), &mut FixedSource(17.0));
        assert!((result.score - 17.0).abs() < 1e-12);
        assert_eq!(result.state, EconomicState::Tmc);
    }

    #[test]
    fn thresholds_by_descending_score() {
        assert_eq!(state_for(65.0), EconomicState::Corralito);
        assert_eq!(state_for(45.0), EconomicState::Picadolar);
        assert_eq!(state_for(25.0), EconomicState::Npn);
        assert_eq!(state_for(10.0), EconomicState::Tmc);
    }

    #[test]
    fn thresholds_are_exclusive_at_the_boundary() {
        assert_eq!(state_for(60.0), EconomicState::Picadolar);
        assert_eq!(state_for(40.0), EconomicState::Npn);
        assert_eq!(state_for(20.0), EconomicState::Tmc);
    }

    #[test]
    fn score_is_not_clamped() {
        let result = classify(0.1, &ClassifierParams::default(), &mut FixedSource(25.0));
        assert!(result.score > 100.0);
        assert_eq!(result.state, EconomicState::Corralito);

        let result = classify(-0.1, &ClassifierParams::default(), &mut FixedSource(17.0));
        assert!(result.score < 0.0);
        assert_eq!(result.state, EconomicState::Tmc);
    }

    #[test]
    fn custom_params_feed_the_formula() {
        let params = ClassifierParams {
            k: 10.0,
            low: 0.0,
            high: 0.0,
        };
        let result = classify(0.05, &params, &mut FixedSource(0.0));
        assert!((result.score - 50.0).abs() < 1e-9);
        assert_eq!(result.state, EconomicState::Picadolar);
    }

    #[test]
    fn live_draw_stays_within_bounds() {
        let params = ClassifierParams::default();
        for _ in 0..100 {
            let result = classify(0.0, &params, &mut ThreadRngSource);
            assert!(result.score >= params.low && result.score <= params.high);
        }
    }
}
