//! Linear regression fitted with stochastic gradient descent.

use rand::prelude::*;
use rand::rngs::StdRng;

use crate::math::dot;
use crate::opts::FitOpts;
use crate::prelude::*;
use crate::trainer::loss::LossPair;
use crate::trainer::Example;

pub struct Regression {
    pub weights: Vec<f64>,
    pub intercept: f64,
}

impl Regression {
    #[must_use]
    pub fn predict(&self, features: &[f64]) -> f64 {
        self.intercept + dot(&self.weights, features)
    }
}

/// Fits the regression on the training set, tracking RMSE on both sets.
///
/// Deterministic for a given seed: the epoch shuffles are driven by a seeded
/// generator and the weights start at zero.
pub fn fit(
    n_features: usize,
    train: &[Example],
    test: &[Example],
    opts: &FitOpts,
) -> (Regression, LossPair) {
    let mut rng = StdRng::seed_from_u64(opts.seed);
    let mut indexes = (0..train.len()).collect::<Vec<_>>();
    let mut regression = Regression {
        weights: vec![0.0; n_features],
        intercept: 0.0,
    };
    let mut losses = LossPair::infinity();

    for epoch in 1..=opts.n_epochs {
        let learning_rate = (opts.learning_rate / (1.0 + opts.decay * (epoch - 1) as f64))
            .max(opts.min_learning_rate);
        indexes.shuffle(&mut rng);

        let mut builder = LossPair::builder();
        for &index in &indexes {
            let example = &train[index];
            let prediction = regression.predict(&example.features);
            builder.train.push_sample(prediction, example.risk);

            let residual = example.risk - prediction;
            regression.intercept += learning_rate * residual;
            for (weight, feature) in regression.weights.iter_mut().zip(&example.features) {
                *weight += learning_rate * residual * feature;
            }
        }
        for example in test {
            builder
                .test
                .push_sample(regression.predict(&example.features), example.risk);
        }
        losses = builder.finalise();
        debug!(epoch, learning_rate, train_rmse = losses.train, test_rmse = losses.test);
    }

    (regression, losses)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn line_examples() -> Vec<Example> {
        // risk = 2 · x + 1.
        (0..20)
            .map(|index| {
                let x = index as f64 / 20.0;
                Example {
                    features: vec![x],
                    risk: 2.0 * x + 1.0,
                }
            })
            .collect()
    }

    fn opts() -> FitOpts {
        FitOpts {
            learning_rate: 0.1,
            decay: 0.01,
            min_learning_rate: 0.001,
            n_epochs: 500,
            test_fraction: 0.2,
            seed: 42,
        }
    }

    #[test]
    fn fit_recovers_a_line() {
        let examples = line_examples();
        let (regression, losses) = fit(1, &examples, &examples, &opts());
        assert!((regression.weights[0] - 2.0).abs() < 0.05, "{}", regression.weights[0]);
        assert!((regression.intercept - 1.0).abs() < 0.05, "{}", regression.intercept);
        assert!(losses.train < 0.05);
        assert!(losses.test < 0.05);
    }

    #[test]
    fn fit_is_deterministic() {
        let examples = line_examples();
        let (regression_1, _) = fit(1, &examples, &[], &opts());
        let (regression_2, _) = fit(1, &examples, &[], &opts());
        assert_eq!(regression_1.weights, regression_2.weights);
        assert_eq!(regression_1.intercept, regression_2.intercept);
    }
}
