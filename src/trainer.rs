//! Offline training of the accident-risk model.

use chrono::Utc;
use itertools::Itertools;
use rand::prelude::*;
use rand::rngs::StdRng;

use crate::helpers::format_elapsed;
use crate::model::encoder::CategoricalEncoder;
use crate::model::RiskModel;
use crate::opts::TrainOpts;
use crate::prelude::*;
use crate::trainer::dataset::Observation;
use crate::trainer::regression::Regression;

pub mod dataset;
mod loss;
mod regression;

/// An encoded training example.
pub struct Example {
    pub features: Vec<f64>,
    pub risk: f64,
}

pub fn run(opts: &TrainOpts) -> Result {
    let start_instant = Instant::now();
    info!(
        inputs = %opts.inputs.iter().map(|path| path.display()).join(", "),
        "loading the datasets",
    );

    let observations = dataset::load(&opts.inputs)?;
    let encoder =
        CategoricalEncoder::fit(observations.iter().map(|observation| &observation.record));
    info!(
        n_observations = observations.len(),
        n_features = encoder.n_features(),
        "encoder fitted",
    );

    let examples = encode(&encoder, &observations);
    let n_samples = examples.len();
    let (train, test) = split(examples, opts.fit.test_fraction, opts.fit.seed);
    info!(n_train = train.len(), n_test = test.len(), "split");

    let (regression, losses) = regression::fit(encoder.n_features(), &train, &test, &opts.fit);
    info!(train_rmse = losses.train, test_rmse = losses.test, "fitted");

    let evaluation = evaluate(&regression, &test);
    info!(
        mae = evaluation.mae,
        rmse = evaluation.rmse,
        r_squared = evaluation.r_squared,
        "holdout evaluation",
    );

    let model = RiskModel {
        encoder,
        weights: regression.weights,
        intercept: regression.intercept,
        trained_at: Utc::now(),
        n_samples,
    };
    model.save(&opts.output)?;
    info!(
        output = %opts.output.display(),
        elapsed = format_elapsed(start_instant).as_str(),
        "model saved",
    );
    Ok(())
}

fn encode(encoder: &CategoricalEncoder, observations: &[Observation]) -> Vec<Example> {
    observations
        .iter()
        .map(|observation| Example {
            features: encoder.transform(&observation.record),
            risk: observation.risk,
        })
        .collect()
}

/// Splits the examples into training and holdout sets, reproducibly for a
/// given seed.
fn split(
    mut examples: Vec<Example>,
    test_fraction: f64,
    seed: u64,
) -> (Vec<Example>, Vec<Example>) {
    let mut rng = StdRng::seed_from_u64(seed);
    examples.shuffle(&mut rng);
    let n_test = (examples.len() as f64 * test_fraction).round() as usize;
    let train = examples.split_off(n_test);
    (train, examples)
}

struct Evaluation {
    mae: f64,
    rmse: f64,
    r_squared: f64,
}

fn evaluate(regression: &Regression, test: &[Example]) -> Evaluation {
    let n = test.len().max(1) as f64;
    let mean_risk = test.iter().map(|example| example.risk).sum::<f64>() / n;
    let mut absolute_error = 0.0;
    let mut squared_error = 0.0;
    let mut total_squares = 0.0;
    for example in test {
        let residual = example.risk - regression.predict(&example.features);
        absolute_error += residual.abs();
        squared_error += residual * residual;
        total_squares += (example.risk - mean_risk) * (example.risk - mean_risk);
    }
    Evaluation {
        mae: absolute_error / n,
        rmse: (squared_error / n).sqrt(),
        r_squared: 1.0 - squared_error / total_squares.max(f64::EPSILON),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn examples(n: usize) -> Vec<Example> {
        (0..n)
            .map(|index| Example {
                features: vec![index as f64],
                risk: index as f64,
            })
            .collect()
    }

    #[test]
    fn split_fractions_ok() {
        let (train, test) = split(examples(10), 0.2, 42);
        assert_eq!(train.len(), 8);
        assert_eq!(test.len(), 2);
    }

    #[test]
    fn split_is_reproducible() {
        let (train_1, test_1) = split(examples(100), 0.2, 42);
        let (train_2, test_2) = split(examples(100), 0.2, 42);
        let risks = |examples: &[Example]| {
            examples.iter().map(|example| example.risk).collect::<Vec<_>>()
        };
        assert_eq!(risks(&train_1), risks(&train_2));
        assert_eq!(risks(&test_1), risks(&test_2));
    }

    #[test]
    fn evaluate_perfect_fit_ok() {
        let regression = Regression {
            weights: vec![1.0],
            intercept: 0.0,
        };
        let evaluation = evaluate(&regression, &examples(10));
        assert!(evaluation.mae.abs() < f64::EPSILON);
        assert!(evaluation.rmse.abs() < f64::EPSILON);
        assert!((evaluation.r_squared - 1.0).abs() < 1e-12);
    }

    #[test]
    fn train_and_predict_end_to_end() {
        use crate::models::{FeatureRecord, Lighting, RoadType, TimeOfDay, Weather};
        use crate::opts::FitOpts;

        let observations: Vec<Observation> = (0..40)
            .map(|index| {
                let record = FeatureRecord {
                    road_type: RoadType::ALL[index % 3],
                    num_lanes: 1 + (index % 4) as u8,
                    curvature: (index % 10) as f64 / 10.0,
                    lighting: Lighting::ALL[index % 2],
                    weather: Weather::ALL[index % 3],
                    road_signs_present: index % 2 == 0,
                    public_road: index % 3 != 0,
                    time_of_day: TimeOfDay::ALL[index % 4],
                    holiday: index % 5 == 0,
                    school_season: index % 2 == 1,
                    high_speed: index % 3 == 2,
                };
                let risk = 0.1 + 0.5 * record.curvature + if record.high_speed { 0.2 } else { 0.0 };
                Observation { record, risk }
            })
            .collect();

        let encoder =
            CategoricalEncoder::fit(observations.iter().map(|observation| &observation.record));
        let examples = encode(&encoder, &observations);
        let (train, test) = split(examples, 0.2, 42);
        let fit_opts = FitOpts {
            learning_rate: 0.05,
            decay: 0.01,
            min_learning_rate: 0.001,
            n_epochs: 200,
            test_fraction: 0.2,
            seed: 42,
        };
        let (regression, losses) = regression::fit(encoder.n_features(), &train, &test, &fit_opts);
        assert!(losses.train.is_finite());

        let model = RiskModel {
            encoder,
            weights: regression.weights,
            intercept: regression.intercept,
            trained_at: Utc::now(),
            n_samples: observations.len(),
        };
        let record = FeatureRecord {
            road_type: RoadType::Urban,
            num_lanes: 2,
            curvature: 0.2,
            lighting: Lighting::Daylight,
            weather: Weather::Clear,
            road_signs_present: true,
            public_road: true,
            time_of_day: TimeOfDay::Morning,
            holiday: false,
            school_season: false,
            high_speed: false,
        };
        let prediction = model.predict(&record);
        assert!(prediction.is_finite());
        assert_eq!(prediction, crate::model::round_risk(prediction));
    }
}
