//! The trained pipeline artifact.

use std::fs::File;
use std::io::{BufReader, BufWriter, Write};
use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_pickle::{DeOptions, SerOptions};

use crate::math::dot;
use crate::model::encoder::CategoricalEncoder;
use crate::models::FeatureRecord;
use crate::prelude::*;

pub mod encoder;

/// The fitted encoder and linear regression, bundled into a single
/// serializable unit.
///
/// Created once by `saferoad train`, persisted to disk, loaded read-only at
/// serving start-up and never mutated afterwards.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct RiskModel {
    pub encoder: CategoricalEncoder,
    pub weights: Vec<f64>,
    pub intercept: f64,
    pub trained_at: DateTime,
    pub n_samples: usize,
}

impl RiskModel {
    /// Predicts the risk index for the record, rounded to 4 decimal digits.
    #[must_use]
    pub fn predict(&self, record: &FeatureRecord) -> f64 {
        round_risk(self.intercept + dot(&self.weights, &self.encoder.transform(record)))
    }

    /// Overwrites any existing artifact at the path.
    pub fn save(&self, path: &Path) -> Result {
        let file = File::create(path)
            .with_context(|| format!("failed to create `{}`", path.display()))?;
        let mut writer = BufWriter::new(file);
        serde_pickle::to_writer(&mut writer, self, SerOptions::new())
            .with_context(|| format!("failed to serialize the model to `{}`", path.display()))?;
        writer
            .flush()
            .with_context(|| format!("failed to flush `{}`", path.display()))
    }

    pub fn load(path: &Path) -> Result<Self> {
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        serde_pickle::from_reader(BufReader::new(file), DeOptions::new())
            .with_context(|| format!("failed to deserialize the model from `{}`", path.display()))
    }
}

/// Rounds a risk index to 4 decimal digits.
#[must_use]
pub fn round_risk(risk: f64) -> f64 {
    (risk * 1e4).round() / 1e4
}

/// Severity tier of a risk index, as displayed by the dashboard.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum RiskBand {
    Low,
    Elevated,
    Critical,
}

impl RiskBand {
    #[must_use]
    pub fn from_risk(risk: f64) -> Self {
        if risk > 0.5 {
            Self::Critical
        } else if risk > 0.2 {
            Self::Elevated
        } else {
            Self::Low
        }
    }
}

#[cfg(test)]
mod tests {
    use chrono::Utc;

    use super::*;
    use crate::models::{Lighting, RoadType, TimeOfDay, Weather};

    fn sample_record() -> FeatureRecord {
        FeatureRecord {
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
        }
    }

    fn sample_model() -> RiskModel {
        let records = [
            sample_record(),
            FeatureRecord {
                road_type: RoadType::Rural,
                lighting: Lighting::Night,
                weather: Weather::Rainy,
                time_of_day: TimeOfDay::Evening,
                ..sample_record()
            },
        ];
        let encoder = CategoricalEncoder::fit(&records);
        let weights = (0..encoder.n_features())
            .map(|index| 0.01 * index as f64)
            .collect();
        RiskModel {
            encoder,
            weights,
            intercept: 0.05,
            trained_at: Utc::now(),
            n_samples: records.len(),
        }
    }

    #[test]
    fn round_risk_ok() {
        assert_eq!(round_risk(0.123_456), 0.1235);
        assert_eq!(round_risk(0.5), 0.5);
        assert_eq!(round_risk(-0.000_04), -0.0);
    }

    #[test]
    fn risk_band_thresholds_ok() {
        assert_eq!(RiskBand::from_risk(0.0), RiskBand::Low);
        assert_eq!(RiskBand::from_risk(0.2), RiskBand::Low);
        assert_eq!(RiskBand::from_risk(0.2001), RiskBand::Elevated);
        assert_eq!(RiskBand::from_risk(0.5), RiskBand::Elevated);
        assert_eq!(RiskBand::from_risk(0.5001), RiskBand::Critical);
    }

    #[test]
    fn predict_is_idempotent() {
        let model = sample_model();
        let record = sample_record();
        assert_eq!(
            model.predict(&record).to_bits(),
            model.predict(&record).to_bits(),
        );
    }

    #[test]
    fn pickle_round_trip_preserves_predictions() {
        let model = sample_model();
        let buffer = serde_pickle::to_vec(&model, SerOptions::new()).unwrap();
        let restored: RiskModel = serde_pickle::from_slice(&buffer, DeOptions::new()).unwrap();
        assert_eq!(restored, model);

        let record = sample_record();
        assert_eq!(
            restored.predict(&record).to_bits(),
            model.predict(&record).to_bits(),
        );
    }
}
