//! Prediction form parsing and validation.

use std::fmt::{self, Display};

use serde::Deserialize;

use crate::models::{
    parse_flag, FeatureRecord, CURVATURE_RANGE, NUM_LANES_RANGE,
};
use crate::prelude::*;

/// The raw prediction form, one optional string per schema field.
///
/// Validation happens in [`PredictForm::parse`] so that a malformed request
/// is rejected with a field-level message before the model is touched.
/// Unknown keys fail the extraction outright.
#[derive(Deserialize, Default)]
#[serde(deny_unknown_fields)]
pub struct PredictForm {
    pub road_type: Option<String>,
    pub num_lanes: Option<String>,
    pub curvature: Option<String>,
    pub lighting: Option<String>,
    pub weather: Option<String>,
    pub road_signs_present: Option<String>,
    pub public_road: Option<String>,
    pub time_of_day: Option<String>,
    pub holiday: Option<String>,
    pub school_season: Option<String>,
    pub high_speed: Option<String>,
}

/// A single request's schema violation: the offending field and a
/// user-visible message.
#[derive(Debug)]
pub struct SchemaViolation {
    pub field: &'static str,
    pub message: String,
}

impl Display for SchemaViolation {
    fn fmt(&self, formatter: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(formatter, "{}: {}", self.field, self.message)
    }
}

impl PredictForm {
    pub fn parse(&self) -> StdResult<FeatureRecord, SchemaViolation> {
        Ok(FeatureRecord {
            road_type: parse_value(&self.road_type, "road_type")?,
            num_lanes: parse_num_lanes(&self.num_lanes)?,
            curvature: parse_curvature(&self.curvature)?,
            lighting: parse_value(&self.lighting, "lighting")?,
            weather: parse_value(&self.weather, "weather")?,
            road_signs_present: parse_flag_value(&self.road_signs_present, "road_signs_present")?,
            public_road: parse_flag_value(&self.public_road, "public_road")?,
            time_of_day: parse_value(&self.time_of_day, "time_of_day")?,
            holiday: parse_flag_value(&self.holiday, "holiday")?,
            school_season: parse_flag_value(&self.school_season, "school_season")?,
            high_speed: parse_flag_value(&self.high_speed, "high_speed")?,
        })
    }
}

fn require<'a>(
    value: &'a Option<String>,
    field: &'static str,
) -> StdResult<&'a str, SchemaViolation> {
    match value.as_deref() {
        Some(value) if !value.is_empty() => Ok(value),
        _ => Err(SchemaViolation {
            field,
            message: "the field is missing".to_string(),
        }),
    }
}

fn parse_value<T>(value: &Option<String>, field: &'static str) -> StdResult<T, SchemaViolation>
where
    T: std::str::FromStr<Err = anyhow::Error>,
{
    require(value, field)?.parse().map_err(|error: anyhow::Error| SchemaViolation {
        field,
        message: format!("{error:#}"),
    })
}

fn parse_flag_value(
    value: &Option<String>,
    field: &'static str,
) -> StdResult<bool, SchemaViolation> {
    parse_flag(require(value, field)?).map_err(|error| SchemaViolation {
        field,
        message: format!("{error:#}"),
    })
}

fn parse_num_lanes(value: &Option<String>) -> StdResult<u8, SchemaViolation> {
    const FIELD: &str = "num_lanes";
    let value: u8 = require(value, FIELD)?.parse().map_err(|_| SchemaViolation {
        field: FIELD,
        message: "expected an integer".to_string(),
    })?;
    if NUM_LANES_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(SchemaViolation {
            field: FIELD,
            message: format!("{value} is out of the {NUM_LANES_RANGE:?} lane range"),
        })
    }
}

fn parse_curvature(value: &Option<String>) -> StdResult<f64, SchemaViolation> {
    const FIELD: &str = "curvature";
    let value: f64 = require(value, FIELD)?.parse().map_err(|_| SchemaViolation {
        field: FIELD,
        message: "expected a number".to_string(),
    })?;
    if CURVATURE_RANGE.contains(&value) {
        Ok(value)
    } else {
        Err(SchemaViolation {
            field: FIELD,
            message: format!("{value} is out of the {CURVATURE_RANGE:?} range"),
        })
    }
}
