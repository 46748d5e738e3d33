//! The feature schema shared between training and serving.

use std::ops::RangeInclusive;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::prelude::*;

/// Lane count domain.
pub const NUM_LANES_RANGE: RangeInclusive<u8> = 1..=4;

/// Curvature domain: `0` is straight, `1` is the sharpest turn.
pub const CURVATURE_RANGE: RangeInclusive<f64> = 0.0..=1.0;

/// Speed limits strictly above this value are flagged as `high_speed`.
pub const HIGH_SPEED_THRESHOLD: f64 = 45.0;

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
pub enum RoadType {
    Urban,
    Rural,
    Highway,
}

impl RoadType {
    pub const ALL: [Self; 3] = [Self::Urban, Self::Rural, Self::Highway];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Urban => "Urban",
            Self::Rural => "Rural",
            Self::Highway => "Highway",
        }
    }
}

impl FromStr for RoadType {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "Urban" => Ok(Self::Urban),
            "Rural" => Ok(Self::Rural),
            "Highway" => Ok(Self::Highway),
            _ => Err(anyhow!("`{value}` is not a valid road type")),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Lighting {
    Daylight,
    Night,
}

impl Lighting {
    pub const ALL: [Self; 2] = [Self::Daylight, Self::Night];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Daylight => "daylight",
            Self::Night => "night",
        }
    }
}

impl FromStr for Lighting {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "daylight" => Ok(Self::Daylight),
            "night" => Ok(Self::Night),
            _ => Err(anyhow!("`{value}` is not a valid lighting condition")),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Weather {
    Clear,
    Rainy,
    Foggy,
}

impl Weather {
    pub const ALL: [Self; 3] = [Self::Clear, Self::Rainy, Self::Foggy];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Clear => "clear",
            Self::Rainy => "rainy",
            Self::Foggy => "foggy",
        }
    }
}

impl FromStr for Weather {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "clear" => Ok(Self::Clear),
            "rainy" => Ok(Self::Rainy),
            "foggy" => Ok(Self::Foggy),
            _ => Err(anyhow!("`{value}` is not a valid weather condition")),
        }
    }
}

#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TimeOfDay {
    Morning,
    Afternoon,
    Evening,
    Night,
}

impl TimeOfDay {
    pub const ALL: [Self; 4] = [Self::Morning, Self::Afternoon, Self::Evening, Self::Night];

    #[must_use]
    pub const fn to_str(self) -> &'static str {
        match self {
            Self::Morning => "morning",
            Self::Afternoon => "afternoon",
            Self::Evening => "evening",
            Self::Night => "night",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = anyhow::Error;

    fn from_str(value: &str) -> Result<Self> {
        match value {
            "morning" => Ok(Self::Morning),
            "afternoon" => Ok(Self::Afternoon),
            "evening" => Ok(Self::Evening),
            "night" => Ok(Self::Night),
            _ => Err(anyhow!("`{value}` is not a valid time of day")),
        }
    }
}

/// Categorical columns of the feature schema, in encoding order.
#[derive(Serialize, Deserialize, Copy, Clone, Debug, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum CategoricalColumn {
    RoadType,
    Lighting,
    Weather,
    TimeOfDay,
}

impl CategoricalColumn {
    pub const ALL: [Self; 4] = [Self::RoadType, Self::Lighting, Self::Weather, Self::TimeOfDay];

    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::RoadType => "road_type",
            Self::Lighting => "lighting",
            Self::Weather => "weather",
            Self::TimeOfDay => "time_of_day",
        }
    }
}

/// One structured model input, one field per recognised predictor.
///
/// The set of fields is the contract between training and both front ends:
/// `speed_limit` never appears here, only the derived `high_speed` flag does.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
pub struct FeatureRecord {
    pub road_type: RoadType,
    pub num_lanes: u8,
    pub curvature: f64,
    pub lighting: Lighting,
    pub weather: Weather,
    pub road_signs_present: bool,
    pub public_road: bool,
    pub time_of_day: TimeOfDay,
    pub holiday: bool,
    pub school_season: bool,
    pub high_speed: bool,
}

impl FeatureRecord {
    pub const N_NUMERIC: usize = 2;
    pub const N_FLAGS: usize = 5;

    #[must_use]
    pub fn categorical(&self, column: CategoricalColumn) -> &'static str {
        match column {
            CategoricalColumn::RoadType => self.road_type.to_str(),
            CategoricalColumn::Lighting => self.lighting.to_str(),
            CategoricalColumn::Weather => self.weather.to_str(),
            CategoricalColumn::TimeOfDay => self.time_of_day.to_str(),
        }
    }

    /// Numeric pass-through columns: `num_lanes`, `curvature`.
    #[must_use]
    pub fn numerics(&self) -> [f64; Self::N_NUMERIC] {
        [f64::from(self.num_lanes), self.curvature]
    }

    /// Boolean pass-through columns, in schema order.
    #[must_use]
    pub fn flags(&self) -> [bool; Self::N_FLAGS] {
        [
            self.road_signs_present,
            self.public_road,
            self.holiday,
            self.school_season,
            self.high_speed,
        ]
    }
}

/// Parses a boolean field as spelled in the datasets and on the wire.
pub fn parse_flag(value: &str) -> Result<bool> {
    match value.trim() {
        "1" | "true" | "True" | "TRUE" => Ok(true),
        "0" | "false" | "False" | "FALSE" => Ok(false),
        _ => Err(anyhow!("`{value}` is not a valid flag")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn road_type_from_str_ok() {
        for road_type in RoadType::ALL {
            assert_eq!(road_type.to_str().parse::<RoadType>().unwrap(), road_type);
        }
        assert!("urban".parse::<RoadType>().is_err());
    }

    #[test]
    fn lighting_from_str_ok() {
        for lighting in Lighting::ALL {
            assert_eq!(lighting.to_str().parse::<Lighting>().unwrap(), lighting);
        }
        assert!("dusk".parse::<Lighting>().is_err());
    }

    #[test]
    fn weather_from_str_ok() {
        for weather in Weather::ALL {
            assert_eq!(weather.to_str().parse::<Weather>().unwrap(), weather);
        }
        assert!("snowy".parse::<Weather>().is_err());
    }

    #[test]
    fn time_of_day_from_str_ok() {
        for time_of_day in TimeOfDay::ALL {
            assert_eq!(time_of_day.to_str().parse::<TimeOfDay>().unwrap(), time_of_day);
        }
        assert!("noon".parse::<TimeOfDay>().is_err());
    }

    #[test]
    fn parse_flag_ok() {
        for value in ["1", "true", "True", "TRUE"] {
            assert!(parse_flag(value).unwrap());
        }
        for value in ["0", "false", "False", "FALSE"] {
            assert!(!parse_flag(value).unwrap());
        }
        assert!(parse_flag("yes").is_err());
        assert!(parse_flag("").is_err());
    }

    #[test]
    fn flags_follow_schema_order() {
        let record = FeatureRecord {
            road_type: RoadType::Urban,
            num_lanes: 2,
            curvature: 0.2,
            lighting: Lighting::Daylight,
            weather: Weather::Clear,
            road_signs_present: true,
            public_road: false,
            time_of_day: TimeOfDay::Morning,
            holiday: true,
            school_season: false,
            high_speed: true,
        };
        assert_eq!(record.flags(), [true, false, true, false, true]);
        assert_eq!(record.numerics(), [2.0, 0.2]);
    }
}
