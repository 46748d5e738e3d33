//! Historical accident datasets.

use std::collections::HashSet;
use std::fs::File;
use std::io::Read;
use std::path::PathBuf;

use itertools::Itertools;
use serde::{Deserialize, Deserializer};

use crate::models::{
    parse_flag, FeatureRecord, Lighting, RoadType, TimeOfDay, Weather, HIGH_SPEED_THRESHOLD,
};
use crate::prelude::*;

/// One de-duplicated historical observation: the derived feature record and
/// the `accident_risk` target.
pub struct Observation {
    pub record: FeatureRecord,
    pub risk: f64,
}

/// A raw dataset row. `num_reported_accidents` is an unused label and is not
/// read at all; `speed_limit` is consumed only to derive `high_speed`.
#[derive(Deserialize)]
struct RawRow {
    road_type: RoadType,
    num_lanes: u8,
    curvature: f64,
    speed_limit: f64,
    lighting: Lighting,
    weather: Weather,
    #[serde(deserialize_with = "deserialize_flag")]
    road_signs_present: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    public_road: bool,
    time_of_day: TimeOfDay,
    #[serde(deserialize_with = "deserialize_flag")]
    holiday: bool,
    #[serde(deserialize_with = "deserialize_flag")]
    school_season: bool,
    accident_risk: f64,
}

impl From<RawRow> for Observation {
    fn from(row: RawRow) -> Self {
        Self {
            record: FeatureRecord {
                road_type: row.road_type,
                num_lanes: row.num_lanes,
                curvature: row.curvature,
                lighting: row.lighting,
                weather: row.weather,
                road_signs_present: row.road_signs_present,
                public_road: row.public_road,
                time_of_day: row.time_of_day,
                holiday: row.holiday,
                school_season: row.school_season,
                high_speed: row.speed_limit > HIGH_SPEED_THRESHOLD,
            },
            risk: row.accident_risk,
        }
    }
}

/// Loads and concatenates the datasets. Any unreadable file or malformed row
/// is fatal: training is an offline batch step, the operator fixes the inputs
/// and reruns.
pub fn load(paths: &[PathBuf]) -> Result<Vec<Observation>> {
    let mut seen = HashSet::new();
    let mut observations = Vec::new();
    for path in paths {
        let file =
            File::open(path).with_context(|| format!("failed to open `{}`", path.display()))?;
        let n_before = observations.len();
        read(file, &mut seen, &mut observations)
            .with_context(|| format!("failed to read `{}`", path.display()))?;
        info!(
            path = %path.display(),
            n_rows = observations.len() - n_before,
            "dataset loaded",
        );
    }
    if observations.is_empty() {
        bail!("the training set is empty");
    }
    Ok(observations)
}

/// Reads one dataset, dropping rows whose raw values exactly match an already
/// seen row, across all input files, as they are concatenated.
fn read(
    reader: impl Read,
    seen: &mut HashSet<String>,
    observations: &mut Vec<Observation>,
) -> Result {
    let mut reader = csv::Reader::from_reader(reader);
    let headers = reader.headers()?.clone();
    for record in reader.records() {
        let record = record?;
        if !seen.insert(record.iter().join("\x1F")) {
            continue;
        }
        let row: RawRow = record.deserialize(Some(&headers))?;
        observations.push(row.into());
    }
    Ok(())
}

fn deserialize_flag<'de, D: Deserializer<'de>>(deserializer: D) -> StdResult<bool, D::Error> {
    let value = String::deserialize(deserializer)?;
    parse_flag(&value).map_err(serde::de::Error::custom)
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "road_type,num_lanes,curvature,speed_limit,lighting,weather,road_signs_present,public_road,time_of_day,holiday,school_season,num_reported_accidents,accident_risk";

    fn read_str(csv: &str) -> Result<Vec<Observation>> {
        let mut seen = HashSet::new();
        let mut observations = Vec::new();
        read(csv.as_bytes(), &mut seen, &mut observations)?;
        Ok(observations)
    }

    #[test]
    fn exact_duplicates_are_dropped() {
        let csv = format!(
            "{HEADER}\n\
            Urban,2,0.2,50,daylight,clear,1,1,morning,0,0,3,0.45\n\
            Urban,2,0.2,50,daylight,clear,1,1,morning,0,0,3,0.45\n\
            Urban,2,0.2,50,daylight,clear,1,1,morning,0,0,4,0.45\n",
        );
        let observations = read_str(&csv).unwrap();
        // The third row differs in `num_reported_accidents` and survives.
        assert_eq!(observations.len(), 2);
    }

    #[test]
    fn high_speed_is_derived_from_speed_limit() {
        let csv = format!(
            "{HEADER}\n\
            Urban,2,0.2,50,daylight,clear,1,1,morning,0,0,3,0.45\n\
            Rural,1,0.8,45,night,foggy,0,1,evening,1,1,0,0.9\n",
        );
        let observations = read_str(&csv).unwrap();
        assert!(observations[0].record.high_speed);
        // The threshold is strictly greater-than.
        assert!(!observations[1].record.high_speed);
        assert_eq!(observations[1].risk, 0.9);
    }

    #[test]
    fn pandas_style_flags_are_accepted() {
        let csv = format!(
            "{HEADER}\n\
            Highway,4,0.1,70,daylight,rainy,True,False,afternoon,False,True,1,0.3\n",
        );
        let observations = read_str(&csv).unwrap();
        assert!(observations[0].record.road_signs_present);
        assert!(!observations[0].record.public_road);
        assert!(observations[0].record.school_season);
    }

    #[test]
    fn unknown_category_is_fatal() {
        let csv = format!(
            "{HEADER}\n\
            Urban,2,0.2,50,daylight,snowy,1,1,morning,0,0,3,0.45\n",
        );
        assert!(read_str(&csv).is_err());
    }

    #[test]
    fn missing_file_is_fatal() {
        assert!(load(&[PathBuf::from("no/such/dataset.csv")]).is_err());
    }
}
