use chrono::{DateTime, Local, SecondsFormat, TimeZone};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::{Error, Result};

/// Top-level numeric fields copied through unchanged.
const COPY_FIELDS: [&str; 8] = [
    "clouds",
    "snow",
    "rain",
    "pop",
    "wind_speed",
    "wind_deg",
    "wind_gust",
    "humidity",
];

/// Nested fields hoisted to the top level, as (output key, path).
const NESTED_FIELDS: [(&str, [&str; 2]); 3] = [
    ("temp_day", ["temp", "day"]),
    ("temp_morn", ["temp", "morn"]),
    ("temp_eve", ["temp", "eve"]),
];

/// Epoch-seconds fields rendered as RFC 3339 strings.
const TIMESTAMP_FIELDS: [&str; 3] = ["dt", "sunrise", "sunset"];

/// How epoch timestamps are rendered.
///
/// The provider reports UTC epochs. [`TimestampMode::Utc`] keeps the output
/// independent of where the program happens to run and is the default;
/// [`TimestampMode::Local`] renders the same instants with the host
/// timezone offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TimestampMode {
    #[default]
    Utc,
    Local,
}

/// One day of forecast, flattened to a fixed schema.
///
/// Every field is optional: a day the provider reports without rain simply
/// carries `rain: None`, and serializing the record still emits all
/// fourteen keys, with `null` where a value was absent. Timestamps are
/// RFC 3339 strings; the other fields are numbers in whatever units the
/// provider used for the request.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ForecastDay {
    pub dt: Option<String>,
    pub sunrise: Option<String>,
    pub sunset: Option<String>,
    pub clouds: Option<f64>,
    pub snow: Option<f64>,
    pub rain: Option<f64>,
    pub pop: Option<f64>,
    pub wind_speed: Option<f64>,
    pub wind_deg: Option<f64>,
    pub wind_gust: Option<f64>,
    pub humidity: Option<f64>,
    pub temp_day: Option<f64>,
    pub temp_morn: Option<f64>,
    pub temp_eve: Option<f64>,
}

/// Projects one raw `daily` entry onto the flat [`ForecastDay`] schema.
///
/// The field tables above drive the projection; anything the tables do not
/// name is dropped, and anything they name that the entry lacks comes out
/// as `None`. An entry that is not even an object yields an all-`None`
/// record rather than an error.
pub(crate) fn project_day(day: &Value, timestamps: TimestampMode) -> Result<ForecastDay> {
    let mut record = Map::new();

    for field in TIMESTAMP_FIELDS {
        let rendered = day
            .get(field)
            .and_then(epoch_seconds)
            .and_then(|secs| format_epoch(secs, timestamps))
            .map(Value::String);
        record.insert(field.to_string(), rendered.unwrap_or(Value::Null));
    }

    for field in COPY_FIELDS {
        let value = day.get(field).cloned();
        record.insert(field.to_string(), value.unwrap_or(Value::Null));
    }

    for (field, path) in NESTED_FIELDS {
        let value = lookup(day, &path).cloned();
        record.insert(field.to_string(), value.unwrap_or(Value::Null));
    }

    serde_json::from_value(Value::Object(record)).map_err(Error::Decode)
}

/// Accepts integer or fractional epochs; fractional seconds are dropped.
fn epoch_seconds(value: &Value) -> Option<i64> {
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|secs| secs as i64))
}

fn format_epoch(secs: i64, timestamps: TimestampMode) -> Option<String> {
    let rendered = match timestamps {
        TimestampMode::Utc => {
            DateTime::from_timestamp(secs, 0)?.to_rfc3339_opts(SecondsFormat::Secs, true)
        }
        TimestampMode::Local => Local
            .timestamp_opt(secs, 0)
            .single()?
            .to_rfc3339_opts(SecondsFormat::Secs, false),
    };
    Some(rendered)
}

/// Walks `path` through nested objects. Any non-object along the way ends
/// the walk with `None`.
fn lookup<'a>(day: &'a Value, path: &[&str]) -> Option<&'a Value> {
    path.iter().try_fold(day, |node, segment| node.get(segment))
}
