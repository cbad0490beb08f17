//! Normalized player record shape consumed by the matcher.
//!
//! Records arrive as JSON objects produced by the per-source loaders. Every
//! field is lenient: a value of the wrong type degrades to "absent" instead of
//! failing deserialization, so a single dirty row never aborts a batch.

use std::collections::BTreeMap;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use crate::constants::stats::PPG_KEY;

/// One player as reported by one data source.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerRecord {
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub first_name: String,
    #[serde(default, deserialize_with = "lenient::string_or_empty")]
    pub last_name: String,
    #[serde(
        default,
        deserialize_with = "lenient::optional_year",
        skip_serializing_if = "Option::is_none"
    )]
    pub birth_year: Option<i32>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub first_season: Option<String>,
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub last_season: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seasons: Option<Seasons>,
    /// Name of the source dataset, carried through for the merge layer
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source: Option<String>,
    /// Identifier of the row within its source
    #[serde(
        default,
        deserialize_with = "lenient::optional_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub source_id: Option<String>,
}

impl PlayerRecord {
    pub fn new(first_name: impl Into<String>, last_name: impl Into<String>) -> Self {
        Self {
            first_name: first_name.into(),
            last_name: last_name.into(),
            ..Self::default()
        }
    }

    /// Season stats keyed by season, or `None` when absent or malformed.
    pub fn season_stats(&self) -> Option<&BTreeMap<String, SeasonLine>> {
        match &self.seasons {
            Some(Seasons::Stats(map)) => Some(map),
            Some(Seasons::Malformed) | None => None,
        }
    }
}

/// Season-indexed stats of a record.
///
/// Anything other than a JSON object is kept as `Malformed` so callers can
/// tell "no data" from "unusable data" in logs.
#[derive(Debug, Clone, PartialEq)]
pub enum Seasons {
    Stats(BTreeMap<String, SeasonLine>),
    Malformed,
}

impl Serialize for Seasons {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Seasons::Stats(map) => map.serialize(serializer),
            Seasons::Malformed => serializer.serialize_none(),
        }
    }
}

impl From<Value> for Seasons {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(entries) => Seasons::Stats(
                entries
                    .into_iter()
                    .map(|(season, line)| (season, SeasonLine::from(line)))
                    .collect(),
            ),
            _ => Seasons::Malformed,
        }
    }
}

impl<'de> Deserialize<'de> for Seasons {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Value::deserialize(deserializer).map(Seasons::from)
    }
}

impl From<BTreeMap<String, SeasonLine>> for Seasons {
    fn from(map: BTreeMap<String, SeasonLine>) -> Self {
        Seasons::Stats(map)
    }
}

/// Per-season stat line. Only points per game takes part in matching.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct SeasonLine {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ppg: Option<f64>,
}

impl SeasonLine {
    pub fn with_ppg(ppg: f64) -> Self {
        Self { ppg: Some(ppg) }
    }
}

impl From<Value> for SeasonLine {
    fn from(value: Value) -> Self {
        let ppg = value
            .get(PPG_KEY)
            .and_then(Value::as_f64)
            .filter(|ppg| ppg.is_finite());
        Self { ppg }
    }
}

mod lenient {
    use serde::{Deserialize, Deserializer};
    use serde_json::Value;

    pub fn string_or_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
        Ok(optional_string(deserializer)?.unwrap_or_default())
    }

    pub fn optional_string<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<String>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            Value::String(s) => Some(s),
            _ => None,
        })
    }

    pub fn optional_year<'de, D: Deserializer<'de>>(
        deserializer: D,
    ) -> Result<Option<i32>, D::Error> {
        Ok(match Value::deserialize(deserializer)? {
            // Whole floats such as 1959.0 count; fractional years do not
            Value::Number(n) => n
                .as_i64()
                .or_else(|| n.as_f64().filter(|y| y.fract() == 0.0).map(|y| y as i64))
                .and_then(|year| i32::try_from(year).ok()),
            _ => None,
        })
    }
}
