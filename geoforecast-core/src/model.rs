use std::{fmt, str::FromStr};

use anyhow::anyhow;
use chrono::{DateTime, FixedOffset, NaiveDateTime};
use serde::{
    Deserialize, Deserializer, Serialize,
    de::{self, MapAccess, Visitor},
};

/// Geographic position, also the body of the forecast request.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

impl Position {
    pub fn new(latitude: f64, longitude: f64) -> Self {
        Self {
            latitude,
            longitude,
        }
    }
}

/// Response of the forecast server.
///
/// The server also echoes the coordinates and today's date; those fields are
/// not displayed and are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct ForecastResponse {
    pub forecast: ForecastPayload,
}

impl ForecastResponse {
    /// Unwrap the forecast, turning a server-reported failure into an error.
    pub fn into_forecast(self) -> anyhow::Result<Forecast> {
        match self.forecast {
            ForecastPayload::Forecast(forecast) => Ok(forecast),
            ForecastPayload::Error { error } => {
                Err(anyhow!("Forecast server reported an error: {error}"))
            }
        }
    }
}

/// The server answers `{"error": "..."}` in place of the forecast when its
/// upstream weather source fails.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum ForecastPayload {
    Forecast(Forecast),
    Error { error: String },
}

#[derive(Debug, Clone, Deserialize)]
pub struct Forecast {
    pub current: Conditions,
    pub hourly: HourlyForecast,
}

/// Weather at one point in time, as prepared by the server.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Conditions {
    pub icon_url: String,
    pub description: String,
    /// Degrees Celsius.
    pub temperature: f64,
    /// Millimetres.
    pub precipitation: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct HourlyEntry {
    pub time: ForecastTime,
    pub conditions: Conditions,
}

/// Hourly forecast in the order the server listed it.
///
/// On the wire this is a JSON object keyed by timestamp. A `max_time` key in
/// the same object, when present, caps how many entries get rendered.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct HourlyForecast {
    pub entries: Vec<HourlyEntry>,
    pub max_time: Option<usize>,
}

impl HourlyForecast {
    pub fn new(entries: Vec<HourlyEntry>) -> Self {
        Self {
            entries,
            max_time: None,
        }
    }

    pub fn with_max_time(mut self, max_time: usize) -> Self {
        self.max_time = Some(max_time);
        self
    }

    /// Entries that should be displayed, honouring `max_time`.
    pub fn visible(&self) -> &[HourlyEntry] {
        let len = self.entries.len();
        let limit = self.max_time.map_or(len, |max| max.min(len));
        &self.entries[..limit]
    }
}

impl<'de> Deserialize<'de> for HourlyForecast {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct HourlyVisitor;

        impl<'de> Visitor<'de> for HourlyVisitor {
            type Value = HourlyForecast;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map of timestamps to hourly conditions")
            }

            fn visit_map<A>(self, mut map: A) -> Result<Self::Value, A::Error>
            where
                A: MapAccess<'de>,
            {
                let mut hourly = HourlyForecast::default();

                while let Some(key) = map.next_key::<String>()? {
                    if key == "max_time" {
                        hourly.max_time = map.next_value::<Option<usize>>()?;
                        continue;
                    }

                    let time = key.parse::<ForecastTime>().map_err(de::Error::custom)?;
                    let conditions = map.next_value::<Conditions>()?;
                    hourly.entries.push(HourlyEntry { time, conditions });
                }

                Ok(hourly)
            }
        }

        deserializer.deserialize_map(HourlyVisitor)
    }
}

/// Timestamp of an hourly entry.
///
/// Keys with an offset are instants; keys without one are wall-clock times
/// and are displayed unchanged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ForecastTime {
    Zoned(DateTime<FixedOffset>),
    Naive(NaiveDateTime),
}

impl FromStr for ForecastTime {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(Self::Zoned(dt));
        }

        if let Ok(naive) = s.parse::<NaiveDateTime>() {
            return Ok(Self::Naive(naive));
        }

        // Open-Meteo style, minutes precision.
        NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M")
            .map(Self::Naive)
            .map_err(|_| anyhow!("Invalid forecast timestamp '{s}'"))
    }
}
