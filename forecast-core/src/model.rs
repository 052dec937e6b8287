use chrono::NaiveDate;
use serde::{Deserialize, Serialize, Serializer, ser::SerializeStruct};

/// Divisor the upstream API uses to derive Fahrenheit from Celsius.
const FAHRENHEIT_DIVISOR: f64 = 0.5556;

/// One day of forecast data, either fetched or synthesized.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct ForecastRecord {
    #[serde(alias = "Date")]
    pub date: NaiveDate,

    #[serde(
        rename = "temperatureC",
        alias = "temperatureCelsius",
        alias = "TemperatureC"
    )]
    pub temperature_c: i32,

    /// Free text when fetched remotely; one of [`crate::mock::SUMMARIES`] when mocked.
    #[serde(default, alias = "Summary")]
    pub summary: Option<String>,
}

impl ForecastRecord {
    pub fn new(date: NaiveDate, temperature_c: i32, summary: Option<String>) -> Self {
        Self { date, temperature_c, summary }
    }

    /// `32 + (C / 0.5556)`, truncated toward zero.
    pub fn temperature_f(&self) -> i32 {
        32 + (f64::from(self.temperature_c) / FAHRENHEIT_DIVISOR) as i32
    }
}

impl Serialize for ForecastRecord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut s = serializer.serialize_struct("ForecastRecord", 4)?;
        s.serialize_field("date", &self.date)?;
        s.serialize_field("temperatureC", &self.temperature_c)?;
        s.serialize_field("summary", &self.summary)?;
        s.serialize_field("temperatureF", &self.temperature_f())?;
        s.end()
    }
}
