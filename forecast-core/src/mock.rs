//! Synthesized forecasts for local mode and for the fallback path.

use chrono::{Duration, Local, NaiveDate};

use crate::{model::ForecastRecord, random::RandomSource};

pub const SUMMARIES: [&str; 10] = [
    "Freezing",
    "Bracing",
    "Chilly",
    "Cool",
    "Mild",
    "Warm",
    "Balmy",
    "Hot",
    "Sweltering",
    "Scorching",
];

pub const MIN_TEMPERATURE_C: i32 = -20;
pub const MAX_TEMPERATURE_C_EXCLUSIVE: i32 = 55;
pub const DEFAULT_DAYS: usize = 5;

/// Generate `days` records starting tomorrow, relative to the local calendar date.
pub fn generate_mock(days: usize, rng: &dyn RandomSource) -> Vec<ForecastRecord> {
    generate_mock_from(Local::now().date_naive(), days, rng)
}

/// Generate records dated `today + 1 ..= today + days`.
pub fn generate_mock_from(
    today: NaiveDate,
    days: usize,
    rng: &dyn RandomSource,
) -> Vec<ForecastRecord> {
    (1..=days as i64)
        .map(|offset| {
            let temperature_c =
                rng.next_in_range(MIN_TEMPERATURE_C..MAX_TEMPERATURE_C_EXCLUSIVE);
            let summary = SUMMARIES[rng.next_in_range(0..SUMMARIES.len() as i32) as usize];

            ForecastRecord::new(today + Duration::days(offset), temperature_c, Some(summary.to_string()))
        })
        .collect()
}
