use chrono::NaiveDate;
use forecast_core::{ForecastOutcome, ForecastSource};
use std::fmt::Write;

const DATE_FORMAT: &str = "%a %Y-%m-%d";

/// Format a forecast as a plain-text table followed by its source.
pub fn forecast_table(outcome: &ForecastOutcome) -> String {
    let mut out = String::new();

    if outcome.records.is_empty() {
        out.push_str("No forecast data available.\n");
    } else {
        let _ = writeln!(out, "{:<16} {:>9} {:>9}  Summary", "Date", "Temp. (C)", "Temp. (F)");
        for r in &outcome.records {
            let _ = writeln!(
                out,
                "{:<16} {:>9} {:>9}  {}",
                format_date(r.date),
                r.temperature_c,
                r.temperature_f(),
                r.summary.as_deref().unwrap_or("-"),
            );
        }
    }

    let source = match outcome.source {
        ForecastSource::Remote => "remote API",
        ForecastSource::Mock => "generated locally",
    };
    let _ = writeln!(out, "Source: {source}");
    out
}

fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}
