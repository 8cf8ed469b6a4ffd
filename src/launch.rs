//! Launch-time averaging over a CSV export of launch records.
//!
//! Each record carries a datum such as `Fri Aug 07, 2020 05:12 UTC`; the
//! `HH:MM` token before the marker is taken as the launch time of day.

use crate::config::LaunchConfig;
use crate::error::{LaunchError, LaunchParseError};
use crate::timecode::TimeCode;
use serde::Serialize;
use std::io::BufRead;

/// Result of averaging a launch data set.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LaunchSummary {
    pub data_points: usize,
    pub skipped: usize,
    pub average: TimeCode,
}

/// Split one CSV line into fields.
///
/// Double quotes toggle quoting and are dropped; commas inside quotes are kept.
pub fn split_csv(line: &str) -> Vec<String> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut inside_quotes = false;

    for ch in line.chars() {
        match ch {
            '"' => inside_quotes = !inside_quotes,
            ',' if !inside_quotes => fields.push(std::mem::take(&mut field)),
            _ => field.push(ch),
        }
    }

    fields.push(field);
    fields
}

/// Extract the launch time of day from one CSV record.
pub fn parse_line(line: &str, config: &LaunchConfig) -> Result<TimeCode, LaunchParseError> {
    let fields = split_csv(line);
    let datum = fields
        .get(config.datum_column)
        .ok_or(LaunchParseError::MissingColumn {
            column: config.datum_column,
            found: fields.len(),
        })?;

    let marker = format!(" {}", config.marker);
    let marker_pos = datum
        .rfind(&marker)
        .ok_or_else(|| LaunchParseError::MissingMarker(config.marker.clone()))?;

    // A datum that is only "HH:MM UTC" (no date before it) is accepted too
    let time_part = datum[..marker_pos]
        .rsplit(' ')
        .next()
        .filter(|token| !token.is_empty())
        .ok_or(LaunchParseError::MissingTime)?;

    parse_hours_minutes(time_part)
}

fn parse_hours_minutes(text: &str) -> Result<TimeCode, LaunchParseError> {
    let malformed = || LaunchParseError::MalformedTime(text.to_string());

    let (hours, minutes) = text.split_once(':').ok_or_else(malformed)?;
    let hours: u32 = hours.parse().map_err(|_| malformed())?;
    let minutes: u32 = minutes.parse().map_err(|_| malformed())?;

    if hours >= 24 || minutes >= 60 {
        return Err(LaunchParseError::OutOfRange { hours, minutes });
    }

    Ok(TimeCode::new(hours, minutes, 0))
}

/// Average every valid launch time read from `reader`.
///
/// Malformed records are counted and skipped. A data set without a single
/// valid record is an error.
pub fn summarize<R: BufRead>(
    reader: R,
    config: &LaunchConfig,
) -> Result<LaunchSummary, LaunchError> {
    let mut times = Vec::new();
    let mut skipped = 0;

    let mut lines = reader.lines();
    if config.skip_header {
        lines.next().transpose()?;
    }

    for (index, line) in lines.enumerate() {
        let line = line?;
        match parse_line(&line, config) {
            Ok(time) => times.push(time),
            Err(e) => {
                log::debug!("skipping record {}: {}", index + 1, e);
                skipped += 1;
            }
        }
    }

    if times.is_empty() {
        return Err(LaunchError::NoValidData);
    }

    let data_points = times.len();
    let average = TimeCode::average(times)?;
    log::info!("averaged {} launch times ({} skipped)", data_points, skipped);

    Ok(LaunchSummary {
        data_points,
        skipped,
        average,
    })
}
