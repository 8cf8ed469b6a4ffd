//! Elapsed time as a non-negative count of whole seconds.
//!
//! [`TimeCode`] keeps a single canonical `u64` of seconds. Hours, minutes and
//! seconds are always derived from it and never stored separately.

use crate::error::{TimeCodeError, TimeCodeParseError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::iter::Sum;
use std::ops::{Add, AddAssign};
use std::str::FromStr;

const SECS_PER_MINUTE: u64 = 60;
const SECS_PER_HOUR: u64 = 3600;

/// A duration (or, by convention, a time of day) in whole seconds.
///
/// Arithmetic on the seconds count saturates at `u64::MAX` instead of
/// wrapping; use [`TimeCode::checked_add`] to detect that case.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize,
)]
#[serde(transparent)]
pub struct TimeCode {
    total_seconds: u64,
}

impl TimeCode {
    /// Build from components, carrying excess seconds into minutes and
    /// excess minutes into hours.
    ///
    /// ```
    /// use timecode_tools::timecode::TimeCode;
    /// assert_eq!(TimeCode::new(0, 0, 125), TimeCode::new(0, 2, 5));
    /// assert_eq!(TimeCode::new(1, 90, 0), TimeCode::new(2, 30, 0));
    /// ```
    pub fn new(hours: u32, minutes: u32, seconds: u64) -> Self {
        let minutes = u64::from(minutes).saturating_add(seconds / SECS_PER_MINUTE);
        let seconds = seconds % SECS_PER_MINUTE;
        let hours = u64::from(hours).saturating_add(minutes / 60);
        let minutes = minutes % 60;

        Self::from_seconds(
            hours
                .saturating_mul(SECS_PER_HOUR)
                .saturating_add(minutes * SECS_PER_MINUTE)
                .saturating_add(seconds),
        )
    }

    pub const fn from_seconds(total_seconds: u64) -> Self {
        Self { total_seconds }
    }

    pub fn hours(&self) -> u64 {
        self.total_seconds / SECS_PER_HOUR
    }

    pub fn minutes(&self) -> u32 {
        ((self.total_seconds % SECS_PER_HOUR) / SECS_PER_MINUTE) as u32
    }

    pub fn seconds(&self) -> u32 {
        (self.total_seconds % SECS_PER_MINUTE) as u32
    }

    pub fn to_seconds(&self) -> u64 {
        self.total_seconds
    }

    /// Replace the hour component, keeping minutes and seconds.
    pub fn set_hours(&mut self, hours: u32) {
        self.total_seconds = components_to_seconds(u64::from(hours), self.minutes(), self.seconds());
    }

    /// Replace the minute component. Fails when `minutes >= 60`.
    pub fn set_minutes(&mut self, minutes: u32) -> Result<(), TimeCodeError> {
        if minutes >= 60 {
            return Err(TimeCodeError::InvalidArgument("minutes must be less than 60"));
        }
        self.total_seconds = components_to_seconds(self.hours(), minutes, self.seconds());
        Ok(())
    }

    /// Replace the second component. Fails when `seconds >= 60`.
    pub fn set_seconds(&mut self, seconds: u32) -> Result<(), TimeCodeError> {
        if seconds >= 60 {
            return Err(TimeCodeError::InvalidArgument("seconds must be less than 60"));
        }
        self.total_seconds = components_to_seconds(self.hours(), self.minutes(), seconds);
        Ok(())
    }

    pub fn reset(&mut self) {
        self.total_seconds = 0;
    }

    /// Sum of both durations, saturating at `u64::MAX`.
    pub fn add(self, other: TimeCode) -> TimeCode {
        Self::from_seconds(self.total_seconds.saturating_add(other.total_seconds))
    }

    pub fn checked_add(self, other: TimeCode) -> Result<TimeCode, TimeCodeError> {
        self.total_seconds
            .checked_add(other.total_seconds)
            .map(Self::from_seconds)
            .ok_or(TimeCodeError::InvalidArgument("duration overflow"))
    }

    /// Difference of both durations. A duration cannot go below zero.
    pub fn subtract(self, other: TimeCode) -> Result<TimeCode, TimeCodeError> {
        self.total_seconds
            .checked_sub(other.total_seconds)
            .map(Self::from_seconds)
            .ok_or(TimeCodeError::InvalidArgument("negative duration"))
    }

    /// Multiply by `factor`, flooring to whole seconds.
    ///
    /// Negative and NaN factors are rejected. Results beyond `u64::MAX`
    /// saturate. Whole-number factors stay in integer arithmetic; fractional
    /// ones go through `f64` and lose precision above 2^53 seconds.
    pub fn scale(self, factor: f64) -> Result<TimeCode, TimeCodeError> {
        if factor.is_nan() {
            return Err(TimeCodeError::InvalidArgument("cannot scale by NaN"));
        }
        if factor < 0.0 {
            return Err(TimeCodeError::InvalidArgument(
                "cannot scale by a negative number",
            ));
        }
        if let Some(factor) = as_whole(factor) {
            return Ok(Self::from_seconds(self.total_seconds.saturating_mul(factor)));
        }
        Ok(Self::from_seconds(
            (self.total_seconds as f64 * factor).floor() as u64,
        ))
    }

    /// Divide by `divisor`, flooring to whole seconds.
    ///
    /// Zero, negative and NaN divisors are rejected. Whole-number divisors
    /// are exact.
    pub fn divide(self, divisor: f64) -> Result<TimeCode, TimeCodeError> {
        if divisor.is_nan() {
            return Err(TimeCodeError::InvalidArgument("cannot divide by NaN"));
        }
        if divisor == 0.0 {
            return Err(TimeCodeError::InvalidArgument("division by zero"));
        }
        if divisor < 0.0 {
            return Err(TimeCodeError::InvalidArgument(
                "cannot divide by a negative number",
            ));
        }
        if let Some(divisor) = as_whole(divisor) {
            return Ok(Self::from_seconds(self.total_seconds / divisor));
        }
        Ok(Self::from_seconds(
            (self.total_seconds as f64 / divisor).floor() as u64,
        ))
    }

    /// Arithmetic mean: the sum of all items divided by their count.
    ///
    /// An empty collection is a division by zero; a sum past `u64::MAX` is
    /// an overflow.
    pub fn average<I>(items: I) -> Result<TimeCode, TimeCodeError>
    where
        I: IntoIterator<Item = TimeCode>,
    {
        let (sum, count) = items
            .into_iter()
            .try_fold((TimeCode::default(), 0u64), |(sum, count), tc| {
                Ok::<_, TimeCodeError>((sum.checked_add(tc)?, count + 1))
            })?;
        sum.divide(count as f64)
    }

    /// `H:MM:SS` with zero-padded minutes and seconds.
    ///
    /// The [`Display`](fmt::Display) form is unpadded.
    pub fn to_padded_string(&self) -> String {
        format!("{}:{:02}:{:02}", self.hours(), self.minutes(), self.seconds())
    }
}

/// `value` as a `u64` when it is a whole number in range.
fn as_whole(value: f64) -> Option<u64> {
    (value.fract() == 0.0 && value < u64::MAX as f64).then(|| value as u64)
}

fn components_to_seconds(hours: u64, minutes: u32, seconds: u32) -> u64 {
    hours
        .saturating_mul(SECS_PER_HOUR)
        .saturating_add(u64::from(minutes) * SECS_PER_MINUTE + u64::from(seconds))
}

impl fmt::Display for TimeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.hours(), self.minutes(), self.seconds())
    }
}

impl FromStr for TimeCode {
    type Err = TimeCodeParseError;

    /// Parse `H:M:S` or `H:M`. Minutes and seconds must be below 60.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parts: Vec<&str> = s.trim().split(':').collect();
        if parts.len() < 2 || parts.len() > 3 {
            return Err(TimeCodeParseError::Format(s.to_string()));
        }

        let number = |part: &str| -> Result<u64, TimeCodeParseError> {
            part.trim()
                .parse::<u64>()
                .map_err(|_| TimeCodeParseError::Number(part.to_string()))
        };

        let hours = number(parts[0])?;
        let minutes = number(parts[1])?;
        let seconds = match parts.get(2) {
            Some(part) => number(part)?,
            None => 0,
        };

        if minutes >= 60 {
            return Err(TimeCodeParseError::OutOfRange("minutes"));
        }
        if seconds >= 60 {
            return Err(TimeCodeParseError::OutOfRange("seconds"));
        }

        Ok(Self::from_seconds(components_to_seconds(
            hours,
            minutes as u32,
            seconds as u32,
        )))
    }
}

impl Add for TimeCode {
    type Output = TimeCode;

    fn add(self, rhs: TimeCode) -> TimeCode {
        TimeCode::add(self, rhs)
    }
}

impl AddAssign for TimeCode {
    fn add_assign(&mut self, rhs: TimeCode) {
        *self = TimeCode::add(*self, rhs);
    }
}

impl Sum for TimeCode {
    fn sum<I: Iterator<Item = TimeCode>>(iter: I) -> Self {
        iter.fold(TimeCode::default(), TimeCode::add)
    }
}

impl<'a> Sum<&'a TimeCode> for TimeCode {
    fn sum<I: Iterator<Item = &'a TimeCode>>(iter: I) -> Self {
        iter.copied().sum()
    }
}

impl From<std::time::Duration> for TimeCode {
    fn from(value: std::time::Duration) -> Self {
        Self::from_seconds(value.as_secs())
    }
}

impl From<TimeCode> for std::time::Duration {
    fn from(value: TimeCode) -> Self {
        std::time::Duration::from_secs(value.total_seconds)
    }
}

impl From<TimeCode> for u64 {
    fn from(value: TimeCode) -> Self {
        value.total_seconds
    }
}
